// Lifecycle event publishing.
//
// Events are a best-effort side channel: a failed or unsubscribed publish
// never fails the operation that produced it.

pub mod publisher;

pub use publisher::{EventPublisher, PublishError, PublishedEvent};

/// Event names emitted by the lifecycle engine.
pub mod names {
    pub const CONTAINER_CREATED: &str = "container.created";
    pub const CONTAINER_UPDATED: &str = "container.updated";
    pub const CONTAINER_FILLED: &str = "container.filled";
    pub const CONTAINER_EMPTIED: &str = "container.emptied";
    pub const CONTAINER_FILL_UPDATED: &str = "container.fill_updated";
    pub const CONTAINER_TYPE_CREATED: &str = "container_type.created";
    pub const CONTAINER_TYPE_UPDATED: &str = "container_type.updated";
    pub const CONTAINER_TYPE_DELETED: &str = "container_type.deleted";
}
