//! # Persistence Boundary
//!
//! The lifecycle core never talks to a database directly; it loads entities
//! and commits mutation batches through [`LifecycleStore`]. Relational
//! adapters live outside this crate and implement the trait over their own
//! transaction machinery.
//!
//! `commit` is the serialization point: all mutations of one logical
//! operation are applied atomically, or none are. The core does not add
//! locking or optimistic versioning on top; adapters that expect concurrent
//! writers against the same container must provide their own row versioning.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Container, ContainerFill, ContainerType, Product, ProductType};

pub use memory::InMemoryStore;

/// Result alias for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Failures raised by a storage adapter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    /// The backend rejected or lost the operation.
    #[error("storage backend failure: {0}")]
    Backend(String),

    /// The batch conflicted with a concurrent writer.
    #[error("storage conflict: {0}")]
    Conflict(String),
}

/// One entity write inside an atomic commit batch.
///
/// Mutations are upserts keyed by the entity id; soft deletion travels as a
/// regular put with the flag set.
#[derive(Debug, Clone)]
pub enum Mutation {
    PutContainer(Container),
    PutContainerType(ContainerType),
    PutFill(ContainerFill),
}

/// Lookup and commit operations the lifecycle engine consumes.
///
/// Reads never return soft-deleted container types; the filter is applied
/// here, not in the engine.
#[async_trait]
pub trait LifecycleStore: Send + Sync {
    async fn container(&self, id: Uuid) -> StorageResult<Option<Container>>;

    /// Lookup by code, case-insensitive.
    async fn container_by_code(&self, code: &str) -> StorageResult<Option<Container>>;

    async fn container_type(&self, id: Uuid) -> StorageResult<Option<ContainerType>>;

    /// Lookup by name, case-insensitive.
    async fn container_type_by_name(&self, name: &str) -> StorageResult<Option<ContainerType>>;

    async fn product(&self, id: Uuid) -> StorageResult<Option<Product>>;

    async fn product_type(&self, id: Uuid) -> StorageResult<Option<ProductType>>;

    async fn fill(&self, id: Uuid) -> StorageResult<Option<ContainerFill>>;

    /// Complete fill ledger for a container, newest-first.
    async fn fill_history(&self, container_id: Uuid) -> StorageResult<Vec<ContainerFill>>;

    /// Number of containers referencing a type, deleted types included.
    async fn count_containers_of_type(&self, container_type_id: Uuid) -> StorageResult<u64>;

    /// Apply a batch of mutations atomically.
    async fn commit(&self, mutations: Vec<Mutation>) -> StorageResult<()>;
}
