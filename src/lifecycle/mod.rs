//! Lifecycle orchestration.
//!
//! [`engine::LifecycleEngine`] composes the pure leaves in this module
//! (code generation, expiration resolution, compatibility) with the entity
//! layer and the storage boundary.

pub mod codes;
pub mod compatibility;
pub mod engine;
pub mod expiration;
pub mod types;

pub use engine::LifecycleEngine;
pub use types::{
    ContainerWithType, CreateContainerRequest, CreateContainerTypeRequest, FillRequest,
    UpdateContainerRequest, UpdateContainerTypeRequest, UpdateFillRequest,
};
