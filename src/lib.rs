#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Vessel Core
//!
//! Lifecycle core for reusable containers (tanks, kegs, barrels, silos) that
//! cycle between an empty and a filled state while holding perishable
//! product.
//!
//! ## Overview
//!
//! The crate owns the container state machine, the append-only fill ledger,
//! shelf-life expiration policy, container code generation and the
//! product-compatibility rules. HTTP routing, authentication and the
//! relational adapter are external collaborators behind the
//! [`storage::LifecycleStore`] trait.
//!
//! ## Module Organization
//!
//! - [`models`] - Container, ContainerType, ContainerFill and catalog
//!   projections
//! - [`state_machine`] - Explicit Empty/Full state machine and guards
//! - [`lifecycle`] - The orchestrating engine and its pure leaves
//! - [`storage`] - Persistence boundary trait and the in-memory reference
//!   store
//! - [`events`] - Best-effort lifecycle event broadcasting
//! - [`config`] - Environment-driven configuration
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rust_decimal::Decimal;
//! use uuid::Uuid;
//! use vessel_core::lifecycle::{CreateContainerRequest, LifecycleEngine};
//! use vessel_core::storage::InMemoryStore;
//!
//! # async fn example() -> vessel_core::Result<()> {
//! let store = Arc::new(InMemoryStore::new());
//! let engine = LifecycleEngine::new(store);
//!
//! let created = engine
//!     .create_container(
//!         CreateContainerRequest {
//!             code: None,
//!             name: "Fermenter 1".to_string(),
//!             volume: Decimal::from(1000),
//!             unit: "l".to_string(),
//!             container_type_id: Uuid::new_v4(),
//!             metadata: None,
//!         },
//!         Uuid::new_v4(),
//!     )
//!     .await?;
//! println!("created {}", created.container.code);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod logging;
pub mod models;
pub mod state_machine;
pub mod storage;

pub use config::VesselConfig;
pub use error::{Result, VesselError};
pub use events::{EventPublisher, PublishedEvent};
pub use lifecycle::{
    ContainerWithType, CreateContainerRequest, CreateContainerTypeRequest, FillRequest,
    LifecycleEngine, UpdateContainerRequest, UpdateContainerTypeRequest, UpdateFillRequest,
};
pub use models::{Container, ContainerFill, ContainerType, Product, ProductType};
pub use state_machine::{ContainerEvent, ContainerState, InvariantViolation};
pub use storage::{InMemoryStore, LifecycleStore, Mutation, StorageError};
