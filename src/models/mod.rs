//! Entity layer.
//!
//! `Container` and `ContainerFill` are independent aggregates linked by id:
//! the container carries a denormalized snapshot of its open fill for cheap
//! reads, while the fill ledger is the source of truth for history. The
//! lifecycle engine is the only writer of both within a single operation.

pub mod container;
pub mod container_fill;
pub mod container_type;
pub mod product;

pub use container::{Container, CurrentFill, FillAmendment, FillSpec, LastEmptied, NewContainer};
pub use container_fill::{ContainerFill, NewContainerFill};
pub use container_type::{ContainerType, NewContainerType};
pub use product::{Product, ProductType, ShelfLife};
