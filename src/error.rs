//! # Error Taxonomy
//!
//! Every public lifecycle operation returns a `Result<T, VesselError>` instead
//! of panicking or throwing across the boundary. The API layer maps each kind
//! 1:1 to a transport status, so the set of kinds here is a stable contract:
//! adding a variant is an API change.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::storage::StorageError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VesselError>;

/// Failure kinds surfaced by lifecycle operations.
///
/// Entity-level guards raise a local [`InvariantViolation`] which the engine
/// translates into exactly one of these kinds, so callers never see raw
/// state-machine errors.
///
/// [`InvariantViolation`]: crate::state_machine::InvariantViolation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VesselError {
    /// A container code or container type name is already taken
    /// (case-insensitive).
    #[error("{entity} already exists: {identifier}")]
    AlreadyExists {
        entity: &'static str,
        identifier: String,
    },

    /// A referenced entity did not resolve at the storage boundary.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    /// Fill attempted on a container that already holds product.
    #[error("container is not empty")]
    NotEmpty,

    /// Empty or fill amendment attempted on a container without an open fill.
    #[error("container is not full")]
    NotFull,

    /// Requested quantity exceeds the container volume.
    #[error("quantity {requested} exceeds container volume {volume}")]
    Overfill { requested: Decimal, volume: Decimal },

    /// Fill unit differs from the container unit (units compare
    /// case-insensitively).
    #[error("fill unit {fill_unit:?} does not match container unit {container_unit:?}")]
    UnitMismatch {
        container_unit: String,
        fill_unit: String,
    },

    /// The product's type is not in the container type's allow-list.
    #[error("product type {product_type_id} is not allowed in this container type")]
    IncompatibleProduct { product_type_id: Uuid },

    /// Deletion blocked by referential use.
    #[error("cannot delete {entity}: {reason}")]
    CannotDelete {
        entity: &'static str,
        reason: String,
    },

    /// An entity factory or update rejected its input (blank name or unit,
    /// non-positive quantity or volume).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Any unexpected failure, wrapping the underlying cause. Treated as a
    /// 5xx-equivalent by the caller.
    #[error("unhandled error: {0}")]
    Unhandled(String),
}

impl VesselError {
    /// Stable machine-readable kind for transport mapping.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AlreadyExists { .. } => "already_exists",
            Self::NotFound { .. } => "not_found",
            Self::NotEmpty => "not_empty",
            Self::NotFull => "not_full",
            Self::Overfill { .. } => "overfill",
            Self::UnitMismatch { .. } => "unit_mismatch",
            Self::IncompatibleProduct { .. } => "incompatible_product",
            Self::CannotDelete { .. } => "cannot_delete",
            Self::Validation(_) => "validation",
            Self::Unhandled(_) => "unhandled",
        }
    }
}

impl From<StorageError> for VesselError {
    fn from(err: StorageError) -> Self {
        Self::Unhandled(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_distinct() {
        let errors = [
            VesselError::NotEmpty,
            VesselError::NotFull,
            VesselError::Validation("x".to_string()),
            VesselError::Unhandled("y".to_string()),
        ];
        let kinds: std::collections::HashSet<_> = errors.iter().map(VesselError::kind).collect();
        assert_eq!(kinds.len(), errors.len());
    }

    #[test]
    fn test_storage_errors_become_unhandled() {
        let err: VesselError = StorageError::Backend("connection reset".to_string()).into();
        assert_eq!(err.kind(), "unhandled");
        assert!(err.to_string().contains("connection reset"));
    }
}
