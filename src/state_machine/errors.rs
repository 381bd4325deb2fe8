use rust_decimal::Decimal;
use thiserror::Error;

/// Result alias for entity-level guard checks.
pub type TransitionResult<T> = std::result::Result<T, InvariantViolation>;

/// Local invariant violations raised by state-machine guards and entity
/// factories.
///
/// These never cross the public boundary: the lifecycle engine catches them
/// and translates each into the matching [`VesselError`] kind.
///
/// [`VesselError`]: crate::error::VesselError
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("container is not empty")]
    NotEmpty,

    #[error("container is not full")]
    NotFull,

    #[error("quantity {requested} exceeds container volume {volume}")]
    ExceedsVolume { requested: Decimal, volume: Decimal },

    #[error("unit {actual:?} does not match container unit {expected:?}")]
    UnitMismatch { expected: String, actual: String },

    #[error("fill is already closed")]
    AlreadyClosed,

    #[error("cannot update a closed fill")]
    ClosedFillImmutable,

    #[error("{0}")]
    InvalidValue(String),
}
