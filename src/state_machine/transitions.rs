//! Pure transition and guard functions for the container state machine.

use rust_decimal::Decimal;

use super::errors::{InvariantViolation, TransitionResult};
use super::events::ContainerEvent;
use super::states::ContainerState;

/// Determine the target state for an event, or fail with the violation the
/// wrong-state attempt produces.
pub fn target_state(
    current: ContainerState,
    event: &ContainerEvent,
) -> TransitionResult<ContainerState> {
    match (current, event) {
        (ContainerState::Empty, ContainerEvent::Fill) => Ok(ContainerState::Full),
        (ContainerState::Full, ContainerEvent::Empty) => Ok(ContainerState::Empty),
        (ContainerState::Full, ContainerEvent::AmendFill) => Ok(ContainerState::Full),
        (ContainerState::Full, ContainerEvent::Fill) => Err(InvariantViolation::NotEmpty),
        (ContainerState::Empty, ContainerEvent::Empty | ContainerEvent::AmendFill) => {
            Err(InvariantViolation::NotFull)
        }
    }
}

/// A fill quantity must never exceed the container volume. Quantity equal to
/// the volume is allowed.
pub fn ensure_within_volume(volume: Decimal, requested: Decimal) -> TransitionResult<()> {
    if requested > volume {
        return Err(InvariantViolation::ExceedsVolume { requested, volume });
    }
    Ok(())
}

/// Units compare case-insensitively. Lowercasing is Unicode-aware because
/// units like "л" are in-domain.
pub fn ensure_unit_match(container_unit: &str, fill_unit: &str) -> TransitionResult<()> {
    if container_unit.trim().to_lowercase() == fill_unit.trim().to_lowercase() {
        return Ok(());
    }
    Err(InvariantViolation::UnitMismatch {
        expected: container_unit.trim().to_string(),
        actual: fill_unit.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert_eq!(
            target_state(ContainerState::Empty, &ContainerEvent::Fill).unwrap(),
            ContainerState::Full
        );
        assert_eq!(
            target_state(ContainerState::Full, &ContainerEvent::Empty).unwrap(),
            ContainerState::Empty
        );
        assert_eq!(
            target_state(ContainerState::Full, &ContainerEvent::AmendFill).unwrap(),
            ContainerState::Full
        );
    }

    #[test]
    fn test_invalid_transitions() {
        assert_eq!(
            target_state(ContainerState::Full, &ContainerEvent::Fill),
            Err(InvariantViolation::NotEmpty)
        );
        assert_eq!(
            target_state(ContainerState::Empty, &ContainerEvent::Empty),
            Err(InvariantViolation::NotFull)
        );
        assert_eq!(
            target_state(ContainerState::Empty, &ContainerEvent::AmendFill),
            Err(InvariantViolation::NotFull)
        );
    }

    #[test]
    fn test_volume_guard_boundary() {
        let volume = Decimal::from(100);
        assert!(ensure_within_volume(volume, Decimal::from(100)).is_ok());
        assert!(ensure_within_volume(volume, Decimal::new(10001, 2)).is_err());
    }

    #[test]
    fn test_unit_guard_is_case_insensitive() {
        assert!(ensure_unit_match("l", "L").is_ok());
        assert!(ensure_unit_match("л", "Л").is_ok());
        assert!(ensure_unit_match(" kg", "KG ").is_ok());

        let err = ensure_unit_match("l", "kg").unwrap_err();
        assert_eq!(
            err,
            InvariantViolation::UnitMismatch {
                expected: "l".to_string(),
                actual: "kg".to_string(),
            }
        );
    }
}
