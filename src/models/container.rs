//! # Container Model
//!
//! A container is a reusable vessel with a fixed volume and unit that cycles
//! between `Empty` and `Full`. It owns the denormalized "current fill" and
//! "last emptied" snapshots; the append-only history lives in
//! [`ContainerFill`](crate::models::ContainerFill) rows.
//!
//! Invariant: `state == Full` exactly when `current_fill` is present. The
//! snapshot is a single `Option` so the current-* fields can never be
//! half-populated.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state_machine::{
    ensure_unit_match, ensure_within_volume, target_state, ContainerEvent, ContainerState,
    InvariantViolation, TransitionResult,
};

/// Denormalized snapshot of the open fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentFill {
    /// Id of the open ledger row this snapshot mirrors.
    pub fill_id: Uuid,
    pub product_id: Uuid,
    pub product_type_id: Uuid,
    pub quantity: Decimal,
    pub unit: String,
    pub production_date: DateTime<Utc>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub filled_at: DateTime<Utc>,
}

/// Denormalized summary of the most recently closed fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastEmptied {
    pub product_id: Uuid,
    pub product_type_id: Uuid,
    pub emptied_at: DateTime<Utc>,
}

/// Parameters for opening a fill cycle on a container.
#[derive(Debug, Clone)]
pub struct FillSpec {
    pub fill_id: Uuid,
    pub product_id: Uuid,
    pub product_type_id: Uuid,
    pub quantity: Decimal,
    pub unit: String,
    pub production_date: DateTime<Utc>,
    pub expiration_date: Option<DateTime<Utc>>,
}

/// Parameters for amending the open fill in place.
///
/// `product_id`/`product_type_id` are only set when the product is swapped.
#[derive(Debug, Clone)]
pub struct FillAmendment {
    pub product_id: Option<Uuid>,
    pub product_type_id: Option<Uuid>,
    pub quantity: Decimal,
    pub unit: String,
    pub production_date: DateTime<Utc>,
    pub expiration_date: Option<DateTime<Utc>>,
}

/// New Container for creation.
#[derive(Debug, Clone)]
pub struct NewContainer {
    pub code: String,
    pub name: String,
    pub volume: Decimal,
    pub unit: String,
    pub container_type_id: Uuid,
    pub metadata: Option<serde_json::Value>,
}

/// A reusable vessel tracked through its fill/empty lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub id: Uuid,
    /// Unique human-readable code, e.g. `TANK-0001`. Uniqueness is
    /// case-insensitive.
    pub code: String,
    pub name: String,
    pub volume: Decimal,
    pub unit: String,
    pub container_type_id: Uuid,
    pub state: ContainerState,
    pub current_fill: Option<CurrentFill>,
    pub last_emptied: Option<LastEmptied>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Uuid,
}

impl Container {
    /// Create a new empty container.
    ///
    /// # Errors
    ///
    /// Rejects a blank code, blank name, blank unit or non-positive volume.
    pub fn new(new: NewContainer, actor: Uuid) -> TransitionResult<Self> {
        let code = required_text(&new.code, "container code")?;
        let name = required_text(&new.name, "container name")?;
        let unit = required_text(&new.unit, "container unit")?;
        ensure_positive(new.volume, "container volume")?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            code,
            name,
            volume: new.volume,
            unit,
            container_type_id: new.container_type_id,
            state: ContainerState::default(),
            current_fill: None,
            last_emptied: None,
            metadata: new.metadata,
            created_at: now,
            created_by: actor,
            updated_at: now,
            updated_by: actor,
        })
    }

    /// Id of the open ledger row, if the container is full.
    pub fn current_fill_id(&self) -> Option<Uuid> {
        self.current_fill.as_ref().map(|fill| fill.fill_id)
    }

    /// Open a fill cycle. Allowed only from `Empty`.
    ///
    /// # Errors
    ///
    /// `NotEmpty` when already full, `ExceedsVolume` when the quantity is
    /// over the container volume, `UnitMismatch` when the fill unit differs
    /// from the container unit.
    pub fn fill(&mut self, spec: FillSpec, actor: Uuid) -> TransitionResult<()> {
        let next = target_state(self.state, &ContainerEvent::Fill)?;
        ensure_within_volume(self.volume, spec.quantity)?;
        ensure_unit_match(&self.unit, &spec.unit)?;
        ensure_positive(spec.quantity, "fill quantity")?;

        let now = Utc::now();
        self.current_fill = Some(CurrentFill {
            fill_id: spec.fill_id,
            product_id: spec.product_id,
            product_type_id: spec.product_type_id,
            quantity: spec.quantity,
            unit: spec.unit,
            production_date: spec.production_date,
            expiration_date: spec.expiration_date,
            filled_at: now,
        });
        self.state = next;
        self.touch(actor, now);
        Ok(())
    }

    /// Close the fill cycle. Allowed only from `Full`.
    ///
    /// Copies the current snapshot into `last_emptied` before clearing it.
    pub fn empty_out(&mut self, actor: Uuid) -> TransitionResult<()> {
        let next = target_state(self.state, &ContainerEvent::Empty)?;
        let current = self.current_fill.take().ok_or(InvariantViolation::NotFull)?;

        let now = Utc::now();
        self.last_emptied = Some(LastEmptied {
            product_id: current.product_id,
            product_type_id: current.product_type_id,
            emptied_at: now,
        });
        self.state = next;
        self.touch(actor, now);
        Ok(())
    }

    /// Amend the open fill in place. Allowed only from `Full`, with the same
    /// volume and unit guards as [`fill`](Self::fill).
    pub fn update_current_fill(
        &mut self,
        amendment: FillAmendment,
        actor: Uuid,
    ) -> TransitionResult<()> {
        target_state(self.state, &ContainerEvent::AmendFill)?;
        ensure_within_volume(self.volume, amendment.quantity)?;
        ensure_unit_match(&self.unit, &amendment.unit)?;
        ensure_positive(amendment.quantity, "fill quantity")?;

        let current = self.current_fill.as_mut().ok_or(InvariantViolation::NotFull)?;
        if let Some(product_id) = amendment.product_id {
            current.product_id = product_id;
        }
        if let Some(product_type_id) = amendment.product_type_id {
            current.product_type_id = product_type_id;
        }
        current.quantity = amendment.quantity;
        current.unit = amendment.unit;
        current.production_date = amendment.production_date;
        current.expiration_date = amendment.expiration_date;

        self.touch(actor, Utc::now());
        Ok(())
    }

    /// Update name, volume, unit, type and metadata. Allowed in any state and
    /// does not touch fill state.
    ///
    /// # Errors
    ///
    /// Rejects blank name/unit and non-positive volume. While full, also
    /// rejects shrinking the volume below the current quantity and changing
    /// the unit, since either would invalidate the open fill.
    pub fn update_details(
        &mut self,
        name: &str,
        volume: Decimal,
        unit: &str,
        container_type_id: Uuid,
        metadata: Option<serde_json::Value>,
        actor: Uuid,
    ) -> TransitionResult<()> {
        let name = required_text(name, "container name")?;
        let unit = required_text(unit, "container unit")?;
        ensure_positive(volume, "container volume")?;

        if let Some(current) = &self.current_fill {
            ensure_within_volume(volume, current.quantity)?;
            ensure_unit_match(&unit, &current.unit)?;
        }

        self.name = name;
        self.volume = volume;
        self.unit = unit;
        self.container_type_id = container_type_id;
        self.metadata = metadata;
        self.touch(actor, Utc::now());
        Ok(())
    }

    fn touch(&mut self, actor: Uuid, at: DateTime<Utc>) {
        self.updated_at = at;
        self.updated_by = actor;
    }
}

pub(crate) fn required_text(value: &str, field: &str) -> TransitionResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InvariantViolation::InvalidValue(format!(
            "{field} cannot be blank"
        )));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn ensure_positive(value: Decimal, field: &str) -> TransitionResult<()> {
    if value <= Decimal::ZERO {
        return Err(InvariantViolation::InvalidValue(format!(
            "{field} must be positive, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tank() -> Container {
        Container::new(
            NewContainer {
                code: "TANK-0001".to_string(),
                name: "Fermenter 1".to_string(),
                volume: Decimal::from(100),
                unit: "l".to_string(),
                container_type_id: Uuid::new_v4(),
                metadata: None,
            },
            Uuid::new_v4(),
        )
        .unwrap()
    }

    fn fill_spec(quantity: Decimal, unit: &str) -> FillSpec {
        FillSpec {
            fill_id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            product_type_id: Uuid::new_v4(),
            quantity,
            unit: unit.to_string(),
            production_date: Utc::now(),
            expiration_date: None,
        }
    }

    #[test]
    fn test_new_container_starts_empty() {
        let container = tank();
        assert_eq!(container.state, ContainerState::Empty);
        assert!(container.current_fill.is_none());
        assert!(container.last_emptied.is_none());
    }

    #[test]
    fn test_factory_rejects_bad_input() {
        let actor = Uuid::new_v4();
        let base = NewContainer {
            code: "T-0001".to_string(),
            name: "Tank".to_string(),
            volume: Decimal::from(10),
            unit: "l".to_string(),
            container_type_id: Uuid::new_v4(),
            metadata: None,
        };

        let blank_name = NewContainer {
            name: "   ".to_string(),
            ..base.clone()
        };
        assert!(Container::new(blank_name, actor).is_err());

        let zero_volume = NewContainer {
            volume: Decimal::ZERO,
            ..base
        };
        assert!(Container::new(zero_volume, actor).is_err());
    }

    #[test]
    fn test_fill_sets_state_and_snapshot() {
        let mut container = tank();
        let spec = fill_spec(Decimal::from(50), "L");
        let fill_id = spec.fill_id;

        container.fill(spec, Uuid::new_v4()).unwrap();
        assert_eq!(container.state, ContainerState::Full);
        assert_eq!(container.current_fill_id(), Some(fill_id));
    }

    #[test]
    fn test_fill_from_full_fails() {
        let mut container = tank();
        container.fill(fill_spec(Decimal::from(10), "l"), Uuid::new_v4()).unwrap();

        let err = container
            .fill(fill_spec(Decimal::from(10), "l"), Uuid::new_v4())
            .unwrap_err();
        assert_eq!(err, InvariantViolation::NotEmpty);
    }

    #[test]
    fn test_fill_guards() {
        let mut container = tank();

        let overfill = container
            .fill(fill_spec(Decimal::new(10001, 2), "l"), Uuid::new_v4())
            .unwrap_err();
        assert!(matches!(overfill, InvariantViolation::ExceedsVolume { .. }));

        let mismatch = container
            .fill(fill_spec(Decimal::from(10), "kg"), Uuid::new_v4())
            .unwrap_err();
        assert!(matches!(mismatch, InvariantViolation::UnitMismatch { .. }));

        // Quantity exactly at the volume boundary is fine.
        assert!(container
            .fill(fill_spec(Decimal::from(100), "l"), Uuid::new_v4())
            .is_ok());
    }

    #[test]
    fn test_empty_copies_snapshot_to_last_emptied() {
        let mut container = tank();
        let spec = fill_spec(Decimal::from(50), "l");
        let product_id = spec.product_id;
        container.fill(spec, Uuid::new_v4()).unwrap();

        container.empty_out(Uuid::new_v4()).unwrap();
        assert_eq!(container.state, ContainerState::Empty);
        assert!(container.current_fill.is_none());

        let last = container.last_emptied.unwrap();
        assert_eq!(last.product_id, product_id);
    }

    #[test]
    fn test_empty_from_empty_fails() {
        let mut container = tank();
        assert_eq!(
            container.empty_out(Uuid::new_v4()).unwrap_err(),
            InvariantViolation::NotFull
        );
    }

    #[test]
    fn test_update_current_fill_swaps_product() {
        let mut container = tank();
        container.fill(fill_spec(Decimal::from(50), "l"), Uuid::new_v4()).unwrap();

        let new_product = Uuid::new_v4();
        container
            .update_current_fill(
                FillAmendment {
                    product_id: Some(new_product),
                    product_type_id: Some(Uuid::new_v4()),
                    quantity: Decimal::from(60),
                    unit: "l".to_string(),
                    production_date: Utc::now(),
                    expiration_date: None,
                },
                Uuid::new_v4(),
            )
            .unwrap();

        let current = container.current_fill.as_ref().unwrap();
        assert_eq!(current.product_id, new_product);
        assert_eq!(current.quantity, Decimal::from(60));
        assert_eq!(container.state, ContainerState::Full);
    }

    #[test]
    fn test_update_details_guards_open_fill() {
        let mut container = tank();
        container.fill(fill_spec(Decimal::from(80), "l"), Uuid::new_v4()).unwrap();

        // Shrinking below the open fill quantity is rejected.
        let err = container
            .update_details(
                "Fermenter 1",
                Decimal::from(50),
                "l",
                container.container_type_id,
                None,
                Uuid::new_v4(),
            )
            .unwrap_err();
        assert!(matches!(err, InvariantViolation::ExceedsVolume { .. }));

        // Changing the unit while full is rejected.
        let err = container
            .update_details(
                "Fermenter 1",
                Decimal::from(100),
                "kg",
                container.container_type_id,
                None,
                Uuid::new_v4(),
            )
            .unwrap_err();
        assert!(matches!(err, InvariantViolation::UnitMismatch { .. }));

        // Growing the volume is fine.
        assert!(container
            .update_details(
                "Fermenter 1A",
                Decimal::from(120),
                "L",
                container.container_type_id,
                None,
                Uuid::new_v4(),
            )
            .is_ok());
        assert_eq!(container.name, "Fermenter 1A");
    }
}
