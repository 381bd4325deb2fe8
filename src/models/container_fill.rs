//! # Container Fill Model
//!
//! Append-only ledger of fill cycles. One row is opened per fill, amended
//! while open, and closed exactly once when the container is emptied. A
//! closed row is immutable; history queries return rows newest-first.
//!
//! At most one open row exists per container at any time. The owning
//! container encodes that invariant through its current-fill pointer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::container::{ensure_positive, required_text};
use crate::state_machine::{InvariantViolation, TransitionResult};

/// New ContainerFill for creation.
#[derive(Debug, Clone)]
pub struct NewContainerFill {
    pub container_id: Uuid,
    pub product_id: Uuid,
    pub quantity: Decimal,
    pub unit: String,
    pub production_date: DateTime<Utc>,
    pub expiration_date: Option<DateTime<Utc>>,
}

/// One fill-to-empty cycle of a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerFill {
    pub id: Uuid,
    pub container_id: Uuid,
    pub product_id: Uuid,
    pub quantity: Decimal,
    pub unit: String,
    pub production_date: DateTime<Utc>,
    /// When the row was opened.
    pub filled_date: DateTime<Utc>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub emptied_date: Option<DateTime<Utc>>,
    pub filled_by: Uuid,
    pub emptied_by: Option<Uuid>,
}

impl ContainerFill {
    /// Open a new ledger row.
    ///
    /// # Errors
    ///
    /// Rejects a non-positive quantity or blank unit.
    pub fn new(new: NewContainerFill, filled_by: Uuid) -> TransitionResult<Self> {
        ensure_positive(new.quantity, "fill quantity")?;
        let unit = required_text(&new.unit, "fill unit")?;

        Ok(Self {
            id: Uuid::new_v4(),
            container_id: new.container_id,
            product_id: new.product_id,
            quantity: new.quantity,
            unit,
            production_date: new.production_date,
            filled_date: Utc::now(),
            expiration_date: new.expiration_date,
            emptied_date: None,
            filled_by,
            emptied_by: None,
        })
    }

    /// Whether the row is still open.
    pub fn is_open(&self) -> bool {
        self.emptied_date.is_none()
    }

    /// Close the row, stamping the emptied date and actor.
    ///
    /// # Errors
    ///
    /// Fails with `AlreadyClosed` on a second call; the row is unchanged by
    /// the failed attempt.
    pub fn close(&mut self, emptied_by: Uuid) -> TransitionResult<()> {
        if self.emptied_date.is_some() {
            return Err(InvariantViolation::AlreadyClosed);
        }
        self.emptied_date = Some(Utc::now());
        self.emptied_by = Some(emptied_by);
        Ok(())
    }

    /// Amend quantity, dates and optionally the product while the row is
    /// still open.
    pub fn update_details(
        &mut self,
        product_id: Option<Uuid>,
        quantity: Decimal,
        unit: &str,
        production_date: DateTime<Utc>,
        expiration_date: Option<DateTime<Utc>>,
    ) -> TransitionResult<()> {
        if self.emptied_date.is_some() {
            return Err(InvariantViolation::ClosedFillImmutable);
        }
        ensure_positive(quantity, "fill quantity")?;
        let unit = required_text(unit, "fill unit")?;

        if let Some(product_id) = product_id {
            self.product_id = product_id;
        }
        self.quantity = quantity;
        self.unit = unit;
        self.production_date = production_date;
        self.expiration_date = expiration_date;
        Ok(())
    }
}
