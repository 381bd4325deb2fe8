//! Read-side projections of the product catalog.
//!
//! Products and product types are owned by an external catalog; the lifecycle
//! core only reads them for compatibility checks and shelf-life resolution.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A days+hours shelf-life duration. Days and hours combine additively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfLife {
    pub days: i64,
    pub hours: i64,
}

impl ShelfLife {
    pub fn duration(&self) -> Duration {
        Duration::days(self.days) + Duration::hours(self.hours)
    }
}

/// A category of products carrying the default shelf-life policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductType {
    pub id: Uuid,
    pub name: String,
    pub shelf_life_days: Option<i32>,
    pub shelf_life_hours: Option<i32>,
}

impl ProductType {
    pub fn shelf_life(&self) -> Option<ShelfLife> {
        shelf_life_from(self.shelf_life_days, self.shelf_life_hours)
    }
}

/// A perishable product that containers are filled with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub product_type_id: Uuid,
    /// Product-level shelf life overrides the type-level policy when either
    /// field is set.
    pub shelf_life_days: Option<i32>,
    pub shelf_life_hours: Option<i32>,
}

impl Product {
    pub fn shelf_life(&self) -> Option<ShelfLife> {
        shelf_life_from(self.shelf_life_days, self.shelf_life_hours)
    }
}

fn shelf_life_from(days: Option<i32>, hours: Option<i32>) -> Option<ShelfLife> {
    if days.is_none() && hours.is_none() {
        return None;
    }
    Some(ShelfLife {
        days: i64::from(days.unwrap_or(0)),
        hours: i64::from(hours.unwrap_or(0)),
    })
}
