//! Expiration date resolution.
//!
//! An explicit expiration date from the caller is used verbatim. Otherwise
//! the date is `production_date + shelf life`, where the shelf life comes
//! from the product when the product defines one and from the product type
//! otherwise. When neither source defines a shelf life the expiration stays
//! unset.

use chrono::{DateTime, Utc};

use crate::models::{Product, ProductType};

/// Resolve the expiration date for a fill.
pub fn resolve(
    explicit: Option<DateTime<Utc>>,
    production_date: DateTime<Utc>,
    product: &Product,
    product_type: Option<&ProductType>,
) -> Option<DateTime<Utc>> {
    if let Some(date) = explicit {
        return Some(date);
    }
    let shelf_life = product
        .shelf_life()
        .or_else(|| product_type.and_then(ProductType::shelf_life))?;
    Some(production_date + shelf_life.duration())
}
