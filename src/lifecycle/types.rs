//! Request and response types for lifecycle operations.
//!
//! These are the validated inputs the excluded API layer hands to the
//! engine. Request validation (shape, presence) happens out there; the
//! domain invariants are enforced here regardless.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use crate::models::{Container, ContainerType};

/// Input for creating a container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContainerRequest {
    /// Explicit code; when absent one is generated from the type prefix and
    /// the running count.
    pub code: Option<String>,
    pub name: String,
    pub volume: Decimal,
    pub unit: String,
    pub container_type_id: Uuid,
    pub metadata: Option<serde_json::Value>,
}

/// Input for opening a fill cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillRequest {
    pub container_id: Uuid,
    pub product_id: Uuid,
    pub quantity: Decimal,
    pub unit: String,
    pub production_date: DateTime<Utc>,
    /// Explicit expiration date; when absent it is derived from shelf-life
    /// policy.
    pub expiration_date: Option<DateTime<Utc>>,
}

/// Input for amending the open fill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateFillRequest {
    pub container_id: Uuid,
    /// Set to swap the product on the open fill.
    pub product_id: Option<Uuid>,
    pub quantity: Decimal,
    pub unit: String,
    pub production_date: DateTime<Utc>,
    pub expiration_date: Option<DateTime<Utc>>,
}

/// Input for updating container details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateContainerRequest {
    pub container_id: Uuid,
    pub name: String,
    pub volume: Decimal,
    pub unit: String,
    pub container_type_id: Uuid,
    pub metadata: Option<serde_json::Value>,
}

/// Input for creating a container type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContainerTypeRequest {
    pub name: String,
    pub code_prefix: Option<String>,
    pub default_unit: String,
    pub allowed_product_types: HashSet<Uuid>,
    pub metadata: Option<serde_json::Value>,
}

/// Input for updating a container type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateContainerTypeRequest {
    pub container_type_id: Uuid,
    pub name: String,
    pub code_prefix: Option<String>,
    pub default_unit: String,
    pub allowed_product_types: HashSet<Uuid>,
    pub metadata: Option<serde_json::Value>,
}

/// A freshly created container together with its loaded type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerWithType {
    pub container: Container,
    pub container_type: ContainerType,
}
