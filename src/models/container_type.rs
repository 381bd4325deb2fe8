//! # Container Type Model
//!
//! A category of containers sharing a default unit, a code-prefix convention
//! and an allow-list of product types. Types are soft-deleted; the storage
//! boundary filters flagged rows out of reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use super::container::required_text;
use crate::state_machine::{InvariantViolation, TransitionResult};

/// Name length cap, matching the storage column.
pub const MAX_NAME_LEN: usize = 100;

/// New ContainerType for creation.
#[derive(Debug, Clone)]
pub struct NewContainerType {
    pub name: String,
    pub code_prefix: Option<String>,
    pub default_unit: String,
    pub allowed_product_types: HashSet<Uuid>,
    pub metadata: Option<serde_json::Value>,
}

/// A category of containers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerType {
    pub id: Uuid,
    /// Unique name, case-insensitive, at most [`MAX_NAME_LEN`] characters.
    pub name: String,
    /// Prefix used when generating container codes. Absent means the prefix
    /// is derived from the name.
    pub code_prefix: Option<String>,
    pub default_unit: String,
    /// Product types allowed into containers of this type. Empty means
    /// unrestricted.
    pub allowed_product_types: HashSet<Uuid>,
    pub metadata: Option<serde_json::Value>,
    /// Soft-delete flag, applied as a query-time filter by the store.
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Uuid,
}

impl ContainerType {
    /// Create a new container type.
    ///
    /// # Errors
    ///
    /// Rejects a blank name or unit, a name over [`MAX_NAME_LEN`] characters,
    /// and a supplied-but-blank code prefix.
    pub fn new(new: NewContainerType, actor: Uuid) -> TransitionResult<Self> {
        let name = validated_name(&new.name)?;
        let default_unit = required_text(&new.default_unit, "default unit")?;
        let code_prefix = validated_prefix(new.code_prefix)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            code_prefix,
            default_unit,
            allowed_product_types: new.allowed_product_types,
            metadata: new.metadata,
            deleted: false,
            created_at: now,
            created_by: actor,
            updated_at: now,
            updated_by: actor,
        })
    }

    /// Replace name, prefix, unit, metadata and allow-list.
    pub fn update_details(
        &mut self,
        name: &str,
        code_prefix: Option<String>,
        default_unit: &str,
        allowed_product_types: HashSet<Uuid>,
        metadata: Option<serde_json::Value>,
        actor: Uuid,
    ) -> TransitionResult<()> {
        self.name = validated_name(name)?;
        self.code_prefix = validated_prefix(code_prefix)?;
        self.default_unit = required_text(default_unit, "default unit")?;
        self.allowed_product_types = allowed_product_types;
        self.metadata = metadata;
        self.touch(actor);
        Ok(())
    }

    /// Set the soft-delete flag. The engine only calls this once no container
    /// references the type.
    pub fn mark_deleted(&mut self, actor: Uuid) {
        self.deleted = true;
        self.touch(actor);
    }

    fn touch(&mut self, actor: Uuid) {
        self.updated_at = Utc::now();
        self.updated_by = actor;
    }
}

fn validated_name(name: &str) -> TransitionResult<String> {
    let name = required_text(name, "container type name")?;
    if name.chars().count() > MAX_NAME_LEN {
        return Err(InvariantViolation::InvalidValue(format!(
            "container type name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(name)
}

fn validated_prefix(prefix: Option<String>) -> TransitionResult<Option<String>> {
    match prefix {
        Some(prefix) => Ok(Some(required_text(&prefix, "code prefix")?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_type(name: &str, prefix: Option<&str>) -> NewContainerType {
        NewContainerType {
            name: name.to_string(),
            code_prefix: prefix.map(String::from),
            default_unit: "l".to_string(),
            allowed_product_types: HashSet::new(),
            metadata: None,
        }
    }

    #[test]
    fn test_factory_validation() {
        let actor = Uuid::new_v4();
        assert!(ContainerType::new(new_type("Tank", None), actor).is_ok());
        assert!(ContainerType::new(new_type("Tank", Some("TNK")), actor).is_ok());

        assert!(ContainerType::new(new_type("  ", None), actor).is_err());
        assert!(ContainerType::new(new_type("Tank", Some("  ")), actor).is_err());

        let long_name = "x".repeat(MAX_NAME_LEN + 1);
        assert!(ContainerType::new(new_type(&long_name, None), actor).is_err());
    }

    #[test]
    fn test_update_replaces_allow_list() {
        let actor = Uuid::new_v4();
        let mut container_type = ContainerType::new(new_type("Keg", None), actor).unwrap();

        let allowed: HashSet<Uuid> = [Uuid::new_v4()].into_iter().collect();
        container_type
            .update_details("Steel Keg", Some("KEG".to_string()), "l", allowed.clone(), None, actor)
            .unwrap();

        assert_eq!(container_type.name, "Steel Keg");
        assert_eq!(container_type.code_prefix.as_deref(), Some("KEG"));
        assert_eq!(container_type.allowed_product_types, allowed);
    }

    #[test]
    fn test_mark_deleted_sets_flag() {
        let actor = Uuid::new_v4();
        let mut container_type = ContainerType::new(new_type("Silo", None), actor).unwrap();
        assert!(!container_type.deleted);

        container_type.mark_deleted(actor);
        assert!(container_type.deleted);
    }
}
