//! Shared factories for integration tests.

#![allow(dead_code)]

use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use vessel_core::lifecycle::{CreateContainerRequest, CreateContainerTypeRequest, LifecycleEngine};
use vessel_core::models::{Container, ContainerType, Product, ProductType};
use vessel_core::storage::InMemoryStore;

/// Engine wired to a fresh in-memory store, plus an acting user.
pub struct TestHarness {
    pub store: Arc<InMemoryStore>,
    pub engine: LifecycleEngine,
    pub actor: Uuid,
}

pub fn harness() -> TestHarness {
    let store = Arc::new(InMemoryStore::new());
    let engine = LifecycleEngine::new(store.clone());
    TestHarness {
        store,
        engine,
        actor: Uuid::new_v4(),
    }
}

impl TestHarness {
    pub async fn container_type(&self, name: &str, prefix: Option<&str>) -> ContainerType {
        self.container_type_allowing(name, prefix, HashSet::new())
            .await
    }

    pub async fn container_type_allowing(
        &self,
        name: &str,
        prefix: Option<&str>,
        allowed_product_types: HashSet<Uuid>,
    ) -> ContainerType {
        self.engine
            .create_container_type(
                CreateContainerTypeRequest {
                    name: name.to_string(),
                    code_prefix: prefix.map(String::from),
                    default_unit: "l".to_string(),
                    allowed_product_types,
                    metadata: None,
                },
                self.actor,
            )
            .await
            .expect("container type factory")
    }

    /// Seed a product type and one product of it, with the given
    /// (days, hours) shelf-life fields.
    pub fn seed_catalog(
        &self,
        type_shelf_life: (Option<i32>, Option<i32>),
        product_shelf_life: (Option<i32>, Option<i32>),
    ) -> Product {
        let product_type = ProductType {
            id: Uuid::new_v4(),
            name: "Dairy".to_string(),
            shelf_life_days: type_shelf_life.0,
            shelf_life_hours: type_shelf_life.1,
        };
        let product = Product {
            id: Uuid::new_v4(),
            name: "Milk".to_string(),
            product_type_id: product_type.id,
            shelf_life_days: product_shelf_life.0,
            shelf_life_hours: product_shelf_life.1,
        };
        self.store.seed_product_type(product_type);
        self.store.seed_product(product.clone());
        product
    }

    pub async fn container(
        &self,
        container_type: &ContainerType,
        volume: Decimal,
        unit: &str,
    ) -> Container {
        self.engine
            .create_container(
                CreateContainerRequest {
                    code: None,
                    name: format!("{} container", container_type.name),
                    volume,
                    unit: unit.to_string(),
                    container_type_id: container_type.id,
                    metadata: None,
                },
                self.actor,
            )
            .await
            .expect("container factory")
            .container
    }
}
