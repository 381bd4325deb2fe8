//! In-memory reference store.
//!
//! Backs the test suite and doubles as the executable specification of the
//! storage contract. One `RwLock` guards all tables, so a commit batch is
//! applied under a single write lock and readers never observe a half-applied
//! operation.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use super::{LifecycleStore, Mutation, StorageResult};
use crate::models::{Container, ContainerFill, ContainerType, Product, ProductType};

#[derive(Debug, Default)]
struct Tables {
    containers: HashMap<Uuid, Container>,
    container_types: HashMap<Uuid, ContainerType>,
    fills: HashMap<Uuid, ContainerFill>,
    products: HashMap<Uuid, Product>,
    product_types: HashMap<Uuid, ProductType>,
}

/// Lock-guarded hash-map store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a catalog product. The engine treats the catalog as read-only,
    /// so seeding bypasses the mutation batch.
    pub fn seed_product(&self, product: Product) {
        self.tables.write().products.insert(product.id, product);
    }

    /// Seed a catalog product type.
    pub fn seed_product_type(&self, product_type: ProductType) {
        self.tables
            .write()
            .product_types
            .insert(product_type.id, product_type);
    }
}

#[async_trait]
impl LifecycleStore for InMemoryStore {
    async fn container(&self, id: Uuid) -> StorageResult<Option<Container>> {
        Ok(self.tables.read().containers.get(&id).cloned())
    }

    async fn container_by_code(&self, code: &str) -> StorageResult<Option<Container>> {
        let needle = code.trim().to_lowercase();
        Ok(self
            .tables
            .read()
            .containers
            .values()
            .find(|container| container.code.to_lowercase() == needle)
            .cloned())
    }

    async fn container_type(&self, id: Uuid) -> StorageResult<Option<ContainerType>> {
        Ok(self
            .tables
            .read()
            .container_types
            .get(&id)
            .filter(|container_type| !container_type.deleted)
            .cloned())
    }

    async fn container_type_by_name(&self, name: &str) -> StorageResult<Option<ContainerType>> {
        let needle = name.trim().to_lowercase();
        Ok(self
            .tables
            .read()
            .container_types
            .values()
            .filter(|container_type| !container_type.deleted)
            .find(|container_type| container_type.name.to_lowercase() == needle)
            .cloned())
    }

    async fn product(&self, id: Uuid) -> StorageResult<Option<Product>> {
        Ok(self.tables.read().products.get(&id).cloned())
    }

    async fn product_type(&self, id: Uuid) -> StorageResult<Option<ProductType>> {
        Ok(self.tables.read().product_types.get(&id).cloned())
    }

    async fn fill(&self, id: Uuid) -> StorageResult<Option<ContainerFill>> {
        Ok(self.tables.read().fills.get(&id).cloned())
    }

    async fn fill_history(&self, container_id: Uuid) -> StorageResult<Vec<ContainerFill>> {
        let mut history: Vec<ContainerFill> = self
            .tables
            .read()
            .fills
            .values()
            .filter(|fill| fill.container_id == container_id)
            .cloned()
            .collect();
        history.sort_by(|a, b| b.filled_date.cmp(&a.filled_date));
        Ok(history)
    }

    async fn count_containers_of_type(&self, container_type_id: Uuid) -> StorageResult<u64> {
        Ok(self
            .tables
            .read()
            .containers
            .values()
            .filter(|container| container.container_type_id == container_type_id)
            .count() as u64)
    }

    async fn commit(&self, mutations: Vec<Mutation>) -> StorageResult<()> {
        let mut tables = self.tables.write();
        for mutation in mutations {
            match mutation {
                Mutation::PutContainer(container) => {
                    tables.containers.insert(container.id, container);
                }
                Mutation::PutContainerType(container_type) => {
                    tables.container_types.insert(container_type.id, container_type);
                }
                Mutation::PutFill(fill) => {
                    tables.fills.insert(fill.id, fill);
                }
            }
        }
        Ok(())
    }
}
