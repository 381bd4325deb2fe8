//! # Lifecycle Engine
//!
//! The orchestrating use-cases: Create, Fill, Empty and UpdateFill, plus
//! detail updates and container-type administration. Each operation is a
//! synchronous sequence of load, validate, mutate and commit against the
//! storage boundary; nothing is persisted until the final mutation batch,
//! so the fill ledger and the container state always land together.

use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::types::{
    ContainerWithType, CreateContainerRequest, CreateContainerTypeRequest, FillRequest,
    UpdateContainerRequest, UpdateContainerTypeRequest, UpdateFillRequest,
};
use super::{codes, compatibility, expiration};
use crate::config::VesselConfig;
use crate::error::{Result, VesselError};
use crate::events::{names, EventPublisher};
use crate::logging;
use crate::models::{
    Container, ContainerFill, ContainerType, FillAmendment, FillSpec, NewContainer,
    NewContainerFill, NewContainerType,
};
use crate::state_machine::InvariantViolation;
use crate::storage::{LifecycleStore, Mutation};

/// Orchestrates container lifecycle operations over a storage boundary.
pub struct LifecycleEngine {
    store: Arc<dyn LifecycleStore>,
    events: EventPublisher,
}

impl LifecycleEngine {
    /// Create an engine with a default event channel.
    pub fn new(store: Arc<dyn LifecycleStore>) -> Self {
        Self {
            store,
            events: EventPublisher::default(),
        }
    }

    /// Create an engine with an externally owned event publisher.
    pub fn with_events(store: Arc<dyn LifecycleStore>, events: EventPublisher) -> Self {
        Self { store, events }
    }

    /// Create an engine sized from configuration.
    pub fn from_config(store: Arc<dyn LifecycleStore>, config: &VesselConfig) -> Self {
        Self {
            store,
            events: EventPublisher::new(config.event_channel_capacity),
        }
    }

    /// Publisher handle for subscribing to lifecycle events.
    pub fn events(&self) -> &EventPublisher {
        &self.events
    }

    /// Create a container, generating a code when none is supplied.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_container(
        &self,
        request: CreateContainerRequest,
        actor: Uuid,
    ) -> Result<ContainerWithType> {
        let supplied_code = request
            .code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(String::from);

        if let Some(code) = &supplied_code {
            if self.store.container_by_code(code).await?.is_some() {
                warn!(code = %code, "Container code already taken");
                return Err(VesselError::AlreadyExists {
                    entity: "container",
                    identifier: code.clone(),
                });
            }
        }

        let container_type = self
            .store
            .container_type(request.container_type_id)
            .await?
            .ok_or(VesselError::NotFound {
                entity: "container type",
                id: request.container_type_id,
            })?;

        let code = match supplied_code {
            Some(code) => code,
            None => {
                let generated = self.generate_code(&container_type).await?;
                debug!(code = %generated, "Generated container code");
                generated
            }
        };

        let container = Container::new(
            NewContainer {
                code,
                name: request.name,
                volume: request.volume,
                unit: request.unit,
                container_type_id: container_type.id,
                metadata: request.metadata,
            },
            actor,
        )
        .map_err(translate)?;

        self.store
            .commit(vec![Mutation::PutContainer(container.clone())])
            .await?;

        logging::log_container_operation(
            "create",
            container.id,
            &container.code,
            &container.state.to_string(),
            None,
        );
        self.emit(
            names::CONTAINER_CREATED,
            json!({
                "container_id": container.id,
                "code": container.code,
                "container_type_id": container_type.id,
            }),
        )
        .await;

        Ok(ContainerWithType {
            container,
            container_type,
        })
    }

    /// Open a fill cycle: guards, compatibility, expiration resolution, a new
    /// ledger row and the state transition, committed as one batch.
    #[instrument(skip(self, request), fields(container_id = %request.container_id))]
    pub async fn fill_container(&self, request: FillRequest, actor: Uuid) -> Result<Container> {
        let mut container = self.load_container(request.container_id).await?;

        // Fail fast before loading anything else.
        if request.quantity > container.volume {
            return Err(VesselError::Overfill {
                requested: request.quantity,
                volume: container.volume,
            });
        }
        crate::state_machine::ensure_unit_match(&container.unit, &request.unit)
            .map_err(translate)?;

        let product = self
            .store
            .product(request.product_id)
            .await?
            .ok_or(VesselError::NotFound {
                entity: "product",
                id: request.product_id,
            })?;

        let container_type = self
            .store
            .container_type(container.container_type_id)
            .await?
            .ok_or_else(|| {
                VesselError::Unhandled(format!(
                    "container {} references missing container type {}",
                    container.id, container.container_type_id
                ))
            })?;

        if !compatibility::product_allowed(&container_type, &product) {
            warn!(
                product_id = %product.id,
                product_type_id = %product.product_type_id,
                container_type = %container_type.name,
                "Product type not in allow-list"
            );
            return Err(VesselError::IncompatibleProduct {
                product_type_id: product.product_type_id,
            });
        }

        let product_type = self.store.product_type(product.product_type_id).await?;
        let expiration_date = expiration::resolve(
            request.expiration_date,
            request.production_date,
            &product,
            product_type.as_ref(),
        );

        let fill = ContainerFill::new(
            NewContainerFill {
                container_id: container.id,
                product_id: product.id,
                quantity: request.quantity,
                unit: request.unit.clone(),
                production_date: request.production_date,
                expiration_date,
            },
            actor,
        )
        .map_err(translate)?;

        container
            .fill(
                FillSpec {
                    fill_id: fill.id,
                    product_id: product.id,
                    product_type_id: product.product_type_id,
                    quantity: request.quantity,
                    unit: request.unit,
                    production_date: request.production_date,
                    expiration_date,
                },
                actor,
            )
            .map_err(translate)?;

        // Ledger row and state transition land together or not at all.
        self.store
            .commit(vec![
                Mutation::PutFill(fill.clone()),
                Mutation::PutContainer(container.clone()),
            ])
            .await?;

        info!(
            fill_id = %fill.id,
            product_id = %product.id,
            quantity = %fill.quantity,
            "Container filled"
        );
        self.emit(
            names::CONTAINER_FILLED,
            json!({
                "container_id": container.id,
                "fill_id": fill.id,
                "product_id": product.id,
                "expiration_date": expiration_date,
            }),
        )
        .await;

        Ok(container)
    }

    /// Close the current fill cycle.
    #[instrument(skip(self))]
    pub async fn empty_container(&self, container_id: Uuid, actor: Uuid) -> Result<Container> {
        let mut container = self.load_container(container_id).await?;
        let fill_id = container.current_fill_id().ok_or(VesselError::NotFull)?;

        let mut fill = self
            .store
            .fill(fill_id)
            .await?
            .ok_or(VesselError::NotFull)?;

        fill.close(actor).map_err(translate)?;
        container.empty_out(actor).map_err(translate)?;

        self.store
            .commit(vec![
                Mutation::PutFill(fill.clone()),
                Mutation::PutContainer(container.clone()),
            ])
            .await?;

        info!(fill_id = %fill.id, "Container emptied");
        self.emit(
            names::CONTAINER_EMPTIED,
            json!({
                "container_id": container.id,
                "fill_id": fill.id,
                "product_id": fill.product_id,
            }),
        )
        .await;

        Ok(container)
    }

    /// Amend the open fill, keeping the ledger row and the container snapshot
    /// in lockstep.
    #[instrument(skip(self, request), fields(container_id = %request.container_id))]
    pub async fn update_fill(&self, request: UpdateFillRequest, actor: Uuid) -> Result<Container> {
        let mut container = self.load_container(request.container_id).await?;

        // Checked before the fill is even loaded.
        if request.quantity > container.volume {
            return Err(VesselError::Overfill {
                requested: request.quantity,
                volume: container.volume,
            });
        }

        let fill_id = container.current_fill_id().ok_or(VesselError::NotFull)?;
        let mut fill = self.store.fill(fill_id).await?.ok_or_else(|| {
            // The pointer names a row the ledger does not have. Correct
            // operation never produces this.
            VesselError::Unhandled(format!(
                "container {} points at missing fill {}",
                container.id, fill_id
            ))
        })?;

        let product_swap = match request.product_id {
            Some(product_id) if product_id != fill.product_id => {
                let product =
                    self.store
                        .product(product_id)
                        .await?
                        .ok_or(VesselError::NotFound {
                            entity: "product",
                            id: product_id,
                        })?;
                Some((product.id, product.product_type_id))
            }
            _ => None,
        };

        fill.update_details(
            product_swap.map(|(product_id, _)| product_id),
            request.quantity,
            &request.unit,
            request.production_date,
            request.expiration_date,
        )
        .map_err(translate)?;

        container
            .update_current_fill(
                FillAmendment {
                    product_id: product_swap.map(|(product_id, _)| product_id),
                    product_type_id: product_swap.map(|(_, product_type_id)| product_type_id),
                    quantity: request.quantity,
                    unit: request.unit,
                    production_date: request.production_date,
                    expiration_date: request.expiration_date,
                },
                actor,
            )
            .map_err(translate)?;

        self.store
            .commit(vec![
                Mutation::PutFill(fill.clone()),
                Mutation::PutContainer(container.clone()),
            ])
            .await?;

        info!(fill_id = %fill.id, quantity = %fill.quantity, "Fill updated");
        self.emit(
            names::CONTAINER_FILL_UPDATED,
            json!({
                "container_id": container.id,
                "fill_id": fill.id,
                "quantity": fill.quantity,
            }),
        )
        .await;

        Ok(container)
    }

    /// Update container details. The target type must resolve.
    #[instrument(skip(self, request), fields(container_id = %request.container_id))]
    pub async fn update_container(
        &self,
        request: UpdateContainerRequest,
        actor: Uuid,
    ) -> Result<Container> {
        let mut container = self.load_container(request.container_id).await?;

        self.store
            .container_type(request.container_type_id)
            .await?
            .ok_or(VesselError::NotFound {
                entity: "container type",
                id: request.container_type_id,
            })?;

        container
            .update_details(
                &request.name,
                request.volume,
                &request.unit,
                request.container_type_id,
                request.metadata,
                actor,
            )
            .map_err(translate)?;

        self.store
            .commit(vec![Mutation::PutContainer(container.clone())])
            .await?;

        self.emit(
            names::CONTAINER_UPDATED,
            json!({ "container_id": container.id }),
        )
        .await;

        Ok(container)
    }

    /// Fill ledger for a container, newest-first.
    #[instrument(skip(self))]
    pub async fn fill_history(&self, container_id: Uuid) -> Result<Vec<ContainerFill>> {
        self.load_container(container_id).await?;
        Ok(self.store.fill_history(container_id).await?)
    }

    /// Create a container type.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_container_type(
        &self,
        request: CreateContainerTypeRequest,
        actor: Uuid,
    ) -> Result<ContainerType> {
        if let Some(existing) = self.store.container_type_by_name(&request.name).await? {
            return Err(VesselError::AlreadyExists {
                entity: "container type",
                identifier: existing.name,
            });
        }

        let container_type = ContainerType::new(
            NewContainerType {
                name: request.name,
                code_prefix: request.code_prefix,
                default_unit: request.default_unit,
                allowed_product_types: request.allowed_product_types,
                metadata: request.metadata,
            },
            actor,
        )
        .map_err(translate)?;

        self.store
            .commit(vec![Mutation::PutContainerType(container_type.clone())])
            .await?;

        self.emit(
            names::CONTAINER_TYPE_CREATED,
            json!({ "container_type_id": container_type.id, "name": container_type.name }),
        )
        .await;

        Ok(container_type)
    }

    /// Update a container type.
    #[instrument(skip(self, request), fields(container_type_id = %request.container_type_id))]
    pub async fn update_container_type(
        &self,
        request: UpdateContainerTypeRequest,
        actor: Uuid,
    ) -> Result<ContainerType> {
        let mut container_type = self
            .store
            .container_type(request.container_type_id)
            .await?
            .ok_or(VesselError::NotFound {
                entity: "container type",
                id: request.container_type_id,
            })?;

        if let Some(existing) = self.store.container_type_by_name(&request.name).await? {
            if existing.id != container_type.id {
                return Err(VesselError::AlreadyExists {
                    entity: "container type",
                    identifier: existing.name,
                });
            }
        }

        container_type
            .update_details(
                &request.name,
                request.code_prefix,
                &request.default_unit,
                request.allowed_product_types,
                request.metadata,
                actor,
            )
            .map_err(translate)?;

        self.store
            .commit(vec![Mutation::PutContainerType(container_type.clone())])
            .await?;

        self.emit(
            names::CONTAINER_TYPE_UPDATED,
            json!({ "container_type_id": container_type.id }),
        )
        .await;

        Ok(container_type)
    }

    /// Soft-delete a container type. Blocked while any container references
    /// it.
    #[instrument(skip(self))]
    pub async fn delete_container_type(&self, container_type_id: Uuid, actor: Uuid) -> Result<()> {
        let mut container_type = self
            .store
            .container_type(container_type_id)
            .await?
            .ok_or(VesselError::NotFound {
                entity: "container type",
                id: container_type_id,
            })?;

        let in_use = self.store.count_containers_of_type(container_type_id).await?;
        if in_use > 0 {
            return Err(VesselError::CannotDelete {
                entity: "container type",
                reason: format!("{in_use} containers still reference it"),
            });
        }

        container_type.mark_deleted(actor);
        self.store
            .commit(vec![Mutation::PutContainerType(container_type.clone())])
            .await?;

        self.emit(
            names::CONTAINER_TYPE_DELETED,
            json!({ "container_type_id": container_type.id }),
        )
        .await;

        Ok(())
    }

    async fn load_container(&self, id: Uuid) -> Result<Container> {
        self.store
            .container(id)
            .await?
            .ok_or(VesselError::NotFound {
                entity: "container",
                id,
            })
    }

    async fn generate_code(&self, container_type: &ContainerType) -> Result<String> {
        let prefix = codes::derive_prefix(container_type);
        let existing = self.store.count_containers_of_type(container_type.id).await?;
        let code = codes::format_code(&prefix, existing + 1);

        // A generated code competes with explicit codes too.
        if self.store.container_by_code(&code).await?.is_some() {
            return Err(VesselError::AlreadyExists {
                entity: "container",
                identifier: code,
            });
        }
        Ok(code)
    }

    async fn emit(&self, name: &'static str, context: serde_json::Value) {
        if let Err(error) = self.events.publish(name, context).await {
            debug!(event = name, error = %error, "Event publish failed");
        }
    }
}

/// Translate a local invariant violation into the public error kind.
///
/// Closed-fill violations surface as `Unhandled`: the engine only touches a
/// fill the container points at, so hitting one means the ledger and the
/// container disagree.
fn translate(violation: InvariantViolation) -> VesselError {
    match violation {
        InvariantViolation::NotEmpty => VesselError::NotEmpty,
        InvariantViolation::NotFull => VesselError::NotFull,
        InvariantViolation::ExceedsVolume { requested, volume } => VesselError::Overfill {
            requested,
            volume,
        },
        InvariantViolation::UnitMismatch { expected, actual } => VesselError::UnitMismatch {
            container_unit: expected,
            fill_unit: actual,
        },
        InvariantViolation::InvalidValue(message) => VesselError::Validation(message),
        InvariantViolation::AlreadyClosed => {
            VesselError::Unhandled("current fill is already closed in the ledger".to_string())
        }
        InvariantViolation::ClosedFillImmutable => {
            VesselError::Unhandled("current fill is closed in the ledger".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_covers_state_guards() {
        assert_eq!(translate(InvariantViolation::NotEmpty), VesselError::NotEmpty);
        assert_eq!(translate(InvariantViolation::NotFull), VesselError::NotFull);
        assert_eq!(
            translate(InvariantViolation::InvalidValue("bad".to_string())).kind(),
            "validation"
        );
        assert_eq!(translate(InvariantViolation::AlreadyClosed).kind(), "unhandled");
    }
}
