//! Product/container-type compatibility.

use crate::models::{ContainerType, Product};

/// Check a product against a container type's allow-list. An empty allow-list
/// means the type is unrestricted.
pub fn product_allowed(container_type: &ContainerType, product: &Product) -> bool {
    container_type.allowed_product_types.is_empty()
        || container_type
            .allowed_product_types
            .contains(&product.product_type_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewContainerType, ProductType};
    use std::collections::HashSet;
    use uuid::Uuid;

    fn product_of_type(product_type: &ProductType) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Lager".to_string(),
            product_type_id: product_type.id,
            shelf_life_days: None,
            shelf_life_hours: None,
        }
    }

    fn type_allowing(allowed: HashSet<Uuid>) -> ContainerType {
        ContainerType::new(
            NewContainerType {
                name: "Keg".to_string(),
                code_prefix: None,
                default_unit: "l".to_string(),
                allowed_product_types: allowed,
                metadata: None,
            },
            Uuid::new_v4(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_allow_list_is_unrestricted() {
        let beer = ProductType {
            id: Uuid::new_v4(),
            name: "Beer".to_string(),
            shelf_life_days: None,
            shelf_life_hours: None,
        };
        assert!(product_allowed(&type_allowing(HashSet::new()), &product_of_type(&beer)));
    }

    #[test]
    fn test_allow_list_membership() {
        let beer = ProductType {
            id: Uuid::new_v4(),
            name: "Beer".to_string(),
            shelf_life_days: None,
            shelf_life_hours: None,
        };
        let wine = ProductType {
            id: Uuid::new_v4(),
            name: "Wine".to_string(),
            shelf_life_days: None,
            shelf_life_hours: None,
        };

        let only_beer = type_allowing([beer.id].into_iter().collect());
        assert!(product_allowed(&only_beer, &product_of_type(&beer)));
        assert!(!product_allowed(&only_beer, &product_of_type(&wine)));
    }
}
