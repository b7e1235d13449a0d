use crate::auth::rbac::Resource;
use crate::storage::database::entities::{self, inventory_item};
use crate::storage::repository::{RecordFilter, SalonRecord};
use crate::utils::error::{GlowError, Result};
use crate::utils::validation::require;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, Condition, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{clean, non_negative};

/// Status filter value selecting items at or below their restock threshold
pub const LOW_STOCK: &str = "low";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItemInput {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub min_quantity: i32,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub supplier: Option<String>,
}

impl SalonRecord for inventory_item::Model {
    type Entity = entities::InventoryItem;
    type Active = inventory_item::ActiveModel;
    type Input = InventoryItemInput;

    const RESOURCE: Resource = Resource::Inventory;
    const NAME: &'static str = "inventory item";

    fn id(&self) -> Uuid {
        self.id
    }

    fn id_column() -> inventory_item::Column {
        inventory_item::Column::Id
    }

    fn sort_column() -> inventory_item::Column {
        inventory_item::Column::Name
    }

    fn validate(input: &InventoryItemInput) -> Result<()> {
        require("name", &input.name)?;
        if input.quantity < 0 || input.min_quantity < 0 {
            return Err(GlowError::validation("quantities cannot be negative"));
        }
        non_negative("unit price", input.unit_price)
    }

    fn new_active(
        input: InventoryItemInput,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> inventory_item::ActiveModel {
        inventory_item::ActiveModel {
            id: Set(id),
            name: Set(input.name.trim().to_string()),
            category: Set(clean(input.category)),
            quantity: Set(input.quantity),
            min_quantity: Set(input.min_quantity),
            unit_price: Set(input.unit_price),
            supplier: Set(clean(input.supplier)),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    fn apply(active: &mut inventory_item::ActiveModel, input: InventoryItemInput, now: DateTime<Utc>) {
        active.name = Set(input.name.trim().to_string());
        active.category = Set(clean(input.category));
        active.quantity = Set(input.quantity);
        active.min_quantity = Set(input.min_quantity);
        active.unit_price = Set(input.unit_price);
        active.supplier = Set(clean(input.supplier));
        active.updated_at = Set(now);
    }

    fn condition(filter: &RecordFilter) -> Condition {
        use inventory_item::Column;
        let status = match filter.status.as_deref() {
            None => Condition::all(),
            Some(LOW_STOCK) => {
                Condition::all().add(Expr::col(Column::Quantity).lte(Expr::col(Column::MinQuantity)))
            }
            Some(category) => Condition::all().add(Column::Category.eq(category)),
        };
        status.add(filter.text_condition(&[Column::Name, Column::Category, Column::Supplier]))
    }
}
