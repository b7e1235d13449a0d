use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product or consumable kept in stock
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub quantity: i32,
    /// Restock threshold
    pub min_quantity: i32,
    pub unit_price: f64,
    pub supplier: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn needs_restock(&self) -> bool {
        self.quantity <= self.min_quantity
    }
}
