use crate::entities::item_entity;
use crate::utils::format_cents;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    /// Decimal rendering of `price_cents`
    #[schema(example = "25000.00")]
    pub price: String,
}

/// Body of the admin create / update item calls.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ItemRequest {
    #[schema(example = "Gibson - 1957 Les Paul")]
    #[serde(default)]
    pub name: String,
    #[schema(example = "Electric guitar")]
    #[serde(default)]
    pub description: String,
    #[schema(example = 25000.0)]
    pub price: f64,
}

impl From<item_entity::Model> for ItemResponse {
    fn from(m: item_entity::Model) -> Self {
        Self {
            id: m.id,
            price: format_cents(m.price_cents),
            name: m.name,
            description: m.description,
            price_cents: m.price_cents,
        }
    }
}
