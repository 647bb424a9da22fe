use crate::entities::{order_entity, order_item_entity};
use crate::utils::format_cents;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderLineResponse {
    pub id: i32,
    pub item_name: String,
    pub quantity: i32,
    pub price_cents: i64,
    pub line_total_cents: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    pub user_email: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderLineResponse>,
    pub total_cents: i64,
    #[schema(example = "42000.00")]
    pub total: String,
}

impl From<order_item_entity::Model> for OrderLineResponse {
    fn from(m: order_item_entity::Model) -> Self {
        Self {
            line_total_cents: m.line_total_cents(),
            id: m.id,
            item_name: m.item_name,
            quantity: m.quantity,
            price_cents: m.price_cents,
        }
    }
}

impl OrderResponse {
    pub fn new(order: order_entity::Model, lines: Vec<order_item_entity::Model>) -> Self {
        let items: Vec<OrderLineResponse> = lines.into_iter().map(Into::into).collect();
        let total_cents = items
            .iter()
            .fold(0i64, |acc, l| acc.saturating_add(l.line_total_cents));
        Self {
            id: order.id,
            user_email: order.user_email,
            created_at: order.created_at,
            items,
            total_cents,
            total: format_cents(total_cents),
        }
    }
}
