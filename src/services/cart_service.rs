use crate::entities::{item_entity as items, order_entity as orders, order_item_entity as order_items};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::catalog_service::find_items_by_ids;
use crate::utils::format_cents;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, Set,
    TransactionTrait,
};
use std::collections::HashMap;

#[derive(Clone)]
pub struct CartService {
    pool: DatabaseConnection,
}

impl CartService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 加入购物车
    ///
    /// The cart is only modified once the item is known to exist and the
    /// quantity is valid. Returns the item that was added.
    pub async fn add_to_cart(
        &self,
        cart: &mut Cart,
        item_id: i32,
        quantity: i32,
    ) -> AppResult<ItemResponse> {
        let item = self.find_cartable_item(item_id, quantity).await?;
        cart.add(item.id, quantity)?;
        Ok(item)
    }

    /// The item a shopper may add `quantity` of; the cart itself is not
    /// touched.
    pub async fn find_cartable_item(&self, item_id: i32, quantity: i32) -> AppResult<ItemResponse> {
        if quantity < 1 {
            return Err(AppError::ValidationError(
                "Quantity must be at least 1".to_string(),
            ));
        }

        let item = items::Entity::find_by_id(item_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::ValidationError(format!("Item {item_id} does not exist")))?;
        Ok(item.into())
    }

    pub async fn view_cart(&self, cart: &Cart) -> AppResult<CartView> {
        let lines = resolve_cart(&self.pool, cart).await?;
        cart_view(lines)
    }

    /// 结算
    ///
    /// Empty resolved cart: nothing is written and `None` is returned.
    /// Otherwise the order and all of its lines are inserted in a single
    /// transaction and the cart is cleared after the commit. On any failure
    /// the transaction is rolled back and the cart is left as it was.
    pub async fn checkout(
        &self,
        identity: &Identity,
        cart: &mut Cart,
    ) -> AppResult<Option<OrderResponse>> {
        let txn = self.pool.begin().await?;

        let placed = match place_order(&txn, identity, cart).await {
            Ok(placed) => placed,
            Err(e) => {
                txn.rollback().await?;
                return Err(e);
            }
        };
        let Some((order, lines)) = placed else {
            txn.rollback().await?;
            return Ok(None);
        };

        txn.commit().await?;
        cart.clear();

        log::info!(
            "Order {} placed by {} with {} line(s)",
            order.id,
            identity.email,
            lines.len()
        );

        Ok(Some(OrderResponse::new(order, lines)))
    }
}

/// Writes the order for the resolved cart inside `txn`. `None` when nothing
/// in the cart resolves.
async fn place_order(
    txn: &DatabaseTransaction,
    identity: &Identity,
    cart: &Cart,
) -> AppResult<Option<(orders::Model, Vec<order_items::Model>)>> {
    // 在事务内解析购物车，保证快照与写入一致
    let lines = resolve_cart(txn, cart).await?;
    if lines.is_empty() {
        return Ok(None);
    }
    cart_total(&lines)?;

    let order = orders::ActiveModel {
        user_email: Set(identity.email.clone()),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    let mut saved_lines = Vec::with_capacity(lines.len());
    for line in &lines {
        let saved = order_items::ActiveModel {
            order_id: Set(order.id),
            item_name: Set(line.name.clone()),
            quantity: Set(line.quantity),
            price_cents: Set(line.price_cents),
            ..Default::default()
        }
        .insert(txn)
        .await?;
        saved_lines.push(saved);
    }

    Ok(Some((order, saved_lines)))
}

/// Resolves cart keys against the catalog, silently dropping ids whose item
/// no longer exists. Lines keep the cart's item id order.
async fn resolve_cart<C: ConnectionTrait>(conn: &C, cart: &Cart) -> AppResult<Vec<CartLine>> {
    let catalog: HashMap<i32, items::Model> = find_items_by_ids(conn, cart.item_ids())
        .await?
        .into_iter()
        .map(|item| (item.id, item))
        .collect();

    cart.entries()
        .filter_map(|(item_id, quantity)| catalog.get(&item_id).map(|item| (item, quantity)))
        .map(|(item, quantity)| -> AppResult<CartLine> {
            let line_total_cents = item
                .price_cents
                .checked_mul(i64::from(quantity))
                .ok_or_else(too_large)?;
            Ok(CartLine {
                item_id: item.id,
                name: item.name.clone(),
                price_cents: item.price_cents,
                quantity,
                line_total_cents,
            })
        })
        .collect()
}

fn too_large() -> AppError {
    AppError::ValidationError("Cart total is too large".to_string())
}

fn cart_total(lines: &[CartLine]) -> AppResult<i64> {
    lines
        .iter()
        .try_fold(0i64, |acc, l| acc.checked_add(l.line_total_cents))
        .ok_or_else(too_large)
}

fn cart_view(lines: Vec<CartLine>) -> AppResult<CartView> {
    let total_cents = cart_total(&lines)?;
    Ok(CartView {
        items: lines,
        total_cents,
        total: format_cents(total_cents),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_view_totals() {
        let view = cart_view(vec![
            CartLine {
                item_id: 1,
                name: "Guitar".to_string(),
                price_cents: 2_500_000,
                quantity: 2,
                line_total_cents: 5_000_000,
            },
            CartLine {
                item_id: 2,
                name: "Drums".to_string(),
                price_cents: 1_700_000,
                quantity: 1,
                line_total_cents: 1_700_000,
            },
        ])
        .unwrap();
        assert_eq!(view.total_cents, 6_700_000);
        assert_eq!(view.total, "67000.00");
    }

    #[test]
    fn test_overflowing_total_is_rejected() {
        let line = |item_id| CartLine {
            item_id,
            name: "Pipe organ".to_string(),
            price_cents: 9_000_000_000_000_000_000,
            quantity: 1,
            line_total_cents: 9_000_000_000_000_000_000,
        };
        let result = cart_view(vec![line(1), line(2)]);
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_empty_cart_view() {
        let view = cart_view(Vec::new()).unwrap();
        assert!(view.items.is_empty());
        assert_eq!(view.total_cents, 0);
    }
}
