use crate::entities::{order_entity as orders, order_item_entity as order_items};
use crate::error::{AppError, AppResult};
use crate::models::*;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

#[derive(Clone)]
pub struct OrderService {
    pool: DatabaseConnection,
}

impl OrderService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 所有订单及其明细（管理员）
    pub async fn list_orders(&self) -> AppResult<Vec<OrderResponse>> {
        let rows = orders::Entity::find()
            .order_by_asc(orders::Column::Id)
            .find_with_related(order_items::Entity)
            .all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(order, mut lines)| {
                lines.sort_by_key(|l| l.id);
                OrderResponse::new(order, lines)
            })
            .collect())
    }

    pub async fn get_order(&self, order_id: i32) -> AppResult<OrderResponse> {
        let order = orders::Entity::find_by_id(order_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order {order_id} not found")))?;
        let lines = order
            .find_related(order_items::Entity)
            .order_by_asc(order_items::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(OrderResponse::new(order, lines))
    }

    /// Deletes the order together with every line it owns, in one transaction.
    pub async fn delete_order(&self, order_id: i32) -> AppResult<()> {
        let txn = self.pool.begin().await?;

        let order = orders::Entity::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order {order_id} not found")))?;

        let removed_lines = order_items::Entity::delete_many()
            .filter(order_items::Column::OrderId.eq(order.id))
            .exec(&txn)
            .await?
            .rows_affected;
        orders::Entity::delete_by_id(order.id).exec(&txn).await?;

        txn.commit().await?;

        log::info!("Deleted order {} with {} line(s)", order.id, removed_lines);
        Ok(())
    }
}
