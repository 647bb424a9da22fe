use crate::entities::item_entity as items;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::price_to_cents;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set,
};

#[derive(Clone)]
pub struct CatalogService {
    pool: DatabaseConnection,
}

impl CatalogService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list_items(&self) -> AppResult<Vec<ItemResponse>> {
        let list = items::Entity::find()
            .order_by_asc(items::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn get_item(&self, item_id: i32) -> AppResult<ItemResponse> {
        Ok(self.find_item(item_id).await?.into())
    }

    pub async fn create_item(&self, request: ItemRequest) -> AppResult<ItemResponse> {
        let (name, description, price_cents) = validate_item(request)?;

        let item = items::ActiveModel {
            name: Set(name),
            description: Set(description),
            price_cents: Set(price_cents),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Created item {} ({})", item.id, item.name);
        Ok(item.into())
    }

    pub async fn update_item(&self, item_id: i32, request: ItemRequest) -> AppResult<ItemResponse> {
        let mut model = self.find_item(item_id).await?.into_active_model();
        let (name, description, price_cents) = validate_item(request)?;

        model.name = Set(name);
        model.description = Set(description);
        model.price_cents = Set(price_cents);
        let updated = model.update(&self.pool).await?;

        log::info!("Updated item {}", updated.id);
        Ok(updated.into())
    }

    pub async fn delete_item(&self, item_id: i32) -> AppResult<()> {
        let item = self.find_item(item_id).await?;
        items::Entity::delete_by_id(item.id).exec(&self.pool).await?;

        log::info!("Deleted item {}", item.id);
        Ok(())
    }

    async fn find_item(&self, item_id: i32) -> AppResult<items::Model> {
        items::Entity::find_by_id(item_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item {item_id} not found")))
    }
}

/// Loads the catalog rows for `ids`; unknown ids are simply absent.
pub(crate) async fn find_items_by_ids<C: ConnectionTrait>(
    conn: &C,
    ids: Vec<i32>,
) -> AppResult<Vec<items::Model>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let list = items::Entity::find()
        .filter(items::Column::Id.is_in(ids))
        .all(conn)
        .await?;
    Ok(list)
}

fn validate_item(request: ItemRequest) -> AppResult<(String, String, i64)> {
    let name = request.name.trim().to_string();
    let description = request.description.trim().to_string();
    if name.is_empty() || description.is_empty() {
        return Err(AppError::ValidationError(
            "Name and description are required".to_string(),
        ));
    }
    if name.chars().count() > 120 || description.chars().count() > 200 {
        return Err(AppError::ValidationError(
            "Name or description is too long".to_string(),
        ));
    }
    let price_cents = price_to_cents(request.price)?;
    Ok((name, description, price_cents))
}
