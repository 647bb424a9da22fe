use actix_web::{HttpResponse, Result, web};

use crate::models::*;
use crate::services::{CatalogService, PageService};

#[utoipa::path(
    get,
    path = "/items",
    tag = "catalog",
    responses(
        (status = 200, description = "All catalog items", body = [ItemResponse])
    )
)]
pub async fn list_items(
    catalog_service: web::Data<CatalogService>,
    page_service: web::Data<PageService>,
    ctx: RequestContext,
) -> Result<HttpResponse> {
    let items = catalog_service.list_items().await?;
    let page = page_service.context(&ctx).await;
    Ok(HttpResponse::Ok().json(ApiResponse::page(items, page)))
}

/// Order entry page: the catalog a shopper picks from.
#[utoipa::path(
    get,
    path = "/orders",
    tag = "catalog",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Catalog to order from", body = [ItemResponse]),
        (status = 303, description = "Not logged in as a customer, redirected to login")
    )
)]
pub async fn order_page(
    catalog_service: web::Data<CatalogService>,
    page_service: web::Data<PageService>,
    ctx: RequestContext,
) -> Result<HttpResponse> {
    ctx.require_customer()?;
    let items = catalog_service.list_items().await?;
    let page = page_service.context(&ctx).await;
    Ok(HttpResponse::Ok().json(ApiResponse::page(items, page)))
}

pub fn catalog_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/items", web::get().to(list_items))
        .route("/orders", web::get().to(order_page));
}
