use actix_web::{HttpResponse, Result, web};

use crate::models::*;
use crate::services::{CatalogService, FeedbackService, OrderService, PageService};

// -----------------------------
// Items
// -----------------------------

#[utoipa::path(
    get,
    path = "/admin/items",
    tag = "admin",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "All items", body = [ItemResponse]),
        (status = 303, description = "Not an admin, redirected to login")
    )
)]
pub async fn list_items(
    catalog_service: web::Data<CatalogService>,
    page_service: web::Data<PageService>,
    ctx: RequestContext,
) -> Result<HttpResponse> {
    ctx.require_admin()?;
    let items = catalog_service.list_items().await?;
    let page = page_service.context(&ctx).await;
    Ok(HttpResponse::Ok().json(ApiResponse::page(items, page)))
}

#[utoipa::path(
    get,
    path = "/admin/items/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "Item id")),
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Item", body = ItemResponse),
        (status = 404, description = "No such item"),
        (status = 303, description = "Not an admin, redirected to login")
    )
)]
pub async fn get_item(
    catalog_service: web::Data<CatalogService>,
    ctx: RequestContext,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    ctx.require_admin()?;
    let item = catalog_service.get_item(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(item)))
}

#[utoipa::path(
    post,
    path = "/admin/items",
    tag = "admin",
    request_body = ItemRequest,
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Created", body = ItemResponse),
        (status = 400, description = "Invalid fields"),
        (status = 303, description = "Not an admin, redirected to login")
    )
)]
pub async fn create_item(
    catalog_service: web::Data<CatalogService>,
    ctx: RequestContext,
    request: web::Json<ItemRequest>,
) -> Result<HttpResponse> {
    ctx.require_admin()?;
    let item = catalog_service.create_item(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(item, "Item added")))
}

#[utoipa::path(
    put,
    path = "/admin/items/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "Item id")),
    request_body = ItemRequest,
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Updated", body = ItemResponse),
        (status = 400, description = "Invalid fields"),
        (status = 404, description = "No such item"),
        (status = 303, description = "Not an admin, redirected to login")
    )
)]
pub async fn update_item(
    catalog_service: web::Data<CatalogService>,
    ctx: RequestContext,
    path: web::Path<i32>,
    request: web::Json<ItemRequest>,
) -> Result<HttpResponse> {
    ctx.require_admin()?;
    let item = catalog_service
        .update_item(path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(item, "Item updated")))
}

#[utoipa::path(
    delete,
    path = "/admin/items/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "Item id")),
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "No such item"),
        (status = 303, description = "Not an admin, redirected to login")
    )
)]
pub async fn delete_item(
    catalog_service: web::Data<CatalogService>,
    ctx: RequestContext,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    ctx.require_admin()?;
    catalog_service.delete_item(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Item deleted")))
}

// -----------------------------
// Feedback moderation
// -----------------------------

#[utoipa::path(
    get,
    path = "/admin/feedbacks",
    tag = "admin",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "All feedback, approved or not", body = [FeedbackResponse]),
        (status = 303, description = "Not an admin, redirected to login")
    )
)]
pub async fn list_feedback(
    feedback_service: web::Data<FeedbackService>,
    page_service: web::Data<PageService>,
    ctx: RequestContext,
) -> Result<HttpResponse> {
    ctx.require_admin()?;
    let list = feedback_service.list_feedback(true).await?;
    let page = page_service.context(&ctx).await;
    Ok(HttpResponse::Ok().json(ApiResponse::page(list, page)))
}

#[utoipa::path(
    post,
    path = "/admin/feedbacks/{id}/approve",
    tag = "admin",
    params(("id" = i32, Path, description = "Feedback id")),
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Approved", body = FeedbackResponse),
        (status = 404, description = "No such feedback"),
        (status = 303, description = "Not an admin, redirected to login")
    )
)]
pub async fn approve_feedback(
    feedback_service: web::Data<FeedbackService>,
    ctx: RequestContext,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    ctx.require_admin()?;
    let feedback = feedback_service.approve(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(feedback, "Approved")))
}

#[utoipa::path(
    post,
    path = "/admin/feedbacks/{id}/reject",
    tag = "admin",
    params(("id" = i32, Path, description = "Feedback id")),
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Rejected and deleted"),
        (status = 404, description = "No such feedback"),
        (status = 303, description = "Not an admin, redirected to login")
    )
)]
pub async fn reject_feedback(
    feedback_service: web::Data<FeedbackService>,
    ctx: RequestContext,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    ctx.require_admin()?;
    feedback_service.reject(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Deleted")))
}

// -----------------------------
// Orders
// -----------------------------

#[utoipa::path(
    get,
    path = "/admin/orders",
    tag = "admin",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "All orders with their lines", body = [OrderResponse]),
        (status = 303, description = "Not an admin, redirected to login")
    )
)]
pub async fn list_orders(
    order_service: web::Data<OrderService>,
    page_service: web::Data<PageService>,
    ctx: RequestContext,
) -> Result<HttpResponse> {
    ctx.require_admin()?;
    let orders = order_service.list_orders().await?;
    let page = page_service.context(&ctx).await;
    Ok(HttpResponse::Ok().json(ApiResponse::page(orders, page)))
}

#[utoipa::path(
    get,
    path = "/admin/orders/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "Order id")),
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Order with its lines", body = OrderResponse),
        (status = 404, description = "No such order"),
        (status = 303, description = "Not an admin, redirected to login")
    )
)]
pub async fn get_order(
    order_service: web::Data<OrderService>,
    ctx: RequestContext,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    ctx.require_admin()?;
    let order = order_service.get_order(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(order)))
}

#[utoipa::path(
    delete,
    path = "/admin/orders/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "Order id")),
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Order and its lines deleted"),
        (status = 404, description = "No such order"),
        (status = 303, description = "Not an admin, redirected to login")
    )
)]
pub async fn delete_order(
    order_service: web::Data<OrderService>,
    ctx: RequestContext,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    ctx.require_admin()?;
    order_service.delete_order(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Order deleted")))
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/items", web::get().to(list_items))
            .route("/items", web::post().to(create_item))
            .route("/items/{id}", web::get().to(get_item))
            .route("/items/{id}", web::put().to(update_item))
            .route("/items/{id}", web::delete().to(delete_item))
            .route("/feedbacks", web::get().to(list_feedback))
            .route("/feedbacks/{id}/approve", web::post().to(approve_feedback))
            .route("/feedbacks/{id}/reject", web::post().to(reject_feedback))
            .route("/orders", web::get().to(list_orders))
            .route("/orders/{id}", web::get().to(get_order))
            .route("/orders/{id}", web::delete().to(delete_order)),
    );
}
