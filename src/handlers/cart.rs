use actix_web::{HttpResponse, Result, web};

use crate::models::*;
use crate::services::{CartService, PageService};

#[utoipa::path(
    get,
    path = "/cart",
    tag = "cart",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Resolved cart lines and total", body = CartView),
        (status = 303, description = "Not logged in as a customer, redirected to login")
    )
)]
pub async fn view_cart(
    cart_service: web::Data<CartService>,
    page_service: web::Data<PageService>,
    ctx: RequestContext,
) -> Result<HttpResponse> {
    ctx.require_customer()?;
    let view = cart_service.view_cart(&ctx.cart()?).await?;
    let page = page_service.context(&ctx).await;
    Ok(HttpResponse::Ok().json(ApiResponse::page(view, page)))
}

#[utoipa::path(
    post,
    path = "/cart/items",
    tag = "cart",
    request_body = AddToCartRequest,
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Item added", body = CartView),
        (status = 400, description = "Invalid quantity or unknown item; cart unchanged"),
        (status = 303, description = "Not logged in as a customer, redirected to login")
    )
)]
pub async fn add_to_cart(
    cart_service: web::Data<CartService>,
    ctx: RequestContext,
    request: web::Json<AddToCartRequest>,
) -> Result<HttpResponse> {
    ctx.require_customer()?;

    let item = cart_service
        .find_cartable_item(request.item_id, request.quantity)
        .await?;

    // read-modify-write on the session with no await in between
    let mut cart = ctx.cart()?;
    cart.add(item.id, request.quantity)?;
    ctx.save_cart(&cart)?;

    let view = cart_service.view_cart(&cart).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        view,
        format!("Added {} × \"{}\" to the cart", request.quantity, item.name),
    )))
}

#[utoipa::path(
    post,
    path = "/cart/checkout",
    tag = "cart",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Order placed, or nothing to check out", body = CheckoutResponse),
        (status = 303, description = "Not logged in as a customer, redirected to login")
    )
)]
pub async fn checkout(
    cart_service: web::Data<CartService>,
    ctx: RequestContext,
) -> Result<HttpResponse> {
    let identity = ctx.require_customer()?;

    let mut cart = ctx.cart()?;
    let order = cart_service.checkout(identity, &mut cart).await?;

    let message = if order.is_some() {
        ctx.save_cart(&cart)?;
        "Order placed. Thank you!"
    } else {
        "Your cart is empty"
    };

    let view = cart_service.view_cart(&cart).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        CheckoutResponse { order, cart: view },
        message,
    )))
}

pub fn cart_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/cart")
            .route("", web::get().to(view_cart))
            .route("/items", web::post().to(add_to_cart))
            .route("/checkout", web::post().to(checkout)),
    );
}
