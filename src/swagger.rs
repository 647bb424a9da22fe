use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::UserRole;
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        // components always exist once schemas are registered
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("musicworld_session"))),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::home::home,
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::catalog::list_items,
        handlers::catalog::order_page,
        handlers::feedback::list_feedback,
        handlers::feedback::submit_feedback,
        handlers::cart::view_cart,
        handlers::cart::add_to_cart,
        handlers::cart::checkout,
        handlers::admin::list_items,
        handlers::admin::get_item,
        handlers::admin::create_item,
        handlers::admin::update_item,
        handlers::admin::delete_item,
        handlers::admin::list_feedback,
        handlers::admin::approve_feedback,
        handlers::admin::reject_feedback,
        handlers::admin::list_orders,
        handlers::admin::get_order,
        handlers::admin::delete_order,
    ),
    components(
        schemas(
            UserRole,
            RegisterRequest,
            LoginRequest,
            UserResponse,
            ItemRequest,
            ItemResponse,
            AddToCartRequest,
            CartLine,
            CartView,
            CheckoutResponse,
            OrderLineResponse,
            OrderResponse,
            SubmitFeedbackRequest,
            FeedbackResponse,
            ExchangeRate,
            PageContext,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "home", description = "Landing page context"),
        (name = "auth", description = "Registration, login and logout"),
        (name = "catalog", description = "Item catalog and order page"),
        (name = "cart", description = "Session cart and checkout"),
        (name = "feedback", description = "Customer feedback"),
        (name = "admin", description = "Catalog, feedback moderation and order administration"),
    ),
    info(
        title = "MusicWorld Backend API",
        version = "1.0.0",
        description = "MusicWorld storefront REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_admin_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/admin/orders/{id}"));
        assert!(doc.paths.paths.contains_key("/cart/checkout"));
    }
}
