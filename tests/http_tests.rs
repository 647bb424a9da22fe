mod common;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::{App, http::StatusCode, http::header, test};
use async_trait::async_trait;
use common::*;
use musicworld_backend::external::ExchangeRateSource;
use musicworld_backend::models::ExchangeRates;
use musicworld_backend::services::PageService;
use musicworld_backend::{AppError, AppResult};
use serde_json::{Value, json};
use std::sync::Arc;

const SESSION_COOKIE: &str = "musicworld_session";

struct FailingRates;

#[async_trait]
impl ExchangeRateSource for FailingRates {
    async fn fetch_rates(&self) -> AppResult<ExchangeRates> {
        Err(AppError::ExternalApiError("rates service is down".to_string()))
    }
}

/// The session cookie a response sets, if it set one.
fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
}

macro_rules! login_cookie {
    ($app:expr, $email:expr, $password:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": $email, "password": $password }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        session_cookie(&resp).expect("session cookie set")
    }};
}

#[actix_web::test]
async fn test_gated_routes_redirect_to_login() {
    let ctx = setup().await;
    let state = ctx.state.clone();
    let app = test::init_service(
        App::new()
            .wrap(state.session_middleware())
            .configure(|cfg| state.configure(cfg)),
    )
    .await;

    for (method, uri) in [
        ("GET", "/api/v1/cart"),
        ("POST", "/api/v1/cart/checkout"),
        ("GET", "/api/v1/orders"),
        ("GET", "/api/v1/admin/orders"),
        ("DELETE", "/api/v1/admin/orders/1"),
    ] {
        let req = match method {
            "GET" => test::TestRequest::get(),
            "POST" => test::TestRequest::post(),
            _ => test::TestRequest::delete(),
        }
        .uri(uri)
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{method} {uri}");
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/api/v1/auth/login"
        );
    }

    // a cookie that does not decrypt is treated as anonymous
    let req = test::TestRequest::get()
        .uri("/api/v1/cart")
        .cookie(Cookie::new(SESSION_COOKIE, "not-a-session"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[actix_web::test]
async fn test_cookie_session_cart_checkout_and_logout() {
    let ctx = setup().await;
    let guitar = ctx.create_item("Guitar", 250.0).await;
    let state = ctx.state.clone();
    let app = test::init_service(
        App::new()
            .wrap(state.session_middleware())
            .configure(|cfg| state.configure(cfg)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "email": CUSTOMER_EMAIL,
            "password": CUSTOMER_PASSWORD,
            "confirm": CUSTOMER_PASSWORD,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = login_cookie!(app, CUSTOMER_EMAIL, CUSTOMER_PASSWORD);
    assert_eq!(cookie.http_only(), Some(true));

    let req = test::TestRequest::post()
        .uri("/api/v1/cart/items")
        .cookie(cookie.clone())
        .set_json(json!({ "item_id": guitar.id, "quantity": 2 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie(&resp).expect("cart stored in the session");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Added 2 × \"Guitar\" to the cart");

    let req = test::TestRequest::post()
        .uri("/api/v1/cart/items")
        .cookie(cookie.clone())
        .set_json(json!({ "item_id": guitar.id, "quantity": 0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/v1/cart")
        .cookie(cookie.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["items"][0]["quantity"], 2);
    assert_eq!(body["data"]["total_cents"], 50_000);
    assert_eq!(body["page"]["logged_in"], true);

    let req = test::TestRequest::post()
        .uri("/api/v1/cart/checkout")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    let cookie = session_cookie(&resp).expect("emptied cart stored in the session");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Order placed. Thank you!");
    assert_eq!(body["data"]["order"]["items"][0]["item_name"], "Guitar");
    assert!(body["data"]["cart"]["items"].as_array().unwrap().is_empty());

    let req = test::TestRequest::post()
        .uri("/api/v1/cart/checkout")
        .cookie(cookie.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Your cart is empty");
    assert!(body["data"]["order"].is_null());

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let removal = session_cookie(&resp).expect("session cookie cleared");
    assert!(removal.value().is_empty());

    let req = test::TestRequest::get()
        .uri("/api/v1/cart")
        .cookie(removal)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[actix_web::test]
async fn test_admin_routes_require_admin_role() {
    let ctx = setup().await;
    ctx.register_customer().await;
    ctx.create_admin().await;

    let state = ctx.state.clone();
    let app = test::init_service(
        App::new()
            .wrap(state.session_middleware())
            .configure(|cfg| state.configure(cfg)),
    )
    .await;
    let customer_cookie = login_cookie!(app, CUSTOMER_EMAIL, CUSTOMER_PASSWORD);
    let admin_cookie = login_cookie!(app, ADMIN_EMAIL, ADMIN_PASSWORD);

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/items")
        .cookie(customer_cookie)
        .set_json(json!({ "name": "Violin", "description": "Old", "price": 99.99 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let req = test::TestRequest::post()
        .uri("/api/v1/admin/items")
        .cookie(admin_cookie.clone())
        .set_json(json!({ "name": "Violin", "description": "Old", "price": 99.99 }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["price_cents"], 9_999);
    let item_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::get().uri("/api/v1/items").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"][0]["id"].as_i64(), Some(item_id));
    assert_eq!(body["page"]["logged_in"], false);

    // admins do not shop
    let req = test::TestRequest::get()
        .uri("/api/v1/cart")
        .cookie(admin_cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let req = test::TestRequest::delete()
        .uri("/api/v1/admin/items/4242")
        .cookie(admin_cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_feedback_visibility_over_http() {
    let ctx = setup().await;
    let customer = ctx.register_customer().await;
    ctx.create_admin().await;
    let pending = ctx
        .state
        .feedback_service
        .submit(&customer, "Needs moderation")
        .await
        .unwrap();

    let state = ctx.state.clone();
    let app = test::init_service(
        App::new()
            .wrap(state.session_middleware())
            .configure(|cfg| state.configure(cfg)),
    )
    .await;
    let admin_cookie = login_cookie!(app, ADMIN_EMAIL, ADMIN_PASSWORD);

    let req = test::TestRequest::get().uri("/api/v1/feedbacks").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let req = test::TestRequest::get()
        .uri("/api/v1/feedbacks")
        .cookie(admin_cookie.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["page"]["is_admin"], true);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/admin/feedbacks/{}/approve", pending.id))
        .cookie(admin_cookie)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Approved");

    let req = test::TestRequest::get().uri("/api/v1/feedbacks").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"][0]["text"], "Needs moderation");
}

#[actix_web::test]
async fn test_failing_rates_still_render_page() {
    let ctx = setup_with_pages(PageService::new(Some(Arc::new(FailingRates)))).await;
    let state = ctx.state.clone();
    let app = test::init_service(
        App::new()
            .wrap(state.session_middleware())
            .configure(|cfg| state.configure(cfg)),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/home").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["page"]["exchange_rates"], json!({}));
    assert_eq!(body["page"]["logged_in"], false);
}
