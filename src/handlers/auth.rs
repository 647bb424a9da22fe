use actix_web::{HttpResponse, Result, web};

use crate::models::*;
use crate::services::AuthService;

#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registered", body = UserResponse),
        (status = 400, description = "Missing fields, mismatched passwords or duplicate email")
    )
)]
pub async fn register(
    auth_service: web::Data<AuthService>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    let user = auth_service.register(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        user,
        "Registration successful! Please log in",
    )))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; the session cookie is set", body = UserResponse),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    auth_service: web::Data<AuthService>,
    mut ctx: RequestContext,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let user = auth_service.login(request.into_inner()).await?;
    ctx.log_in(Identity::from(&user))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(user, "You are logged in")))
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Logged out; the session cookie is cleared")
    )
)]
pub async fn logout(mut ctx: RequestContext) -> Result<HttpResponse> {
    ctx.log_out();
    Ok(HttpResponse::Ok().json(ApiResponse::message("You have logged out")))
}

pub fn auth_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout)),
    );
}
