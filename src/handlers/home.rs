use actix_web::{HttpResponse, Result, web};

use crate::models::*;
use crate::services::PageService;

#[utoipa::path(
    get,
    path = "/home",
    tag = "home",
    responses(
        (status = 200, description = "Page context for the landing page")
    )
)]
pub async fn home(page_service: web::Data<PageService>, ctx: RequestContext) -> Result<HttpResponse> {
    let page = page_service.context(&ctx).await;
    Ok(HttpResponse::Ok().json(ApiResponse::page((), page)))
}

pub fn home_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/home", web::get().to(home));
}
