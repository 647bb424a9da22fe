use actix_web::{HttpResponse, Result, web};

use crate::models::*;
use crate::services::{FeedbackService, PageService};

#[utoipa::path(
    get,
    path = "/feedbacks",
    tag = "feedback",
    responses(
        (status = 200, description = "Approved feedback (all feedback for admins)", body = [FeedbackResponse])
    )
)]
pub async fn list_feedback(
    feedback_service: web::Data<FeedbackService>,
    page_service: web::Data<PageService>,
    ctx: RequestContext,
) -> Result<HttpResponse> {
    let list = feedback_service.list_feedback(ctx.is_admin()).await?;
    let page = page_service.context(&ctx).await;
    Ok(HttpResponse::Ok().json(ApiResponse::page(list, page)))
}

#[utoipa::path(
    post,
    path = "/feedbacks",
    tag = "feedback",
    request_body = SubmitFeedbackRequest,
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Submitted, awaiting approval", body = FeedbackResponse),
        (status = 400, description = "Empty text"),
        (status = 303, description = "Not logged in as a customer, redirected to login")
    )
)]
pub async fn submit_feedback(
    feedback_service: web::Data<FeedbackService>,
    ctx: RequestContext,
    request: web::Json<SubmitFeedbackRequest>,
) -> Result<HttpResponse> {
    let identity = ctx.require_customer()?;
    let feedback = feedback_service.submit(identity, &request.text).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        feedback,
        "Feedback added and awaiting approval",
    )))
}

pub fn feedback_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/feedbacks")
            .route("", web::get().to(list_feedback))
            .route("", web::post().to(submit_feedback)),
    );
}
