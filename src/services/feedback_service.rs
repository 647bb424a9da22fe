use crate::entities::feedback_entity as feedbacks;
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

const MAX_FEEDBACK_CHARS: usize = 5000;

#[derive(Clone)]
pub struct FeedbackService {
    pool: DatabaseConnection,
}

impl FeedbackService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Admins see every row; everyone else only approved feedback.
    pub async fn list_feedback(&self, include_unapproved: bool) -> AppResult<Vec<FeedbackResponse>> {
        let mut query = feedbacks::Entity::find();
        if !include_unapproved {
            query = query.filter(feedbacks::Column::Approved.eq(true));
        }
        let list = query
            .order_by_asc(feedbacks::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// New feedback waits for moderation.
    pub async fn submit(&self, author: &Identity, text: &str) -> AppResult<FeedbackResponse> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::ValidationError(
                "Feedback text is required".to_string(),
            ));
        }
        if text.chars().count() > MAX_FEEDBACK_CHARS {
            return Err(AppError::ValidationError(
                "Feedback text is too long".to_string(),
            ));
        }

        let feedback = feedbacks::ActiveModel {
            author: Set(author.email.clone()),
            text: Set(text.to_string()),
            approved: Set(false),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Feedback {} submitted by {}", feedback.id, feedback.author);
        Ok(feedback.into())
    }

    pub async fn approve(&self, feedback_id: i32) -> AppResult<FeedbackResponse> {
        let feedback = self.find_feedback(feedback_id).await?;
        if feedback.approved {
            return Ok(feedback.into());
        }

        let mut model = feedback.into_active_model();
        model.approved = Set(true);
        let updated = model.update(&self.pool).await?;

        log::info!("Feedback {} approved", updated.id);
        Ok(updated.into())
    }

    /// Rejection deletes the row for good.
    pub async fn reject(&self, feedback_id: i32) -> AppResult<()> {
        let feedback = self.find_feedback(feedback_id).await?;
        feedbacks::Entity::delete_by_id(feedback.id)
            .exec(&self.pool)
            .await?;

        log::info!("Feedback {} rejected", feedback.id);
        Ok(())
    }

    async fn find_feedback(&self, feedback_id: i32) -> AppResult<feedbacks::Model> {
        feedbacks::Entity::find_by_id(feedback_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Feedback {feedback_id} not found")))
    }
}
