use crate::entities::feedback_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitFeedbackRequest {
    #[schema(example = "Great shop, fast delivery")]
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedbackResponse {
    pub id: i32,
    pub author: String,
    pub text: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

impl From<feedback_entity::Model> for FeedbackResponse {
    fn from(m: feedback_entity::Model) -> Self {
        Self {
            id: m.id,
            author: m.author,
            text: m.text,
            approved: m.approved,
            created_at: m.created_at,
        }
    }
}
