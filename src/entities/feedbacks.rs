use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// Customer feedback. Stays hidden from non-admin viewers until `approved`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "feedbacks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Email of the submitting user
    pub author: String,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
