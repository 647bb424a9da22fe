use crate::entities::{UserRole, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password";
const DUPLICATE_EMAIL: &str = "A user with this email already exists";

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, bcrypt_cost: u32) -> Self {
        Self { pool, bcrypt_cost }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<UserResponse> {
        if request.email.trim().is_empty()
            || request.password.is_empty()
            || request.confirm.is_empty()
        {
            return Err(AppError::ValidationError(
                "Please fill in all fields".to_string(),
            ));
        }

        let email = normalize_email(&request.email);
        validate_email(&email)?;

        if request.password != request.confirm {
            return Err(AppError::ValidationError(
                "Passwords do not match".to_string(),
            ));
        }

        // 检查邮箱是否已注册
        if self.find_by_email(&email).await?.is_some() {
            return Err(AppError::ValidationError(DUPLICATE_EMAIL.to_string()));
        }

        let user = self
            .insert_user(&email, &request.password, UserRole::User)
            .await?;
        log::info!("Registered user {} ({})", user.id, user.email);

        Ok(UserResponse::from(user))
    }

    /// Checks the credentials. Starting the session is up to the caller.
    pub async fn login(&self, request: LoginRequest) -> AppResult<UserResponse> {
        let email = normalize_email(&request.email);

        let user = self
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::AuthError(INVALID_CREDENTIALS.to_string()))?;

        if !verify_password(&request.password, &user.password_hash) {
            return Err(AppError::AuthError(INVALID_CREDENTIALS.to_string()));
        }

        log::info!("User {} logged in", user.id);
        Ok(UserResponse::from(user))
    }

    /// Creates the bootstrap admin unless the email is already registered.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> AppResult<bool> {
        let email = normalize_email(email);
        validate_email(&email)?;
        if password.is_empty() {
            return Err(AppError::ConfigError(
                "Admin password must not be empty".to_string(),
            ));
        }

        if self.find_by_email(&email).await?.is_some() {
            return Ok(false);
        }

        let admin = self.insert_user(&email, password, UserRole::Admin).await?;
        log::info!("Created admin account {}", admin.email);
        Ok(true)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<users::Model>> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.pool)
            .await?;
        Ok(user)
    }

    async fn insert_user(
        &self,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> AppResult<users::Model> {
        let password_hash = hash_password(password, self.bcrypt_cost)?;

        let user = users::ActiveModel {
            email: Set(email.to_string()),
            password_hash: Set(password_hash),
            role: Set(role),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(|e| match e.sql_err() {
            // 并发注册：唯一索引兜底
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::ValidationError(DUPLICATE_EMAIL.to_string())
            }
            _ => AppError::from(e),
        })?;

        Ok(user)
    }
}
