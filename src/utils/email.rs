use crate::error::{AppError, AppResult};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// 验证邮箱格式
pub fn validate_email(email: &str) -> AppResult<()> {
    if email.len() > 100 || !EMAIL_REGEX.is_match(email) {
        return Err(AppError::ValidationError("Invalid email address".to_string()));
    }

    Ok(())
}

/// Emails are compared case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
