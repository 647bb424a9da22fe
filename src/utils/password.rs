use crate::error::{AppError, AppResult};
use bcrypt::{hash, verify};

/// 对密码进行哈希
pub fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    hash(password, cost).map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))
}

/// 验证密码
///
/// A stored value that is not a bcrypt hash never matches.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match verify(password, hash) {
        Ok(valid) => valid,
        Err(e) => {
            log::warn!("Stored password hash could not be verified: {e}");
            false
        }
    }
}
