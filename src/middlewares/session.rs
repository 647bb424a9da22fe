use crate::config::SessionConfig;
use crate::error::{AppError, AppResult};
use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite, time::Duration};

/// Key used to encrypt the session cookie.
///
/// An empty secret generates a throwaway key; sessions then do not survive a
/// restart.
pub fn session_key(secret: &str) -> AppResult<Key> {
    if secret.is_empty() {
        log::warn!("session.secret is empty, using a generated key");
        return Ok(Key::generate());
    }
    Key::try_from(secret.as_bytes()).map_err(|e| {
        AppError::ConfigError(format!("session.secret must be at least 64 bytes: {e}"))
    })
}

/// Cookie-backed session carrying the identity and the cart.
pub fn create_session_middleware(
    config: &SessionConfig,
    key: Key,
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(config.cookie_name.clone())
        .cookie_secure(config.cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .cookie_content_security(CookieContentSecurity::Private)
        .session_lifecycle(
            PersistentSession::default().session_ttl(Duration::seconds(config.expires_in)),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_secret_is_a_config_error() {
        assert!(matches!(
            session_key("too-short"),
            Err(AppError::ConfigError(_))
        ));
    }

    #[test]
    fn test_long_secret_and_empty_secret_give_keys() {
        assert!(session_key(&"k".repeat(64)).is_ok());
        assert!(session_key("").is_ok());
    }
}
