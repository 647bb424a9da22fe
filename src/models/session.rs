use crate::entities::UserRole;
use crate::error::{AppError, AppResult};
use actix_session::{Session, SessionExt};
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};
use serde::{Deserialize, Serialize};

use super::{Cart, UserResponse};

/// Session key holding the logged-in `Identity`.
pub const SESSION_IDENTITY_KEY: &str = "identity";
/// Session key holding the shopper's `Cart`.
pub const SESSION_CART_KEY: &str = "cart";

/// Who is logged in on a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: i32,
    pub email: String,
    pub role: UserRole,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl From<&UserResponse> for Identity {
    fn from(user: &UserResponse) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Typed view over the visitor's `actix_session::Session`, handed to
/// handlers as an extractor.
///
/// The identity is decoded once per request; the cart is read from and
/// written to the session on demand.
pub struct RequestContext {
    session: Session,
    identity: Option<Identity>,
}

impl RequestContext {
    pub fn from_session(session: Session) -> Self {
        // 无法解码的会话视为匿名
        let identity = session
            .get::<Identity>(SESSION_IDENTITY_KEY)
            .unwrap_or_else(|e| {
                log::debug!("Ignoring unreadable session identity: {e}");
                None
            });
        Self { session, identity }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.identity.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.identity.as_ref().is_some_and(Identity::is_admin)
    }

    /// A logged-in shopper. Admins do not shop.
    pub fn require_customer(&self) -> AppResult<&Identity> {
        match self.identity.as_ref() {
            Some(identity) if !identity.is_admin() => Ok(identity),
            _ => Err(AppError::LoginRequired),
        }
    }

    pub fn require_admin(&self) -> AppResult<&Identity> {
        match self.identity.as_ref() {
            Some(identity) if identity.is_admin() => Ok(identity),
            _ => Err(AppError::LoginRequired),
        }
    }

    pub fn cart(&self) -> AppResult<Cart> {
        let cart = self
            .session
            .get::<Cart>(SESSION_CART_KEY)
            .map_err(|e| AppError::InternalError(format!("Failed to read cart: {e}")))?;
        Ok(cart.unwrap_or_default())
    }

    pub fn save_cart(&self, cart: &Cart) -> AppResult<()> {
        self.session
            .insert(SESSION_CART_KEY, cart)
            .map_err(|e| AppError::InternalError(format!("Failed to store cart: {e}")))
    }

    /// Starts a fresh session for `identity`; any previous state is dropped.
    pub fn log_in(&mut self, identity: Identity) -> AppResult<()> {
        self.session.clear();
        self.session
            .insert(SESSION_IDENTITY_KEY, &identity)
            .map_err(|e| AppError::InternalError(format!("Failed to store session: {e}")))?;
        self.session.renew();
        self.identity = Some(identity);
        Ok(())
    }

    /// Drops the session; the middleware clears the cookie.
    pub fn log_out(&mut self) {
        self.session.purge();
        self.identity = None;
    }
}

impl FromRequest for RequestContext {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_session(req.get_session())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn ctx(role: Option<UserRole>) -> RequestContext {
        let req = TestRequest::default().to_http_request();
        let mut ctx = RequestContext::from_session(req.get_session());
        if let Some(role) = role {
            ctx.log_in(Identity {
                user_id: 1,
                email: "someone@example.com".to_string(),
                role,
            })
            .unwrap();
        }
        ctx
    }

    #[test]
    fn test_anonymous_is_turned_away() {
        let anon = ctx(None);
        assert!(!anon.is_logged_in());
        assert!(matches!(anon.require_customer(), Err(AppError::LoginRequired)));
        assert!(matches!(anon.require_admin(), Err(AppError::LoginRequired)));
    }

    #[test]
    fn test_customer_gate() {
        let user = ctx(Some(UserRole::User));
        assert!(user.require_customer().is_ok());
        assert!(matches!(user.require_admin(), Err(AppError::LoginRequired)));
    }

    #[test]
    fn test_admin_gate() {
        let admin = ctx(Some(UserRole::Admin));
        assert!(admin.is_admin());
        assert!(admin.require_admin().is_ok());
        assert!(matches!(admin.require_customer(), Err(AppError::LoginRequired)));
    }

    #[test]
    fn test_cart_round_trips_through_session() {
        let user = ctx(Some(UserRole::User));
        assert!(user.cart().unwrap().is_empty());

        let mut cart = Cart::new();
        cart.add(4, 2).unwrap();
        user.save_cart(&cart).unwrap();
        assert_eq!(user.cart().unwrap().quantity(4), Some(2));
    }

    #[test]
    fn test_log_in_resets_cart_and_log_out_forgets_identity() {
        let mut user = ctx(Some(UserRole::User));
        let mut cart = Cart::new();
        cart.add(1, 1).unwrap();
        user.save_cart(&cart).unwrap();

        user.log_in(Identity {
            user_id: 2,
            email: "other@example.com".to_string(),
            role: UserRole::User,
        })
        .unwrap();
        assert!(user.cart().unwrap().is_empty());
        assert_eq!(user.identity().map(|i| i.user_id), Some(2));

        user.log_out();
        assert!(!user.is_logged_in());
    }
}
