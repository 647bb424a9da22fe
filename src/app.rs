use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::web;

use crate::config::{Config, SessionConfig};
use crate::database::DbPool;
use crate::error::AppResult;
use crate::handlers;
use crate::middlewares::{create_session_middleware, session_key};
use crate::services::*;

/// Every service the HTTP layer needs, built once at startup and cloned into
/// each worker.
#[derive(Clone)]
pub struct AppState {
    session_key: Key,
    pub session_config: SessionConfig,
    pub auth_service: AuthService,
    pub catalog_service: CatalogService,
    pub cart_service: CartService,
    pub feedback_service: FeedbackService,
    pub order_service: OrderService,
    pub page_service: PageService,
}

impl AppState {
    pub fn new(pool: DbPool, config: &Config, page_service: PageService) -> AppResult<Self> {
        // 所有 worker 共用同一把会话密钥
        let session_key = session_key(&config.session.secret)?;

        Ok(Self {
            session_key,
            session_config: config.session.clone(),
            auth_service: AuthService::new(pool.clone(), config.auth.bcrypt_cost),
            catalog_service: CatalogService::new(pool.clone()),
            cart_service: CartService::new(pool.clone()),
            feedback_service: FeedbackService::new(pool.clone()),
            order_service: OrderService::new(pool),
            page_service,
        })
    }

    pub fn session_middleware(&self) -> SessionMiddleware<CookieSessionStore> {
        create_session_middleware(&self.session_config, self.session_key.clone())
    }

    /// Registers the shared services and mounts the API under `/api/v1`.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.auth_service.clone()))
            .app_data(web::Data::new(self.catalog_service.clone()))
            .app_data(web::Data::new(self.cart_service.clone()))
            .app_data(web::Data::new(self.feedback_service.clone()))
            .app_data(web::Data::new(self.order_service.clone()))
            .app_data(web::Data::new(self.page_service.clone()))
            .configure(handlers::api_config);
    }
}
