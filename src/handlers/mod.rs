pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod feedback;
pub mod home;

pub use admin::admin_config;
pub use auth::auth_config;
pub use cart::cart_config;
pub use catalog::catalog_config;
pub use feedback::feedback_config;
pub use home::home_config;

use actix_web::web;

/// Every API route, mounted under `/api/v1`.
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(home_config)
            .configure(auth_config)
            .configure(catalog_config)
            .configure(feedback_config)
            .configure(cart_config)
            .configure(admin_config),
    );
}
