pub mod auth_service;
pub mod cart_service;
pub mod catalog_service;
pub mod feedback_service;
pub mod order_service;
pub mod page_service;

pub use auth_service::*;
pub use cart_service::*;
pub use catalog_service::CatalogService;
pub use feedback_service::*;
pub use order_service::*;
pub use page_service::*;
