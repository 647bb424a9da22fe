pub mod feedbacks;
pub mod items;
pub mod order_items;
pub mod orders;
pub mod users;

pub use feedbacks as feedback_entity;
pub use items as item_entity;
pub use order_items as order_item_entity;
pub use orders as order_entity;
pub use users as user_entity;
pub use users::UserRole;
