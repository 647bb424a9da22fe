pub mod cart;
pub mod common;
pub mod feedback;
pub mod item;
pub mod order;
pub mod page;
pub mod session;
pub mod user;

pub use cart::*;
pub use common::*;
pub use feedback::*;
pub use item::*;
pub use order::*;
pub use page::*;
pub use session::*;
pub use user::*;
