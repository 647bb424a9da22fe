pub mod email;
pub mod money;
pub mod password;

pub use email::*;
pub use money::*;
pub use password::*;
