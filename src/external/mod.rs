pub mod exchange_rates;

pub use exchange_rates::*;
