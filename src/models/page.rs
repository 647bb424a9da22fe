use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExchangeRate {
    pub buy: f64,
    pub sale: f64,
}

/// Currency code (e.g. `USD`) to its buy/sale rate.
pub type ExchangeRates = BTreeMap<String, ExchangeRate>;

/// Shared block attached to every page-like response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PageContext {
    pub logged_in: bool,
    pub is_admin: bool,
    pub exchange_rates: BTreeMap<String, ExchangeRate>,
}
