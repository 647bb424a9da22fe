use crate::external::ExchangeRateSource;
use crate::models::{ExchangeRates, PageContext, RequestContext};
use std::sync::Arc;

/// Builds the context block shared by every page-like response.
#[derive(Clone)]
pub struct PageService {
    rates: Option<Arc<dyn ExchangeRateSource>>,
}

impl PageService {
    pub fn new(rates: Option<Arc<dyn ExchangeRateSource>>) -> Self {
        Self { rates }
    }

    pub fn without_rates() -> Self {
        Self { rates: None }
    }

    /// Never fails: a broken rate lookup turns into an empty mapping.
    pub async fn exchange_rates(&self) -> ExchangeRates {
        let Some(source) = &self.rates else {
            return ExchangeRates::new();
        };
        match source.fetch_rates().await {
            Ok(rates) => rates,
            Err(e) => {
                log::warn!("Failed to fetch exchange rates: {e}");
                ExchangeRates::new()
            }
        }
    }

    pub async fn context(&self, ctx: &RequestContext) -> PageContext {
        PageContext {
            logged_in: ctx.is_logged_in(),
            is_admin: ctx.is_admin(),
            exchange_rates: self.exchange_rates().await,
        }
    }
}
