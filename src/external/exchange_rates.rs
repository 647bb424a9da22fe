use crate::config::ExchangeRatesConfig;
use crate::error::{AppError, AppResult};
use crate::models::{ExchangeRate, ExchangeRates};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Anything that can report current currency rates.
///
/// Callers decide what a failure means; page rendering substitutes an empty
/// mapping (see `PageService`).
#[async_trait]
pub trait ExchangeRateSource: Send + Sync {
    async fn fetch_rates(&self) -> AppResult<ExchangeRates>;
}

/// One record of the PrivatBank public exchange feed.
#[derive(Debug, Serialize, Deserialize)]
pub struct RateRecord {
    pub ccy: String,
    pub base_ccy: Option<String>,
    pub buy: String,
    pub sale: String,
}

#[derive(Clone)]
pub struct PrivatBankRates {
    http: Client,
    url: String,
    currencies: Vec<String>,
}

impl PrivatBankRates {
    pub fn new(cfg: &ExchangeRatesConfig) -> AppResult<Self> {
        let http = Client::builder()
            .user_agent("musicworld-backend/rates")
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            url: cfg.url.clone(),
            currencies: cfg.currencies.clone(),
        })
    }
}

#[async_trait]
impl ExchangeRateSource for PrivatBankRates {
    async fn fetch_rates(&self) -> AppResult<ExchangeRates> {
        let resp = self.http.get(&self.url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::ExternalApiError(format!(
                "Exchange rate lookup failed: HTTP {}",
                status.as_u16()
            )));
        }

        let records: Vec<RateRecord> = resp.json().await?;
        parse_rates(&records, &self.currencies)
    }
}

/// Keeps the wanted currencies and parses their decimal string rates.
pub fn parse_rates(records: &[RateRecord], currencies: &[String]) -> AppResult<ExchangeRates> {
    let mut rates = ExchangeRates::new();
    for record in records
        .iter()
        .filter(|r| currencies.iter().any(|c| c == &r.ccy))
    {
        let buy = parse_rate(&record.buy)?;
        let sale = parse_rate(&record.sale)?;
        rates.insert(record.ccy.clone(), ExchangeRate { buy, sale });
    }
    Ok(rates)
}

fn parse_rate(value: &str) -> AppResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| AppError::ExternalApiError(format!("Invalid exchange rate value: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn currencies() -> Vec<String> {
        vec!["USD".to_string(), "EUR".to_string()]
    }

    #[test]
    fn test_parse_rates_keeps_configured_currencies() {
        let body = r#"[
            {"ccy":"EUR","base_ccy":"UAH","buy":"44.10000","sale":"45.10000"},
            {"ccy":"USD","base_ccy":"UAH","buy":"41.05000","sale":"41.65000"},
            {"ccy":"PLN","base_ccy":"UAH","buy":"10.10000","sale":"10.60000"}
        ]"#;
        let records: Vec<RateRecord> = serde_json::from_str(body).unwrap();

        let rates = parse_rates(&records, &currencies()).unwrap();
        assert_eq!(rates.len(), 2);
        assert_eq!(rates["USD"].buy, 41.05);
        assert_eq!(rates["EUR"].sale, 45.1);
        assert!(!rates.contains_key("PLN"));
    }

    #[test]
    fn test_parse_rates_rejects_garbage_values() {
        let records = vec![RateRecord {
            ccy: "USD".to_string(),
            base_ccy: None,
            buy: "n/a".to_string(),
            sale: "41.0".to_string(),
        }];
        assert!(parse_rates(&records, &currencies()).is_err());
    }

    #[test]
    fn test_parse_rates_empty_feed() {
        assert!(parse_rates(&[], &currencies()).unwrap().is_empty());
    }
}
