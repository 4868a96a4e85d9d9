//! Bybit v5 REST client with pacing and retry.

use std::sync::Arc;
use std::time::Duration;

use backon::Retryable;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::messages::{BybitResponse, Instrument, KlineRow, ListResult, Ticker};
use crate::config::RetryPolicy;
use crate::services::market_data::{MarketDataError, NO_PRICE};
use crate::services::pacing::RequestPacer;

pub const CATEGORY: &str = "linear";

pub struct BybitRestClient {
    base_url: String,
    http: Client,
    retry: RetryPolicy,
    pacer: Option<Arc<RequestPacer>>,
}

impl BybitRestClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, MarketDataError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("trendfunnel/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(base_url, http, retry))
    }

    pub fn with_client(base_url: impl Into<String>, http: Client, retry: RetryPolicy) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            retry,
            pacer: None,
        }
    }

    pub fn with_pacer(mut self, pacer: Arc<RequestPacer>) -> Self {
        self.pacer = Some(pacer);
        self
    }

    /// Linear-contract instruments.
    pub async fn instruments(&self) -> Result<Vec<Instrument>, MarketDataError> {
        let query = [("category", CATEGORY.to_string())];
        let result: Option<ListResult<Instrument>> =
            self.get("/v5/market/instruments-info", &query).await?;
        Ok(result.map(|r| r.list).unwrap_or_default())
    }

    /// Last traded price, or [`NO_PRICE`] when the exchange rejects the symbol.
    pub async fn last_price(&self, symbol: &str) -> Result<String, MarketDataError> {
        let query = [
            ("category", CATEGORY.to_string()),
            ("symbol", symbol.to_string()),
        ];
        let result: Option<ListResult<Ticker>> = self.get("/v5/market/tickers", &query).await?;

        match result {
            None => Ok(NO_PRICE.to_string()),
            Some(r) => r
                .list
                .into_iter()
                .next()
                .map(|ticker| ticker.last_price)
                .ok_or_else(|| MarketDataError::Decode(format!("empty ticker list for {symbol}"))),
        }
    }

    /// Raw kline rows as listed by the exchange (newest first).
    pub async fn klines(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<KlineRow>, MarketDataError> {
        let query = [
            ("category", CATEGORY.to_string()),
            ("symbol", symbol.to_string()),
            ("interval", interval.to_string()),
            ("limit", limit.to_string()),
        ];
        let result: Option<ListResult<KlineRow>> = self.get("/v5/market/kline", &query).await?;
        Ok(result.map(|r| r.list).unwrap_or_default())
    }

    /// GET with transient-failure retry. `Ok(None)` means the exchange answered
    /// 400/404, which callers read as "no data".
    async fn get<T>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, MarketDataError>
    where
        T: DeserializeOwned + Send,
    {
        let url = format!("{}{}", self.base_url, path);
        let url = url.as_str();

        (|| self.send_once(url, query))
            .retry(self.retry.backoff())
            .when(MarketDataError::is_transient)
            .notify(|err, delay| {
                warn!(url = %url, error = %err, delay_ms = delay.as_millis() as u64, "Bybit request failed, retrying");
            })
            .await
    }

    async fn send_once<T>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, MarketDataError>
    where
        T: DeserializeOwned + Send,
    {
        if let Some(pacer) = &self.pacer {
            pacer.acquire().await;
        }

        debug!(url = %url, "Bybit GET");
        let response = self.http.get(url).query(query).send().await?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::NOT_FOUND {
            debug!(url = %url, status = %status, "Bybit returned no data");
            return Ok(None);
        }

        let body: BybitResponse<T> = response.error_for_status()?.json().await?;
        if body.ret_code != 0 {
            return Err(MarketDataError::Api {
                code: body.ret_code,
                message: body.ret_msg,
            });
        }

        Ok(body.result)
    }
}
