//! Client for the Rapira market-data API.
//!
//! One GET against the configured endpoint returns every listed pair; we pull out USDT/RUB and
//! hand the full list back alongside it so the web client can render other pairs too. All
//! failure modes are typed; the server maps each onto its own status code and error code.

use std::{sync::Arc, time::Duration};

use log::*;
use reqwest::{header::ACCEPT, Client};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// The pair this service trades.
pub const TARGET_PAIR: &str = "USDT/RUB";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Error)]
pub enum RatesApiError {
    #[error("The rates service did not respond within {} seconds", REQUEST_TIMEOUT.as_secs())]
    Timeout,
    #[error("The rates service returned status {status}")]
    ServiceUnavailable { status: u16 },
    #[error("The {TARGET_PAIR} pair is missing from the rates response")]
    PairNotFound,
    #[error("The rates response is malformed. {0}")]
    InvalidResponse(String),
    #[error("Network error while contacting the rates service. {0}")]
    Network(String),
}

/// A single pair quote, passed through verbatim: fields we do not model ride along in `extra`
/// so the client sees exactly what the upstream sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateEntry {
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ask_price: Option<Decimal>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RatesEnvelope {
    code: i64,
    #[serde(default)]
    data: Option<Vec<RateEntry>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatesSnapshot {
    pub usdt_rub: RateEntry,
    pub all_rates: Vec<RateEntry>,
}

#[derive(Clone)]
pub struct RatesApi {
    url: String,
    client: Arc<Client>,
}

impl RatesApi {
    pub fn new(url: impl Into<String>) -> Result<Self, RatesApiError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent("CurrencyExchangeBot/1.0")
            .build()
            .map_err(|e| RatesApiError::Network(e.to_string()))?;
        Ok(Self { url: url.into(), client: Arc::new(client) })
    }

    /// Fetch the current rates and extract the target pair.
    pub async fn fetch_rates(&self) -> Result<RatesSnapshot, RatesApiError> {
        trace!("📡 Requesting rates from {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        if !status.is_success() {
            error!("📡 The rates service returned an error status: {status}");
            return Err(RatesApiError::ServiceUnavailable { status: status.as_u16() });
        }
        let envelope: RatesEnvelope = response.json().await.map_err(|e| {
            if e.is_timeout() {
                RatesApiError::Timeout
            } else {
                RatesApiError::InvalidResponse(e.to_string())
            }
        })?;
        snapshot_from_envelope(envelope)
    }

    /// Cheap probe for the health endpoint. A service that answers at all, even with an error
    /// status, is reachable; only a transport failure reads as unreachable.
    pub async fn ping(&self) -> UpstreamHealth {
        match self.client.get(&self.url).timeout(HEALTH_TIMEOUT).send().await {
            Ok(response) if response.status().is_success() => UpstreamHealth::Healthy,
            Ok(response) => {
                debug!("📡 The rates service answered the health probe with {}", response.status());
                UpstreamHealth::Unhealthy
            },
            Err(e) => {
                debug!("📡 Health probe against the rates service failed: {e}");
                UpstreamHealth::Unreachable
            },
        }
    }
}

/// Outcome of the health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamHealth {
    /// Responded 2xx.
    Healthy,
    /// Responded with an error status.
    Unhealthy,
    /// Did not respond at all (connect failure or timeout).
    Unreachable,
}

fn map_transport_error(e: reqwest::Error) -> RatesApiError {
    if e.is_timeout() {
        error!("📡 The rates service timed out");
        RatesApiError::Timeout
    } else {
        error!("📡 Could not reach the rates service: {e}");
        RatesApiError::Network(e.to_string())
    }
}

fn snapshot_from_envelope(envelope: RatesEnvelope) -> Result<RatesSnapshot, RatesApiError> {
    let data = match (envelope.code, envelope.data) {
        (0, Some(data)) => data,
        (code, _) => {
            return Err(RatesApiError::InvalidResponse(format!("unexpected envelope (code {code})")));
        },
    };
    debug!("📡 Received {} currency pairs", data.len());
    let usdt_rub =
        data.iter().find(|entry| entry.symbol == TARGET_PAIR).cloned().ok_or(RatesApiError::PairNotFound)?;
    Ok(RatesSnapshot { usdt_rub, all_rates: data })
}
