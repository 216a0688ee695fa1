use chrono::{DateTime, Utc};
use serde::Serialize;
use vertex_engine::{Order, OrderStatus, RatesSnapshot, UpstreamHealth};

/// Envelope for `GET /api/rates`. `serverTime` duplicates `timestamp` for older clients that
/// still read it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatesResponse {
    pub success: bool,
    pub data: RatesSnapshot,
    pub timestamp: DateTime<Utc>,
    pub server_time: DateTime<Utc>,
    pub source: &'static str,
}

impl RatesResponse {
    pub fn new(data: RatesSnapshot) -> Self {
        let now = Utc::now();
        Self { success: true, data, timestamp: now, server_time: now, source: "rapira-api" }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatedResponse {
    pub success: bool,
    pub message: &'static str,
    pub data: OrderSummary,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl OrderCreatedResponse {
    pub fn new(order: &Order) -> Self {
        Self {
            success: true,
            message: "Заявка успешно создана",
            data: OrderSummary { id: order.id.clone(), status: order.status, created_at: order.created_at },
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub api_status: &'static str,
    pub telegram_configured: bool,
    pub telegram_admins: usize,
    pub timestamp: DateTime<Utc>,
    pub service: &'static str,
    pub version: &'static str,
    pub uptime: u64,
}

impl HealthResponse {
    /// The service itself is healthy as long as the upstream answers at all; an upstream error
    /// status only degrades `apiStatus`. Only an unreachable upstream marks the whole service
    /// unhealthy (and the endpoint answers 503).
    pub fn new(upstream: UpstreamHealth, telegram_configured: bool, telegram_admins: usize, uptime: u64) -> Self {
        let (status, api_status) = match upstream {
            UpstreamHealth::Healthy => ("healthy", "healthy"),
            UpstreamHealth::Unhealthy => ("healthy", "unhealthy"),
            UpstreamHealth::Unreachable => ("unhealthy", "unavailable"),
        };
        Self {
            status,
            api_status,
            telegram_configured,
            telegram_admins,
            timestamp: Utc::now(),
            service: "Vertex Exchange Gateway",
            version: env!("CARGO_PKG_VERSION"),
            uptime,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAdminResponse {
    pub success: bool,
    pub is_admin: bool,
    pub timestamp: DateTime<Utc>,
}

impl CheckAdminResponse {
    pub fn granted() -> Self {
        Self { success: true, is_admin: true, timestamp: Utc::now() }
    }
}
