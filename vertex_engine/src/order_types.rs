use std::fmt::Display;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

//--------------------------------------   OrderStatus     -----------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// The order has been submitted and awaits manual processing. There is no further lifecycle:
    /// orders are never updated or removed by this system.
    #[default]
    Pending,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
        }
    }
}

//--------------------------------------   TelegramUser    -----------------------------------------------------------
/// Telegram identity of the submitter, as reported by the mini-app SDK. Field names follow the
/// Telegram wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
}

//--------------------------------------   NewOrder        -----------------------------------------------------------
/// An incoming order payload, exactly as submitted by the mini-app form. Nothing here is trusted
/// until it has passed [`crate::validation::validate_order`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub agreement: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram_user: Option<TelegramUser>,
}

//--------------------------------------   Order           -----------------------------------------------------------
/// A persisted order record. The submitted fields are flattened into the record so the orders
/// file keeps the original flat shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Creation time in epoch milliseconds, as a string. Unique in practice, with no hard
    /// guarantee under clock collisions.
    pub id: String,
    #[serde(flatten)]
    pub details: NewOrder,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
