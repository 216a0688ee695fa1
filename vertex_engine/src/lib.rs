//! Vertex Exchange Engine
//!
//! Core logic for the Vertex exchange gateway, independent of the HTTP surface. It covers:
//! 1. Order intake: the order data types ([`mod@order_types`]), the accumulating validator
//!    ([`mod@validation`]) and the flat-file order store ([`mod@store`]).
//! 2. Upstream integrations: the Rapira market-data client ([`mod@rates`]) and the Telegram
//!    notification formatter and dispatcher ([`mod@telegram`]).
//!
//! Every outbound call carries a bounded timeout and is never retried; failures surface as typed
//! errors (rates) or as per-recipient outcomes (notifications) for the server to map onto its
//! response envelopes.

pub mod order_types;
pub mod rates;
pub mod store;
pub mod telegram;
pub mod validation;

pub use order_types::{NewOrder, Order, OrderStatus, TelegramUser};
pub use rates::{RateEntry, RatesApi, RatesApiError, RatesSnapshot, UpstreamHealth, TARGET_PAIR};
pub use store::{OrderStore, OrderStoreError};
pub use telegram::{
    format::{format_admin_message, format_user_message, OrderNotification, RateContext},
    DispatchReport,
    DispatchStats,
    SendOutcome,
    TelegramApi,
    TelegramApiError,
};
pub use validation::validate_order;
