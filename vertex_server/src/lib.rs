//! # Vertex exchange gateway server
//! The HTTP surface of the Vertex exchange funnel. It is responsible for:
//! Proxying live USDT/RUB quotes from the upstream market-data API.
//! Validating and persisting submitted exchange orders.
//! Fanning order notifications out to the admin Telegram chats.
//!
//! ## Configuration
//! The server is configured via `VTX_*` environment variables. See [config](config/index.html)
//! for more information.
//!
//! ## Routes
//! * `GET /api/rates`: live rates for the mini-app, polled by the browser client.
//! * `POST /api/orders`: validate and persist an exchange order.
//! * `POST /api/telegram/send`: dispatch the order notification fan-out.
//! * `GET /api/health`: liveness plus upstream reachability.
//! * `GET /api/auth/check-admin`: the admin allowlist gate.

pub mod auth;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
