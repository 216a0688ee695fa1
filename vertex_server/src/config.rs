use std::{collections::HashSet, env, path::PathBuf};

use log::*;
use vertex_common::{helpers::parse_id_list, Secret};

const DEFAULT_VTX_HOST: &str = "0.0.0.0";
const DEFAULT_VTX_PORT: u16 = 3000;
const DEFAULT_RATES_API_URL: &str = "https://api.rapira.net/open/market/rates";
const DEFAULT_ORDERS_FILE: &str = "data/orders.json";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// The upstream market-data endpoint the rates proxy forwards from.
    pub rates_api_url: String,
    /// Path of the JSON file holding the persisted orders.
    pub orders_file: PathBuf,
    pub telegram: TelegramConfig,
    /// Static allowlist of Telegram user ids permitted through the admin gate. Immutable after
    /// startup.
    pub admin_ids: HashSet<i64>,
}

#[derive(Clone, Debug, Default)]
pub struct TelegramConfig {
    /// Bot credential. An empty token is a valid configuration: notification dispatch is then
    /// skipped rather than failed.
    pub bot_token: Secret,
    /// Admin chats that receive the order fan-out.
    pub admin_chat_ids: Vec<i64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_VTX_HOST.to_string(),
            port: DEFAULT_VTX_PORT,
            rates_api_url: DEFAULT_RATES_API_URL.to_string(),
            orders_file: PathBuf::from(DEFAULT_ORDERS_FILE),
            telegram: TelegramConfig::default(),
            admin_ids: HashSet::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env_or_default() -> Self {
        let host = env::var("VTX_HOST").ok().unwrap_or_else(|| DEFAULT_VTX_HOST.into());
        let port = env::var("VTX_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for VTX_PORT. {e} Using the default, {DEFAULT_VTX_PORT}, instead."
                    );
                    DEFAULT_VTX_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_VTX_PORT);
        let rates_api_url = env::var("VTX_RATES_API_URL").ok().unwrap_or_else(|| {
            info!("🪛️ VTX_RATES_API_URL is not set. Using the default Rapira endpoint.");
            DEFAULT_RATES_API_URL.into()
        });
        let orders_file = env::var("VTX_ORDERS_FILE").map(PathBuf::from).ok().unwrap_or_else(|| {
            info!("🪛️ VTX_ORDERS_FILE is not set. Orders will be saved to {DEFAULT_ORDERS_FILE}.");
            PathBuf::from(DEFAULT_ORDERS_FILE)
        });
        let telegram = TelegramConfig::from_env_or_default();
        let admin_ids: HashSet<i64> =
            parse_id_list(&env::var("VTX_ADMIN_IDS").unwrap_or_default(), "VTX_ADMIN_IDS").into_iter().collect();
        if admin_ids.is_empty() {
            warn!("🪛️ VTX_ADMIN_IDS is empty. Nobody will pass the admin gate.");
        }
        Self { host, port, rates_api_url, orders_file, telegram, admin_ids }
    }
}

impl TelegramConfig {
    pub fn from_env_or_default() -> Self {
        let bot_token = env::var("VTX_TELEGRAM_BOT_TOKEN").map(Secret::from).unwrap_or_else(|_| {
            warn!("🪛️ VTX_TELEGRAM_BOT_TOKEN is not set. Order notifications will be skipped.");
            Secret::default()
        });
        let admin_chat_ids = parse_id_list(
            &env::var("VTX_TELEGRAM_ADMIN_CHAT_IDS").unwrap_or_default(),
            "VTX_TELEGRAM_ADMIN_CHAT_IDS",
        );
        if !bot_token.is_empty() && admin_chat_ids.is_empty() {
            warn!("🪛️ VTX_TELEGRAM_ADMIN_CHAT_IDS is empty. Order notifications will be skipped.");
        }
        Self { bot_token, admin_chat_ids }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "0.0.0.0");
        assert!(config.telegram.bot_token.is_empty());
        assert!(config.admin_ids.is_empty());
    }
}
