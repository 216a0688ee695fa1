use std::{collections::HashSet, env};

use log::*;
use url::Url;
use vertex_common::{helpers::parse_id_list, Secret};

const DEFAULT_WEB_APP_URL: &str = "https://xcoinapp.ru";
const DEFAULT_ADMIN_APP_URL: &str = "https://xcoinapp.ru/admin";
/// Bootstrap admin used when `VTX_ADMIN_IDS` is not set at all.
const FALLBACK_ADMIN_ID: i64 = 5124192112;

#[derive(Clone, Debug)]
pub struct BotConfig {
    /// Bot credential. The bot refuses to start without one.
    pub bot_token: Secret,
    /// The mini app hosting the order form.
    pub web_app_url: Url,
    /// The admin panel mini app.
    pub admin_app_url: Url,
    /// Telegram user ids allowed to open the admin panel.
    pub admin_ids: HashSet<i64>,
}

impl BotConfig {
    /// Read the bot configuration from the environment. Only the token is mandatory; everything
    /// else has a usable default.
    pub fn from_env_or_default() -> Self {
        let bot_token = env::var("VTX_TELEGRAM_BOT_TOKEN").map(Secret::from).unwrap_or_default();
        let web_app_url = url_from_env("VTX_WEB_APP_URL", DEFAULT_WEB_APP_URL);
        let admin_app_url = url_from_env("VTX_ADMIN_APP_URL", DEFAULT_ADMIN_APP_URL);
        let admin_ids: HashSet<i64> = match env::var("VTX_ADMIN_IDS") {
            Ok(raw) => parse_id_list(&raw, "VTX_ADMIN_IDS").into_iter().collect(),
            Err(_) => {
                warn!("🪛️ VTX_ADMIN_IDS is not set. Falling back to the built-in admin id.");
                HashSet::from([FALLBACK_ADMIN_ID])
            },
        };
        Self { bot_token, web_app_url, admin_app_url, admin_ids }
    }

    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }

    /// The admin panel URL with the requesting admin's id attached.
    pub fn admin_url_for(&self, user_id: i64) -> Url {
        let mut url = self.admin_app_url.clone();
        url.query_pairs_mut().append_pair("admin_id", &user_id.to_string());
        url
    }

    /// The order form URL with the requesting user's id attached.
    pub fn order_url_for(&self, user_id: i64) -> Url {
        let mut url = self.web_app_url.clone();
        url.query_pairs_mut().append_pair("user_id", &user_id.to_string());
        url
    }
}

fn url_from_env(var: &str, default: &str) -> Url {
    let raw = env::var(var).ok().unwrap_or_else(|| default.to_string());
    Url::parse(&raw).unwrap_or_else(|e| {
        error!("🪛️ {raw} is not a valid URL for {var}. {e} Using the default, {default}, instead.");
        Url::parse(default).expect("the built-in default URL parses")
    })
}
