use std::time::{Duration, Instant};

use actix_web::{
    dev::Server,
    http::KeepAlive,
    middleware::{DefaultHeaders, Logger},
    web,
    App,
    HttpServer,
};
use log::info;
use vertex_engine::{OrderStore, RatesApi, TelegramApi};

use crate::{config::ServerConfig, errors::ServerError, routes};

/// Process start marker; feeds the `uptime` field of the health endpoint.
#[derive(Clone, Copy, Debug)]
pub struct StartedAt(Instant);

impl StartedAt {
    pub fn now() -> Self {
        Self(Instant::now())
    }

    pub fn uptime_secs(&self) -> u64 {
        self.0.elapsed().as_secs()
    }
}

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let srv = create_server_instance(config)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig) -> Result<Server, ServerError> {
    let rates_api = web::Data::new(
        RatesApi::new(config.rates_api_url.as_str()).map_err(|e| ServerError::InitializeError(e.to_string()))?,
    );
    let telegram_api = web::Data::new(
        TelegramApi::new(config.telegram.bot_token.clone(), config.telegram.admin_chat_ids.clone())
            .map_err(|e| ServerError::InitializeError(e.to_string()))?,
    );
    if telegram_api.is_configured() {
        info!("📨 Telegram notifications are on ({} admin chats)", telegram_api.admin_count());
    } else {
        info!("⚠️ Telegram notifications are off (no token or no admin chats configured)");
    }
    let store = web::Data::new(OrderStore::new(config.orders_file.clone()));
    let started_at = web::Data::new(StartedAt::now());
    let (host, port) = (config.host.clone(), config.port);
    let config_data = web::Data::new(config);
    let srv = HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("vtx::access_log"))
            .wrap(cors_headers())
            .app_data(rates_api.clone())
            .app_data(telegram_api.clone())
            .app_data(store.clone())
            .app_data(started_at.clone())
            .app_data(config_data.clone())
            .app_data(web::JsonConfig::default().error_handler(|err, _| {
                ServerError::InvalidRequestBody(err.to_string()).into()
            }))
            .configure(routes::register)
            .default_service(web::route().to(routes::fallback))
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((host.as_str(), port))?
    .run();
    Ok(srv)
}

/// The original service is a public mini-app backend: CORS is deliberately open to all origins.
fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add((
            "Access-Control-Allow-Headers",
            "Origin, X-Requested-With, Content-Type, Accept, Authorization, Cache-Control, X-Telegram-User-Id",
        ))
        .add(("Access-Control-Allow-Methods", "GET, POST, OPTIONS"))
}
