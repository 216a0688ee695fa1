use actix_web::{body, http::StatusCode, test, test::TestRequest, web, App};
use serde_json::Value;
use tempfile::TempDir;
use vertex_engine::{OrderStore, RatesApi, TelegramApi};

use crate::{
    config::{ServerConfig, TelegramConfig},
    errors::ServerError,
    routes,
    server::StartedAt,
};

pub const TEST_ADMIN_ID: i64 = 5124192112;

/// A config pointing at a throwaway orders file, an unreachable rates upstream and an
/// unconfigured Telegram bot. Tests that need more override the fields.
pub struct TestContext {
    pub config: ServerConfig,
    _data_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        let data_dir = tempfile::tempdir().expect("could not create a temp dir");
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            // Nothing listens here; these tests never exercise the upstream.
            rates_api_url: "http://127.0.0.1:9/rates".to_string(),
            orders_file: data_dir.path().join("orders.json"),
            telegram: TelegramConfig::default(),
            admin_ids: [TEST_ADMIN_ID].into_iter().collect(),
        };
        Self { config, _data_dir: data_dir }
    }

    pub async fn get(&self, path: &str, headers: &[(&str, &str)]) -> (StatusCode, Value) {
        let mut req = TestRequest::get().uri(path);
        for (name, value) in headers {
            req = req.insert_header((*name, *value));
        }
        self.call(req).await
    }

    pub async fn post_json(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.call(TestRequest::post().uri(path).set_json(body)).await
    }

    /// Assemble the app the way `create_server_instance` does and run one request against it.
    pub async fn call(&self, req: TestRequest) -> (StatusCode, Value) {
        let app = App::new()
            .app_data(web::Data::new(OrderStore::new(self.config.orders_file.clone())))
            .app_data(web::Data::new(RatesApi::new(self.config.rates_api_url.as_str()).unwrap()))
            .app_data(web::Data::new(
                TelegramApi::new(
                    self.config.telegram.bot_token.clone(),
                    self.config.telegram.admin_chat_ids.clone(),
                )
                .unwrap(),
            ))
            .app_data(web::Data::new(StartedAt::now()))
            .app_data(web::Data::new(self.config.clone()))
            .app_data(
                web::JsonConfig::default()
                    .error_handler(|err, _| ServerError::InvalidRequestBody(err.to_string()).into()),
            )
            .configure(routes::register)
            .default_service(web::route().to(routes::fallback));
        let service = test::init_service(app).await;
        match test::try_call_service(&service, req.to_request()).await {
            Ok(res) => {
                let status = res.status();
                let bytes = test::read_body(res).await;
                (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
            },
            Err(e) => {
                let res = e.error_response();
                let status = res.status();
                let bytes = body::to_bytes(res.into_body()).await.expect("could not read error body");
                (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
            },
        }
    }

    /// The orders file as the next reader would see it.
    pub fn stored_orders(&self) -> Vec<Value> {
        match std::fs::read(&self.config.orders_file) {
            Ok(bytes) => serde_json::from_slice(&bytes).expect("orders file is not valid JSON"),
            Err(_) => Vec::new(),
        }
    }
}

pub fn valid_order_json() -> Value {
    serde_json::json!({
        "name": "Иван Петров",
        "phone": "+7 (999) 123-45-67",
        "amount": 150.5,
        "paymentMethod": "sberbank",
        "agreement": true,
    })
}
