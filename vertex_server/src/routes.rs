//! Request handler definitions
//!
//! Every handler converts its own failures into a [`ServerError`] locally, so the status code
//! and error envelope are decided in exactly one place ([`crate::errors`]). Handlers stay
//! async all the way down: the store, the rates client and the Telegram dispatcher all await
//! their I/O, so a stalled upstream never blocks a worker thread.

use actix_web::{http::Method, web, HttpRequest, HttpResponse};
use chrono::Utc;
use log::*;
use serde_json::json;
use vertex_engine::{
    format_admin_message,
    format_user_message,
    validate_order,
    NewOrder,
    OrderNotification,
    OrderStore,
    RatesApi,
    TelegramApi,
    UpstreamHealth,
};

use vertex_common::helpers::normalize_phone;

use crate::{
    auth::{check_admin, ADMIN_ID_HEADER},
    config::ServerConfig,
    data_objects::{CheckAdminResponse, HealthResponse, OrderCreatedResponse, RatesResponse},
    errors::ServerError,
    server::StartedAt,
};

/// Register every API route. Unmatched paths (and unmatched methods on matched paths) fall
/// through to [`fallback`].
pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/rates", web::get().to(get_rates))
        .route("/api/orders", web::post().to(create_order))
        .route("/api/telegram/send", web::post().to(telegram_send))
        .route("/api/health", web::get().to(health))
        .route("/api/auth/check-admin", web::get().to(auth_check_admin));
}

// ----------------------------------------------   Rates   ----------------------------------------------------
pub async fn get_rates(api: web::Data<RatesApi>) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received rates request");
    let snapshot = api.fetch_rates().await?;
    Ok(HttpResponse::Ok().json(RatesResponse::new(snapshot)))
}

// ----------------------------------------------   Orders   ---------------------------------------------------
pub async fn create_order(
    store: web::Data<OrderStore>,
    body: web::Json<NewOrder>,
) -> Result<HttpResponse, ServerError> {
    let mut new_order = body.into_inner();
    // Domestic 8-prefixed and bare numbers are brought to +7 form before validation.
    new_order.phone = normalize_phone(&new_order.phone);
    let errors = validate_order(&new_order);
    if !errors.is_empty() {
        debug!("💻️ Order rejected by validation: {}", errors.join("; "));
        return Err(ServerError::ValidationError(errors));
    }
    let order = store.append(new_order).await?;
    info!("✅ Order #{} accepted", order.id);
    Ok(HttpResponse::Created().json(OrderCreatedResponse::new(&order)))
}

// ----------------------------------------------   Telegram   -------------------------------------------------
pub async fn telegram_send(
    api: web::Data<TelegramApi>,
    body: web::Json<OrderNotification>,
) -> Result<HttpResponse, ServerError> {
    let notification = body.into_inner();
    if !api.is_configured() {
        return Ok(HttpResponse::Ok().json(json!({
            "success": false,
            "message": "Telegram Bot не настроен",
            "skipped": true,
        })));
    }
    let admin_text = format_admin_message(&notification);
    let user = notification.telegram_user.as_ref().map(|u| (u.id, format_user_message(&notification)));
    let report = api.send_to_all(&admin_text, user).await;
    let message = if report.success {
        "Сообщение успешно отправлено администраторам"
    } else {
        "Не удалось отправить сообщение администраторам"
    };
    info!(
        "📨 Notification for order #{}: {}/{} admin sends succeeded",
        notification.order_id, report.stats.successful, report.stats.total_admins
    );
    Ok(HttpResponse::Ok().json(json!({
        "success": report.success,
        "message": message,
        "stats": report.stats,
        "adminResults": report.admin_results,
        "clientResult": report.client_result,
        "timestamp": Utc::now(),
    })))
}

// ----------------------------------------------   Health   ---------------------------------------------------
pub async fn health(
    api: web::Data<RatesApi>,
    telegram: web::Data<TelegramApi>,
    started_at: web::Data<StartedAt>,
) -> HttpResponse {
    trace!("💻️ Received health check request");
    let upstream = api.ping().await;
    let response = HealthResponse::new(
        upstream,
        telegram.is_configured(),
        telegram.admin_count(),
        started_at.uptime_secs(),
    );
    if upstream == UpstreamHealth::Unreachable {
        HttpResponse::ServiceUnavailable().json(response)
    } else {
        HttpResponse::Ok().json(response)
    }
}

// ----------------------------------------------   Auth   -----------------------------------------------------
pub async fn auth_check_admin(
    req: HttpRequest,
    config: web::Data<ServerConfig>,
) -> Result<HttpResponse, ServerError> {
    let header = req.headers().get(ADMIN_ID_HEADER).and_then(|v| v.to_str().ok());
    let id = check_admin(header, &config.admin_ids)?;
    debug!("💻️ Admin access granted to {id}");
    Ok(HttpResponse::Ok().json(CheckAdminResponse::granted()))
}

// ----------------------------------------------   Fallback   -------------------------------------------------
/// Default service: answers CORS preflights and renders the 404 envelope for everything else.
pub async fn fallback(req: HttpRequest) -> HttpResponse {
    if req.method() == Method::OPTIONS {
        return HttpResponse::Ok().finish();
    }
    debug!("💻️ No route for {} {}", req.method(), req.path());
    HttpResponse::NotFound().json(json!({
        "success": false,
        "error": "ENDPOINT_NOT_FOUND",
        "message": "Запрашиваемый эндпоинт не найден",
        "path": req.path(),
        "timestamp": Utc::now(),
    }))
}
