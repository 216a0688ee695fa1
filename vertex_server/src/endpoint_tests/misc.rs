use actix_web::{http::StatusCode, test::TestRequest};
use serde_json::json;

use super::helpers::TestContext;

#[actix_web::test]
async fn unknown_routes_get_the_404_envelope() {
    let ctx = TestContext::new();
    let (status, body) = ctx.get("/api/nope", &[]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "ENDPOINT_NOT_FOUND");
    assert_eq!(body["path"], "/api/nope");
}

#[actix_web::test]
async fn wrong_method_on_a_known_path_is_also_a_404() {
    let ctx = TestContext::new();
    let (status, body) = ctx.get("/api/orders", &[]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "ENDPOINT_NOT_FOUND");
}

#[actix_web::test]
async fn preflight_requests_are_accepted() {
    let ctx = TestContext::new();
    let (status, _) = ctx.call(TestRequest::with_uri("/api/orders").method(actix_web::http::Method::OPTIONS)).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn health_reports_an_unreachable_upstream_as_503() {
    let ctx = TestContext::new();
    let (status, body) = ctx.get("/api/health", &[]).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["apiStatus"], "unavailable");
    assert_eq!(body["telegramConfigured"], false);
}

#[actix_web::test]
async fn telegram_send_skips_when_the_bot_is_not_configured() {
    let ctx = TestContext::new();
    let (status, body) = ctx
        .post_json(
            "/api/telegram/send",
            json!({
                "orderId": "1724400000000",
                "name": "Иван",
                "phone": "+79991234567",
                "amount": 100,
                "totalAmount": 7985,
                "paymentMethod": "sberbank",
                "exchangeRate": {"ourRate": 79.85},
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["skipped"], true);
}
