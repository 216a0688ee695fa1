use actix_web::http::StatusCode;

use super::helpers::TestContext;

#[actix_web::test]
async fn an_allowlisted_id_is_granted() {
    let ctx = TestContext::new();
    let (status, body) = ctx.get("/api/auth/check-admin", &[("x-telegram-user-id", "5124192112")]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["isAdmin"], true);
}

#[actix_web::test]
async fn a_missing_header_requires_auth() {
    let ctx = TestContext::new();
    let (status, body) = ctx.get("/api/auth/check-admin", &[]).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "AUTH_REQUIRED");
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn an_unknown_id_is_denied() {
    let ctx = TestContext::new();
    let (status, body) = ctx.get("/api/auth/check-admin", &[("x-telegram-user-id", "1234")]).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "ACCESS_DENIED");
}

#[actix_web::test]
async fn a_non_numeric_id_is_denied() {
    let ctx = TestContext::new();
    let (status, body) = ctx.get("/api/auth/check-admin", &[("x-telegram-user-id", "admin")]).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "ACCESS_DENIED");
}
