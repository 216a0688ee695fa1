use actix_web::{http::StatusCode, test::TestRequest};
use serde_json::json;

use super::helpers::{valid_order_json, TestContext};

#[actix_web::test]
async fn a_valid_order_is_created_and_persisted() {
    let ctx = TestContext::new();
    let (status, body) = ctx.post_json("/api/orders", valid_order_json()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Заявка успешно создана");
    assert_eq!(body["data"]["status"], "pending");
    assert!(!body["data"]["id"].as_str().unwrap().is_empty());

    let stored = ctx.stored_orders();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["id"], body["data"]["id"]);
    assert_eq!(stored[0]["paymentMethod"], "sberbank");
}

#[actix_web::test]
async fn an_empty_payload_fails_every_check_and_persists_nothing() {
    let ctx = TestContext::new();
    let (status, body) = ctx.post_json("/api/orders", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["errors"].as_array().unwrap().len(), 5);
    assert!(ctx.stored_orders().is_empty());
}

#[actix_web::test]
async fn amount_above_the_cap_is_rejected_with_the_range_message() {
    let ctx = TestContext::new();
    let mut order = valid_order_json();
    order["amount"] = json!(10001);
    let (status, body) = ctx.post_json("/api/orders", order).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors, &vec![json!("Сумма должна быть от 1 до 10,000 USDT")]);
    assert!(ctx.stored_orders().is_empty());
}

#[actix_web::test]
async fn domestic_phones_are_normalized_before_validation() {
    let ctx = TestContext::new();
    let mut order = valid_order_json();
    order["phone"] = json!("89991234567");
    let (status, _) = ctx.post_json("/api/orders", order).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(ctx.stored_orders()[0]["phone"], "+79991234567");
}

#[actix_web::test]
async fn missing_agreement_is_rejected() {
    let ctx = TestContext::new();
    let mut order = valid_order_json();
    order["agreement"] = json!(false);
    let (status, body) = ctx.post_json("/api/orders", order).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]
        .as_array()
        .unwrap()
        .contains(&json!("Необходимо согласие на обработку персональных данных")));
}

#[actix_web::test]
async fn consecutive_orders_accumulate_in_the_store() {
    let ctx = TestContext::new();
    for _ in 0..3 {
        let (status, _) = ctx.post_json("/api/orders", valid_order_json()).await;
        assert_eq!(status, StatusCode::CREATED);
        // Order ids come from the millisecond clock.
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }
    let stored = ctx.stored_orders();
    assert_eq!(stored.len(), 3);
    assert!(stored.iter().all(|o| o["status"] == "pending"));
}

#[actix_web::test]
async fn malformed_json_gets_the_envelope_not_the_default_error() {
    let ctx = TestContext::new();
    let req = TestRequest::post()
        .uri("/api/orders")
        .insert_header(("content-type", "application/json"))
        .set_payload("{oops");
    let (status, body) = ctx.call(req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "Некорректный формат запроса");
}
