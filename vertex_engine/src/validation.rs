//! Order intake validation.
//!
//! All checks are evaluated independently and the error messages accumulate, so the client can
//! show everything that is wrong with the form in one round trip. Messages are the user-facing
//! Russian strings rendered verbatim by the mini-app.

use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::order_types::NewOrder;

pub const MIN_AMOUNT: Decimal = dec!(1);
pub const MAX_AMOUNT: Decimal = dec!(10000);

/// Russian phone format: optional `+`, country digit 7, then at least 10 more characters of
/// digits and common separators. Whitespace is stripped before matching.
fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?7[\d\s\-\(\)]{10,}$").unwrap())
}

/// Check an incoming order. An empty result means the order is acceptable.
pub fn validate_order(order: &NewOrder) -> Vec<String> {
    let mut errors = Vec::new();

    if order.name.trim().chars().count() < 2 {
        errors.push("Имя должно содержать минимум 2 символа".to_string());
    }

    let phone: String = order.phone.chars().filter(|c| !c.is_whitespace()).collect();
    if phone.is_empty() || !phone_regex().is_match(&phone) {
        errors.push("Некорректный формат телефона".to_string());
    }

    match order.amount {
        None => errors.push("Сумма должна быть от 1 до 10,000 USDT".to_string()),
        Some(amount) => {
            if amount < MIN_AMOUNT || amount > MAX_AMOUNT {
                errors.push("Сумма должна быть от 1 до 10,000 USDT".to_string());
            }
            if amount.normalize().scale() > 2 {
                errors.push("Максимум 2 знака после запятой".to_string());
            }
        },
    }

    if order.payment_method.is_empty() {
        errors.push("Необходимо выбрать способ оплаты".to_string());
    }

    if !order.agreement {
        errors.push("Необходимо согласие на обработку персональных данных".to_string());
    }

    errors
}
