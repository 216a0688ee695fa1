//! Notification text rendering.
//!
//! Two pure renderings of the same order: one for the admin chats, one for the submitting user.
//! Both produce a single HTML-markup block for the Telegram `sendMessage` call.

use chrono::Local;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use vertex_common::{Rub, Usdt};

use crate::order_types::TelegramUser;

/// Margin applied to the upstream bid when the client did not send a pre-computed rate.
pub const RATE_MARKUP: Decimal = dec!(0.98);

/// Rate context the client captured at submission time.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateContext {
    #[serde(default)]
    pub our_rate: Option<Decimal>,
    #[serde(default)]
    pub bid_price: Option<Decimal>,
    #[serde(default)]
    pub ask_price: Option<Decimal>,
}

impl RateContext {
    /// The rate shown in notifications: the pre-computed service rate when present, otherwise
    /// the marked-up bid, otherwise the raw ask.
    pub fn display_rate(&self) -> Option<Decimal> {
        self.our_rate.or_else(|| self.bid_price.map(|bid| bid * RATE_MARKUP)).or(self.ask_price)
    }
}

/// The payload of a notification request: the order fields plus the rate context the form was
/// showing when the user submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderNotification {
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub exchange_rate: Option<RateContext>,
    #[serde(default)]
    pub telegram_user: Option<TelegramUser>,
}

impl OrderNotification {
    fn display_rate(&self) -> Option<Decimal> {
        self.exchange_rate.as_ref().and_then(RateContext::display_rate)
    }

    /// The rouble total: the client's pre-computed figure, or amount × rate when it is missing.
    fn receive_total(&self) -> Option<Rub> {
        self.total_amount.map(Rub::from).or_else(|| {
            match (self.amount, self.display_rate()) {
                (Some(amount), Some(rate)) => Some(Usdt::from(amount).convert(rate)),
                _ => None,
            }
        })
    }
}

/// Human-readable labels for the payment method codes the form offers. Unknown codes pass
/// through verbatim.
pub fn payment_method_label(code: &str) -> &str {
    match code {
        "bank_card" => "💳 Банковская карта",
        "sberbank" => "🏦 Сбербанк Онлайн",
        "tinkoff" => "💙 Тинькофф",
        "yoomoney" => "💚 ЮMoney",
        "qiwi" => "🟠 QIWI",
        other => other,
    }
}

/// Render the notification sent to every admin chat.
pub fn format_admin_message(order: &OrderNotification) -> String {
    let mut message = String::from("📝 <b>Новая заявка на обмен валюты</b>\n\n");
    message.push_str(&format!("🆔 <b>Номер заявки:</b> #{}\n", order.order_id));
    message.push_str(&format!("👤 <b>Имя:</b> {}\n", order.name));
    message.push_str(&format!("📞 <b>Телефон:</b> {}\n", order.phone));

    if let Some(user) = &order.telegram_user {
        message.push_str("\n📱 <b>Telegram:</b>\n");
        message.push_str(&format!("   • ID: <code>{}</code>\n", user.id));
        if let Some(username) = &user.username {
            message.push_str(&format!("   • Username: @{username}\n"));
        }
    }

    message.push_str(&exchange_details(order));

    if let Some(comment) = order.comment.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        message.push_str(&format!("\n💬 <b>Комментарий:</b>\n{comment}\n"));
    }

    message.push_str(&format!("\n⏰ <b>Время:</b> {}\n", local_timestamp()));
    message
}

/// Render the confirmation sent back to the submitting user. Same order details, different
/// framing, and no Telegram identity block.
pub fn format_user_message(order: &OrderNotification) -> String {
    let mut message = String::from("✅ <b>Ваша заявка принята!</b>\n\n");
    message.push_str(&format!("🆔 <b>Номер заявки:</b> #{}\n", order.order_id));
    message.push_str(&format!("👤 <b>Имя:</b> {}\n", order.name));
    message.push_str(&format!("📞 <b>Телефон:</b> {}\n", order.phone));

    message.push_str(&exchange_details(order));

    if let Some(comment) = order.comment.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        message.push_str(&format!("\n💬 <b>Комментарий:</b>\n{comment}\n"));
    }

    message.push_str(&format!("\n⏰ <b>Время:</b> {}\n", local_timestamp()));
    message.push_str("\nМы свяжемся с вами в ближайшее время. Спасибо, что выбрали Vertex! 💫");
    message
}

fn exchange_details(order: &OrderNotification) -> String {
    let amount = order.amount.map(|a| Usdt::from(a).to_string()).unwrap_or_else(|| "—".to_string());
    let total = order.receive_total().map(|t| t.to_string()).unwrap_or_else(|| "—".to_string());
    let rate = order
        .display_rate()
        .map(|r| format!("{:.2} ₽", r.round_dp(2)))
        .unwrap_or_else(|| "—".to_string());
    let mut details = String::from("\n💰 <b>Детали обмена:</b>\n");
    details.push_str(&format!("   • Сумма: <b>{amount}</b>\n"));
    details.push_str(&format!("   • К получению: <b>{total}</b>\n"));
    details.push_str(&format!("   • Курс: <code>{rate}</code>\n"));
    details.push_str(&format!("   • Способ оплаты: {}\n", payment_method_label(&order.payment_method)));
    details
}

fn local_timestamp() -> String {
    Local::now().format("%d.%m.%Y, %H:%M:%S").to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    fn notification() -> OrderNotification {
        OrderNotification {
            order_id: "1724400000000".to_string(),
            name: "Иван".to_string(),
            phone: "+79991234567".to_string(),
            amount: Some(dec!(100)),
            total_amount: Some(dec!(7985)),
            payment_method: "sberbank".to_string(),
            comment: Some("вечером".to_string()),
            exchange_rate: Some(RateContext { our_rate: Some(dec!(79.85)), ..Default::default() }),
            telegram_user: Some(TelegramUser {
                id: 42,
                username: Some("ivan".to_string()),
                first_name: None,
            }),
        }
    }

    #[test]
    fn admin_message_carries_identity_and_details() {
        let text = format_admin_message(&notification());
        assert!(text.contains("Новая заявка"));
        assert!(text.contains("#1724400000000"));
        assert!(text.contains("<code>42</code>"));
        assert!(text.contains("@ivan"));
        assert!(text.contains("100 USDT"));
        assert!(text.contains("7 985.00 RUB"));
        assert!(text.contains("79.85 ₽"));
        assert!(text.contains("🏦 Сбербанк Онлайн"));
        assert!(text.contains("вечером"));
    }

    #[test]
    fn user_message_has_confirmation_framing_without_identity() {
        let text = format_user_message(&notification());
        assert!(text.contains("Ваша заявка принята"));
        assert!(!text.contains("<code>42</code>"));
        assert!(!text.contains("@ivan"));
        assert!(text.contains("7 985.00 RUB"));
    }

    #[test]
    fn rate_fallback_prefers_our_rate_then_marked_up_bid_then_ask() {
        let full = RateContext {
            our_rate: Some(dec!(79)),
            bid_price: Some(dec!(80)),
            ask_price: Some(dec!(81)),
        };
        assert_eq!(full.display_rate(), Some(dec!(79)));

        let bid_only = RateContext { our_rate: None, bid_price: Some(dec!(80)), ask_price: Some(dec!(81)) };
        assert_eq!(bid_only.display_rate(), Some(dec!(78.40)));

        let ask_only = RateContext { our_rate: None, bid_price: None, ask_price: Some(dec!(81)) };
        assert_eq!(ask_only.display_rate(), Some(dec!(81)));

        assert_eq!(RateContext::default().display_rate(), None);
    }

    #[test]
    fn missing_rate_context_renders_placeholders() {
        let mut order = notification();
        order.exchange_rate = None;
        order.total_amount = None;
        let text = format_admin_message(&order);
        assert!(text.contains("Курс: <code>—</code>"));
        assert!(text.contains("К получению: <b>—</b>"));
    }

    #[test]
    fn unknown_payment_codes_pass_through() {
        assert_eq!(payment_method_label("crypto_wallet"), "crypto_wallet");
        assert_eq!(payment_method_label("qiwi"), "🟠 QIWI");
    }

    #[test]
    fn total_is_computed_from_amount_and_rate_when_absent() {
        let mut order = notification();
        order.total_amount = None;
        assert_eq!(order.receive_total(), Some(Rub::from(dec!(7985))));
    }
}
