//! Message texts and keyboards. The texts match the public service word for word.

use teloxide::types::{
    ButtonRequest,
    InlineKeyboardButton,
    InlineKeyboardMarkup,
    KeyboardButton,
    KeyboardMarkup,
    WebAppInfo,
};
use url::Url;

use crate::config::BotConfig;

pub const ORDER_BUTTON: &str = "📝 Оставить заявку";
pub const ADMIN_BUTTON: &str = "👑 Админ-панель";

pub fn greeting(first_name: Option<&str>) -> String {
    let name = first_name.unwrap_or("друг");
    format!(
        "🌟 Добро пожаловать в Vertex, {name}! 🌟\n\n\
         Vertex — это надежный сервис для мгновенного обмена USDT на рубли с лучшим курсом на рынке!\n\n\
         🚀 Как начать:\n\
         1. Нажмите кнопку \"Оставить заявку\"\n\
         2. Заполните форму на нашем сайте\n\
         3. Получите реквизиты для перевода\n\
         4. Совершите обмен за 5-15 минут!\n\n\
         Наши гарантии:\n\
         ✅ Безопасность сделок\n\
         ✅ Мгновенный вывод\n\
         ✅ Поддержка 24/7"
    )
}

/// The persistent reply keyboard. Admins get an extra row with the admin panel on top.
pub fn main_keyboard(config: &BotConfig, user_id: i64) -> KeyboardMarkup {
    let mut rows = vec![
        vec![KeyboardButton::new(ORDER_BUTTON)
            .request(ButtonRequest::WebApp(WebAppInfo { url: config.web_app_url.clone() }))],
        vec![KeyboardButton::new("/start")],
    ];
    if config.is_admin(user_id) {
        rows.insert(
            0,
            vec![KeyboardButton::new(ADMIN_BUTTON)
                .request(ButtonRequest::WebApp(WebAppInfo { url: config.admin_url_for(user_id) }))],
        );
    }
    KeyboardMarkup::new(rows).resize_keyboard()
}

/// A single inline button that opens a mini app.
pub fn web_app_button(label: &str, url: Url) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[InlineKeyboardButton::web_app(label, WebAppInfo { url })]])
}
