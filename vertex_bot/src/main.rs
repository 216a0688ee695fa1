//! Telegram greeting bot for the Vertex exchange.
//!
//! Welcomes users, hands out web-app buttons that open the order form, and opens the admin
//! panel for allowlisted ids. Order capture itself lives in `vertex_server`; this process only
//! talks to end users.

use log::*;
use teloxide::{prelude::*, types::ChatKind};

use crate::{
    config::BotConfig,
    replies::{greeting, main_keyboard, web_app_button, ADMIN_BUTTON, ORDER_BUTTON},
};

mod config;
mod replies;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();
    let config = BotConfig::from_env_or_default();
    if config.bot_token.is_empty() {
        error!("🚨️ VTX_TELEGRAM_BOT_TOKEN is not set. The bot cannot start.");
        std::process::exit(1);
    }
    info!("🚀️ Starting the Vertex greeting bot");
    let bot = Bot::new(config.bot_token.reveal());
    teloxide::repl(bot, move |bot: Bot, msg: Message| {
        let config = config.clone();
        async move {
            if let Err(e) = handle_message(&bot, &msg, &config).await {
                error!("📨 Could not reply in chat {}: {e}", msg.chat.id);
            }
            respond(())
        }
    })
    .await;
}

async fn handle_message(bot: &Bot, msg: &Message, config: &BotConfig) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    // This bot only ever runs in private chats, where the chat id is the user id.
    let user_id = msg.chat.id.0;
    match text.trim() {
        "/start" => {
            let first_name = match &msg.chat.kind {
                ChatKind::Private(chat) => chat.first_name.as_deref(),
                _ => None,
            };
            bot.send_message(msg.chat.id, greeting(first_name))
                .reply_markup(main_keyboard(config, user_id))
                .await?;
        },
        "/order" => {
            bot.send_message(msg.chat.id, "📝 Открываю форму для заявки...")
                .reply_markup(web_app_button("📋 Заполнить заявку", config.web_app_url.clone()))
                .await?;
        },
        "/admin" => {
            if config.is_admin(user_id) {
                bot.send_message(msg.chat.id, "Открываю админ-панель...")
                    .reply_markup(web_app_button("⚙️ Админ-панель", config.admin_url_for(user_id)))
                    .await?;
            } else {
                debug!("👑 Admin panel refused for {user_id}");
                bot.send_message(msg.chat.id, "⛔ У вас нет доступа к админ-панели.").await?;
            }
        },
        "/help" => {
            bot.send_message(msg.chat.id, "Нажмите /start для начала работы").await?;
        },
        ORDER_BUTTON => {
            bot.send_message(msg.chat.id, "📝 Открываю форму для заявки...")
                .reply_markup(web_app_button("📋 Заполнить заявку", config.order_url_for(user_id)))
                .await?;
        },
        ADMIN_BUTTON => {
            if config.is_admin(user_id) {
                bot.send_message(msg.chat.id, "👑 Открываю админ-панель...")
                    .reply_markup(web_app_button("⚙️ Админ-панель", config.admin_app_url.clone()))
                    .await?;
            } else {
                bot.send_message(msg.chat.id, "⛔ Доступ запрещен!").await?;
            }
        },
        _ => {},
    }
    Ok(())
}
