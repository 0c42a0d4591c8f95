//! Long-polling runner: feeds Telegram updates into the dialogue engine and
//! sends the replies back with HTML formatting and reply keyboards.

use std::sync::Arc;

use anyhow::Result;
use dialogue::DialogueEngine;
use teloxide::{prelude::*, types::ParseMode};
use tracing::{error, info, instrument};

use crate::adapters::{reply_keyboard, session_key_for};

/// Starts the long-polling loop with the given bot and engine. Each update is
/// handled on a spawned task so slow storage never blocks the poll loop;
/// non-text updates are ignored, and an engine failure means no reply is sent.
#[instrument(skip(bot, engine))]
pub async fn run_repl(bot: teloxide::Bot, engine: Arc<DialogueEngine>) -> Result<()> {
    teloxide::repl(bot, move |bot: Bot, msg: teloxide::types::Message| {
        let engine = Arc::clone(&engine);

        async move {
            let Some(text) = msg.text().map(ToOwned::to_owned) else {
                info!(chat_id = msg.chat.id.0, "Received non-text message");
                return Ok(());
            };

            let session_key = session_key_for(&msg);
            info!(
                chat_id = msg.chat.id.0,
                message_content = %text,
                "Received message"
            );

            tokio::spawn(async move {
                let replies = match engine.handle(&session_key, &text).await {
                    Ok(replies) => replies,
                    Err(e) => {
                        error!(error = %e, session_key = %session_key, "Dialogue handling failed");
                        return;
                    }
                };

                for reply in replies {
                    let mut request = bot
                        .send_message(msg.chat.id, reply.text.clone())
                        .parse_mode(ParseMode::Html);
                    if let Some(keyboard) = reply_keyboard(&reply) {
                        request = request.reply_markup(keyboard);
                    }
                    if let Err(e) = request.await {
                        error!(error = %e, chat_id = msg.chat.id.0, "Failed to send reply");
                    }
                }
            });

            Ok(())
        }
    })
    .await;

    Ok(())
}
