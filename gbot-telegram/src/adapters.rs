//! Adapters between Telegram (teloxide) types and the dialogue engine's
//! transport-agnostic inputs and outputs.

use gbot_core::Reply;
use teloxide::types::{KeyboardButton, KeyboardMarkup, Message};

/// Session key for a Telegram conversation: the stringified chat id. Private
/// chats have one id per user, so this correlates all messages of one lead.
pub fn session_key_for(msg: &Message) -> String {
    msg.chat.id.0.to_string()
}

/// Renders quick-reply options as a resized reply keyboard, two buttons per
/// row. Returns None when the reply carries no options, so plain messages
/// keep whatever keyboard is already on screen.
pub fn reply_keyboard(reply: &Reply) -> Option<KeyboardMarkup> {
    if reply.options.is_empty() {
        return None;
    }

    let rows: Vec<Vec<KeyboardButton>> = reply
        .options
        .chunks(2)
        .map(|row| row.iter().map(|label| KeyboardButton::new(label.clone())).collect())
        .collect();

    Some(KeyboardMarkup::new(rows).resize_keyboard())
}
