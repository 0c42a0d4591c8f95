//! # gbot-telegram
//!
//! Telegram transport layer: update → (session key, text) extraction, reply-keyboard rendering,
//! minimal config, long-polling runner. Handles only Telegram connectivity; all conversation
//! logic lives in the dialogue crate.

mod adapters;
mod config;
mod runner;

pub use adapters::{reply_keyboard, session_key_for};
pub use config::TelegramConfig;
pub use runner::run_repl;
