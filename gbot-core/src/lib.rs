//! # gbot-core
//!
//! Core types and traits for the lead-capture bot: [`SessionStore`], [`Notifier`], session and
//! reply types, and tracing initialization. Transport-agnostic; used by dialogue, storage, and the
//! transport adapters.

pub mod error;
pub mod logger;
pub mod notify;
pub mod store;
pub mod types;

pub use error::{BotError, Result};
pub use logger::init_tracing;
pub use notify::{NoopNotifier, Notifier, WhatsAppNotifier};
pub use store::SessionStore;
pub use types::{Language, Lead, Reply, SessionRecord, Stage};
