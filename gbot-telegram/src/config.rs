//! Minimal Telegram adapter config: token, API URL, log path.
//! Loaded from the environment: BOT_TOKEN, TELEGRAM_API_URL, LOG_FILE.

use anyhow::Result;
use std::env;

/// Telegram connectivity config (token, optional API server override, log path).
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    pub log_file: Option<String>,
}

impl TelegramConfig {
    /// Loads from env: BOT_TOKEN required (overridden by `token` when given),
    /// TELEGRAM_API_URL and LOG_FILE optional.
    pub fn from_env(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").ok();
        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
        })
    }

    /// Builds the teloxide Bot, applying the custom API URL when set.
    pub fn build_bot(&self) -> Result<teloxide::Bot> {
        let mut bot = teloxide::Bot::new(self.bot_token.clone());
        if let Some(ref url_str) = self.telegram_api_url {
            let url = reqwest::Url::parse(url_str).map_err(|e| {
                anyhow::anyhow!("TELEGRAM_API_URL is set but not a valid URL: {e}")
            })?;
            bot = bot.set_api_url(url);
        }
        Ok(bot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_with_token_override() {
        let config = TelegramConfig::from_env(Some("test_token".to_string()))
            .expect("explicit token never fails");
        assert_eq!(config.bot_token, "test_token");
    }
}
