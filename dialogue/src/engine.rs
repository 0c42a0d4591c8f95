//! Dialogue engine: one load→decide→save cycle per inbound message.
//!
//! Stage routing, reset handling, localized reply generation, and the
//! fire-and-forget lead notification live here. Cycles for the same session
//! key are serialized; different keys never block each other.

use std::collections::HashMap;
use std::sync::Arc;

use gbot_core::{
    Language, Lead, Notifier, Reply, Result, SessionRecord, SessionStore, Stage,
};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::content::{self, ContentConfig};

pub struct DialogueEngine {
    store: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    content: ContentConfig,
    // TODO: evict idle entries if a deployment ever sees unbounded key cardinality
    session_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl DialogueEngine {
    pub fn new(
        store: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
        content: ContentConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            content,
            session_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Handles one inbound message and returns the ordered replies.
    ///
    /// An empty session key or blank text is ignored: no state change, no
    /// reply. Only storage failure makes this return an error; everything
    /// else degrades to a fallback reply.
    #[instrument(skip(self, raw_text))]
    pub async fn handle(&self, session_key: &str, raw_text: &str) -> Result<Vec<Reply>> {
        let text = raw_text.trim();
        if session_key.trim().is_empty() || text.is_empty() {
            debug!("step: ignoring malformed update");
            return Ok(Vec::new());
        }

        // Serialize the load-modify-save cycle per session key so a duplicate
        // delivery can never revert a stage transition.
        let lock = self.session_lock(session_key).await;
        let _guard = lock.lock().await;

        let mut record = self.store.load(session_key).await?;
        info!(
            session_key = %session_key,
            stage = %record.stage.as_str(),
            "step: dialogue handling message"
        );

        if content::is_reset(text) {
            record.reset();
            self.store.save(&record).await?;
            info!(session_key = %session_key, "step: session reset to language selection");
            return Ok(vec![Reply::with_options(
                content::greeting(),
                content::language_options(),
            )]);
        }

        let previous_stage = record.stage;
        let replies = match record.stage {
            Stage::AwaitingLanguage => self.handle_language(&mut record, text),
            Stage::AwaitingName => self.handle_name(&mut record, text),
            Stage::AwaitingPhone => self.handle_phone(&mut record, text),
            Stage::MainMenu => self.handle_menu(&record, text),
        };

        self.store.save(&record).await?;

        // The lead is dispatched only after the record is durably in
        // MAIN_MENU, so it fires at most once per session.
        if previous_stage == Stage::AwaitingPhone && record.stage == Stage::MainMenu {
            self.dispatch_notify(&record);
        }

        Ok(replies)
    }

    async fn session_lock(&self, session_key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.session_locks.lock().await;
        locks.entry(session_key.to_string()).or_default().clone()
    }

    fn handle_language(&self, record: &mut SessionRecord, text: &str) -> Vec<Reply> {
        match content::match_language(text) {
            Some(lang) => {
                record.language = Some(lang);
                record.stage = Stage::AwaitingName;
                info!(language = lang.code(), "step: language selected");
                vec![Reply::text(content::name_prompt(lang))]
            }
            None => {
                debug!("step: unrecognized language selection");
                vec![Reply::with_options(
                    content::invalid_language(),
                    content::language_options(),
                )]
            }
        }
    }

    fn handle_name(&self, record: &mut SessionRecord, text: &str) -> Vec<Reply> {
        let lang = record.language.unwrap_or(Language::En);
        record.display_name = Some(text.to_string());
        record.stage = Stage::AwaitingPhone;
        info!("step: name captured");
        vec![Reply::text(content::phone_prompt(lang, text))]
    }

    fn handle_phone(&self, record: &mut SessionRecord, text: &str) -> Vec<Reply> {
        let lang = record.language.unwrap_or(Language::En);
        record.contact_phone = Some(text.to_string());
        record.stage = Stage::MainMenu;
        info!("step: phone captured, onboarding complete");
        vec![
            Reply::text(content::registration_complete(lang)),
            Reply::with_options(content::menu_prompt(lang), content::menu_options(lang)),
        ]
    }

    fn handle_menu(&self, record: &SessionRecord, text: &str) -> Vec<Reply> {
        let lang = record.language.unwrap_or(Language::En);
        let body = match content::match_menu(lang, text) {
            Some(item) => {
                debug!(item = ?item, "step: menu entry served");
                content::menu_reply(lang, item, &self.content)
            }
            None => {
                debug!("step: unrecognized menu input");
                content::menu_fallback(lang)
            }
        };
        vec![Reply::with_options(body, content::menu_options(lang))]
    }

    /// Fires the lead notification without blocking the reply path. Failures
    /// are logged and discarded; there is no retry.
    fn dispatch_notify(&self, record: &SessionRecord) {
        let (Some(name), Some(phone), Some(language)) = (
            record.display_name.clone(),
            record.contact_phone.clone(),
            record.language,
        ) else {
            warn!(session_key = %record.session_key, "Lead incomplete at menu transition, not notifying");
            return;
        };

        let lead = Lead {
            name,
            phone,
            language,
        };
        let notifier = Arc::clone(&self.notifier);
        let session_key = record.session_key.clone();

        tokio::spawn(async move {
            if let Err(e) = notifier.notify(&session_key, &lead).await {
                warn!(error = %e, session_key = %session_key, "Lead notification failed");
            }
        });
    }
}
