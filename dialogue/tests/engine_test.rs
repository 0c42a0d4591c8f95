//! Integration tests for [`dialogue::DialogueEngine`].
//!
//! Covers: the full onboarding scenario, reset from any stage, idempotent
//! fallback in the terminal menu, verbatim field capture, malformed-input
//! no-op, and the exactly-once lead notification.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use dialogue::{ContentConfig, DialogueEngine};
use gbot_core::{Language, Lead, NoopNotifier, Notifier, SessionRecord, SessionStore, Stage};
use storage::MemorySessionStore;

/// Notifier that records every call for later assertions.
#[derive(Default)]
struct RecordingNotifier {
    calls: AtomicUsize,
    last: Mutex<Option<(String, Lead)>>,
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, session_key: &str, lead: &Lead) -> gbot_core::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((session_key.to_string(), lead.clone()));
        Ok(())
    }
}

fn new_engine() -> (Arc<MemorySessionStore>, Arc<RecordingNotifier>, DialogueEngine) {
    let store = Arc::new(MemorySessionStore::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let engine = DialogueEngine::new(
        store.clone(),
        notifier.clone(),
        ContentConfig::default(),
    );
    (store, notifier, engine)
}

/// The notify call runs on a spawned task; poll until it lands.
async fn wait_for_notify(notifier: &RecordingNotifier, expected: usize) {
    for _ in 0..100 {
        if notifier.calls.load(Ordering::SeqCst) == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!(
        "notify count never reached {expected}, got {}",
        notifier.calls.load(Ordering::SeqCst)
    );
}

async fn stage_of(store: &MemorySessionStore, key: &str) -> Stage {
    store.load(key).await.expect("load").stage
}

/// **Test: Full Persian onboarding scenario.**
///
/// **Setup:** Fresh session key.
/// **Action:** "/start" → "FA" → "Sara" → "0501234567".
/// **Expected:** Greeting with 4 language options; Persian name prompt;
/// personalized phone prompt; completion + 6 menu options; exactly one
/// notify carrying {Sara, 0501234567, fa}.
#[tokio::test]
async fn test_full_persian_scenario() {
    let (store, notifier, engine) = new_engine();

    let replies = engine.handle("chat-1", "/start").await.expect("handle");
    assert_eq!(replies.len(), 1);
    assert_eq!(
        replies[0].options,
        vec!["English", "فارسی", "العربية", "Русский"]
    );
    assert_eq!(stage_of(&store, "chat-1").await, Stage::AwaitingLanguage);

    let replies = engine.handle("chat-1", "FA").await.expect("handle");
    assert_eq!(replies.len(), 1);
    assert!(replies[0].text.contains("نام"));
    let record = store.load("chat-1").await.expect("load");
    assert_eq!(record.stage, Stage::AwaitingName);
    assert_eq!(record.language, Some(Language::Fa));

    let replies = engine.handle("chat-1", "Sara").await.expect("handle");
    assert_eq!(replies.len(), 1);
    assert!(replies[0].text.contains("Sara"));
    assert_eq!(stage_of(&store, "chat-1").await, Stage::AwaitingPhone);

    let replies = engine.handle("chat-1", "0501234567").await.expect("handle");
    assert_eq!(replies.len(), 2);
    assert!(replies[1].options.len() == 6);
    let record = store.load("chat-1").await.expect("load");
    assert_eq!(record.stage, Stage::MainMenu);
    assert_eq!(record.display_name.as_deref(), Some("Sara"));
    assert_eq!(record.contact_phone.as_deref(), Some("0501234567"));

    wait_for_notify(&notifier, 1).await;
    let (key, lead) = notifier.last.lock().unwrap().clone().expect("lead recorded");
    assert_eq!(key, "chat-1");
    assert_eq!(
        lead,
        Lead {
            name: "Sara".to_string(),
            phone: "0501234567".to_string(),
            language: Language::Fa,
        }
    );
}

/// **Test: Reset from MAIN_MENU clears every captured field.**
///
/// **Setup:** Fully captured English session persisted directly.
/// **Action:** "/start".
/// **Expected:** Stage AwaitingLanguage, no captured fields, reply carries
/// exactly the 4 language options.
#[tokio::test]
async fn test_reset_from_main_menu() {
    let (store, _notifier, engine) = new_engine();

    let mut record = SessionRecord::new("chat-2");
    record.stage = Stage::MainMenu;
    record.language = Some(Language::En);
    record.display_name = Some("X".to_string());
    record.contact_phone = Some("Y".to_string());
    store.save(&record).await.expect("seed");

    let replies = engine.handle("chat-2", "/start").await.expect("handle");
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].options.len(), 4);

    let record = store.load("chat-2").await.expect("load");
    assert_eq!(record.stage, Stage::AwaitingLanguage);
    assert!(record.language.is_none());
    assert!(record.display_name.is_none());
    assert!(record.contact_phone.is_none());
}

/// **Test: Unrecognized MAIN_MENU input is idempotent.**
///
/// **Setup:** English session in MAIN_MENU.
/// **Action:** Send "xyz-nonsense" twice.
/// **Expected:** Identical fallback replies; record unchanged both times.
#[tokio::test]
async fn test_unrecognized_menu_input_is_idempotent() {
    let (store, _notifier, engine) = new_engine();

    let mut record = SessionRecord::new("chat-3");
    record.stage = Stage::MainMenu;
    record.language = Some(Language::En);
    record.display_name = Some("Lena".to_string());
    record.contact_phone = Some("0501112233".to_string());
    store.save(&record).await.expect("seed");

    let first = engine.handle("chat-3", "xyz-nonsense").await.expect("handle");
    let after_first = store.load("chat-3").await.expect("load");
    let second = engine.handle("chat-3", "xyz-nonsense").await.expect("handle");
    let after_second = store.load("chat-3").await.expect("load");

    assert_eq!(first, second);
    assert_eq!(after_first, after_second);
    assert_eq!(after_second.stage, Stage::MainMenu);
    assert_eq!(after_second.display_name.as_deref(), Some("Lena"));
    assert_eq!(after_second.contact_phone.as_deref(), Some("0501112233"));
}

/// **Test: Captured name and phone survive menu traffic verbatim.**
///
/// **Setup:** Full English onboarding.
/// **Action:** Several recognized and unrecognized menu messages.
/// **Expected:** display_name and contact_phone unchanged in MAIN_MENU.
#[tokio::test]
async fn test_captured_fields_survive_menu_traffic() {
    let (store, _notifier, engine) = new_engine();

    engine.handle("chat-4", "/start").await.expect("handle");
    engine.handle("chat-4", "EN").await.expect("handle");
    engine.handle("chat-4", "Sara").await.expect("handle");
    engine.handle("chat-4", "0501234567").await.expect("handle");

    for text in ["Catalogs", "zzz", "Products", "??", "Delivery Areas & Times"] {
        engine.handle("chat-4", text).await.expect("handle");
    }

    let record = store.load("chat-4").await.expect("load");
    assert_eq!(record.stage, Stage::MainMenu);
    assert_eq!(record.display_name.as_deref(), Some("Sara"));
    assert_eq!(record.contact_phone.as_deref(), Some("0501234567"));
}

/// **Test: English MAIN_MENU serves catalogs, then falls back on nonsense.**
///
/// **Setup:** English session in MAIN_MENU.
/// **Action:** "Catalogs", then "xyz-nonsense".
/// **Expected:** Catalog reply contains the configured links and re-emits the
/// menu options; nonsense gets the English fallback plus options; stage
/// unchanged.
#[tokio::test]
async fn test_menu_catalogs_then_nonsense() {
    let (store, _notifier, engine) = new_engine();
    let config = ContentConfig::default();

    let mut record = SessionRecord::new("chat-5");
    record.stage = Stage::MainMenu;
    record.language = Some(Language::En);
    record.display_name = Some("Omar".to_string());
    record.contact_phone = Some("0500000000".to_string());
    store.save(&record).await.expect("seed");

    let replies = engine.handle("chat-5", "Catalogs").await.expect("handle");
    assert_eq!(replies.len(), 1);
    assert!(replies[0].text.contains(config.catalog_urls[0].as_str()));
    assert_eq!(replies[0].options.len(), 6);

    let replies = engine.handle("chat-5", "xyz-nonsense").await.expect("handle");
    assert_eq!(replies.len(), 1);
    assert!(replies[0].text.contains("choose an option"));
    assert_eq!(replies[0].options.len(), 6);
    assert_eq!(stage_of(&store, "chat-5").await, Stage::MainMenu);
}

/// **Test: Blank text or empty session key is a no-op.**
///
/// **Setup:** Fresh engine.
/// **Action:** Empty text, whitespace text, empty key.
/// **Expected:** No replies, nothing persisted.
#[tokio::test]
async fn test_blank_input_is_ignored() {
    let (store, _notifier, engine) = new_engine();

    assert!(engine.handle("chat-6", "").await.expect("handle").is_empty());
    assert!(engine.handle("chat-6", "   ").await.expect("handle").is_empty());
    assert!(engine.handle("", "hello").await.expect("handle").is_empty());
    assert!(engine.handle("  ", "hello").await.expect("handle").is_empty());

    assert!(store.is_empty().await);
}

/// **Test: Unrecognized language selection re-prompts without advancing.**
///
/// **Setup:** Fresh session.
/// **Action:** "/start", then "zzz".
/// **Expected:** Invalid-selection reply with the 4 options; stage still
/// AwaitingLanguage, no language stored.
#[tokio::test]
async fn test_invalid_language_reprompts() {
    let (store, _notifier, engine) = new_engine();

    engine.handle("chat-7", "/start").await.expect("handle");
    let replies = engine.handle("chat-7", "zzz").await.expect("handle");

    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].options.len(), 4);
    let record = store.load("chat-7").await.expect("load");
    assert_eq!(record.stage, Stage::AwaitingLanguage);
    assert!(record.language.is_none());
}

/// **Test: Notify fires exactly once, never again from menu traffic.**
///
/// **Setup:** Full English onboarding.
/// **Action:** Complete the flow, then keep talking in MAIN_MENU.
/// **Expected:** Notify count stays at 1.
#[tokio::test]
async fn test_notify_fires_exactly_once() {
    let (_store, notifier, engine) = new_engine();

    engine.handle("chat-8", "/start").await.expect("handle");
    engine.handle("chat-8", "EN").await.expect("handle");
    engine.handle("chat-8", "Dana").await.expect("handle");
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 0);

    engine.handle("chat-8", "0507654321").await.expect("handle");
    wait_for_notify(&notifier, 1).await;

    engine.handle("chat-8", "Catalogs").await.expect("handle");
    engine.handle("chat-8", "Products").await.expect("handle");
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
}

mod stage_property {
    use super::*;
    use proptest::prelude::*;

    fn rank(stage: Stage) -> u8 {
        match stage {
            Stage::AwaitingLanguage => 0,
            Stage::AwaitingName => 1,
            Stage::AwaitingPhone => 2,
            Stage::MainMenu => 3,
        }
    }

    fn any_input() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("/start".to_string()),
            Just("start".to_string()),
            Just("EN".to_string()),
            Just("فارسی".to_string()),
            Just("Sara".to_string()),
            Just("0501234567".to_string()),
            Just("Catalogs".to_string()),
            Just("   ".to_string()),
            "[a-z]{1,12}",
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Random input sequences never make the stage skip forward or move
        /// backward, except for the reset transition back to the start.
        #[test]
        fn stage_progresses_monotonically(inputs in proptest::collection::vec(any_input(), 1..25)) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("runtime");

            rt.block_on(async move {
                let store = Arc::new(MemorySessionStore::new());
                let engine = DialogueEngine::new(
                    store.clone(),
                    Arc::new(NoopNotifier),
                    ContentConfig::default(),
                );

                let mut previous = Stage::AwaitingLanguage;
                for input in &inputs {
                    engine.handle("prop-1", input).await.expect("handle");
                    let current = store.load("prop-1").await.expect("load").stage;

                    let stepped_forward = rank(current) >= rank(previous)
                        && rank(current) - rank(previous) <= 1;
                    let was_reset = current == Stage::AwaitingLanguage;
                    assert!(
                        stepped_forward || was_reset,
                        "stage jumped from {previous:?} to {current:?} on input {input:?}"
                    );
                    previous = current;
                }
            });
        }
    }
}
