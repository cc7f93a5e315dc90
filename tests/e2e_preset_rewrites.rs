//! End-to-end preset flows: key events in, rewritten surface text out.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use quillkey_engine::{
    KeyOutcome, ProviderSettings, ShortcutEngine, TracingNotifier, TranslationSettings,
    PROVIDER_SETTINGS_KEY,
};
use quillkey_insertion::CascadeDelays;
use quillkey_presets::{CustomTransformService, Preset, PresetKind, PresetManager};
use quillkey_providers::{FetchRelay, ProviderError, RelayData, RelayRequest};
use quillkey_shortcuts::KeyEvent;
use quillkey_storage::{set_doc, KeyValueStore, MemoryStore};
use quillkey_surface::{
    EditableSurface, EditorBehavior, Page, PageNode, RichEditor, TextField,
};
use quillkey_transforms::StyleId;

struct MockRelay {
    response: Mutex<serde_json::Value>,
    calls: Mutex<Vec<RelayRequest>>,
}

impl MockRelay {
    fn json(value: serde_json::Value) -> Arc<Self> {
        Arc::new(MockRelay {
            response: Mutex::new(value),
            calls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl FetchRelay for MockRelay {
    async fn fetch(&self, request: RelayRequest) -> Result<RelayData, ProviderError> {
        self.calls.lock().push(request);
        Ok(RelayData::Json(self.response.lock().clone()))
    }
}

fn engine_on(
    page: Page,
    store: Arc<MemoryStore>,
    relay: Arc<dyn FetchRelay>,
) -> ShortcutEngine {
    ShortcutEngine::with_delays(
        Arc::new(page),
        store,
        relay,
        Arc::new(TracingNotifier),
        CascadeDelays::none(),
    )
    .unwrap()
}

fn chord(key: &str, code: &str) -> KeyEvent {
    KeyEvent::new(key, code).with_modifiers(true, true, false, false)
}

#[tokio::test]
async fn e2e_static_transform_on_selection() {
    quillkey_common::init_logging();
    let store = Arc::new(MemoryStore::new());
    let manager = PresetManager::new(store.clone() as Arc<dyn KeyValueStore>);
    manager
        .add_preset(Preset::new(
            "Rot13",
            "Ctrl+Alt+R",
            PresetKind::StaticTransform {
                style: StyleId::Rot13,
            },
        ))
        .unwrap();

    let mut page = Page::new();
    let mut field = TextField::multi_line("Hello World");
    field.set_selection(6, 11);
    let (node, field) = PageNode::textarea(field);
    let index = page.add_node(node);
    page.focus(index);

    let engine = engine_on(page, store, MockRelay::json(serde_json::json!({})));
    let outcome = engine.handle_key_down(&chord("r", "KeyR")).await;

    assert_eq!(outcome, KeyOutcome::Intercepted);
    assert_eq!(field.lock().text(), "Hello Jbeyq");
}

#[tokio::test]
async fn e2e_two_key_sequence_triggers_preset() {
    let store = Arc::new(MemoryStore::new());
    let manager = PresetManager::new(store.clone() as Arc<dyn KeyValueStore>);
    manager
        .add_preset(Preset::new(
            "Flip",
            "Alt+T+1",
            PresetKind::StaticTransform {
                style: StyleId::UpsideDown,
            },
        ))
        .unwrap();

    let mut page = Page::new();
    let (node, field) = PageNode::text_input(TextField::single_line("hi"));
    let index = page.add_node(node);
    page.focus(index);

    let engine = engine_on(page, store, MockRelay::json(serde_json::json!({})));

    let first = KeyEvent::new("t", "KeyT").with_modifiers(false, true, false, false);
    assert_eq!(engine.handle_key_down(&first).await, KeyOutcome::PassThrough);

    let second = KeyEvent::new("1", "Digit1").with_modifiers(false, true, false, false);
    assert_eq!(engine.handle_key_down(&second).await, KeyOutcome::Intercepted);
    assert_ne!(field.lock().text(), "hi");
}

#[tokio::test]
async fn e2e_llm_preset_rewrites_rich_editor() {
    let store = Arc::new(MemoryStore::new());
    let mut settings = ProviderSettings::default();
    settings.llm_providers.insert(
        "openai-compatible".to_string(),
        quillkey_engine::LlmProviderSettings {
            base_url: "https://llm.example.com/v1".to_string(),
            api_key: Some("key".to_string()),
        },
    );
    set_doc(store.as_ref(), PROVIDER_SETTINGS_KEY, &settings).unwrap();

    let manager = PresetManager::new(store.clone() as Arc<dyn KeyValueStore>);
    manager
        .add_preset(Preset::new(
            "Rewrite",
            "Ctrl+Alt+W",
            PresetKind::LlmPrompt {
                prompt: "Rewrite: {{input}}".to_string(),
                provider: "openai-compatible".to_string(),
                model: "gpt-4o-mini".to_string(),
            },
        ))
        .unwrap();

    let relay = MockRelay::json(serde_json::json!({
        "choices": [{"message": {"content": "polished text"}}]
    }));

    let mut page = Page::new();
    let (node, editor) = PageNode::rich_editor(RichEditor::new(
        "rough draft",
        EditorBehavior::framework(),
    ));
    let index = page.add_node(node);
    page.focus(index);

    let engine = engine_on(page, store, relay.clone());
    assert_eq!(
        engine.handle_key_down(&chord("w", "KeyW")).await,
        KeyOutcome::Intercepted
    );

    assert_eq!(editor.lock().text(), "polished text");

    let calls = relay.calls.lock();
    assert_eq!(calls.len(), 1);
    let body = calls[0].body.clone().unwrap();
    assert_eq!(body["messages"][1]["content"], "Rewrite: rough draft");
}

#[tokio::test]
async fn e2e_translation_preset_uses_configured_provider() {
    let store = Arc::new(MemoryStore::new());
    let settings = ProviderSettings {
        translation: Some(TranslationSettings {
            provider: "deepl".to_string(),
            base_url: None,
            api_key: Some("key:fx".to_string()),
            model: None,
        }),
        llm_providers: HashMap::new(),
    };
    set_doc(store.as_ref(), PROVIDER_SETTINGS_KEY, &settings).unwrap();

    // Onboarding seeds "Translate to English" on Ctrl+Alt+T
    let relay = MockRelay::json(serde_json::json!({
        "translations": [{"text": "Hello", "detected_source_language": "ES"}]
    }));

    let mut page = Page::new();
    let (node, field) = PageNode::text_input(TextField::single_line("Hola"));
    let index = page.add_node(node);
    page.focus(index);

    let engine = engine_on(page, store, relay);
    engine.reload().await.unwrap();

    assert_eq!(
        engine.handle_key_down(&chord("t", "KeyT")).await,
        KeyOutcome::Intercepted
    );

    let field = field.lock();
    assert_eq!(field.text(), "Hello");
    // Full-content rewrite leaves the result selected
    assert_eq!(field.selection_range(), Some((0, 5)));
}

#[tokio::test]
async fn e2e_custom_transform_preset() {
    let store = Arc::new(MemoryStore::new());
    let custom = CustomTransformService::new(store.clone() as Arc<dyn KeyValueStore>);
    let mut map = HashMap::new();
    map.insert('o', "0".to_string());
    map.insert('e', "3".to_string());
    let transform = custom.create("Leetish", map).unwrap();

    let manager = PresetManager::new(store.clone() as Arc<dyn KeyValueStore>);
    manager
        .add_preset(Preset::new(
            "Leetish",
            "Ctrl+Alt+L",
            PresetKind::CustomTransform {
                transform_id: transform.id,
            },
        ))
        .unwrap();

    let mut page = Page::new();
    let (node, field) = PageNode::text_input(TextField::single_line("hello"));
    let index = page.add_node(node);
    page.focus(index);

    let engine = engine_on(page, store, MockRelay::json(serde_json::json!({})));
    assert_eq!(
        engine.handle_key_down(&chord("l", "KeyL")).await,
        KeyOutcome::Intercepted
    );
    assert_eq!(field.lock().text(), "h3ll0");
}

#[tokio::test]
async fn e2e_field_inside_shadow_host() {
    let store = Arc::new(MemoryStore::new());
    let manager = PresetManager::new(store.clone() as Arc<dyn KeyValueStore>);
    manager
        .add_preset(Preset::new(
            "Rot13",
            "Ctrl+Alt+R",
            PresetKind::StaticTransform {
                style: StyleId::Rot13,
            },
        ))
        .unwrap();

    let mut inner = Page::new();
    let (node, field) = PageNode::text_input(TextField::single_line("Deep"));
    let inner_index = inner.add_node(node);
    inner.focus(inner_index);

    let mut page = Page::new();
    let host_index = page.add_node(PageNode::shadow_host(inner));
    page.focus(host_index);

    let engine = engine_on(page, store, MockRelay::json(serde_json::json!({})));
    assert_eq!(
        engine.handle_key_down(&chord("r", "KeyR")).await,
        KeyOutcome::Intercepted
    );
    assert_eq!(field.lock().text(), "Qrrc");
}

#[tokio::test]
async fn e2e_pinned_preset_message_round_trip() {
    let store = Arc::new(MemoryStore::new());
    let manager = PresetManager::new(store.clone() as Arc<dyn KeyValueStore>);
    manager
        .add_preset(Preset::new(
            "Rot13",
            "Ctrl+Alt+R",
            PresetKind::StaticTransform {
                style: StyleId::Rot13,
            },
        ))
        .unwrap();

    let mut page = Page::new();
    let (node, field) = PageNode::text_input(TextField::single_line("abc"));
    let index = page.add_node(node);
    page.focus(index);

    let engine = engine_on(page, store, MockRelay::json(serde_json::json!({})));
    let response = engine.handle_trigger_message().await;
    assert!(response.success);
    assert!(response.error.is_none());
    assert_eq!(field.lock().text(), "nop");

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json, serde_json::json!({"success": true}));
}

#[tokio::test]
async fn e2e_double_transform_is_identity_for_self_inverse_styles() {
    let store = Arc::new(MemoryStore::new());
    let manager = PresetManager::new(store.clone() as Arc<dyn KeyValueStore>);
    manager
        .add_preset(Preset::new(
            "Rot13",
            "Ctrl+Alt+R",
            PresetKind::StaticTransform {
                style: StyleId::Rot13,
            },
        ))
        .unwrap();

    let mut page = Page::new();
    let (node, field) = PageNode::text_input(TextField::single_line("Round Trip"));
    let index = page.add_node(node);
    page.focus(index);

    let engine = engine_on(page, store, MockRelay::json(serde_json::json!({})));
    engine.handle_key_down(&chord("r", "KeyR")).await;
    engine.handle_key_up(&KeyEvent::new("r", "KeyR"));
    engine.handle_key_down(&chord("r", "KeyR")).await;

    assert_eq!(field.lock().text(), "Round Trip");
}
