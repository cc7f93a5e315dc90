//! Shortcut orchestrator
//!
//! Ties detection, preset lookup, processing, and verified insertion into
//! one flow. A trigger runs at most once at a time; chords arriving while
//! one is in flight are swallowed rather than queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tracing::{debug, info, warn};

use tokio::sync::broadcast::error::RecvError;

use quillkey_insertion::{CascadeDelays, InsertionCascade};
use quillkey_presets::manager::PRESETS_KEY;
use quillkey_presets::{Preset, PresetManager, PresetRegistry, PresetsSettings};
use quillkey_providers::FetchRelay;
use quillkey_shortcuts::{KeyEvent, SequenceDetector};
use quillkey_storage::KeyValueStore;
use quillkey_surface::{SurfaceHandle, SurfaceLocator};

use crate::error::EngineError;
use crate::router::ProcessingRouter;
use crate::settings::PROVIDER_SETTINGS_KEY;

/// Sink for failures the user should see
pub trait UserNotifier: Send + Sync {
    fn notify_error(&self, message: &str);
}

/// Notifier that only logs
pub struct TracingNotifier;

impl UserNotifier for TracingNotifier {
    fn notify_error(&self, message: &str) {
        warn!(message, "rewrite failed");
    }
}

/// Orchestrator phase, observable for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    Idle,
    Matching,
    Processing,
    Inserting,
}

/// What the engine did with a key-down event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// No preset matched; let the host handle the event
    PassThrough,
    /// A preset matched and a trigger ran; the event must be suppressed
    Intercepted,
    /// A preset matched but a trigger was already in flight; the event is
    /// suppressed and the chord discarded
    Dropped,
}

/// Where the trigger took its text from
enum TextSource {
    /// Selection inside the focused surface, or a page-level selection
    Selection(SurfaceHandle, String),
    /// Entire content of the focused surface
    FullContent(SurfaceHandle, String),
}

/// Reply to the out-of-band pinned-preset trigger message
#[derive(Debug, Clone, Serialize)]
pub struct TriggerResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

struct FlightGuard<'a> {
    flag: &'a AtomicBool,
    phase: &'a RwLock<EnginePhase>,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        *self.phase.write() = EnginePhase::Idle;
        self.flag.store(false, Ordering::Release);
    }
}

/// The preset-driven rewrite engine
pub struct ShortcutEngine {
    locator: Arc<dyn SurfaceLocator>,
    store: Arc<dyn KeyValueStore>,
    manager: PresetManager,
    router: ProcessingRouter,
    cascade: InsertionCascade,
    detector: Mutex<SequenceDetector>,
    registry: RwLock<Arc<PresetRegistry>>,
    settings: RwLock<PresetsSettings>,
    phase: RwLock<EnginePhase>,
    in_flight: AtomicBool,
    notifier: Arc<dyn UserNotifier>,
}

impl ShortcutEngine {
    /// Build the engine from stored settings. Call [`reload`](Self::reload)
    /// afterwards to configure the shared translation provider; presets
    /// that do not translate work without it.
    pub fn new(
        locator: Arc<dyn SurfaceLocator>,
        store: Arc<dyn KeyValueStore>,
        relay: Arc<dyn FetchRelay>,
        notifier: Arc<dyn UserNotifier>,
    ) -> Result<Self, EngineError> {
        Self::with_delays(locator, store, relay, notifier, CascadeDelays::standard())
    }

    pub fn with_delays(
        locator: Arc<dyn SurfaceLocator>,
        store: Arc<dyn KeyValueStore>,
        relay: Arc<dyn FetchRelay>,
        notifier: Arc<dyn UserNotifier>,
        delays: CascadeDelays,
    ) -> Result<Self, EngineError> {
        let manager = PresetManager::new(store.clone());
        let settings = manager.load()?;
        let registry = Arc::new(PresetRegistry::build(&settings.presets)?);
        info!(presets = settings.presets.len(), "engine ready");

        Ok(ShortcutEngine {
            locator,
            manager,
            router: ProcessingRouter::new(store.clone(), relay),
            store,
            cascade: InsertionCascade::new(delays),
            detector: Mutex::new(SequenceDetector::new()),
            registry: RwLock::new(registry),
            settings: RwLock::new(settings),
            phase: RwLock::new(EnginePhase::Idle),
            in_flight: AtomicBool::new(false),
            notifier,
        })
    }

    /// Reload presets and provider settings from the store and swap in a
    /// freshly built registry snapshot.
    pub async fn reload(&self) -> Result<(), EngineError> {
        let settings = self.manager.load()?;
        let registry = Arc::new(PresetRegistry::build(&settings.presets)?);
        debug!(presets = settings.presets.len(), "registry rebuilt");
        *self.registry.write() = registry;
        *self.settings.write() = settings;
        self.router.reload().await
    }

    /// Drive reloads from store change notifications. Runs until the store
    /// drops its sender side. A lagged receiver reloads unconditionally
    /// since the missed changes may have touched either document.
    pub async fn watch_store(&self) {
        let mut changes = self.store.subscribe();
        loop {
            match changes.recv().await {
                Ok(change) if change.key == PRESETS_KEY || change.key == PROVIDER_SETTINGS_KEY => {
                    if let Err(e) = self.reload().await {
                        warn!(error = %e, "settings reload failed");
                    }
                }
                Ok(_) => {}
                Err(RecvError::Lagged(_)) => {
                    if let Err(e) = self.reload().await {
                        warn!(error = %e, "settings reload failed");
                    }
                }
                Err(RecvError::Closed) => break,
            }
        }
    }

    /// Feed a key-down event through detection and, on a match, run the
    /// full trigger before returning so the caller knows whether to
    /// suppress the event.
    pub async fn handle_key_down(&self, event: &KeyEvent) -> KeyOutcome {
        let candidate = match self.detector.lock().process_key_down(event) {
            Some(candidate) => candidate,
            None => return KeyOutcome::PassThrough,
        };

        let preset = match self.registry.read().lookup(&candidate) {
            Some(preset) => preset.clone(),
            None => return KeyOutcome::PassThrough,
        };

        // Matched: the chord is consumed whether or not the trigger runs
        self.detector.lock().reset();

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            debug!(shortcut = %candidate, "trigger already in flight, dropping");
            return KeyOutcome::Dropped;
        }
        let _guard = FlightGuard {
            flag: &self.in_flight,
            phase: &self.phase,
        };
        *self.phase.write() = EnginePhase::Matching;

        info!(preset = %preset.display_name, shortcut = %candidate, "shortcut matched");
        if let Err(e) = self.run_preset(&preset).await {
            match e {
                EngineError::NoEditableTarget | EngineError::NoText => {
                    debug!(preset = %preset.display_name, "nothing to rewrite, skipping")
                }
                e => self.notifier.notify_error(&e.to_string()),
            }
        }
        KeyOutcome::Intercepted
    }

    /// Key releases only feed the detector's reset logic
    pub fn handle_key_up(&self, event: &KeyEvent) {
        self.detector.lock().process_key_up(event);
    }

    /// Where the engine currently is in the trigger lifecycle
    pub fn phase(&self) -> EnginePhase {
        *self.phase.read()
    }

    /// Run the pinned preset without a keyboard event
    pub async fn trigger_pinned(&self) -> Result<(), EngineError> {
        let preset = self
            .settings
            .read()
            .pinned_preset()
            .cloned()
            .ok_or(EngineError::NoPreset)?;

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(EngineError::Busy);
        }
        let _guard = FlightGuard {
            flag: &self.in_flight,
            phase: &self.phase,
        };

        info!(preset = %preset.display_name, "pinned preset triggered");
        self.run_preset(&preset).await
    }

    /// Answer the out-of-band trigger message
    pub async fn handle_trigger_message(&self) -> TriggerResponse {
        match self.trigger_pinned().await {
            Ok(()) => TriggerResponse {
                success: true,
                error: None,
            },
            Err(e) => {
                self.notifier.notify_error(&e.to_string());
                TriggerResponse {
                    success: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Highest-priority available text source: selection inside the
    /// focused surface, then its full content, then the page selection.
    fn capture_text(&self) -> Result<TextSource, EngineError> {
        if let Some(handle) = self.locator.focused_surface() {
            if handle.has_selection() {
                return Ok(TextSource::Selection(handle.clone(), handle.selected_text()));
            }
            let text = handle.text();
            if !text.is_empty() {
                return Ok(TextSource::FullContent(handle, text));
            }
        }
        if let Some(handle) = self.locator.page_selection() {
            let text = handle.selected_text();
            if !text.is_empty() {
                return Ok(TextSource::Selection(handle, text));
            }
        }
        Err(EngineError::NoEditableTarget)
    }

    async fn run_preset(&self, preset: &Preset) -> Result<(), EngineError> {
        let source = self.capture_text()?;
        let input = match &source {
            TextSource::Selection(_, text) | TextSource::FullContent(_, text) => text.clone(),
        };
        if input.trim().is_empty() {
            return Err(EngineError::NoText);
        }

        *self.phase.write() = EnginePhase::Processing;
        let output = self.router.process(preset, &input).await?;

        *self.phase.write() = EnginePhase::Inserting;
        match source {
            TextSource::Selection(handle, _) => {
                self.cascade.replace_selection(&handle, &output).await?;
            }
            TextSource::FullContent(handle, _) => {
                self.cascade.replace_all(&handle, &output).await?;
                // Leave the rewritten content selected so an immediate
                // second shortcut operates on all of it
                handle.select_all();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quillkey_presets::PresetKind;
    use quillkey_providers::{ProviderError, RelayData, RelayRequest};
    use quillkey_storage::MemoryStore;
    use quillkey_surface::{EditableSurface, Page, PageNode, SelectionRegion, TextField};
    use quillkey_transforms::StyleId;

    struct NullRelay;

    #[async_trait]
    impl FetchRelay for NullRelay {
        async fn fetch(&self, _request: RelayRequest) -> Result<RelayData, ProviderError> {
            Err(ProviderError::Transport("no network in tests".to_string()))
        }
    }

    struct RecordingNotifier {
        messages: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        fn new() -> Arc<Self> {
            Arc::new(RecordingNotifier {
                messages: Mutex::new(Vec::new()),
            })
        }
    }

    impl UserNotifier for RecordingNotifier {
        fn notify_error(&self, message: &str) {
            self.messages.lock().push(message.to_string());
        }
    }

    fn seed_rot13_preset(store: &Arc<MemoryStore>) {
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
    }

    fn engine_on(
        page: Page,
        store: Arc<MemoryStore>,
        notifier: Arc<dyn UserNotifier>,
    ) -> ShortcutEngine {
        ShortcutEngine::with_delays(
            Arc::new(page),
            store,
            Arc::new(NullRelay),
            notifier,
            CascadeDelays::none(),
        )
        .unwrap()
    }

    fn chord_r() -> KeyEvent {
        KeyEvent::new("r", "KeyR").with_modifiers(true, true, false, false)
    }

    #[tokio::test]
    async fn test_matched_chord_rewrites_selection() {
        let store = Arc::new(MemoryStore::new());
        seed_rot13_preset(&store);

        let mut page = Page::new();
        let mut field = TextField::single_line("Hello World");
        field.set_selection(0, 5);
        let (node, field) = PageNode::text_input(field);
        let index = page.add_node(node);
        page.focus(index);

        let engine = engine_on(page, store, Arc::new(TracingNotifier));
        let outcome = engine.handle_key_down(&chord_r()).await;
        assert_eq!(outcome, KeyOutcome::Intercepted);
        assert_eq!(field.lock().text(), "Uryyb World");
    }

    #[tokio::test]
    async fn test_full_content_rewrite_selects_result() {
        let store = Arc::new(MemoryStore::new());
        seed_rot13_preset(&store);

        let mut page = Page::new();
        let (node, field) = PageNode::text_input(TextField::single_line("Hello"));
        let index = page.add_node(node);
        page.focus(index);

        let engine = engine_on(page, store, Arc::new(TracingNotifier));
        assert_eq!(engine.handle_key_down(&chord_r()).await, KeyOutcome::Intercepted);

        let field = field.lock();
        assert_eq!(field.text(), "Uryyb");
        assert_eq!(field.selection_range(), Some((0, 5)));
    }

    #[tokio::test]
    async fn test_unbound_chord_passes_through() {
        let store = Arc::new(MemoryStore::new());
        seed_rot13_preset(&store);

        let mut page = Page::new();
        let (node, field) = PageNode::text_input(TextField::single_line("Hello"));
        let index = page.add_node(node);
        page.focus(index);

        let engine = engine_on(page, store, Arc::new(TracingNotifier));
        let unbound = KeyEvent::new("z", "KeyZ").with_modifiers(true, true, false, false);
        assert_eq!(engine.handle_key_down(&unbound).await, KeyOutcome::PassThrough);
        assert_eq!(field.lock().text(), "Hello");
    }

    #[tokio::test]
    async fn test_no_target_is_silent() {
        let store = Arc::new(MemoryStore::new());
        seed_rot13_preset(&store);

        let notifier = RecordingNotifier::new();
        let engine = engine_on(Page::new(), store, notifier.clone());
        assert_eq!(engine.handle_key_down(&chord_r()).await, KeyOutcome::Intercepted);

        assert!(notifier.messages.lock().is_empty());
        assert_eq!(engine.phase(), EnginePhase::Idle);
    }

    #[tokio::test]
    async fn test_page_selection_is_last_resort() {
        let store = Arc::new(MemoryStore::new());
        seed_rot13_preset(&store);

        let page = Page::new();
        page.set_page_selection(SelectionRegion::selected("Hello"));

        let engine = engine_on(page, store, Arc::new(TracingNotifier));
        assert_eq!(engine.handle_key_down(&chord_r()).await, KeyOutcome::Intercepted);
    }

    #[tokio::test]
    async fn test_trigger_pinned_runs_latest_added_preset() {
        let store = Arc::new(MemoryStore::new());
        seed_rot13_preset(&store);

        let mut page = Page::new();
        let (node, field) = PageNode::text_input(TextField::single_line("abc"));
        let index = page.add_node(node);
        page.focus(index);

        let engine = engine_on(page, store, Arc::new(TracingNotifier));
        engine.trigger_pinned().await.unwrap();
        assert_eq!(field.lock().text(), "nop");
    }

    #[tokio::test]
    async fn test_trigger_message_reports_failure() {
        let store = Arc::new(MemoryStore::new());
        seed_rot13_preset(&store);

        let engine = engine_on(Page::new(), store, RecordingNotifier::new());
        let response = engine.handle_trigger_message().await;
        assert!(!response.success);
        assert!(response.error.is_some());
    }

    #[tokio::test]
    async fn test_guard_clears_between_sequential_triggers() {
        let store = Arc::new(MemoryStore::new());
        seed_rot13_preset(&store);

        let mut page = Page::new();
        let (node, field) = PageNode::text_input(TextField::single_line("Hello"));
        let index = page.add_node(node);
        page.focus(index);

        let engine = engine_on(page, store, Arc::new(TracingNotifier));
        assert_eq!(engine.handle_key_down(&chord_r()).await, KeyOutcome::Intercepted);
        engine.handle_key_up(&KeyEvent::new("r", "KeyR"));
        assert_eq!(engine.handle_key_down(&chord_r()).await, KeyOutcome::Intercepted);

        // rot13 applied twice restores the original
        assert_eq!(field.lock().text(), "Hello");
    }

    #[tokio::test]
    async fn test_reload_picks_up_new_presets() {
        let store = Arc::new(MemoryStore::new());
        seed_rot13_preset(&store);

        let mut page = Page::new();
        let (node, field) = PageNode::text_input(TextField::single_line("Hello"));
        let index = page.add_node(node);
        page.focus(index);

        let engine = engine_on(page, store.clone(), Arc::new(TracingNotifier));

        let chord_u = KeyEvent::new("u", "KeyU").with_modifiers(true, true, false, false);
        assert_eq!(engine.handle_key_down(&chord_u).await, KeyOutcome::PassThrough);

        let manager = PresetManager::new(store as Arc<dyn KeyValueStore>);
        manager
            .add_preset(Preset::new(
                "Flip",
                "Ctrl+Alt+U",
                PresetKind::StaticTransform {
                    style: StyleId::UpsideDown,
                },
            ))
            .unwrap();
        engine.reload().await.unwrap();

        engine.handle_key_up(&KeyEvent::new("u", "KeyU"));
        assert_eq!(engine.handle_key_down(&chord_u).await, KeyOutcome::Intercepted);
        assert_ne!(field.lock().text(), "Hello");
    }

    #[tokio::test]
    async fn test_watch_store_rebuilds_registry_on_change() {
        let store = Arc::new(MemoryStore::new());
        seed_rot13_preset(&store);

        let mut page = Page::new();
        let (node, _field) = PageNode::text_input(TextField::single_line("Hello"));
        let index = page.add_node(node);
        page.focus(index);

        let engine = Arc::new(engine_on(page, store.clone(), Arc::new(TracingNotifier)));
        let watcher = {
            let engine = engine.clone();
            tokio::spawn(async move { engine.watch_store().await })
        };
        // Let the watcher subscribe before the change is published
        tokio::task::yield_now().await;

        let manager = PresetManager::new(store as Arc<dyn KeyValueStore>);
        manager
            .add_preset(Preset::new(
                "Flip",
                "Ctrl+Alt+U",
                PresetKind::StaticTransform {
                    style: StyleId::UpsideDown,
                },
            ))
            .unwrap();

        for _ in 0..16 {
            tokio::task::yield_now().await;
        }

        let chord_u = KeyEvent::new("u", "KeyU").with_modifiers(true, true, false, false);
        assert_eq!(engine.handle_key_down(&chord_u).await, KeyOutcome::Intercepted);
        watcher.abort();
    }
}
