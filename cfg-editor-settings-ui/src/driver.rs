//! Execution of editor store requests.
//!
//! [`StoreDriver`] runs requests on a tokio runtime and hands completions
//! back through a channel the UI thread polls once per frame. [`drive`] is
//! the sequential variant for headless hosts.

use crate::list_editor::ListEditor;
use crate::registry::EditorRegistry;
use crate::traits::{SettingStore, StoreError, StoreRequest, StoreResponse};
use crate::EditorEffect;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

/// Runs store requests in the background for a UI thread.
pub struct StoreDriver<S: SettingStore + 'static> {
    store: Arc<S>,
    runtime: Handle,
    response_tx: mpsc::UnboundedSender<StoreResponse>,
    response_rx: mpsc::UnboundedReceiver<StoreResponse>,
    in_flight: usize,
}

impl<S: SettingStore + 'static> StoreDriver<S> {
    pub fn new(store: Arc<S>, runtime: Handle) -> Self {
        let (response_tx, response_rx) = mpsc::unbounded_channel();
        Self {
            store,
            runtime,
            response_tx,
            response_rx,
            in_flight: 0,
        }
    }

    /// Number of submitted requests whose completion has not been polled
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Spawn `request` on the runtime.
    ///
    /// Every submission produces exactly one response; a store call that
    /// panics completes as a failed request.
    pub fn submit(&mut self, request: StoreRequest) {
        log::debug!("Submitting store request for {}", request.key());
        let store = Arc::clone(&self.store);
        let tx = self.response_tx.clone();
        let runtime = self.runtime.clone();
        self.in_flight += 1;
        self.runtime.spawn(async move {
            let fallback = request.clone();
            let response = match runtime.spawn(async move { store.execute(request).await }).await {
                Ok(response) => response,
                Err(e) => {
                    log::error!("Store task for {} failed: {}", fallback.key(), e);
                    fallback.into_failure(StoreError::Io(format!("store task failed: {e}")))
                }
            };
            if tx.send(response).is_err() {
                log::warn!("Store response dropped: driver is gone");
            }
        });
    }

    /// Submit request effects and return the rest for the host
    pub fn dispatch(&mut self, effects: impl IntoIterator<Item = EditorEffect>) -> Vec<EditorEffect> {
        let mut remaining = Vec::new();
        for effect in effects {
            match effect {
                EditorEffect::Request(request) => self.submit(request),
                other => remaining.push(other),
            }
        }
        remaining
    }

    /// Drain completed responses (non-blocking)
    pub fn poll(&mut self) -> Vec<StoreResponse> {
        let mut responses = Vec::new();
        while let Ok(response) = self.response_rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            responses.push(response);
        }
        responses
    }

    /// Route completed responses into `registry`, submit follow-up requests
    /// and return the effects the host has to handle.
    pub fn pump(&mut self, registry: &mut EditorRegistry) -> Vec<EditorEffect> {
        let effects: Vec<_> = self
            .poll()
            .into_iter()
            .filter_map(|response| registry.route(response))
            .collect();
        self.dispatch(effects)
    }

    /// Wait until every submitted request, including follow-ups, has been
    /// routed into `registry`.
    pub async fn settle(&mut self, registry: &mut EditorRegistry) -> Vec<EditorEffect> {
        let mut effects = Vec::new();
        while self.in_flight > 0 {
            let Some(response) = self.response_rx.recv().await else {
                break;
            };
            self.in_flight -= 1;
            if let Some(effect) = registry.route(response) {
                effects.extend(self.dispatch([effect]));
            }
        }
        effects
    }
}

/// Execute `effect` and every follow-up request against `store` in order.
///
/// Returns the non-request effects (navigations and errors) produced along
/// the way.
pub async fn drive<S: SettingStore>(
    editor: &mut ListEditor,
    store: &S,
    effect: EditorEffect,
) -> Vec<EditorEffect> {
    let mut pending = Some(effect);
    let mut surfaced = Vec::new();
    while let Some(effect) = pending.take() {
        match effect {
            EditorEffect::Request(request) => {
                let response = store.execute(request).await;
                pending = editor.handle_response(response);
            }
            other => surfaced.push(other),
        }
    }
    surfaced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_store::MemoryStore;
    use crate::traits::CopyRequest;
    use crate::NavigationTarget;
    use cfg_editor_config::{SchemaCatalog, SettingKey, SettingSchema, SettingSyntax};

    /// Store whose calls panic
    struct CrashingStore;

    impl SettingStore for CrashingStore {
        async fn read_setting(&self, key: &SettingKey) -> Result<Vec<String>, StoreError> {
            panic!("read of {key} crashed");
        }

        async fn write_setting(&self, key: &SettingKey, _values: Vec<String>) -> Result<(), StoreError> {
            panic!("write of {key} crashed");
        }

        async fn copy_identifier(&self, request: &CopyRequest) -> Result<(), StoreError> {
            panic!("copy for {} crashed", request.setting);
        }
    }

    fn schema() -> SettingSchema {
        SettingSchema::new("hosts", SettingSyntax::StringArray)
            .with_label("Hosts")
            .with_minimum(1)
    }

    #[tokio::test]
    async fn test_drive_add_writes_through() {
        let store = MemoryStore::new();
        store.insert("hosts", &["a"]);
        let mut editor = ListEditor::new(schema());

        let init = editor.init().expect("init");
        assert!(drive(&mut editor, &store, init).await.is_empty());
        assert_eq!(editor.values().map(<[String]>::len), Some(1));

        editor.begin_add().expect("add");
        editor.dialog_mut().expect("dialog").set_value("b");
        let effect = editor.confirm_dialog().expect("confirm").expect("effect");
        assert!(drive(&mut editor, &store, effect).await.is_empty());

        assert_eq!(store.get("hosts"), Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(store.write_count(), 1);
        assert!(!editor.has_unsaved_changes());
    }

    #[tokio::test]
    async fn test_drive_surfaces_write_error() {
        let store = MemoryStore::new();
        store.insert("hosts", &["a", "b"]);
        let mut editor = ListEditor::new(schema());
        let init = editor.init().expect("init");
        drive(&mut editor, &store, init).await;

        store.fail_next_write(StoreError::Io("full".to_string()));
        let effect = editor.delete_item(0).expect("delete").expect("effect");
        let surfaced = drive(&mut editor, &store, effect).await;
        assert!(matches!(surfaced.as_slice(), [EditorEffect::ShowError { .. }]));
        assert_eq!(store.get("hosts"), Some(vec!["a".to_string(), "b".to_string()]));
        assert!(editor.has_unsaved_changes());
    }

    #[tokio::test]
    async fn test_drive_read_failure_leaves_editor_unloaded() {
        let store = MemoryStore::new();
        store.insert("hosts", &["a"]);
        let mut editor = ListEditor::new(schema());

        store.fail_next_read(StoreError::Io("unreachable".to_string()));
        let init = editor.init().expect("init");
        let surfaced = drive(&mut editor, &store, init).await;
        assert!(matches!(surfaced.as_slice(), [EditorEffect::ShowError { .. }]));
        assert!(editor.render().is_none());
        assert!(editor.last_error().is_some_and(|m| m.contains("unreachable")));

        let init = editor.init().expect("retry");
        assert!(drive(&mut editor, &store, init).await.is_empty());
        assert_eq!(editor.values().map(<[String]>::len), Some(1));
    }

    #[tokio::test]
    async fn test_drive_copy_failure_changes_nothing() {
        let store = MemoryStore::new();
        store.insert("profiles", &["default"]);
        let before = store.document();
        let mut editor = ListEditor::new(SettingSchema::new("profiles", SettingSyntax::Profile));
        let init = editor.init().expect("init");
        drive(&mut editor, &store, init).await;

        store.fail_next_copy(StoreError::Rejected("quota".to_string()));
        editor.begin_copy(0).expect("copy");
        editor.dialog_mut().expect("dialog").set_value("backup");
        let effect = editor.confirm_dialog().expect("confirm").expect("effect");
        let surfaced = drive(&mut editor, &store, effect).await;
        assert!(matches!(surfaced.as_slice(), [EditorEffect::ShowError { .. }]));
        assert_eq!(store.document(), before);
        assert!(editor.render().is_some());
    }

    #[tokio::test]
    async fn test_drive_profile_copy_navigates() {
        let store = MemoryStore::new();
        store.insert("profiles", &["default"]);
        let mut editor = ListEditor::new(SettingSchema::new("profiles", SettingSyntax::Profile));
        let init = editor.init().expect("init");
        drive(&mut editor, &store, init).await;

        editor.begin_copy(0).expect("copy");
        editor.dialog_mut().expect("dialog").set_value("backup");
        let effect = editor.confirm_dialog().expect("confirm").expect("effect");
        let surfaced = drive(&mut editor, &store, effect).await;
        assert_eq!(
            surfaced,
            vec![EditorEffect::Navigate(NavigationTarget::EditorRoot)]
        );
        assert_eq!(
            store.get("profiles"),
            Some(vec!["default".to_string(), "backup".to_string()])
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_driver_settles_registry() {
        let store = Arc::new(MemoryStore::new());
        store.insert("hosts", &["a", "b", "c"]);
        let mut catalog = SchemaCatalog::new();
        catalog.insert(schema()).expect("insert");
        let mut registry = EditorRegistry::from_catalog(&catalog);

        let mut driver = StoreDriver::new(Arc::clone(&store), Handle::current());
        let effects = registry.init_all();
        assert!(driver.dispatch(effects).is_empty());
        assert_eq!(driver.in_flight(), 1);
        assert!(driver.settle(&mut registry).await.is_empty());
        assert_eq!(driver.in_flight(), 0);

        let editor = registry.get_mut("hosts").expect("editor");
        let effect = editor.move_item(true, 2).expect("move");
        driver.dispatch([effect]);
        driver.settle(&mut registry).await;

        assert_eq!(
            store.get("hosts"),
            Some(vec!["a".to_string(), "c".to_string(), "b".to_string()])
        );
        assert!(driver.pump(&mut registry).is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_settle_survives_panicking_store() {
        let mut catalog = SchemaCatalog::new();
        catalog.insert(schema()).expect("insert");
        let mut registry = EditorRegistry::from_catalog(&catalog);

        let mut driver = StoreDriver::new(Arc::new(CrashingStore), Handle::current());
        driver.dispatch(registry.init_all());
        let effects = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            driver.settle(&mut registry),
        )
        .await
        .expect("settle returns");

        assert!(matches!(effects.as_slice(), [EditorEffect::ShowError { .. }]));
        assert_eq!(driver.in_flight(), 0);
        let editor = registry.get("hosts").expect("editor");
        assert!(editor.render().is_none());
        assert!(!editor.is_busy());
    }
}
