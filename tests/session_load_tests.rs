//! Integration tests for the template loading behavior of the session
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Notify;

use template_session::catalog::{FetchError, RawTemplate, TemplateCatalog};
use template_session::format::JsonFormatter;
use template_session::notification::NotificationSink;
use template_session::session::{TemplateSession, FETCH_FAILURE_FALLBACK};

/// Catalog with a local cache and a remote side, like the Che template API
struct MockCatalog {
    local: HashMap<String, RawTemplate>,
    remote: HashMap<String, RawTemplate>,
    fetch_error: Option<FetchError>,
}

impl MockCatalog {
    fn empty() -> Self {
        Self {
            local: HashMap::new(),
            remote: HashMap::new(),
            fetch_error: None,
        }
    }

    fn with_local(name: &str, raw: RawTemplate) -> Self {
        let mut catalog = Self::empty();
        catalog.local.insert(name.to_string(), raw);
        catalog
    }

    fn with_remote(name: &str, raw: RawTemplate) -> Self {
        let mut catalog = Self::empty();
        catalog.remote.insert(name.to_string(), raw);
        catalog
    }

    fn failing_with(error: FetchError) -> Self {
        let mut catalog = Self::empty();
        catalog.fetch_error = Some(error);
        catalog
    }
}

#[async_trait]
impl TemplateCatalog for MockCatalog {
    fn get(&self, name: &str) -> Option<RawTemplate> {
        self.local.get(name).cloned()
    }

    async fn fetch(&self, name: &str) -> Result<RawTemplate, FetchError> {
        if let Some(error) = &self.fetch_error {
            return Err(error.clone());
        }
        self.remote
            .get(name)
            .cloned()
            .ok_or_else(|| FetchError::new(format!("Template '{}' not found", name)))
    }
}

/// Catalog whose fetch blocks until released, to observe the loading flag
struct GatedCatalog {
    release: Arc<Notify>,
    template: RawTemplate,
}

#[async_trait]
impl TemplateCatalog for GatedCatalog {
    fn get(&self, _name: &str) -> Option<RawTemplate> {
        None
    }

    async fn fetch(&self, _name: &str) -> Result<RawTemplate, FetchError> {
        self.release.notified().await;
        Ok(self.template.clone())
    }
}

#[derive(Default)]
struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingNotifier {
    fn show_error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

fn session_over(
    catalog: Arc<dyn TemplateCatalog>,
    notifier: Arc<RecordingNotifier>,
) -> TemplateSession {
    TemplateSession::new(catalog, notifier, Arc::new(JsonFormatter::default()))
}

#[tokio::test]
async fn test_local_hit_formats_synchronously() {
    let catalog = Arc::new(MockCatalog::with_local("minimal", json!({"a": 1})));
    let notifier = Arc::new(RecordingNotifier::default());
    let session = session_over(catalog, notifier.clone());

    session.load_template("minimal").await;

    assert_eq!(session.content().await, Some("{\n  \"a\": 1\n}".to_string()));
    assert_eq!(session.template_name().await, "minimal");
    assert!(!session.is_loading().await);
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_open_loads_default_template() {
    let catalog = Arc::new(MockCatalog::with_local("minimal", json!({"a": 1})));
    let notifier = Arc::new(RecordingNotifier::default());

    let session = TemplateSession::open(
        catalog,
        notifier.clone(),
        Arc::new(JsonFormatter::default()),
    )
    .await;

    assert_eq!(session.template_name().await, "minimal");
    assert_eq!(session.content().await, Some("{\n  \"a\": 1\n}".to_string()));
    assert!(!session.is_loading().await);
}

#[tokio::test]
async fn test_content_is_none_before_first_load() {
    let catalog = Arc::new(MockCatalog::empty());
    let notifier = Arc::new(RecordingNotifier::default());
    let session = session_over(catalog, notifier);

    assert_eq!(session.content().await, None);
    assert!(!session.is_loading().await);
}

#[tokio::test]
async fn test_local_miss_fetches_and_formats() {
    let catalog = Arc::new(MockCatalog::with_remote(
        "web-java",
        json!({"workspace": {"projects": []}}),
    ));
    let notifier = Arc::new(RecordingNotifier::default());
    let session = session_over(catalog, notifier.clone());

    session.load_template("web-java").await;

    assert_eq!(
        session.content().await,
        Some("{\n  \"workspace\": {\n    \"projects\": []\n  }\n}".to_string())
    );
    assert!(!session.is_loading().await);
    assert!(notifier.messages().is_empty());
}

#[tokio::test]
async fn test_is_loading_is_raised_while_fetch_is_outstanding() {
    let release = Arc::new(Notify::new());
    let catalog = Arc::new(GatedCatalog {
        release: release.clone(),
        template: json!({"a": 1}),
    });
    let notifier = Arc::new(RecordingNotifier::default());
    let session = Arc::new(session_over(catalog, notifier));

    let loading = {
        let session = session.clone();
        tokio::spawn(async move { session.load_template("slow").await })
    };

    // Let the load task run up to its suspension point
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert!(session.is_loading().await);
    assert_eq!(session.content().await, None);

    release.notify_one();
    loading.await.expect("load task");

    assert!(!session.is_loading().await);
    assert_eq!(session.content().await, Some("{\n  \"a\": 1\n}".to_string()));
}

#[tokio::test]
async fn test_fetch_failure_notifies_once_with_error_message() {
    let catalog = Arc::new(MockCatalog::failing_with(FetchError::new(
        "Template service unavailable",
    )));
    let notifier = Arc::new(RecordingNotifier::default());
    let session = session_over(catalog, notifier.clone());

    session.load_template("anything").await;

    assert_eq!(
        notifier.messages(),
        vec!["Template service unavailable".to_string()]
    );
    assert!(!session.is_loading().await);
    assert_eq!(session.content().await, None);
}

#[tokio::test]
async fn test_fetch_failure_without_message_uses_fallback() {
    let catalog = Arc::new(MockCatalog::failing_with(FetchError::without_message()));
    let notifier = Arc::new(RecordingNotifier::default());
    let session = session_over(catalog, notifier.clone());

    session.load_template("anything").await;

    assert_eq!(notifier.messages(), vec![FETCH_FAILURE_FALLBACK.to_string()]);
}

#[tokio::test]
async fn test_fetch_failure_keeps_prior_content() {
    let mut catalog = MockCatalog::with_local("minimal", json!({"a": 1}));
    catalog.fetch_error = Some(FetchError::new("boom"));
    let notifier = Arc::new(RecordingNotifier::default());
    let session = session_over(Arc::new(catalog), notifier.clone());

    session.load_template("minimal").await;
    let before = session.content().await;

    session.load_template("missing").await;

    // Stale content stays visible, only the name and a notification change
    assert_eq!(session.content().await, before);
    assert_eq!(session.template_name().await, "missing");
    assert_eq!(notifier.messages().len(), 1);
    assert!(!session.is_loading().await);
}

#[tokio::test]
async fn test_failed_load_can_be_retried_by_calling_again() {
    let catalog = Arc::new(MockCatalog::with_remote("web-java", json!({"v": "4.0"})));
    let notifier = Arc::new(RecordingNotifier::default());
    let session = session_over(catalog, notifier.clone());

    session.load_template("missing").await;
    assert_eq!(notifier.messages().len(), 1);
    assert_eq!(session.content().await, None);

    session.load_template("web-java").await;
    assert_eq!(session.content().await, Some("{\n  \"v\": \"4.0\"\n}".to_string()));
    assert_eq!(notifier.messages().len(), 1);
}
