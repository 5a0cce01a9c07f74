//! Template Editor Session
//!
//! Binds the template catalog, the notification sink, the formatter, and an
//! embedded editor's annotations into one observable session: a display text
//! for the loaded template, an in-progress flag, and a debounced list of the
//! editor's current lint/parse errors.

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use tokio::sync::Mutex;

use crate::catalog::TemplateCatalog;
use crate::editor::collector::DEFAULT_QUIET_PERIOD;
use crate::editor::{AnnotationSource, DisplayedError, ErrorCollector};
use crate::format::TemplateFormatter;
use crate::notification::NotificationSink;

/// Template requested when the session is opened
pub const DEFAULT_TEMPLATE: &str = "minimal";

/// Message shown when a failed fetch carries no message of its own
pub const FETCH_FAILURE_FALLBACK: &str = "Fail to get factory template.";

#[derive(Debug)]
struct SessionState {
    template_name: String,
    content: Option<String>,
    is_loading: bool,
}

/// One editor screen's session over a named factory template
pub struct TemplateSession {
    catalog: Arc<dyn TemplateCatalog>,
    notifier: Arc<dyn NotificationSink>,
    formatter: Arc<dyn TemplateFormatter>,
    state: Mutex<SessionState>,
    editor: StdMutex<Option<Arc<ErrorCollector>>>,
    quiet_period: Duration,
}

impl TemplateSession {
    /// Create a session without loading anything yet
    pub fn new(
        catalog: Arc<dyn TemplateCatalog>,
        notifier: Arc<dyn NotificationSink>,
        formatter: Arc<dyn TemplateFormatter>,
    ) -> Self {
        Self {
            catalog,
            notifier,
            formatter,
            state: Mutex::new(SessionState {
                template_name: DEFAULT_TEMPLATE.to_string(),
                content: None,
                is_loading: false,
            }),
            editor: StdMutex::new(None),
            quiet_period: DEFAULT_QUIET_PERIOD,
        }
    }

    /// Override the error-collector quiet period (useful for testing)
    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }

    /// Create a session and immediately load the default template
    pub async fn open(
        catalog: Arc<dyn TemplateCatalog>,
        notifier: Arc<dyn NotificationSink>,
        formatter: Arc<dyn TemplateFormatter>,
    ) -> Self {
        let session = Self::new(catalog, notifier, formatter);
        session.load_template(DEFAULT_TEMPLATE).await;
        session
    }

    /// Load the named template into the session.
    ///
    /// A cached template is formatted and stored synchronously. Otherwise the
    /// loading flag is raised, the template is fetched, and on failure the
    /// notification sink receives exactly one message (the fetch error's own
    /// message, or [`FETCH_FAILURE_FALLBACK`]) while `content` keeps its
    /// prior value. Failures never propagate to the caller and are not
    /// retried.
    pub async fn load_template(&self, name: &str) {
        {
            let mut state = self.state.lock().await;
            state.template_name = name.to_string();

            if let Some(raw) = self.catalog.get(name) {
                state.content = Some(self.formatter.format(&raw));
                state.is_loading = false;
                return;
            }

            state.is_loading = true;
        }

        match self.catalog.fetch(name).await {
            Ok(raw) => {
                let mut state = self.state.lock().await;
                state.is_loading = false;
                state.content = Some(self.formatter.format(&raw));
            }
            Err(e) => {
                {
                    let mut state = self.state.lock().await;
                    state.is_loading = false;
                }
                let message = e
                    .message
                    .unwrap_or_else(|| FETCH_FAILURE_FALLBACK.to_string());
                self.notifier.show_error(&message);
            }
        }
    }

    /// Attach the embedded editor's annotation source.
    ///
    /// The host calls this once the editor widget has loaded, then forwards
    /// every change notification via [`Self::handle_editor_change`].
    pub fn attach_editor(&self, source: Arc<dyn AnnotationSource>) {
        let collector = Arc::new(ErrorCollector::with_quiet_period(source, self.quiet_period));
        *self.editor.lock().unwrap() = Some(collector);
    }

    /// Forward one change notification from the editor.
    ///
    /// No-op when no editor is attached.
    pub fn handle_editor_change(&self) {
        let collector = self.editor.lock().unwrap().clone();
        if let Some(collector) = collector {
            collector.notify_change();
        }
    }

    pub async fn template_name(&self) -> String {
        self.state.lock().await.template_name.clone()
    }

    /// Display text of the last successfully loaded template
    pub async fn content(&self) -> Option<String> {
        self.state.lock().await.content.clone()
    }

    /// True exactly while a template fetch is outstanding
    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.is_loading
    }

    /// Errors from the most recent recomputation, empty when no editor is
    /// attached
    pub fn errors(&self) -> Vec<DisplayedError> {
        self.editor
            .lock()
            .unwrap()
            .as_ref()
            .map(|collector| collector.errors())
            .unwrap_or_default()
    }
}
