//! Template Editor Session
//!
//! A session binding a code editor widget to a named factory template.
//!
//! This library provides:
//! - Template loading with a cached lookup and an async fetch fallback
//! - Debounced collection of editor lint/parse errors
//! - JSON pretty-printing of template documents
//! - Configuration management

pub mod catalog;
pub mod config;
pub mod editor;
pub mod format;
pub mod notification;
pub mod session;

// Re-exports for clean public API
pub use catalog::{FetchError, RawTemplate, TemplateCatalog, TemplateRegistry, TemplateStore};
pub use config::Config;
pub use editor::{project_errors, Annotation, AnnotationSource, DisplayedError, ErrorCollector};
pub use format::{JsonFormatter, TemplateFormatter};
pub use notification::{LogNotifier, NotificationSink};
pub use session::{TemplateSession, DEFAULT_TEMPLATE, FETCH_FAILURE_FALLBACK};
