//! Template Catalog
//!
//! Named factory templates: a local/cached lookup plus an asynchronous
//! fetch for templates that are not cached yet.

use std::fmt;

use async_trait::async_trait;

pub mod registry;
pub mod store;

pub use registry::TemplateRegistry;
pub use store::TemplateStore;

/// Raw template content, a JSON-like document
pub type RawTemplate = serde_json::Value;

/// Failure of an asynchronous template fetch.
///
/// The transport may or may not supply a human-readable message; callers
/// fall back to a fixed string when it does not.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchError {
    pub message: Option<String>,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// A failure that carries no usable message
    pub fn without_message() -> Self {
        Self { message: None }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "template fetch failed: {}", message),
            None => write!(f, "template fetch failed"),
        }
    }
}

impl std::error::Error for FetchError {}

/// The template catalog collaborator consumed by the session
#[async_trait]
pub trait TemplateCatalog: Send + Sync {
    /// Synchronous local/cached lookup
    fn get(&self, name: &str) -> Option<RawTemplate>;

    /// Asynchronous fetch for a template that is not cached locally
    async fn fetch(&self, name: &str) -> Result<RawTemplate, FetchError>;
}
