//! Annotation Types
//!
//! Projections of editor-owned markers into displayable errors.

/// Fallback message for error annotations that carry no detail
pub const PARSE_ERROR_FALLBACK: &str = "Parse error";

/// Detail object optionally attached to an annotation by the editor
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationDetail {
    pub message: String,
}

/// An editor-owned marker attached to a text range
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub id: String,
    /// Category/class string, e.g. "cm-error" or "cm-warning"
    pub class: Option<String>,
    pub detail: Option<AnnotationDetail>,
}

impl Annotation {
    /// Whether the annotation's class marks it as an error
    pub fn is_error(&self) -> bool {
        self.class
            .as_ref()
            .map(|class| class.contains("error"))
            .unwrap_or(false)
    }
}

/// One entry of the visible error list
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedError {
    pub id: String,
    pub message: String,
}

/// Read-only query surface of the embedded editor's document
pub trait AnnotationSource: Send + Sync {
    /// All current annotations, in the editor's own order
    fn annotations(&self) -> Vec<Annotation>;
}

/// Project the current annotation set into the visible error list.
///
/// Keeps annotations whose class contains "error", preserving the order the
/// editor returned them in. Repeated ids are kept as-is; dedup is the
/// editor's business.
pub fn project_errors(annotations: &[Annotation]) -> Vec<DisplayedError> {
    annotations
        .iter()
        .filter(|annotation| annotation.is_error())
        .map(|annotation| DisplayedError {
            id: annotation.id.clone(),
            message: annotation
                .detail
                .as_ref()
                .map(|detail| detail.message.clone())
                .unwrap_or_else(|| PARSE_ERROR_FALLBACK.to_string()),
        })
        .collect()
}
