//! Editor-facing types and the debounced error collector.
//!
//! The embedded editor owns its annotation list; this module only reads its
//! public query surface and projects it into displayable errors.

pub mod annotation;
pub mod collector;

pub use annotation::{
    project_errors, Annotation, AnnotationDetail, AnnotationSource, DisplayedError,
};
pub use collector::ErrorCollector;
