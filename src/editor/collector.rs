//! Debounced Error Collector
//!
//! Turns arbitrarily frequent editor change notifications into one
//! recomputation of the visible error list per quiet period.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use super::annotation::{project_errors, AnnotationSource, DisplayedError};

/// Quiet period between the last change notification and recomputation
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(1000);

/// Collects lint/parse errors from an annotation source, debounced.
///
/// Each change notification cancels any pending, not-yet-run recomputation
/// and schedules a fresh one. The recomputation that eventually runs reads
/// the annotation set at fire time, so rapid successive edits coalesce into
/// a single pass over the latest state.
pub struct ErrorCollector {
    source: Arc<dyn AnnotationSource>,
    errors: Arc<Mutex<Vec<DisplayedError>>>,
    quiet_period: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl ErrorCollector {
    pub fn new(source: Arc<dyn AnnotationSource>) -> Self {
        Self::with_quiet_period(source, DEFAULT_QUIET_PERIOD)
    }

    /// Create a collector with a custom quiet period (useful for testing)
    pub fn with_quiet_period(source: Arc<dyn AnnotationSource>, quiet_period: Duration) -> Self {
        Self {
            source,
            errors: Arc::new(Mutex::new(Vec::new())),
            quiet_period,
            pending: Mutex::new(None),
        }
    }

    /// Handle one change notification from the editor.
    ///
    /// Must be called from within a tokio runtime; the delayed recomputation
    /// runs as a spawned task.
    pub fn notify_change(&self) {
        let source = self.source.clone();
        let errors = self.errors.clone();
        let quiet_period = self.quiet_period;

        let mut pending = self.pending.lock().unwrap();

        // Cancel the previously scheduled recomputation before arming a new
        // one, so only the latest timer can fire.
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            Self::recompute(source.as_ref(), &errors);
        }));
    }

    /// Run the recomputation immediately, bypassing the timer.
    ///
    /// Idempotent: running it twice with no intervening editor change yields
    /// the same list.
    pub fn recompute_now(&self) {
        Self::recompute(self.source.as_ref(), &self.errors);
    }

    /// Errors from the most recently completed recomputation
    pub fn errors(&self) -> Vec<DisplayedError> {
        self.errors.lock().unwrap().clone()
    }

    fn recompute(source: &dyn AnnotationSource, errors: &Mutex<Vec<DisplayedError>>) {
        let next = project_errors(&source.annotations());

        // Full replacement, never an incremental patch.
        let mut errors = errors.lock().unwrap();
        errors.clear();
        errors.extend(next);
    }
}

impl Drop for ErrorCollector {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.lock().unwrap().take() {
            handle.abort();
        }
    }
}
