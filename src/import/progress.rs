//! Run progress state and cancellation
//!
//! The pipeline owns one [`ImportProgress`] value, mutates it field by field,
//! and publishes whole snapshots over a watch channel. Subscribers only ever
//! see copies, so there is no shared mutable state between the pipeline and
//! its observers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Snapshot of a running import
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportProgress {
    /// Whether a run is currently active
    pub is_running: bool,

    /// Page being processed, 1-based for display
    pub current_page: u64,

    /// Total page count; an estimate until the directory reports its count
    pub total_pages: u64,

    /// Raw listing count on the current page
    pub current_page_listings: usize,

    /// Cumulative number of successfully imported records
    pub total_imported: u64,

    /// Last terminal error, if the run ended on one
    pub error: Option<String>,

    /// Human-readable status line
    pub message: String,
}

/// Publisher side of the progress channel, owned by the pipeline
pub(crate) struct ProgressPublisher {
    state: ImportProgress,
    tx: watch::Sender<ImportProgress>,
}

impl ProgressPublisher {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ImportProgress::default());
        Self {
            state: ImportProgress::default(),
            tx,
        }
    }

    /// Subscribes to progress snapshots
    pub fn subscribe(&self) -> watch::Receiver<ImportProgress> {
        self.tx.subscribe()
    }

    /// Resets the state for a fresh run and publishes the reset
    pub fn reset(&mut self) {
        self.state = ImportProgress::default();
        let _ = self.tx.send(self.state.clone());
    }

    /// Applies a partial update to the owned state and publishes a snapshot
    pub fn update(&mut self, apply: impl FnOnce(&mut ImportProgress)) {
        apply(&mut self.state);
        let _ = self.tx.send(self.state.clone());
    }

    /// Current state, for assertions and summaries
    pub fn snapshot(&self) -> &ImportProgress {
        &self.state
    }
}

/// Cooperative cancellation handle for a run
///
/// The pipeline checks the flag between suspension points; flipping it stops
/// the run at the next page boundary as a non-error terminal condition.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Requests that the run stop at the next page boundary
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// Clears the flag; a fresh run starts uncancelled
    pub(crate) fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_publishes_snapshot() {
        let mut publisher = ProgressPublisher::new();
        let rx = publisher.subscribe();

        publisher.update(|p| {
            p.is_running = true;
            p.message = "starting".to_string();
        });

        let seen = rx.borrow().clone();
        assert!(seen.is_running);
        assert_eq!(seen.message, "starting");
    }

    #[test]
    fn test_updates_merge_into_existing_state() {
        let mut publisher = ProgressPublisher::new();

        publisher.update(|p| p.total_pages = 3);
        publisher.update(|p| p.current_page = 2);

        // Earlier fields survive later partial updates
        assert_eq!(publisher.snapshot().total_pages, 3);
        assert_eq!(publisher.snapshot().current_page, 2);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut publisher = ProgressPublisher::new();
        publisher.update(|p| {
            p.total_imported = 7;
            p.error = Some("boom".to_string());
        });

        publisher.reset();
        assert_eq!(publisher.snapshot(), &ImportProgress::default());
    }

    #[test]
    fn test_cancel_handle_flips_once() {
        let handle = CancelHandle::default();
        assert!(!handle.is_cancelled());

        let clone = handle.clone();
        clone.cancel();
        assert!(handle.is_cancelled());
    }
}
