//! Polling driver wiring a snapshot source to the dashboard state.

use anyhow::Result;
use tracing::debug;

use crate::data::{Dashboard, HealthReport, History, Thresholds};
use crate::model::ServerContext;
use crate::source::SnapshotSource;

/// Owns the snapshot source and all state derived from it.
///
/// Snapshots are consumed one at a time: each [`Monitor::poll`] fully
/// folds a delivered snapshot into the dashboard, the history, and the
/// server context before returning.
pub struct Monitor {
    source: Box<dyn SnapshotSource>,
    dashboard: Dashboard,
    history: History,
    context: ServerContext,
    thresholds: Thresholds,
    load_error: Option<String>,
}

impl Monitor {
    /// Create a new monitor with the given source, context and thresholds.
    pub fn new(
        source: Box<dyn SnapshotSource>,
        context: ServerContext,
        thresholds: Thresholds,
    ) -> Self {
        Self {
            source,
            dashboard: Dashboard::new(),
            history: History::new(),
            context,
            thresholds,
            load_error: None,
        }
    }

    /// Poll the source for the next snapshot.
    ///
    /// Returns Ok(true) if a snapshot was consumed, Ok(false) if none was
    /// available. A delivery error is remembered and surfaced through
    /// [`Monitor::load_error`] without giving up on later polls.
    pub fn poll(&mut self) -> Result<bool> {
        // Check for errors from the source
        if let Some(err) = self.source.error() {
            self.load_error = Some(err.to_string());
            return Ok(false);
        }

        let Some(snapshot) = self.source.poll() else {
            return Ok(false);
        };

        debug!(id = snapshot.id, "snapshot received");
        self.dashboard.on_snapshot(&snapshot);
        self.history.record(&snapshot);
        self.context.record(snapshot);
        self.load_error = None;
        Ok(true)
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn context(&self) -> &ServerContext {
        &self.context
    }

    /// Mutable access to the context, e.g. to repoint the server URI.
    pub fn context_mut(&mut self) -> &mut ServerContext {
        &mut self.context
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Grade the current dashboard state against the configured thresholds.
    pub fn health(&self) -> HealthReport {
        HealthReport::assess(&self.dashboard, &self.thresholds)
    }

    /// Returns a description of the current snapshot source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// The last delivery error, if the source is failing.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }
}
