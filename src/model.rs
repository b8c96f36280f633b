//! Shared server identity and state.

use std::collections::BTreeSet;

use crate::source::Snapshot;

/// Shared holder for the monitored server's identity and latest state.
///
/// Injected next to the snapshot source so that other presenters can
/// observe the same server without owning the delivery mechanism.
#[derive(Debug, Clone, Default)]
pub struct ServerContext {
    server_uri: String,
    applications: BTreeSet<String>,
    current_snapshot: Option<Snapshot>,
}

impl ServerContext {
    /// Create a context for the server at the given URI.
    pub fn new(server_uri: impl Into<String>) -> Self {
        Self {
            server_uri: server_uri.into(),
            applications: BTreeSet::new(),
            current_snapshot: None,
        }
    }

    /// Base URI of the monitored server.
    pub fn server_uri(&self) -> &str {
        &self.server_uri
    }

    /// Point the context at a different server.
    ///
    /// Re-wiring the snapshot delivery is up to whoever owns the source.
    pub fn set_server_uri(&mut self, server_uri: impl Into<String>) {
        self.server_uri = server_uri.into();
    }

    /// Deployed application names seen so far.
    ///
    /// Grows by union across snapshots; names never retire.
    pub fn applications(&self) -> &BTreeSet<String> {
        &self.applications
    }

    /// The most recently delivered snapshot.
    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        self.current_snapshot.as_ref()
    }

    /// Absorb a delivered snapshot: union its application set into the
    /// deployed-application names and make it the current snapshot.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.applications.extend(snapshot.apps.iter().cloned());
        self.current_snapshot = Some(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with_apps(id: u64, apps: &[&str]) -> Snapshot {
        Snapshot {
            id,
            apps: apps.iter().map(|a| a.to_string()).collect(),
            ..Snapshot::default()
        }
    }

    #[test]
    fn test_context_starts_empty() {
        let context = ServerContext::new("http://localhost:8080");
        assert_eq!(context.server_uri(), "http://localhost:8080");
        assert!(context.applications().is_empty());
        assert!(context.current_snapshot().is_none());
    }

    #[test]
    fn test_applications_accumulate_by_union() {
        let mut context = ServerContext::new("http://localhost:8080");

        context.record(snapshot_with_apps(1, &["shop", "billing"]));
        context.record(snapshot_with_apps(2, &["shop", "reports"]));

        let apps: Vec<&str> = context.applications().iter().map(String::as_str).collect();
        assert_eq!(apps, vec!["billing", "reports", "shop"]);
    }

    #[test]
    fn test_current_snapshot_is_latest() {
        let mut context = ServerContext::new("http://localhost:8080");

        context.record(snapshot_with_apps(1, &[]));
        context.record(snapshot_with_apps(2, &[]));

        assert_eq!(context.current_snapshot().map(|s| s.id), Some(2));
    }

    #[test]
    fn test_set_server_uri() {
        let mut context = ServerContext::new("http://localhost:8080");
        context.set_server_uri("http://staging:8080");
        assert_eq!(context.server_uri(), "http://staging:8080");
    }
}
