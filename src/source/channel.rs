//! Channel-based snapshot source.
//!
//! Receives snapshots via a tokio watch channel. This is useful when an
//! in-process collector pushes snapshots rather than writing them to a
//! file for polling.

use tokio::sync::watch;

use super::{Snapshot, SnapshotSource};

/// A snapshot source fed through a watch channel.
///
/// The producer (whatever adapter talks to the server) sends snapshots
/// through the channel and this source hands them to the monitor. Watch
/// semantics apply: if several snapshots arrive between two polls, only
/// the newest one is observed.
///
/// # Example
///
/// ```
/// use pulsewatch::ChannelSource;
///
/// let (tx, source) = ChannelSource::create("glassfish collector");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Option<Snapshot>>,
    description: String,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of a watch channel
    /// * `source_description` - Where the snapshots come from
    ///   (e.g., "glassfish collector")
    pub fn new(receiver: watch::Receiver<Option<Snapshot>>, source_description: &str) -> Self {
        let description = format!("channel: {}", source_description);
        Self {
            receiver,
            description,
        }
    }

    /// Create a channel pair for pushing snapshots into a `ChannelSource`.
    ///
    /// Returns (sender, source) where the sender is handed to the snapshot
    /// producer and the source is injected into the monitor.
    pub fn create(source_description: &str) -> (watch::Sender<Option<Snapshot>>, Self) {
        let (tx, rx) = watch::channel(None);
        let source = Self::new(rx, source_description);
        (tx, source)
    }
}

impl SnapshotSource for ChannelSource {
    fn poll(&mut self) -> Option<Snapshot> {
        // Check for a new value without blocking
        if self.receiver.has_changed().unwrap_or(false) {
            self.receiver.borrow_and_update().clone()
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        // Channel sources don't have delivery errors of their own;
        // connection failures are handled by whoever owns the sender.
        None
    }
}
