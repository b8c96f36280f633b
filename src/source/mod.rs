//! Data source abstraction for receiving health snapshots.
//!
//! This module provides a trait-based abstraction for receiving snapshots
//! from various delivery mechanisms (file polling, in-process channels).
//! The actual transport that produces snapshots lives outside this crate.

mod channel;
mod file;
mod snapshot;

pub use channel::ChannelSource;
pub use file::FileSource;
pub use snapshot::{ConnectionPool, Snapshot};

use std::fmt::Debug;

/// Trait for receiving health snapshots from various delivery mechanisms.
///
/// Implementations provide snapshots from different backends - file
/// polling or channel-based push delivery. Snapshots arrive in capture
/// order; the consumer processes each one fully before polling again.
///
/// # Example
///
/// ```
/// use pulsewatch::{FileSource, SnapshotSource};
///
/// let mut source = FileSource::new("snapshot.json");
/// if let Some(snapshot) = source.poll() {
///     println!("snapshot {}", snapshot.id);
/// }
/// ```
pub trait SnapshotSource: Send + Debug {
    /// Poll for the next snapshot.
    ///
    /// Returns `Some(snapshot)` if new data is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<Snapshot>;

    /// Returns a human-readable description of the delivery mechanism.
    fn description(&self) -> &str;

    /// Check if the source has encountered an error.
    ///
    /// Returns the error message if the last poll hit a delivery failure.
    fn error(&self) -> Option<&str>;
}
