//! # pulsewatch
//!
//! Dashboard core for tracking application-server health snapshots.
//!
//! This crate turns a time-ordered stream of health snapshots (heap usage,
//! thread counts, connection-pool stats, cumulative transaction counters)
//! into the state a dashboard renders: the latest value of every reading,
//! derived per-second transaction rates, a connection-pool mapping
//! reconciled by JNDI name, bounded trend history, and threshold-based
//! health grades. Rendering is left to whatever layer embeds the crate;
//! everything here is observable through plain accessors.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                          Embedder                              │
//! │  ┌─────────┐    ┌───────────────┐    ┌───────────────────────┐ │
//! │  │ monitor │───▶│     data      │───▶│ accessors (rendering, │ │
//! │  │ (driver)│    │ (dashboard,   │    │  polling, …)          │ │
//! │  └────┬────┘    │  history,     │    └───────────────────────┘ │
//! │       │         │  health)      │                              │
//! │       ▼         └───────────────┘                              │
//! │  ┌─────────┐                                                   │
//! │  │ source  │◀── FileSource | ChannelSource                     │
//! │  │ (input) │                                                   │
//! │  └─────────┘                                                   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: snapshot delivery abstraction ([`SnapshotSource`])
//!   with file-polling and channel-push implementations, plus the snapshot
//!   wire model
//! - **[`data`]**: the dashboard (scalar gauges, per-second rates, pool
//!   reconciliation), bounded trend history, and health grading
//! - **[`model`]**: the shared server context (URI, deployed applications,
//!   current snapshot)
//! - **[`monitor`]**: the polling driver folding snapshots into all of the
//!   above
//! - **[`settings`]**: configuration loading (file + environment)
//!
//! ## Usage
//!
//! ### Feeding snapshots through a channel
//!
//! ```
//! use pulsewatch::{ChannelSource, Monitor, ServerContext, Snapshot, Thresholds};
//!
//! let (tx, source) = ChannelSource::create("collector");
//! let context = ServerContext::new("http://localhost:8080");
//! let mut monitor = Monitor::new(Box::new(source), context, Thresholds::default());
//!
//! tx.send(Some(Snapshot { id: 1, ..Snapshot::default() })).unwrap();
//! assert!(monitor.poll().unwrap());
//! assert_eq!(monitor.dashboard().snapshot_id(), 1);
//! ```
//!
//! ### Polling a snapshot file
//!
//! ```no_run
//! use pulsewatch::{FileSource, Monitor, ServerContext, Thresholds};
//!
//! let source = Box::new(FileSource::new("snapshot.json"));
//! let context = ServerContext::new("http://localhost:8080");
//! let mut monitor = Monitor::new(source, context, Thresholds::default());
//!
//! if monitor.poll().unwrap() {
//!     let dashboard = monitor.dashboard();
//!     println!(
//!         "{} MB heap, {} commits/s",
//!         dashboard.used_heap_size_in_mb(),
//!         dashboard.commits_per_second()
//!     );
//! }
//! ```

pub mod data;
pub mod model;
pub mod monitor;
pub mod settings;
pub mod source;

// Re-export main types for convenience
pub use data::{
    Dashboard, HealthReport, HealthStatus, History, PoolGauges, PoolHealth, Thresholds,
};
pub use model::ServerContext;
pub use monitor::Monitor;
pub use settings::MonitorSettings;
pub use source::{ChannelSource, ConnectionPool, FileSource, Snapshot, SnapshotSource};
