//! Data models and processing for health snapshots.
//!
//! This module turns raw snapshots into the state a rendering layer
//! observes: current values with derived rates, health grades, and trend
//! history.
//!
//! ## Submodules
//!
//! - [`dashboard`]: current values, per-second transaction rates, and the
//!   pool mapping reconciled by JNDI name
//! - [`health`]: threshold grading ([`HealthReport`], [`HealthStatus`]) and
//!   escalations
//! - [`history`]: bounded trend history for sparklines
//!
//! ## Data Flow
//!
//! ```text
//! Snapshot (raw JSON)
//!        │
//!        ▼
//! Dashboard::on_snapshot()
//!        │
//!        ├──▶ scalar gauges + commits/rollbacks per second
//!        ├──▶ PoolGauges (reconciled by JNDI name)
//!        │
//! History::record() (for sparklines)
//! HealthReport::assess() (on demand, against Thresholds)
//! ```

pub mod dashboard;
pub mod health;
pub mod history;

pub use dashboard::{Dashboard, PoolGauges};
pub use health::{HealthReport, HealthStatus, PoolHealth, Thresholds};
pub use history::History;
