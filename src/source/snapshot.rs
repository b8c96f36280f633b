//! Shared types for server-health snapshots.
//!
//! These types match the JSON feed emitted by the server-side collector.
//! They serve as the common data format between the collector producer and
//! this dashboard consumer.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One cumulative-counter reading of server health at a point in time.
///
/// The transaction counters (`committed_tx`, `rolled_back_tx`) and
/// `total_errors` are cumulative since server start and non-decreasing
/// within a session; everything else is a point-in-time gauge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Monotonically increasing snapshot identifier.
    pub id: u64,

    /// Used heap, in megabytes.
    #[serde(rename = "usedHeapSizeInMB")]
    pub used_heap_size_in_mb: u64,

    /// Live threads.
    pub thread_count: u64,

    /// High-water mark of live threads.
    pub peak_thread_count: u32,

    /// Busy worker threads; negative when the server does not report it.
    pub current_thread_busy: i32,

    /// Committed transactions since server start.
    #[serde(rename = "committedTX")]
    pub committed_tx: u64,

    /// Rolled-back transactions since server start.
    #[serde(rename = "rolledBackTX")]
    pub rolled_back_tx: u64,

    /// Requests waiting for a connection.
    pub queued_connections: u32,

    /// Errors logged since server start.
    pub total_errors: u64,

    /// Active HTTP sessions.
    pub active_sessions: u32,

    /// Expired HTTP sessions.
    pub expired_sessions: u32,

    /// Description of deadlocked threads, if the server detected any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadlocked_threads: Option<String>,

    /// Connection-pool states, one per pool, in collector order.
    #[serde(default)]
    pub pools: Vec<ConnectionPool>,

    /// Names of the applications deployed on the server.
    #[serde(default)]
    pub apps: BTreeSet<String>,
}

/// Current metrics for one connection pool, identified by its JNDI name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionPool {
    pub jndi_name: String,
    pub num_conn_free: u32,
    pub num_conn_used: u32,
    pub wait_queue_length: u32,
    pub num_potential_conn_leak: u32,
}
