//! Dashboard state derived from the snapshot stream.
//!
//! This module folds a time-ordered sequence of snapshots into the state a
//! dashboard renders: the latest value of every scalar reading, per-second
//! transaction rates derived from consecutive cumulative counters, and a
//! mapping of connection pools reconciled by JNDI name.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::source::{ConnectionPool, Snapshot};

/// The previous snapshot's cumulative counters plus its arrival time.
///
/// Exactly one sample is retained at a time; it is all the state needed to
/// derive the next per-second rates.
#[derive(Debug, Clone, Copy)]
struct RateSample {
    committed_tx: u64,
    rolled_back_tx: u64,
    taken_at: Instant,
}

/// Tracked metrics for one connection pool.
///
/// The aggregate is created when its JNDI name first appears in a snapshot
/// and updated in place on every later appearance, so `first_observed_in`
/// and `observations` survive updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolGauges {
    jndi_name: String,
    free_connections: u32,
    used_connections: u32,
    wait_queue_length: u32,
    potential_leaks: u32,
    first_observed_in: u64,
    observations: u64,
}

impl PoolGauges {
    fn new(pool: &ConnectionPool, snapshot_id: u64) -> Self {
        Self {
            jndi_name: pool.jndi_name.clone(),
            free_connections: pool.num_conn_free,
            used_connections: pool.num_conn_used,
            wait_queue_length: pool.wait_queue_length,
            potential_leaks: pool.num_potential_conn_leak,
            first_observed_in: snapshot_id,
            observations: 1,
        }
    }

    /// Overwrite the gauges with a newer reading.
    fn update(&mut self, pool: &ConnectionPool) {
        self.free_connections = pool.num_conn_free;
        self.used_connections = pool.num_conn_used;
        self.wait_queue_length = pool.wait_queue_length;
        self.potential_leaks = pool.num_potential_conn_leak;
        self.observations += 1;
    }

    pub fn jndi_name(&self) -> &str {
        &self.jndi_name
    }

    pub fn free_connections(&self) -> u32 {
        self.free_connections
    }

    pub fn used_connections(&self) -> u32 {
        self.used_connections
    }

    pub fn wait_queue_length(&self) -> u32 {
        self.wait_queue_length
    }

    pub fn potential_leaks(&self) -> u32 {
        self.potential_leaks
    }

    /// Id of the snapshot that introduced this pool.
    pub fn first_observed_in(&self) -> u64 {
        self.first_observed_in
    }

    /// How many snapshots have included this pool so far.
    pub fn observations(&self) -> u64 {
        self.observations
    }
}

/// Current server state plus derived transaction rates.
///
/// Every scalar field mirrors the latest snapshot with no smoothing or
/// averaging. The two rates are re-derived on each arrival from the
/// previously retained counters; see [`Dashboard::on_snapshot`].
#[derive(Debug, Default)]
pub struct Dashboard {
    used_heap_size_in_mb: u64,
    thread_count: u64,
    peak_thread_count: u32,
    busy_threads: i32,
    queued_connections: u32,
    commit_count: u64,
    rollback_count: u64,
    total_errors: u64,
    active_sessions: u32,
    expired_sessions: u32,
    deadlocked_threads: Option<String>,
    snapshot_id: u64,
    commits_per_second: f64,
    rollbacks_per_second: f64,
    pools: HashMap<String, PoolGauges>,
    sample: Option<RateSample>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb the next snapshot in arrival order.
    ///
    /// Scalar fields are overwritten with the snapshot's values, the pool
    /// mapping is reconciled by JNDI name, and the per-second transaction
    /// rates are re-derived from the counters retained on the previous
    /// call. The first call leaves both rates at zero.
    pub fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self.absorb(snapshot, Instant::now());
    }

    /// [`Dashboard::on_snapshot`] with an explicit arrival time.
    fn absorb(&mut self, snapshot: &Snapshot, now: Instant) {
        self.used_heap_size_in_mb = snapshot.used_heap_size_in_mb;
        self.thread_count = snapshot.thread_count;
        self.peak_thread_count = snapshot.peak_thread_count;
        self.busy_threads = snapshot.current_thread_busy;
        self.queued_connections = snapshot.queued_connections;
        self.commit_count = snapshot.committed_tx;
        self.rollback_count = snapshot.rolled_back_tx;
        self.total_errors = snapshot.total_errors;
        self.active_sessions = snapshot.active_sessions;
        self.expired_sessions = snapshot.expired_sessions;
        self.deadlocked_threads = snapshot.deadlocked_threads.clone();
        self.snapshot_id = snapshot.id;

        self.reconcile_pools(snapshot);

        if let Some(sample) = self.sample {
            let elapsed = now.duration_since(sample.taken_at);
            if let Some(rate) = per_second(elapsed, sample.committed_tx, snapshot.committed_tx) {
                self.commits_per_second = rate;
            }
            if let Some(rate) = per_second(elapsed, sample.rolled_back_tx, snapshot.rolled_back_tx)
            {
                self.rollbacks_per_second = rate;
            }
        }

        self.sample = Some(RateSample {
            committed_tx: snapshot.committed_tx,
            rolled_back_tx: snapshot.rolled_back_tx,
            taken_at: now,
        });
    }

    /// Fold the snapshot's pool list into the tracked mapping.
    ///
    /// Existing aggregates are updated in place; unknown JNDI names are
    /// inserted. Pools that stop appearing in snapshots stay in the
    /// mapping - the upstream feed never retires a pool.
    fn reconcile_pools(&mut self, snapshot: &Snapshot) {
        for pool in &snapshot.pools {
            match self.pools.get_mut(&pool.jndi_name) {
                Some(gauges) => gauges.update(pool),
                None => {
                    debug!(pool = %pool.jndi_name, "tracking new connection pool");
                    self.pools
                        .insert(pool.jndi_name.clone(), PoolGauges::new(pool, snapshot.id));
                }
            }
        }
    }

    pub fn used_heap_size_in_mb(&self) -> u64 {
        self.used_heap_size_in_mb
    }

    pub fn thread_count(&self) -> u64 {
        self.thread_count
    }

    pub fn peak_thread_count(&self) -> u32 {
        self.peak_thread_count
    }

    pub fn busy_threads(&self) -> i32 {
        self.busy_threads
    }

    pub fn queued_connections(&self) -> u32 {
        self.queued_connections
    }

    pub fn commit_count(&self) -> u64 {
        self.commit_count
    }

    pub fn rollback_count(&self) -> u64 {
        self.rollback_count
    }

    pub fn total_errors(&self) -> u64 {
        self.total_errors
    }

    pub fn active_sessions(&self) -> u32 {
        self.active_sessions
    }

    pub fn expired_sessions(&self) -> u32 {
        self.expired_sessions
    }

    /// Deadlocked-thread description from the latest snapshot, if any.
    pub fn deadlocked_threads(&self) -> Option<&str> {
        self.deadlocked_threads.as_deref()
    }

    /// Id of the latest absorbed snapshot.
    pub fn snapshot_id(&self) -> u64 {
        self.snapshot_id
    }

    pub fn commits_per_second(&self) -> f64 {
        self.commits_per_second
    }

    pub fn rollbacks_per_second(&self) -> f64 {
        self.rollbacks_per_second
    }

    /// The tracked pools, keyed by JNDI name.
    pub fn pools(&self) -> &HashMap<String, PoolGauges> {
        &self.pools
    }

    /// Look up one tracked pool by JNDI name.
    pub fn pool(&self, jndi_name: &str) -> Option<&PoolGauges> {
        self.pools.get(jndi_name)
    }
}

/// Per-second rate between two cumulative counter readings.
///
/// The elapsed time is truncated to whole seconds before dividing, and the
/// division itself stays in integers: a 2500 ms gap counts as 2 seconds and
/// the quotient is rounded toward zero. Returns `None` inside the first
/// whole second - the rate is undefined for that tick and the caller keeps
/// its previous value. A counter that went backwards (collector restart)
/// clamps the delta to zero.
fn per_second(elapsed: Duration, old: u64, new: u64) -> Option<f64> {
    let secs = elapsed.as_millis() / 1000;
    if secs == 0 {
        return None;
    }
    if new < old {
        warn!(old, new, "cumulative counter went backwards, clamping rate to zero");
    }
    let delta = u128::from(new.saturating_sub(old));
    Some((delta / secs) as f64)
}
