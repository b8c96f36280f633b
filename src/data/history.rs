//! Historical readings for sparklines and trend display.

use std::collections::{HashMap, VecDeque};

use crate::source::Snapshot;

/// Maximum number of historical readings to keep.
const MAX_HISTORY_SIZE: usize = 60;

/// Bounded history of recent snapshot readings.
///
/// Records a fixed window of readings so a rendering layer can draw trend
/// sparklines: heap usage and per-pool used connections as gauges, the
/// transaction totals as cumulative counters differenced per interval.
#[derive(Debug, Clone, Default)]
pub struct History {
    heap_used_mb: VecDeque<u64>,
    commit_totals: VecDeque<u64>,
    rollback_totals: VecDeque<u64>,
    pool_used: HashMap<String, VecDeque<u64>>,
}

impl History {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the readings of one snapshot.
    pub fn record(&mut self, snapshot: &Snapshot) {
        push_bounded(&mut self.heap_used_mb, snapshot.used_heap_size_in_mb);
        push_bounded(&mut self.commit_totals, snapshot.committed_tx);
        push_bounded(&mut self.rollback_totals, snapshot.rolled_back_tx);

        for pool in &snapshot.pools {
            let series = self.pool_used.entry(pool.jndi_name.clone()).or_default();
            push_bounded(series, u64::from(pool.num_conn_used));
        }
    }

    /// Number of recorded readings (saturates at the window size).
    pub fn len(&self) -> usize {
        self.heap_used_mb.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap_used_mb.is_empty()
    }

    /// Sparkline for heap usage (normalized to 0-7 for 8 bar levels).
    ///
    /// Returns an empty Vec if there's not enough history.
    pub fn heap_sparkline(&self) -> Vec<u8> {
        normalize_gauge(&self.heap_used_mb)
    }

    /// Sparkline for commit activity per interval.
    pub fn commit_sparkline(&self) -> Vec<u8> {
        normalize_deltas(&self.commit_totals)
    }

    /// Sparkline for rollback activity per interval.
    pub fn rollback_sparkline(&self) -> Vec<u8> {
        normalize_deltas(&self.rollback_totals)
    }

    /// Sparkline for one pool's used connections.
    ///
    /// Returns an empty Vec for an unknown pool or not enough history.
    pub fn pool_used_sparkline(&self, jndi_name: &str) -> Vec<u8> {
        self.pool_used.get(jndi_name).map(normalize_gauge).unwrap_or_default()
    }
}

fn push_bounded(series: &mut VecDeque<u64>, value: u64) {
    series.push_back(value);
    if series.len() > MAX_HISTORY_SIZE {
        series.pop_front();
    }
}

/// Normalize per-interval deltas of a cumulative counter to 0-7.
fn normalize_deltas(values: &VecDeque<u64>) -> Vec<u8> {
    if values.len() < 2 {
        return Vec::new();
    }

    let deltas: Vec<i64> =
        values.iter().zip(values.iter().skip(1)).map(|(a, b)| *b as i64 - *a as i64).collect();

    scale(&deltas)
}

/// Normalize absolute gauge values to 0-7.
fn normalize_gauge(values: &VecDeque<u64>) -> Vec<u8> {
    if values.len() < 2 {
        return Vec::new();
    }

    let values: Vec<i64> = values.iter().map(|v| *v as i64).collect();
    scale(&values)
}

/// Scale values to the 0-7 range for sparkline display.
fn scale(values: &[i64]) -> Vec<u8> {
    let max = values.iter().copied().max().unwrap_or(1).max(1);
    let min = values.iter().copied().min().unwrap_or(0).min(0);
    let range = (max - min).max(1) as f64;

    values
        .iter()
        .map(|&v| {
            let normalized = ((v - min) as f64 / range * 7.0) as u8;
            normalized.min(7)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ConnectionPool;

    fn snapshot(heap: u64, committed: u64, pool_used: u32) -> Snapshot {
        Snapshot {
            used_heap_size_in_mb: heap,
            committed_tx: committed,
            pools: vec![ConnectionPool {
                jndi_name: "jdbc/sample".to_string(),
                num_conn_used: pool_used,
                ..ConnectionPool::default()
            }],
            ..Snapshot::default()
        }
    }

    #[test]
    fn test_history_starts_empty() {
        let history = History::new();
        assert!(history.is_empty());
        assert!(history.heap_sparkline().is_empty());
        assert!(history.commit_sparkline().is_empty());
    }

    #[test]
    fn test_single_reading_yields_no_sparkline() {
        let mut history = History::new();
        history.record(&snapshot(100, 10, 1));

        assert_eq!(history.len(), 1);
        assert!(history.heap_sparkline().is_empty());
        assert!(history.pool_used_sparkline("jdbc/sample").is_empty());
    }

    #[test]
    fn test_sparkline_values_stay_in_range() {
        let mut history = History::new();
        for i in 0..10u64 {
            history.record(&snapshot(100 + i * 37, i * i, (i % 4) as u32));
        }

        for bar in history.heap_sparkline() {
            assert!(bar <= 7);
        }
        for bar in history.commit_sparkline() {
            assert!(bar <= 7);
        }
        for bar in history.pool_used_sparkline("jdbc/sample") {
            assert!(bar <= 7);
        }
    }

    #[test]
    fn test_commit_sparkline_tracks_activity_not_totals() {
        let mut history = History::new();
        // Totals climb steadily: per-interval activity is flat
        for i in 0..5u64 {
            history.record(&snapshot(100, i * 10, 0));
        }

        let bars = history.commit_sparkline();
        assert_eq!(bars.len(), 4);
        let first = bars[0];
        assert!(bars.iter().all(|&b| b == first));
    }

    #[test]
    fn test_history_is_bounded() {
        let mut history = History::new();
        for i in 0..200u64 {
            history.record(&snapshot(i, i, 0));
        }

        assert_eq!(history.len(), MAX_HISTORY_SIZE);
    }

    #[test]
    fn test_unknown_pool_yields_empty_sparkline() {
        let mut history = History::new();
        history.record(&snapshot(100, 10, 1));
        history.record(&snapshot(100, 20, 2));

        assert!(history.pool_used_sparkline("jdbc/other").is_empty());
        assert!(!history.pool_used_sparkline("jdbc/sample").is_empty());
    }
}
