//! Health grading against configurable thresholds.
//!
//! Turns the dashboard's current state into health statuses a rendering
//! layer can color-code, plus an escalation list of pools that need
//! attention.

use serde::Deserialize;

use super::dashboard::Dashboard;

/// Thresholds for health status computation.
///
/// These thresholds determine when the server or one of its pools is
/// considered in warning or critical state.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Heap usage in MB that triggers a warning.
    pub heap_warning_mb: u64,
    /// Heap usage in MB that triggers critical status.
    pub heap_critical_mb: u64,
    /// Pool wait-queue length that triggers a warning.
    pub queue_warning: u32,
    /// Pool wait-queue length that triggers critical status.
    pub queue_critical: u32,
    /// Potential-leak count that triggers a warning.
    pub leak_warning: u32,
    /// Potential-leak count that triggers critical status.
    pub leak_critical: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            heap_warning_mb: 1024,
            heap_critical_mb: 2048,
            queue_warning: 1,
            queue_critical: 10,
            leak_warning: 1,
            leak_critical: 5,
        }
    }
}

/// Health status for the server or one of its pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

impl HealthStatus {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "OK",
            HealthStatus::Warning => "WARN",
            HealthStatus::Critical => "CRIT",
        }
    }
}

/// One pool's grade with the readings that produced it.
#[derive(Debug, Clone)]
pub struct PoolHealth {
    pub jndi_name: String,
    pub queued: u32,
    pub potential_leaks: u32,
    pub status: HealthStatus,
}

/// Grades for the server and every tracked pool.
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub server: HealthStatus,
    pub pools: Vec<PoolHealth>,
}

impl HealthReport {
    /// Grade the dashboard's current state.
    ///
    /// Pools are sorted by status (critical first), then by name. Any
    /// deadlocked-thread report makes the server critical regardless of
    /// heap usage.
    pub fn assess(dashboard: &Dashboard, thresholds: &Thresholds) -> Self {
        let mut pools: Vec<PoolHealth> = dashboard
            .pools()
            .values()
            .map(|gauges| {
                let queue_status = grade(
                    u64::from(gauges.wait_queue_length()),
                    u64::from(thresholds.queue_warning),
                    u64::from(thresholds.queue_critical),
                );
                let leak_status = grade(
                    u64::from(gauges.potential_leaks()),
                    u64::from(thresholds.leak_warning),
                    u64::from(thresholds.leak_critical),
                );
                PoolHealth {
                    jndi_name: gauges.jndi_name().to_string(),
                    queued: gauges.wait_queue_length(),
                    potential_leaks: gauges.potential_leaks(),
                    status: queue_status.max(leak_status),
                }
            })
            .collect();

        pools.sort_by(|a, b| b.status.cmp(&a.status).then_with(|| a.jndi_name.cmp(&b.jndi_name)));

        let server = if dashboard.deadlocked_threads().is_some() {
            HealthStatus::Critical
        } else {
            grade(
                dashboard.used_heap_size_in_mb(),
                thresholds.heap_warning_mb,
                thresholds.heap_critical_mb,
            )
        };

        Self { server, pools }
    }

    /// Pools needing attention, critical first.
    pub fn escalations(&self) -> Vec<&PoolHealth> {
        self.pools.iter().filter(|p| p.status != HealthStatus::Healthy).collect()
    }

    /// Worst status across the server and all pools.
    pub fn worst(&self) -> HealthStatus {
        self.pools.iter().map(|p| p.status).fold(self.server, HealthStatus::max)
    }
}

fn grade(value: u64, warning: u64, critical: u64) -> HealthStatus {
    if value >= critical {
        HealthStatus::Critical
    } else if value >= warning {
        HealthStatus::Warning
    } else {
        HealthStatus::Healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{ConnectionPool, Snapshot};

    fn dashboard_with(snapshot: &Snapshot) -> Dashboard {
        let mut dashboard = Dashboard::new();
        dashboard.on_snapshot(snapshot);
        dashboard
    }

    fn pool(jndi_name: &str, queued: u32, leaks: u32) -> ConnectionPool {
        ConnectionPool {
            jndi_name: jndi_name.to_string(),
            wait_queue_length: queued,
            num_potential_conn_leak: leaks,
            ..ConnectionPool::default()
        }
    }

    #[test]
    fn test_healthy_server() {
        let dashboard = dashboard_with(&Snapshot {
            used_heap_size_in_mb: 200,
            ..Snapshot::default()
        });

        let report = HealthReport::assess(&dashboard, &Thresholds::default());
        assert_eq!(report.server, HealthStatus::Healthy);
        assert_eq!(report.worst(), HealthStatus::Healthy);
        assert!(report.escalations().is_empty());
    }

    #[test]
    fn test_heap_thresholds() {
        let thresholds = Thresholds::default();

        let warning = dashboard_with(&Snapshot {
            used_heap_size_in_mb: 1024,
            ..Snapshot::default()
        });
        assert_eq!(
            HealthReport::assess(&warning, &thresholds).server,
            HealthStatus::Warning
        );

        let critical = dashboard_with(&Snapshot {
            used_heap_size_in_mb: 4096,
            ..Snapshot::default()
        });
        assert_eq!(
            HealthReport::assess(&critical, &thresholds).server,
            HealthStatus::Critical
        );
    }

    #[test]
    fn test_deadlock_is_always_critical() {
        let dashboard = dashboard_with(&Snapshot {
            used_heap_size_in_mb: 50,
            deadlocked_threads: Some("thread-3 waits on thread-7".to_string()),
            ..Snapshot::default()
        });

        let report = HealthReport::assess(&dashboard, &Thresholds::default());
        assert_eq!(report.server, HealthStatus::Critical);
    }

    #[test]
    fn test_pool_grading_takes_worst_of_queue_and_leaks() {
        let dashboard = dashboard_with(&Snapshot {
            pools: vec![pool("jdbc/orders", 0, 6)],
            ..Snapshot::default()
        });

        let report = HealthReport::assess(&dashboard, &Thresholds::default());
        assert_eq!(report.pools[0].status, HealthStatus::Critical);
        assert_eq!(report.worst(), HealthStatus::Critical);
    }

    #[test]
    fn test_escalations_lists_unhealthy_pools_critical_first() {
        let dashboard = dashboard_with(&Snapshot {
            pools: vec![
                pool("jdbc/calm", 0, 0),
                pool("jdbc/queued", 2, 0),
                pool("jdbc/leaky", 0, 9),
            ],
            ..Snapshot::default()
        });

        let report = HealthReport::assess(&dashboard, &Thresholds::default());
        let escalations = report.escalations();

        assert_eq!(escalations.len(), 2);
        assert_eq!(escalations[0].jndi_name, "jdbc/leaky");
        assert_eq!(escalations[0].status, HealthStatus::Critical);
        assert_eq!(escalations[1].jndi_name, "jdbc/queued");
        assert_eq!(escalations[1].status, HealthStatus::Warning);
    }

    #[test]
    fn test_status_symbols() {
        assert_eq!(HealthStatus::Healthy.symbol(), "OK");
        assert_eq!(HealthStatus::Warning.symbol(), "WARN");
        assert_eq!(HealthStatus::Critical.symbol(), "CRIT");
    }
}
