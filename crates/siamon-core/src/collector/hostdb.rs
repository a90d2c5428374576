//! Host database: hosts known to the renter, split by state.

use super::collector::{CollectError, Collector};
use crate::api::NodeApi;
use crate::api::types::HostDbEntry;

/// State of a host as seen by the renter's host database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCategory {
    /// Accepting contracts, last scan succeeded.
    Active,
    /// Online but not accepting contracts.
    Inactive,
    /// Never scanned, or the last scan failed.
    Offline,
}

impl HostCategory {
    pub fn classify(host: &HostDbEntry) -> Self {
        match host.last_scan_succeeded() {
            Some(true) if host.accepting_contracts => HostCategory::Active,
            Some(true) => HostCategory::Inactive,
            Some(false) | None => HostCategory::Offline,
        }
    }
}

/// Per-category host counts. The categories partition the host list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostCounts {
    pub active: u64,
    pub inactive: u64,
    pub offline: u64,
}

impl HostCounts {
    pub fn tally<'a>(hosts: impl IntoIterator<Item = &'a HostDbEntry>) -> Self {
        let mut counts = HostCounts::default();
        for host in hosts {
            match HostCategory::classify(host) {
                HostCategory::Active => counts.active += 1,
                HostCategory::Inactive => counts.inactive += 1,
                HostCategory::Offline => counts.offline += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> u64 {
        self.active + self.inactive + self.offline
    }
}

impl<A: NodeApi> Collector<A> {
    pub fn collect_hostdb(&self) -> Result<(), CollectError> {
        let all = self
            .api
            .hostdb_all()
            .map_err(|e| CollectError::api("/hostdb/all", e))?;
        let counts = HostCounts::tally(&all.hosts);

        let gauges = &self.metrics.hostdb;
        gauges.num_all_hosts.set(all.hosts.len() as f64);
        gauges.num_active_hosts.set(counts.active as f64);
        gauges.num_inactive_hosts.set(counts.inactive as f64);
        gauges.num_offline_hosts.set(counts.offline as f64);
        Ok(())
    }
}
