//! Gauge registry exported to Prometheus.
//!
//! All gauges are created and registered once in [`SiaMetrics::new`] and are
//! never removed. Collectors overwrite values; the scrape server only reads.
//! `prometheus::Gauge` stores its value in an atomic, so a scrape never
//! observes a torn write.
//!
//! Metric names are part of the exporter's public interface and must stay
//! stable for existing dashboards.

use std::collections::BTreeMap;

use prometheus::{Encoder, Gauge, Registry, TextEncoder};

/// Registers gauges and keeps a name index for read-only lookups.
struct GaugeBuilder<'a> {
    registry: &'a Registry,
    index: &'a mut BTreeMap<String, Gauge>,
}

impl GaugeBuilder<'_> {
    fn gauge(&mut self, name: &str, help: &str) -> prometheus::Result<Gauge> {
        let gauge = Gauge::new(name, help)?;
        self.registry.register(Box::new(gauge.clone()))?;
        self.index.insert(name.to_string(), gauge.clone());
        Ok(gauge)
    }
}

pub struct DaemonGauges {
    pub rate_limit_download: Gauge,
    pub rate_limit_upload: Gauge,
}

impl DaemonGauges {
    fn register(b: &mut GaugeBuilder<'_>) -> prometheus::Result<Self> {
        Ok(Self {
            rate_limit_download: b.gauge(
                "global_rate_limit_download",
                "global download ratelimit (bytes-per-second)",
            )?,
            rate_limit_upload: b.gauge(
                "global_rate_limit_upload",
                "global upload ratelimit (bytes-per-second)",
            )?,
        })
    }
}

pub struct ConsensusGauges {
    pub module_loaded: Gauge,
    pub synced: Gauge,
    pub height: Gauge,
    pub difficulty: Gauge,
    pub hashrate: Gauge,
}

impl ConsensusGauges {
    fn register(b: &mut GaugeBuilder<'_>) -> prometheus::Result<Self> {
        Ok(Self {
            module_loaded: b.gauge(
                "consensus_module_loaded",
                "Is the consensus module loaded. 0=not loaded.  1=loaded",
            )?,
            synced: b.gauge(
                "consensus_synced",
                "Consensus sync status, 0=not synced.  1=synced",
            )?,
            height: b.gauge("consensus_height", "Consensus block height")?,
            difficulty: b.gauge("consensus_difficulty", "Consensus difficulty")?,
            hashrate: b.gauge(
                "consensus_hashrate",
                "Estimated network hashrate (difficulty / 600s block time)",
            )?,
        })
    }
}

pub struct WalletGauges {
    pub module_loaded: Gauge,
    /// 1 when the wallet is locked, 0 when unlocked. Dashboards built for
    /// exporters that always reported 1 here will see the value change.
    pub locked: Gauge,
    pub confirmed_siacoin_balance_hastings: Gauge,
    pub confirmed_siacoin_balance: Gauge,
    pub siafund_balance: Gauge,
    pub siafund_claim_balance: Gauge,
    pub num_addresses: Gauge,
}

impl WalletGauges {
    fn register(b: &mut GaugeBuilder<'_>) -> prometheus::Result<Self> {
        Ok(Self {
            module_loaded: b.gauge(
                "wallet_module_loaded",
                "Is the wallet module loaded. 0=not loaded.  1=loaded",
            )?,
            locked: b.gauge(
                "wallet_locked",
                "Is the wallet locked. 0=not locked.  1=locked",
            )?,
            confirmed_siacoin_balance_hastings: b.gauge(
                "wallet_confirmed_siacoin_balance_hastings",
                "Wallet confirmed Siacoin balance (Hastings)",
            )?,
            confirmed_siacoin_balance: b.gauge(
                "wallet_confirmed_siacoin_balance",
                "Wallet confirmed Siacoin balance (Siacoins)",
            )?,
            siafund_balance: b.gauge("wallet_siafund_balance", "Wallet Siafund balance")?,
            siafund_claim_balance: b.gauge(
                "wallet_siafund_claim_balance",
                "Wallet Siafund claim balance",
            )?,
            num_addresses: b.gauge(
                "wallet_num_addresses",
                "Number of wallet addresses being tracked by Sia",
            )?,
        })
    }
}

pub struct GatewayGauges {
    pub module_loaded: Gauge,
    pub num_peers: Gauge,
    pub rate_limit_download: Gauge,
    pub rate_limit_upload: Gauge,
}

impl GatewayGauges {
    fn register(b: &mut GaugeBuilder<'_>) -> prometheus::Result<Self> {
        Ok(Self {
            module_loaded: b.gauge(
                "gateway_module_loaded",
                "Is the gateway module loaded. 0=not loaded.  1=loaded",
            )?,
            num_peers: b.gauge("gateway_num_peers", "gateway number of peers")?,
            rate_limit_download: b.gauge(
                "gateway_rate_limit_download",
                "gateway download ratelimit (bytes-per-second)",
            )?,
            rate_limit_upload: b.gauge(
                "gateway_rate_limit_upload",
                "gateway upload ratelimit (bytes-per-second)",
            )?,
        })
    }
}

pub struct HostDbGauges {
    pub num_all_hosts: Gauge,
    pub num_active_hosts: Gauge,
    pub num_inactive_hosts: Gauge,
    pub num_offline_hosts: Gauge,
}

impl HostDbGauges {
    fn register(b: &mut GaugeBuilder<'_>) -> prometheus::Result<Self> {
        Ok(Self {
            num_all_hosts: b.gauge("hostdb_num_all_hosts", "Total number of hosts in hostdb")?,
            num_active_hosts: b.gauge(
                "hostdb_num_active_hosts",
                "Number of active hosts in hostdb",
            )?,
            num_inactive_hosts: b.gauge(
                "hostdb_num_inactive_hosts",
                "Number of inactive hosts in hostdb",
            )?,
            num_offline_hosts: b.gauge(
                "hostdb_num_offline_hosts",
                "Number of offline hosts in hostdb",
            )?,
        })
    }
}

pub struct HostGauges {
    pub accepting_contracts: Gauge,
    pub max_duration: Gauge,
    pub max_download_batch_size: Gauge,
    pub max_revise_batch_size: Gauge,
    pub window_size: Gauge,
    pub collateral: Gauge,
    pub collateral_budget: Gauge,
    pub max_collateral: Gauge,
    pub contract_count: Gauge,
    pub total_storage: Gauge,
    pub remaining_storage: Gauge,
}

impl HostGauges {
    fn register(b: &mut GaugeBuilder<'_>) -> prometheus::Result<Self> {
        Ok(Self {
            accepting_contracts: b.gauge(
                "host_accepting_contracts",
                "Is the host accepting contracts 0=no, 1=yes",
            )?,
            max_duration: b.gauge("host_max_duration", "Max contract duration (blocks)")?,
            max_download_batch_size: b.gauge(
                "host_max_download_batch_size",
                "Max Download Batch Size",
            )?,
            max_revise_batch_size: b.gauge(
                "host_max_revise_batch_size",
                "Max revise Batch Size",
            )?,
            window_size: b.gauge("host_window_size", "Window Size in hours")?,
            collateral: b.gauge(
                "host_collateral",
                "Host Collateral in Siacoins per TB per month",
            )?,
            collateral_budget: b.gauge(
                "host_collateral_budget",
                "Host Collateral budget in Siacoins",
            )?,
            max_collateral: b.gauge(
                "host_max_collateral",
                "Max collateral per contract in Siacoins",
            )?,
            contract_count: b.gauge("host_contract_count", "number of host contracts")?,
            total_storage: b.gauge(
                "host_total_storage",
                "total amount of storage available on the host in bytes",
            )?,
            remaining_storage: b.gauge(
                "host_remaining_storage",
                "amount of storage remaining on the host in bytes",
            )?,
        })
    }
}

pub struct RenterGauges {
    pub module_loaded: Gauge,
    pub aggregate_num_files: Gauge,
    pub aggregate_num_stuck_chunks: Gauge,
    pub aggregate_size: Gauge,
    pub max_health: Gauge,
    pub min_redundancy: Gauge,
    pub rate_limit_download: Gauge,
    pub rate_limit_upload: Gauge,
    pub num_active_contracts: Gauge,
    pub num_passive_contracts: Gauge,
    pub num_refreshed_contracts: Gauge,
    pub num_disabled_contracts: Gauge,
    pub num_expired_contracts: Gauge,
    pub num_expired_refreshed_contracts: Gauge,
    pub allowance_amount: Gauge,
    pub allowance_period: Gauge,
    pub allowance_renew_window: Gauge,
    pub allowance_hosts: Gauge,
    pub allowance_current_spent: Gauge,
    pub allowance_current_unspent: Gauge,
    pub allowance_current_storage: Gauge,
    pub allowance_current_upload: Gauge,
    pub allowance_current_download: Gauge,
    pub allowance_current_fees: Gauge,
    pub allowance_current_unspent_allocated: Gauge,
    pub allowance_current_unspent_unallocated: Gauge,
}

impl RenterGauges {
    fn register(b: &mut GaugeBuilder<'_>) -> prometheus::Result<Self> {
        Ok(Self {
            module_loaded: b.gauge(
                "renter_module_loaded",
                "Is the renter module loaded. 0=not loaded.  1=loaded",
            )?,
            aggregate_num_files: b.gauge(
                "renter_aggregate_num_files",
                "Shows the number of files uploaded to Sia by the renter",
            )?,
            aggregate_num_stuck_chunks: b.gauge(
                "renter_aggregate_num_stuck_chunks",
                "The aggregate number of stuck chunks",
            )?,
            aggregate_size: b.gauge(
                "renter_aggregate_size",
                "The aggregate size of data stored on Sia",
            )?,
            max_health: b.gauge("renter_max_health", "The max health")?,
            min_redundancy: b.gauge("renter_min_redundancy", "The min redundancy")?,
            rate_limit_download: b.gauge(
                "renter_rate_limit_download",
                "renter download ratelimit (bytes-per-second)",
            )?,
            rate_limit_upload: b.gauge(
                "renter_rate_limit_upload",
                "renter upload ratelimit (bytes-per-second)",
            )?,
            num_active_contracts: b.gauge(
                "renter_num_active_contracts",
                "Number of active contracts",
            )?,
            num_passive_contracts: b.gauge(
                "renter_num_passive_contracts",
                "Number of passive contracts",
            )?,
            num_refreshed_contracts: b.gauge(
                "renter_num_refreshed_contracts",
                "Number of refreshed contracts",
            )?,
            num_disabled_contracts: b.gauge(
                "renter_num_disabled_contracts",
                "Number of disabled contracts",
            )?,
            num_expired_contracts: b.gauge(
                "renter_num_expired_contracts",
                "Number of expired contracts",
            )?,
            num_expired_refreshed_contracts: b.gauge(
                "renter_num_expired_refreshed_contracts",
                "Number of expired refreshed contracts",
            )?,
            allowance_amount: b.gauge(
                "renter_allowance_amount",
                "Renter allowance Amount (siacoins)",
            )?,
            allowance_period: b.gauge(
                "renter_allowance_period",
                "Renter allowance period length (blocks)",
            )?,
            allowance_renew_window: b.gauge(
                "renter_allowance_renew_window",
                "Renter allowance renew window (blocks)",
            )?,
            allowance_hosts: b.gauge("renter_allowance_hosts", "Renter allowance hosts")?,
            allowance_current_spent: b.gauge(
                "renter_allowance_current_spent",
                "Amount of allowance in Siacoins spent in the current period",
            )?,
            allowance_current_unspent: b.gauge(
                "renter_allowance_current_unspent",
                "Unspent amount of allowance in Siacoins in the current period",
            )?,
            allowance_current_storage: b.gauge(
                "renter_allowance_current_storage",
                "Amount of allowance in Siacoins spent in the current period on storage",
            )?,
            allowance_current_upload: b.gauge(
                "renter_allowance_current_upload",
                "Amount of allowance in Siacoins spent in the current period on upload bandwidth",
            )?,
            allowance_current_download: b.gauge(
                "renter_allowance_current_download",
                "Amount of allowance in Siacoins spent in the current period on download bandwidth",
            )?,
            allowance_current_fees: b.gauge(
                "renter_allowance_current_fees",
                "Amount of allowance in Siacoins spent in the current period on fees",
            )?,
            allowance_current_unspent_allocated: b.gauge(
                "renter_allowance_current_unspent_allocated",
                "Amount of allocated unspent allowance in Siacoins",
            )?,
            allowance_current_unspent_unallocated: b.gauge(
                "renter_allowance_current_unspent_unallocated",
                "Amount of unallocated unspent allowance in Siacoins",
            )?,
        })
    }
}

/// All exported gauges, grouped by subsystem.
pub struct SiaMetrics {
    registry: Registry,
    index: BTreeMap<String, Gauge>,
    pub daemon: DaemonGauges,
    pub consensus: ConsensusGauges,
    pub wallet: WalletGauges,
    pub gateway: GatewayGauges,
    pub hostdb: HostDbGauges,
    pub host: HostGauges,
    pub renter: RenterGauges,
}

impl SiaMetrics {
    /// Creates every gauge (value 0) in a fresh registry.
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();
        let mut index = BTreeMap::new();
        let mut b = GaugeBuilder {
            registry: &registry,
            index: &mut index,
        };

        let daemon = DaemonGauges::register(&mut b)?;
        let consensus = ConsensusGauges::register(&mut b)?;
        let wallet = WalletGauges::register(&mut b)?;
        let gateway = GatewayGauges::register(&mut b)?;
        let hostdb = HostDbGauges::register(&mut b)?;
        let host = HostGauges::register(&mut b)?;
        let renter = RenterGauges::register(&mut b)?;

        Ok(Self {
            registry,
            index,
            daemon,
            consensus,
            wallet,
            gateway,
            hostdb,
            host,
            renter,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Current value of the gauge called `name`.
    pub fn value(&self, name: &str) -> Option<f64> {
        self.index.get(name).map(Gauge::get)
    }

    /// Names of all registered gauges, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Renders the registry in the Prometheus text exposition format.
    pub fn encode_text(&self) -> prometheus::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_gauges_start_at_zero() {
        let metrics = SiaMetrics::new().unwrap();
        assert_eq!(metrics.names().count(), 59);
        for name in metrics.names() {
            assert_eq!(metrics.value(name), Some(0.0), "{}", name);
        }
    }

    #[test]
    fn test_value_reflects_writes() {
        let metrics = SiaMetrics::new().unwrap();
        metrics.consensus.height.set(250_000.0);
        assert_eq!(metrics.value("consensus_height"), Some(250_000.0));
        assert_eq!(metrics.value("no_such_gauge"), None);
    }

    #[test]
    fn test_encode_text_contains_help_and_value() {
        let metrics = SiaMetrics::new().unwrap();
        metrics.gateway.num_peers.set(8.0);
        let text = metrics.encode_text().unwrap();
        assert!(text.contains("# HELP gateway_num_peers gateway number of peers"));
        assert!(text.contains("# TYPE gateway_num_peers gauge"));
        assert!(text.contains("gateway_num_peers 8"));
        assert!(text.contains("renter_module_loaded 0"));
    }

    #[test]
    fn test_registries_are_independent() {
        let a = SiaMetrics::new().unwrap();
        let b = SiaMetrics::new().unwrap();
        a.wallet.locked.set(1.0);
        assert_eq!(b.value("wallet_locked"), Some(0.0));
    }
}
