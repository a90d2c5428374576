//! Pre-built node states for testing.

use serde::de::IgnoredAny;

use super::api::MockApi;
use crate::api::types::{
    Allowance, DirectoryInfo, HostDbEntry, HostExternalSettings, HostFinancialMetrics,
    HostInternalSettings, HostScan, RenterFinancialMetrics, RenterSettings,
};
use crate::api::{
    ConsensusStatus, DaemonSettings, GatewayInfo, HostDbAll, HostInfo, RenterContracts,
    RenterDirectory, RenterInfo, WalletAddresses, WalletStatus,
};
use crate::currency::Currency;

const SC: u128 = 1_000_000_000_000_000_000_000_000;

fn siacoins(amount: u128) -> Currency {
    Currency::new(amount * SC)
}

fn scanned_host(accepting: bool, history: &[bool]) -> HostDbEntry {
    HostDbEntry {
        accepting_contracts: accepting,
        scan_history: history
            .iter()
            .map(|&success| HostScan { success })
            .collect(),
    }
}

impl MockApi {
    /// A synced node running every module, with a funded renter and a host
    /// offering 4 TB.
    ///
    /// Renter spending: fees 10, upload 5, download 3, storage 2 out of
    /// 30 SC allocated, 25 SC unspent.
    pub fn typical_node() -> Self {
        let mut api = Self::new();

        api.daemon_settings = Ok(DaemonSettings {
            max_download_speed: 1_000_000,
            max_upload_speed: 2_000_000,
        });

        api.consensus = Ok(ConsensusStatus {
            synced: true,
            height: 250_000,
            difficulty: Currency::new(3_000_000_000_000_000_000),
        });

        api.wallet = Ok(WalletStatus {
            unlocked: true,
            confirmed_siacoin_balance: siacoins(1_250),
            siafund_balance: Currency::ZERO,
            siacoin_claim_balance: Currency::ZERO,
        });
        api.wallet_addresses = Ok(WalletAddresses {
            addresses: vec![
                "a3d2e0c9b4f1".to_string(),
                "7f00c1e2d3b4".to_string(),
                "0e9d8c7b6a59".to_string(),
            ],
        });

        api.gateway = Ok(GatewayInfo {
            peers: vec![IgnoredAny; 3],
            max_download_speed: 500_000,
            max_upload_speed: 250_000,
        });

        api.hostdb_all = Ok(HostDbAll {
            hosts: vec![
                scanned_host(true, &[true, true]),
                scanned_host(true, &[false, true]),
                scanned_host(false, &[true]),
                scanned_host(true, &[true, false]),
            ],
        });

        api.host = Ok(HostInfo {
            external_settings: HostExternalSettings {
                accepting_contracts: true,
                total_storage: 4_000_000_000_000,
                remaining_storage: 1_000_000_000_000,
            },
            internal_settings: HostInternalSettings {
                max_duration: 25_920,
                max_download_batch_size: 17_825_792,
                max_revise_batch_size: 17_825_792,
                window_size: 144,
                // ~100 SC per TB per month
                collateral: Currency::new(23_148_148_148),
                collateral_budget: siacoins(5_000),
                max_collateral: siacoins(1_000),
            },
            financial_metrics: HostFinancialMetrics { contract_count: 42 },
        });

        api.renter_root_dir = Ok(RenterDirectory {
            directories: vec![
                DirectoryInfo {
                    aggregate_num_files: 120,
                    aggregate_num_stuck_chunks: 2,
                    aggregate_size: 5_000_000_000,
                    max_health: 0.25,
                    min_redundancy: 2.5,
                },
                DirectoryInfo {
                    aggregate_num_files: 20,
                    ..DirectoryInfo::default()
                },
            ],
        });
        api.renter_contracts_disabled = Ok(RenterContracts {
            active: vec![IgnoredAny; 3],
            passive: vec![IgnoredAny; 1],
            disabled: vec![IgnoredAny; 2],
            ..RenterContracts::default()
        });
        api.renter_contracts_expired = Ok(RenterContracts {
            active: vec![IgnoredAny; 3],
            passive: vec![IgnoredAny; 1],
            expired: vec![IgnoredAny; 4],
            expired_refreshed: vec![IgnoredAny; 1],
            ..RenterContracts::default()
        });
        api.renter = Ok(RenterInfo {
            settings: RenterSettings {
                allowance: Allowance {
                    funds: siacoins(500),
                    hosts: 50,
                    period: 12_960,
                    renew_window: 4_320,
                },
                max_download_speed: 0,
                max_upload_speed: 1_000_000,
            },
            financial_metrics: RenterFinancialMetrics {
                contract_fees: siacoins(10),
                total_allocated: siacoins(30),
                download_spending: siacoins(3),
                storage_spending: siacoins(2),
                upload_spending: siacoins(5),
                unspent: siacoins(25),
            },
        });

        api
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::NodeApi;
    use crate::collector::HostCounts;

    #[test]
    fn test_typical_node_hosts() {
        let api = MockApi::typical_node();
        let all = api.hostdb_all().unwrap();
        let counts = HostCounts::tally(&all.hosts);
        assert_eq!(counts.active, 2);
        assert_eq!(counts.inactive, 1);
        assert_eq!(counts.offline, 1);
    }

    #[test]
    fn test_typical_node_spending_is_consistent() {
        let api = MockApi::typical_node();
        let fm = api.renter().unwrap().financial_metrics;
        assert_eq!(fm.total_spent(), Ok(siacoins(20)));
        assert_eq!(fm.unspent_unallocated(), Ok(siacoins(15)));
    }
}
