//! Response bodies of the siad endpoints the collectors read.
//!
//! Only the fields that feed gauges are decoded; everything else in the
//! response is ignored. Missing fields decode to their defaults so that minor
//! API version differences do not fail a whole subsystem.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use crate::currency::Currency;

/// Decodes a JSON `null` array as an empty list (siad encodes empty slices as `null`).
fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// `GET /daemon/settings`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DaemonSettings {
    #[serde(rename = "maxdownloadspeed")]
    pub max_download_speed: i64,
    #[serde(rename = "maxuploadspeed")]
    pub max_upload_speed: i64,
}

/// `GET /consensus`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConsensusStatus {
    pub synced: bool,
    pub height: u64,
    pub difficulty: Currency,
}

/// `GET /wallet`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WalletStatus {
    pub unlocked: bool,
    #[serde(rename = "confirmedsiacoinbalance")]
    pub confirmed_siacoin_balance: Currency,
    #[serde(rename = "siafundbalance")]
    pub siafund_balance: Currency,
    #[serde(rename = "siacoinclaimbalance")]
    pub siacoin_claim_balance: Currency,
}

/// `GET /wallet/addresses`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WalletAddresses {
    #[serde(deserialize_with = "nullable_vec")]
    pub addresses: Vec<String>,
}

/// `GET /gateway`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GatewayInfo {
    #[serde(deserialize_with = "nullable_vec")]
    pub peers: Vec<IgnoredAny>,
    #[serde(rename = "maxdownloadspeed")]
    pub max_download_speed: i64,
    #[serde(rename = "maxuploadspeed")]
    pub max_upload_speed: i64,
}

/// One entry of a host's scan history.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HostScan {
    pub success: bool,
}

/// One host known to the renter's host database.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HostDbEntry {
    #[serde(rename = "acceptingcontracts")]
    pub accepting_contracts: bool,
    #[serde(rename = "scanhistory", deserialize_with = "nullable_vec")]
    pub scan_history: Vec<HostScan>,
}

impl HostDbEntry {
    /// Outcome of the most recent scan, `None` if the host was never scanned.
    pub fn last_scan_succeeded(&self) -> Option<bool> {
        self.scan_history.last().map(|scan| scan.success)
    }
}

/// `GET /hostdb/all`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HostDbAll {
    #[serde(deserialize_with = "nullable_vec")]
    pub hosts: Vec<HostDbEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HostExternalSettings {
    #[serde(rename = "acceptingcontracts")]
    pub accepting_contracts: bool,
    #[serde(rename = "totalstorage")]
    pub total_storage: u64,
    #[serde(rename = "remainingstorage")]
    pub remaining_storage: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HostInternalSettings {
    #[serde(rename = "maxduration")]
    pub max_duration: u64,
    #[serde(rename = "maxdownloadbatchsize")]
    pub max_download_batch_size: u64,
    #[serde(rename = "maxrevisebatchsize")]
    pub max_revise_batch_size: u64,
    #[serde(rename = "windowsize")]
    pub window_size: u64,
    /// Collateral per byte per block.
    pub collateral: Currency,
    #[serde(rename = "collateralbudget")]
    pub collateral_budget: Currency,
    #[serde(rename = "maxcollateral")]
    pub max_collateral: Currency,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HostFinancialMetrics {
    #[serde(rename = "contractcount")]
    pub contract_count: u64,
}

/// `GET /host`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HostInfo {
    #[serde(rename = "externalsettings")]
    pub external_settings: HostExternalSettings,
    #[serde(rename = "internalsettings")]
    pub internal_settings: HostInternalSettings,
    #[serde(rename = "financialmetrics")]
    pub financial_metrics: HostFinancialMetrics,
}

/// Aggregate statistics of one renter directory.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DirectoryInfo {
    #[serde(rename = "aggregatenumfiles")]
    pub aggregate_num_files: u64,
    #[serde(rename = "aggregatenumstuckchunks")]
    pub aggregate_num_stuck_chunks: u64,
    #[serde(rename = "aggregatesize")]
    pub aggregate_size: u64,
    #[serde(rename = "maxhealth")]
    pub max_health: f64,
    #[serde(rename = "minredundancy")]
    pub min_redundancy: f64,
}

/// `GET /renter/dir/`; the first directory is the requested one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RenterDirectory {
    #[serde(deserialize_with = "nullable_vec")]
    pub directories: Vec<DirectoryInfo>,
}

/// Which extra contract sets `GET /renter/contracts` should include.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractFilter {
    Disabled,
    Expired,
}

impl ContractFilter {
    pub fn query(self) -> &'static str {
        match self {
            ContractFilter::Disabled => "disabled=true",
            ContractFilter::Expired => "expired=true",
        }
    }
}

/// `GET /renter/contracts`; contracts are only counted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RenterContracts {
    #[serde(rename = "activecontracts", deserialize_with = "nullable_vec")]
    pub active: Vec<IgnoredAny>,
    #[serde(rename = "passivecontracts", deserialize_with = "nullable_vec")]
    pub passive: Vec<IgnoredAny>,
    #[serde(rename = "refreshedcontracts", deserialize_with = "nullable_vec")]
    pub refreshed: Vec<IgnoredAny>,
    #[serde(rename = "disabledcontracts", deserialize_with = "nullable_vec")]
    pub disabled: Vec<IgnoredAny>,
    #[serde(rename = "expiredcontracts", deserialize_with = "nullable_vec")]
    pub expired: Vec<IgnoredAny>,
    #[serde(rename = "expiredrefreshedcontracts", deserialize_with = "nullable_vec")]
    pub expired_refreshed: Vec<IgnoredAny>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Allowance {
    pub funds: Currency,
    pub hosts: u64,
    pub period: u64,
    #[serde(rename = "renewwindow")]
    pub renew_window: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RenterSettings {
    pub allowance: Allowance,
    #[serde(rename = "maxdownloadspeed")]
    pub max_download_speed: i64,
    #[serde(rename = "maxuploadspeed")]
    pub max_upload_speed: i64,
}

/// Spending of the current allowance period.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RenterFinancialMetrics {
    #[serde(rename = "contractfees")]
    pub contract_fees: Currency,
    #[serde(rename = "totalallocated")]
    pub total_allocated: Currency,
    #[serde(rename = "downloadspending")]
    pub download_spending: Currency,
    #[serde(rename = "storagespending")]
    pub storage_spending: Currency,
    #[serde(rename = "uploadspending")]
    pub upload_spending: Currency,
    pub unspent: Currency,
}

/// `GET /renter`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RenterInfo {
    pub settings: RenterSettings,
    #[serde(rename = "financialmetrics")]
    pub financial_metrics: RenterFinancialMetrics,
}
