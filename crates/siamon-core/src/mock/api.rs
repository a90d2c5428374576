//! In-memory node API for testing collectors without a running node.

use std::sync::Mutex;

use crate::api::{
    ApiError, ConsensusStatus, ContractFilter, DaemonSettings, GatewayInfo, HostDbAll, HostInfo,
    NodeApi, RenterContracts, RenterDirectory, RenterInfo, WalletAddresses, WalletStatus,
};
use crate::module::Module;

/// Node API returning preconfigured results.
///
/// Every field is the result of one call and can be replaced by tests,
/// including with an error. Calls are logged by name in the order made.
#[derive(Debug)]
pub struct MockApi {
    pub daemon_settings: Result<DaemonSettings, ApiError>,
    pub consensus: Result<ConsensusStatus, ApiError>,
    pub wallet: Result<WalletStatus, ApiError>,
    pub wallet_addresses: Result<WalletAddresses, ApiError>,
    pub gateway: Result<GatewayInfo, ApiError>,
    pub hostdb_all: Result<HostDbAll, ApiError>,
    pub host: Result<HostInfo, ApiError>,
    pub renter_root_dir: Result<RenterDirectory, ApiError>,
    pub renter_contracts_disabled: Result<RenterContracts, ApiError>,
    pub renter_contracts_expired: Result<RenterContracts, ApiError>,
    pub renter: Result<RenterInfo, ApiError>,
    calls: Mutex<Vec<&'static str>>,
}

impl Default for MockApi {
    /// A node where every call succeeds with empty data.
    fn default() -> Self {
        Self {
            daemon_settings: Ok(DaemonSettings::default()),
            consensus: Ok(ConsensusStatus::default()),
            wallet: Ok(WalletStatus::default()),
            wallet_addresses: Ok(WalletAddresses::default()),
            gateway: Ok(GatewayInfo::default()),
            hostdb_all: Ok(HostDbAll::default()),
            host: Ok(HostInfo::default()),
            renter_root_dir: Ok(RenterDirectory::default()),
            renter_contracts_disabled: Ok(RenterContracts::default()),
            renter_contracts_expired: Ok(RenterContracts::default()),
            renter: Ok(RenterInfo::default()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call owned by `module` answer "not recognized".
    pub fn without_module(mut self, module: Module) -> Self {
        match module {
            Module::Consensus => self.consensus = Err(ApiError::NotRecognized),
            Module::Gateway => self.gateway = Err(ApiError::NotRecognized),
            Module::Host => self.host = Err(ApiError::NotRecognized),
            Module::Wallet => {
                self.wallet = Err(ApiError::NotRecognized);
                self.wallet_addresses = Err(ApiError::NotRecognized);
            }
            Module::Renter => {
                self.renter_root_dir = Err(ApiError::NotRecognized);
                self.renter_contracts_disabled = Err(ApiError::NotRecognized);
                self.renter_contracts_expired = Err(ApiError::NotRecognized);
                self.renter = Err(ApiError::NotRecognized);
                self.hostdb_all = Err(ApiError::NotRecognized);
            }
            Module::Miner | Module::TransactionPool => {}
        }
        self
    }

    /// Names of the calls made so far.
    pub fn calls(&self) -> Vec<&'static str> {
        self.log().clone()
    }

    pub fn was_called(&self, name: &str) -> bool {
        self.log().iter().any(|c| *c == name)
    }

    pub fn clear_calls(&self) {
        self.log().clear();
    }

    fn log(&self) -> std::sync::MutexGuard<'_, Vec<&'static str>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn answer<T: Clone>(
        &self,
        name: &'static str,
        result: &Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        self.log().push(name);
        result.clone()
    }
}

impl NodeApi for MockApi {
    fn daemon_settings(&self) -> Result<DaemonSettings, ApiError> {
        self.answer("daemon_settings", &self.daemon_settings)
    }

    fn consensus(&self) -> Result<ConsensusStatus, ApiError> {
        self.answer("consensus", &self.consensus)
    }

    fn wallet(&self) -> Result<WalletStatus, ApiError> {
        self.answer("wallet", &self.wallet)
    }

    fn wallet_addresses(&self) -> Result<WalletAddresses, ApiError> {
        self.answer("wallet_addresses", &self.wallet_addresses)
    }

    fn gateway(&self) -> Result<GatewayInfo, ApiError> {
        self.answer("gateway", &self.gateway)
    }

    fn hostdb_all(&self) -> Result<HostDbAll, ApiError> {
        self.answer("hostdb_all", &self.hostdb_all)
    }

    fn host(&self) -> Result<HostInfo, ApiError> {
        self.answer("host", &self.host)
    }

    fn renter_root_dir(&self) -> Result<RenterDirectory, ApiError> {
        self.answer("renter_root_dir", &self.renter_root_dir)
    }

    fn renter_contracts(&self, filter: ContractFilter) -> Result<RenterContracts, ApiError> {
        match filter {
            ContractFilter::Disabled => {
                self.answer("renter_contracts_disabled", &self.renter_contracts_disabled)
            }
            ContractFilter::Expired => {
                self.answer("renter_contracts_expired", &self.renter_contracts_expired)
            }
        }
    }

    fn renter(&self) -> Result<RenterInfo, ApiError> {
        self.answer("renter", &self.renter)
    }
}
