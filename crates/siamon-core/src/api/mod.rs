//! Access to the siad management API.
//!
//! Collectors talk to the node through the [`NodeApi`] trait. Production code
//! uses [`HttpApi`]; tests use [`crate::mock::MockApi`].
//!
//! ```text
//!   Collector ──► NodeApi (trait) ──┬──► HttpApi  (reqwest, blocking)
//!                                   └──► MockApi  (canned responses)
//! ```

mod http;
pub mod types;

use std::fmt;

pub use http::HttpApi;
pub use types::{
    ConsensusStatus, ContractFilter, DaemonSettings, GatewayInfo, HostDbAll, HostInfo,
    RenterContracts, RenterDirectory, RenterInfo, WalletAddresses, WalletStatus,
};

/// Error type for node API calls.
///
/// Only `NotRecognized` carries meaning for the collectors: it signals that
/// the module behind the endpoint is not loaded on the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The node does not recognize the call (HTTP 404).
    NotRecognized,
    /// The node answered with a non-success status.
    Status { code: u16, message: String },
    /// The request never produced a response.
    Transport(String),
    /// The response body could not be decoded.
    Decode(String),
}

impl ApiError {
    pub fn is_not_recognized(&self) -> bool {
        matches!(self, ApiError::NotRecognized)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotRecognized => write!(f, "API call not recognized"),
            ApiError::Status { code, message } => write!(f, "HTTP {}: {}", code, message),
            ApiError::Transport(msg) => write!(f, "transport error: {}", msg),
            ApiError::Decode(msg) => write!(f, "decode error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Read-only view of the siad endpoints used by the collectors.
pub trait NodeApi {
    fn daemon_settings(&self) -> Result<DaemonSettings, ApiError>;

    fn consensus(&self) -> Result<ConsensusStatus, ApiError>;

    fn wallet(&self) -> Result<WalletStatus, ApiError>;

    fn wallet_addresses(&self) -> Result<WalletAddresses, ApiError>;

    fn gateway(&self) -> Result<GatewayInfo, ApiError>;

    fn hostdb_all(&self) -> Result<HostDbAll, ApiError>;

    fn host(&self) -> Result<HostInfo, ApiError>;

    /// Aggregate statistics of the renter's root directory.
    fn renter_root_dir(&self) -> Result<RenterDirectory, ApiError>;

    fn renter_contracts(&self, filter: ContractFilter) -> Result<RenterContracts, ApiError>;

    fn renter(&self) -> Result<RenterInfo, ApiError>;
}
