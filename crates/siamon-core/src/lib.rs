//! siamon-core: metrics collection and normalization for a Sia node.
//!
//! Provides:
//! - `api` - the node API seam (`NodeApi`), its HTTP client and response types
//! - `currency` - checked high-precision currency amounts (hastings)
//! - `convert` - unit conversions from node values to gauge values
//! - `metrics` - the gauge registry exported to Prometheus
//! - `module` - module selector parsed from configuration
//! - `collector` - per-subsystem collectors and the collection orchestrator
//! - `mock` - test doubles (`MockApi`, `RecordingSink`)

pub mod api;
pub mod collector;
pub mod convert;
pub mod currency;
pub mod metrics;
pub mod mock;
pub mod module;

pub use api::{ApiError, HttpApi, NodeApi};
pub use collector::{
    CollectEvent, CollectSink, Collector, CollectorTiming, Subsystem, TracingSink,
};
pub use currency::{Currency, CurrencyError};
pub use metrics::SiaMetrics;
pub use module::{Module, ModuleSelector, ModuleSelectorError};
