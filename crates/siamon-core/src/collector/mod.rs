//! Subsystem collectors and the collection orchestrator.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Collector                           │
//! │                                                              │
//! │   collect_all()  ── daemon (always)                          │
//! │                  ── renter + hostdb   (r)                    │
//! │                  ── consensus         (c)                    │
//! │                  ── wallet            (w)                    │
//! │                  ── gateway           (g)                    │
//! │                  ── host              (h)                    │
//! │        │                       │                      │      │
//! │  ┌─────▼─────┐          ┌──────▼──────┐        ┌──────▼────┐ │
//! │  │  NodeApi  │          │ SiaMetrics  │        │CollectSink│ │
//! │  │  (trait)  │          │  (gauges)   │        │  (trait)  │ │
//! │  └───────────┘          └─────────────┘        └───────────┘ │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each subsystem collector lives in its own file as an `impl` block on
//! [`Collector`]. A collector that fails returns early and leaves its gauges
//! at their previous values; the failure goes to the [`CollectSink`] and the
//! next subsystem runs as usual.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use siamon_core::collector::Collector;
//! use siamon_core::mock::MockApi;
//! use siamon_core::{ModuleSelector, SiaMetrics};
//!
//! let metrics = Arc::new(SiaMetrics::new().unwrap());
//! let mut collector =
//!     Collector::new(MockApi::typical_node(), metrics.clone(), ModuleSelector::all());
//! collector.collect_all();
//! assert_eq!(metrics.value("consensus_module_loaded"), Some(1.0));
//! ```

#[allow(clippy::module_inception)]
mod collector;
mod consensus;
mod daemon;
mod gateway;
mod host;
mod hostdb;
mod renter;
mod sink;
mod wallet;

pub use collector::{CollectError, Collector, CollectorTiming};
pub use hostdb::{HostCategory, HostCounts};
pub use sink::{CollectEvent, CollectSink, TracingSink};

/// A unit of collection, usually one siad module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subsystem {
    Daemon,
    Consensus,
    Wallet,
    Gateway,
    HostDb,
    Host,
    Renter,
}

impl Subsystem {
    pub fn name(self) -> &'static str {
        match self {
            Subsystem::Daemon => "daemon",
            Subsystem::Consensus => "consensus",
            Subsystem::Wallet => "wallet",
            Subsystem::Gateway => "gateway",
            Subsystem::HostDb => "hostdb",
            Subsystem::Host => "host",
            Subsystem::Renter => "renter",
        }
    }
}

impl std::fmt::Display for Subsystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
