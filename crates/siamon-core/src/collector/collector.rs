//! Collection orchestrator.
//!
//! `Collector` owns the API handle, a shared reference to the gauge registry
//! and the module selector. One call to [`Collector::collect_all`] is one tick.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use prometheus::Gauge;
use tracing::debug;

use super::Subsystem;
use super::sink::{CollectEvent, CollectSink, TracingSink};
use crate::api::{ApiError, NodeApi};
use crate::currency::{Currency, CurrencyError};
use crate::metrics::SiaMetrics;
use crate::module::{Module, ModuleSelector};

/// Reason a subsystem stopped reading for the current tick.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectError {
    /// The subsystem's module is not loaded on the node.
    ModuleNotLoaded,
    /// An API call failed.
    Api {
        call: &'static str,
        source: ApiError,
    },
    /// The response decoded but lacks data the collector needs.
    Malformed { call: &'static str, detail: String },
}

impl CollectError {
    /// Wraps a failed call. A not-recognized call means the module is absent.
    pub(crate) fn api(call: &'static str, source: ApiError) -> Self {
        match source {
            ApiError::NotRecognized => CollectError::ModuleNotLoaded,
            source => CollectError::Api { call, source },
        }
    }
}

/// Updates a `*_module_loaded` gauge from the first call of a subsystem.
///
/// Success sets it to 1 and not-recognized to 0. Other failures leave it as is.
pub(super) fn check_loaded<T>(
    loaded: &Gauge,
    call: &'static str,
    result: Result<T, ApiError>,
) -> Result<T, CollectError> {
    match result {
        Ok(value) => {
            loaded.set(1.0);
            Ok(value)
        }
        Err(ApiError::NotRecognized) => {
            loaded.set(0.0);
            Err(CollectError::ModuleNotLoaded)
        }
        Err(e) => Err(CollectError::api(call, e)),
    }
}

impl fmt::Display for CollectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectError::ModuleNotLoaded => write!(f, "module not loaded"),
            CollectError::Api { call, source } => write!(f, "{}: {}", call, source),
            CollectError::Malformed { call, detail } => {
                write!(f, "{}: malformed response: {}", call, detail)
            }
        }
    }
}

impl std::error::Error for CollectError {}

/// Timing information for each subsystem of the last tick.
///
/// `None` means the subsystem was not selected.
#[derive(Debug, Clone, Default)]
pub struct CollectorTiming {
    /// Total tick time.
    pub total: Duration,
    pub daemon: Option<Duration>,
    pub renter: Option<Duration>,
    pub hostdb: Option<Duration>,
    pub consensus: Option<Duration>,
    pub wallet: Option<Duration>,
    pub gateway: Option<Duration>,
    pub host: Option<Duration>,
    /// Subsystems that stopped early (not loaded or failed).
    pub failed: Vec<Subsystem>,
}

impl CollectorTiming {
    fn record(&mut self, subsystem: Subsystem, elapsed: Duration) {
        let slot = match subsystem {
            Subsystem::Daemon => &mut self.daemon,
            Subsystem::Renter => &mut self.renter,
            Subsystem::HostDb => &mut self.hostdb,
            Subsystem::Consensus => &mut self.consensus,
            Subsystem::Wallet => &mut self.wallet,
            Subsystem::Gateway => &mut self.gateway,
            Subsystem::Host => &mut self.host,
        };
        *slot = Some(elapsed);
    }

    /// Slowest subsystem of the tick.
    pub fn slowest(&self) -> Option<(Subsystem, Duration)> {
        [
            (Subsystem::Daemon, self.daemon),
            (Subsystem::Renter, self.renter),
            (Subsystem::HostDb, self.hostdb),
            (Subsystem::Consensus, self.consensus),
            (Subsystem::Wallet, self.wallet),
            (Subsystem::Gateway, self.gateway),
            (Subsystem::Host, self.host),
        ]
        .into_iter()
        .filter_map(|(s, d)| d.map(|d| (s, d)))
        .max_by_key(|(_, d)| *d)
    }
}

/// Gathers all selected subsystems into the gauge registry.
pub struct Collector<A: NodeApi> {
    pub(super) api: A,
    pub(super) metrics: Arc<SiaMetrics>,
    modules: ModuleSelector,
    sink: Arc<dyn CollectSink>,
    /// Timing information from the last collect_all call.
    last_timing: Option<CollectorTiming>,
    ticks: u64,
}

impl<A: NodeApi> Collector<A> {
    /// Creates a collector reporting through [`TracingSink`].
    pub fn new(api: A, metrics: Arc<SiaMetrics>, modules: ModuleSelector) -> Self {
        Self {
            api,
            metrics,
            modules,
            sink: Arc::new(TracingSink),
            last_timing: None,
            ticks: 0,
        }
    }

    /// Replaces the event sink.
    pub fn with_sink(mut self, sink: Arc<dyn CollectSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut A {
        &mut self.api
    }

    pub fn metrics(&self) -> &Arc<SiaMetrics> {
        &self.metrics
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Returns timing information from the last collect_all call.
    pub fn last_timing(&self) -> Option<&CollectorTiming> {
        self.last_timing.as_ref()
    }

    /// Runs one tick: the daemon collector, then every selected subsystem in
    /// a fixed order. Subsystems run one after another; a failure in one
    /// never prevents the others from running.
    pub fn collect_all(&mut self) -> &CollectorTiming {
        let start = Instant::now();
        let mut timing = CollectorTiming::default();

        debug!(modules = %self.modules, "updating metrics");

        self.run(Subsystem::Daemon, &mut timing, Self::collect_daemon);

        if self.modules.contains(Module::Renter) {
            self.run(Subsystem::Renter, &mut timing, Self::collect_renter);
            self.run(Subsystem::HostDb, &mut timing, Self::collect_hostdb);
        }
        if self.modules.contains(Module::Consensus) {
            self.run(Subsystem::Consensus, &mut timing, Self::collect_consensus);
        }
        if self.modules.contains(Module::Wallet) {
            self.run(Subsystem::Wallet, &mut timing, Self::collect_wallet);
        }
        if self.modules.contains(Module::Gateway) {
            self.run(Subsystem::Gateway, &mut timing, Self::collect_gateway);
        }
        if self.modules.contains(Module::Host) {
            self.run(Subsystem::Host, &mut timing, Self::collect_host);
        }
        for module in [Module::Miner, Module::TransactionPool] {
            if self.modules.contains(module) {
                self.sink.report(CollectEvent::NotImplemented { module });
            }
        }

        timing.total = start.elapsed();
        self.ticks += 1;
        self.last_timing.insert(timing)
    }

    fn run(
        &self,
        subsystem: Subsystem,
        timing: &mut CollectorTiming,
        collect: fn(&Self) -> Result<(), CollectError>,
    ) {
        debug!(subsystem = subsystem.name(), "updating subsystem metrics");
        let start = Instant::now();
        let result = collect(self);
        timing.record(subsystem, start.elapsed());

        match result {
            Ok(()) => {}
            Err(CollectError::ModuleNotLoaded) => {
                timing.failed.push(subsystem);
                self.sink.report(CollectEvent::ModuleNotLoaded { subsystem });
            }
            Err(error) => {
                timing.failed.push(subsystem);
                self.sink.report(CollectEvent::Failed { subsystem, error });
            }
        }
    }

    /// Unwraps a derived amount, reporting an anomaly on failure.
    pub(super) fn derived(
        &self,
        subsystem: Subsystem,
        gauge: &'static str,
        value: Result<Currency, CurrencyError>,
    ) -> Option<Currency> {
        match value {
            Ok(v) => Some(v),
            Err(error) => {
                self.sink.report(CollectEvent::Anomaly {
                    subsystem,
                    gauge,
                    error,
                });
                None
            }
        }
    }
}
