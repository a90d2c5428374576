//! Reporting of collection outcomes.
//!
//! Collectors never propagate errors out of a tick. Instead they hand every
//! noteworthy outcome to a [`CollectSink`]. Production uses [`TracingSink`];
//! tests use [`crate::mock::RecordingSink`] to assert on what was reported.

use tracing::{debug, info, warn};

use super::Subsystem;
use super::collector::CollectError;
use crate::currency::CurrencyError;
use crate::module::Module;

/// Something a collector wants an operator to know about.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectEvent {
    /// The node does not have this subsystem's module loaded.
    ModuleNotLoaded { subsystem: Subsystem },
    /// The subsystem aborted its reads for this tick.
    Failed {
        subsystem: Subsystem,
        error: CollectError,
    },
    /// A derived value could not be computed from an inconsistent snapshot.
    /// The gauge keeps its previous value.
    Anomaly {
        subsystem: Subsystem,
        gauge: &'static str,
        error: CurrencyError,
    },
    /// The module was selected but has no collector.
    NotImplemented { module: Module },
}

pub trait CollectSink: Send + Sync {
    fn report(&self, event: CollectEvent);
}

/// Emits collection events as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl CollectSink for TracingSink {
    fn report(&self, event: CollectEvent) {
        match event {
            CollectEvent::ModuleNotLoaded { subsystem } => {
                info!(subsystem = subsystem.name(), "module is not loaded");
            }
            CollectEvent::Failed { subsystem, error } => {
                warn!(subsystem = subsystem.name(), error = %error, "could not collect metrics");
            }
            CollectEvent::Anomaly {
                subsystem,
                gauge,
                error,
            } => {
                warn!(
                    subsystem = subsystem.name(),
                    gauge,
                    error = %error,
                    "inconsistent snapshot, keeping previous value"
                );
            }
            CollectEvent::NotImplemented { module } => {
                debug!(module = module.name(), "metrics are not implemented yet");
            }
        }
    }
}
