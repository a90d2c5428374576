//! Consensus module: sync state, height and difficulty.

use super::collector::{CollectError, Collector, check_loaded};
use crate::api::NodeApi;
use crate::convert::{bool_to_gauge, hashrate_from_difficulty};

impl<A: NodeApi> Collector<A> {
    pub fn collect_consensus(&self) -> Result<(), CollectError> {
        let gauges = &self.metrics.consensus;
        let status = check_loaded(&gauges.module_loaded, "/consensus", self.api.consensus())?;

        let difficulty = status.difficulty.to_f64();
        gauges.synced.set(bool_to_gauge(status.synced));
        gauges.height.set(status.height as f64);
        gauges.difficulty.set(difficulty);
        gauges.hashrate.set(hashrate_from_difficulty(difficulty));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::api::{ApiError, ConsensusStatus};
    use crate::collector::{CollectError, Collector};
    use crate::mock::MockApi;
    use crate::{Currency, ModuleSelector, SiaMetrics};

    fn collector(api: MockApi) -> Collector<MockApi> {
        let metrics = Arc::new(SiaMetrics::new().unwrap());
        Collector::new(api, metrics, ModuleSelector::all())
    }

    #[test]
    fn test_collect_consensus() {
        let mut api = MockApi::typical_node();
        api.consensus = Ok(ConsensusStatus {
            synced: true,
            height: 250_123,
            difficulty: Currency::new(6_000_000),
        });
        let collector = collector(api);

        collector.collect_consensus().unwrap();

        let m = collector.metrics();
        assert_eq!(m.value("consensus_module_loaded"), Some(1.0));
        assert_eq!(m.value("consensus_synced"), Some(1.0));
        assert_eq!(m.value("consensus_height"), Some(250_123.0));
        assert_eq!(m.value("consensus_difficulty"), Some(6_000_000.0));
        assert_eq!(m.value("consensus_hashrate"), Some(10_000.0));
    }

    #[test]
    fn test_not_loaded_keeps_previous_values() {
        let mut collector = collector(MockApi::typical_node());
        collector.collect_consensus().unwrap();
        let height = collector.metrics().value("consensus_height");
        let difficulty = collector.metrics().value("consensus_difficulty");
        assert_eq!(collector.metrics().value("consensus_module_loaded"), Some(1.0));

        collector.api_mut().consensus = Err(ApiError::NotRecognized);
        let err = collector.collect_consensus().unwrap_err();

        assert_eq!(err, CollectError::ModuleNotLoaded);
        let m = collector.metrics();
        assert_eq!(m.value("consensus_module_loaded"), Some(0.0));
        assert_eq!(m.value("consensus_synced"), Some(1.0));
        assert_eq!(m.value("consensus_height"), height);
        assert_eq!(m.value("consensus_difficulty"), difficulty);
    }

    #[test]
    fn test_transient_error_leaves_loaded_gauge() {
        let mut collector = collector(MockApi::typical_node());
        collector.collect_consensus().unwrap();

        collector.api_mut().consensus = Err(ApiError::Transport("connection refused".to_string()));
        assert!(collector.collect_consensus().is_err());
        assert_eq!(collector.metrics().value("consensus_module_loaded"), Some(1.0));
    }
}
