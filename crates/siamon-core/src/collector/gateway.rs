//! Gateway module: peers and bandwidth limits.

use super::collector::{CollectError, Collector, check_loaded};
use crate::api::NodeApi;

impl<A: NodeApi> Collector<A> {
    pub fn collect_gateway(&self) -> Result<(), CollectError> {
        let gauges = &self.metrics.gateway;
        let info = check_loaded(&gauges.module_loaded, "/gateway", self.api.gateway())?;

        gauges.num_peers.set(info.peers.len() as f64);
        gauges.rate_limit_download.set(info.max_download_speed as f64);
        gauges.rate_limit_upload.set(info.max_upload_speed as f64);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::collector::{CollectError, Collector};
    use crate::mock::MockApi;
    use crate::{Module, ModuleSelector, SiaMetrics};

    #[test]
    fn test_collect_gateway() {
        let collector = Collector::new(
            MockApi::typical_node(),
            Arc::new(SiaMetrics::new().unwrap()),
            ModuleSelector::all(),
        );

        collector.collect_gateway().unwrap();

        let m = collector.metrics();
        assert_eq!(m.value("gateway_module_loaded"), Some(1.0));
        assert_eq!(m.value("gateway_num_peers"), Some(3.0));
        assert_eq!(m.value("gateway_rate_limit_download"), Some(500_000.0));
        assert_eq!(m.value("gateway_rate_limit_upload"), Some(250_000.0));
    }

    #[test]
    fn test_gateway_not_loaded() {
        let collector = Collector::new(
            MockApi::typical_node().without_module(Module::Gateway),
            Arc::new(SiaMetrics::new().unwrap()),
            ModuleSelector::all(),
        );
        collector.metrics().gateway.module_loaded.set(1.0);

        assert_eq!(collector.collect_gateway(), Err(CollectError::ModuleNotLoaded));
        assert_eq!(collector.metrics().value("gateway_module_loaded"), Some(0.0));
    }
}
