//! Daemon-wide settings.

use super::collector::{CollectError, Collector};
use crate::api::NodeApi;

impl<A: NodeApi> Collector<A> {
    /// Collects the global bandwidth limits. Always runs, regardless of the
    /// module selector.
    pub fn collect_daemon(&self) -> Result<(), CollectError> {
        let settings = self
            .api
            .daemon_settings()
            .map_err(|e| CollectError::api("/daemon/settings", e))?;

        let gauges = &self.metrics.daemon;
        gauges.rate_limit_download.set(settings.max_download_speed as f64);
        gauges.rate_limit_upload.set(settings.max_upload_speed as f64);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::api::{ApiError, DaemonSettings};
    use crate::collector::{CollectError, Collector};
    use crate::mock::MockApi;
    use crate::{ModuleSelector, SiaMetrics};

    #[test]
    fn test_collect_daemon() {
        let mut api = MockApi::typical_node();
        api.daemon_settings = Ok(DaemonSettings {
            max_download_speed: 0,
            max_upload_speed: 4096,
        });
        let metrics = Arc::new(SiaMetrics::new().unwrap());
        let collector = Collector::new(api, metrics, ModuleSelector::all());

        collector.collect_daemon().unwrap();

        let m = collector.metrics();
        assert_eq!(m.value("global_rate_limit_download"), Some(0.0));
        assert_eq!(m.value("global_rate_limit_upload"), Some(4096.0));
    }

    #[test]
    fn test_collect_daemon_error_keeps_values() {
        let metrics = Arc::new(SiaMetrics::new().unwrap());
        metrics.daemon.rate_limit_upload.set(10.0);

        let mut api = MockApi::typical_node();
        api.daemon_settings = Err(ApiError::Status {
            code: 500,
            message: "boom".to_string(),
        });
        let collector = Collector::new(api, metrics.clone(), ModuleSelector::all());

        let err = collector.collect_daemon().unwrap_err();
        assert!(matches!(err, CollectError::Api { call: "/daemon/settings", .. }));
        assert_eq!(metrics.value("global_rate_limit_upload"), Some(10.0));
    }
}
