//! Host module: storage offered to renters and contract settings.

use super::Subsystem;
use super::collector::{CollectError, Collector};
use crate::api::NodeApi;
use crate::convert::{
    BLOCK_BYTES_PER_MONTH_TERABYTE, amount_to_display, blocks_to_hours, bool_to_gauge,
};

impl<A: NodeApi> Collector<A> {
    pub fn collect_host(&self) -> Result<(), CollectError> {
        let info = self.api.host().map_err(|e| CollectError::api("/host", e))?;
        let gauges = &self.metrics.host;

        let external = &info.external_settings;
        gauges
            .accepting_contracts
            .set(bool_to_gauge(external.accepting_contracts));
        gauges.total_storage.set(external.total_storage as f64);
        gauges.remaining_storage.set(external.remaining_storage as f64);

        let internal = &info.internal_settings;
        gauges.max_duration.set(internal.max_duration as f64);
        gauges
            .max_download_batch_size
            .set(internal.max_download_batch_size as f64);
        gauges
            .max_revise_batch_size
            .set(internal.max_revise_batch_size as f64);
        gauges.window_size.set(blocks_to_hours(internal.window_size));

        // collateral is priced per byte per block
        let collateral = internal
            .collateral
            .checked_mul(BLOCK_BYTES_PER_MONTH_TERABYTE);
        if let Some(per_tb_month) = self.derived(Subsystem::Host, "host_collateral", collateral) {
            gauges.collateral.set(amount_to_display(per_tb_month));
        }
        gauges
            .collateral_budget
            .set(amount_to_display(internal.collateral_budget));
        gauges
            .max_collateral
            .set(amount_to_display(internal.max_collateral));

        gauges
            .contract_count
            .set(info.financial_metrics.contract_count as f64);
        Ok(())
    }
}
