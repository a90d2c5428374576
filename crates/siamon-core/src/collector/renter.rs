//! Renter module: stored files, contracts, allowance and spending.

use super::Subsystem;
use super::collector::{CollectError, Collector, check_loaded};
use crate::api::types::RenterFinancialMetrics;
use crate::api::{ContractFilter, NodeApi};
use crate::convert::amount_to_display;
use crate::currency::{Currency, CurrencyError};

impl RenterFinancialMetrics {
    /// Contract fees plus upload, download and storage spending.
    pub fn total_spent(&self) -> Result<Currency, CurrencyError> {
        self.contract_fees
            .checked_add(self.upload_spending)?
            .checked_add(self.download_spending)?
            .checked_add(self.storage_spending)
    }

    /// Allocated funds not spent yet.
    pub fn unspent_allocated(&self) -> Result<Currency, CurrencyError> {
        self.total_allocated.checked_sub(self.total_spent()?)
    }

    /// Unspent funds that were never allocated to a contract.
    pub fn unspent_unallocated(&self) -> Result<Currency, CurrencyError> {
        self.unspent.checked_sub(self.unspent_allocated()?)
    }
}

impl<A: NodeApi> Collector<A> {
    /// Collects the renter in four calls. The first decides whether the
    /// module is loaded; any later failure skips the remaining calls.
    pub fn collect_renter(&self) -> Result<(), CollectError> {
        let gauges = &self.metrics.renter;

        let root = check_loaded(
            &gauges.module_loaded,
            "/renter/dir/",
            self.api.renter_root_dir(),
        )?;
        let dir = root
            .directories
            .first()
            .ok_or_else(|| CollectError::Malformed {
                call: "/renter/dir/",
                detail: "no directories in response".to_string(),
            })?;
        gauges.aggregate_num_files.set(dir.aggregate_num_files as f64);
        gauges
            .aggregate_num_stuck_chunks
            .set(dir.aggregate_num_stuck_chunks as f64);
        gauges.aggregate_size.set(dir.aggregate_size as f64);
        gauges.max_health.set(dir.max_health);
        gauges.min_redundancy.set(dir.min_redundancy);

        let contracts = self
            .api
            .renter_contracts(ContractFilter::Disabled)
            .map_err(|e| CollectError::api("/renter/contracts?disabled=true", e))?;
        gauges.num_active_contracts.set(contracts.active.len() as f64);
        gauges.num_passive_contracts.set(contracts.passive.len() as f64);
        gauges
            .num_refreshed_contracts
            .set(contracts.refreshed.len() as f64);
        gauges
            .num_disabled_contracts
            .set(contracts.disabled.len() as f64);

        let contracts = self
            .api
            .renter_contracts(ContractFilter::Expired)
            .map_err(|e| CollectError::api("/renter/contracts?expired=true", e))?;
        gauges.num_expired_contracts.set(contracts.expired.len() as f64);
        gauges
            .num_expired_refreshed_contracts
            .set(contracts.expired_refreshed.len() as f64);

        let info = self
            .api
            .renter()
            .map_err(|e| CollectError::api("/renter", e))?;
        let allowance = &info.settings.allowance;
        gauges.allowance_amount.set(amount_to_display(allowance.funds));
        gauges.allowance_period.set(allowance.period as f64);
        gauges.allowance_renew_window.set(allowance.renew_window as f64);
        gauges.allowance_hosts.set(allowance.hosts as f64);
        gauges
            .rate_limit_download
            .set(info.settings.max_download_speed as f64);
        gauges
            .rate_limit_upload
            .set(info.settings.max_upload_speed as f64);

        let fm = &info.financial_metrics;
        gauges
            .allowance_current_storage
            .set(amount_to_display(fm.storage_spending));
        gauges
            .allowance_current_upload
            .set(amount_to_display(fm.upload_spending));
        gauges
            .allowance_current_download
            .set(amount_to_display(fm.download_spending));
        gauges
            .allowance_current_fees
            .set(amount_to_display(fm.contract_fees));
        gauges
            .allowance_current_unspent
            .set(amount_to_display(fm.unspent));

        // Each derived value depends on the previous one; stop at the first
        // anomaly so no gauge is computed from an inconsistent snapshot.
        let Some(spent) = self.derived(
            Subsystem::Renter,
            "renter_allowance_current_spent",
            fm.total_spent(),
        ) else {
            return Ok(());
        };
        gauges.allowance_current_spent.set(amount_to_display(spent));

        let Some(allocated) = self.derived(
            Subsystem::Renter,
            "renter_allowance_current_unspent_allocated",
            fm.unspent_allocated(),
        ) else {
            return Ok(());
        };
        gauges
            .allowance_current_unspent_allocated
            .set(amount_to_display(allocated));

        if let Some(unallocated) = self.derived(
            Subsystem::Renter,
            "renter_allowance_current_unspent_unallocated",
            fm.unspent_unallocated(),
        ) {
            gauges
                .allowance_current_unspent_unallocated
                .set(amount_to_display(unallocated));
        }
        Ok(())
    }
}
