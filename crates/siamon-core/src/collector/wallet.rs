//! Wallet module: lock state, balances and tracked addresses.

use super::collector::{CollectError, Collector, check_loaded};
use crate::api::NodeApi;
use crate::convert::{amount_to_display, bool_to_gauge};

impl<A: NodeApi> Collector<A> {
    /// Collects wallet status, then the address count.
    ///
    /// A failing address call leaves only `wallet_num_addresses` stale.
    pub fn collect_wallet(&self) -> Result<(), CollectError> {
        let gauges = &self.metrics.wallet;
        let status = check_loaded(&gauges.module_loaded, "/wallet", self.api.wallet())?;

        gauges.locked.set(bool_to_gauge(!status.unlocked));
        gauges
            .confirmed_siacoin_balance_hastings
            .set(status.confirmed_siacoin_balance.to_f64());
        gauges
            .confirmed_siacoin_balance
            .set(amount_to_display(status.confirmed_siacoin_balance));
        gauges.siafund_balance.set(status.siafund_balance.to_f64());
        gauges
            .siafund_claim_balance
            .set(status.siacoin_claim_balance.to_f64());

        let addresses = self
            .api
            .wallet_addresses()
            .map_err(|e| CollectError::api("/wallet/addresses", e))?;
        gauges.num_addresses.set(addresses.addresses.len() as f64);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::api::{ApiError, WalletStatus};
    use crate::collector::{CollectError, Collector};
    use crate::mock::MockApi;
    use crate::{Currency, ModuleSelector, SiaMetrics};

    fn collector(api: MockApi) -> Collector<MockApi> {
        let metrics = Arc::new(SiaMetrics::new().unwrap());
        Collector::new(api, metrics, ModuleSelector::all())
    }

    #[test]
    fn test_collect_wallet() {
        let mut api = MockApi::typical_node();
        api.wallet = Ok(WalletStatus {
            unlocked: true,
            confirmed_siacoin_balance: Currency::new(2_500_000_000_000_000_000_000_000),
            siafund_balance: Currency::new(7),
            siacoin_claim_balance: Currency::new(123),
        });
        let collector = collector(api);

        collector.collect_wallet().unwrap();

        let m = collector.metrics();
        assert_eq!(m.value("wallet_module_loaded"), Some(1.0));
        assert_eq!(m.value("wallet_locked"), Some(0.0));
        assert_eq!(m.value("wallet_confirmed_siacoin_balance_hastings"), Some(2.5e24));
        let sc = m.value("wallet_confirmed_siacoin_balance").unwrap();
        assert!((sc - 2.5).abs() < 1e-9);
        assert_eq!(m.value("wallet_siafund_balance"), Some(7.0));
        assert_eq!(m.value("wallet_siafund_claim_balance"), Some(123.0));
        assert_eq!(m.value("wallet_num_addresses"), Some(3.0));
    }

    #[test]
    fn test_locked_wallet() {
        let mut api = MockApi::typical_node();
        api.wallet = Ok(WalletStatus {
            unlocked: false,
            ..WalletStatus::default()
        });
        let collector = collector(api);

        collector.collect_wallet().unwrap();
        assert_eq!(collector.metrics().value("wallet_locked"), Some(1.0));
    }

    #[test]
    fn test_address_failure_only_affects_address_count() {
        let mut collector = collector(MockApi::typical_node());
        collector.metrics().wallet.num_addresses.set(9.0);
        collector.api_mut().wallet_addresses = Err(ApiError::Status {
            code: 490,
            message: "wallet must be unlocked".to_string(),
        });

        let err = collector.collect_wallet().unwrap_err();

        assert!(matches!(err, CollectError::Api { call: "/wallet/addresses", .. }));
        let m = collector.metrics();
        assert_eq!(m.value("wallet_module_loaded"), Some(1.0));
        assert!(m.value("wallet_confirmed_siacoin_balance").unwrap() > 0.0);
        assert_eq!(m.value("wallet_num_addresses"), Some(9.0));
    }

    #[test]
    fn test_wallet_not_loaded() {
        let collector = collector(MockApi::typical_node().without_module(crate::Module::Wallet));
        assert_eq!(collector.collect_wallet(), Err(CollectError::ModuleNotLoaded));
        assert_eq!(collector.metrics().value("wallet_module_loaded"), Some(0.0));
        assert!(!collector.api().was_called("wallet_addresses"));
    }
}
