//! Background collection loop.
//!
//! Runs on its own OS thread because the node client is blocking. Ticks are
//! strictly sequential: a slow tick delays the next one but never overlaps it.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use siamon_core::{Collector, CollectorTiming, NodeApi};

const SLEEP_SLICE: Duration = Duration::from_millis(100);

/// Starts the collection loop on a dedicated thread.
pub(crate) fn spawn<A>(
    collector: Collector<A>,
    interval: Duration,
    running: Arc<AtomicBool>,
) -> io::Result<JoinHandle<()>>
where
    A: NodeApi + Send + 'static,
{
    thread::Builder::new()
        .name("collector".to_string())
        .spawn(move || run(collector, interval, &running))
}

/// Collects right away, then once per `interval` until `running` is cleared.
///
/// The first collection happens here and not before the server starts, so
/// a node that never answers cannot keep `/metrics` from coming up.
pub(crate) fn run<A: NodeApi>(
    mut collector: Collector<A>,
    interval: Duration,
    running: &AtomicBool,
) {
    while running.load(Ordering::SeqCst) {
        let timing = collector.collect_all().clone();
        if collector.ticks() == 1 {
            info!(
                duration_ms = timing.total.as_millis() as u64,
                failed = timing.failed.len(),
                "initial collection finished"
            );
        }
        log_tick(&timing, interval, collector.ticks());

        if !sleep_while_running(interval, running) {
            break;
        }
    }
    debug!(ticks = collector.ticks(), "collection loop stopped");
}

/// Sleeps in short slices so a shutdown is noticed quickly. Returns whether
/// the loop should keep going.
fn sleep_while_running(interval: Duration, running: &AtomicBool) -> bool {
    let mut remaining = interval;
    while remaining > Duration::ZERO && running.load(Ordering::SeqCst) {
        let sleep_time = remaining.min(SLEEP_SLICE);
        thread::sleep(sleep_time);
        remaining = remaining.saturating_sub(sleep_time);
    }
    running.load(Ordering::SeqCst)
}

/// A tick is slow once it takes more than half of the poll interval.
fn is_slow(timing: &CollectorTiming, interval: Duration) -> bool {
    timing.total > interval / 2
}

fn log_tick(timing: &CollectorTiming, interval: Duration, tick: u64) {
    let ms = |d: Option<Duration>| d.map(|d| d.as_millis() as u64);
    debug!(
        tick,
        duration_ms = timing.total.as_millis() as u64,
        daemon_ms = ms(timing.daemon),
        renter_ms = ms(timing.renter),
        hostdb_ms = ms(timing.hostdb),
        consensus_ms = ms(timing.consensus),
        wallet_ms = ms(timing.wallet),
        gateway_ms = ms(timing.gateway),
        host_ms = ms(timing.host),
        failed = timing.failed.len(),
        "metrics updated"
    );

    if is_slow(timing, interval) {
        let slowest = timing.slowest().map(|(s, _)| s.name()).unwrap_or("none");
        warn!(
            duration_ms = timing.total.as_millis() as u64,
            interval_secs = interval.as_secs(),
            slowest,
            "collection took more than half of the poll interval"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use siamon_core::mock::MockApi;
    use siamon_core::{ModuleSelector, SiaMetrics};

    fn collector() -> Collector<MockApi> {
        Collector::new(
            MockApi::typical_node(),
            Arc::new(SiaMetrics::new().unwrap()),
            ModuleSelector::all(),
        )
    }

    #[test]
    fn test_run_stops_without_collecting() {
        let running = AtomicBool::new(false);
        let start = Instant::now();

        run(collector(), Duration::from_secs(60), &running);

        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_spawned_loop_collects_and_stops() {
        let metrics = Arc::new(SiaMetrics::new().unwrap());
        let collector =
            Collector::new(MockApi::typical_node(), metrics.clone(), ModuleSelector::all());
        let running = Arc::new(AtomicBool::new(true));

        let handle = spawn(collector, Duration::from_millis(10), running.clone()).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while metrics.value("consensus_module_loaded") != Some(1.0) && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }
        running.store(false, Ordering::SeqCst);
        handle.join().unwrap();

        assert_eq!(metrics.value("consensus_module_loaded"), Some(1.0));
        assert_eq!(metrics.value("host_contract_count"), Some(42.0));
    }

    #[test]
    fn test_first_collection_does_not_wait_for_interval() {
        let metrics = Arc::new(SiaMetrics::new().unwrap());
        let collector =
            Collector::new(MockApi::typical_node(), metrics.clone(), ModuleSelector::all());
        let running = Arc::new(AtomicBool::new(true));

        let handle = spawn(collector, Duration::from_secs(3600), running.clone()).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while metrics.value("gateway_num_peers") != Some(3.0) && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }
        running.store(false, Ordering::SeqCst);
        handle.join().unwrap();

        assert_eq!(metrics.value("gateway_num_peers"), Some(3.0));
    }

    #[test]
    fn test_sleep_is_interrupted() {
        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();
        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            flag.store(false, Ordering::SeqCst);
        });

        let start = Instant::now();
        assert!(!sleep_while_running(Duration::from_secs(60), &running));
        assert!(start.elapsed() < Duration::from_secs(5));
        stopper.join().unwrap();
    }

    #[test]
    fn test_is_slow() {
        let interval = Duration::from_secs(300);
        let mut timing = CollectorTiming {
            total: Duration::from_secs(150),
            ..CollectorTiming::default()
        };
        assert!(!is_slow(&timing, interval));
        timing.total = Duration::from_secs(151);
        assert!(is_slow(&timing, interval));
    }
}
