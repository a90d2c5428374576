//! siamond - Prometheus exporter for a Sia node.
//!
//! Polls the node's HTTP API on a fixed interval and serves the gauges on
//! `/metrics`. The first collection starts together with the server; until
//! it finishes, scrapes see zero-valued gauges.

mod password;
mod poller;
mod server;

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::net::{Ipv4Addr, SocketAddr};
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

use siamon_core::{Collector, HttpApi, ModuleSelector, SiaMetrics};

/// Prometheus exporter for a Sia node.
#[derive(Parser)]
#[command(name = "siamond", about = "Prometheus exporter for a Sia node", version)]
struct Args {
    /// Address of the node API.
    #[arg(long, default_value = "127.0.0.1:9980", env = "SIAMON_ADDRESS")]
    address: String,

    /// User-Agent sent to the node.
    #[arg(long, default_value = "Sia-Agent", env = "SIAMON_AGENT")]
    agent: String,

    /// Poll interval in minutes.
    #[arg(
        long,
        default_value = "5",
        env = "SIAMON_REFRESH",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    refresh: u64,

    /// Port the metrics server listens on (all interfaces).
    #[arg(long, default_value = "9983", env = "SIAMON_PORT")]
    port: u16,

    /// Modules to collect: c=consensus, g=gateway, h=host, m=miner,
    /// r=renter (includes hostdb), t=transaction pool, w=wallet.
    #[arg(long, default_value = "cghmrtw", env = "SIAMON_MODULES")]
    modules: ModuleSelector,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber. `RUST_LOG` still applies to other targets.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    for target in ["siamond", "siamon_core"] {
        match format!("{}={}", target, level).parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("invalid log directive for {}: {}", target, e),
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    info!("siamond {} starting", env!("CARGO_PKG_VERSION"));
    info!(
        address = %args.address,
        refresh_minutes = args.refresh,
        port = args.port,
        modules = %args.modules,
        "config"
    );

    let api = match HttpApi::new(&args.address, &args.agent, password::find_password()) {
        Ok(api) => api,
        Err(e) => {
            error!(error = %e, "failed to create node client");
            process::exit(1);
        }
    };
    let metrics = match SiaMetrics::new() {
        Ok(metrics) => Arc::new(metrics),
        Err(e) => {
            error!(error = %e, "failed to register metrics");
            process::exit(1);
        }
    };

    let interval = Duration::from_secs(args.refresh * 60);
    let collector = Collector::new(api, metrics.clone(), args.modules);

    // The collection thread starts with a collection of its own; the server
    // comes up alongside it and serves zeros until that finishes.
    let running = Arc::new(AtomicBool::new(true));
    let handle = match poller::spawn(collector, interval, running.clone()) {
        Ok(handle) => handle,
        Err(e) => {
            error!(error = %e, "failed to start collection thread");
            process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "failed to build tokio runtime");
            process::exit(1);
        }
    };

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, args.port));
    let result = runtime.block_on(async {
        let listener = server::bind(addr).await?;
        server::serve(listener, metrics, server::shutdown_signal()).await
    });

    info!("shutting down");
    running.store(false, Ordering::SeqCst);

    if let Err(e) = result {
        error!(%addr, error = %e, "metrics server failed");
        process::exit(1);
    }
    if handle.join().is_err() {
        error!("collection thread panicked");
    }
    info!("shutdown complete");
}
