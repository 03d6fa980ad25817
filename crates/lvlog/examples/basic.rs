//! Terminal logging with the process-wide logger
//!
//! Run with: cargo run --example basic

use lvlog::prelude::*;

fn main() -> Result<()> {
    lvlog::set_min_level(Severity::Info);

    debug!("not shown, below the threshold")?;
    info!("service starting on port {}", 8080)?;
    lvlog::global().warnf("cache at %d%% capacity", &[&91])?;
    error!("upstream {} unreachable", "db-1")?;

    // Route `tracing` events through the same logger
    lvlog::install_tracing_bridge()?;
    tracing::info!(requests = 42, "bridged from tracing");

    lvlog::set_color_enabled(false);
    info!("colors off")?;

    fatal!("unrecoverable: {}", "config missing");
}
