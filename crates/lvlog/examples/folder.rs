//! Split-folder logging: one file per level, created on first use
//!
//! Run with: cargo run --example folder -- /tmp/lvlog-demo

use lvlog::{Config, Severity};

fn main() -> anyhow::Result<()> {
    let dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "lvlog-demo".to_string());

    lvlog::configure(Config::folder(&dir, true).with_min_level(Severity::Debug))?;

    lvlog::debug!("debug line")?;
    lvlog::error!("error line")?;

    // Only debug.log and error.log exist at this point
    for entry in std::fs::read_dir(&dir)? {
        println!("{}", entry?.path().display());
    }
    Ok(())
}
