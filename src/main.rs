//! sbsgauge - Smart-battery fuel gauge reader
//!
//! Polls a battery pack over Linux i2c-dev and logs one line per sweep
//! with temperature, state of charge, remaining capacity, voltage and
//! current. The library crates do the actual work:
//!
//! - `sbsgauge-core` - register protocol, decoding, the `Gauge` driver
//! - `sbsgauge-linux-i2c` - `/dev/i2c-N` transport

mod cli;

use clap::Parser;
use cli::Cli;
use sbsgauge_core::Gauge;
use sbsgauge_linux_i2c::{LinuxI2c, LinuxI2cConfig};
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbosity
    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    let config = LinuxI2cConfig::new(cli.bus).with_address(cli.address);
    let bus = LinuxI2c::open(&config)?;
    let mut gauge = Gauge::new(bus);

    let mut sweeps = 0u64;
    loop {
        match gauge.status() {
            Ok(status) => log::info!(
                "{:.1} °C, {} %, {} mAh, {} mV, {} mA",
                status.temperature_c,
                status.relative_soc_pct,
                status.remaining_capacity_mah,
                status.voltage_mv,
                status.current_ma,
            ),
            // a failed sweep is not fatal, the pack may just be busy
            Err(e) => log::error!("sweep failed: {}", e),
        }

        sweeps += 1;
        if cli.count != 0 && sweeps >= cli.count {
            break;
        }
        std::thread::sleep(Duration::from_secs(cli.interval));
    }

    Ok(())
}
