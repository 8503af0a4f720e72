//! sbsgauge-core - Driver for SBS-style battery fuel gauges
//!
//! This crate implements the register protocol of a smart-battery fuel
//! gauge: a fixed "pack select" byte (0x16) is written to the pack before
//! every word read, then a 16-bit value is read from the target register.
//! Current is the one exception, read as a 5-byte block whose first byte
//! is a length prefix.
//!
//! The driver is generic over [`transport::SmbusTransport`], so the same
//! code runs against the Linux i2c-dev transport (`sbsgauge-linux-i2c`)
//! or the in-memory emulated pack (`sbsgauge-dummy`).
//!
//! # Example
//!
//! ```
//! use sbsgauge_core::{Gauge, Result};
//! use sbsgauge_core::transport::SmbusTransport;
//!
//! fn report<T: SmbusTransport>(bus: T) -> Result<()> {
//!     let mut gauge = Gauge::new(bus);
//!     let mv = gauge.voltage_mv()?;
//!     let soc = gauge.relative_state_of_charge()?;
//!     println!("{} mV at {} %", mv, soc);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod gauge;
pub mod registers;
pub mod transport;

// Re-exports
pub use error::{Error, Result};
pub use gauge::{Gauge, PackStatus};
