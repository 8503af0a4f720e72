//! sbsgauge-linux-i2c - Linux i2c-dev transport
//!
//! This crate provides access to the battery pack via the Linux i2c-dev
//! character device interface at `/dev/i2c-N`.
//!
//! # Overview
//!
//! The kernel exposes I2C adapters as character devices. After binding a
//! slave address with the `I2C_SLAVE` ioctl, SMBus transactions are
//! issued through the `I2C_SMBUS` ioctl.
//!
//! # Example
//!
//! ```no_run
//! use sbsgauge_core::Gauge;
//! use sbsgauge_linux_i2c::{LinuxI2c, LinuxI2cConfig};
//!
//! // Open with defaults (bus 1, address 0x0B)
//! let bus = LinuxI2c::open(&LinuxI2cConfig::default())?;
//!
//! // Or bind a different bus and address
//! let config = LinuxI2cConfig::new(0).with_address(0x0B);
//! let bus = LinuxI2c::open(&config)?;
//!
//! let mut gauge = Gauge::new(bus);
//! println!("{} mV", gauge.voltage_mv()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # System requirements
//!
//! - Linux kernel with i2c-dev support (`CONFIG_I2C_CHARDEV`)
//! - Read/write access to `/dev/i2c-N`, typically via the `i2c` group

pub mod device;
pub mod error;

// Re-exports
pub use device::{LinuxI2c, LinuxI2cConfig, SMBUS_BLOCK_MAX};
pub use error::{LinuxI2cError, Result};
