//! Linux i2c-dev device implementation
//!
//! This module provides the `LinuxI2c` struct that implements the
//! `SmbusTransport` trait using Linux's i2c-dev interface.

use crate::error::{LinuxI2cError, Result};

use sbsgauge_core::error::{Error as CoreError, Result as CoreResult};
use sbsgauge_core::registers::DEFAULT_ADDRESS;
use sbsgauge_core::transport::SmbusTransport;

use std::fs::{File, OpenOptions};
use std::os::unix::io::AsRawFd;

/// Default bus index, i.e. `/dev/i2c-1`
const DEFAULT_BUS: u32 = 1;

/// Largest data block an SMBus transaction can carry
pub const SMBUS_BLOCK_MAX: usize = 32;

/// Linux i2c-dev ioctl constants
mod ioctl {
    use nix::ioctl_write_int_bad;

    /// Bind a 7-bit slave address to the descriptor
    pub const I2C_SLAVE: libc::c_int = 0x0703;
    /// Perform an SMBus transfer described by `i2c_smbus_ioctl_data`
    pub const I2C_SMBUS: libc::c_ulong = 0x0720;

    // i2c_smbus_ioctl_data.read_write
    pub const I2C_SMBUS_WRITE: u8 = 0;
    pub const I2C_SMBUS_READ: u8 = 1;

    // i2c_smbus_ioctl_data.size (transaction kind, not a byte count)
    pub const I2C_SMBUS_BYTE: u32 = 1;
    pub const I2C_SMBUS_WORD_DATA: u32 = 3;
    pub const I2C_SMBUS_I2C_BLOCK_DATA: u32 = 8;

    ioctl_write_int_bad!(i2c_slave, I2C_SLAVE);
}

/// Mirror of the kernel's `union i2c_smbus_data`.
///
/// The union's members (byte, word, block) all alias the front of the
/// block, so carrying only the largest member is enough. A word lands in
/// the first two bytes in host order; a block carries its byte count at
/// offset 0 followed by up to 32 data bytes.
#[repr(C)]
#[derive(Clone, Copy)]
struct I2cSmbusData {
    block: [u8; SMBUS_BLOCK_MAX + 2],
}

impl I2cSmbusData {
    fn zeroed() -> Self {
        Self {
            block: [0; SMBUS_BLOCK_MAX + 2],
        }
    }
}

/// Mirror of the kernel's `struct i2c_smbus_ioctl_data`
#[repr(C)]
struct I2cSmbusIoctlData {
    read_write: u8,
    command: u8,
    size: u32,
    data: *mut I2cSmbusData,
}

/// Configuration for opening a Linux i2c-dev device
#[derive(Debug, Clone)]
pub struct LinuxI2cConfig {
    /// Bus index: N selects `/dev/i2c-N` (default: 1)
    pub bus: u32,
    /// 7-bit slave address (default: 0x0B, the pack)
    pub address: u8,
}

impl Default for LinuxI2cConfig {
    fn default() -> Self {
        Self {
            bus: DEFAULT_BUS,
            address: DEFAULT_ADDRESS,
        }
    }
}

impl LinuxI2cConfig {
    /// Create a configuration for the given bus index
    pub fn new(bus: u32) -> Self {
        Self {
            bus,
            ..Default::default()
        }
    }

    /// Set the slave address
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }
}

/// Linux i2c-dev transport bound to a single slave address
///
/// The descriptor is owned exclusively by this handle and released
/// exactly once, when the handle is dropped. Release errors are not
/// surfaced.
pub struct LinuxI2c {
    /// File handle for the i2c-dev device
    file: File,
    /// Bound 7-bit slave address, immutable after open
    address: u8,
}

impl LinuxI2c {
    /// Open a bus device node and bind the slave address.
    ///
    /// Both steps must succeed for a handle to exist; if binding fails
    /// the freshly opened descriptor is closed before returning, so no
    /// half-open handle ever escapes.
    pub fn open(config: &LinuxI2cConfig) -> Result<Self> {
        let path = format!("/dev/i2c-{}", config.bus);
        Self::open_path(&path, config.address)
    }

    /// Open a device node by path and bind the slave address
    pub fn open_path(path: &str, address: u8) -> Result<Self> {
        log::debug!("linux_i2c: Opening device {}", path);

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| LinuxI2cError::OpenFailed {
                path: path.to_string(),
                source: e,
            })?;

        let fd = file.as_raw_fd();

        // Bind the slave address; `file` drops (and the fd closes) if
        // this fails.
        unsafe {
            ioctl::i2c_slave(fd, address as libc::c_int).map_err(|e| {
                LinuxI2cError::AddressingFailed {
                    address,
                    source: std::io::Error::from_raw_os_error(e as i32),
                }
            })?;
        }

        log::info!("linux_i2c: Opened {} (addr=0x{:02x})", path, address);

        Ok(Self { file, address })
    }

    /// Open a bus with the default slave address
    pub fn open_bus(bus: u32) -> Result<Self> {
        Self::open(&LinuxI2cConfig::new(bus))
    }

    /// Get the bound slave address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Perform one SMBus transfer via the I2C_SMBUS ioctl
    fn smbus_xfer(
        &mut self,
        read_write: u8,
        command: u8,
        size: u32,
        data: *mut I2cSmbusData,
    ) -> std::io::Result<()> {
        let args = I2cSmbusIoctlData {
            read_write,
            command,
            size,
            data,
        };

        let ret = unsafe {
            libc::ioctl(
                self.file.as_raw_fd(),
                ioctl::I2C_SMBUS,
                &args as *const I2cSmbusIoctlData,
            )
        };
        if ret < 0 {
            return Err(std::io::Error::last_os_error());
        }

        Ok(())
    }
}

impl SmbusTransport for LinuxI2c {
    fn write_byte(&mut self, value: u8) -> CoreResult<()> {
        // SMBus "send byte": the value travels in the command field
        self.smbus_xfer(
            ioctl::I2C_SMBUS_WRITE,
            value,
            ioctl::I2C_SMBUS_BYTE,
            std::ptr::null_mut(),
        )
        .map_err(|e| {
            log::debug!("linux_i2c: byte write 0x{:02x} failed: {}", value, e);
            CoreError::Bus(e)
        })
    }

    fn read_word(&mut self, command: u8) -> CoreResult<u16> {
        let mut data = I2cSmbusData::zeroed();

        self.smbus_xfer(
            ioctl::I2C_SMBUS_READ,
            command,
            ioctl::I2C_SMBUS_WORD_DATA,
            &mut data,
        )
        .map_err(|e| {
            log::debug!("linux_i2c: word read 0x{:02x} failed: {}", command, e);
            CoreError::Bus(e)
        })?;

        // The kernel stores the word in host order at the union's front
        Ok(u16::from_ne_bytes([data.block[0], data.block[1]]))
    }

    fn read_block(&mut self, command: u8, buf: &mut [u8]) -> CoreResult<usize> {
        if buf.len() > SMBUS_BLOCK_MAX {
            return Err(CoreError::Bus(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                LinuxI2cError::BlockTooLong(buf.len()),
            )));
        }

        let mut data = I2cSmbusData::zeroed();
        data.block[0] = buf.len() as u8;

        self.smbus_xfer(
            ioctl::I2C_SMBUS_READ,
            command,
            ioctl::I2C_SMBUS_I2C_BLOCK_DATA,
            &mut data,
        )
        .map_err(|e| {
            log::debug!("linux_i2c: block read 0x{:02x} failed: {}", command, e);
            CoreError::Bus(e)
        })?;

        let transferred = (data.block[0] as usize).min(buf.len());
        buf[..transferred].copy_from_slice(&data.block[1..1 + transferred]);

        Ok(transferred)
    }
}
