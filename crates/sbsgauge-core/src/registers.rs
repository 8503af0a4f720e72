//! Register and address constants for the battery pack
//!
//! These values are part of the wire protocol and must match the device
//! exactly.

/// Default 7-bit slave address of the pack
pub const DEFAULT_ADDRESS: u8 = 0x0B;

/// Pack select byte, written to the bus before every word read.
///
/// The device expects this fixed byte regardless of which register is
/// read next; it is a pack/bank select, not the register address.
pub const PACK_SELECT: u8 = 0x16;

/// Wire size of the current block: one length prefix plus four data bytes
pub const CURRENT_BLOCK_LEN: usize = 5;

/// Readable registers of the gauge
pub mod commands {
    /// Pack temperature, in deci-Kelvin
    pub const TEMPERATURE: u8 = 0x08;
    /// Pack voltage, in mV
    pub const VOLTAGE: u8 = 0x09;
    /// Relative state of charge, in percent
    pub const PERCENTAGE: u8 = 0x0D;
    /// Remaining capacity, in mAh
    pub const RM_CAPACITY: u8 = 0x0F;
    /// Full charge capacity, in mAh
    pub const FC_CAPACITY: u8 = 0x10;
    /// Charge/discharge current, in mA (block read)
    pub const CURRENT: u8 = 0x2A;
}
