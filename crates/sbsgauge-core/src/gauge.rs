//! Gauge driver
//!
//! Each accessor is a stateless one-shot exchange: select the pack, read
//! one register, decode. There are no retries and no caching; callers
//! that want periodic readings poll at their own cadence.

use crate::error::{Error, Result};
use crate::registers::{self, commands, CURRENT_BLOCK_LEN};
use crate::transport::SmbusTransport;

/// One full sweep of the gauge's readings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackStatus {
    /// Pack temperature in °C
    pub temperature_c: f32,
    /// Pack voltage in mV
    pub voltage_mv: u16,
    /// Charge (positive) or discharge (negative) current in mA
    pub current_ma: i32,
    /// Relative state of charge in percent (0-100)
    pub relative_soc_pct: u16,
    /// Remaining capacity in mAh
    pub remaining_capacity_mah: u16,
    /// Full charge capacity in mAh
    pub full_charge_capacity_mah: u16,
}

/// Fuel gauge handle
///
/// Owns the bus transport for its whole lifetime; the transport is
/// released when the handle is dropped, or handed back by [`Gauge::release`].
/// One owner thread per handle - wrap it in a mutex to share.
pub struct Gauge<T> {
    bus: T,
}

impl<T: SmbusTransport> Gauge<T> {
    /// Create a driver instance on an already-open transport
    pub fn new(bus: T) -> Self {
        Self { bus }
    }

    /// Give the transport back to the caller
    pub fn release(self) -> T {
        self.bus
    }

    /// Select the pack, then read a 16-bit register.
    ///
    /// The select byte is always [`registers::PACK_SELECT`], never the
    /// register address; a failed select short-circuits before the read
    /// transaction is issued.
    fn read_register(&mut self, register: u8) -> Result<u16> {
        self.bus.write_byte(registers::PACK_SELECT)?;
        self.bus.read_word(register)
    }

    /// Reads the pack temperature in °C
    pub fn temperature_celsius(&mut self) -> Result<f32> {
        let raw = self.read_register(commands::TEMPERATURE)?;
        let celsius = decode_temperature(raw)?;
        log::debug!("temperature: {:.1} °C", celsius);
        Ok(celsius)
    }

    /// Reads the pack voltage in millivolts
    pub fn voltage_mv(&mut self) -> Result<u16> {
        let mv = self.read_register(commands::VOLTAGE)?;
        log::debug!("voltage: {} mV", mv);
        Ok(mv)
    }

    /// Reads the charge/discharge current in milliamps.
    ///
    /// Positive means charging, negative discharging. The gauge answers
    /// with a 5-byte block: a length prefix followed by the current as a
    /// little-endian signed 32-bit value.
    pub fn current_ma(&mut self) -> Result<i32> {
        let mut block = [0u8; CURRENT_BLOCK_LEN];
        let transferred = self.bus.read_block(commands::CURRENT, &mut block)?;
        let ma = decode_current(&block, transferred)?;
        log::debug!("current: {} mA", ma);
        Ok(ma)
    }

    /// Reads the relative state of charge in percent (0-100)
    pub fn relative_state_of_charge(&mut self) -> Result<u16> {
        let pct = self.read_register(commands::PERCENTAGE)?;
        log::debug!("state of charge: {} %", pct);
        Ok(pct)
    }

    /// Reads the remaining capacity in milliamp-hours
    pub fn remaining_capacity_mah(&mut self) -> Result<u16> {
        let mah = self.read_register(commands::RM_CAPACITY)?;
        log::debug!("remaining capacity: {} mAh", mah);
        Ok(mah)
    }

    /// Reads the full charge capacity in milliamp-hours
    pub fn full_charge_capacity_mah(&mut self) -> Result<u16> {
        let mah = self.read_register(commands::FC_CAPACITY)?;
        log::debug!("full charge capacity: {} mAh", mah);
        Ok(mah)
    }

    /// Sweeps all six readings into one snapshot
    pub fn status(&mut self) -> Result<PackStatus> {
        Ok(PackStatus {
            temperature_c: self.temperature_celsius()?,
            voltage_mv: self.voltage_mv()?,
            current_ma: self.current_ma()?,
            relative_soc_pct: self.relative_state_of_charge()?,
            remaining_capacity_mah: self.remaining_capacity_mah()?,
            full_charge_capacity_mah: self.full_charge_capacity_mah()?,
        })
    }
}

/// Deci-Kelvin to °C.
///
/// Raw 0 and 1 mean the gauge has not produced a reading yet; that is an
/// explicit error, not a zero-valued default.
fn decode_temperature(raw: u16) -> Result<f32> {
    if raw <= 1 {
        return Err(Error::NotReady {
            register: commands::TEMPERATURE,
            raw,
        });
    }
    Ok((raw as f32 - 2731.0) / 10.0)
}

/// Reassemble a current block into signed mA.
///
/// `block[0]` is the pack's length prefix and is discarded; the payload
/// sits at offsets 1..=4, little-endian. A transfer of one byte or less
/// carries no payload and is an explicit error.
fn decode_current(block: &[u8; CURRENT_BLOCK_LEN], transferred: usize) -> Result<i32> {
    if transferred <= 1 {
        return Err(Error::ShortTransfer {
            expected: CURRENT_BLOCK_LEN,
            got: transferred,
        });
    }
    Ok(i32::from_le_bytes([block[1], block[2], block[3], block[4]]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_decodes_deci_kelvin() {
        assert_eq!(decode_temperature(2981).unwrap(), 25.0);
        assert_eq!(decode_temperature(3001).unwrap(), 27.0);
        assert_eq!(decode_temperature(2731).unwrap(), 0.0);
    }

    #[test]
    fn temperature_below_freezing() {
        assert_eq!(decode_temperature(2631).unwrap(), -10.0);
    }

    #[test]
    fn temperature_not_ready_is_an_error() {
        for raw in [0u16, 1] {
            match decode_temperature(raw) {
                Err(Error::NotReady { register, raw: r }) => {
                    assert_eq!(register, commands::TEMPERATURE);
                    assert_eq!(r, raw);
                }
                other => panic!("expected NotReady, got {other:?}"),
            }
        }
    }

    #[test]
    fn current_decodes_signed_little_endian() {
        let discharge = [4, 0xFF, 0xFF, 0xFF, 0xFF];
        assert_eq!(decode_current(&discharge, 5).unwrap(), -1);

        let charge = [4, 0x64, 0x00, 0x00, 0x00];
        assert_eq!(decode_current(&charge, 5).unwrap(), 100);
    }

    #[test]
    fn current_length_prefix_is_discarded() {
        // Only offsets 1..=4 contribute to the value
        let a = [0, 0x38, 0xFF, 0xFF, 0xFF];
        let b = [0xAB, 0x38, 0xFF, 0xFF, 0xFF];
        assert_eq!(decode_current(&a, 5).unwrap(), -200);
        assert_eq!(decode_current(&b, 5).unwrap(), -200);
    }

    #[test]
    fn current_short_transfer_is_an_error() {
        let block = [1, 0x64, 0x00, 0x00, 0x00];
        for got in [0usize, 1] {
            match decode_current(&block, got) {
                Err(Error::ShortTransfer { expected, got: g }) => {
                    assert_eq!(expected, CURRENT_BLOCK_LEN);
                    assert_eq!(g, got);
                }
                other => panic!("expected ShortTransfer, got {other:?}"),
            }
        }
    }
}
