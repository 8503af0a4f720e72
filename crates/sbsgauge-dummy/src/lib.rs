//! sbsgauge-dummy - In-memory battery pack emulator for testing
//!
//! This crate provides a dummy transport that emulates the pack's
//! register protocol in memory. It's useful for testing and development
//! without real hardware, and it enforces the wire protocol: a word read
//! that was not preceded by the pack select byte fails, as it would on
//! the device.

use sbsgauge_core::error::{Error, Result};
use sbsgauge_core::registers::{commands, CURRENT_BLOCK_LEN, PACK_SELECT};
use sbsgauge_core::transport::SmbusTransport;

use std::io;

/// Backing register values for the dummy pack
#[derive(Debug, Clone)]
pub struct DummyPackConfig {
    /// Temperature register, deci-Kelvin
    pub temperature_dk: u16,
    /// Voltage register, mV
    pub voltage_mv: u16,
    /// Relative state of charge register, percent
    pub relative_soc_pct: u16,
    /// Remaining capacity register, mAh
    pub remaining_capacity_mah: u16,
    /// Full charge capacity register, mAh
    pub full_charge_capacity_mah: u16,
    /// Raw current block as sent on the wire (length prefix + 4 LE bytes)
    pub current_block: [u8; CURRENT_BLOCK_LEN],
}

impl Default for DummyPackConfig {
    fn default() -> Self {
        Self {
            temperature_dk: 2981, // 25.0 °C
            voltage_mv: 7400,
            relative_soc_pct: 85,
            remaining_capacity_mah: 1200,
            full_charge_capacity_mah: 2000,
            current_block: [4, 0x64, 0x00, 0x00, 0x00], // charging at 100 mA
        }
    }
}

/// Dummy battery pack
///
/// Emulates the gauge's register protocol in memory for testing
/// purposes. Transaction counters and failure injection let tests assert
/// ordering and error paths that real hardware can't produce on demand.
pub struct DummyPack {
    config: DummyPackConfig,
    /// Set by a pack select write, consumed by the next word read
    selected: bool,
    byte_writes: u32,
    word_reads: u32,
    block_reads: u32,
    fail_writes: bool,
    fail_reads: bool,
    /// Cap on how many bytes a block read reports as transferred
    block_transfer_limit: Option<usize>,
}

impl DummyPack {
    /// Create a new dummy pack with the given register values
    pub fn new(config: DummyPackConfig) -> Self {
        Self {
            config,
            selected: false,
            byte_writes: 0,
            word_reads: 0,
            block_reads: 0,
            fail_writes: false,
            fail_reads: false,
            block_transfer_limit: None,
        }
    }

    /// Create a new dummy pack with default register values
    pub fn new_default() -> Self {
        Self::new(DummyPackConfig::default())
    }

    /// Get the backing register values
    pub fn config(&self) -> &DummyPackConfig {
        &self.config
    }

    /// Get mutable access to the backing register values
    pub fn config_mut(&mut self) -> &mut DummyPackConfig {
        &mut self.config
    }

    /// Make every byte write fail
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Make every word and block read fail
    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Make block reads report at most `limit` transferred bytes
    pub fn limit_block_transfers(&mut self, limit: usize) {
        self.block_transfer_limit = Some(limit);
    }

    /// Number of byte writes issued so far
    pub fn byte_writes(&self) -> u32 {
        self.byte_writes
    }

    /// Number of word reads issued so far
    pub fn word_reads(&self) -> u32 {
        self.word_reads
    }

    /// Number of block reads issued so far
    pub fn block_reads(&self) -> u32 {
        self.block_reads
    }

    fn injected(&self, what: &str) -> Error {
        Error::Bus(io::Error::other(format!("injected {what} failure")))
    }
}

impl SmbusTransport for DummyPack {
    fn write_byte(&mut self, value: u8) -> Result<()> {
        self.byte_writes += 1;

        if self.fail_writes {
            return Err(self.injected("write"));
        }

        if value != PACK_SELECT {
            return Err(Error::Bus(io::Error::other(format!(
                "unexpected byte 0x{value:02x}, pack expects 0x{PACK_SELECT:02x}"
            ))));
        }

        log::trace!("dummy: pack selected");
        self.selected = true;
        Ok(())
    }

    fn read_word(&mut self, command: u8) -> Result<u16> {
        self.word_reads += 1;

        if self.fail_reads {
            return Err(self.injected("read"));
        }

        // Each word read needs its own preceding pack select
        if !self.selected {
            return Err(Error::Bus(io::Error::other(
                "word read without pack select",
            )));
        }
        self.selected = false;

        match command {
            commands::TEMPERATURE => Ok(self.config.temperature_dk),
            commands::VOLTAGE => Ok(self.config.voltage_mv),
            commands::PERCENTAGE => Ok(self.config.relative_soc_pct),
            commands::RM_CAPACITY => Ok(self.config.remaining_capacity_mah),
            commands::FC_CAPACITY => Ok(self.config.full_charge_capacity_mah),
            _ => Err(Error::Bus(io::Error::other(format!(
                "no word register 0x{command:02x}"
            )))),
        }
    }

    fn read_block(&mut self, command: u8, buf: &mut [u8]) -> Result<usize> {
        self.block_reads += 1;

        if self.fail_reads {
            return Err(self.injected("read"));
        }

        if command != commands::CURRENT {
            return Err(Error::Bus(io::Error::other(format!(
                "no block register 0x{command:02x}"
            ))));
        }

        let mut transferred = buf.len().min(self.config.current_block.len());
        if let Some(limit) = self.block_transfer_limit {
            transferred = transferred.min(limit);
        }

        buf[..transferred].copy_from_slice(&self.config.current_block[..transferred]);
        Ok(transferred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbsgauge_core::{Gauge, PackStatus};

    #[test]
    fn full_sweep_against_preloaded_pack() {
        let config = DummyPackConfig {
            temperature_dk: 2731,
            voltage_mv: 7400,
            relative_soc_pct: 85,
            remaining_capacity_mah: 1200,
            full_charge_capacity_mah: 2000,
            current_block: [5, 0x38, 0xFF, 0xFF, 0xFF],
        };
        let mut gauge = Gauge::new(DummyPack::new(config));

        let status = gauge.status().unwrap();
        assert_eq!(
            status,
            PackStatus {
                temperature_c: 0.0,
                voltage_mv: 7400,
                current_ma: -200,
                relative_soc_pct: 85,
                remaining_capacity_mah: 1200,
                full_charge_capacity_mah: 2000,
            }
        );
    }

    #[test]
    fn accessors_read_the_default_pack() {
        let mut gauge = Gauge::new(DummyPack::new_default());

        assert_eq!(gauge.temperature_celsius().unwrap(), 25.0);
        assert_eq!(gauge.voltage_mv().unwrap(), 7400);
        assert_eq!(gauge.current_ma().unwrap(), 100);
        assert_eq!(gauge.relative_state_of_charge().unwrap(), 85);
        assert_eq!(gauge.remaining_capacity_mah().unwrap(), 1200);
        assert_eq!(gauge.full_charge_capacity_mah().unwrap(), 2000);
    }

    #[test]
    fn accessors_are_idempotent_on_a_stable_pack() {
        let mut gauge = Gauge::new(DummyPack::new_default());

        let first = gauge.voltage_mv().unwrap();
        let second = gauge.voltage_mv().unwrap();
        assert_eq!(first, second);

        let first = gauge.current_ma().unwrap();
        let second = gauge.current_ma().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn failed_pack_select_short_circuits_the_word_read() {
        let mut pack = DummyPack::new_default();
        pack.fail_writes(true);
        let mut gauge = Gauge::new(pack);

        assert!(gauge.temperature_celsius().is_err());

        let pack = gauge.release();
        assert_eq!(pack.byte_writes(), 1);
        assert_eq!(pack.word_reads(), 0);
    }

    #[test]
    fn every_word_read_is_preceded_by_a_pack_select() {
        let mut gauge = Gauge::new(DummyPack::new_default());

        gauge.voltage_mv().unwrap();
        gauge.remaining_capacity_mah().unwrap();

        let pack = gauge.release();
        assert_eq!(pack.byte_writes(), pack.word_reads());
    }

    #[test]
    fn word_read_without_select_is_rejected() {
        let mut pack = DummyPack::new_default();
        let err = pack.read_word(commands::VOLTAGE).unwrap_err();
        assert!(matches!(err, Error::Bus(_)));
    }

    #[test]
    fn select_is_consumed_by_the_following_read() {
        let mut pack = DummyPack::new_default();
        pack.write_byte(PACK_SELECT).unwrap();
        pack.read_word(commands::VOLTAGE).unwrap();
        assert!(pack.read_word(commands::VOLTAGE).is_err());
    }

    #[test]
    fn short_block_transfer_is_an_error() {
        let mut pack = DummyPack::new_default();
        pack.limit_block_transfers(1);
        let mut gauge = Gauge::new(pack);

        let err = gauge.current_ma().unwrap_err();
        assert!(matches!(
            err,
            Error::ShortTransfer {
                expected: CURRENT_BLOCK_LEN,
                got: 1
            }
        ));
    }

    #[test]
    fn read_failure_carries_the_transport_error() {
        let mut pack = DummyPack::new_default();
        pack.fail_reads(true);
        let mut gauge = Gauge::new(pack);

        let err = gauge.voltage_mv().unwrap_err();
        assert!(matches!(err, Error::Bus(_)));
    }

    #[test]
    fn updated_register_values_show_up_on_the_next_read() {
        let mut gauge = Gauge::new(DummyPack::new_default());
        assert_eq!(gauge.relative_state_of_charge().unwrap(), 85);

        // no caching anywhere between reads
        gauge = {
            let mut pack = gauge.release();
            pack.config_mut().relative_soc_pct = 84;
            Gauge::new(pack)
        };
        assert_eq!(gauge.relative_state_of_charge().unwrap(), 84);
    }
}
