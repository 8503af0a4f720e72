//! Bus transport trait
//!
//! The driver never talks to hardware directly; it issues SMBus-style
//! transactions through this trait. `sbsgauge-linux-i2c` implements it on
//! top of `/dev/i2c-N`, `sbsgauge-dummy` implements it in memory.

use crate::error::Result;

/// An SMBus-capable transport bound to a single slave address.
///
/// All operations are synchronous and block the calling thread for the
/// duration of one bus transaction. Implementations are not required to
/// be thread-safe; callers sharing a transport across threads must
/// serialize access externally.
pub trait SmbusTransport {
    /// Send a single byte to the slave (SMBus "send byte")
    fn write_byte(&mut self, value: u8) -> Result<()>;

    /// Read a 16-bit word from a register (SMBus "read word data")
    fn read_word(&mut self, command: u8) -> Result<u16>;

    /// Read up to `buf.len()` bytes from a register as a block.
    ///
    /// Returns the number of bytes actually transferred. The pack sends
    /// its own length prefix as the first byte; it is passed through in
    /// `buf[0]`, not interpreted here.
    fn read_block(&mut self, command: u8, buf: &mut [u8]) -> Result<usize>;
}
