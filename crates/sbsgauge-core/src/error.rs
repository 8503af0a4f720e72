//! Error types for sbsgauge-core

use thiserror::Error;

/// Core error type
///
/// Every bus primitive and accessor returns `Result`; there are no
/// in-band failure sentinels, so a large-but-legal reading can never be
/// confused with an error.
#[derive(Debug, Error)]
pub enum Error {
    /// A bus transaction failed; carries the platform error
    #[error("bus transaction failed: {0}")]
    Bus(#[from] std::io::Error),

    /// A block read transferred fewer bytes than the decode needs
    #[error("block read transferred {got} of {expected} bytes")]
    ShortTransfer { expected: usize, got: usize },

    /// The gauge returned a value below the valid range for the register
    #[error("register 0x{register:02x} has no valid reading yet (raw {raw})")]
    NotReady { register: u8, raw: u16 },
}

/// Result type for gauge operations
pub type Result<T> = std::result::Result<T, Error>;
