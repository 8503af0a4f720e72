//! Error types for Linux i2c-dev operations

use thiserror::Error;

/// Linux i2c-dev specific errors
#[derive(Debug, Error)]
pub enum LinuxI2cError {
    /// Failed to open the bus device node
    #[error("Failed to open {path}: {source}")]
    OpenFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to bind the slave address to the descriptor
    #[error("Failed to bind slave address 0x{address:02x}: {source}")]
    AddressingFailed {
        address: u8,
        #[source]
        source: std::io::Error,
    },

    /// Requested block length exceeds what SMBus can carry
    #[error("Block length {0} exceeds the SMBus maximum of 32")]
    BlockTooLong(usize),
}

/// Result type for Linux i2c-dev operations
pub type Result<T> = std::result::Result<T, LinuxI2cError>;
