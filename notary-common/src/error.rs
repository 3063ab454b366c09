//! Common error types for the notary client

use thiserror::Error;

/// Common result type for notary operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the notary crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML document could not be parsed
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML document could not be written
    #[error("TOML write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Input rejected before any request is issued
///
/// The `Display` text is shown verbatim in the warn badge.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Upload triggered with an empty upload zone
    #[error("Please choose a file.")]
    MissingUploadFile,

    /// Upload triggered with a malformed account address
    #[error("Enter a valid 0x… address.")]
    InvalidAddress,

    /// File verification triggered with an empty verify zone
    #[error("Choose a file to verify.")]
    MissingVerifyFile,

    /// Hash lookup triggered with a malformed hash
    #[error("Enter a valid 32-byte (0x…) hash.")]
    InvalidHash,
}
