//! # Notary Common Library
//!
//! Shared code for the notarization client including:
//! - Data model (selected files, dispatch outcomes)
//! - Address and hash validation
//! - Response field-name policies
//! - Configuration loading
//! - Theme preference persistence

pub mod config;
pub mod error;
pub mod file;
pub mod outcome;
pub mod payload;
pub mod theme;
pub mod validation;

pub use error::{Error, Result, ValidationError};
pub use file::SelectedFile;
pub use outcome::DispatchOutcome;
pub use validation::{Address, ContentHash};
