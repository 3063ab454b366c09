//! Test helper modules for notary-client integration tests
//!
//! Provides reusable test infrastructure components:
//! - FakeDispatcher: scripted in-memory dispatcher that records every call
//! - FakeBackend: in-process axum server standing in for the notary backend

#![allow(dead_code)]

pub mod fake_backend;
pub mod fake_dispatcher;

pub use fake_backend::{spawn_backend, unreachable_base_url, Captured, FakeBackend};
pub use fake_dispatcher::{Call, FakeDispatcher};

use std::path::PathBuf;

use notary_common::SelectedFile;

pub const ADDR: &str = "0x52908400098527886E0F7030069857D2E4169EE7";
pub const HASH: &str = "0x9c22ff5f21f0b81b113e63f7db6da94fedef11b2119b4088b89664fb9a3cb658";

/// File reference that is never read from disk
pub fn virtual_file(name: &str, size_bytes: u64) -> SelectedFile {
    SelectedFile {
        name: name.to_string(),
        size_bytes,
        mime_type: None,
        path: PathBuf::from(format!("/virtual/{}", name)),
    }
}
