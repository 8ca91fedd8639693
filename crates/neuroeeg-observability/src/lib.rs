// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # neuroeeg-observability
//!
//! Logging setup shared by all neuroeeg crates, with per-crate debug flags.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// Known neuroeeg crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "neuroeeg",
    "neuroeeg-atlas",
    "neuroeeg-leadfield",
    "neuroeeg-config",
];
