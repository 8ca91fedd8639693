// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-neuroeeg-atlas` to raise one crate to debug level.

use std::collections::BTreeSet;
use std::env;

use crate::KNOWN_CRATES;

/// Crates with debug logging enabled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateDebugFlags {
    pub enabled_crates: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Parse debug flags from command-line arguments
    ///
    /// Looks for arguments matching `--debug-{crate-name}`, and `--debug-all`.
    /// Names outside [`KNOWN_CRATES`] are ignored.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::default();
        for arg in args {
            if arg == "--debug-all" {
                flags.enable_all();
            } else if let Some(crate_name) = arg.strip_prefix("--debug-") {
                flags.enable(crate_name);
            }
        }
        flags
    }

    /// Enable one crate; returns `false` for names outside [`KNOWN_CRATES`].
    pub fn enable(&mut self, crate_name: &str) -> bool {
        if !KNOWN_CRATES.contains(&crate_name) {
            return false;
        }
        self.enabled_crates.insert(crate_name.to_string());
        true
    }

    pub fn enable_all(&mut self) {
        self.enabled_crates
            .extend(KNOWN_CRATES.iter().map(|c| c.to_string()));
    }

    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains(crate_name)
    }

    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// `EnvFilter` directives, e.g. `neuroeeg_atlas=debug,info`.
    ///
    /// Tracing targets use module paths, so hyphens become underscores.
    pub fn to_filter_string(&self, default_level: &str) -> String {
        let mut filters: Vec<String> = self
            .enabled_crates
            .iter()
            .map(|name| format!("{}=debug", name.replace('-', "_")))
            .collect();
        filters.push(default_level.to_string());
        filters.join(",")
    }
}

/// Parse debug flags from process arguments and `NEUROEEG_DEBUG`
///
/// `NEUROEEG_DEBUG` is a comma-separated list of crate names, or `all`.
/// Unknown names are skipped like unknown `--debug-` arguments.
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());

    if let Ok(env_var) = env::var("NEUROEEG_DEBUG") {
        if env_var == "all" {
            flags.enable_all();
        } else {
            for crate_name in env_var.split(',') {
                flags.enable(crate_name.trim());
            }
        }
    }

    flags
}
