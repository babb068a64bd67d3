//! Command-line argument parsing for the keymap tool
//!
//! Supports:
//! - Listing the compiled bindings of a platform
//! - Resolving chord text against them
//! - Checking a keymap file for errors and overrides
//! - Exporting the platform's raw table
//! - Simulating a session that dispatches chords

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::VoxConfig;
use crate::host::HostKind;

/// Inspect and exercise screen reader key bindings
#[derive(Parser, Debug)]
#[command(name = "voxhost", version, about = "Inspect screen reader key bindings")]
pub struct CliArgs {
    /// Platform host to use (defaults to the configured one)
    #[arg(short, long, global = true)]
    pub platform: Option<HostKind>,

    /// Ignore the user keymap override file
    #[arg(long, global = true)]
    pub no_overrides: bool,

    /// Also write debug logs to the config logs directory
    #[arg(long, global = true)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Print every binding: chord, command, description
    List,
    /// Print what each chord resolves to
    Resolve {
        #[arg(value_name = "CHORD", required = true)]
        chords: Vec<String>,
    },
    /// Compile a keymap file and report errors and overrides
    Check {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
    /// Print the platform's raw binding table
    Export {
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
    },
    /// Initialize a session and dispatch chords through it
    Simulate {
        #[arg(value_name = "CHORD", required = true)]
        chords: Vec<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
}

impl CliArgs {
    /// Platform to run, preferring the command line over the config file
    pub fn platform(&self, config: &VoxConfig) -> HostKind {
        self.platform.unwrap_or(config.platform)
    }
}
