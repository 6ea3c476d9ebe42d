//! CLI argument definitions for the E2 preset controller.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "e2-presets",
    version,
    about = "E2 preset controller - preview and program switcher presets",
    long_about = "Load an E2 configuration export and drive its presets.\n\n\
                  The export directory holds settings_backup.xml and a presets/\n\
                  directory. Active, preview and program state is kept in the\n\
                  state file across runs."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration export directory.
    #[arg(
        long = "xml-dir",
        value_name = "DIR",
        env = "E2_PRESETS_XML",
        global = true
    )]
    pub xml_dir: Option<PathBuf>,

    /// State file for active/preview/program pointers (in memory when unset).
    #[arg(
        long = "state-db",
        value_name = "PATH",
        env = "E2_PRESETS_DB",
        global = true
    )]
    pub state_db: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List preset groups and their presets.
    Groups,

    /// List destinations with their preview and program presets.
    Destinations,

    /// Show every preset and where it is on preview/program.
    Status {
        /// Print the full state as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Make a preset active and put it on preview.
    Preview {
        /// Preset number.
        #[arg(value_name = "PRESET")]
        preset: String,
    },

    /// Take the active preset to program.
    Program,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
