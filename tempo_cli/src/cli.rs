//! CLI argument definitions.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tempo_core::SpeedRequest;

#[derive(Parser, Debug)]
#[command(name = "tempo", version, about = "Runtime time dilation control")]
pub struct Cli {
    /// Path to the persisted speed record (TOML)
    #[arg(long, value_name = "FILE", default_value = "etc/tempo_speed.toml")]
    pub config: PathBuf,

    /// Log and report errors as JSON instead of pretty text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); RUST_LOG takes precedence
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Also write JSON log lines to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Command to execute (default: show)
    #[command(subcommand)]
    pub cmd: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum Commands {
    /// Show the current speed
    Show,
    /// Set an absolute speed multiplier (e.g. 0.5)
    Set {
        #[arg(allow_negative_numbers = true)]
        multiplier: f32,
    },
    /// Toggle between normal speed and the last custom speed
    Toggle,
    /// Reset to normal speed (1.0x)
    Reset,
    /// Increase the speed (default step 0.1)
    #[command(visible_alias = "i")]
    Increase {
        #[arg(allow_negative_numbers = true)]
        amount: Option<f32>,
    },
    /// Decrease the speed (default step 0.1)
    #[command(visible_alias = "d")]
    Decrease {
        #[arg(allow_negative_numbers = true)]
        amount: Option<f32>,
    },
    /// Apply the saved speed, then read commands from stdin one line at a time
    Console,
}

impl Commands {
    /// The single request this command maps to; `None` for `console`.
    pub fn request(self) -> Option<SpeedRequest> {
        Some(match self {
            Commands::Show => SpeedRequest::Show,
            Commands::Set { multiplier } => SpeedRequest::Set(multiplier),
            Commands::Toggle => SpeedRequest::Toggle,
            Commands::Reset => SpeedRequest::Reset,
            Commands::Increase { amount } => SpeedRequest::Increase(amount),
            Commands::Decrease { amount } => SpeedRequest::Decrease(amount),
            Commands::Console => return None,
        })
    }
}
