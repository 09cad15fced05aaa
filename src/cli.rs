mod color;

use clap::Parser;
pub use color::ColorMode;
use std::path::PathBuf;

/// Interactive console for managing stream filter rules and their file outputs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, env = "RULE_CONSOLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// JSON rule listing the store starts from (overrides the config)
    #[arg(long)]
    pub seed: Option<PathBuf>,

    /// Run console commands from a file instead of reading stdin
    #[arg(short = 'f', long = "file")]
    pub script: Option<PathBuf>,

    /// Run a console command (repeatable, runs after --file)
    #[arg(short = 'c', long = "command")]
    pub commands: Vec<String>,

    /// Keep going when a scripted command fails
    #[arg(long)]
    pub continue_on_error: bool,

    /// When to color output
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Increase diagnostic output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn is_scripted(&self) -> bool {
        self.script.is_some() || !self.commands.is_empty()
    }

    /// Log filter derived from -v / -q
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
