pub mod cli;
pub mod command;
pub mod config;
pub mod console;
pub mod filter;
pub mod rules;
pub mod sink;

use std::fs;
use std::io;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub use cli::{Cli, ColorMode, cli_parse};
pub use command::{CommandError, CommandGroup, DispatchError, tokenize};
pub use config::{ConsoleConfig, load_config};
pub use console::{Console, Session, build_root};
pub use filter::{ExpressionNode, FilterParseError, compile};
pub use rules::{MemoryStore, RuleStore};

/// Log to stderr; `RUST_LOG` wins over -v / -q
fn init_tracing(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// The store the session starts from: `--seed` over the configured seed,
/// empty otherwise
fn open_store(cli: &Cli, config: &ConsoleConfig) -> anyhow::Result<MemoryStore> {
    let store = match cli.seed.as_ref().or(config.seed.as_ref()) {
        Some(path) => {
            debug!(seed = %path.display(), "seeding rule store");
            MemoryStore::load_seed(path)?
        }
        None => MemoryStore::new(),
    };
    Ok(store.with_cap(config.effective_rule_cap()))
}

/// Script file lines followed by every `-c` command
fn script_lines(cli: &Cli) -> anyhow::Result<Vec<String>> {
    let mut lines = Vec::new();
    if let Some(path) = &cli.script {
        let raw = fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read script '{}': {e}", path.display())
        })?;
        lines.extend(raw.lines().map(str::to_string));
    }
    lines.extend(cli.commands.iter().cloned());
    Ok(lines)
}

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();
    cli.color.apply();
    init_tracing(&cli);

    let config = load_config(cli.config.as_deref())?;
    if let Some(path) = &cli.config {
        debug!(config = %path.display(), "configuration loaded");
    }

    let store = open_store(&cli, &config)?;
    let mut console = Console::new(Session::new(config, Box::new(store)))?;

    let mut out = io::stdout().lock();
    let mut errors = io::stderr();
    console.startup_sync(&mut out)?;

    if cli.is_scripted() {
        let lines = script_lines(&cli)?;
        let summary = console.run_script(lines, cli.continue_on_error, &mut out, &mut errors)?;
        info!(
            executed = summary.executed,
            failed = summary.failed,
            "script finished"
        );
        if summary.failed > 0 {
            anyhow::bail!("{} scripted command(s) failed", summary.failed);
        }
    } else {
        console.run_interactive(io::stdin().lock(), &mut out, &mut errors)?;
    }

    Ok(())
}
