//! The rule console: command tree, session state and the input loops.
//!
//! # Commands
//!
//! ```text
//! help [opt: flag]
//! rules add <name> <rule> [opt: tag]
//! rules delete <name>
//! rules view <name> [opt: id]
//! rules list | rules sync | rules compile <rule>
//! handle add <name> <file> [opt: rules...]
//! handle delete|view <name> | handle list | handle file <name> <file>
//! handle rules add|delete <name> [opt: rules...]
//! stream replay <capture> [opt: limit]
//! quit
//! ```

mod display;
mod handle_cmds;
mod rules_cmds;
mod script;
mod session;
mod stream_cmds;

pub use display::{EMPTY_LISTING, create_styled_table};
pub use rules_cmds::write_sync_report;
pub use script::{ScriptError, ScriptSummary, report_error};
pub use session::Session;

use crate::command::{Args, Command, CommandError, CommandGroup, DispatchError, TreeError};
use std::io::Write;

pub const QUIT_COMMAND: &str = "quit";

/// The full console command tree
pub fn build_root() -> Result<CommandGroup<Session>, TreeError> {
    let mut root = CommandGroup::root();
    root.add_group(rules_cmds::rules_group()?)?
        .add_group(handle_cmds::handle_group()?)?
        .add_group(stream_cmds::stream_group()?)?
        .add_command(Command::new(
            QUIT_COMMAND,
            "Leave the console",
            Vec::new(),
            quit,
        )?)?;
    Ok(root)
}

fn quit(session: &mut Session, _: &Args, out: &mut dyn Write) -> Result<(), CommandError> {
    session.stop();
    writeln!(out, "Bye")?;
    Ok(())
}

/// A session bound to the command tree that drives it
pub struct Console {
    root: CommandGroup<Session>,
    session: Session,
}

impl Console {
    pub fn new(session: Session) -> Result<Self, TreeError> {
        Ok(Self {
            root: build_root()?,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    /// Sync once before taking commands, reporting what was pulled
    pub fn startup_sync(&mut self, out: &mut dyn Write) -> Result<(), CommandError> {
        let report = self.session.sync()?;
        if !report.pulled.is_empty() {
            write_sync_report(out, &report)?;
        }
        Ok(())
    }

    /// Run one input line against the tree
    pub fn execute(&mut self, line: &str, out: &mut dyn Write) -> Result<(), DispatchError> {
        self.root.dispatch(&mut self.session, line, out)
    }
}
