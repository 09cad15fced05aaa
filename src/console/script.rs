use super::Console;
use crate::command::DispatchError;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{debug, warn};

const COMMENT_PREFIX: char = '#';

/// A scripted line that failed and stopped the script
#[derive(Debug, Error)]
#[error("line {line}: {error}")]
pub struct ScriptError {
    pub line: usize,
    pub error: DispatchError,
}

/// What a scripted run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptSummary {
    pub executed: usize,
    pub failed: usize,
}

/// Report a failed line without interrupting the session
pub fn report_error(errors: &mut dyn Write, error: &dyn std::fmt::Display) {
    let _ = writeln!(errors, "{} {error}", "error:".red().bold());
}

impl Console {
    /// Run lines non-interactively
    ///
    /// Blank lines and `#` comments are skipped. The first failing line ends
    /// the run unless `continue_on_error` is set, in which case failures are
    /// reported to `errors` and counted. `quit` ends the run early.
    pub fn run_script<I, S>(
        &mut self,
        lines: I,
        continue_on_error: bool,
        out: &mut dyn Write,
        errors: &mut dyn Write,
    ) -> Result<ScriptSummary, ScriptError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut summary = ScriptSummary::default();

        for (index, line) in lines.into_iter().enumerate() {
            let line = line.as_ref().trim();
            if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
                continue;
            }

            debug!(line = index + 1, command = line, "running scripted line");
            summary.executed += 1;
            if let Err(error) = self.execute(line, out) {
                let error = ScriptError {
                    line: index + 1,
                    error,
                };
                if !continue_on_error {
                    return Err(error);
                }
                warn!(%error, "scripted line failed");
                report_error(errors, &error);
                summary.failed += 1;
            }

            if !self.is_running() {
                break;
            }
        }

        Ok(summary)
    }

    /// Prompt, read and execute lines until `quit` or end of input
    ///
    /// Command failures are reported to `errors` and never end the loop.
    pub fn run_interactive<R: BufRead>(
        &mut self,
        mut input: R,
        out: &mut dyn Write,
        errors: &mut dyn Write,
    ) -> io::Result<()> {
        let prompt = self.session().config.prompt.clone();
        let mut line = String::new();

        while self.is_running() {
            write!(out, "{prompt}")?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                break;
            }

            if let Err(e) = self.execute(line.trim_end_matches(['\r', '\n']), out) {
                report_error(errors, &e);
            }
        }
        Ok(())
    }
}
