use colored::Colorize;
use std::process::ExitCode;

fn main() -> ExitCode {
    match rule_console::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
