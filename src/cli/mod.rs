//! Command line front-end.
//!
//! Modes:
//! - **Shell mode**: `reversible_calc exec "+ 100" "undo"` or `run FILE`
//! - **Demo**: `reversible_calc demo` replays the classic calculator scenario
//! - **REPL mode**: `reversible_calc` with a terminal on stdin
//! - **Pipe mode**: `echo "+ 1" | reversible_calc` reads stdin line by line

pub mod format;
pub mod parse;
pub mod repl;
pub mod session;

use clap::{Arg, ArgAction, Command};

use crate::command::CommandError;
use crate::config::ConfigError;
use parse::ParseError;

pub use format::OutputMode;
pub use session::{Outcome, Session};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

pub fn build_cli() -> Command {
    Command::new("reversible_calc")
        .about("Integer calculator with unlimited undo and redo")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .global(true)
                .help("Configuration file (RON)"),
        )
        .arg(
            Arg::new("initial")
                .long("initial")
                .value_name("N")
                .value_parser(clap::value_parser!(i64))
                .allow_negative_numbers(true)
                .global(true)
                .help("Starting value of the calculator"),
        )
        .arg(
            Arg::new("max-history")
                .long("max-history")
                .value_name("N")
                .value_parser(clap::value_parser!(usize))
                .global(true)
                .help("Keep at most N history entries"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Print results as JSON"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("FILTER")
                .global(true)
                .help("tracing filter, e.g. info or reversible_calc=debug"),
        )
        .subcommand(Command::new("demo").about("Run the four-step calculator walkthrough"))
        .subcommand(
            Command::new("run")
                .about("Execute a script file line by line")
                .arg(Arg::new("file").required(true).value_name("FILE")),
        )
        .subcommand(
            Command::new("exec")
                .about("Execute each argument as a script line")
                .arg(
                    Arg::new("lines")
                        .required(true)
                        .num_args(1..)
                        .allow_hyphen_values(true)
                        .value_name("LINE"),
                ),
        )
}

/// Run every line in order, printing each outcome.
///
/// Stops at the first error and returns it. A `quit` line ends the run early.
pub fn run_lines<'a>(
    session: &mut Session,
    lines: impl IntoIterator<Item = &'a str>,
    mode: OutputMode,
) -> Result<(), CliError> {
    for line in lines {
        match session.run_line(line)? {
            Some(Outcome::Quit) => break,
            Some(outcome) => println!("{}", format::format_outcome(&outcome, mode)),
            None => {}
        }
    }
    Ok(())
}
