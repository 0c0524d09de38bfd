//! Interactive REPL and pipe mode.

use std::io::BufRead;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::cli::CliError;
use crate::cli::format::{OutputMode, format_error, format_outcome};
use crate::cli::session::{Outcome, Session};

const PROMPT: &str = "calc> ";

/// Interactive prompt. Errors are printed and the loop continues.
pub fn run_repl(session: &mut Session, mode: OutputMode) -> Result<(), CliError> {
    let mut editor = DefaultEditor::new()?;
    println!("value = {}  (type 'help' for commands)", session.value());

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                match session.run_line(&line) {
                    Ok(Some(Outcome::Quit)) => break,
                    Ok(Some(outcome)) => println!("{}", format_outcome(&outcome, mode)),
                    Ok(None) => {}
                    Err(e) => eprintln!("{}", format_error(&e, mode)),
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

/// Read commands from `input` (stdin in the binary) until EOF.
///
/// Returns the process exit code: 0 if every line succeeded, 1 otherwise.
/// Unlike shell mode, a failing line does not stop the run.
pub fn run_pipe(session: &mut Session, input: impl BufRead, mode: OutputMode) -> i32 {
    let mut exit_code = 0;

    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("{}", format_error(&CliError::Io(e), mode));
                return 1;
            }
        };

        match session.run_line(&line) {
            Ok(Some(Outcome::Quit)) => break,
            Ok(Some(outcome)) => println!("{}", format_outcome(&outcome, mode)),
            Ok(None) => {}
            Err(e) => {
                eprintln!("{}", format_error(&e, mode));
                exit_code = 1;
            }
        }
    }

    exit_code
}
