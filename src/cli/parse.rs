//! Script line → `ScriptCommand` conversion.
//!
//! One line holds one command:
//! - `<op> <n>` or `<op><n>` where op is `+ - * /` or a name (`add`, `div`, ...)
//! - `undo [n]`, `redo [n]` (n defaults to 1)
//! - `status`, `history`, `clear`, `help`, `quit`/`exit`
//!
//! Blank lines and lines starting with `#` are skipped.

use crate::command::{CommandError, Operand, OperationKind};

/// A parsed script line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptCommand {
    Compute { kind: OperationKind, operand: Operand },
    Undo(usize),
    Redo(usize),
    Status,
    History,
    Clear,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Missing operand for '{0}'")]
    MissingOperand(String),

    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    #[error("Unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error(transparent)]
    Unsupported(#[from] CommandError),
}

/// Parse one script line.
///
/// Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let mut parts = trimmed.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(None);
    };
    let arg = parts.next();
    if let Some(extra) = parts.next() {
        return Err(ParseError::UnexpectedArgument(extra.to_string()));
    }

    let command = match head.to_ascii_lowercase().as_str() {
        "undo" => ScriptCommand::Undo(parse_levels(arg)?),
        "redo" => ScriptCommand::Redo(parse_levels(arg)?),
        "status" => no_argument(ScriptCommand::Status, arg)?,
        "history" => no_argument(ScriptCommand::History, arg)?,
        "clear" => no_argument(ScriptCommand::Clear, arg)?,
        "help" => ScriptCommand::Help,
        "quit" | "exit" => ScriptCommand::Quit,
        _ => parse_compute(head, arg)?,
    };

    Ok(Some(command))
}

fn no_argument(command: ScriptCommand, arg: Option<&str>) -> Result<ScriptCommand, ParseError> {
    match arg {
        Some(extra) => Err(ParseError::UnexpectedArgument(extra.to_string())),
        None => Ok(command),
    }
}

fn parse_levels(arg: Option<&str>) -> Result<usize, ParseError> {
    match arg {
        None => Ok(1),
        Some(raw) => raw
            .parse()
            .map_err(|_| ParseError::InvalidNumber(raw.to_string())),
    }
}

fn parse_operand(raw: &str) -> Result<Operand, ParseError> {
    raw.parse()
        .map_err(|_| ParseError::InvalidNumber(raw.to_string()))
}

fn parse_compute(head: &str, arg: Option<&str>) -> Result<ScriptCommand, ParseError> {
    if let Some(raw) = arg {
        let kind = head.parse::<OperationKind>()?;
        let operand = parse_operand(raw)?;
        return Ok(ScriptCommand::Compute { kind, operand });
    }

    // Compact form: "+100", "/2"
    let mut chars = head.chars();
    match chars.next() {
        Some(symbol) if !symbol.is_alphanumeric() && head.len() > symbol.len_utf8() => {
            let kind = OperationKind::try_from(symbol)?;
            let operand = parse_operand(chars.as_str())?;
            Ok(ScriptCommand::Compute { kind, operand })
        }
        _ => {
            // Validate the operator first so "pow" reports the unknown operator
            head.parse::<OperationKind>()?;
            Err(ParseError::MissingOperand(head.to_string()))
        }
    }
}
