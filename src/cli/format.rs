//! Output formatting for human and JSON modes.

use crate::cli::CliError;
use crate::cli::session::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

pub const HELP_TEXT: &str = "\
Commands:
  <op> <n>      apply an operation (+ - * / or add, sub, mul, div)
  undo [n]      undo n steps (default 1)
  redo [n]      redo n steps (default 1)
  status        show the current value
  history       list recorded operations
  clear         forget the history, keep the value
  help          show this help
  quit, exit    leave";

pub fn format_outcome(outcome: &Outcome, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => {
            serde_json::to_string(outcome).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
        }
        OutputMode::Human => format_human(outcome),
    }
}

fn format_human(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Value { value, .. } => format!("value = {}", value),
        Outcome::Replay {
            direction,
            requested,
            performed,
            value,
            ..
        } => {
            if performed < requested {
                format!(
                    "---- {} {} levels ({} available), value = {}",
                    direction, requested, performed, value
                )
            } else {
                format!("---- {} {} levels, value = {}", direction, requested, value)
            }
        }
        Outcome::History { value, history } => {
            if history.is_empty() {
                return format!("(empty history), value = {}", value);
            }
            let mut lines: Vec<String> = history
                .entries
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    let marker = if i < history.cursor { " " } else { "~" };
                    format!("{} {:>3}. {}", marker, i + 1, entry)
                })
                .collect();
            lines.push(format!("value = {}", value));
            lines.join("\n")
        }
        Outcome::Cleared { value } => format!("history cleared, value = {}", value),
        Outcome::Help => HELP_TEXT.to_string(),
        Outcome::Quit => String::new(),
    }
}

pub fn format_error(error: &CliError, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => serde_json::json!({ "error": error.to_string() }).to_string(),
        OutputMode::Human => format!("(error) {}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{HistorySnapshot, ReplayDirection};

    #[test]
    fn test_human_value() {
        let outcome = Outcome::Value {
            value: 250,
            cursor: 4,
            len: 4,
        };
        assert_eq!(format_outcome(&outcome, OutputMode::Human), "value = 250");
    }

    #[test]
    fn test_human_replay_reports_clamping() {
        let outcome = Outcome::Replay {
            direction: ReplayDirection::Undo,
            requested: 9,
            performed: 2,
            value: 0,
            cursor: 0,
        };
        assert_eq!(
            format_outcome(&outcome, OutputMode::Human),
            "---- undo 9 levels (2 available), value = 0"
        );
    }

    #[test]
    fn test_human_history_marks_undone_entries() {
        let outcome = Outcome::History {
            value: 100,
            history: HistorySnapshot {
                entries: vec!["+ 100".into(), "- 50".into()],
                cursor: 1,
                len: 2,
            },
        };
        assert_eq!(
            format_outcome(&outcome, OutputMode::Human),
            "    1. + 100\n~   2. - 50\nvalue = 100"
        );
    }

    #[test]
    fn test_json_value() {
        let outcome = Outcome::Value {
            value: 7,
            cursor: 1,
            len: 2,
        };
        let json: serde_json::Value =
            serde_json::from_str(&format_outcome(&outcome, OutputMode::Json)).unwrap();
        assert_eq!(json["kind"], "value");
        assert_eq!(json["value"], 7);
        assert_eq!(json["cursor"], 1);
        assert_eq!(json["len"], 2);
    }

    #[test]
    fn test_json_history_and_replay() {
        let history = Outcome::History {
            value: 100,
            history: HistorySnapshot {
                entries: vec!["+ 100".into(), "- 50".into()],
                cursor: 1,
                len: 2,
            },
        };
        let json: serde_json::Value =
            serde_json::from_str(&format_outcome(&history, OutputMode::Json)).unwrap();
        assert_eq!(json["kind"], "history");
        assert_eq!(json["history"]["len"], 2);
        assert_eq!(json["history"]["cursor"], 1);
        assert_eq!(json["history"]["entries"][1], "- 50");

        let replay = Outcome::Replay {
            direction: ReplayDirection::Redo,
            requested: 1,
            performed: 1,
            value: 50,
            cursor: 2,
        };
        let json: serde_json::Value =
            serde_json::from_str(&format_outcome(&replay, OutputMode::Json)).unwrap();
        assert_eq!(json["kind"], "replay");
        assert_eq!(json["direction"], "redo");
    }
}
