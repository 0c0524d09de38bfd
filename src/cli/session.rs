//! Session state shared by every CLI mode.

use serde::Serialize;

use crate::cli::CliError;
use crate::cli::parse::{ScriptCommand, parse_line};
use crate::command::{
    Calculator, CommandHistory, CommandResult, HistorySnapshot, Operand, ReplayDirection,
};

/// The scenario from the classic calculator walkthrough.
pub const DEMO_SCRIPT: &[&str] = &["+ 100", "- 50", "* 10", "/ 2", "undo 4", "redo 3"];

/// Result of running one command, ready for formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// An operation was applied or the status was requested.
    Value {
        value: Operand,
        cursor: usize,
        len: usize,
    },
    /// Undo or redo finished.
    Replay {
        direction: ReplayDirection,
        requested: usize,
        performed: usize,
        value: Operand,
        cursor: usize,
    },
    History {
        value: Operand,
        history: HistorySnapshot,
    },
    Cleared {
        value: Operand,
    },
    Help,
    Quit,
}

/// One calculator with its history.
pub struct Session {
    history: CommandHistory<Calculator>,
}

impl Session {
    pub fn new(history: CommandHistory<Calculator>) -> Self {
        Self { history }
    }

    pub fn history(&self) -> &CommandHistory<Calculator> {
        &self.history
    }

    pub fn value(&self) -> Operand {
        self.history.receiver().value()
    }

    /// Parse and run one script line. Blank lines and comments yield `None`.
    pub fn run_line(&mut self, line: &str) -> Result<Option<Outcome>, CliError> {
        match parse_line(line)? {
            Some(command) => Ok(Some(self.run(command)?)),
            None => Ok(None),
        }
    }

    pub fn run(&mut self, command: ScriptCommand) -> CommandResult<Outcome> {
        let outcome = match command {
            ScriptCommand::Compute { kind, operand } => {
                self.history.execute(kind, operand)?;
                self.value_outcome()
            }
            ScriptCommand::Undo(levels) => {
                let performed = self.history.undo(levels)?;
                self.replay_outcome(ReplayDirection::Undo, levels, performed)
            }
            ScriptCommand::Redo(levels) => {
                let performed = self.history.redo(levels)?;
                self.replay_outcome(ReplayDirection::Redo, levels, performed)
            }
            ScriptCommand::Status => self.value_outcome(),
            ScriptCommand::History => Outcome::History {
                value: self.value(),
                history: self.history.snapshot(),
            },
            ScriptCommand::Clear => {
                self.history.clear();
                Outcome::Cleared {
                    value: self.value(),
                }
            }
            ScriptCommand::Help => Outcome::Help,
            ScriptCommand::Quit => Outcome::Quit,
        };

        Ok(outcome)
    }

    fn value_outcome(&self) -> Outcome {
        Outcome::Value {
            value: self.value(),
            cursor: self.history.cursor(),
            len: self.history.len(),
        }
    }

    fn replay_outcome(
        &self,
        direction: ReplayDirection,
        requested: usize,
        performed: usize,
    ) -> Outcome {
        Outcome::Replay {
            direction,
            requested,
            performed,
            value: self.value(),
            cursor: self.history.cursor(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_script() {
        let mut session = Session::new(CommandHistory::new(Calculator::new()));
        let outcomes: Vec<Outcome> = DEMO_SCRIPT
            .iter()
            .filter_map(|line| session.run_line(line).unwrap())
            .collect();

        assert_eq!(outcomes.len(), 6);
        assert_eq!(
            outcomes[3],
            Outcome::Value {
                value: 250,
                cursor: 4,
                len: 4
            }
        );
        assert_eq!(
            outcomes[5],
            Outcome::Replay {
                direction: ReplayDirection::Redo,
                requested: 3,
                performed: 3,
                value: 500,
                cursor: 3
            }
        );
    }

    #[test]
    fn test_failed_line_reports_error_and_keeps_state() {
        let mut session = Session::new(CommandHistory::new(Calculator::new()));
        session.run_line("+ 9").unwrap();

        assert!(session.run_line("/ 0").is_err());
        assert!(session.run_line("mod 2").is_err());
        assert_eq!(session.value(), 9);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut session = Session::new(CommandHistory::new(Calculator::new()));
        session.run_line("+ 3").unwrap();
        let outcome = session.run_line("clear").unwrap();

        assert_eq!(outcome, Some(Outcome::Cleared { value: 3 }));
        assert!(session.history().is_empty());
    }
}
