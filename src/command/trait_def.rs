// ReversibleAction trait definition

use serde::Serialize;
use std::fmt;

/// Result type for command operations
pub type CommandResult<T> = Result<T, CommandError>;

/// Direction of a history replay step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplayDirection {
    Undo,
    Redo,
}

impl fmt::Display for ReplayDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayDirection::Undo => write!(f, "undo"),
            ReplayDirection::Redo => write!(f, "redo"),
        }
    }
}

/// Errors that can occur during command execution
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The receiver cannot perform the requested mutation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The requested operation kind is not part of the supported set
    #[error("Unsupported action: {0}")]
    UnsupportedAction(String),

    /// A recorded effect failed while being replayed
    #[error("{direction} failed at history entry {index}: {source}")]
    ReplayFailure {
        direction: ReplayDirection,
        index: usize,
        source: Box<CommandError>,
    },
}

impl CommandError {
    pub(crate) fn replay(direction: ReplayDirection, index: usize, cause: CommandError) -> Self {
        CommandError::ReplayFailure {
            direction,
            index,
            source: Box::new(cause),
        }
    }

    /// True if this error came out of an undo/redo replay
    pub fn is_replay_failure(&self) -> bool {
        matches!(self, CommandError::ReplayFailure { .. })
    }
}

/// Trait for actions that can be applied to and reverted from a receiver
///
/// Actions only carry the parameters they need to rebuild their forward and
/// inverse effects; the receiver state itself is owned by the history engine
/// and lent to the action for the duration of one call.
///
/// # Contract
/// Calling `revert` immediately after a successful `apply` must restore the
/// receiver to the value it held before `apply`. The engine relies on this but
/// does not check it.
///
/// `apply` and `revert` must not panic. Report failures through
/// `CommandResult` instead, and only after leaving the receiver untouched. A
/// panic unwinds out of the engine without recording anything, so a receiver
/// mutated before the panic no longer matches the log. `SharedHistory` keeps
/// serving calls after such a panic and cannot detect the mismatch.
///
/// # Thread Safety
/// Actions must be Send so the whole history can be moved to another thread.
///
/// # Example
/// ```
/// use reversible_calc::command::trait_def::{CommandResult, ReversibleAction};
///
/// struct Append(char);
///
/// impl ReversibleAction<String> for Append {
///     fn apply(&self, target: &mut String) -> CommandResult<()> {
///         target.push(self.0);
///         Ok(())
///     }
///
///     fn revert(&self, target: &mut String) -> CommandResult<()> {
///         target.pop();
///         Ok(())
///     }
///
///     fn description(&self) -> String {
///         format!("Append '{}'", self.0)
///     }
/// }
/// ```
pub trait ReversibleAction<R>: Send {
    /// Apply the forward effect
    ///
    /// Must leave the receiver untouched when it returns an error.
    fn apply(&self, receiver: &mut R) -> CommandResult<()>;

    /// Apply the inverse effect
    ///
    /// Must leave the receiver untouched when it returns an error.
    fn revert(&self, receiver: &mut R) -> CommandResult<()>;

    /// Get a human-readable description of the action
    ///
    /// Used for display (e.g., "Undo: * 10")
    fn description(&self) -> String;
}
