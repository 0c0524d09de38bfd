// Command Pattern for Undo/Redo functionality
//
// This module implements a reversible command history over a single receiver.
// All state-changing operations go through ReversibleAction.
//
// Architecture:
// - ReversibleAction trait: Defines apply(), revert(), description()
// - CommandHistory: Owns the receiver, the action log and the undo/redo cursor
// - ArithmeticCommand: Concrete action built from an OperationKind and operand
// - SharedHistory: Mutex-guarded handle for callers on several threads

pub mod commands;
pub mod manager;
pub mod operation;
pub mod shared;
pub mod state;
pub mod trait_def;

pub use commands::ArithmeticCommand;
pub use manager::{CommandHistory, HistorySnapshot};
pub use operation::{Operand, OperationKind};
pub use shared::SharedHistory;
pub use state::{Calculator, Receiver};
pub use trait_def::{CommandError, CommandResult, ReplayDirection, ReversibleAction};
