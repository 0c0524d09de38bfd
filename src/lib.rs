// Reversible calculator - Library exports for tests and benchmarks

pub mod cli;
pub mod command;
pub mod config;

// Re-export commonly used types for convenience
pub use command::{
    ArithmeticCommand, Calculator, CommandError, CommandHistory, CommandResult, HistorySnapshot,
    Operand, OperationKind, Receiver, ReplayDirection, ReversibleAction, SharedHistory,
};
pub use config::{ConfigError, EngineConfig};
