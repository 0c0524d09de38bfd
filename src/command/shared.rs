// SharedHistory - thread-safe handle around a CommandHistory
//
// Every call takes the lock exactly once, so the receiver state, the log and
// the cursor always change together.

use crate::command::manager::{CommandHistory, HistorySnapshot};
use crate::command::operation::{Operand, OperationKind};
use crate::command::state::Receiver;
use crate::command::trait_def::{CommandResult, ReversibleAction};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable handle to a history shared between threads
pub struct SharedHistory<R> {
    inner: Arc<Mutex<CommandHistory<R>>>,
}

impl<R> Clone for SharedHistory<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R> SharedHistory<R> {
    pub fn new(history: CommandHistory<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(history)),
        }
    }

    // Poison only comes from a panicking action. The log and cursor are never
    // touched before an action returns, so they are still consistent; the
    // receiver is too as long as actions keep the no-panic contract of
    // `ReversibleAction`.
    fn lock(&self) -> MutexGuard<'_, CommandHistory<R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn execute_action(&self, action: Box<dyn ReversibleAction<R>>) -> CommandResult<()> {
        self.lock().execute_action(action)
    }

    pub fn undo(&self, levels: usize) -> CommandResult<usize> {
        self.lock().undo(levels)
    }

    pub fn redo(&self, levels: usize) -> CommandResult<usize> {
        self.lock().redo(levels)
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        self.lock().snapshot()
    }

    /// Run `f` with exclusive access to the history
    ///
    /// Use this to read the receiver and the cursor consistently.
    pub fn with<T>(&self, f: impl FnOnce(&mut CommandHistory<R>) -> T) -> T {
        f(&mut *self.lock())
    }
}

impl<R: Receiver + 'static> SharedHistory<R> {
    pub fn execute(&self, kind: OperationKind, operand: Operand) -> CommandResult<()> {
        self.lock().execute(kind, operand)
    }

    pub fn compute(&self, operator: &str, operand: Operand) -> CommandResult<()> {
        self.lock().compute(operator, operand)
    }
}

impl<R> From<CommandHistory<R>> for SharedHistory<R> {
    fn from(history: CommandHistory<R>) -> Self {
        Self::new(history)
    }
}
