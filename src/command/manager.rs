// CommandHistory - Owns the receiver and the undo/redo log

use crate::command::commands::ArithmeticCommand;
use crate::command::operation::{Operand, OperationKind};
use crate::command::state::Receiver;
use crate::command::trait_def::{CommandError, CommandResult, ReplayDirection, ReversibleAction};
use serde::Serialize;
use std::collections::VecDeque;
use std::num::NonZeroUsize;

/// Manages command execution and undo/redo functionality
///
/// The history is a single ordered log plus a cursor:
/// - Entries before the cursor have been applied and can be undone
/// - Entries from the cursor onwards have been undone and can be redone
///
/// When a new command is executed:
/// 1. Apply it to the receiver
/// 2. Drop every entry from the cursor onwards (we're on a new timeline)
/// 3. Append it and advance the cursor
/// 4. Trim history if a limit is set
///
/// # Memory Management
/// By default the log grows without bound. With a history limit the oldest
/// entries are discarded first; entries that are still redoable are never
/// discarded.
pub struct CommandHistory<R> {
    /// The state every action operates on
    receiver: R,

    /// Executed actions in execution order
    log: VecDeque<Box<dyn ReversibleAction<R>>>,

    /// Number of applied entries at the front of `log`
    cursor: usize,

    /// Maximum number of entries to keep in the log
    max_history: Option<NonZeroUsize>,
}

/// Serializable view of the log, for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistorySnapshot {
    pub entries: Vec<String>,
    pub cursor: usize,
    pub len: usize,
}

impl HistorySnapshot {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<R> CommandHistory<R> {
    /// Create an unbounded history around `receiver`
    pub fn new(receiver: R) -> Self {
        Self {
            receiver,
            log: VecDeque::new(),
            cursor: 0,
            max_history: None,
        }
    }

    /// Create a history that keeps at most `max_history` entries
    pub fn with_max_history(receiver: R, max_history: NonZeroUsize) -> Self {
        Self {
            receiver,
            log: VecDeque::with_capacity(max_history.get()),
            cursor: 0,
            max_history: Some(max_history),
        }
    }

    /// Execute an action and record it
    ///
    /// This will:
    /// 1. Apply the action
    /// 2. Discard the redo tail (if successful)
    /// 3. Append it to the log
    /// 4. Trim history if needed
    ///
    /// # Errors
    /// Returns the action's error if applying it fails. The log and the cursor
    /// are left untouched in that case.
    pub fn execute_action(&mut self, action: Box<dyn ReversibleAction<R>>) -> CommandResult<()> {
        action.apply(&mut self.receiver)?;

        let discarded = self.log.len() - self.cursor;
        if discarded > 0 {
            tracing::debug!(discarded, "Discarding redo history");
        }
        self.log.truncate(self.cursor);

        tracing::debug!(action = %action.description(), "Executed");
        self.log.push_back(action);
        self.cursor += 1;

        self.trim_history();

        Ok(())
    }

    /// Undo up to `levels` actions
    ///
    /// Running out of history is not an error; the remaining levels are
    /// skipped. Returns how many actions were actually undone.
    ///
    /// # Errors
    /// Returns `ReplayFailure` if an inverse effect fails. Actions undone
    /// earlier in the same call stay undone and the cursor stays on the
    /// entry that failed.
    pub fn undo(&mut self, levels: usize) -> CommandResult<usize> {
        tracing::debug!(levels, cursor = self.cursor, "Undo");

        let mut undone = 0;
        while undone < levels && self.cursor > 0 {
            let index = self.cursor - 1;
            if let Err(err) = self.log[index].revert(&mut self.receiver) {
                tracing::warn!(index, error = %err, "Undo failed");
                return Err(CommandError::replay(ReplayDirection::Undo, index, err));
            }
            self.cursor = index;
            undone += 1;
        }

        Ok(undone)
    }

    /// Redo up to `levels` previously undone actions
    ///
    /// Returns how many actions were actually redone.
    ///
    /// # Errors
    /// Returns `ReplayFailure` if a forward effect fails, with the same
    /// partial-progress rules as [`undo`](Self::undo).
    pub fn redo(&mut self, levels: usize) -> CommandResult<usize> {
        tracing::debug!(levels, cursor = self.cursor, "Redo");

        let mut redone = 0;
        while redone < levels && self.cursor < self.log.len() {
            let index = self.cursor;
            if let Err(err) = self.log[index].apply(&mut self.receiver) {
                tracing::warn!(index, error = %err, "Redo failed");
                return Err(CommandError::replay(ReplayDirection::Redo, index, err));
            }
            self.cursor = index + 1;
            redone += 1;
        }

        Ok(redone)
    }

    /// Check if there are commands that can be undone
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if there are commands that can be redone
    pub fn can_redo(&self) -> bool {
        self.cursor < self.log.len()
    }

    /// Get a description of the command that would be undone
    pub fn undo_description(&self) -> Option<String> {
        self.cursor
            .checked_sub(1)
            .and_then(|index| self.log.get(index))
            .map(|action| action.description())
    }

    /// Get a description of the command that would be redone
    pub fn redo_description(&self) -> Option<String> {
        self.log.get(self.cursor).map(|action| action.description())
    }

    /// Clear all command history
    ///
    /// The receiver keeps its current state.
    pub fn clear(&mut self) {
        self.log.clear();
        self.cursor = 0;
    }

    /// Get the number of commands that can be undone
    pub fn undo_count(&self) -> usize {
        self.cursor
    }

    /// Get the number of commands that can be redone
    pub fn redo_count(&self) -> usize {
        self.log.len() - self.cursor
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn max_history(&self) -> Option<NonZeroUsize> {
        self.max_history
    }

    pub fn receiver(&self) -> &R {
        &self.receiver
    }

    /// Give the receiver back, dropping the history
    pub fn into_receiver(self) -> R {
        self.receiver
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            entries: self.log.iter().map(|action| action.description()).collect(),
            cursor: self.cursor,
            len: self.log.len(),
        }
    }

    // Only ever called right after an append, when the cursor sits at the end
    // of the log, so evicting from the front never touches redoable entries.
    fn trim_history(&mut self) {
        let Some(max) = self.max_history else {
            return;
        };

        while self.log.len() > max.get() && self.cursor > 0 {
            self.log.pop_front();
            self.cursor -= 1;
        }
    }
}

impl<R: Receiver + 'static> CommandHistory<R> {
    /// Apply `kind operand` to the receiver and record it
    ///
    /// # Errors
    /// Returns `InvalidOperation` if the receiver refuses the operation or if
    /// the operation could not be undone (multiplying by zero).
    pub fn execute(&mut self, kind: OperationKind, operand: Operand) -> CommandResult<()> {
        let command = ArithmeticCommand::new(kind, operand)?;
        self.execute_action(Box::new(command))
    }

    /// Parse `operator` and execute it
    ///
    /// # Errors
    /// Returns `UnsupportedAction` before touching anything if `operator` is
    /// not a known operation, otherwise the same errors as
    /// [`execute`](Self::execute).
    pub fn compute(&mut self, operator: &str, operand: Operand) -> CommandResult<()> {
        let kind: OperationKind = operator.parse()?;
        self.execute(kind, operand)
    }
}

impl<R: Default> Default for CommandHistory<R> {
    fn default() -> Self {
        Self::new(R::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::state::Calculator;
    use std::sync::{Arc, Mutex};

    // Mock action recording every call into a shared journal
    struct MockCommand {
        value: i32,
        journal: Arc<Mutex<Vec<String>>>,
        fail_revert: bool,
    }

    impl MockCommand {
        fn new(value: i32, journal: &Arc<Mutex<Vec<String>>>) -> Self {
            Self {
                value,
                journal: Arc::clone(journal),
                fail_revert: false,
            }
        }
    }

    impl ReversibleAction<Vec<i32>> for MockCommand {
        fn apply(&self, target: &mut Vec<i32>) -> CommandResult<()> {
            target.push(self.value);
            self.journal.lock().unwrap().push(format!("apply {}", self.value));
            Ok(())
        }

        fn revert(&self, target: &mut Vec<i32>) -> CommandResult<()> {
            if self.fail_revert {
                return Err(CommandError::InvalidOperation("Not revertible".into()));
            }
            target.pop();
            self.journal.lock().unwrap().push(format!("revert {}", self.value));
            Ok(())
        }

        fn description(&self) -> String {
            format!("Push {}", self.value)
        }
    }

    fn journal() -> Arc<Mutex<Vec<String>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    #[test]
    fn test_execute_command() {
        let journal = journal();
        let mut history = CommandHistory::new(Vec::new());

        history
            .execute_action(Box::new(MockCommand::new(42, &journal)))
            .unwrap();

        assert_eq!(history.receiver(), &vec![42]);
        assert_eq!(history.undo_count(), 1);
        assert_eq!(history.redo_count(), 0);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_and_redo_descriptions() {
        let journal = journal();
        let mut history = CommandHistory::new(Vec::new());
        history
            .execute_action(Box::new(MockCommand::new(1, &journal)))
            .unwrap();
        history
            .execute_action(Box::new(MockCommand::new(2, &journal)))
            .unwrap();

        assert_eq!(history.undo_description().as_deref(), Some("Push 2"));
        assert_eq!(history.redo_description(), None);

        history.undo(1).unwrap();
        assert_eq!(history.undo_description().as_deref(), Some("Push 1"));
        assert_eq!(history.redo_description().as_deref(), Some("Push 2"));
    }

    #[test]
    fn test_undo_reverts_in_reverse_order() {
        let journal = journal();
        let mut history = CommandHistory::new(Vec::new());
        for i in 1..=3 {
            history
                .execute_action(Box::new(MockCommand::new(i, &journal)))
                .unwrap();
        }

        assert_eq!(history.undo(2).unwrap(), 2);
        assert_eq!(history.receiver(), &vec![1]);
        assert_eq!(history.redo(5).unwrap(), 2);
        assert_eq!(history.receiver(), &vec![1, 2, 3]);

        let calls = journal.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                "apply 1", "apply 2", "apply 3", "revert 3", "revert 2", "apply 2", "apply 3"
            ]
        );
    }

    #[test]
    fn test_redo_tail_cleared_on_new_command() {
        let journal = journal();
        let mut history = CommandHistory::new(Vec::new());

        // Execute, undo, then execute a new command
        history
            .execute_action(Box::new(MockCommand::new(1, &journal)))
            .unwrap();
        history.undo(1).unwrap();
        history
            .execute_action(Box::new(MockCommand::new(2, &journal)))
            .unwrap();

        // Redo tail should be cleared
        assert!(!history.can_redo());
        assert_eq!(history.redo_count(), 0);
        assert_eq!(history.len(), 1);
        assert_eq!(history.redo(1).unwrap(), 0);
        assert_eq!(history.receiver(), &vec![2]);
    }

    #[test]
    fn test_history_limit() {
        let journal = journal();
        let limit = NonZeroUsize::new(3).unwrap();
        let mut history = CommandHistory::with_max_history(Vec::new(), limit);

        // Execute 5 commands (more than limit)
        for i in 0..5 {
            history
                .execute_action(Box::new(MockCommand::new(i, &journal)))
                .unwrap();
        }

        // Should only keep the last 3
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 3);
        assert_eq!(history.undo(10).unwrap(), 3);
        assert_eq!(history.receiver(), &vec![0, 1]);
    }

    #[test]
    fn test_history_limit_keeps_redo_window_intact() {
        let journal = journal();
        let limit = NonZeroUsize::new(2).unwrap();
        let mut history = CommandHistory::with_max_history(Vec::new(), limit);

        history
            .execute_action(Box::new(MockCommand::new(1, &journal)))
            .unwrap();
        history
            .execute_action(Box::new(MockCommand::new(2, &journal)))
            .unwrap();
        history.undo(1).unwrap();

        assert_eq!(history.snapshot().entries, vec!["Push 1", "Push 2"]);
        assert_eq!(history.redo(1).unwrap(), 1);
        assert_eq!(history.receiver(), &vec![1, 2]);
    }

    #[test]
    fn test_undo_with_empty_history_is_a_no_op() {
        let mut history: CommandHistory<Vec<i32>> = CommandHistory::default();

        assert_eq!(history.undo(3).unwrap(), 0);
        assert_eq!(history.redo(3).unwrap(), 0);
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_failed_revert_keeps_earlier_progress() {
        let journal = journal();
        let mut history = CommandHistory::new(Vec::new());

        let mut stubborn = MockCommand::new(1, &journal);
        stubborn.fail_revert = true;
        history.execute_action(Box::new(stubborn)).unwrap();
        history
            .execute_action(Box::new(MockCommand::new(2, &journal)))
            .unwrap();

        let err = history.undo(2).unwrap_err();
        match err {
            CommandError::ReplayFailure {
                direction, index, ..
            } => {
                assert_eq!(direction, ReplayDirection::Undo);
                assert_eq!(index, 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // "Push 2" was undone before the failure, "Push 1" was not
        assert_eq!(history.cursor(), 1);
        assert_eq!(history.receiver(), &vec![1]);
    }

    #[test]
    fn test_clear_keeps_receiver_state() {
        let mut history = CommandHistory::new(Calculator::new());
        history.execute(OperationKind::Add, 7).unwrap();
        history.undo(1).unwrap();
        history.redo(1).unwrap();

        history.clear();

        assert!(history.is_empty());
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.receiver().value(), 7);
        assert_eq!(history.undo(1).unwrap(), 0);
    }

    #[test]
    fn test_compute_parses_operator() {
        let mut history = CommandHistory::new(Calculator::new());
        history.compute("+", 5).unwrap();
        history.compute("mul", 3).unwrap();
        assert_eq!(history.receiver().value(), 15);

        let err = history.compute("^", 2).unwrap_err();
        assert!(matches!(err, CommandError::UnsupportedAction(_)));
        assert_eq!(history.len(), 2);
        assert_eq!(history.receiver().value(), 15);
    }

    #[test]
    fn test_into_receiver_returns_current_state() {
        let mut history = CommandHistory::new(Calculator::with_value(10));
        history.execute(OperationKind::Multiply, 3).unwrap();
        history.execute(OperationKind::Subtract, 4).unwrap();
        history.undo(1).unwrap();

        assert_eq!(history.into_receiver(), Calculator::with_value(30));
    }

    #[test]
    fn test_snapshot() {
        let mut history = CommandHistory::new(Calculator::new());
        history.execute(OperationKind::Add, 100).unwrap();
        history.execute(OperationKind::Divide, 4).unwrap();
        history.undo(1).unwrap();

        let snapshot = history.snapshot();
        assert_eq!(snapshot.entries, vec!["+ 100", "/ 4"]);
        assert_eq!(snapshot.cursor, 1);
        assert_eq!(snapshot.len, 2);
    }
}
