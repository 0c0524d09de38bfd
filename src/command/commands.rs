// Concrete command implementations

use crate::command::operation::{Operand, OperationKind};
use crate::command::state::Receiver;
use crate::command::trait_def::{CommandError, CommandResult, ReversibleAction};

/// Command applying one arithmetic operation to a receiver
///
/// The forward effect is `kind operand`, the inverse effect is
/// `kind.invert() operand`. No receiver state is captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArithmeticCommand {
    kind: OperationKind,
    operand: Operand,
}

impl ArithmeticCommand {
    /// Create a new ArithmeticCommand
    ///
    /// # Errors
    /// Multiplying by zero is rejected with `InvalidOperation`: its inverse
    /// would be a division by zero.
    pub fn new(kind: OperationKind, operand: Operand) -> CommandResult<Self> {
        if kind == OperationKind::Multiply && operand == 0 {
            return Err(CommandError::InvalidOperation(
                "Multiplying by zero cannot be undone".into(),
            ));
        }

        Ok(Self { kind, operand })
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn operand(&self) -> Operand {
        self.operand
    }
}

impl<R: Receiver> ReversibleAction<R> for ArithmeticCommand {
    fn apply(&self, receiver: &mut R) -> CommandResult<()> {
        receiver.apply(self.kind, self.operand)
    }

    fn revert(&self, receiver: &mut R) -> CommandResult<()> {
        receiver.apply(self.kind.invert(), self.operand)
    }

    fn description(&self) -> String {
        format!("{} {}", self.kind, self.operand)
    }
}
