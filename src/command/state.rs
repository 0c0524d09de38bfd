// Receiver - the mutable state that actions operate on
//
// The receiver knows nothing about history. The engine owns it and lends it
// to one action at a time.

use crate::command::operation::{Operand, OperationKind};
use crate::command::trait_def::CommandResult;
use serde::{Deserialize, Serialize};

/// Something an arithmetic action can be applied to
pub trait Receiver {
    /// Mutate the state with `kind` and `operand`
    ///
    /// # Errors
    /// Returns `InvalidOperation` if the mutation is undefined. The state must
    /// be left exactly as it was in that case.
    fn apply(&mut self, kind: OperationKind, operand: Operand) -> CommandResult<()>;
}

/// Integer accumulator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calculator {
    value: Operand,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calculator starting at `value` instead of zero
    pub fn with_value(value: Operand) -> Self {
        Self { value }
    }

    pub fn value(&self) -> Operand {
        self.value
    }
}

impl Receiver for Calculator {
    fn apply(&mut self, kind: OperationKind, operand: Operand) -> CommandResult<()> {
        // Compute first, store second: a failure never touches `value`
        let next = kind.evaluate(self.value, operand)?;
        self.value = next;

        tracing::info!(
            value = self.value,
            "Current value = {:>3} (following {} {})",
            self.value,
            kind,
            operand
        );

        Ok(())
    }
}
