// OperationKind - the closed set of arithmetic operations

use crate::command::trait_def::{CommandError, CommandResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operand type shared by every arithmetic operation
pub type Operand = i64;

/// Arithmetic operation understood by a [`Receiver`](crate::command::state::Receiver)
///
/// Every kind has exactly one inverse, see [`OperationKind::invert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl OperationKind {
    pub const ALL: [OperationKind; 4] = [
        OperationKind::Add,
        OperationKind::Subtract,
        OperationKind::Multiply,
        OperationKind::Divide,
    ];

    /// The operation that undoes this one
    pub fn invert(self) -> Self {
        match self {
            OperationKind::Add => OperationKind::Subtract,
            OperationKind::Subtract => OperationKind::Add,
            OperationKind::Multiply => OperationKind::Divide,
            OperationKind::Divide => OperationKind::Multiply,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            OperationKind::Add => '+',
            OperationKind::Subtract => '-',
            OperationKind::Multiply => '*',
            OperationKind::Divide => '/',
        }
    }

    /// Compute `value <op> operand`
    ///
    /// Pure function: the caller decides whether to store the result.
    ///
    /// # Errors
    /// Returns `InvalidOperation` for division by zero, for a division that
    /// leaves a remainder and for any overflow.
    pub fn evaluate(self, value: Operand, operand: Operand) -> CommandResult<Operand> {
        let result = match self {
            OperationKind::Add => value.checked_add(operand),
            OperationKind::Subtract => value.checked_sub(operand),
            OperationKind::Multiply => value.checked_mul(operand),
            OperationKind::Divide => {
                if operand == 0 {
                    return Err(CommandError::InvalidOperation("Division by zero".into()));
                }
                if value.checked_rem(operand).is_some_and(|rem| rem != 0) {
                    return Err(CommandError::InvalidOperation(format!(
                        "{} is not divisible by {}",
                        value, operand
                    )));
                }
                value.checked_div(operand)
            }
        };

        result.ok_or_else(|| {
            CommandError::InvalidOperation(format!(
                "{} {} {} overflows",
                value,
                self.symbol(),
                operand
            ))
        })
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<char> for OperationKind {
    type Error = CommandError;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        match symbol {
            '+' => Ok(OperationKind::Add),
            '-' => Ok(OperationKind::Subtract),
            '*' | 'x' => Ok(OperationKind::Multiply),
            '/' => Ok(OperationKind::Divide),
            other => Err(CommandError::UnsupportedAction(format!(
                "unknown operator '{}'",
                other
            ))),
        }
    }
}

impl FromStr for OperationKind {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let mut chars = token.chars();
        if let (Some(symbol), None) = (chars.next(), chars.next()) {
            return OperationKind::try_from(symbol);
        }

        match token.to_ascii_lowercase().as_str() {
            "add" | "plus" => Ok(OperationKind::Add),
            "sub" | "subtract" | "minus" => Ok(OperationKind::Subtract),
            "mul" | "multiply" | "times" => Ok(OperationKind::Multiply),
            "div" | "divide" => Ok(OperationKind::Divide),
            _ => Err(CommandError::UnsupportedAction(format!(
                "unknown operator '{}'",
                token
            ))),
        }
    }
}
