//! # Arithmetic Operation Registry
//!
//! Central registry of the arithmetic operations the generator can emit.
//! Each entry pairs an [`Operator`] with its generation behavior: how to
//! normalize a drawn operand pair and how to compute the result.
//!
//! The registry is the extension seam for new operations. An operation
//! type whose operators are absent from the registry surfaces as
//! [`WorksheetError::UnsupportedOperation`] instead of producing problems
//! silently.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::config::OperationType;
use crate::errors::{WorksheetError, WorksheetResult};
use crate::problem::Operator;

/// Generation behavior for one arithmetic operation.
#[derive(Debug, Clone, Copy)]
pub struct ArithmeticOp {
    /// The operator this entry describes
    pub operator: Operator,
    /// Human-readable name, used in error messages
    pub display_name: &'static str,
    /// Whether operand order matters for the result
    pub commutative: bool,
}

impl ArithmeticOp {
    /// Normalize a drawn operand pair before constructing the problem.
    ///
    /// Subtraction swaps the operands when the first is smaller, so the
    /// result never goes negative. This is a silent normalization, not a
    /// rejection.
    pub fn normalize(&self, operand1: u32, operand2: u32) -> (u32, u32) {
        match self.operator {
            Operator::Subtraction if operand1 < operand2 => (operand2, operand1),
            _ => (operand1, operand2),
        }
    }
}

/// Registry of supported operations, keyed by operator.
static REGISTRY: Lazy<HashMap<Operator, ArithmeticOp>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert(
        Operator::Addition,
        ArithmeticOp {
            operator: Operator::Addition,
            display_name: "addition",
            commutative: true,
        },
    );
    map.insert(
        Operator::Subtraction,
        ArithmeticOp {
            operator: Operator::Subtraction,
            display_name: "subtraction",
            commutative: false,
        },
    );
    map
});

/// Look up the generation behavior for an operator.
///
/// Fails with [`WorksheetError::UnsupportedOperation`] when the operator
/// has no registry entry.
pub fn lookup(operator: Operator) -> WorksheetResult<&'static ArithmeticOp> {
    REGISTRY
        .get(&operator)
        .ok_or_else(|| WorksheetError::unsupported_operation(operator.symbol().to_string()))
}

/// The operators an operation type may emit, in a fixed order.
pub fn operators_for(operation_type: OperationType) -> &'static [Operator] {
    match operation_type {
        OperationType::Addition => &[Operator::Addition],
        OperationType::Subtraction => &[Operator::Subtraction],
        OperationType::Mixed => &[Operator::Addition, Operator::Subtraction],
    }
}
