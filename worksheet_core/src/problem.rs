//! # Problem Model
//!
//! An immutable arithmetic fact: `operand1 operator operand2 = result`.
//!
//! Problems validate their own arithmetic at construction and cannot be
//! mutated afterward - fields are private, deserialization revalidates.
//! They are created by the generator and consumed read-only by the layout
//! engine and rendering collaborators.
//!
//! ## Invariants
//!
//! - `result == operand1 operator operand2`
//! - For subtraction, `operand1 >= operand2` (the result is never negative)
//!
//! ## Example
//!
//! ```rust
//! use worksheet_core::problem::{Operator, Problem};
//!
//! let problem = Problem::new(7, 5, Operator::Addition).unwrap();
//! assert_eq!(problem.result(), 12);
//! assert_eq!(problem.signature(), "7+5");
//!
//! // Construction re-validates a supplied result
//! assert!(Problem::from_parts(5, 3, Operator::Addition, 9).is_err());
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{WorksheetError, WorksheetResult};

/// Arithmetic operator for a problem.
///
/// Exhaustive by design: adding a new operation is a compile-time concern,
/// not a runtime string lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Addition (`+`)
    #[serde(rename = "+")]
    Addition,
    /// Subtraction (`-`), operands ordered so the result stays non-negative
    #[serde(rename = "-")]
    Subtraction,
}

impl Operator {
    /// The display symbol for this operator.
    pub fn symbol(&self) -> char {
        match self {
            Operator::Addition => '+',
            Operator::Subtraction => '-',
        }
    }

    /// Apply the operator to two operands.
    ///
    /// Returns `None` when the operation is undefined for the inputs
    /// (subtraction that would go negative).
    pub fn apply(&self, operand1: u32, operand2: u32) -> Option<u32> {
        match self {
            Operator::Addition => operand1.checked_add(operand2),
            Operator::Subtraction => operand1.checked_sub(operand2),
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One arithmetic practice problem.
///
/// Immutable after construction. Fields are private so the arithmetic
/// invariant cannot be broken; deserialization goes through [`ProblemParts`]
/// and revalidates.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "9f1c8a3e-0000-4000-8000-000000000000",
///   "operand1": 7,
///   "operand2": 5,
///   "operator": "+",
///   "result": 12
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProblemParts", into = "ProblemParts")]
pub struct Problem {
    id: Uuid,
    operand1: u32,
    operand2: u32,
    operator: Operator,
    result: u32,
}

/// Plain serialized form of a [`Problem`], used to revalidate on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemParts {
    pub id: Uuid,
    pub operand1: u32,
    pub operand2: u32,
    pub operator: Operator,
    pub result: u32,
}

impl TryFrom<ProblemParts> for Problem {
    type Error = WorksheetError;

    fn try_from(parts: ProblemParts) -> WorksheetResult<Self> {
        let mut problem =
            Problem::from_parts(parts.operand1, parts.operand2, parts.operator, parts.result)?;
        problem.id = parts.id;
        Ok(problem)
    }
}

impl From<Problem> for ProblemParts {
    fn from(p: Problem) -> Self {
        ProblemParts {
            id: p.id,
            operand1: p.operand1,
            operand2: p.operand2,
            operator: p.operator,
            result: p.result,
        }
    }
}

impl Problem {
    /// Create a problem, computing the result from the operands.
    ///
    /// Fails with [`WorksheetError::InvalidProblem`] if the operation is
    /// undefined for the operands (subtraction with `operand1 < operand2`).
    pub fn new(operand1: u32, operand2: u32, operator: Operator) -> WorksheetResult<Self> {
        let result = operator.apply(operand1, operand2).ok_or_else(|| {
            WorksheetError::invalid_problem(
                format!("{} {} {}", operand1, operator.symbol(), operand2),
                "Operation is undefined for these operands (negative result)",
            )
        })?;

        Ok(Problem {
            id: Uuid::new_v4(),
            operand1,
            operand2,
            operator,
            result,
        })
    }

    /// Create a problem from all four parts, validating the supplied result.
    ///
    /// Fails with [`WorksheetError::InvalidProblem`] if `result` does not
    /// equal `operand1 operator operand2`.
    pub fn from_parts(
        operand1: u32,
        operand2: u32,
        operator: Operator,
        result: u32,
    ) -> WorksheetResult<Self> {
        let problem = Problem::new(operand1, operand2, operator)?;
        if problem.result != result {
            return Err(WorksheetError::invalid_problem(
                format!(
                    "{} {} {} = {}",
                    operand1,
                    operator.symbol(),
                    operand2,
                    result
                ),
                format!("Result should be {}", problem.result),
            ));
        }
        Ok(problem)
    }

    /// Unique identifier for this problem.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// First operand.
    pub fn operand1(&self) -> u32 {
        self.operand1
    }

    /// Second operand.
    pub fn operand2(&self) -> u32 {
        self.operand2
    }

    /// The operator.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// The (validated) result.
    pub fn result(&self) -> u32 {
        self.result
    }

    /// Duplicate-detection key: `operand1‖operator‖operand2`.
    ///
    /// Two problems with the same signature are the same fact, regardless
    /// of their ids.
    pub fn signature(&self) -> String {
        format!("{}{}{}", self.operand1, self.operator.symbol(), self.operand2)
    }

    /// Render the problem as worksheet text.
    ///
    /// With `show_answer` the result is filled in (`"7 + 5 = 12"`),
    /// otherwise the answer slot is left blank (`"7 + 5 ="`).
    pub fn expression(&self, show_answer: bool) -> String {
        if show_answer {
            format!(
                "{} {} {} = {}",
                self.operand1,
                self.operator.symbol(),
                self.operand2,
                self.result
            )
        } else {
            format!(
                "{} {} {} =",
                self.operand1,
                self.operator.symbol(),
                self.operand2
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addition_problem() {
        let problem = Problem::new(7, 5, Operator::Addition).unwrap();
        assert_eq!(problem.operand1(), 7);
        assert_eq!(problem.operand2(), 5);
        assert_eq!(problem.result(), 12);
        assert_eq!(problem.operator(), Operator::Addition);
    }

    #[test]
    fn test_subtraction_problem() {
        let problem = Problem::new(9, 4, Operator::Subtraction).unwrap();
        assert_eq!(problem.result(), 5);
    }

    #[test]
    fn test_negative_subtraction_rejected() {
        let err = Problem::new(3, 9, Operator::Subtraction).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PROBLEM");
    }

    #[test]
    fn test_wrong_result_rejected() {
        // 5 + 3 = 9 must fail validation
        let err = Problem::from_parts(5, 3, Operator::Addition, 9).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PROBLEM");
        assert!(Problem::from_parts(5, 3, Operator::Addition, 8).is_ok());
    }

    #[test]
    fn test_signature() {
        let a = Problem::new(7, 5, Operator::Addition).unwrap();
        let b = Problem::new(7, 5, Operator::Addition).unwrap();
        assert_eq!(a.signature(), "7+5");
        // Same fact, same signature, distinct ids
        assert_eq!(a.signature(), b.signature());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_expression_rendering() {
        let problem = Problem::new(12, 8, Operator::Subtraction).unwrap();
        assert_eq!(problem.expression(false), "12 - 8 =");
        assert_eq!(problem.expression(true), "12 - 8 = 4");
    }

    #[test]
    fn test_serde_roundtrip() {
        let problem = Problem::new(15, 6, Operator::Addition).unwrap();
        let json = serde_json::to_string(&problem).unwrap();
        assert!(json.contains("\"+\""));
        let roundtrip: Problem = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, problem);
    }

    #[test]
    fn test_deserialization_revalidates() {
        let json = r#"{
            "id": "9f1c8a3e-0000-4000-8000-000000000000",
            "operand1": 5,
            "operand2": 3,
            "operator": "+",
            "result": 9
        }"#;
        assert!(serde_json::from_str::<Problem>(json).is_err());
    }
}
