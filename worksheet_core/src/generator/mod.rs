//! # Problem Generator
//!
//! Produces a set of unique arithmetic problems satisfying a
//! [`WorksheetConfig`]: operands drawn through a usage-balanced sampler,
//! operators fixed or mixed (optionally ratio-controlled), duplicates
//! rejected by signature with a bounded retry.
//!
//! Duplicate exhaustion never hard-fails a run: after
//! [`MAX_DUPLICATE_ATTEMPTS`] retries the duplicate is accepted and counted
//! on the [`GenerationReport`], so callers can surface a warning while the
//! worksheet still renders.
//!
//! The generator is pure apart from its RNG: no I/O, and all balancing
//! state lives inside one `generate` call.
//!
//! ## Example
//!
//! ```rust
//! use worksheet_core::config::{Difficulty, LayoutStyle, OperationType, WorksheetConfig};
//! use worksheet_core::generator::generate_problems;
//! use worksheet_core::problem::Operator;
//!
//! let config = WorksheetConfig::new(
//!     Difficulty::Within10,
//!     OperationType::Addition,
//!     LayoutStyle::TwoColumn,
//!     5,
//! )
//! .unwrap();
//!
//! let problems = generate_problems(&config, None).unwrap();
//! assert_eq!(problems.len(), 5);
//! assert!(problems.iter().all(|p| p.operator() == Operator::Addition));
//! ```

pub mod operations;
pub mod sampler;

use std::collections::HashSet;

use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{NumberRange, OperationType, WorksheetConfig};
use crate::errors::{WorksheetError, WorksheetResult};
use crate::problem::{Operator, Problem};

pub use sampler::UsageSampler;

/// Retries per problem before a duplicate is accepted
pub const MAX_DUPLICATE_ATTEMPTS: u32 = 100;

/// Tolerance when checking that ratio components sum to 1.0
pub const RATIO_TOLERANCE: f64 = 0.01;

/// Target operator mix for ratio-controlled mixed generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperationRatio {
    /// Fraction of problems that should be additions
    pub addition: f64,
    /// Fraction of problems that should be subtractions
    pub subtraction: f64,
}

impl OperationRatio {
    /// Validate that the components are non-negative and sum to 1.0
    /// (within [`RATIO_TOLERANCE`]).
    pub fn validate(&self) -> WorksheetResult<()> {
        if self.addition < 0.0 || self.subtraction < 0.0 {
            return Err(WorksheetError::invalid_input(
                "operation_ratio",
                format!("{}+{}", self.addition, self.subtraction),
                "Ratio components must be non-negative",
            ));
        }
        let sum = self.addition + self.subtraction;
        if (sum - 1.0).abs() > RATIO_TOLERANCE {
            return Err(WorksheetError::invalid_input(
                "operation_ratio",
                sum.to_string(),
                "Ratio components must sum to 1.0",
            ));
        }
        Ok(())
    }
}

/// Outcome of one generation run.
///
/// `duplicates_accepted` is the observable form of duplicate-retry
/// exhaustion: nonzero means some problems repeat an earlier signature.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// The generated problems, in final order
    pub problems: Vec<Problem>,
    /// Problems accepted as duplicates after the retry cap
    pub duplicates_accepted: u32,
}

/// How the operator for the next problem is decided.
#[derive(Debug, Clone, Copy)]
enum OperatorSchedule {
    /// Single-operation modes
    Fixed(Operator),
    /// Mixed mode: uniform coin flip per attempt
    Uniform,
}

/// Problem generator over a caller-supplied RNG.
///
/// Use [`ProblemGenerator::new`] for thread-local randomness or
/// [`ProblemGenerator::with_rng`] with a seeded RNG for deterministic
/// tests.
#[derive(Debug)]
pub struct ProblemGenerator<R: Rng> {
    rng: R,
}

impl ProblemGenerator<ThreadRng> {
    /// Generator backed by the thread-local RNG.
    pub fn new() -> Self {
        ProblemGenerator {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for ProblemGenerator<ThreadRng> {
    fn default() -> Self {
        ProblemGenerator::new()
    }
}

impl<R: Rng> ProblemGenerator<R> {
    /// Generator backed by an explicit RNG.
    pub fn with_rng(rng: R) -> Self {
        ProblemGenerator { rng }
    }

    /// Generate `count.unwrap_or(config.problem_count)` problems.
    pub fn generate(
        &mut self,
        config: &WorksheetConfig,
        count: Option<u32>,
    ) -> WorksheetResult<Vec<Problem>> {
        self.generate_report(config, count).map(|r| r.problems)
    }

    /// Generate problems and report duplicate fallbacks.
    pub fn generate_report(
        &mut self,
        config: &WorksheetConfig,
        count: Option<u32>,
    ) -> WorksheetResult<GenerationReport> {
        config.validate()?;
        let count = resolve_count(config, count)?;
        let range = config.difficulty.range();

        let schedule = match config.operation_type {
            OperationType::Addition => OperatorSchedule::Fixed(Operator::Addition),
            OperationType::Subtraction => OperatorSchedule::Fixed(Operator::Subtraction),
            OperationType::Mixed => OperatorSchedule::Uniform,
        };

        let mut sampler = UsageSampler::new();
        let mut seen = HashSet::new();
        let mut problems = Vec::with_capacity(count as usize);
        let mut duplicates_accepted = 0;

        for _ in 0..count {
            let (problem, duplicate) =
                self.next_problem(schedule, range, &mut sampler, &mut seen)?;
            if duplicate {
                duplicates_accepted += 1;
            }
            problems.push(problem);
        }

        Ok(GenerationReport {
            problems,
            duplicates_accepted,
        })
    }

    /// Ratio-controlled mixed generation.
    ///
    /// Each problem's operator is greedily assigned to whichever type is
    /// proportionally furthest behind its target, then the finished list is
    /// shuffled so ordering does not reveal the schedule.
    pub fn generate_with_ratio(
        &mut self,
        config: &WorksheetConfig,
        ratio: OperationRatio,
    ) -> WorksheetResult<GenerationReport> {
        config.validate()?;
        ratio.validate()?;
        let count = config.problem_count;
        let range = config.difficulty.range();

        let mut sampler = UsageSampler::new();
        let mut seen = HashSet::new();
        let mut problems = Vec::with_capacity(count as usize);
        let mut duplicates_accepted = 0;
        let mut addition_count = 0u32;
        let mut subtraction_count = 0u32;

        for i in 0..count {
            let placed = f64::from(i + 1);
            let addition_deficit = ratio.addition * placed - f64::from(addition_count);
            let subtraction_deficit = ratio.subtraction * placed - f64::from(subtraction_count);
            let operator = if addition_deficit >= subtraction_deficit {
                Operator::Addition
            } else {
                Operator::Subtraction
            };

            let (problem, duplicate) = self.next_problem(
                OperatorSchedule::Fixed(operator),
                range,
                &mut sampler,
                &mut seen,
            )?;
            match operator {
                Operator::Addition => addition_count += 1,
                Operator::Subtraction => subtraction_count += 1,
            }
            if duplicate {
                duplicates_accepted += 1;
            }
            problems.push(problem);
        }

        // Fisher-Yates, so the output order does not expose the schedule
        problems.shuffle(&mut self.rng);

        Ok(GenerationReport {
            problems,
            duplicates_accepted,
        })
    }

    /// Produce one problem, retrying duplicates up to the cap.
    ///
    /// Returns the problem and whether it was accepted as a duplicate.
    fn next_problem(
        &mut self,
        schedule: OperatorSchedule,
        range: NumberRange,
        sampler: &mut UsageSampler,
        seen: &mut HashSet<String>,
    ) -> WorksheetResult<(Problem, bool)> {
        let mut attempts = 0;
        loop {
            let operator = match schedule {
                OperatorSchedule::Fixed(op) => op,
                OperatorSchedule::Uniform => {
                    let candidates = operations::operators_for(OperationType::Mixed);
                    candidates[self.rng.gen_range(0..candidates.len())]
                }
            };
            let op = operations::lookup(operator)?;

            let operand1 = sampler.draw(&mut self.rng, range);
            let operand2 = sampler.draw(&mut self.rng, range);
            let (operand1, operand2) = op.normalize(operand1, operand2);

            let problem = Problem::new(operand1, operand2, operator)?;
            if seen.insert(problem.signature()) {
                return Ok((problem, false));
            }

            attempts += 1;
            if attempts >= MAX_DUPLICATE_ATTEMPTS {
                // Retry budget exhausted: accept the duplicate rather than
                // failing the whole run
                return Ok((problem, true));
            }
        }
    }
}

/// Resolve and bounds-check the effective problem count.
fn resolve_count(config: &WorksheetConfig, count: Option<u32>) -> WorksheetResult<u32> {
    let count = count.unwrap_or(config.problem_count);
    if count == 0 {
        return Err(WorksheetError::invalid_input(
            "count",
            "0",
            "At least one problem must be requested",
        ));
    }
    Ok(count)
}

/// Generate problems with thread-local randomness.
///
/// Convenience wrapper over [`ProblemGenerator`] matching the core
/// contract: `generate(config, count?) -> Problem[]`.
pub fn generate_problems(
    config: &WorksheetConfig,
    count: Option<u32>,
) -> WorksheetResult<Vec<Problem>> {
    ProblemGenerator::new().generate(config, count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigUpdate, Difficulty, LayoutStyle};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(difficulty: Difficulty, operation_type: OperationType, count: u32) -> WorksheetConfig {
        WorksheetConfig::new(difficulty, operation_type, LayoutStyle::TwoColumn, count).unwrap()
    }

    fn seeded() -> ProblemGenerator<StdRng> {
        ProblemGenerator::with_rng(StdRng::seed_from_u64(20260830))
    }

    #[test]
    fn test_addition_within_10() {
        let config = config(Difficulty::Within10, OperationType::Addition, 5);
        let problems = seeded().generate(&config, None).unwrap();

        assert_eq!(problems.len(), 5);
        for p in &problems {
            assert_eq!(p.operator(), Operator::Addition);
            assert!((1..=10).contains(&p.operand1()));
            assert!((1..=10).contains(&p.operand2()));
            assert_eq!(p.result(), p.operand1() + p.operand2());
        }
    }

    #[test]
    fn test_subtraction_never_negative() {
        let config = config(Difficulty::Within20, OperationType::Subtraction, 5);
        let problems = seeded().generate(&config, None).unwrap();

        assert_eq!(problems.len(), 5);
        for p in &problems {
            assert_eq!(p.operator(), Operator::Subtraction);
            assert!(p.operand1() >= p.operand2());
            assert_eq!(p.result(), p.operand1() - p.operand2());
        }
    }

    #[test]
    fn test_mixed_mode_emits_valid_operators() {
        let config = config(Difficulty::Within20, OperationType::Mixed, 30);
        let problems = seeded().generate(&config, None).unwrap();
        for p in &problems {
            match p.operator() {
                Operator::Addition => assert_eq!(p.result(), p.operand1() + p.operand2()),
                Operator::Subtraction => {
                    assert!(p.operand1() >= p.operand2());
                    assert_eq!(p.result(), p.operand1() - p.operand2());
                }
            }
        }
    }

    #[test]
    fn test_uniqueness_well_below_combinatorial_max() {
        // 10 problems against 10,000 possible within100 additions:
        // duplicates should never survive the retry budget
        let config = config(Difficulty::Within100, OperationType::Addition, 10);
        let report = seeded().generate_report(&config, None).unwrap();

        let signatures: HashSet<String> =
            report.problems.iter().map(|p| p.signature()).collect();
        assert_eq!(signatures.len(), 10);
        assert_eq!(report.duplicates_accepted, 0);
    }

    #[test]
    fn test_count_override() {
        let config = config(Difficulty::Within10, OperationType::Addition, 20);
        let problems = seeded().generate(&config, Some(3)).unwrap();
        assert_eq!(problems.len(), 3);
    }

    #[test]
    fn test_zero_count_rejected() {
        let config = config(Difficulty::Within10, OperationType::Addition, 20);
        assert!(seeded().generate(&config, Some(0)).is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = config(Difficulty::Within10, OperationType::Addition, 20);
        config.problem_count = 0;
        assert!(seeded().generate(&config, None).is_err());
    }

    #[test]
    fn test_exhaustion_accepts_duplicates() {
        // within10 subtraction has 55 distinct facts; asking for 50 from a
        // feasible pool must succeed, and an infeasible override (60) must
        // still return 60 problems with duplicates counted
        let config = config(Difficulty::Within10, OperationType::Subtraction, 50);
        let report = seeded().generate_report(&config, Some(60)).unwrap();
        assert_eq!(report.problems.len(), 60);
        assert!(report.duplicates_accepted >= 5);
    }

    #[test]
    fn test_ratio_validation() {
        let bad = OperationRatio {
            addition: 0.7,
            subtraction: 0.7,
        };
        assert!(bad.validate().is_err());

        let within_tolerance = OperationRatio {
            addition: 0.7,
            subtraction: 0.295,
        };
        assert!(within_tolerance.validate().is_ok());

        let negative = OperationRatio {
            addition: 1.5,
            subtraction: -0.5,
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_ratio_controlled_mix() {
        let config = config(Difficulty::Within50, OperationType::Mixed, 20);
        let ratio = OperationRatio {
            addition: 0.75,
            subtraction: 0.25,
        };
        let report = seeded().generate_with_ratio(&config, ratio).unwrap();

        let additions = report
            .problems
            .iter()
            .filter(|p| p.operator() == Operator::Addition)
            .count();
        // Greedy scheduling hits the target exactly for 20 * 0.75
        assert_eq!(additions, 15);
        assert_eq!(report.problems.len(), 20);
    }

    #[test]
    fn test_range_invariant_all_difficulties() {
        for difficulty in [
            Difficulty::Within10,
            Difficulty::Within20,
            Difficulty::Within50,
            Difficulty::Within100,
        ] {
            let config = config(difficulty, OperationType::Mixed, 20);
            let range = difficulty.range();
            let problems = seeded().generate(&config, None).unwrap();
            for p in problems {
                assert!(p.operand1() >= range.min && p.operand1() <= range.max);
                assert!(p.operand2() >= range.min && p.operand2() <= range.max);
            }
        }
    }

    #[test]
    fn test_feasibility_is_not_enforced_by_generator() {
        // The feasibility check is a caller-side rule; the generator still
        // delivers the requested count
        let config = config(Difficulty::Within10, OperationType::Addition, 50);
        let updated = config
            .with(ConfigUpdate {
                problem_count: Some(50),
                ..ConfigUpdate::default()
            })
            .unwrap();
        assert!(updated.is_feasible());
        let problems = seeded().generate(&updated, None).unwrap();
        assert_eq!(problems.len(), 50);
    }
}
