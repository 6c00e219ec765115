//! # Worksheet Configuration
//!
//! Validated settings for one worksheet: difficulty, operation type, page
//! layout, background, problem count, paper format.
//!
//! Every enum maps to a fixed lookup table of derived parameters through a
//! match expression, so an unknown variant is a compile-time concern, not a
//! runtime string lookup. The configuration is validated at construction
//! and updates are copy-on-update: [`WorksheetConfig::with`] builds a new
//! revalidated instance and never mutates in place.
//!
//! ## Example
//!
//! ```rust
//! use worksheet_core::config::{ConfigUpdate, Difficulty, OperationType, WorksheetConfig};
//!
//! let config = WorksheetConfig::default();
//! assert_eq!(config.difficulty.range().max, 10);
//!
//! // Copy-on-update: the original stays valid and untouched
//! let harder = config
//!     .with(ConfigUpdate {
//!         difficulty: Some(Difficulty::Within100),
//!         operation_type: Some(OperationType::Mixed),
//!         ..ConfigUpdate::default()
//!     })
//!     .unwrap();
//! assert_eq!(harder.difficulty.range().max, 100);
//! assert_eq!(config.difficulty.range().max, 10);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{WorksheetError, WorksheetResult};

/// Minimum problems per worksheet
pub const MIN_PROBLEM_COUNT: u32 = 1;

/// Maximum problems per worksheet
pub const MAX_PROBLEM_COUNT: u32 = 50;

/// Named operand range constraining generated problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Difficulty {
    /// Operands in [1, 10]
    Within10,
    /// Operands in [1, 20]
    Within20,
    /// Operands in [1, 50]
    Within50,
    /// Operands in [1, 100]
    Within100,
}

/// Inclusive operand range derived from a [`Difficulty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberRange {
    pub min: u32,
    pub max: u32,
}

impl NumberRange {
    /// Number of distinct values in the range.
    pub fn span(&self) -> u32 {
        self.max - self.min + 1
    }
}

impl Difficulty {
    /// Derived operand range for this difficulty.
    pub fn range(&self) -> NumberRange {
        match self {
            Difficulty::Within10 => NumberRange { min: 1, max: 10 },
            Difficulty::Within20 => NumberRange { min: 1, max: 20 },
            Difficulty::Within50 => NumberRange { min: 1, max: 50 },
            Difficulty::Within100 => NumberRange { min: 1, max: 100 },
        }
    }
}

/// Which operators the generator may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationType {
    /// Addition only
    Addition,
    /// Subtraction only
    Subtraction,
    /// Both, chosen per problem
    Mixed,
}

/// Named column-count template for the page grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutStyle {
    TwoColumn,
    ThreeColumn,
}

/// Derived grid parameters for a [`LayoutStyle`].
///
/// Spacing values are preview-resolution pixels; the layout engine scales
/// them to the target resolution (see [`crate::layout::page`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    /// Number of columns in the grid
    pub columns: usize,
    /// Nominal problems per page for this template
    pub problems_per_page: u32,
    /// Base spacing between columns (preview px)
    pub horizontal_spacing: f64,
    /// Base spacing between rows (preview px)
    pub vertical_spacing: f64,
}

impl LayoutStyle {
    /// Fixed grid parameters for this template.
    pub fn params(&self) -> LayoutParams {
        match self {
            LayoutStyle::TwoColumn => LayoutParams {
                columns: 2,
                problems_per_page: 20,
                horizontal_spacing: 40.0,
                vertical_spacing: 30.0,
            },
            LayoutStyle::ThreeColumn => LayoutParams {
                columns: 3,
                problems_per_page: 24,
                horizontal_spacing: 30.0,
                vertical_spacing: 25.0,
            },
        }
    }
}

/// Page background painted behind the problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BackgroundStyle {
    Blank,
    Lined,
    Grid,
    Dotted,
    /// User-supplied image; requires `custom_background_url`
    Custom,
}

/// Physical paper format. Only A4 is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperFormat {
    A4,
}

/// Validated worksheet settings.
///
/// ## JSON Example
///
/// ```json
/// {
///   "difficulty": "within20",
///   "operation_type": "mixed",
///   "layout": "two-column",
///   "background_style": "lined",
///   "problem_count": 20,
///   "paper_format": "a4",
///   "custom_background_url": null,
///   "show_answers": false,
///   "title": "Math Practice"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorksheetConfig {
    /// Operand range for generated problems
    pub difficulty: Difficulty,

    /// Addition, subtraction, or mixed
    pub operation_type: OperationType,

    /// Column template for the page grid
    pub layout: LayoutStyle,

    /// Background painted behind the problems
    pub background_style: BackgroundStyle,

    /// Number of problems to generate, in [1, 50]
    pub problem_count: u32,

    /// Physical paper format
    pub paper_format: PaperFormat,

    /// Image URL, required when `background_style` is `Custom`
    pub custom_background_url: Option<String>,

    /// Render results next to the problems (answer-key mode)
    pub show_answers: bool,

    /// Worksheet title printed at the top of the page
    pub title: String,
}

/// Optional overrides for [`WorksheetConfig::with`].
///
/// `None` fields keep the current value. The merged configuration is
/// revalidated as a whole before it is returned.
#[derive(Debug, Clone, Default)]
pub struct ConfigUpdate {
    pub difficulty: Option<Difficulty>,
    pub operation_type: Option<OperationType>,
    pub layout: Option<LayoutStyle>,
    pub background_style: Option<BackgroundStyle>,
    pub problem_count: Option<u32>,
    pub paper_format: Option<PaperFormat>,
    pub custom_background_url: Option<Option<String>>,
    pub show_answers: Option<bool>,
    pub title: Option<String>,
}

impl Default for WorksheetConfig {
    fn default() -> Self {
        WorksheetConfig {
            difficulty: Difficulty::Within10,
            operation_type: OperationType::Addition,
            layout: LayoutStyle::TwoColumn,
            background_style: BackgroundStyle::Blank,
            problem_count: 20,
            paper_format: PaperFormat::A4,
            custom_background_url: None,
            show_answers: false,
            title: "Math Practice".to_string(),
        }
    }
}

impl WorksheetConfig {
    /// Create a configuration, validating it immediately.
    pub fn new(
        difficulty: Difficulty,
        operation_type: OperationType,
        layout: LayoutStyle,
        problem_count: u32,
    ) -> WorksheetResult<Self> {
        let config = WorksheetConfig {
            difficulty,
            operation_type,
            layout,
            problem_count,
            ..WorksheetConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration invariants.
    pub fn validate(&self) -> WorksheetResult<()> {
        if self.problem_count < MIN_PROBLEM_COUNT || self.problem_count > MAX_PROBLEM_COUNT {
            return Err(WorksheetError::invalid_input(
                "problem_count",
                self.problem_count.to_string(),
                format!(
                    "Problem count must be between {} and {}",
                    MIN_PROBLEM_COUNT, MAX_PROBLEM_COUNT
                ),
            ));
        }

        if self.background_style == BackgroundStyle::Custom {
            match &self.custom_background_url {
                Some(url) if !url.trim().is_empty() => {}
                _ => {
                    return Err(WorksheetError::missing_field("custom_background_url"));
                }
            }
        }

        Ok(())
    }

    /// Build a new configuration from this one plus overrides.
    ///
    /// Copy-on-update: `self` is never mutated, and the merged result is
    /// revalidated before it is returned.
    pub fn with(&self, update: ConfigUpdate) -> WorksheetResult<WorksheetConfig> {
        let config = WorksheetConfig {
            difficulty: update.difficulty.unwrap_or(self.difficulty),
            operation_type: update.operation_type.unwrap_or(self.operation_type),
            layout: update.layout.unwrap_or(self.layout),
            background_style: update.background_style.unwrap_or(self.background_style),
            problem_count: update.problem_count.unwrap_or(self.problem_count),
            paper_format: update.paper_format.unwrap_or(self.paper_format),
            custom_background_url: update
                .custom_background_url
                .unwrap_or_else(|| self.custom_background_url.clone()),
            show_answers: update.show_answers.unwrap_or(self.show_answers),
            title: update.title.unwrap_or_else(|| self.title.clone()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Maximum number of distinct problems this configuration can produce.
    ///
    /// Addition: `range²` ordered pairs. Subtraction: `range·(range+1)/2`
    /// pairs with `operand1 >= operand2`. Mixed: the sum (signatures
    /// include the operator, so the pools are disjoint).
    pub fn max_distinct_problems(&self) -> u64 {
        let range = self.difficulty.range().span() as u64;
        let addition = range * range;
        let subtraction = range * (range + 1) / 2;
        match self.operation_type {
            OperationType::Addition => addition,
            OperationType::Subtraction => subtraction,
            OperationType::Mixed => addition + subtraction,
        }
    }

    /// Caller-side feasibility check: can `problem_count` distinct problems
    /// exist at all?
    ///
    /// This is a soft business rule - the generator itself never enforces
    /// it, it falls back to accepting duplicates after its bounded retries.
    pub fn is_feasible(&self) -> bool {
        u64::from(self.problem_count) <= self.max_distinct_problems()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(WorksheetConfig::default().validate().is_ok());
    }

    #[test]
    fn test_difficulty_ranges() {
        assert_eq!(Difficulty::Within10.range(), NumberRange { min: 1, max: 10 });
        assert_eq!(Difficulty::Within100.range().span(), 100);
    }

    #[test]
    fn test_layout_params() {
        assert_eq!(LayoutStyle::TwoColumn.params().columns, 2);
        assert_eq!(LayoutStyle::ThreeColumn.params().columns, 3);
    }

    #[test]
    fn test_problem_count_bounds() {
        let mut config = WorksheetConfig::default();
        config.problem_count = 0;
        assert_eq!(config.validate().unwrap_err().error_code(), "INVALID_INPUT");
        config.problem_count = 51;
        assert!(config.validate().is_err());
        config.problem_count = 50;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_background_requires_url() {
        let config = WorksheetConfig::default();
        let err = config
            .with(ConfigUpdate {
                background_style: Some(BackgroundStyle::Custom),
                ..ConfigUpdate::default()
            })
            .unwrap_err();
        assert_eq!(err.error_code(), "MISSING_FIELD");

        let ok = config.with(ConfigUpdate {
            background_style: Some(BackgroundStyle::Custom),
            custom_background_url: Some(Some("https://example.com/bg.png".to_string())),
            ..ConfigUpdate::default()
        });
        assert!(ok.is_ok());
    }

    #[test]
    fn test_copy_on_update_leaves_original() {
        let config = WorksheetConfig::default();
        let updated = config
            .with(ConfigUpdate {
                problem_count: Some(12),
                ..ConfigUpdate::default()
            })
            .unwrap();
        assert_eq!(updated.problem_count, 12);
        assert_eq!(config.problem_count, 20);
    }

    #[test]
    fn test_max_distinct_problems() {
        let config =
            WorksheetConfig::new(Difficulty::Within10, OperationType::Addition, LayoutStyle::TwoColumn, 10)
                .unwrap();
        assert_eq!(config.max_distinct_problems(), 100);

        let sub = config
            .with(ConfigUpdate {
                operation_type: Some(OperationType::Subtraction),
                ..ConfigUpdate::default()
            })
            .unwrap();
        assert_eq!(sub.max_distinct_problems(), 55);

        let mixed = config
            .with(ConfigUpdate {
                operation_type: Some(OperationType::Mixed),
                ..ConfigUpdate::default()
            })
            .unwrap();
        assert_eq!(mixed.max_distinct_problems(), 155);
    }

    #[test]
    fn test_feasibility() {
        let config =
            WorksheetConfig::new(Difficulty::Within10, OperationType::Addition, LayoutStyle::TwoColumn, 50)
                .unwrap();
        // 50 <= 100 distinct additions
        assert!(config.is_feasible());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = WorksheetConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        assert!(json.contains("within10"));
        assert!(json.contains("two-column"));
        assert!(json.contains("a4"));
        let roundtrip: WorksheetConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, config);
    }
}
