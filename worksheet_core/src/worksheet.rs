//! # Worksheet Document
//!
//! The `Worksheet` struct is the root container tying a configuration to
//! its generated problems. Worksheets serialize to human-readable JSON
//! for the persistence collaborator.
//!
//! ## Structure
//!
//! ```text
//! Worksheet
//! ├── meta: WorksheetMetadata (version, id, timestamps)
//! ├── config: WorksheetConfig (validated settings)
//! └── problems: Vec<Problem> (generated facts)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use worksheet_core::config::WorksheetConfig;
//! use worksheet_core::worksheet::Worksheet;
//!
//! let worksheet = Worksheet::generate(WorksheetConfig::default()).unwrap();
//! assert_eq!(worksheet.problems.len(), 20);
//!
//! let json = serde_json::to_string_pretty(&worksheet).unwrap();
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::WorksheetConfig;
use crate::errors::WorksheetResult;
use crate::generator::{GenerationReport, ProblemGenerator};
use crate::layout::{calculate_layout_at, LayoutResult, RenderResolution};
use crate::problem::Problem;

/// Current schema version for worksheet files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Metadata stored in the worksheet file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorksheetMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Stable identifier for this worksheet
    pub id: Uuid,

    /// When the worksheet was created
    pub created: DateTime<Utc>,

    /// When the worksheet was last modified
    pub modified: DateTime<Utc>,
}

/// Root worksheet container: configuration plus generated problems.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worksheet {
    /// Metadata (version, id, timestamps)
    pub meta: WorksheetMetadata,

    /// The settings this worksheet was generated from
    pub config: WorksheetConfig,

    /// The generated problems, in page order
    pub problems: Vec<Problem>,
}

impl Worksheet {
    /// Assemble a worksheet from an already-generated problem list.
    ///
    /// The configuration is validated; the problems are taken as-is (each
    /// Problem validated itself at construction).
    pub fn new(config: WorksheetConfig, problems: Vec<Problem>) -> WorksheetResult<Self> {
        config.validate()?;
        let now = Utc::now();
        Ok(Worksheet {
            meta: WorksheetMetadata {
                version: SCHEMA_VERSION.to_string(),
                id: Uuid::new_v4(),
                created: now,
                modified: now,
            },
            config,
            problems,
        })
    }

    /// Generate a fresh worksheet for a configuration.
    pub fn generate(config: WorksheetConfig) -> WorksheetResult<Self> {
        Self::generate_report(config).map(|(worksheet, _)| worksheet)
    }

    /// Generate a worksheet and surface the generation report
    /// (duplicate-fallback count) alongside it.
    pub fn generate_report(config: WorksheetConfig) -> WorksheetResult<(Self, GenerationReport)> {
        let report = ProblemGenerator::new().generate_report(&config, None)?;
        let worksheet = Worksheet::new(config, report.problems.clone())?;
        Ok((worksheet, report))
    }

    /// Lay this worksheet out at the given resolution.
    ///
    /// Preview for the interactive page, Export for the high-resolution
    /// image pipeline - the same algorithm runs at export dimensions, the
    /// preview coordinates are never scaled after the fact.
    pub fn layout(&self, resolution: RenderResolution) -> WorksheetResult<LayoutResult> {
        calculate_layout_at(&self.problems, &self.config, resolution)
    }

    /// Replace the problems with a newly generated set.
    pub fn regenerate(&mut self) -> WorksheetResult<GenerationReport> {
        let report = ProblemGenerator::new().generate_report(&self.config, None)?;
        self.problems = report.problems.clone();
        self.touch();
        Ok(report)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}
