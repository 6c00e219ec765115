//! # worksheet_core - Math Worksheet Engine
//!
//! `worksheet_core` generates printable arithmetic practice worksheets:
//! unique, well-distributed addition/subtraction problems placed into a
//! multi-column grid on a fixed A4 page, at preview or high-resolution
//! export scale.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions of their inputs (the generator's RNG
//!   and per-run usage counters are the only moving parts, and they live
//!   inside one call)
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Validated at the boundary**: Problems and configurations check
//!   their own invariants at construction; a layout that fails validation
//!   never reaches the caller
//!
//! ## Quick Start
//!
//! ```rust
//! use worksheet_core::config::WorksheetConfig;
//! use worksheet_core::generator::generate_problems;
//! use worksheet_core::layout::calculate_layout;
//!
//! let config = WorksheetConfig::default();
//!
//! // Configuration -> problems -> positioned page layout
//! let problems = generate_problems(&config, None).unwrap();
//! let layout = calculate_layout(&problems, &config).unwrap();
//!
//! assert_eq!(layout.positioned_problems.len(), problems.len());
//! ```
//!
//! The UI layer, rendering engine, and image exporter are collaborators
//! outside this crate: rendering implements [`render::RenderSurface`],
//! export re-invokes the layout at
//! [`layout::RenderResolution::Export`], and repeated invocations (e.g.
//! per configuration keystroke) should be debounced by the caller.
//!
//! ## Modules
//!
//! - [`problem`] - Immutable validated arithmetic facts
//! - [`config`] - Validated settings with copy-on-update
//! - [`generator`] - Usage-balanced, duplicate-avoiding problem generation
//! - [`layout`] - Deterministic page layout with optimization passes
//! - [`render`] - Collaborator traits for drawing surfaces
//! - [`worksheet`] - Document container (config + problems + metadata)
//! - [`file_io`] - Atomic JSON persistence
//! - [`errors`] - Structured error types

pub mod config;
pub mod errors;
pub mod file_io;
pub mod generator;
pub mod layout;
pub mod problem;
pub mod render;
pub mod worksheet;

// Re-export commonly used types at crate root for convenience
pub use config::{ConfigUpdate, WorksheetConfig};
pub use errors::{WorksheetError, WorksheetResult};
pub use generator::{generate_problems, GenerationReport, ProblemGenerator};
pub use layout::{calculate_layout, calculate_layout_at, LayoutResult, PositionedProblem};
pub use problem::{Operator, Problem};
pub use worksheet::Worksheet;
