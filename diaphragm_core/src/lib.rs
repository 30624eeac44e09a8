//! # diaphragm_core - Rigid Diaphragm Shear Distribution Engine
//!
//! `diaphragm_core` distributes the seismic base shear of one building level
//! to its shear walls, assuming a rigid floor diaphragm. From wall geometry it
//! derives relative rigidities, the centers of mass and rigidity, the polar
//! moment of inertia, and the direct plus torsional shear of every wall.
//! All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types naming the offending walls
//! - **All or Nothing**: A failed stage aborts the run; no partial results
//!
//! ## Quick Start
//!
//! ```rust
//! use diaphragm_core::{analyze, AnalysisSettings, BuildingInput, WallRow};
//!
//! let row = |id: &str, x_m: f64, y_m: f64| WallRow {
//!     id: id.to_string(),
//!     length_m: 5.0,
//!     height_m: 3.0,
//!     x_m,
//!     y_m,
//! };
//! let input = BuildingInput::new(
//!     "Level 1",
//!     vec![row("N1", 0.0, 4.0), row("N2", 12.0, 4.0)],
//!     vec![row("E1", 6.0, 0.0), row("E2", 6.0, 8.0)],
//! );
//!
//! let result = analyze(&input, &AnalysisSettings::default()).unwrap();
//! println!("CoR at {}", result.center_of_rigidity());
//! ```
//!
//! ## Modules
//!
//! - [`walls`] - Wall records and ordered wall sets
//! - [`calculations`] - Rigidity, centroids, torsion, distribution, analysis
//! - [`project`] - Project container, metadata, and analysis settings
//! - [`errors`] - Structured error types
//! - [`file_io`] - Project/building loading and atomic saves
//! - [`report`] - Plain-text result summaries

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod project;
pub mod report;
pub mod walls;

// Re-export commonly used types at crate root for convenience
pub use calculations::{analyze, analyze_envelope, AnalysisResult, BuildingInput, EnvelopeResult};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_building, load_input, load_project, save_project, InputDocument};
pub use project::{AnalysisSettings, Project, ProjectMetadata};
pub use walls::{DirectionGroup, Wall, WallRow, WallSet};
