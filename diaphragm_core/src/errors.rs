//! # Error Types
//!
//! Structured error types for diaphragm_core. Every failure is detected by
//! local validation before the offending value is used in arithmetic, so a
//! caller never sees NaN or infinity leak out of an analysis. Variants that
//! concern specific walls carry their ids.
//!
//! ## Example
//!
//! ```rust
//! use diaphragm_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(wall_id: &str, length_m: f64) -> CalcResult<()> {
//!     if length_m <= 0.0 {
//!         return Err(CalcError::invalid_geometry(
//!             wall_id,
//!             "length_m",
//!             length_m,
//!             "Wall length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! let err = validate_length("W1", 0.0).unwrap_err();
//! assert_eq!(err.error_code(), "INVALID_GEOMETRY");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for diaphragm_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for analysis operations.
///
/// Any stage failure aborts the whole analysis; no partial per-wall results
/// are produced alongside an error.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A wall has a non-positive or non-finite dimension or coordinate
    #[error("Invalid geometry for wall '{wall_id}': {field} = {value} - {reason}")]
    InvalidGeometry {
        wall_id: String,
        field: String,
        value: String,
        reason: String,
    },

    /// The deflection coefficient of a wall is zero, so its rigidity is undefined
    #[error("Degenerate wall '{wall_id}': deflection coefficient is {delta}")]
    DegenerateWall { wall_id: String, delta: f64 },

    /// A reduction was asked to run over no walls at all
    #[error("Empty input: no walls supplied for {context}")]
    EmptyInput { context: String },

    /// The total weight of a centroid calculation is zero
    #[error("Undefined centroid: total {weighting} is zero along {axis}")]
    UndefinedCentroid {
        weighting: String,
        axis: String,
        wall_ids: Vec<String>,
    },

    /// The polar moment of inertia about the center of rigidity is zero
    #[error("Degenerate layout: polar moment of inertia is zero (walls: {})", .wall_ids.join(", "))]
    DegenerateLayout { wall_ids: Vec<String> },

    /// An upstream degenerate condition reached the torsion stage
    #[error("Torsion undefined: {reason} (walls: {})", .wall_ids.join(", "))]
    TorsionUndefined {
        reason: String,
        wall_ids: Vec<String>,
    },

    /// An input value is invalid (out of range, mismatched lengths, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidGeometry error
    pub fn invalid_geometry(
        wall_id: impl Into<String>,
        field: impl Into<String>,
        value: f64,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidGeometry {
            wall_id: wall_id.into(),
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a DegenerateWall error
    pub fn degenerate_wall(wall_id: impl Into<String>, delta: f64) -> Self {
        CalcError::DegenerateWall {
            wall_id: wall_id.into(),
            delta,
        }
    }

    /// Create an EmptyInput error
    pub fn empty_input(context: impl Into<String>) -> Self {
        CalcError::EmptyInput {
            context: context.into(),
        }
    }

    /// Create an UndefinedCentroid error
    pub fn undefined_centroid(
        weighting: impl Into<String>,
        axis: impl Into<String>,
        wall_ids: Vec<String>,
    ) -> Self {
        CalcError::UndefinedCentroid {
            weighting: weighting.into(),
            axis: axis.into(),
            wall_ids,
        }
    }

    /// Create a DegenerateLayout error
    pub fn degenerate_layout(wall_ids: Vec<String>) -> Self {
        CalcError::DegenerateLayout { wall_ids }
    }

    /// Create a TorsionUndefined error
    pub fn torsion_undefined(reason: impl Into<String>, wall_ids: Vec<String>) -> Self {
        CalcError::TorsionUndefined {
            reason: reason.into(),
            wall_ids,
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Ids of the walls that caused this error, if any
    pub fn wall_ids(&self) -> Vec<&str> {
        match self {
            CalcError::InvalidGeometry { wall_id, .. } | CalcError::DegenerateWall { wall_id, .. } => {
                vec![wall_id.as_str()]
            }
            CalcError::UndefinedCentroid { wall_ids, .. }
            | CalcError::DegenerateLayout { wall_ids }
            | CalcError::TorsionUndefined { wall_ids, .. } => {
                wall_ids.iter().map(String::as_str).collect()
            }
            _ => Vec::new(),
        }
    }

    /// True for errors caused by the wall data itself rather than by files or settings
    pub fn is_geometry_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidGeometry { .. }
                | CalcError::DegenerateWall { .. }
                | CalcError::EmptyInput { .. }
                | CalcError::UndefinedCentroid { .. }
                | CalcError::DegenerateLayout { .. }
                | CalcError::TorsionUndefined { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            CalcError::DegenerateWall { .. } => "DEGENERATE_WALL",
            CalcError::EmptyInput { .. } => "EMPTY_INPUT",
            CalcError::UndefinedCentroid { .. } => "UNDEFINED_CENTROID",
            CalcError::DegenerateLayout { .. } => "DEGENERATE_LAYOUT",
            CalcError::TorsionUndefined { .. } => "TORSION_UNDEFINED",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
