//! # Relative Rigidity
//!
//! Relative rigidity of a shear wall from its aspect ratio, treating the wall
//! as a fixed-base cantilever with flexural and shear deflection:
//!
//! ```text
//! Δ = 4(h/L)³ + 3(h/L)
//! R = 1/Δ
//! ```
//!
//! The result is dimensionless and only meaningful relative to other walls
//! of the same material and thickness.
//!
//! ## Example
//!
//! ```rust
//! use diaphragm_core::calculations::rigidity::relative_rigidity;
//!
//! // Square wall: Δ = 4 + 3 = 7
//! let r = relative_rigidity(3.0, 3.0).unwrap();
//! assert!((r - 1.0 / 7.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::walls::{Wall, WallSet};

/// Rigidity model used to weight walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RigidityModel {
    /// Cantilever deflection Δ = 4(h/L)³ + 3(h/L), R = 1/Δ
    #[default]
    Cantilever,
    /// Simplified stiffness R = L/h, reproduces older spreadsheet outputs
    LengthOverHeight,
}

impl RigidityModel {
    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            RigidityModel::Cantilever => "Cantilever (1 / (4(h/L)^3 + 3(h/L)))",
            RigidityModel::LengthOverHeight => "Simplified (L/h)",
        }
    }

    /// Rigidity of one wall under this model.
    ///
    /// Both models validate the whole wall record, coordinates included.
    pub fn rigidity(&self, wall: &Wall) -> CalcResult<f64> {
        match self {
            RigidityModel::Cantilever => wall_rigidity(wall),
            RigidityModel::LengthOverHeight => {
                wall.validate()?;
                let r = wall.length_m / wall.height_m;
                if !r.is_finite() || r == 0.0 {
                    return Err(CalcError::degenerate_wall(&wall.id, wall.height_m / wall.length_m));
                }
                Ok(r)
            }
        }
    }
}

/// Deflection coefficient Δ = 4(h/L)³ + 3(h/L).
///
/// Caller must ensure `length > 0`.
fn deflection_coefficient(height: f64, length: f64) -> f64 {
    let ratio = height / length;
    4.0 * ratio.powi(3) + 3.0 * ratio
}

/// Relative rigidity R = 1/Δ for a wall of the given height and length.
///
/// Pure and deterministic: identical inputs give bit-identical output.
///
/// # Errors
///
/// * `InvalidGeometry` - length or height is not positive and finite
/// * `DegenerateWall` - the deflection coefficient evaluates to zero or overflows
pub fn relative_rigidity(height: f64, length: f64) -> CalcResult<f64> {
    rigidity_for("<unnamed>", height, length)
}

/// Relative rigidity of a wall record, errors carry the wall id.
///
/// The full record is validated first, so a non-finite coordinate fails here
/// rather than in a later stage.
pub fn wall_rigidity(wall: &Wall) -> CalcResult<f64> {
    wall.validate()?;
    rigidity_for(&wall.id, wall.height_m, wall.length_m)
}

fn rigidity_for(wall_id: &str, height: f64, length: f64) -> CalcResult<f64> {
    if !length.is_finite() || length <= 0.0 {
        return Err(CalcError::invalid_geometry(
            wall_id,
            "length_m",
            length,
            "Wall length must be positive and finite",
        ));
    }
    if !height.is_finite() || height <= 0.0 {
        return Err(CalcError::invalid_geometry(
            wall_id,
            "height_m",
            height,
            "Wall height must be positive and finite",
        ));
    }

    let delta = deflection_coefficient(height, length);
    if delta == 0.0 || !delta.is_finite() {
        return Err(CalcError::degenerate_wall(wall_id, delta));
    }
    Ok(1.0 / delta)
}

/// Rigidity of every wall in the set, in input order.
///
/// Aborts on the first invalid wall.
pub fn wall_rigidities(walls: &WallSet, model: RigidityModel) -> CalcResult<Vec<f64>> {
    walls.walls().iter().map(|w| model.rigidity(w)).collect()
}
