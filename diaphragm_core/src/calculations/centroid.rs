//! # Center of Mass and Center of Rigidity
//!
//! Both centroids are weighted averages of wall positions and share one
//! reduction:
//!
//! ```text
//! x̄ = Σ(wᵢ·xᵢ) / Σwᵢ        ȳ = Σ(wᵢ·yᵢ) / Σwᵢ
//! ```
//!
//! - Center of mass: wᵢ = Lᵢ·hᵢ (wall elevation area)
//! - Center of rigidity: wᵢ = Rᵢ (relative rigidity)
//!
//! A zero total weight is reported as [`CalcError::UndefinedCentroid`], never
//! collapsed to the origin.
//!
//! For a whole building, x comes from the NS walls (they resist loads along y,
//! so their x positions set the lever arm) and y comes from the EW walls.
//!
//! ## Example
//!
//! ```rust
//! use diaphragm_core::calculations::centroid::center_of_rigidity;
//! use diaphragm_core::walls::{DirectionGroup, Wall};
//!
//! let walls = vec![
//!     Wall::new("A", 4.0, 3.0, 0.0, 0.0, DirectionGroup::NorthSouth),
//!     Wall::new("B", 4.0, 3.0, 10.0, 0.0, DirectionGroup::NorthSouth),
//! ];
//! let cor = center_of_rigidity(&walls, &[1.0, 1.0]).unwrap();
//! assert_eq!(cor.x_m, 5.0);
//! ```

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::walls::{DirectionGroup, Wall, WallSet};

/// A plan point in metres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Centroid {
    pub x_m: f64,
    pub y_m: f64,
}

impl Centroid {
    /// Create a centroid from coordinates.
    pub fn new(x_m: f64, y_m: f64) -> Self {
        Centroid { x_m, y_m }
    }

    /// The same point shifted by (dx, dy)
    pub fn translated(&self, dx_m: f64, dy_m: f64) -> Centroid {
        Centroid::new(self.x_m + dx_m, self.y_m + dy_m)
    }

    /// Straight-line distance to another point
    pub fn distance_to(&self, other: &Centroid) -> f64 {
        (self.x_m - other.x_m).hypot(self.y_m - other.y_m)
    }
}

impl std::fmt::Display for Centroid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x_m, self.y_m)
    }
}

/// How the center of rigidity normalizes each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RigidityCenterMode {
    /// Each axis divides by the rigidity sum of all contributing walls
    #[default]
    Symmetric,
    /// Reproduces older spreadsheet outputs: the x sum is divided by the
    /// rigidity of walls with y ≠ 0 and the y sum by walls with x ≠ 0
    Legacy,
}

pub(crate) fn as_wall<W: Borrow<Wall>>(wall: &W) -> &Wall {
    wall.borrow()
}

pub(crate) fn wall_ids<W: Borrow<Wall>>(walls: &[W]) -> Vec<String> {
    walls.iter().map(|w| as_wall(w).id.clone()).collect()
}

/// Area-weighted center of mass.
///
/// # Errors
///
/// * `EmptyInput` - no walls
/// * `InvalidGeometry` - a wall fails validation
/// * `UndefinedCentroid` - total area is zero, or a weighted sum overflows
pub fn center_of_mass<W: Borrow<Wall>>(walls: &[W]) -> CalcResult<Centroid> {
    if walls.is_empty() {
        return Err(CalcError::empty_input("center of mass"));
    }
    for wall in walls {
        as_wall(wall).validate()?;
    }

    let (total_area, weighted_x, weighted_y) = walls.iter().map(as_wall).fold(
        (0.0, 0.0, 0.0),
        |(area, wx, wy), wall: &Wall| {
            let a = wall.area_m2();
            (area + a, wx + a * wall.x_m, wy + a * wall.y_m)
        },
    );

    if total_area == 0.0 {
        return Err(CalcError::undefined_centroid("area", "x and y", wall_ids(walls)));
    }
    Ok(Centroid::new(
        weighted_coordinate("area", "x", weighted_x, total_area, walls)?,
        weighted_coordinate("area", "y", weighted_y, total_area, walls)?,
    ))
}

/// `weighted / total`, rejecting a zero total and any non-finite operand or quotient.
fn weighted_coordinate<W: Borrow<Wall>>(
    weighting: &str,
    axis: &str,
    weighted: f64,
    total: f64,
    walls: &[W],
) -> CalcResult<f64> {
    let value = weighted / total;
    if total == 0.0 || !weighted.is_finite() || !total.is_finite() || !value.is_finite() {
        return Err(CalcError::undefined_centroid(weighting, axis, wall_ids(walls)));
    }
    Ok(value)
}

/// Rigidity-weighted center of rigidity (symmetric form).
///
/// `CoR_x = Σ(Rᵢ·xᵢ)/ΣRᵢ`, `CoR_y = Σ(Rᵢ·yᵢ)/ΣRᵢ`. Walls sitting on an axis
/// still count in that axis' rigidity sum.
pub fn center_of_rigidity<W: Borrow<Wall>>(walls: &[W], rigidities: &[f64]) -> CalcResult<Centroid> {
    center_of_rigidity_with_mode(walls, rigidities, RigidityCenterMode::Symmetric)
}

/// Center of rigidity with an explicit normalization mode.
///
/// # Errors
///
/// * `EmptyInput` - no walls
/// * `InvalidInput` - `rigidities` does not match `walls`, or holds a
///   negative or non-finite value
/// * `UndefinedCentroid` - the rigidity sum used for an axis is zero, or a
///   weighted sum overflows
pub fn center_of_rigidity_with_mode<W: Borrow<Wall>>(
    walls: &[W],
    rigidities: &[f64],
    mode: RigidityCenterMode,
) -> CalcResult<Centroid> {
    if walls.is_empty() {
        return Err(CalcError::empty_input("center of rigidity"));
    }
    check_rigidities(walls, rigidities)?;

    let mut weighted_x = 0.0;
    let mut weighted_y = 0.0;
    let mut total = 0.0;
    // Legacy denominators: rigidity of walls off the x axis / off the y axis
    let mut total_off_x = 0.0;
    let mut total_off_y = 0.0;

    for (wall, &r) in walls.iter().map(as_wall).zip(rigidities) {
        weighted_x += r * wall.x_m;
        weighted_y += r * wall.y_m;
        total += r;
        if wall.x_m != 0.0 {
            total_off_x += r;
        }
        if wall.y_m != 0.0 {
            total_off_y += r;
        }
    }

    let (denominator_x, denominator_y) = match mode {
        RigidityCenterMode::Symmetric => (total, total),
        RigidityCenterMode::Legacy => (total_off_y, total_off_x),
    };

    Ok(Centroid::new(
        weighted_coordinate("rigidity", "x", weighted_x, denominator_x, walls)?,
        weighted_coordinate("rigidity", "y", weighted_y, denominator_y, walls)?,
    ))
}

/// Reject rigidity lists that do not line up with the walls or hold unusable values.
pub(crate) fn check_rigidities<W: Borrow<Wall>>(walls: &[W], rigidities: &[f64]) -> CalcResult<()> {
    if walls.len() != rigidities.len() {
        return Err(CalcError::invalid_input(
            "rigidities",
            format!("{} values for {} walls", rigidities.len(), walls.len()),
            "One rigidity is required per wall",
        ));
    }
    for (wall, &r) in walls.iter().map(as_wall).zip(rigidities) {
        if !r.is_finite() || r < 0.0 {
            return Err(CalcError::invalid_input(
                format!("rigidities[{}]", wall.id),
                r.to_string(),
                "Rigidity must be finite and non-negative",
            ));
        }
    }
    Ok(())
}

/// Walls and rigidities of one group, in input order.
pub(crate) fn group_slice<'a>(
    walls: &'a WallSet,
    rigidities: &[f64],
    group: DirectionGroup,
) -> (Vec<&'a Wall>, Vec<f64>) {
    walls
        .walls()
        .iter()
        .zip(rigidities)
        .filter(|(w, _)| w.group == group)
        .map(|(w, &r)| (w, r))
        .unzip()
}

fn require_group<'a>(walls: &'a WallSet, group: DirectionGroup) -> CalcResult<Vec<&'a Wall>> {
    let members = walls.group(group);
    if members.is_empty() {
        return Err(CalcError::empty_input(format!("{} walls", group.display_name())));
    }
    Ok(members)
}

/// Building center of mass: x from the NS walls, y from the EW walls.
pub fn building_center_of_mass(walls: &WallSet) -> CalcResult<Centroid> {
    let ns = require_group(walls, DirectionGroup::NorthSouth)?;
    let ew = require_group(walls, DirectionGroup::EastWest)?;
    Ok(Centroid::new(center_of_mass(&ns)?.x_m, center_of_mass(&ew)?.y_m))
}

/// Building center of rigidity: x from the NS walls, y from the EW walls.
pub fn building_center_of_rigidity(
    walls: &WallSet,
    rigidities: &[f64],
    mode: RigidityCenterMode,
) -> CalcResult<Centroid> {
    check_rigidities(walls.walls(), rigidities)?;
    require_group(walls, DirectionGroup::NorthSouth)?;
    require_group(walls, DirectionGroup::EastWest)?;

    let (ns, r_ns) = group_slice(walls, rigidities, DirectionGroup::NorthSouth);
    let (ew, r_ew) = group_slice(walls, rigidities, DirectionGroup::EastWest);
    let x_m = center_of_rigidity_with_mode(&ns, &r_ns, mode)?.x_m;
    let y_m = center_of_rigidity_with_mode(&ew, &r_ew, mode)?.y_m;
    Ok(Centroid::new(x_m, y_m))
}
