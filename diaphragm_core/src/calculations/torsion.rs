//! # Torsion
//!
//! Polar moment of inertia of the wall layout about the center of rigidity and
//! the torsional shear each wall picks up when the diaphragm rotates.
//!
//! ## Formulas
//!
//! ```text
//! x̄ᵢ = xᵢ − CoR_x          ȳᵢ = yᵢ − CoR_y
//! Jp  = Σ Rᵢ·(x̄ᵢ² + ȳᵢ²)
//!
//! e_x = (CoM_x − CoR_x) ± ratio·D        (ratio = 0.10 by default)
//! e_y = (CoM_y − CoR_y) ± ratio·D        (D = longest plan dimension)
//!
//! Txᵢ = e_y·Rᵢ·x̄ᵢ / Jp
//! Tyᵢ = e_x·Rᵢ·ȳᵢ / Jp
//! ```
//!
//! Rotation about the vertical axis loads each wall perpendicular to its lever
//! arm: the x offset drives `tx` (carried by NS walls) and the y offset drives
//! `ty` (carried by EW walls). The two terms pair each offset with the
//! eccentricity of the other axis.
//!
//! ## Example
//!
//! ```rust
//! use diaphragm_core::calculations::centroid::{center_of_rigidity, Centroid};
//! use diaphragm_core::calculations::torsion::{polar_moment_of_inertia, torsional_effects};
//! use diaphragm_core::walls::{DirectionGroup, Wall};
//!
//! let walls = vec![
//!     Wall::new("A", 4.0, 3.0, 0.0, 0.0, DirectionGroup::NorthSouth),
//!     Wall::new("B", 4.0, 3.0, 10.0, 0.0, DirectionGroup::NorthSouth),
//! ];
//! let rigidities = [1.0, 1.0];
//! let cor = center_of_rigidity(&walls, &rigidities).unwrap();
//! let jp = polar_moment_of_inertia(&walls, &rigidities, cor).unwrap();
//! assert_eq!(jp, 50.0);
//!
//! let com = Centroid::new(6.0, 1.0);
//! let effects = torsional_effects(&walls, &rigidities, com, cor, 20.0, jp).unwrap();
//! assert!(effects[0].tx < 0.0 && effects[1].tx > 0.0);
//! ```

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::centroid::{as_wall, group_slice, wall_ids, Centroid};
use crate::errors::{CalcError, CalcResult};
use crate::walls::{DirectionGroup, Wall, WallSet};

/// Fraction of the longest plan dimension used as accidental eccentricity
pub const DEFAULT_ACCIDENTAL_RATIO: f64 = 0.10;

/// Sign applied to the accidental eccentricity.
///
/// Codes require both signs to be checked; a single pass uses one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccidentalSign {
    /// Accidental offset added to the real eccentricity
    #[default]
    Positive,
    /// Accidental offset subtracted from the real eccentricity
    Negative,
}

impl AccidentalSign {
    /// Both passes of an envelope, positive first
    pub const BOTH: [AccidentalSign; 2] = [AccidentalSign::Positive, AccidentalSign::Negative];

    /// +1.0 or −1.0
    pub fn factor(&self) -> f64 {
        match self {
            AccidentalSign::Positive => 1.0,
            AccidentalSign::Negative => -1.0,
        }
    }

    /// "+" or "−" for reports
    pub fn symbol(&self) -> &'static str {
        match self {
            AccidentalSign::Positive => "+",
            AccidentalSign::Negative => "-",
        }
    }
}

/// Accidental eccentricity settings for one torsion pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TorsionParams {
    /// Fraction of the longest plan dimension (typically 0.05 to 0.10)
    pub accidental_ratio: f64,
    /// Sign of the accidental term
    pub sign: AccidentalSign,
}

impl Default for TorsionParams {
    fn default() -> Self {
        TorsionParams {
            accidental_ratio: DEFAULT_ACCIDENTAL_RATIO,
            sign: AccidentalSign::Positive,
        }
    }
}

impl TorsionParams {
    /// Validate the accidental ratio.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.accidental_ratio.is_finite() || self.accidental_ratio < 0.0 {
            return Err(CalcError::invalid_input(
                "accidental_ratio",
                self.accidental_ratio.to_string(),
                "Accidental eccentricity ratio must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

/// Real plus accidental eccentricity of the center of mass from the center of rigidity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Eccentricity {
    /// CoM_x − CoR_x (m)
    pub real_x_m: f64,
    /// CoM_y − CoR_y (m)
    pub real_y_m: f64,
    /// Magnitude of the accidental offset, ratio × longest dimension (m)
    pub accidental_m: f64,
    /// Sign the accidental offset is applied with
    pub sign: AccidentalSign,
}

impl Eccentricity {
    /// Eccentricity between two centroids for a given longest plan dimension.
    pub fn new(com: Centroid, cor: Centroid, longest_dimension_m: f64, params: &TorsionParams) -> Self {
        Eccentricity {
            real_x_m: com.x_m - cor.x_m,
            real_y_m: com.y_m - cor.y_m,
            accidental_m: params.accidental_ratio * longest_dimension_m,
            sign: params.sign,
        }
    }

    /// Design eccentricity along x
    pub fn e_x(&self) -> f64 {
        self.real_x_m + self.sign.factor() * self.accidental_m
    }

    /// Design eccentricity along y
    pub fn e_y(&self) -> f64 {
        self.real_y_m + self.sign.factor() * self.accidental_m
    }
}

/// Torsional shear fractions for one wall.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TorsionalShear {
    /// e_y·R·x̄ / Jp, carried by NS walls
    pub tx: f64,
    /// e_x·R·ȳ / Jp, carried by EW walls
    pub ty: f64,
}

impl TorsionalShear {
    /// The component a wall of the given group resists
    pub fn for_group(&self, group: DirectionGroup) -> f64 {
        match group {
            DirectionGroup::NorthSouth => self.tx,
            DirectionGroup::EastWest => self.ty,
        }
    }
}

/// Torsional properties of one analysis run, shared read-only by the distribution stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TorsionalState {
    pub center_of_mass: Centroid,
    pub center_of_rigidity: Centroid,
    /// Eccentricity applied to NS walls (accidental from the NS longest dimension)
    pub eccentricity_ns: Eccentricity,
    /// Eccentricity applied to EW walls (accidental from the EW longest dimension)
    pub eccentricity_ew: Eccentricity,
    /// Jp of all walls about the center of rigidity
    pub polar_moment: f64,
    /// Contribution of the NS walls to `polar_moment`
    pub polar_moment_ns: f64,
    /// Contribution of the EW walls to `polar_moment`
    pub polar_moment_ew: f64,
}

impl TorsionalState {
    /// Eccentricity used for walls of a group
    pub fn eccentricity(&self, group: DirectionGroup) -> &Eccentricity {
        match group {
            DirectionGroup::NorthSouth => &self.eccentricity_ns,
            DirectionGroup::EastWest => &self.eccentricity_ew,
        }
    }
}

/// Rigidities must be finite before any torsion arithmetic.
fn check_torsion_rigidities<W: Borrow<Wall>>(walls: &[W], rigidities: &[f64]) -> CalcResult<()> {
    if walls.len() != rigidities.len() {
        return Err(CalcError::invalid_input(
            "rigidities",
            format!("{} values for {} walls", rigidities.len(), walls.len()),
            "One rigidity is required per wall",
        ));
    }
    let bad: Vec<String> = walls
        .iter()
        .map(as_wall)
        .zip(rigidities)
        .filter(|(_, r)| !r.is_finite() || **r < 0.0)
        .map(|(w, _)| w.id.clone())
        .collect();
    if !bad.is_empty() {
        return Err(CalcError::torsion_undefined("rigidity is negative or not finite", bad));
    }
    Ok(())
}

fn polar_sum<W: Borrow<Wall>>(walls: &[W], rigidities: &[f64], cor: Centroid) -> f64 {
    walls
        .iter()
        .map(as_wall)
        .zip(rigidities)
        .map(|(w, r)| {
            let x_bar = w.x_m - cor.x_m;
            let y_bar = w.y_m - cor.y_m;
            r * (x_bar * x_bar + y_bar * y_bar)
        })
        .sum()
}

/// Polar moment of inertia Jp = Σ Rᵢ·(x̄ᵢ² + ȳᵢ²) about `cor`.
///
/// # Errors
///
/// * `EmptyInput` - no walls
/// * `TorsionUndefined` - a rigidity is not finite, or the sum overflows
/// * `DegenerateLayout` - Jp is zero (every wall sits on `cor`)
pub fn polar_moment_of_inertia<W: Borrow<Wall>>(
    walls: &[W],
    rigidities: &[f64],
    cor: Centroid,
) -> CalcResult<f64> {
    if walls.is_empty() {
        return Err(CalcError::empty_input("polar moment of inertia"));
    }
    check_torsion_rigidities(walls, rigidities)?;

    let jp = polar_sum(walls, rigidities, cor);
    if !jp.is_finite() {
        return Err(CalcError::torsion_undefined(
            "polar moment of inertia is not finite",
            wall_ids(walls),
        ));
    }
    if jp == 0.0 {
        return Err(CalcError::degenerate_layout(wall_ids(walls)));
    }
    Ok(jp)
}

/// Torsional shear per wall with the default accidental ratio and positive sign.
pub fn torsional_effects<W: Borrow<Wall>>(
    walls: &[W],
    rigidities: &[f64],
    com: Centroid,
    cor: Centroid,
    longest_dimension_m: f64,
    jp: f64,
) -> CalcResult<Vec<TorsionalShear>> {
    torsional_effects_with(walls, rigidities, com, cor, longest_dimension_m, jp, &TorsionParams::default())
}

/// Torsional shear per wall, in input order.
///
/// All or nothing: a zero or non-finite `jp`, a non-finite rigidity, centroid
/// or eccentricity aborts the pass with `TorsionUndefined` before any value is
/// produced.
pub fn torsional_effects_with<W: Borrow<Wall>>(
    walls: &[W],
    rigidities: &[f64],
    com: Centroid,
    cor: Centroid,
    longest_dimension_m: f64,
    jp: f64,
    params: &TorsionParams,
) -> CalcResult<Vec<TorsionalShear>> {
    params.validate()?;
    if !longest_dimension_m.is_finite() || longest_dimension_m < 0.0 {
        return Err(CalcError::invalid_input(
            "longest_dimension_m",
            longest_dimension_m.to_string(),
            "Longest plan dimension must be finite and non-negative",
        ));
    }
    check_torsion_rigidities(walls, rigidities)?;
    if !jp.is_finite() || jp == 0.0 {
        return Err(CalcError::torsion_undefined(
            format!("polar moment of inertia is {}", jp),
            wall_ids(walls),
        ));
    }

    for (name, c) in [("center of mass", com), ("center of rigidity", cor)] {
        if !c.x_m.is_finite() || !c.y_m.is_finite() {
            return Err(CalcError::torsion_undefined(format!("{} is {}", name, c), wall_ids(walls)));
        }
    }

    let ecc = Eccentricity::new(com, cor, longest_dimension_m, params);
    let (e_x, e_y) = (ecc.e_x(), ecc.e_y());
    if !e_x.is_finite() || !e_y.is_finite() {
        return Err(CalcError::torsion_undefined(
            format!("eccentricity ({}, {}) is not finite", e_x, e_y),
            wall_ids(walls),
        ));
    }

    Ok(walls
        .iter()
        .map(as_wall)
        .zip(rigidities)
        .map(|(w, r)| {
            let x_bar = w.x_m - cor.x_m;
            let y_bar = w.y_m - cor.y_m;
            TorsionalShear {
                tx: e_y * r * x_bar / jp,
                ty: e_x * r * y_bar / jp,
            }
        })
        .collect())
}

/// Compute the torsional state of a building once per run.
///
/// Jp is summed over every wall about the building center of rigidity; the
/// per-group contributions are reported alongside it.
pub fn torsional_state(
    walls: &WallSet,
    rigidities: &[f64],
    com: Centroid,
    cor: Centroid,
    longest_dimension_ns_m: f64,
    longest_dimension_ew_m: f64,
    params: &TorsionParams,
) -> CalcResult<TorsionalState> {
    params.validate()?;
    let polar_moment = polar_moment_of_inertia(walls.walls(), rigidities, cor)?;

    let (ns, r_ns) = group_slice(walls, rigidities, DirectionGroup::NorthSouth);
    let (ew, r_ew) = group_slice(walls, rigidities, DirectionGroup::EastWest);
    let polar_moment_ns = polar_sum(&ns, &r_ns, cor);
    let polar_moment_ew = polar_sum(&ew, &r_ew, cor);

    let state = TorsionalState {
        center_of_mass: com,
        center_of_rigidity: cor,
        eccentricity_ns: Eccentricity::new(com, cor, longest_dimension_ns_m, params),
        eccentricity_ew: Eccentricity::new(com, cor, longest_dimension_ew_m, params),
        polar_moment,
        polar_moment_ns,
        polar_moment_ew,
    };
    debug!(
        jp = polar_moment,
        jp_ns = polar_moment_ns,
        jp_ew = polar_moment_ew,
        sign = params.sign.symbol(),
        "torsional state computed"
    );
    Ok(state)
}

/// Torsional shear for every wall of a building, each group using its own
/// longest plan dimension.
pub fn building_torsional_effects(
    walls: &WallSet,
    rigidities: &[f64],
    state: &TorsionalState,
    longest_dimension_ns_m: f64,
    longest_dimension_ew_m: f64,
    params: &TorsionParams,
) -> CalcResult<Vec<TorsionalShear>> {
    let com = state.center_of_mass;
    let cor = state.center_of_rigidity;
    let jp = state.polar_moment;
    let ns = torsional_effects_with(walls.walls(), rigidities, com, cor, longest_dimension_ns_m, jp, params)?;
    let ew = torsional_effects_with(walls.walls(), rigidities, com, cor, longest_dimension_ew_m, jp, params)?;

    Ok(walls
        .walls()
        .iter()
        .zip(ns.into_iter().zip(ew))
        .map(|(wall, (from_ns, from_ew))| match wall.group {
            DirectionGroup::NorthSouth => from_ns,
            DirectionGroup::EastWest => from_ew,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::centroid::center_of_rigidity;
    use approx::assert_relative_eq;

    fn ns(id: &str, x: f64, y: f64) -> Wall {
        Wall::new(id, 4.0, 3.0, x, y, DirectionGroup::NorthSouth)
    }

    fn ew(id: &str, x: f64, y: f64) -> Wall {
        Wall::new(id, 6.0, 3.0, x, y, DirectionGroup::EastWest)
    }

    #[test]
    fn test_polar_moment_symmetric_pair() {
        let walls = vec![ns("A", 0.0, 0.0), ns("B", 10.0, 0.0)];
        let cor = Centroid::new(5.0, 0.0);
        // 2 × 1.0 × 25
        assert_relative_eq!(polar_moment_of_inertia(&walls, &[1.0, 1.0], cor).unwrap(), 50.0);
    }

    #[test]
    fn test_single_wall_is_degenerate_layout() {
        let walls = vec![ns("ONLY", 3.0, 4.0)];
        let cor = center_of_rigidity(&walls, &[0.4]).unwrap();
        let err = polar_moment_of_inertia(&walls, &[0.4], cor).unwrap_err();
        assert!(matches!(err, CalcError::DegenerateLayout { .. }));
        assert_eq!(err.wall_ids(), vec!["ONLY"]);
    }

    #[test]
    fn test_parallel_axis_theorem() {
        let walls = vec![ns("A", 0.0, 1.0), ns("B", 7.0, -2.0), ew("C", 3.0, 9.0), ew("D", -4.0, 5.0)];
        let rigidities = [0.5, 0.25, 0.8, 0.1];
        let cor = center_of_rigidity(&walls, &rigidities).unwrap();
        let about_cor = polar_moment_of_inertia(&walls, &rigidities, cor).unwrap();

        let other = Centroid::new(11.0, -6.0);
        let about_other = polar_moment_of_inertia(&walls, &rigidities, other).unwrap();
        let total: f64 = rigidities.iter().sum();
        let d = cor.distance_to(&other);
        assert_relative_eq!(about_other, about_cor + total * d * d, epsilon = 1e-9);
        assert!(about_other > about_cor);
    }

    #[test]
    fn test_polar_moment_invariant_under_translation() {
        let walls = vec![ns("A", 0.0, 1.0), ns("B", 7.0, -2.0), ew("C", 3.0, 9.0)];
        let rigidities = [0.5, 0.25, 0.8];
        let moved: Vec<Wall> = walls
            .iter()
            .map(|w| Wall { x_m: w.x_m + 100.0, y_m: w.y_m - 40.0, ..w.clone() })
            .collect();

        let jp = polar_moment_of_inertia(&walls, &rigidities, center_of_rigidity(&walls, &rigidities).unwrap())
            .unwrap();
        let jp_moved =
            polar_moment_of_inertia(&moved, &rigidities, center_of_rigidity(&moved, &rigidities).unwrap())
                .unwrap();
        assert_relative_eq!(jp, jp_moved, epsilon = 1e-9);
    }

    #[test]
    fn test_torsional_effects_cross_axis_pairing() {
        let walls = vec![ns("A", 0.0, 2.0), ns("B", 10.0, -2.0)];
        let rigidities = [1.0, 1.0];
        let cor = Centroid::new(5.0, 0.0);
        let jp = polar_moment_of_inertia(&walls, &rigidities, cor).unwrap();
        assert_relative_eq!(jp, 58.0);

        let com = Centroid::new(6.0, 1.0);
        let effects = torsional_effects(&walls, &rigidities, com, cor, 20.0, jp).unwrap();

        // e_x = 1 + 2 = 3, e_y = 1 + 2 = 3
        assert_relative_eq!(effects[0].tx, 3.0 * 1.0 * -5.0 / 58.0, epsilon = 1e-12);
        assert_relative_eq!(effects[1].tx, 3.0 * 1.0 * 5.0 / 58.0, epsilon = 1e-12);
        assert_relative_eq!(effects[0].ty, 3.0 * 1.0 * 2.0 / 58.0, epsilon = 1e-12);
        assert_relative_eq!(effects[1].ty, 3.0 * 1.0 * -2.0 / 58.0, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_accidental_sign() {
        let walls = vec![ns("A", 0.0, 0.0), ns("B", 10.0, 0.0)];
        let rigidities = [1.0, 1.0];
        let cor = Centroid::new(5.0, 0.0);
        let params = TorsionParams {
            accidental_ratio: 0.05,
            sign: AccidentalSign::Negative,
        };
        // e_y = 0.5 − 0.05 × 20 = −0.5
        let effects =
            torsional_effects_with(&walls, &rigidities, Centroid::new(5.0, 0.5), cor, 20.0, 50.0, &params)
                .unwrap();
        assert_relative_eq!(effects[1].tx, -0.5 * 5.0 / 50.0, epsilon = 1e-12);

        let ecc = Eccentricity::new(Centroid::new(5.0, 0.5), cor, 20.0, &params);
        assert_relative_eq!(ecc.e_x(), -1.0);
        assert_relative_eq!(ecc.e_y(), -0.5);
    }

    #[test]
    fn test_zero_jp_aborts_torsion() {
        let walls = vec![ns("A", 0.0, 0.0)];
        let err = torsional_effects(&walls, &[1.0], Centroid::default(), Centroid::default(), 10.0, 0.0)
            .unwrap_err();
        assert!(matches!(err, CalcError::TorsionUndefined { .. }));
    }

    #[test]
    fn test_non_finite_rigidity_aborts_torsion() {
        let walls = vec![ns("A", 0.0, 0.0), ns("B", 4.0, 0.0)];
        let err = torsional_effects(
            &walls,
            &[1.0, f64::NAN],
            Centroid::default(),
            Centroid::new(2.0, 0.0),
            10.0,
            8.0,
        )
        .unwrap_err();
        assert!(matches!(err, CalcError::TorsionUndefined { .. }));
        assert_eq!(err.wall_ids(), vec!["B"]);

        let err = polar_moment_of_inertia(&walls, &[f64::INFINITY, 1.0], Centroid::default()).unwrap_err();
        assert_eq!(err.error_code(), "TORSION_UNDEFINED");
    }

    #[test]
    fn test_non_finite_centroid_aborts_torsion() {
        let walls = vec![ns("A", 0.0, 0.0), ns("B", 10.0, 0.0)];
        let cor = Centroid::new(5.0, 0.0);
        let err = torsional_effects(&walls, &[1.0, 1.0], Centroid::new(f64::NAN, 0.0), cor, 10.0, 50.0)
            .unwrap_err();
        assert!(matches!(err, CalcError::TorsionUndefined { .. }));
        assert_eq!(err.wall_ids(), vec!["A", "B"]);

        let err = torsional_effects(&walls, &[1.0, 1.0], Centroid::default(), Centroid::new(5.0, f64::INFINITY), 10.0, 50.0)
            .unwrap_err();
        assert!(matches!(err, CalcError::TorsionUndefined { .. }));

        // Finite centroids whose offset overflows
        let err = torsional_effects(&walls, &[1.0, 1.0], Centroid::new(1.5e308, 0.0), Centroid::new(-1.5e308, 0.0), 10.0, 50.0)
            .unwrap_err();
        assert!(matches!(err, CalcError::TorsionUndefined { .. }));
    }

    #[test]
    fn test_invalid_params_and_dimension() {
        let walls = vec![ns("A", 0.0, 0.0), ns("B", 4.0, 0.0)];
        let cor = Centroid::new(2.0, 0.0);
        let bad = TorsionParams {
            accidental_ratio: -0.1,
            sign: AccidentalSign::Positive,
        };
        assert!(matches!(
            torsional_effects_with(&walls, &[1.0, 1.0], cor, cor, 10.0, 8.0, &bad),
            Err(CalcError::InvalidInput { .. })
        ));
        assert!(matches!(
            torsional_effects(&walls, &[1.0, 1.0], cor, cor, f64::NAN, 8.0),
            Err(CalcError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_torsional_state_splits_polar_moment() {
        let set = WallSet::from_groups(
            vec![ns("N1", 0.0, 5.0), ns("N2", 10.0, 5.0)],
            vec![ew("E1", 5.0, 0.0), ew("E2", 5.0, 10.0)],
        );
        let rigidities = [1.0, 1.0, 2.0, 2.0];
        let cor = Centroid::new(5.0, 5.0);
        let state = torsional_state(&set, &rigidities, Centroid::new(6.0, 5.0), cor, 10.0, 20.0, &TorsionParams::default())
            .unwrap();
        assert_relative_eq!(state.polar_moment_ns, 50.0);
        assert_relative_eq!(state.polar_moment_ew, 100.0);
        assert_relative_eq!(state.polar_moment, state.polar_moment_ns + state.polar_moment_ew);
        assert_relative_eq!(state.eccentricity_ns.accidental_m, 1.0);
        assert_relative_eq!(state.eccentricity_ew.accidental_m, 2.0);
        assert_relative_eq!(state.eccentricity(DirectionGroup::NorthSouth).e_x(), 2.0);
    }

    #[test]
    fn test_building_effects_pick_group_dimension() {
        let set = WallSet::from_groups(
            vec![ns("N1", 0.0, 5.0), ns("N2", 10.0, 5.0)],
            vec![ew("E1", 5.0, 0.0), ew("E2", 5.0, 10.0)],
        );
        let rigidities = [1.0, 1.0, 2.0, 2.0];
        let cor = Centroid::new(5.0, 5.0);
        let com = cor;
        let params = TorsionParams::default();
        let state = torsional_state(&set, &rigidities, com, cor, 10.0, 20.0, &params).unwrap();
        let effects = building_torsional_effects(&set, &rigidities, &state, 10.0, 20.0, &params).unwrap();

        // NS walls: e_y = 0.1 × 10 = 1, tx = 1 × 1 × ±5 / 150
        assert_relative_eq!(effects[0].for_group(DirectionGroup::NorthSouth), -5.0 / 150.0, epsilon = 1e-12);
        assert_relative_eq!(effects[1].for_group(DirectionGroup::NorthSouth), 5.0 / 150.0, epsilon = 1e-12);
        // EW walls: e_x = 0.1 × 20 = 2, ty = 2 × 2 × ±5 / 150
        assert_relative_eq!(effects[2].for_group(DirectionGroup::EastWest), -20.0 / 150.0, epsilon = 1e-12);
        assert_relative_eq!(effects[3].for_group(DirectionGroup::EastWest), 20.0 / 150.0, epsilon = 1e-12);
    }
}
