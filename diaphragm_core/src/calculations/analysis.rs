//! # Building Analysis
//!
//! Runs the full rigid-diaphragm pipeline for one building level:
//!
//! ```text
//! WallSet → rigidities → CoM / CoR → TorsionalState → distribution → ResultRecords
//! ```
//!
//! Every run is stateless. The wall set is never mutated, so the positive and
//! negative accidental passes of an envelope share the same input safely.
//! Any stage failure aborts the run and no records are returned.
//!
//! ## Example
//!
//! ```rust
//! use diaphragm_core::calculations::analysis::{analyze, BuildingInput};
//! use diaphragm_core::project::AnalysisSettings;
//! use diaphragm_core::walls::WallRow;
//!
//! let row = |id: &str, length_m: f64, x_m: f64, y_m: f64| WallRow {
//!     id: id.to_string(),
//!     length_m,
//!     height_m: 3.0,
//!     x_m,
//!     y_m,
//! };
//! let input = BuildingInput::new(
//!     "Level 1",
//!     vec![row("N1", 4.0, 0.0, 5.0), row("N2", 4.0, 10.0, 5.0)],
//!     vec![row("E1", 6.0, 5.0, 0.0), row("E2", 6.0, 5.0, 10.0)],
//! );
//!
//! let result = analyze(&input, &AnalysisSettings::default()).unwrap();
//! assert_eq!(result.records.len(), 4);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::centroid::{
    building_center_of_mass, building_center_of_rigidity, Centroid, RigidityCenterMode,
};
use crate::calculations::distribution::{distribute, normalized_direct_shear, DirectShearBasis, ResultRecord};
use crate::calculations::rigidity::{wall_rigidities, RigidityModel};
use crate::calculations::torsion::{
    building_torsional_effects, torsional_state, AccidentalSign, Eccentricity, TorsionalState,
};
use crate::errors::{CalcError, CalcResult};
use crate::project::AnalysisSettings;
use crate::walls::{DirectionGroup, WallRow, WallSet};

/// Input for one building level: two wall tables plus optional overrides.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Level 1",
///   "walls_ns": [{ "id": "N1", "length_m": 4.0, "height_m": 3.0, "x_m": 0.0, "y_m": 5.0 }],
///   "walls_ew": [{ "id": "E1", "length_m": 6.0, "height_m": 3.0, "x_m": 5.0, "y_m": 0.0 }],
///   "longest_dimension_ns_m": 12.0,
///   "base_shear_ns_kn": 450.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingInput {
    /// User-defined label (e.g., "Level 2", "Block B")
    pub label: String,

    /// Walls resisting loads along y
    #[serde(default)]
    pub walls_ns: Vec<WallRow>,

    /// Walls resisting loads along x
    #[serde(default)]
    pub walls_ew: Vec<WallRow>,

    /// Longest plan dimension used for the accidental eccentricity of NS walls.
    /// Defaults to the longest side of the wall layout's plan extent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longest_dimension_ns_m: Option<f64>,

    /// Same for EW walls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longest_dimension_ew_m: Option<f64>,

    /// Predefined center of mass (e.g., from a floor mass takeoff).
    /// When absent the area-weighted wall centroid is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center_of_mass: Option<Centroid>,

    /// Base shear acting north-south, in kN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_shear_ns_kn: Option<f64>,

    /// Base shear acting east-west, in kN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_shear_ew_kn: Option<f64>,
}

impl BuildingInput {
    /// Create an input with no overrides.
    pub fn new(label: impl Into<String>, walls_ns: Vec<WallRow>, walls_ew: Vec<WallRow>) -> Self {
        BuildingInput {
            label: label.into(),
            walls_ns,
            walls_ew,
            longest_dimension_ns_m: None,
            longest_dimension_ew_m: None,
            center_of_mass: None,
            base_shear_ns_kn: None,
            base_shear_ew_kn: None,
        }
    }

    /// Both tables combined, NS rows first.
    pub fn wall_set(&self) -> WallSet {
        WallSet::from_tables(&self.walls_ns, &self.walls_ew)
    }

    /// Base shear for a direction, if supplied
    pub fn base_shear_kn(&self, group: DirectionGroup) -> Option<f64> {
        match group {
            DirectionGroup::NorthSouth => self.base_shear_ns_kn,
            DirectionGroup::EastWest => self.base_shear_ew_kn,
        }
    }

    /// Validate the input.
    ///
    /// Both tables must hold at least one wall, every wall must be valid with
    /// a unique id, and optional values must be finite and non-negative.
    pub fn validate(&self) -> CalcResult<()> {
        for (group, rows) in [
            (DirectionGroup::NorthSouth, &self.walls_ns),
            (DirectionGroup::EastWest, &self.walls_ew),
        ] {
            if rows.is_empty() {
                return Err(CalcError::empty_input(format!("{} walls", group.display_name())));
            }
        }
        self.wall_set().validate()?;

        let optional = [
            ("longest_dimension_ns_m", self.longest_dimension_ns_m),
            ("longest_dimension_ew_m", self.longest_dimension_ew_m),
            ("base_shear_ns_kn", self.base_shear_ns_kn),
            ("base_shear_ew_kn", self.base_shear_ew_kn),
        ];
        for (field, value) in optional {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(CalcError::invalid_input(field, v.to_string(), "Must be finite and non-negative"));
                }
            }
        }

        if let Some(com) = self.center_of_mass {
            if !com.x_m.is_finite() || !com.y_m.is_finite() {
                return Err(CalcError::invalid_input(
                    "center_of_mass",
                    com.to_string(),
                    "Coordinates must be finite",
                ));
            }
        }
        Ok(())
    }

    /// Longest plan dimensions (NS, EW), falling back to the plan extent of the walls.
    pub fn longest_dimensions(&self, walls: &WallSet) -> CalcResult<(f64, f64)> {
        let extent = walls
            .plan_extent()
            .ok_or_else(|| CalcError::empty_input("plan extent"))?
            .longest_m();
        Ok((
            self.longest_dimension_ns_m.unwrap_or(extent),
            self.longest_dimension_ew_m.unwrap_or(extent),
        ))
    }
}

/// Output of one analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Label of the analyzed building
    pub label: String,

    /// Settings the pass ran with
    pub settings: AnalysisSettings,

    /// Walls in input order, group-tagged
    pub walls: WallSet,

    /// Relative rigidity per wall, parallel to `walls`
    pub rigidities: Vec<f64>,

    /// Centroids, eccentricities and polar moment
    pub torsion: TorsionalState,

    /// Longest plan dimension used for NS walls (m)
    pub longest_dimension_ns_m: f64,

    /// Longest plan dimension used for EW walls (m)
    pub longest_dimension_ew_m: f64,

    /// One record per wall, parallel to `walls`
    pub records: Vec<ResultRecord>,
}

impl AnalysisResult {
    pub fn center_of_mass(&self) -> Centroid {
        self.torsion.center_of_mass
    }

    pub fn center_of_rigidity(&self) -> Centroid {
        self.torsion.center_of_rigidity
    }

    /// Polar moment of inertia of all walls about the center of rigidity
    pub fn polar_moment(&self) -> f64 {
        self.torsion.polar_moment
    }

    /// Contribution of one group to the polar moment
    pub fn polar_moment_for(&self, group: DirectionGroup) -> f64 {
        match group {
            DirectionGroup::NorthSouth => self.torsion.polar_moment_ns,
            DirectionGroup::EastWest => self.torsion.polar_moment_ew,
        }
    }

    /// Eccentricity applied to the walls of a group
    pub fn eccentricity(&self, group: DirectionGroup) -> &Eccentricity {
        self.torsion.eccentricity(group)
    }

    /// Records of one group, in input order
    pub fn records_for(&self, group: DirectionGroup) -> Vec<&ResultRecord> {
        self.records.iter().filter(|r| r.group == group).collect()
    }

    /// Record with the largest total shear magnitude in a group
    pub fn max_total_shear(&self, group: DirectionGroup) -> Option<&ResultRecord> {
        self.records
            .iter()
            .filter(|r| r.group == group)
            .max_by(|a, b| a.total_shear.abs().total_cmp(&b.total_shear.abs()))
    }
}

/// Analyze one building level.
///
/// # Errors
///
/// Any validation, rigidity, centroid or torsion failure; see [`CalcError`].
pub fn analyze(input: &BuildingInput, settings: &AnalysisSettings) -> CalcResult<AnalysisResult> {
    settings.validate()?;
    input.validate()?;

    if settings.rigidity_model == RigidityModel::LengthOverHeight {
        warn!(building = %input.label, "using simplified L/h rigidity model");
    }
    if settings.rigidity_center_mode == RigidityCenterMode::Legacy {
        warn!(building = %input.label, "center of rigidity computed with legacy axis-swapped denominators");
    }
    if settings.direct_shear_basis == DirectShearBasis::Length {
        warn!(building = %input.label, "direct shear shared by wall length instead of rigidity");
    }

    let walls = input.wall_set();
    let rigidities = wall_rigidities(&walls, settings.rigidity_model)?;
    debug!(building = %input.label, walls = walls.len(), "rigidities computed");

    let center_of_mass = match input.center_of_mass {
        Some(com) => com,
        None => building_center_of_mass(&walls)?,
    };
    let center_of_rigidity = building_center_of_rigidity(&walls, &rigidities, settings.rigidity_center_mode)?;
    debug!(
        building = %input.label,
        com = %center_of_mass,
        cor = %center_of_rigidity,
        "centroids computed"
    );

    let (longest_ns, longest_ew) = input.longest_dimensions(&walls)?;
    let params = settings.torsion_params();
    let torsion = torsional_state(
        &walls,
        &rigidities,
        center_of_mass,
        center_of_rigidity,
        longest_ns,
        longest_ew,
        &params,
    )?;
    let torsional = building_torsional_effects(&walls, &rigidities, &torsion, longest_ns, longest_ew, &params)?;

    let direct = normalized_direct_shear(walls.walls(), &rigidities, settings.direct_shear_basis)?;
    let records = distribute(walls.walls(), &direct, &torsional)?
        .into_iter()
        .map(|record| match input.base_shear_kn(record.group) {
            Some(base) => record.with_base_shear(base),
            None => record,
        })
        .collect();
    debug!(building = %input.label, sign = params.sign.symbol(), "shear distributed");

    Ok(AnalysisResult {
        label: input.label.clone(),
        settings: *settings,
        walls,
        rigidities,
        torsion,
        longest_dimension_ns_m: longest_ns,
        longest_dimension_ew_m: longest_ew,
        records,
    })
}

/// Governing total shear of one wall across the accidental passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoverningShear {
    pub wall_id: String,
    pub group: DirectionGroup,
    pub total_shear: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_force_kn: Option<f64>,
    /// Pass that produced the governing value
    pub sign: AccidentalSign,
}

/// Both accidental passes and the governing shear per wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeResult {
    pub positive: AnalysisResult,
    pub negative: AnalysisResult,
    /// One entry per wall, in input order
    pub governing: Vec<GoverningShear>,
}

impl EnvelopeResult {
    /// The pass run with a given accidental sign
    pub fn pass(&self, sign: AccidentalSign) -> &AnalysisResult {
        match sign {
            AccidentalSign::Positive => &self.positive,
            AccidentalSign::Negative => &self.negative,
        }
    }
}

/// Run the positive and negative accidental passes and keep the larger total
/// shear magnitude for every wall. Ties go to the positive pass.
///
/// The accidental sign in `settings` is ignored.
pub fn analyze_envelope(input: &BuildingInput, settings: &AnalysisSettings) -> CalcResult<EnvelopeResult> {
    let positive = analyze(input, &settings.with_sign(AccidentalSign::Positive))?;
    let negative = analyze(input, &settings.with_sign(AccidentalSign::Negative))?;

    let governing = positive
        .records
        .iter()
        .zip(&negative.records)
        .map(|(pos, neg)| {
            let (record, sign) = if neg.total_shear.abs() > pos.total_shear.abs() {
                (neg, AccidentalSign::Negative)
            } else {
                (pos, AccidentalSign::Positive)
            };
            GoverningShear {
                wall_id: record.wall_id.clone(),
                group: record.group,
                total_shear: record.total_shear,
                total_force_kn: record.total_force_kn,
                sign,
            }
        })
        .collect();

    debug!(building = %input.label, "envelope computed");
    Ok(EnvelopeResult {
        positive,
        negative,
        governing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::rigidity::relative_rigidity;
    use approx::assert_relative_eq;

    fn row(id: &str, length_m: f64, x_m: f64, y_m: f64) -> WallRow {
        WallRow {
            id: id.to_string(),
            length_m,
            height_m: 3.0,
            x_m,
            y_m,
        }
    }

    /// Doubly symmetric box: CoM and CoR coincide at (5, 5), plan extent 10 m
    fn symmetric_box() -> BuildingInput {
        BuildingInput::new(
            "Box",
            vec![row("N1", 4.0, 0.0, 5.0), row("N2", 4.0, 10.0, 5.0)],
            vec![row("E1", 6.0, 5.0, 0.0), row("E2", 6.0, 5.0, 10.0)],
        )
    }

    /// Stiff wall line on the west side pulls the CoR away from the CoM
    fn eccentric_building() -> BuildingInput {
        BuildingInput::new(
            "Eccentric",
            vec![row("N1", 8.0, 0.0, 6.0), row("N2", 3.0, 12.0, 6.0), row("N3", 3.0, 6.0, 6.0)],
            vec![row("E1", 5.0, 6.0, 0.0), row("E2", 5.0, 6.0, 12.0)],
        )
    }

    #[test]
    fn test_symmetric_box_only_accidental_torsion() {
        let result = analyze(&symmetric_box(), &AnalysisSettings::default()).unwrap();

        assert_relative_eq!(result.center_of_mass().x_m, 5.0);
        assert_relative_eq!(result.center_of_rigidity().y_m, 5.0);
        assert_relative_eq!(result.longest_dimension_ns_m, 10.0);

        let r_ns = relative_rigidity(3.0, 4.0).unwrap();
        let r_ew = relative_rigidity(3.0, 6.0).unwrap();
        let jp = 2.0 * r_ns * 25.0 + 2.0 * r_ew * 25.0;
        assert_relative_eq!(result.polar_moment(), jp, epsilon = 1e-12);
        assert_relative_eq!(result.polar_moment_for(DirectionGroup::EastWest), 2.0 * r_ew * 25.0, epsilon = 1e-12);

        // NS walls: e_y = 0 + 0.1 × 10 = 1
        let t = 1.0 * r_ns * 5.0 / jp;
        let n1 = &result.records[0];
        let n2 = &result.records[1];
        assert_relative_eq!(n1.direct_shear, 0.5, epsilon = 1e-12);
        assert_relative_eq!(n1.total_shear, 0.5 - t, epsilon = 1e-12);
        assert_relative_eq!(n2.total_shear, 0.5 + t, epsilon = 1e-12);
        assert_eq!(result.max_total_shear(DirectionGroup::NorthSouth).unwrap().wall_id, "N2");
    }

    #[test]
    fn test_records_follow_input_order() {
        let result = analyze(&eccentric_building(), &AnalysisSettings::default()).unwrap();
        let ids: Vec<_> = result.records.iter().map(|r| r.wall_id.as_str()).collect();
        assert_eq!(ids, vec!["N1", "N2", "N3", "E1", "E2"]);
        assert_eq!(result.records_for(DirectionGroup::EastWest).len(), 2);
        assert_eq!(result.rigidities.len(), 5);

        let direct_ns: f64 = result.records_for(DirectionGroup::NorthSouth).iter().map(|r| r.direct_shear).sum();
        assert_relative_eq!(direct_ns, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_eccentric_building_loads_flexible_side() {
        let result = analyze(&eccentric_building(), &AnalysisSettings::default()).unwrap();
        // Long wall N1 at x = 0 is stiffest, so the CoR sits west of the CoM
        assert!(result.center_of_rigidity().x_m < result.center_of_mass().x_m);
        assert!(result.eccentricity(DirectionGroup::NorthSouth).real_x_m > 0.0);

        let n1 = &result.records[0];
        let n2 = &result.records[1];
        assert!(n1.torsional_shear < 0.0);
        assert!(n2.torsional_shear > 0.0);
    }

    #[test]
    fn test_translation_does_not_change_shears() {
        let input = eccentric_building();
        let shift = |rows: &[WallRow]| -> Vec<WallRow> {
            rows.iter()
                .map(|r| WallRow {
                    x_m: r.x_m + 250.0,
                    y_m: r.y_m - 80.0,
                    ..r.clone()
                })
                .collect()
        };
        let moved = BuildingInput {
            walls_ns: shift(&input.walls_ns),
            walls_ew: shift(&input.walls_ew),
            ..input.clone()
        };

        let a = analyze(&input, &AnalysisSettings::default()).unwrap();
        let b = analyze(&moved, &AnalysisSettings::default()).unwrap();
        assert_relative_eq!(b.center_of_rigidity().x_m, a.center_of_rigidity().x_m + 250.0, epsilon = 1e-9);
        assert_relative_eq!(b.polar_moment(), a.polar_moment(), epsilon = 1e-9);
        for (ra, rb) in a.records.iter().zip(&b.records) {
            assert_relative_eq!(ra.total_shear, rb.total_shear, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_invalid_wall_aborts_without_records() {
        let mut input = symmetric_box();
        input.walls_ew[1].length_m = 0.0;
        let err = analyze(&input, &AnalysisSettings::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_GEOMETRY");
        assert_eq!(err.wall_ids(), vec!["E2"]);
    }

    #[test]
    fn test_missing_table_is_empty_input() {
        let mut input = symmetric_box();
        input.walls_ew.clear();
        assert!(matches!(
            analyze(&input, &AnalysisSettings::default()),
            Err(CalcError::EmptyInput { ref context }) if context == "East-West walls"
        ));
    }

    #[test]
    fn test_coincident_walls_are_degenerate_layout() {
        let input = BuildingInput::new("Point", vec![row("N1", 4.0, 2.0, 2.0)], vec![row("E1", 4.0, 2.0, 2.0)]);
        let err = analyze(&input, &AnalysisSettings::default()).unwrap_err();
        assert!(matches!(err, CalcError::DegenerateLayout { .. }));
        assert_eq!(err.wall_ids(), vec!["N1", "E1"]);
    }

    #[test]
    fn test_overrides_are_used() {
        let mut input = symmetric_box();
        input.center_of_mass = Some(Centroid::new(7.0, 5.0));
        input.longest_dimension_ns_m = Some(20.0);
        input.longest_dimension_ew_m = Some(0.0);
        input.base_shear_ns_kn = Some(300.0);

        let result = analyze(&input, &AnalysisSettings::default()).unwrap();
        assert_relative_eq!(result.center_of_mass().x_m, 7.0);
        assert_relative_eq!(result.eccentricity(DirectionGroup::NorthSouth).accidental_m, 2.0);
        assert_relative_eq!(result.eccentricity(DirectionGroup::EastWest).e_x(), 2.0);

        let n1 = &result.records[0];
        assert_relative_eq!(n1.total_force_kn.unwrap(), n1.total_shear * 300.0, epsilon = 1e-9);
        assert!(result.records[2].total_force_kn.is_none());
    }

    #[test]
    fn test_invalid_optional_values_rejected() {
        let mut input = symmetric_box();
        input.base_shear_ew_kn = Some(f64::NAN);
        assert!(matches!(input.validate(), Err(CalcError::InvalidInput { ref field, .. }) if field == "base_shear_ew_kn"));

        let mut input = symmetric_box();
        input.center_of_mass = Some(Centroid::new(f64::INFINITY, 0.0));
        assert!(input.validate().is_err());

        let settings = AnalysisSettings {
            accidental_ratio: -0.05,
            ..AnalysisSettings::default()
        };
        assert!(analyze(&symmetric_box(), &settings).is_err());
    }

    #[test]
    fn test_overflowing_wall_areas_abort() {
        let huge = |id: &str, x_m: f64| WallRow {
            id: id.to_string(),
            length_m: 1e160,
            height_m: 1e160,
            x_m,
            y_m: 0.0,
        };
        let mut input = symmetric_box();
        input.walls_ns = vec![huge("N1", 0.0), huge("N2", 10.0)];
        let err = analyze(&input, &AnalysisSettings::default()).unwrap_err();
        assert!(matches!(err, CalcError::UndefinedCentroid { .. }));
        assert_eq!(err.wall_ids(), vec!["N1", "N2"]);
    }

    #[test]
    fn test_legacy_settings_change_results() {
        let settings = AnalysisSettings {
            rigidity_model: RigidityModel::LengthOverHeight,
            rigidity_center_mode: RigidityCenterMode::Legacy,
            direct_shear_basis: DirectShearBasis::Length,
            ..AnalysisSettings::default()
        };
        let result = analyze(&eccentric_building(), &settings).unwrap();
        assert_relative_eq!(result.rigidities[0], 8.0 / 3.0, epsilon = 1e-12);
        // Length basis: 8 / (8 + 3 + 3)
        assert_relative_eq!(result.records[0].direct_shear, 8.0 / 14.0, epsilon = 1e-12);
    }

    #[test]
    fn test_envelope_picks_larger_magnitude() {
        let envelope = analyze_envelope(&symmetric_box(), &AnalysisSettings::default()).unwrap();
        assert_eq!(envelope.positive.settings.accidental_sign, AccidentalSign::Positive);
        assert_eq!(envelope.pass(AccidentalSign::Negative).settings.accidental_sign, AccidentalSign::Negative);

        let n1 = &envelope.governing[0];
        let n2 = &envelope.governing[1];
        assert_eq!(n1.sign, AccidentalSign::Negative);
        assert_eq!(n2.sign, AccidentalSign::Positive);
        assert_relative_eq!(n1.total_shear, n2.total_shear, epsilon = 1e-12);
        assert!(n1.total_shear > 0.5);
        assert_eq!(envelope.governing.len(), 4);
    }

    #[test]
    fn test_building_input_json() {
        let json = r#"{
            "label": "L1",
            "walls_ns": [{"id": "N1", "length_m": 4.0, "height_m": 3.0, "x_m": 0.0, "y_m": 5.0},
                         {"id": "N2", "length_m": 4.0, "height_m": 3.0, "x_m": 10.0, "y_m": 5.0}],
            "walls_ew": [{"id": "E1", "length_m": 6.0, "height_m": 3.0, "x_m": 5.0, "y_m": 0.0},
                         {"id": "E2", "length_m": 6.0, "height_m": 3.0, "x_m": 5.0, "y_m": 10.0}],
            "base_shear_ns_kn": 100.0
        }"#;
        let input: BuildingInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.base_shear_kn(DirectionGroup::NorthSouth), Some(100.0));
        assert!(input.longest_dimension_ns_m.is_none());

        let result = analyze(&input, &AnalysisSettings::default()).unwrap();
        let out = serde_json::to_string(&result).unwrap();
        assert!(out.contains("\"records\""));
        assert!(out.contains("\"polar_moment\""));
    }
}
