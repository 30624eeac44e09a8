//! # Shear Distribution
//!
//! Combines the direct shear share of each wall with its torsional shear.
//!
//! ```text
//! directᵢ = Rᵢ / Σ R(group)          (or Lᵢ / Σ L(group) on the length basis)
//! totalᵢ  = directᵢ + Txᵢ            (NS walls)
//! totalᵢ  = directᵢ + Tyᵢ            (EW walls)
//! ```
//!
//! Values are fractions of the base shear in the wall's direction. Torsion
//! adds to walls on one side of the center of rigidity and relieves the
//! other side, so a total can fall below the direct share or go negative.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::calculations::centroid::as_wall;
use crate::calculations::torsion::TorsionalShear;
use crate::errors::{CalcError, CalcResult};
use crate::walls::{DirectionGroup, Wall};

/// Quantity the direct shear is shared in proportion to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DirectShearBasis {
    /// Rᵢ / ΣR within the direction group
    #[default]
    Rigidity,
    /// Lᵢ / ΣL within the direction group (older spreadsheet convention)
    Length,
}

impl DirectShearBasis {
    pub fn display_name(&self) -> &'static str {
        match self {
            DirectShearBasis::Rigidity => "Normalized rigidity",
            DirectShearBasis::Length => "Normalized length",
        }
    }
}

/// Shear carried by one wall.
///
/// ## JSON Example
///
/// ```json
/// {
///   "wall_id": "N1",
///   "group": "NS",
///   "direct_shear": 0.5,
///   "torsional_shear": 0.0417,
///   "total_shear": 0.5417,
///   "total_force_kn": 270.8
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub wall_id: String,
    pub group: DirectionGroup,

    /// Share of the group's base shear ignoring torsion
    pub direct_shear: f64,

    /// Torsional component along the wall's resisting direction
    pub torsional_shear: f64,

    /// direct_shear + torsional_shear
    pub total_shear: f64,

    /// total_shear × base shear, when a base shear was supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_force_kn: Option<f64>,
}

impl ResultRecord {
    /// Scale the total fraction to a force.
    pub fn with_base_shear(self, base_shear_kn: f64) -> Self {
        ResultRecord {
            total_force_kn: Some(self.total_shear * base_shear_kn),
            ..self
        }
    }

    /// Share of the total that comes from torsion
    pub fn torsion_ratio(&self) -> f64 {
        if self.total_shear == 0.0 {
            0.0
        } else {
            self.torsional_shear / self.total_shear
        }
    }
}

/// Direct shear fraction of every wall, in input order.
///
/// Each direction group is normalized on its own, so the fractions of a
/// non-empty group sum to 1.
///
/// # Errors
///
/// * `InvalidInput` - `rigidities` does not match `walls`, or a group's
///   total weight is zero or not finite
pub fn normalized_direct_shear<W: Borrow<Wall>>(
    walls: &[W],
    rigidities: &[f64],
    basis: DirectShearBasis,
) -> CalcResult<Vec<f64>> {
    if walls.len() != rigidities.len() {
        return Err(CalcError::invalid_input(
            "rigidities",
            format!("{} values for {} walls", rigidities.len(), walls.len()),
            "One rigidity is required per wall",
        ));
    }

    let weights: Vec<f64> = walls
        .iter()
        .map(as_wall)
        .zip(rigidities)
        .map(|(w, &r)| match basis {
            DirectShearBasis::Rigidity => r,
            DirectShearBasis::Length => w.length_m,
        })
        .collect();

    let mut totals = [0.0_f64; 2];
    for (wall, weight) in walls.iter().map(as_wall).zip(&weights) {
        totals[group_index(wall.group)] += weight;
    }

    for group in DirectionGroup::ALL {
        let present = walls.iter().map(as_wall).any(|w| w.group == group);
        let total = totals[group_index(group)];
        if present && (!total.is_finite() || total <= 0.0) {
            return Err(CalcError::invalid_input(
                format!("{} walls", group.code()),
                total.to_string(),
                format!("Total {} of the group must be positive", basis.display_name().to_lowercase()),
            ));
        }
    }

    Ok(walls
        .iter()
        .map(as_wall)
        .zip(weights)
        .map(|(w, weight)| weight / totals[group_index(w.group)])
        .collect())
}

fn group_index(group: DirectionGroup) -> usize {
    match group {
        DirectionGroup::NorthSouth => 0,
        DirectionGroup::EastWest => 1,
    }
}

/// Combine direct and torsional shear into one record per wall.
///
/// NS walls take the `tx` component and EW walls take `ty`. Output order
/// matches `walls`.
pub fn distribute<W: Borrow<Wall>>(
    walls: &[W],
    normalized_direct: &[f64],
    torsional: &[TorsionalShear],
) -> CalcResult<Vec<ResultRecord>> {
    if normalized_direct.len() != walls.len() {
        return Err(CalcError::invalid_input(
            "normalized_direct",
            format!("{} values for {} walls", normalized_direct.len(), walls.len()),
            "One direct shear fraction is required per wall",
        ));
    }
    if torsional.len() != walls.len() {
        return Err(CalcError::invalid_input(
            "torsional",
            format!("{} values for {} walls", torsional.len(), walls.len()),
            "One torsional shear is required per wall",
        ));
    }

    Ok(walls
        .iter()
        .map(as_wall)
        .zip(normalized_direct.iter().zip(torsional))
        .map(|(wall, (&direct, shear))| {
            let torsional_shear = shear.for_group(wall.group);
            ResultRecord {
                wall_id: wall.id.clone(),
                group: wall.group,
                direct_shear: direct,
                torsional_shear,
                total_shear: direct + torsional_shear,
                total_force_kn: None,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn layout() -> Vec<Wall> {
        vec![
            Wall::new("N1", 4.0, 3.0, 0.0, 5.0, DirectionGroup::NorthSouth),
            Wall::new("E1", 6.0, 3.0, 5.0, 0.0, DirectionGroup::EastWest),
            Wall::new("N2", 8.0, 3.0, 10.0, 5.0, DirectionGroup::NorthSouth),
            Wall::new("E2", 2.0, 3.0, 5.0, 10.0, DirectionGroup::EastWest),
        ]
    }

    #[test]
    fn test_direct_shear_sums_to_one_per_group() {
        let walls = layout();
        let rigidities = [0.3, 0.7, 0.9, 0.05];
        let direct = normalized_direct_shear(&walls, &rigidities, DirectShearBasis::Rigidity).unwrap();

        assert_relative_eq!(direct[0] + direct[2], 1.0, epsilon = 1e-12);
        assert_relative_eq!(direct[1] + direct[3], 1.0, epsilon = 1e-12);
        assert_relative_eq!(direct[0], 0.25, epsilon = 1e-12);
        assert_relative_eq!(direct[3], 0.05 / 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_length_basis() {
        let walls = layout();
        let direct = normalized_direct_shear(&walls, &[1.0; 4], DirectShearBasis::Length).unwrap();
        assert_relative_eq!(direct[0], 4.0 / 12.0, epsilon = 1e-12);
        assert_relative_eq!(direct[2], 8.0 / 12.0, epsilon = 1e-12);
        assert_relative_eq!(direct[1], 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_group_rigidity_rejected() {
        let walls = layout();
        let err = normalized_direct_shear(&walls, &[0.0, 1.0, 0.0, 1.0], DirectShearBasis::Rigidity).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "NS walls"));
    }

    #[test]
    fn test_distribute_picks_component_by_group() {
        let walls = layout();
        let direct = [0.25, 0.5, 0.75, 0.5];
        let torsional = vec![
            TorsionalShear { tx: -0.1, ty: 0.9 },
            TorsionalShear { tx: 0.9, ty: -0.05 },
            TorsionalShear { tx: 0.1, ty: 0.9 },
            TorsionalShear { tx: 0.9, ty: 0.05 },
        ];
        let records = distribute(&walls, &direct, &torsional).unwrap();

        assert_eq!(records.len(), 4);
        let ids: Vec<_> = records.iter().map(|r| r.wall_id.as_str()).collect();
        assert_eq!(ids, vec!["N1", "E1", "N2", "E2"]);

        assert_relative_eq!(records[0].torsional_shear, -0.1);
        assert_relative_eq!(records[0].total_shear, 0.15, epsilon = 1e-12);
        assert_relative_eq!(records[1].torsional_shear, -0.05);
        assert_relative_eq!(records[3].total_shear, 0.55, epsilon = 1e-12);
        assert!(records.iter().all(|r| r.total_force_kn.is_none()));
    }

    #[test]
    fn test_distribute_length_mismatch() {
        let walls = layout();
        let err = distribute(&walls, &[0.5, 0.5], &[TorsionalShear::default(); 4]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        let err = distribute(&walls, &[0.5; 4], &[]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_base_shear_scaling() {
        let record = ResultRecord {
            wall_id: "N1".to_string(),
            group: DirectionGroup::NorthSouth,
            direct_shear: 0.5,
            torsional_shear: 0.1,
            total_shear: 0.6,
            total_force_kn: None,
        }
        .with_base_shear(200.0);
        assert_relative_eq!(record.total_force_kn.unwrap(), 120.0, epsilon = 1e-9);
        assert_relative_eq!(record.torsion_ratio(), 0.1 / 0.6, epsilon = 1e-12);

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"group\":\"NS\""));
        assert!(json.contains("total_force_kn"));
    }
}
