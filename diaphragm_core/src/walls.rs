//! # Shear Wall Records
//!
//! Plain data records for the lateral-resisting walls of one building level.
//! Walls arrive from two input tables, one per resisting direction, and are
//! kept in a single ordered [`WallSet`] so results can be mapped back to
//! input rows.
//!
//! ## Coordinate Convention
//!
//! - `x_m`, `y_m` locate the wall centroid in plan (metres)
//! - **NS** walls run north-south: they resist loads along y and their
//!   lever arm about the center of rigidity is measured along x
//! - **EW** walls run east-west: they resist loads along x and their lever
//!   arm is measured along y
//!
//! ## Example
//!
//! ```rust
//! use diaphragm_core::walls::{DirectionGroup, Wall, WallSet};
//!
//! let set = WallSet::from_groups(
//!     vec![Wall::new("N1", 6.0, 3.0, 0.0, 5.0, DirectionGroup::NorthSouth)],
//!     vec![Wall::new("E1", 8.0, 3.0, 4.0, 0.0, DirectionGroup::EastWest)],
//! );
//!
//! assert_eq!(set.len(), 2);
//! assert!(set.validate().is_ok());
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Direction in which a wall resists lateral load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DirectionGroup {
    /// Wall runs north-south and resists loads along y
    #[serde(rename = "NS")]
    NorthSouth,
    /// Wall runs east-west and resists loads along x
    #[serde(rename = "EW")]
    EastWest,
}

impl DirectionGroup {
    /// Both groups in table order
    pub const ALL: [DirectionGroup; 2] = [DirectionGroup::NorthSouth, DirectionGroup::EastWest];

    /// Short code used in input tables and reports
    pub fn code(&self) -> &'static str {
        match self {
            DirectionGroup::NorthSouth => "NS",
            DirectionGroup::EastWest => "EW",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            DirectionGroup::NorthSouth => "North-South",
            DirectionGroup::EastWest => "East-West",
        }
    }

    /// The other group
    pub fn perpendicular(&self) -> DirectionGroup {
        match self {
            DirectionGroup::NorthSouth => DirectionGroup::EastWest,
            DirectionGroup::EastWest => DirectionGroup::NorthSouth,
        }
    }
}

impl std::fmt::Display for DirectionGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A single shear wall.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "N1",
///   "length_m": 6.0,
///   "height_m": 3.0,
///   "x_m": 0.0,
///   "y_m": 5.0,
///   "group": "NS"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    /// Opaque label from the input table (e.g., "W-1", "Grid A")
    pub id: String,

    /// Plan length in metres
    pub length_m: f64,

    /// Height in metres
    pub height_m: f64,

    /// Centroid x coordinate in metres
    pub x_m: f64,

    /// Centroid y coordinate in metres
    pub y_m: f64,

    /// Resisting direction
    pub group: DirectionGroup,
}

impl Wall {
    /// Create a wall record.
    pub fn new(
        id: impl Into<String>,
        length_m: f64,
        height_m: f64,
        x_m: f64,
        y_m: f64,
        group: DirectionGroup,
    ) -> Self {
        Wall {
            id: id.into(),
            length_m,
            height_m,
            x_m,
            y_m,
            group,
        }
    }

    /// Validate that dimensions are positive and all values finite.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.length_m.is_finite() || self.length_m <= 0.0 {
            return Err(CalcError::invalid_geometry(
                &self.id,
                "length_m",
                self.length_m,
                "Wall length must be positive and finite",
            ));
        }
        if !self.height_m.is_finite() || self.height_m <= 0.0 {
            return Err(CalcError::invalid_geometry(
                &self.id,
                "height_m",
                self.height_m,
                "Wall height must be positive and finite",
            ));
        }
        if !self.x_m.is_finite() {
            return Err(CalcError::invalid_geometry(
                &self.id,
                "x_m",
                self.x_m,
                "Coordinate must be finite",
            ));
        }
        if !self.y_m.is_finite() {
            return Err(CalcError::invalid_geometry(
                &self.id,
                "y_m",
                self.y_m,
                "Coordinate must be finite",
            ));
        }
        Ok(())
    }

    /// Elevation area A = L·h (m²), the center of mass weight
    pub fn area_m2(&self) -> f64 {
        self.length_m * self.height_m
    }

    /// Aspect ratio h/L
    pub fn aspect_ratio(&self) -> f64 {
        self.height_m / self.length_m
    }

    /// Plan end points of the wall segment, `((x0, y0), (x1, y1))`
    pub fn segment(&self) -> ((f64, f64), (f64, f64)) {
        let half = self.length_m / 2.0;
        match self.group {
            DirectionGroup::NorthSouth => ((self.x_m, self.y_m - half), (self.x_m, self.y_m + half)),
            DirectionGroup::EastWest => ((self.x_m - half, self.y_m), (self.x_m + half, self.y_m)),
        }
    }
}

/// One row of a wall input table.
///
/// The table a row comes from decides its direction group, so rows carry no
/// group tag of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallRow {
    pub id: String,
    pub length_m: f64,
    pub height_m: f64,
    pub x_m: f64,
    pub y_m: f64,
}

impl WallRow {
    /// Tag the row with the group of the table it came from.
    pub fn into_wall(self, group: DirectionGroup) -> Wall {
        Wall {
            id: self.id,
            length_m: self.length_m,
            height_m: self.height_m,
            x_m: self.x_m,
            y_m: self.y_m,
            group,
        }
    }
}

impl From<&Wall> for WallRow {
    fn from(wall: &Wall) -> Self {
        WallRow {
            id: wall.id.clone(),
            length_m: wall.length_m,
            height_m: wall.height_m,
            x_m: wall.x_m,
            y_m: wall.y_m,
        }
    }
}

/// Axis-aligned plan bounding box of a wall layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanExtent {
    pub min_x_m: f64,
    pub max_x_m: f64,
    pub min_y_m: f64,
    pub max_y_m: f64,
}

impl PlanExtent {
    /// Plan dimension along x
    pub fn width_m(&self) -> f64 {
        self.max_x_m - self.min_x_m
    }

    /// Plan dimension along y
    pub fn depth_m(&self) -> f64 {
        self.max_y_m - self.min_y_m
    }

    /// Longest plan dimension
    pub fn longest_m(&self) -> f64 {
        self.width_m().max(self.depth_m())
    }
}

/// Ordered collection of walls for one analysis.
///
/// Order is insertion order and is preserved through to the result records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WallSet {
    walls: Vec<Wall>,
}

impl WallSet {
    /// Create a set from walls in input order.
    pub fn new(walls: Vec<Wall>) -> Self {
        WallSet { walls }
    }

    /// Create a set from the two input tables, NS rows first.
    ///
    /// The group tag of every wall is overwritten with the table it came from.
    pub fn from_groups(walls_ns: Vec<Wall>, walls_ew: Vec<Wall>) -> Self {
        let walls = walls_ns
            .into_iter()
            .map(|w| Wall { group: DirectionGroup::NorthSouth, ..w })
            .chain(walls_ew.into_iter().map(|w| Wall { group: DirectionGroup::EastWest, ..w }))
            .collect();
        WallSet { walls }
    }

    /// Create a set from two tables of untagged rows, NS rows first.
    pub fn from_tables(rows_ns: &[WallRow], rows_ew: &[WallRow]) -> Self {
        let walls = rows_ns
            .iter()
            .map(|r| r.clone().into_wall(DirectionGroup::NorthSouth))
            .chain(rows_ew.iter().map(|r| r.clone().into_wall(DirectionGroup::EastWest)))
            .collect();
        WallSet { walls }
    }

    /// All walls in input order
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Number of walls
    pub fn len(&self) -> usize {
        self.walls.len()
    }

    /// True when the set holds no walls
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    /// Walls of one group, in input order
    pub fn group(&self, group: DirectionGroup) -> Vec<&Wall> {
        self.walls.iter().filter(|w| w.group == group).collect()
    }

    /// Input positions of the walls in one group
    pub fn indices_of(&self, group: DirectionGroup) -> Vec<usize> {
        self.walls
            .iter()
            .enumerate()
            .filter(|(_, w)| w.group == group)
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of walls in one group
    pub fn count(&self, group: DirectionGroup) -> usize {
        self.walls.iter().filter(|w| w.group == group).count()
    }

    /// Validate every wall and check that ids are unique.
    pub fn validate(&self) -> CalcResult<()> {
        let mut seen = HashSet::new();
        for wall in &self.walls {
            wall.validate()?;
            if !seen.insert(wall.id.as_str()) {
                return Err(CalcError::invalid_input(
                    "id",
                    wall.id.clone(),
                    "Wall ids must be unique within a building",
                ));
            }
        }
        Ok(())
    }

    /// A copy of the set with every wall shifted by (dx, dy).
    pub fn translated(&self, dx_m: f64, dy_m: f64) -> WallSet {
        WallSet {
            walls: self
                .walls
                .iter()
                .map(|w| Wall {
                    x_m: w.x_m + dx_m,
                    y_m: w.y_m + dy_m,
                    ..w.clone()
                })
                .collect(),
        }
    }

    /// Plan bounding box of all wall segments, `None` for an empty set.
    pub fn plan_extent(&self) -> Option<PlanExtent> {
        self.walls.iter().map(Wall::segment).fold(None, |acc, ((x0, y0), (x1, y1))| {
            let (min_x, max_x) = (x0.min(x1), x0.max(x1));
            let (min_y, max_y) = (y0.min(y1), y0.max(y1));
            Some(match acc {
                None => PlanExtent {
                    min_x_m: min_x,
                    max_x_m: max_x,
                    min_y_m: min_y,
                    max_y_m: max_y,
                },
                Some(e) => PlanExtent {
                    min_x_m: e.min_x_m.min(min_x),
                    max_x_m: e.max_x_m.max(max_x),
                    min_y_m: e.min_y_m.min(min_y),
                    max_y_m: e.max_y_m.max(max_y),
                },
            })
        })
    }
}

impl From<Vec<Wall>> for WallSet {
    fn from(walls: Vec<Wall>) -> Self {
        WallSet::new(walls)
    }
}
