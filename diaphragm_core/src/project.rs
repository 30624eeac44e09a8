//! # Project Data Structures
//!
//! The `Project` struct is the root container for a diaphragm study.
//! Projects serialize to human-readable JSON files.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: AnalysisSettings (accidental ratio, compatibility modes)
//! └── buildings: HashMap<Uuid, BuildingInput> (one entry per level or block)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use diaphragm_core::project::Project;
//!
//! let project = Project::new("Jane Engineer", "25-042", "ACME Corp");
//!
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("accidental_ratio"));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::analysis::BuildingInput;
use crate::calculations::centroid::RigidityCenterMode;
use crate::calculations::distribution::DirectShearBasis;
use crate::calculations::rigidity::RigidityModel;
use crate::calculations::torsion::{AccidentalSign, TorsionParams, DEFAULT_ACCIDENTAL_RATIO};
use crate::errors::CalcResult;

/// Current schema version for project files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Settings shared by every analysis in the project
    pub settings: AnalysisSettings,

    /// Building inputs, keyed by UUID
    pub buildings: HashMap<Uuid, BuildingInput>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Arguments
    ///
    /// * `engineer` - Name of the responsible engineer
    /// * `job_id` - Job/project number (e.g., "25-001")
    /// * `client` - Client name
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: AnalysisSettings::default(),
            buildings: HashMap::new(),
        }
    }

    /// Add a building to the project.
    ///
    /// Returns the UUID assigned to it.
    pub fn add_building(&mut self, building: BuildingInput) -> Uuid {
        let id = Uuid::new_v4();
        self.buildings.insert(id, building);
        self.touch();
        id
    }

    /// Remove a building by UUID.
    pub fn remove_building(&mut self, id: &Uuid) -> Option<BuildingInput> {
        let building = self.buildings.remove(id);
        if building.is_some() {
            self.touch();
        }
        building
    }

    /// Get a building by UUID.
    pub fn get_building(&self, id: &Uuid) -> Option<&BuildingInput> {
        self.buildings.get(id)
    }

    /// Find a building by its label.
    pub fn find_building(&self, label: &str) -> Option<&BuildingInput> {
        self.buildings.values().find(|b| b.label == label)
    }

    /// Buildings sorted by label, for stable output
    pub fn buildings_by_label(&self) -> Vec<&BuildingInput> {
        let mut buildings: Vec<_> = self.buildings.values().collect();
        buildings.sort_by(|a, b| a.label.cmp(&b.label));
        buildings
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn building_count(&self) -> usize {
        self.buildings.len()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Analysis settings.
///
/// Every field has a default, so `{}` or a partial object deserializes.
///
/// ## JSON Example
///
/// ```json
/// {
///   "accidental_ratio": 0.05,
///   "accidental_sign": "Negative",
///   "rigidity_model": "Cantilever",
///   "rigidity_center_mode": "Symmetric",
///   "direct_shear_basis": "Rigidity"
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Accidental eccentricity as a fraction of the longest plan dimension
    pub accidental_ratio: f64,

    /// Sign of the accidental eccentricity for a single pass
    pub accidental_sign: AccidentalSign,

    pub rigidity_model: RigidityModel,

    pub rigidity_center_mode: RigidityCenterMode,

    pub direct_shear_basis: DirectShearBasis,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            accidental_ratio: DEFAULT_ACCIDENTAL_RATIO,
            accidental_sign: AccidentalSign::Positive,
            rigidity_model: RigidityModel::Cantilever,
            rigidity_center_mode: RigidityCenterMode::Symmetric,
            direct_shear_basis: DirectShearBasis::Rigidity,
        }
    }
}

impl AnalysisSettings {
    /// Reject settings no analysis can run with.
    pub fn validate(&self) -> CalcResult<()> {
        self.torsion_params().validate()
    }

    /// Accidental eccentricity parameters for the torsion stage
    pub fn torsion_params(&self) -> TorsionParams {
        TorsionParams {
            accidental_ratio: self.accidental_ratio,
            sign: self.accidental_sign,
        }
    }

    /// The same settings with a different accidental sign
    pub fn with_sign(&self, sign: AccidentalSign) -> Self {
        AnalysisSettings {
            accidental_sign: sign,
            ..*self
        }
    }

    /// True when any compatibility mode for older spreadsheet outputs is selected
    pub fn uses_legacy_mode(&self) -> bool {
        self.rigidity_model != RigidityModel::Cantilever
            || self.rigidity_center_mode != RigidityCenterMode::Symmetric
            || self.direct_shear_basis != DirectShearBasis::Rigidity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walls::WallRow;

    fn building(label: &str) -> BuildingInput {
        let row = WallRow {
            id: "W1".to_string(),
            length_m: 4.0,
            height_m: 3.0,
            x_m: 0.0,
            y_m: 0.0,
        };
        BuildingInput::new(label, vec![row.clone()], vec![row])
    }

    #[test]
    fn test_project_creation() {
        let project = Project::new("John Doe", "25-001", "Acme Corp");
        assert_eq!(project.meta.engineer, "John Doe");
        assert_eq!(project.meta.job_id, "25-001");
        assert_eq!(project.meta.client, "Acme Corp");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.settings, AnalysisSettings::default());
    }

    #[test]
    fn test_project_serialization() {
        let mut project = Project::new("Jane Engineer", "25-042", "Test Client");
        project.add_building(building("Level 1"));
        let json = serde_json::to_string_pretty(&project).unwrap();

        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("Level 1"));
        assert!(json.contains("\"rigidity_center_mode\": \"Symmetric\""));

        let roundtrip: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.engineer, "Jane Engineer");
        assert_eq!(roundtrip.building_count(), 1);
    }

    #[test]
    fn test_add_remove_building() {
        let mut project = Project::new("Engineer", "25-001", "Client");
        let id = project.add_building(building("Level 1"));
        project.add_building(building("Level 0"));
        assert_eq!(project.building_count(), 2);
        assert!(project.get_building(&id).is_some());
        assert!(project.find_building("Level 0").is_some());

        let labels: Vec<_> = project.buildings_by_label().iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Level 0", "Level 1"]);

        assert!(project.remove_building(&id).is_some());
        assert!(project.remove_building(&id).is_none());
        assert_eq!(project.building_count(), 1);
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let settings: AnalysisSettings = serde_json::from_str(r#"{"accidental_ratio": 0.05}"#).unwrap();
        assert_eq!(settings.accidental_ratio, 0.05);
        assert_eq!(settings.accidental_sign, AccidentalSign::Positive);
        assert!(!settings.uses_legacy_mode());

        let settings: AnalysisSettings = serde_json::from_str(r#"{"rigidity_center_mode": "Legacy"}"#).unwrap();
        assert_eq!(settings.accidental_ratio, DEFAULT_ACCIDENTAL_RATIO);
        assert!(settings.uses_legacy_mode());
    }

    #[test]
    fn test_settings_validation() {
        assert!(AnalysisSettings::default().validate().is_ok());
        let settings = AnalysisSettings {
            accidental_ratio: f64::NAN,
            ..AnalysisSettings::default()
        };
        assert_eq!(settings.validate().unwrap_err().error_code(), "INVALID_INPUT");
        assert_eq!(
            settings.with_sign(AccidentalSign::Negative).torsion_params().sign,
            AccidentalSign::Negative
        );
    }
}
