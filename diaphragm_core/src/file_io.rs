//! # File I/O Module
//!
//! Reads wall data and writes results:
//! - **Atomic saves**: write to a `.tmp` sibling, sync, then rename
//! - **Version validation**: project files must match the schema major version
//! - **Input detection**: a file may hold a whole project or one bare building
//!
//! ## Example
//!
//! ```rust,no_run
//! use diaphragm_core::file_io::{load_project, save_project};
//! use diaphragm_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Engineer", "25-001", "Client");
//! save_project(&project, Path::new("diaphragm.json"))?;
//! let loaded = load_project(Path::new("diaphragm.json"))?;
//! assert_eq!(loaded.meta.job_id, "25-001");
//! # Ok::<(), diaphragm_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::calculations::analysis::BuildingInput;
use crate::errors::{CalcError, CalcResult};
use crate::project::{Project, SCHEMA_VERSION};

/// Contents of an input file.
#[derive(Debug, Clone)]
pub enum InputDocument {
    /// A project with metadata, settings and any number of buildings
    Project(Project),
    /// A single building table without project wrapper
    Building(BuildingInput),
}

/// Save a project to a file with atomic write semantics.
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    write_json_atomic(project, path)
}

/// Write any analysis output as pretty JSON, atomically.
pub fn write_result_json<T: Serialize>(value: &T, path: &Path) -> CalcResult<()> {
    write_json_atomic(value, path)
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Serialize, write to a temporary file, sync it to disk and rename over `path`.
fn write_json_atomic<T: Serialize>(value: &T, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CalcError::serialization(e.to_string()))?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

fn read_to_string(path: &Path) -> CalcResult<String> {
    fs::read_to_string(path).map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))
}

/// Load a project from a file.
///
/// # Returns
///
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let contents = read_to_string(path)?;
    let project: Project = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    validate_version(&project.meta.version)?;
    Ok(project)
}

/// Load a bare building document.
pub fn load_building(path: &Path) -> CalcResult<BuildingInput> {
    let contents = read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid building JSON in {}: {}", path.display(), e)))
}

/// Load either a project or a bare building, detected by the `meta` header.
pub fn load_input(path: &Path) -> CalcResult<InputDocument> {
    let contents = read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    if value.get("meta").is_some() {
        let project: Project = serde_json::from_value(value)
            .map_err(|e| CalcError::serialization(format!("Invalid project in {}: {}", path.display(), e)))?;
        validate_version(&project.meta.version)?;
        Ok(InputDocument::Project(project))
    } else {
        let building: BuildingInput = serde_json::from_value(value)
            .map_err(|e| CalcError::serialization(format!("Invalid building in {}: {}", path.display(), e)))?;
        Ok(InputDocument::Building(building))
    }
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION.split('.').filter_map(|p| p.parse().ok()).collect();

    let (Some(file_major), Some(current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };
    if file_major != current_major {
        return Err(mismatch());
    }

    // 0.x: a newer minor version may carry breaking changes
    if *current_major == 0 {
        if let (Some(file_minor), Some(current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }

    Ok(())
}
