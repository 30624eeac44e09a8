//! # Diaphragm CLI
//!
//! Command-line front end for rigid-diaphragm shear distribution.
//!
//! ```text
//! diaphragm_cli init project.json
//! diaphragm_cli validate project.json
//! diaphragm_cli analyze project.json --building "Level 1" --envelope
//! diaphragm_cli analyze level1.json --json --accidental-ratio 0.05
//! ```
//!
//! Input files hold either a whole project or one bare building document.
//! Set `RUST_LOG=diaphragm_core=debug` to trace each pipeline stage.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use diaphragm_core::calculations::{AccidentalSign, DirectShearBasis, RigidityCenterMode, RigidityModel};
use diaphragm_core::file_io::{load_input, save_project, write_result_json, InputDocument};
use diaphragm_core::report::{render_envelope, render_summary};
use diaphragm_core::{
    analyze, analyze_envelope, AnalysisSettings, BuildingInput, CalcError, CalcResult, Project, WallRow,
};

#[derive(Parser)]
#[command(name = "diaphragm_cli")]
#[command(version, about = "Rigid diaphragm seismic shear distribution for shear wall layouts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze every building in a project, or a single building file.
    Analyze {
        /// Project or building JSON file.
        input: PathBuf,

        /// Only analyze the building with this label.
        #[arg(short, long)]
        building: Option<String>,

        /// Print results as JSON instead of text tables.
        #[arg(long)]
        json: bool,

        /// Run both accidental eccentricity signs and report the governing shear.
        #[arg(long)]
        envelope: bool,

        /// Write the JSON results to this file.
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        overrides: SettingsOverrides,
    },

    /// Check an input file without running the analysis.
    Validate {
        /// Project or building JSON file.
        input: PathBuf,
    },

    /// Write a sample project file to start from.
    Init {
        /// Destination path.
        output: PathBuf,

        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Per-run overrides of the project settings.
#[derive(clap::Args)]
struct SettingsOverrides {
    /// Accidental eccentricity as a fraction of the longest plan dimension.
    #[arg(long)]
    accidental_ratio: Option<f64>,

    /// Subtract the accidental eccentricity instead of adding it.
    #[arg(long)]
    negative_accidental: bool,

    /// Reproduce the older axis-swapped center of rigidity.
    #[arg(long)]
    legacy_cor: bool,

    /// Share direct shear by wall length instead of rigidity.
    #[arg(long)]
    length_basis: bool,

    /// Use the simplified L/h rigidity instead of the cantilever formula.
    #[arg(long)]
    simplified_rigidity: bool,
}

impl SettingsOverrides {
    fn apply(&self, base: AnalysisSettings) -> AnalysisSettings {
        let mut settings = base;
        if let Some(ratio) = self.accidental_ratio {
            settings.accidental_ratio = ratio;
        }
        if self.negative_accidental {
            settings.accidental_sign = AccidentalSign::Negative;
        }
        if self.legacy_cor {
            settings.rigidity_center_mode = RigidityCenterMode::Legacy;
        }
        if self.length_basis {
            settings.direct_shear_basis = DirectShearBasis::Length;
        }
        if self.simplified_rigidity {
            settings.rigidity_model = RigidityModel::LengthOverHeight;
        }
        settings
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "diaphragm_cli=info,diaphragm_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            input,
            building,
            json,
            envelope,
            output,
            overrides,
        } => run_analyze(&input, building.as_deref(), json, envelope, output.as_deref(), &overrides),
        Commands::Validate { input } => run_validate(&input),
        Commands::Init { output, force } => run_init(&output, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if let Ok(json) = serde_json::to_string_pretty(&e) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
        std::process::exit(1);
    }
}

/// Settings and buildings of an input file, optionally narrowed to one label.
fn load_buildings(path: &Path, label: Option<&str>) -> CalcResult<(AnalysisSettings, Vec<BuildingInput>)> {
    let (settings, buildings) = match load_input(path)? {
        InputDocument::Project(project) => {
            tracing::info!(
                job = %project.meta.job_id,
                buildings = project.building_count(),
                "loaded project"
            );
            let buildings = project.buildings_by_label().into_iter().cloned().collect();
            (project.settings, buildings)
        }
        InputDocument::Building(building) => (AnalysisSettings::default(), vec![building]),
    };

    match label {
        None => Ok((settings, buildings)),
        Some(label) => {
            let selected: Vec<_> = buildings.into_iter().filter(|b| b.label == label).collect();
            if selected.is_empty() {
                return Err(CalcError::invalid_input("building", label, "No building with this label"));
            }
            Ok((settings, selected))
        }
    }
}

fn to_json_value<T: Serialize>(value: &T) -> CalcResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| CalcError::serialization(e.to_string()))
}

fn run_analyze(
    path: &Path,
    label: Option<&str>,
    json: bool,
    envelope: bool,
    output: Option<&Path>,
    overrides: &SettingsOverrides,
) -> CalcResult<()> {
    let (base_settings, buildings) = load_buildings(path, label)?;
    let settings = overrides.apply(base_settings);
    settings.validate()?;

    let mut values = Vec::with_capacity(buildings.len());
    for building in &buildings {
        tracing::info!(building = %building.label, envelope, "analyzing");
        if envelope {
            let result = analyze_envelope(building, &settings)?;
            if !json {
                println!("{}", render_envelope(&result));
            }
            values.push(to_json_value(&result)?);
        } else {
            let result = analyze(building, &settings)?;
            if !json {
                println!("{}", render_summary(&result));
            }
            values.push(to_json_value(&result)?);
        }
    }

    let document = if values.len() == 1 {
        values.remove(0)
    } else {
        serde_json::Value::Array(values)
    };

    if json {
        let text = serde_json::to_string_pretty(&document).map_err(|e| CalcError::serialization(e.to_string()))?;
        println!("{}", text);
    }
    if let Some(output) = output {
        write_result_json(&document, output)?;
        tracing::info!(path = %output.display(), "results written");
    }
    Ok(())
}

fn run_validate(path: &Path) -> CalcResult<()> {
    let (settings, buildings) = load_buildings(path, None)?;
    settings.validate()?;
    for building in &buildings {
        building.validate()?;
        let walls = building.wall_set();
        let (longest_ns, longest_ew) = building.longest_dimensions(&walls)?;
        println!(
            "{}: {} NS walls, {} EW walls, longest dimension {:.2} m / {:.2} m - OK",
            building.label,
            building.walls_ns.len(),
            building.walls_ew.len(),
            longest_ns,
            longest_ew
        );
    }
    Ok(())
}

fn sample_project() -> Project {
    let row = |id: &str, length_m: f64, x_m: f64, y_m: f64| WallRow {
        id: id.to_string(),
        length_m,
        height_m: 3.0,
        x_m,
        y_m,
    };

    let mut building = BuildingInput::new(
        "Level 1",
        vec![
            row("N1", 6.0, 0.0, 5.0),
            row("N2", 3.0, 8.0, 5.0),
            row("N3", 4.0, 16.0, 5.0),
        ],
        vec![row("E1", 8.0, 8.0, 0.0), row("E2", 5.0, 8.0, 10.0)],
    );
    building.base_shear_ns_kn = Some(400.0);
    building.base_shear_ew_kn = Some(400.0);

    let mut project = Project::default();
    project.add_building(building);
    project
}

fn run_init(path: &Path, force: bool) -> CalcResult<()> {
    if path.exists() && !force {
        return Err(CalcError::file_error(
            "init",
            path.display().to_string(),
            "File exists (use --force to overwrite)",
        ));
    }
    save_project(&sample_project(), path)?;
    println!("Wrote sample project to {}", path.display());
    Ok(())
}
