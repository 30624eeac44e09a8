//! # Diaphragm Calculations
//!
//! The rigid-diaphragm pipeline, one module per stage:
//!
//! - [`rigidity`] - Relative rigidity of each wall from its aspect ratio
//! - [`centroid`] - Center of mass (area-weighted) and center of rigidity
//! - [`torsion`] - Polar moment of inertia and torsional shear
//! - [`distribution`] - Direct plus torsional shear per wall
//! - [`analysis`] - `BuildingInput` in, `AnalysisResult` out
//!
//! Each stage is a pure function over plain records and returns
//! `Result<_, CalcError>`. Later stages only consume what earlier stages
//! return, so any one of them can be called on its own.

pub mod analysis;
pub mod centroid;
pub mod distribution;
pub mod rigidity;
pub mod torsion;

pub use analysis::{analyze, analyze_envelope, AnalysisResult, BuildingInput, EnvelopeResult, GoverningShear};
pub use centroid::{center_of_mass, center_of_rigidity, Centroid, RigidityCenterMode};
pub use distribution::{distribute, normalized_direct_shear, DirectShearBasis, ResultRecord};
pub use rigidity::{relative_rigidity, RigidityModel};
pub use torsion::{
    polar_moment_of_inertia, torsional_effects, AccidentalSign, Eccentricity, TorsionParams, TorsionalShear,
    TorsionalState,
};
