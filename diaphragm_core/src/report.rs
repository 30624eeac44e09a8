//! # Text Reports
//!
//! Plain-text summaries of analysis results for terminal output and
//! calculation packages. Reports only read finished results; nothing here
//! feeds back into the analysis.

use std::fmt::{self, Write};

use crate::calculations::analysis::{AnalysisResult, EnvelopeResult};
use crate::walls::DirectionGroup;

/// Render a textual summary of one analysis pass.
///
/// Lists the centroids, polar moment and eccentricities, then one row per
/// wall grouped by direction.
#[must_use]
pub fn render_summary(result: &AnalysisResult) -> String {
    Summary(result).to_string()
}

/// Render the governing shears of an envelope, one row per wall.
#[must_use]
pub fn render_envelope(envelope: &EnvelopeResult) -> String {
    Envelope(envelope).to_string()
}

struct Summary<'a>(&'a AnalysisResult);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        let settings = &result.settings;
        let cor = result.center_of_rigidity();

        writeln!(
            f,
            "Rigid diaphragm analysis: {} (accidental {}{:.0}% of longest dimension)",
            result.label,
            settings.accidental_sign.symbol(),
            settings.accidental_ratio * 100.0
        )?;
        writeln!(
            f,
            "Rigidity: {}; direct shear: {}",
            settings.rigidity_model.display_name(),
            settings.direct_shear_basis.display_name()
        )?;
        if settings.uses_legacy_mode() {
            writeln!(f, "Note: legacy compatibility mode selected")?;
        }
        writeln!(f, "Center of mass:     {} m", result.center_of_mass())?;
        writeln!(f, "Center of rigidity: {} m", cor)?;
        writeln!(
            f,
            "Polar moment Jp:    {:.4} (NS {:.4}, EW {:.4})",
            result.polar_moment(),
            result.polar_moment_for(DirectionGroup::NorthSouth),
            result.polar_moment_for(DirectionGroup::EastWest)
        )?;

        for group in DirectionGroup::ALL {
            let ecc = result.eccentricity(group);
            let longest = match group {
                DirectionGroup::NorthSouth => result.longest_dimension_ns_m,
                DirectionGroup::EastWest => result.longest_dimension_ew_m,
            };
            writeln!(
                f,
                "Eccentricity {} walls: e_x = {:+.3} m, e_y = {:+.3} m (accidental {:.3} m of {:.2} m)",
                group,
                ecc.e_x(),
                ecc.e_y(),
                ecc.accidental_m,
                longest
            )?;
        }

        for group in DirectionGroup::ALL {
            writeln!(f)?;
            writeln!(f, "{} walls", group.display_name())?;
            writeln!(
                f,
                "{:<10} {:>9} {:>8} {:>8} {:>9} {:>9} {:>9} {:>11}",
                "Wall", "R", "x-bar", "y-bar", "Direct", "Torsion", "Total", "Force kN"
            )?;
            let rows = result
                .walls
                .walls()
                .iter()
                .zip(&result.rigidities)
                .zip(&result.records)
                .filter(|((wall, _), _)| wall.group == group);
            for ((wall, rigidity), record) in rows {
                let force = record
                    .total_force_kn
                    .map(|kn| format!("{:.1}", kn))
                    .unwrap_or_else(|| "-".to_string());
                writeln!(
                    f,
                    "{:<10} {:>9.4} {:>+8.3} {:>+8.3} {:>9.4} {:>+9.4} {:>9.4} {:>11}",
                    record.wall_id,
                    rigidity,
                    wall.x_m - cor.x_m,
                    wall.y_m - cor.y_m,
                    record.direct_shear,
                    record.torsional_shear,
                    record.total_shear,
                    force
                )?;
            }
            if let Some(max) = result.max_total_shear(group) {
                writeln!(f, "Governing {} wall: {} ({:.4})", group, max.wall_id, max.total_shear)?;
            }
        }
        Ok(())
    }
}

struct Envelope<'a>(&'a EnvelopeResult);

impl fmt::Display for Envelope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let envelope = self.0;
        writeln!(
            f,
            "Accidental torsion envelope: {} (±{:.0}% of longest dimension)",
            envelope.positive.label,
            envelope.positive.settings.accidental_ratio * 100.0
        )?;
        writeln!(
            f,
            "{:<10} {:<5} {:>9} {:>9} {:>9} {:>4} {:>11}",
            "Wall", "Group", "Total +", "Total -", "Governs", "Sign", "Force kN"
        )?;
        let rows = envelope
            .positive
            .records
            .iter()
            .zip(&envelope.negative.records)
            .zip(&envelope.governing);
        for ((pos, neg), gov) in rows {
            let mut force = String::new();
            match gov.total_force_kn {
                Some(kn) => write!(force, "{:.1}", kn)?,
                None => force.push('-'),
            }
            writeln!(
                f,
                "{:<10} {:<5} {:>9.4} {:>9.4} {:>9.4} {:>4} {:>11}",
                gov.wall_id,
                gov.group.code(),
                pos.total_shear,
                neg.total_shear,
                gov.total_shear,
                gov.sign.symbol(),
                force
            )?;
        }
        Ok(())
    }
}
