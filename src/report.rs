//! Rendering of agent results for people and for other programs.

use crate::core_modules::severity::SeverityReport;
use crate::pipeline::AgentReport;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fmt::{self, Write as _};

/// Pretty JSON with four-space indentation. Non-ASCII text is written as-is.
pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only ever writes valid UTF-8.
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Indented key-value rendering of a full report.
pub fn to_text(report: &AgentReport) -> String {
    let mut out = String::new();
    // Writing into a `String` cannot fail.
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut impl fmt::Write, report: &AgentReport) -> fmt::Result {
    write_diagnosis(out, "diagnosis", &report.diagnosis)?;

    let treatment = &report.treatment;
    writeln!(out, "treatment:")?;
    writeln!(out, "  title: {}", treatment.title)?;
    writeln!(out, "  details: {}", treatment.details)?;
    writeln!(out, "  category: {}", treatment.category)?;
    writeln!(out, "  notes: {}", treatment.notes)?;
    writeln!(out, "guidance: {}", report.guidance)?;

    match &report.diagnosis_after {
        Some(after) => write_diagnosis(out, "diagnosisAfter", after)?,
        None => writeln!(out, "diagnosisAfter: none")?,
    }
    match &report.tracking {
        Some(tracking) => {
            writeln!(out, "tracking:")?;
            writeln!(out, "  severityReduction: {:.3}", tracking.severity_reduction)?;
            writeln!(
                out,
                "  estimatedYieldChangePercent: {:.2}",
                tracking.estimated_yield_change_percent
            )?;
        }
        None => writeln!(out, "tracking: none")?,
    }
    Ok(())
}

fn write_diagnosis(out: &mut impl fmt::Write, heading: &str, diagnosis: &SeverityReport) -> fmt::Result {
    let counts = &diagnosis.pixel_counts;
    writeln!(out, "{heading}:")?;
    writeln!(out, "  pest: {}", diagnosis.pest_category)?;
    writeln!(out, "  lifeStage: {}", diagnosis.life_stage)?;
    writeln!(out, "  confidence: {:.2}", diagnosis.confidence)?;
    writeln!(out, "  severity: {:.3}", diagnosis.severity)?;
    writeln!(
        out,
        "  pixelCounts: total={} brown={} dark={}",
        counts.total, counts.brown, counts.dark
    )
}
