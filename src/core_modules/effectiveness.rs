// THEORY:
// Compares a before-treatment and after-treatment severity estimate. The yield figure
// is a linear heuristic, not an agronomic model: it rewards the observed reduction
// and penalizes the damage that was already present before treatment.
//
//     reduction    = max(0, before - after)
//     yield_change = (reduction * 0.8 - before * 0.5) * 100

use crate::core_modules::severity::SeverityReport;
use crate::core_modules::utils::rounding::round_to;
use crate::error::AgentError;
use serde::Serialize;

const REDUCTION_WEIGHT: f64 = 0.8;
const BASELINE_DAMAGE_PENALTY: f64 = 0.5;
const PERCENT: f64 = 100.0;

/// Before/after comparison of two severity estimates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectivenessReport {
    /// Never negative; a worsening is reported as zero reduction.
    pub severity_reduction: f64,
    pub estimated_yield_change_percent: f64,
}

/// Derives reduction and estimated yield change. Both reports are required.
pub fn track(
    before: Option<&SeverityReport>,
    after: Option<&SeverityReport>,
) -> Result<EffectivenessReport, AgentError> {
    let before = before.ok_or(AgentError::MissingInput("before severity report"))?;
    let after = after.ok_or(AgentError::MissingInput("after severity report"))?;
    Ok(compare(before.severity, after.severity))
}

/// The scoring formula over raw severities.
pub fn compare(before: f64, after: f64) -> EffectivenessReport {
    let reduction = (before - after).max(0.0);
    let yield_change = (reduction * REDUCTION_WEIGHT - before * BASELINE_DAMAGE_PENALTY) * PERCENT;
    EffectivenessReport {
        severity_reduction: round_to(reduction, 3),
        estimated_yield_change_percent: round_to(yield_change, 2),
    }
}
