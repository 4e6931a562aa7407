// THEORY:
// The `pipeline` module is the top-level API of the agent. It sequences the core
// modules for one invocation: estimate severity on the "before" image, pick and
// localize a treatment, render guidance, and, when an "after" image is supplied,
// estimate it too and score the treatment's effectiveness.
//
// Failure policy:
// - A failure on the before image ends the run immediately with that error. No
//   treatment or tracking is attempted.
// - A failure on the after image is tolerated. The report is returned without the
//   after diagnosis and without tracking.
//
// The orchestrator holds no state beyond its estimator, so separate instances can be
// run side by side on unrelated images.

use crate::core_modules::confidence::{ConfidenceSource, RandomConfidence};
use crate::core_modules::effectiveness::{self, EffectivenessReport};
use crate::core_modules::guidance;
use crate::core_modules::locale::Locale;
use crate::core_modules::pixel_grid::PixelGrid;
use crate::core_modules::severity::{EstimatorConfig, SeverityEstimator, SeverityReport};
use crate::core_modules::treatment::{self, TreatmentKind, TreatmentRecord};
use crate::core_modules::utils::image_helper;
use crate::error::AgentError;
use rand::rngs::ThreadRng;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

// Re-export key data structures for the public API.
pub use crate::core_modules::severity::{LifeStage, PestCategory, PixelCounts};

/// Configuration for the agent.
#[derive(Debug, Clone, Default)]
pub struct AgentConfig {
    pub estimator: EstimatorConfig,
}

/// Everything one invocation produces.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentReport {
    pub diagnosis: SeverityReport,
    pub treatment: TreatmentRecord,
    pub guidance: String,
    pub diagnosis_after: Option<SeverityReport>,
    pub tracking: Option<EffectivenessReport>,
}

/// The main, top-level struct for the agent.
pub struct KrishiRakshak<C: ConfidenceSource> {
    estimator: SeverityEstimator<C>,
}

impl KrishiRakshak<RandomConfidence<ThreadRng>> {
    /// Default thresholds with the thread-local placeholder confidence.
    pub fn with_defaults() -> Self {
        Self::new(AgentConfig::default(), RandomConfidence::new())
    }
}

impl<C: ConfidenceSource> KrishiRakshak<C> {
    pub fn new(config: AgentConfig, confidence_source: C) -> Self {
        Self {
            estimator: SeverityEstimator::new(config.estimator, confidence_source),
        }
    }

    /// Loads and analyzes the images at the given paths.
    pub fn run(
        &mut self,
        before_path: &Path,
        after_path: Option<&Path>,
        locale: Locale,
    ) -> Result<AgentReport, AgentError> {
        self.run_with_loader(image_helper::load, before_path, after_path, locale)
    }

    /// Like `run`, with `load` standing in for the image loader. The after image is
    /// only requested once the before image has been diagnosed.
    pub fn run_with_loader<L>(
        &mut self,
        mut load: L,
        before_path: &Path,
        after_path: Option<&Path>,
        locale: Locale,
    ) -> Result<AgentReport, AgentError>
    where
        L: FnMut(&Path) -> Result<PixelGrid, AgentError>,
    {
        info!(before = %before_path.display(), %locale, "diagnosing before image");
        let diagnosis = self.estimator.estimate(&load(before_path)?)?;

        let diagnosis_after = after_path.and_then(|path| {
            let estimated = load(path).and_then(|grid| self.estimator.estimate(&grid));
            match estimated {
                Ok(report) => Some(report),
                Err(error) => {
                    warn!(%error, "after image unavailable, skipping effectiveness tracking");
                    None
                }
            }
        });

        assemble(diagnosis, diagnosis_after, locale)
    }

    /// Analyzes already decoded grids.
    pub fn run_on_grids(
        &mut self,
        before: &PixelGrid,
        after: Option<&PixelGrid>,
        locale: Locale,
    ) -> Result<AgentReport, AgentError> {
        // Stage 1: Diagnosis
        let diagnosis = self.estimator.estimate(before)?;

        // Stage 2: Optional follow-up diagnosis
        let diagnosis_after = after.and_then(|grid| match self.estimator.estimate(grid) {
            Ok(report) => Some(report),
            Err(error) => {
                warn!(%error, "after image rejected, skipping effectiveness tracking");
                None
            }
        });

        assemble(diagnosis, diagnosis_after, locale)
    }
}

/// Treatment, guidance and effectiveness for an already diagnosed before image.
fn assemble(
    diagnosis: SeverityReport,
    diagnosis_after: Option<SeverityReport>,
    locale: Locale,
) -> Result<AgentReport, AgentError> {
    let kind = TreatmentKind::from(diagnosis.pest_category);
    let treatment = *treatment::lookup(kind, locale);
    let guidance = guidance::format(&treatment, locale);
    info!(category = ?diagnosis.pest_category, ?kind, "selected treatment");

    let tracking = match diagnosis_after.as_ref() {
        Some(after_report) => Some(effectiveness::track(Some(&diagnosis), Some(after_report))?),
        None => None,
    };

    Ok(AgentReport {
        diagnosis,
        treatment,
        guidance,
        diagnosis_after,
        tracking,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::confidence::FixedConfidence;
    use crate::core_modules::pixel::pixel::Pixel;

    fn agent() -> KrishiRakshak<FixedConfidence> {
        KrishiRakshak::new(AgentConfig::default(), FixedConfidence::new(0.8))
    }

    fn black() -> PixelGrid {
        PixelGrid::filled(10, 10, Pixel::new(0, 0, 0))
    }

    fn white() -> PixelGrid {
        PixelGrid::filled(10, 10, Pixel::new(255, 255, 255))
    }

    #[test]
    fn severe_image_gets_neem_oil() {
        let report = agent().run_on_grids(&black(), None, Locale::En).unwrap();
        assert_eq!(report.diagnosis.pest_category, PestCategory::SevereInfestation);
        assert_eq!(report.treatment.title, "Neem Oil Spray");
        assert!(report.guidance.starts_with("Apply Neem Oil Spray"));
        assert!(report.diagnosis_after.is_none());
        assert!(report.tracking.is_none());
    }

    #[test]
    fn healthy_image_gets_default_remedy() {
        let report = agent().run_on_grids(&white(), None, Locale::Kn).unwrap();
        assert_eq!(report.diagnosis.pest_category, PestCategory::None);
        assert_eq!(report.treatment.title, "ಬೆಳ್ಳುಳ್ಳಿ-ಮೆಣಸಿನ ಸಿಂಪಡಣೆ");
    }

    #[test]
    fn after_image_adds_tracking() {
        let report = agent().run_on_grids(&black(), Some(&white()), Locale::En).unwrap();
        let after = report.diagnosis_after.unwrap();
        assert_eq!(after.severity, 0.0);
        let tracking = report.tracking.unwrap();
        assert_eq!(tracking.severity_reduction, 1.0);
        assert_eq!(tracking.estimated_yield_change_percent, 30.0);
    }

    #[test]
    fn rejected_before_image_short_circuits() {
        let bad = PixelGrid::new(1, 1, 1, vec![0]).unwrap();
        let error = agent().run_on_grids(&bad, Some(&white()), Locale::En).unwrap_err();
        assert_eq!(error.kind(), "ImageFormatError");
    }

    #[test]
    fn rejected_after_image_drops_tracking_only() {
        let bad = PixelGrid::new(1, 1, 4, vec![0; 4]).unwrap();
        let report = agent().run_on_grids(&black(), Some(&bad), Locale::Hi).unwrap();
        assert!(report.diagnosis_after.is_none());
        assert!(report.tracking.is_none());
        assert_eq!(report.treatment.title, "नीम तेल छिड़काव");
    }

    #[test]
    fn after_image_is_not_loaded_when_before_is_rejected() {
        let mut requested = Vec::new();
        let loader = |path: &Path| {
            requested.push(path.to_path_buf());
            PixelGrid::new(1, 1, 4, vec![0; 4])
        };
        let error = agent()
            .run_with_loader(loader, Path::new("before.jpg"), Some(Path::new("after.jpg")), Locale::En)
            .unwrap_err();
        assert_eq!(error.kind(), "ImageFormatError");
        assert_eq!(requested, vec![Path::new("before.jpg").to_path_buf()]);
    }

    #[test]
    fn loader_failure_on_after_image_drops_tracking_only() {
        let loader = |path: &Path| {
            if path == Path::new("before.jpg") {
                Ok(black())
            } else {
                Err(AgentError::ImageNotFound(path.to_path_buf()))
            }
        };
        let report = agent()
            .run_with_loader(loader, Path::new("before.jpg"), Some(Path::new("after.jpg")), Locale::En)
            .unwrap();
        assert_eq!(report.diagnosis.pest_category, PestCategory::SevereInfestation);
        assert!(report.diagnosis_after.is_none());
        assert!(report.tracking.is_none());
    }

    #[test]
    fn missing_before_path_is_the_whole_result() {
        let dir = tempfile::tempdir().unwrap();
        let error = agent()
            .run(&dir.path().join("before.jpg"), None, Locale::En)
            .unwrap_err();
        assert!(matches!(error, AgentError::ImageNotFound(_)));
    }

    #[test]
    fn serialized_report_uses_expected_sections() {
        let report = agent().run_on_grids(&black(), None, Locale::En).unwrap();
        let value = serde_json::to_value(&report).unwrap();
        for key in ["diagnosis", "treatment", "guidance", "diagnosisAfter", "tracking"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert!(value["tracking"].is_null());
        assert_eq!(value["treatment"]["category"], "bio-pesticide");
    }
}
