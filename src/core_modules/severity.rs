// THEORY:
// The `SeverityEstimator` turns one decoded farm image into a `SeverityReport`. It is
// a heuristic stand-in for a real classifier: damaged leaf tissue tends to show up as
// brown-toned or very dark pixels, so the fraction of such pixels in the frame is used
// as a proxy for how far an infestation has progressed.
//
// The scan:
// 1.  **Layout check**: exactly three channels and at least one pixel, otherwise
//     `ImageFormat`.
// 2.  **Counting**: a single pass counts "brown" pixels (red high, green and blue low)
//     and "dark" pixels (channel mean below a floor). The two predicates overlap; a
//     dark reddish pixel is counted by both.
// 3.  **Damage ratio**: `(brown + dark) / total`. Because of the overlap this can
//     exceed 1.0 on pathological images. It is left unclamped.
// 4.  **Classification**: the raw ratio is bucketed into a `PestCategory` and
//     `LifeStage` using the early and severe thresholds.
// 5.  **Confidence**: delegated to the injected `ConfidenceSource`.
//
// All thresholds live in `EstimatorConfig` so they can be tuned without touching the
// scan itself.

use crate::core_modules::confidence::{Confidence, ConfidenceSource};
use crate::core_modules::pixel::pixel::{CHANNELS, Channel, Mean, Pixel};
use crate::core_modules::pixel_grid::PixelGrid;
use crate::core_modules::utils::rounding::round_to;
use crate::error::AgentError;
use serde::Serialize;
use std::fmt;
use tracing::debug;

const SEVERITY_DECIMALS: i32 = 3;

/// Pest category inferred from the damage ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PestCategory {
    None,
    EarlyLeafMiner,
    SevereInfestation,
}

impl PestCategory {
    /// Human-readable English label.
    pub fn label(&self) -> &'static str {
        match self {
            PestCategory::None => "No significant pest",
            PestCategory::EarlyLeafMiner => "Early leaf miner or minor chewing pest",
            PestCategory::SevereInfestation => "Severe leaf miner / caterpillar infestation",
        }
    }
}

impl fmt::Display for PestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse progression of the infestation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LifeStage {
    #[serde(rename = "N/A")]
    NotApplicable,
    #[serde(rename = "early")]
    Early,
    #[serde(rename = "advanced")]
    Advanced,
}

impl fmt::Display for LifeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LifeStage::NotApplicable => "N/A",
            LifeStage::Early => "early",
            LifeStage::Advanced => "advanced",
        })
    }
}

/// Pixel tallies behind a damage ratio. `brown` and `dark` may overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PixelCounts {
    pub total: u64,
    pub brown: u64,
    pub dark: u64,
}

impl PixelCounts {
    /// `(brown + dark) / total`, unclamped.
    pub fn damage_ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.brown + self.dark) as f64 / self.total as f64
    }
}

/// The outcome of one severity estimation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityReport {
    pub pest_category: PestCategory,
    /// English label of `pest_category`, kept for readers of the serialized report.
    pub pest: &'static str,
    pub life_stage: LifeStage,
    /// Placeholder confidence, see `core_modules::confidence`.
    pub confidence: Confidence,
    /// Damage ratio rounded to three decimals.
    pub severity: f64,
    pub pixel_counts: PixelCounts,
}

/// Tunable thresholds for the damage scan.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorConfig {
    /// A brown pixel has a red channel strictly above this.
    pub brown_red_min: Channel,
    /// A brown pixel has a green channel strictly below this.
    pub brown_green_max: Channel,
    /// A brown pixel has a blue channel strictly below this.
    pub brown_blue_max: Channel,
    /// A dark pixel has a channel mean strictly below this.
    pub dark_mean_max: Mean,
    /// Damage ratios at or above this are an early infestation.
    pub early_threshold: f64,
    /// Damage ratios at or above this are a severe infestation.
    pub severe_threshold: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            brown_red_min: 100,
            brown_green_max: 80,
            brown_blue_max: 60,
            dark_mean_max: 50.0,
            early_threshold: 0.05,
            severe_threshold: 0.15,
        }
    }
}

impl EstimatorConfig {
    pub fn is_brown(&self, pixel: &Pixel) -> bool {
        pixel.red > self.brown_red_min
            && pixel.green < self.brown_green_max
            && pixel.blue < self.brown_blue_max
    }

    pub fn is_dark(&self, pixel: &Pixel) -> bool {
        pixel.mean() < self.dark_mean_max
    }

    /// Buckets a raw damage ratio into a category and life stage.
    pub fn classify(&self, damage_ratio: f64) -> (PestCategory, LifeStage) {
        if damage_ratio < self.early_threshold {
            (PestCategory::None, LifeStage::NotApplicable)
        } else if damage_ratio < self.severe_threshold {
            (PestCategory::EarlyLeafMiner, LifeStage::Early)
        } else {
            (PestCategory::SevereInfestation, LifeStage::Advanced)
        }
    }
}

/// Estimates pest damage severity from pixel color statistics.
pub struct SeverityEstimator<C: ConfidenceSource> {
    config: EstimatorConfig,
    confidence_source: C,
}

impl<C: ConfidenceSource> SeverityEstimator<C> {
    pub fn new(config: EstimatorConfig, confidence_source: C) -> Self {
        Self {
            config,
            confidence_source,
        }
    }

    /// Counts brown and dark pixels in a validated grid.
    pub fn count_pixels(&self, grid: &PixelGrid) -> Result<PixelCounts, AgentError> {
        if grid.channels() != CHANNELS {
            return Err(AgentError::ImageFormat(format!(
                "expected {} channels, got {}",
                CHANNELS,
                grid.channels()
            )));
        }
        let total = grid.total_pixels();
        if total == 0 {
            return Err(AgentError::ImageFormat("image has no pixels".to_string()));
        }

        let mut counts = PixelCounts {
            total,
            ..PixelCounts::default()
        };
        for pixel in grid.pixels() {
            if self.config.is_brown(&pixel) {
                counts.brown += 1;
            }
            if self.config.is_dark(&pixel) {
                counts.dark += 1;
            }
        }
        Ok(counts)
    }

    /// Scans `grid` and produces a severity report.
    pub fn estimate(&mut self, grid: &PixelGrid) -> Result<SeverityReport, AgentError> {
        let pixel_counts = self.count_pixels(grid)?;
        let damage_ratio = pixel_counts.damage_ratio();
        let (pest_category, life_stage) = self.config.classify(damage_ratio);
        let confidence = self.confidence_source.confidence(grid);

        debug!(
            total = pixel_counts.total,
            brown = pixel_counts.brown,
            dark = pixel_counts.dark,
            damage_ratio,
            category = ?pest_category,
            "estimated severity"
        );

        Ok(SeverityReport {
            pest_category,
            pest: pest_category.label(),
            life_stage,
            confidence,
            severity: round_to(damage_ratio, SEVERITY_DECIMALS),
            pixel_counts,
        })
    }
}
