use krishi_rakshak::core_modules::confidence::{FixedConfidence, RandomConfidence};
use krishi_rakshak::core_modules::treatment::lookup_label;
use krishi_rakshak::core_modules::utils::image_helper;
use krishi_rakshak::pipeline::{LifeStage, PestCategory};
use krishi_rakshak::{AgentConfig, AgentError, KrishiRakshak, Locale, report};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const LEAF_GREEN: [u8; 3] = [60, 160, 70];
const BLIGHT_BROWN: [u8; 3] = [150, 60, 30];

/// Writes a `side` x `side` leaf whose first `damaged` pixels are brown.
fn write_leaf(dir: &TempDir, name: &str, side: u32, damaged: usize) -> PathBuf {
    let path = dir.path().join(name);
    let total = (side * side) as usize;
    let mut buffer = Vec::with_capacity(total * 3);
    for i in 0..total {
        let color = if i < damaged { BLIGHT_BROWN } else { LEAF_GREEN };
        buffer.extend_from_slice(&color);
    }
    image_helper::save(&path, side, side, &buffer).expect("Error Saving File.");
    path
}

fn agent() -> KrishiRakshak<FixedConfidence> {
    KrishiRakshak::new(AgentConfig::default(), FixedConfidence::new(0.75))
}

#[test]
fn early_infestation_with_successful_treatment() {
    let dir = tempfile::tempdir().unwrap();
    let before = write_leaf(&dir, "before.png", 20, 40); // 40 / 400 = 0.10
    let after = write_leaf(&dir, "after.png", 20, 8); // 8 / 400 = 0.02

    let report = agent().run(&before, Some(&after), Locale::En).unwrap();

    assert_eq!(report.diagnosis.pest_category, PestCategory::EarlyLeafMiner);
    assert_eq!(report.diagnosis.life_stage, LifeStage::Early);
    assert_eq!(report.diagnosis.severity, 0.1);
    assert_eq!(report.diagnosis.confidence, 0.75);
    assert_eq!(report.treatment.title, "Neem Oil Spray");

    let after_report = report.diagnosis_after.unwrap();
    assert_eq!(after_report.pest_category, PestCategory::None);
    assert_eq!(after_report.life_stage, LifeStage::NotApplicable);

    let tracking = report.tracking.unwrap();
    assert_eq!(tracking.severity_reduction, 0.08);
    // (0.08 * 0.8 - 0.10 * 0.5) * 100
    assert_eq!(tracking.estimated_yield_change_percent, 1.4);
}

#[test]
fn missing_before_image_returns_only_the_error() {
    let dir = tempfile::tempdir().unwrap();
    let after = write_leaf(&dir, "after.png", 4, 0);
    let missing = dir.path().join("missing.png");

    let error = agent().run(&missing, Some(&after), Locale::En).unwrap_err();
    assert!(matches!(&error, AgentError::ImageNotFound(path) if path == &missing));

    let value: serde_json::Value = serde_json::from_str(&report::to_json(&error).unwrap()).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert!(object.get("treatment").is_none());
    assert!(object.get("guidance").is_none());
}

#[test]
fn unreadable_after_image_keeps_the_diagnosis() {
    let dir = tempfile::tempdir().unwrap();
    let before = write_leaf(&dir, "before.png", 10, 100);
    let after = dir.path().join("after.png");
    std::fs::write(&after, b"\x89PNG truncated").unwrap();

    let report = agent().run(&before, Some(&after), Locale::Kn).unwrap();
    assert_eq!(report.diagnosis.pest_category, PestCategory::SevereInfestation);
    assert!(report.diagnosis_after.is_none());
    assert!(report.tracking.is_none());
    assert!(report.guidance.contains("ಬಳಸಿ"));
}

#[test]
fn missing_after_image_is_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let before = write_leaf(&dir, "before.png", 10, 0);
    let report = agent()
        .run(&before, Some(Path::new("/no/such/after.png")), Locale::Hi)
        .unwrap();
    assert_eq!(report.treatment.title, "लहसुन-मिर्च छिड़काव");
    assert!(report.tracking.is_none());
}

#[test]
fn unknown_locale_code_matches_english_byte_for_byte() {
    let english = lookup_label("Early leaf miner or minor chewing pest", "en");
    let unknown = lookup_label("Early leaf miner or minor chewing pest", "zz");
    assert_eq!(english, unknown);

    let dir = tempfile::tempdir().unwrap();
    let before = write_leaf(&dir, "before.png", 10, 10);
    let en = agent().run(&before, None, Locale::from_code("en")).unwrap();
    let zz = agent().run(&before, None, Locale::from_code("zz")).unwrap();
    assert_eq!(en.guidance, zz.guidance);
    assert_eq!(en.treatment, zz.treatment);
}

#[test]
fn random_confidence_is_always_in_range() {
    let dir = tempfile::tempdir().unwrap();
    let before = write_leaf(&dir, "before.png", 6, 3);
    let mut agent = KrishiRakshak::new(AgentConfig::default(), RandomConfidence::seeded(11));
    for _ in 0..25 {
        let report = agent.run(&before, None, Locale::En).unwrap();
        let confidence = report.diagnosis.confidence;
        assert!((0.5..=0.9).contains(&confidence));
        assert_eq!((confidence * 100.0).round() / 100.0, confidence);
    }
}

#[test]
fn default_agent_runs_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let before = write_leaf(&dir, "before.png", 8, 64);
    let report = KrishiRakshak::with_defaults()
        .run(&before, None, Locale::En)
        .unwrap();
    let text = report::to_text(&report);
    assert!(text.starts_with("diagnosis:\n"));
    assert!(text.contains("severity: 1.000"));
}
