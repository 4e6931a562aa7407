// THEORY:
// The treatment catalog is static, read-only data: one natural remedy per treatment
// kind, written out in each supported language. It is stored as a flat table keyed by
// `(TreatmentKind, Locale)` rather than nested maps. The English records are also
// named constants, so the fallback for a missing row is total by construction.
//
// The estimator produces a `PestCategory` directly, and `From<PestCategory>` picks the
// remedy. Free-form labels (for example from an external classifier) still go through
// `TreatmentKind::from_label`, a case-insensitive keyword match where anything
// unrecognized falls through to the general-purpose garlic-chili spray.

use crate::core_modules::locale::Locale;
use crate::core_modules::severity::PestCategory;
use serde::Serialize;

/// Which remedy to recommend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreatmentKind {
    /// Neem oil spray, for leaf miners.
    NeemOil,
    /// Bacillus thuringiensis spray, for caterpillars.
    BtSpray,
    /// Garlic-chili spray, the general default.
    GarlicChili,
}

impl TreatmentKind {
    pub const ALL: [TreatmentKind; 3] = [
        TreatmentKind::NeemOil,
        TreatmentKind::BtSpray,
        TreatmentKind::GarlicChili,
    ];

    /// Keyword dispatch over a free-form pest label. Never fails.
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("leaf miner") {
            TreatmentKind::NeemOil
        } else if label.contains("caterpillar") {
            TreatmentKind::BtSpray
        } else {
            TreatmentKind::GarlicChili
        }
    }
}

impl From<PestCategory> for TreatmentKind {
    fn from(category: PestCategory) -> Self {
        match category {
            PestCategory::None => TreatmentKind::GarlicChili,
            // Leaf miner damage dominates a severe infestation, so it keeps the neem remedy.
            PestCategory::EarlyLeafMiner | PestCategory::SevereInfestation => TreatmentKind::NeemOil,
        }
    }
}

/// A remedy written in one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreatmentRecord {
    pub title: &'static str,
    pub details: &'static str,
    pub category: &'static str,
    pub notes: &'static str,
}

pub type CatalogRow = (TreatmentKind, Locale, TreatmentRecord);

const NEEM_OIL_EN: TreatmentRecord = TreatmentRecord {
    title: "Neem Oil Spray",
    details: "Mix 50 ml neem oil + 5 g soap in 1L water; spray every 7 days.",
    category: "bio-pesticide",
    notes: "Targets larvae without harming beneficial insects.",
};

const BT_SPRAY_EN: TreatmentRecord = TreatmentRecord {
    title: "Bt Spray (Bacillus thuringiensis)",
    details: "Dilute 2g Bt powder per liter; apply in evening hours.",
    category: "microbial pesticide",
    notes: "Highly specific and environmentally safe.",
};

const GARLIC_CHILI_EN: TreatmentRecord = TreatmentRecord {
    title: "Garlic-Chili Spray",
    details: "Crush 50g garlic + 20g green chili in 1L water, filter & spray.",
    category: "natural repellent",
    notes: "Effective against early-stage chewing pests.",
};

pub static CATALOG: [CatalogRow; 9] = [
    (TreatmentKind::NeemOil, Locale::En, NEEM_OIL_EN),
    (
        TreatmentKind::NeemOil,
        Locale::Hi,
        TreatmentRecord {
            title: "नीम तेल छिड़काव",
            details: "50 मिली नीम तेल + 5 ग्राम साबुन को 1 लीटर पानी में मिलाएं; हर 7 दिन में छिड़काव करें।",
            category: "जैव कीटनाशक",
            notes: "लार्वा को निशाना बनाता है और लाभदायक कीड़ों को नुकसान नहीं पहुंचाता।",
        },
    ),
    (
        TreatmentKind::NeemOil,
        Locale::Kn,
        TreatmentRecord {
            title: "ನೀಮ್ ಎಣ್ಣೆ ಸಿಂಪಡಣೆ",
            details: "50 ಮಿ.ಲೀ. ನೀಮ್ ಎಣ್ಣೆ + 5 ಗ್ರಾಂ ಸಾಬೂನು 1 ಲೀಟರ್ ನೀರಿನಲ್ಲಿ ಮಿಶ್ರಣಿಸಿ; ಪ್ರತಿ 7 ದಿನಗಳಿಗೊಮ್ಮೆ ಸಿಂಪಡಿಸಿ.",
            category: "ಜೈವ ಕೀಟನಾಶಕ",
            notes: "ಉಪಯುಕ್ತ ಕೀಟಗಳಿಗೆ ಹಾನಿ ಮಾಡದೆ ಲಾರ್ವಾಗಳನ್ನು ಗುರಿಯಾಗಿಸುತ್ತದೆ.",
        },
    ),
    (TreatmentKind::BtSpray, Locale::En, BT_SPRAY_EN),
    (
        TreatmentKind::BtSpray,
        Locale::Hi,
        TreatmentRecord {
            title: "बीटी छिड़काव (बैसिलस थ्यूरिनजेंसिस)",
            details: "प्रति लीटर 2 ग्राम बीटी पाउडर घोलें; शाम के समय छिड़काव करें।",
            category: "सूक्ष्मजीव कीटनाशक",
            notes: "अत्यधिक विशिष्ट और पर्यावरण के लिए सुरक्षित।",
        },
    ),
    (
        TreatmentKind::BtSpray,
        Locale::Kn,
        TreatmentRecord {
            title: "ಬಿ.ಟಿ. ಸಿಂಪಡಣೆ (Bacillus thuringiensis)",
            details: "ಪ್ರತಿ ಲೀಟರ್‌ಗೆ 2 ಗ್ರಾಂ ಬಿ.ಟಿ. ಪುಡಿ ಕರಗಿಸಿ; ಸಂಜೆ ಸಮಯದಲ್ಲಿ ಅನ್ವಯಿಸಿ.",
            category: "ಸೂಕ್ಷ್ಮಾಣು ಕೀಟನಾಶಕ",
            notes: "ಬಹಳ ನಿಖರವಾದ ಮತ್ತು ಪರಿಸರಕ್ಕೆ ಸುರಕ್ಷಿತ.",
        },
    ),
    (TreatmentKind::GarlicChili, Locale::En, GARLIC_CHILI_EN),
    (
        TreatmentKind::GarlicChili,
        Locale::Hi,
        TreatmentRecord {
            title: "लहसुन-मिर्च छिड़काव",
            details: "50 ग्राम लहसुन और 20 ग्राम हरी मिर्च को 1 लीटर पानी में पीसकर छानें और छिड़कें।",
            category: "प्राकृतिक कीट प्रतिरोधक",
            notes: "प्रारंभिक चरण के कीटों के खिलाफ प्रभावी।",
        },
    ),
    (
        TreatmentKind::GarlicChili,
        Locale::Kn,
        TreatmentRecord {
            title: "ಬೆಳ್ಳುಳ್ಳಿ-ಮೆಣಸಿನ ಸಿಂಪಡಣೆ",
            details: "50 ಗ್ರಾಂ ಬೆಳ್ಳುಳ್ಳಿ ಮತ್ತು 20 ಗ್ರಾಂ ಹಸಿಮೆಣಸನ್ನು 1 ಲೀಟರ್ ನೀರಿನಲ್ಲಿ ರುಬ್ಬಿ ಶೋಧಿಸಿ ಸಿಂಪಡಿಸಿ.",
            category: "ಸಹಜ ಕೀಟ ಪ್ರತಿರೋಧಕ",
            notes: "ಆರಂಭಿಕ ಹಂತದ ಕೀಟಗಳ ವಿರುದ್ಧ ಪರಿಣಾಮಕಾರಿ.",
        },
    ),
];

/// The English record for `kind`, present for every kind.
fn english(kind: TreatmentKind) -> &'static TreatmentRecord {
    match kind {
        TreatmentKind::NeemOil => &NEEM_OIL_EN,
        TreatmentKind::BtSpray => &BT_SPRAY_EN,
        TreatmentKind::GarlicChili => &GARLIC_CHILI_EN,
    }
}

/// Exact row if present, otherwise the English record for the same kind.
fn lookup_in(table: &'static [CatalogRow], kind: TreatmentKind, locale: Locale) -> &'static TreatmentRecord {
    table
        .iter()
        .find(|(k, l, _)| *k == kind && *l == locale)
        .map(|(_, _, record)| record)
        .unwrap_or_else(|| english(kind))
}

/// The remedy for `kind` in `locale`, falling back to English.
pub fn lookup(kind: TreatmentKind, locale: Locale) -> &'static TreatmentRecord {
    lookup_in(&CATALOG, kind, locale)
}

/// Keyword dispatch plus locale-code parsing, for free-form inputs.
pub fn lookup_label(label: &str, locale_code: &str) -> &'static TreatmentRecord {
    lookup(TreatmentKind::from_label(label), Locale::from_code(locale_code))
}

/// Keyword dispatch for free-form labels, in the default language.
pub fn lookup_label_default(label: &str) -> &'static TreatmentRecord {
    lookup(TreatmentKind::from_label(label), Locale::default())
}
