// Renders a treatment record as the single instruction line read out to the farmer.
// Each language gets its own sentence order; the record text is inserted verbatim.

use crate::core_modules::locale::Locale;
use crate::core_modules::treatment::TreatmentRecord;

/// One-sentence guidance for `record` in `locale`. Never fails.
pub fn format(record: &TreatmentRecord, locale: Locale) -> String {
    let TreatmentRecord {
        title,
        details,
        notes,
        ..
    } = record;
    match locale {
        Locale::En => format!("Apply {title} — {details} (Note: {notes})"),
        Locale::Hi => format!("{title} का प्रयोग करें — {details} (ध्यान दें: {notes})"),
        Locale::Kn => format!("{title} ಬಳಸಿ — {details} (ಗಮನಿಸಿ: {notes})"),
    }
}
