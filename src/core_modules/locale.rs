use std::fmt;
use tracing::warn;

/// Languages the treatment catalog is written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    /// English, also the fallback for anything unrecognized.
    #[default]
    En,
    /// Hindi.
    Hi,
    /// Kannada.
    Kn,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Hi, Locale::Kn];

    /// Parses a language code, falling back to English when it is empty or unknown.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "" | "en" => Locale::En,
            "hi" => Locale::Hi,
            "kn" => Locale::Kn,
            other => {
                warn!(code = other, "unknown locale, falling back to en");
                Locale::En
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Hi => "hi",
            Locale::Kn => "kn",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
