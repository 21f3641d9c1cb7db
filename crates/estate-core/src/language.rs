//! Display languages supported by the translation pipeline.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// A supported display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    English,
    Greek,
    Russian,
    Serbian,
    Bulgarian,
    German,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::English,
        Language::Greek,
        Language::Russian,
        Language::Serbian,
        Language::Bulgarian,
        Language::German,
    ];

    /// Language content is authored in. Translating into it is a no-op.
    pub const SOURCE: Language = Language::English;

    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Greek => "el",
            Language::Russian => "ru",
            Language::Serbian => "sr",
            Language::Bulgarian => "bg",
            Language::German => "de",
        }
    }

    /// Parse an ISO 639-1 code, rejecting anything outside the supported set.
    pub fn from_code(code: &str) -> Result<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| {
                Error::UnsupportedValue(format!(
                    "unsupported language '{}'. Supported: {}",
                    code,
                    Self::supported_codes().join(", ")
                ))
            })
    }

    pub fn supported_codes() -> Vec<&'static str> {
        Self::ALL.iter().map(Language::code).collect()
    }

    pub fn is_source(&self) -> bool {
        *self == Self::SOURCE
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Language::from_code(&code).map_err(serde::de::Error::custom)
    }
}
