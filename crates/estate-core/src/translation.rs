//! Translation request/response types and cache key derivation.
//!
//! Both cache tiers key entries by a bounded prefix of the source text plus
//! the target language. Two long texts sharing their first
//! [`TRANSLATION_KEY_PREFIX_CHARS`](crate::defaults::TRANSLATION_KEY_PREFIX_CHARS)
//! characters and a language map to the same entry. That bounds key size and
//! is accepted imprecision; [`CacheKeyStrategy::ContentHash`] keys on a
//! SHA-256 of the full text for callers that opt into exact keys.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::defaults;
use crate::language::Language;

/// How a cache key is derived from the source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheKeyStrategy {
    /// First N characters of the text.
    #[default]
    Prefix,
    /// SHA-256 of the whole text.
    ContentHash,
}

impl CacheKeyStrategy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "prefix" => Some(CacheKeyStrategy::Prefix),
            "hash" | "content_hash" | "content-hash" => Some(CacheKeyStrategy::ContentHash),
            _ => None,
        }
    }
}

/// Cache key for one (text, target language) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranslationKey {
    text: String,
    language: Language,
}

impl TranslationKey {
    pub fn new(text: &str, language: Language, strategy: CacheKeyStrategy) -> Self {
        let text = match strategy {
            CacheKeyStrategy::Prefix => text
                .chars()
                .take(defaults::TRANSLATION_KEY_PREFIX_CHARS)
                .collect(),
            CacheKeyStrategy::ContentHash => hex::encode(Sha256::digest(text.as_bytes())),
        };
        Self { text, language }
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

/// Result of a translation request, as returned by the translation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translated {
    pub translation: String,
    /// Whether the service-boundary cache answered the request.
    pub cached: bool,
    pub language: Language,
}

/// Returns the text unchanged when no translation is needed: blank text or a
/// target equal to the source language.
pub fn passthrough(text: &str, target: Language) -> Option<&str> {
    if text.trim().is_empty() || target.is_source() {
        Some(text)
    } else {
        None
    }
}
