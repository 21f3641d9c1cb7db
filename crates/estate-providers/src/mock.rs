//! Mock providers for deterministic testing.
//!
//! Every mock records its calls so tests can assert how often the remote
//! side was reached, and can be switched into a failing state.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use estate_providers::mock::MockTranslationBackend;
//!
//! let backend = MockTranslationBackend::new();
//! let text = backend.translate("Villa", Language::English, Language::Greek).await?;
//! assert_eq!(text, "[el] Villa");
//! assert_eq!(backend.call_count(), 1);
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use estate_core::{
    Error, Language, RateSource, RateTable, Result, Translated, TranslationBackend, Translator,
};

/// Shared call counter and failure switch.
#[derive(Debug, Default)]
struct CallLog {
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl CallLog {
    fn record(&self, what: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Upstream(format!("simulated {} failure", what)));
        }
        Ok(())
    }
}

/// Deterministic output used by the translation mocks.
pub fn mock_translation(text: &str, target: Language) -> String {
    format!("[{}] {}", target.code(), text)
}

// =============================================================================
// RATES
// =============================================================================

/// Rate source returning a configurable table.
#[derive(Debug)]
pub struct MockRateSource {
    table: Mutex<RateTable>,
    log: CallLog,
}

impl MockRateSource {
    /// EUR-based table with USD 1.10 and GBP 0.85.
    pub fn new() -> Self {
        Self::with_table(RateTable::new(
            "EUR",
            [("USD".to_string(), 1.10), ("GBP".to_string(), 0.85)],
            Utc::now(),
        ))
    }

    pub fn with_table(table: RateTable) -> Self {
        Self {
            table: Mutex::new(table),
            log: CallLog::default(),
        }
    }

    /// Serve `table` on subsequent fetches.
    pub fn set_table(&self, table: RateTable) {
        *self.table.lock().unwrap() = table;
    }

    pub fn set_failing(&self, failing: bool) {
        self.log.failing.store(failing, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.log.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockRateSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateSource for MockRateSource {
    async fn fetch_rates(&self) -> Result<RateTable> {
        self.log.record("rate source")?;
        Ok(self.table.lock().unwrap().clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

// =============================================================================
// TRANSLATION
// =============================================================================

/// Translation backend producing `[code] text`.
#[derive(Debug, Default)]
pub struct MockTranslationBackend {
    log: CallLog,
}

impl MockTranslationBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.log.failing.store(failing, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.log.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationBackend for MockTranslationBackend {
    async fn translate(&self, text: &str, _source: Language, target: Language) -> Result<String> {
        self.log.record("translation backend")?;
        Ok(mock_translation(text, target))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Translator standing in for the translation endpoint.
#[derive(Debug, Default)]
pub struct MockTranslator {
    log: CallLog,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.log.failing.store(failing, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.log.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<Translated> {
        self.log.record("translation endpoint")?;
        Ok(Translated {
            translation: mock_translation(text, target),
            cached: false,
            language: target,
        })
    }
}
