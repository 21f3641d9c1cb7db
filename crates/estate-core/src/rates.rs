//! Currency rate table and price formatting.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Error, Result};

/// Conversion factors relative to one reference currency.
///
/// `rates[base]` is always 1. A table is never patched in place: refreshes
/// build a new table and replace the old one as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateTable {
    pub base: String,
    pub rates: BTreeMap<String, f64>,
    pub updated_at: DateTime<Utc>,
    /// Set when the table holds pinned approximate factors instead of live data.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
}

impl RateTable {
    /// Build a table, normalizing codes, dropping unusable factors and pinning
    /// the base factor to 1.
    pub fn new(
        base: &str,
        rates: impl IntoIterator<Item = (String, f64)>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let base = normalize_currency(base);
        let mut rates: BTreeMap<String, f64> = rates
            .into_iter()
            .filter(|(_, factor)| factor.is_finite() && *factor > 0.0)
            .map(|(code, factor)| (normalize_currency(&code), factor))
            .collect();
        rates.insert(base.clone(), 1.0);

        Self {
            base,
            rates,
            updated_at,
            fallback: false,
        }
    }

    /// Static table used when the rate source is unavailable.
    pub fn fallback() -> Self {
        let mut table = Self::new(
            defaults::BASE_CURRENCY,
            defaults::FALLBACK_RATES
                .iter()
                .map(|(code, factor)| (code.to_string(), *factor)),
            Utc::now(),
        );
        table.fallback = true;
        table
    }

    /// Factor for `currency`, if known.
    pub fn factor(&self, currency: &str) -> Option<f64> {
        self.rates.get(&normalize_currency(currency)).copied()
    }

    /// Convert an amount in the base currency. Unknown targets use factor 1.
    pub fn convert(&self, amount: f64, target: &str) -> f64 {
        amount * self.factor(target).unwrap_or(1.0)
    }

    /// Convert between two known currencies via the base.
    pub fn convert_between(&self, amount: f64, from: &str, to: &str) -> Result<f64> {
        let from_factor = self.require(from)?;
        let to_factor = self.require(to)?;
        Ok(amount / from_factor * to_factor)
    }

    /// Supported currency codes, sorted.
    pub fn currencies(&self) -> Vec<&str> {
        self.rates.keys().map(String::as_str).collect()
    }

    fn require(&self, currency: &str) -> Result<f64> {
        self.factor(currency).ok_or_else(|| {
            Error::UnsupportedValue(format!(
                "unsupported currency '{}'. Supported: {}",
                currency.trim(),
                self.currencies().join(", ")
            ))
        })
    }
}

/// Canonical form of a currency code (trimmed, upper-case).
pub fn normalize_currency(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Render a price in whole units with thousands separators.
///
/// Known currencies get a leading symbol (`€250,000`); other codes are
/// appended (`250,000 CHF`).
pub fn format_price(amount: f64, currency: &str) -> String {
    let code = normalize_currency(currency);
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match currency_symbol(&code) {
        Some(symbol) => format!("{}{}{}", sign, symbol, grouped),
        None => format!("{}{} {}", sign, grouped, code),
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "EUR" => Some("€"),
        "USD" => Some("$"),
        "GBP" => Some("£"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RateTable {
        RateTable::new(
            "eur",
            vec![("usd".to_string(), 1.1), ("GBP".to_string(), 0.85)],
            Utc::now(),
        )
    }

    #[test]
    fn test_base_pinned_to_one() {
        let t = RateTable::new("EUR", vec![("EUR".to_string(), 0.5)], Utc::now());
        assert_eq!(t.factor("EUR"), Some(1.0));
    }

    #[test]
    fn test_codes_normalized() {
        let t = table();
        assert_eq!(t.base, "EUR");
        assert_eq!(t.factor("USD"), Some(1.1));
        assert_eq!(t.factor(" usd "), Some(1.1));
    }

    #[test]
    fn test_invalid_factors_dropped() {
        let t = RateTable::new(
            "EUR",
            vec![
                ("ABC".to_string(), f64::NAN),
                ("DEF".to_string(), 0.0),
                ("GHI".to_string(), -2.0),
            ],
            Utc::now(),
        );
        assert_eq!(t.currencies(), vec!["EUR"]);
    }

    #[test]
    fn test_convert_to_base_is_identity() {
        let t = table();
        for x in [0.0, 1.0, 99.99, 250_000.0] {
            assert_eq!(t.convert(x, "EUR"), x);
        }
    }

    #[test]
    fn test_convert_unknown_target_uses_factor_one() {
        assert_eq!(table().convert(1000.0, "JPY"), 1000.0);
    }

    #[test]
    fn test_convert_between() {
        let t = table();
        let usd = t.convert_between(110.0, "USD", "EUR").unwrap();
        assert!((usd - 100.0).abs() < 1e-9);

        let err = t.convert_between(1.0, "USD", "XYZ").unwrap_err();
        assert!(matches!(err, Error::UnsupportedValue(_)));
        assert!(err.to_string().contains("EUR, GBP, USD"));
    }

    #[test]
    fn test_fallback_table_flagged() {
        let t = RateTable::fallback();
        assert!(t.fallback);
        assert_eq!(t.base, "EUR");
        assert_eq!(t.factor("USD"), Some(1.08));
    }

    #[test]
    fn test_fallback_flag_only_serialized_when_set() {
        let live = serde_json::to_value(table()).unwrap();
        assert!(live.get("fallback").is_none());
        assert!(live.get("updatedAt").is_some());

        let fallback = serde_json::to_value(RateTable::fallback()).unwrap();
        assert_eq!(fallback["fallback"], true);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(250_000.0, "EUR"), "€250,000");
        assert_eq!(format_price(1_234_567.4, "usd"), "$1,234,567");
        assert_eq!(format_price(999.0, "GBP"), "£999");
        assert_eq!(format_price(1000.0, "CHF"), "1,000 CHF");
        assert_eq!(format_price(0.0, "EUR"), "€0");
    }
}
