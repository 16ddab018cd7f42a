//! # Settings
//!
//! Restaurant settings loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`MEZZA_*`)
//! 2. Defaults (this file)
//!
//! Settings are read-only after startup. A value that fails to parse or is
//! out of range is logged and the default is kept.

use std::path::PathBuf;

use mezza_core::validation::validate_rate_percentage;
use mezza_core::{Money, Rate, ValidationError, DEFAULT_SERVICE_PERCENT, DEFAULT_VAT_PERCENT};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Restaurant settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Printed at the top of receipts.
    pub company_name: String,

    /// Tax registration number for the e-invoicing authority.
    pub tax_number: Option<String>,

    /// Currency code (ISO 4217)
    pub currency: String,

    /// VAT as a percentage, e.g. 14 = 14%
    pub vat_rate_percent: Decimal,

    /// Service charge as a percentage, e.g. 10 = 10%
    pub service_rate_percent: Decimal,

    /// SQLite database file. `None` runs on a throwaway in-memory database.
    pub database_path: Option<PathBuf>,
}

impl Default for Settings {
    /// ## Default Values
    /// - Currency: EGP
    /// - VAT: 14%
    /// - Service: 10%
    fn default() -> Self {
        Settings {
            company_name: "Mezza Restaurant".to_string(),
            tax_number: None,
            currency: "EGP".to_string(),
            vat_rate_percent: Decimal::from(DEFAULT_VAT_PERCENT),
            service_rate_percent: Decimal::from(DEFAULT_SERVICE_PERCENT),
            database_path: None,
        }
    }
}

impl Settings {
    /// Loads settings from the process environment.
    ///
    /// ## Environment Variables
    /// - `MEZZA_COMPANY_NAME`
    /// - `MEZZA_TAX_NUMBER`
    /// - `MEZZA_CURRENCY`
    /// - `MEZZA_VAT_RATE`: percentage, e.g. "14"
    /// - `MEZZA_SERVICE_RATE`: percentage, e.g. "12.5"
    /// - `MEZZA_DATABASE_PATH`: SQLite file, e.g. "./data/mezza.db"
    pub fn from_env() -> Self {
        Settings::from_vars(|key| std::env::var(key).ok())
    }

    /// Loads settings through `lookup`, falling back to defaults.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(name) = non_blank(lookup("MEZZA_COMPANY_NAME")) {
            settings.company_name = name;
        }

        if let Some(tax_number) = non_blank(lookup("MEZZA_TAX_NUMBER")) {
            settings.tax_number = Some(tax_number);
        }

        if let Some(currency) = non_blank(lookup("MEZZA_CURRENCY")) {
            settings.currency = currency.to_uppercase();
        }

        if let Some(raw) = lookup("MEZZA_VAT_RATE") {
            if let Some(percent) = parse_percentage("MEZZA_VAT_RATE", &raw) {
                settings.vat_rate_percent = percent;
            }
        }

        if let Some(raw) = lookup("MEZZA_SERVICE_RATE") {
            if let Some(percent) = parse_percentage("MEZZA_SERVICE_RATE", &raw) {
                settings.service_rate_percent = percent;
            }
        }

        if let Some(path) = non_blank(lookup("MEZZA_DATABASE_PATH")) {
            settings.database_path = Some(PathBuf::from(path));
        }

        settings
    }

    /// The configured VAT and service rates.
    pub fn rates(&self) -> Result<(Rate, Rate), ValidationError> {
        Ok((
            Rate::from_percentage(self.vat_rate_percent)?,
            Rate::from_percentage(self.service_rate_percent)?,
        ))
    }

    /// Formats an amount for display, e.g. "EGP 24.80".
    pub fn format_amount(&self, amount: Money) -> String {
        let rounded = amount.rounded();
        if rounded.is_negative() {
            format!("-{} {}", self.currency, Money::zero() - rounded)
        } else {
            format!("{} {}", self.currency, rounded)
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_percentage(key: &str, raw: &str) -> Option<Decimal> {
    let percent = match raw.trim().parse::<Decimal>() {
        Ok(p) => p,
        Err(e) => {
            warn!(key, value = raw, error = %e, "Ignoring unparsable rate");
            return None;
        }
    };

    match validate_rate_percentage(percent) {
        Ok(()) => Some(percent),
        Err(e) => {
            warn!(key, value = raw, error = %e, "Ignoring out-of-range rate");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings_from(&[]);
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.currency, "EGP");

        let (vat, service) = settings.rates().unwrap();
        assert_eq!(vat.fraction(), dec!(0.14));
        assert_eq!(service.fraction(), dec!(0.10));
    }

    #[test]
    fn test_overrides() {
        let settings = settings_from(&[
            ("MEZZA_COMPANY_NAME", "Abou Tarek"),
            ("MEZZA_TAX_NUMBER", "123-456-789"),
            ("MEZZA_CURRENCY", "usd"),
            ("MEZZA_VAT_RATE", "5"),
            ("MEZZA_SERVICE_RATE", " 12.5 "),
            ("MEZZA_DATABASE_PATH", "/var/lib/mezza/pos.db"),
        ]);

        assert_eq!(settings.company_name, "Abou Tarek");
        assert_eq!(settings.tax_number.as_deref(), Some("123-456-789"));
        assert_eq!(settings.currency, "USD");
        assert_eq!(settings.vat_rate_percent, dec!(5));
        assert_eq!(settings.service_rate_percent, dec!(12.5));
        assert_eq!(
            settings.database_path,
            Some(PathBuf::from("/var/lib/mezza/pos.db"))
        );
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let settings = settings_from(&[
            ("MEZZA_VAT_RATE", "fourteen"),
            ("MEZZA_SERVICE_RATE", "150"),
            ("MEZZA_COMPANY_NAME", "   "),
            ("MEZZA_DATABASE_PATH", ""),
        ]);

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_negative_rate_rejected() {
        let settings = settings_from(&[("MEZZA_VAT_RATE", "-1")]);
        assert_eq!(settings.vat_rate_percent, dec!(14));
    }

    #[test]
    fn test_format_amount() {
        let settings = Settings::default();
        assert_eq!(settings.format_amount(Money::new(dec!(24.8))), "EGP 24.80");
        assert_eq!(settings.format_amount(Money::new(dec!(0.125))), "EGP 0.12");
        assert_eq!(settings.format_amount(Money::new(dec!(-3.5))), "-EGP 3.50");
    }
}
