use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::discount::{DiscountPolicy, Discounts, validate_discount};
use crate::error::Result;

/// User defaults read from the optional settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Dealer discount percent used when the command line omits one.
    pub dealer_discount: f64,
    /// Grower discount percent used when the command line omits one.
    pub grower_discount: f64,
    pub discount_policy: DiscountPolicy,
    /// Unit the market price is quoted per, e.g. "bu".
    pub price_unit: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dealer_discount: 0.0,
            grower_discount: 0.0,
            discount_policy: DiscountPolicy::default(),
            price_unit: "bu".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or fall back to defaults if it does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        settings.validate()?;
        debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        validate_discount("dealer", self.dealer_discount)?;
        validate_discount("grower", self.grower_discount)?;
        Ok(())
    }

    /// Discounts from explicit overrides, falling back to these defaults.
    pub fn discounts(&self, dealer: Option<f64>, grower: Option<f64>) -> Discounts {
        Discounts::new(
            dealer.unwrap_or(self.dealer_discount),
            grower.unwrap_or(self.grower_discount),
        )
        .with_policy(self.discount_policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load("/nonexistent/seed_roi.json").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"dealer_discount": 7.5, "discount_policy": "additive"}"#)
            .unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.dealer_discount, 7.5);
        assert_eq!(settings.grower_discount, 0.0);
        assert_eq!(settings.discount_policy, DiscountPolicy::Additive);
        assert_eq!(settings.price_unit, "bu");
    }

    #[test]
    fn test_out_of_range_discount_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"grower_discount": 140}"#).unwrap();

        let err = Settings::load(file.path()).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput(_)));
    }

    #[test]
    fn test_overrides_win() {
        let settings = Settings {
            dealer_discount: 10.0,
            grower_discount: 5.0,
            ..Default::default()
        };
        let d = settings.discounts(Some(2.0), None);
        assert_eq!(d.dealer, 2.0);
        assert_eq!(d.grower, 5.0);
        assert_eq!(d.policy, DiscountPolicy::Multiplicative);
    }
}
