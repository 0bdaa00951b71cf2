use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::constants::MAX_DISCOUNT_PERCENT;
use crate::error::{CalcError, Result};

/// How dealer and grower discounts combine.
///
/// Multiplicative: `(1 - d/100) * (1 - g/100)`.
/// Additive: `1 - (d + g)/100`, floored at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountPolicy {
    #[default]
    Multiplicative,
    Additive,
}

impl DiscountPolicy {
    /// Multiplier applied to MSRP after both discounts.
    pub fn factor(&self, dealer_discount: f64, grower_discount: f64) -> Result<f64> {
        validate_discount("dealer", dealer_discount)?;
        validate_discount("grower", grower_discount)?;

        let factor = match self {
            DiscountPolicy::Multiplicative => {
                (1.0 - dealer_discount / 100.0) * (1.0 - grower_discount / 100.0)
            }
            DiscountPolicy::Additive => (1.0 - (dealer_discount + grower_discount) / 100.0).max(0.0),
        };
        Ok(factor)
    }
}

impl fmt::Display for DiscountPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountPolicy::Multiplicative => f.write_str("multiplicative"),
            DiscountPolicy::Additive => f.write_str("additive"),
        }
    }
}

impl FromStr for DiscountPolicy {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "multiplicative" => Ok(DiscountPolicy::Multiplicative),
            "additive" => Ok(DiscountPolicy::Additive),
            other => Err(CalcError::InvalidInput(format!(
                "unknown discount policy '{}'",
                other
            ))),
        }
    }
}

/// Dealer and grower discount percentages plus the rule combining them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Discounts {
    pub dealer: f64,
    pub grower: f64,
    #[serde(default)]
    pub policy: DiscountPolicy,
}

impl Discounts {
    pub fn new(dealer: f64, grower: f64) -> Self {
        Self {
            dealer,
            grower,
            policy: DiscountPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: DiscountPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn factor(&self) -> Result<f64> {
        self.policy.factor(self.dealer, self.grower)
    }
}

/// Discount factor under the default multiplicative policy.
pub fn discount_factor(dealer_discount: f64, grower_discount: f64) -> Result<f64> {
    DiscountPolicy::default().factor(dealer_discount, grower_discount)
}

pub fn validate_discount(label: &str, percent: f64) -> Result<()> {
    if !(percent.is_finite() && (0.0..=MAX_DISCOUNT_PERCENT).contains(&percent)) {
        return Err(CalcError::InvalidInput(format!(
            "{} discount must be between 0 and 100, got {}",
            label, percent
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplicative_factor() {
        let f = discount_factor(10.0, 5.0).unwrap();
        assert!((f - 0.855).abs() < 1e-12);
    }

    #[test]
    fn test_additive_factor() {
        let f = DiscountPolicy::Additive.factor(10.0, 5.0).unwrap();
        assert!((f - 0.85).abs() < 1e-12);
    }

    #[test]
    fn test_boundaries_multiplicative() {
        let p = DiscountPolicy::Multiplicative;
        assert_eq!(p.factor(0.0, 0.0).unwrap(), 1.0);
        assert_eq!(p.factor(100.0, 0.0).unwrap(), 0.0);
        assert_eq!(p.factor(0.0, 100.0).unwrap(), 0.0);
        assert!((p.factor(50.0, 50.0).unwrap() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_boundaries_additive() {
        let p = DiscountPolicy::Additive;
        assert_eq!(p.factor(0.0, 0.0).unwrap(), 1.0);
        assert_eq!(p.factor(100.0, 0.0).unwrap(), 0.0);
        assert_eq!(p.factor(0.0, 100.0).unwrap(), 0.0);
        // Combined discounts past 100% never turn into a surcharge.
        assert_eq!(p.factor(70.0, 60.0).unwrap(), 0.0);
    }

    #[test]
    fn test_out_of_range_discount() {
        assert!(matches!(
            discount_factor(-1.0, 0.0),
            Err(CalcError::InvalidInput(_))
        ));
        assert!(matches!(
            discount_factor(0.0, 100.5),
            Err(CalcError::InvalidInput(_))
        ));
        assert!(matches!(
            discount_factor(f64::NAN, 0.0),
            Err(CalcError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "Additive".parse::<DiscountPolicy>().unwrap(),
            DiscountPolicy::Additive
        );
        assert!("compound".parse::<DiscountPolicy>().is_err());
    }
}
