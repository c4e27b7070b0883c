//! Derivation rules: the constants the loader compares raw fields against.
//!
//! Only the constants are configurable. The set of facts and the tree
//! topology are fixed.

use serde::{Deserialize, Serialize};

use super::errors::ClassifyError;
use super::vendor::{DeliveryStatus, VendorDeliveryType};

/// Constants used when deriving facts. `Default` is the base rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivationRules {
    /// State status meaning "currently open".
    pub open_status: String,

    /// Delivery type meaning the platform's own riders deliver.
    pub own_delivery_type: String,

    /// Active schedule variation id that marks a schedule variation.
    /// Compared exactly; other ids do not count.
    pub schedule_variation_id: i32,
}

impl Default for DerivationRules {
    fn default() -> Self {
        Self {
            open_status: DeliveryStatus::Open.as_str().to_string(),
            own_delivery_type: VendorDeliveryType::OwnDelivery.as_str().to_string(),
            schedule_variation_id: 1,
        }
    }
}

impl DerivationRules {
    pub fn validate(&self) -> Result<(), ClassifyError> {
        if self.open_status.trim().is_empty() {
            return Err(ClassifyError::InvalidRules(
                "open_status must be non-empty".to_string(),
            ));
        }
        if self.own_delivery_type.trim().is_empty() {
            return Err(ClassifyError::InvalidRules(
                "own_delivery_type must be non-empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses rules from TOML. Missing keys keep their base values.
    pub fn from_toml_str(contents: &str) -> Result<Self, ClassifyError> {
        let rules: DerivationRules =
            toml::from_str(contents).map_err(|e| ClassifyError::InvalidRules(e.to_string()))?;
        rules.validate()?;
        Ok(rules)
    }
}
