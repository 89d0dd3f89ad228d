use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::product::{Category, ShippingType};

/// Suitability reported for a shipping type the profile does not list.
pub const DEFAULT_SHIPPING_SUITABILITY: f64 = 0.0;

/// Multiplier applied for a category the profile does not list.
pub const DEFAULT_CATEGORY_BONUS: f64 = 1.0;

/// Per-shipping-type suitability in `[0, 1]`. Unlisted types read as
/// [`DEFAULT_SHIPPING_SUITABILITY`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShippingSuitability(BTreeMap<ShippingType, f64>);

impl ShippingSuitability {
    pub fn new(entries: impl IntoIterator<Item = (ShippingType, f64)>) -> Self {
        Self(entries.into_iter().collect())
    }

    pub fn get(&self, shipping_type: ShippingType) -> f64 {
        self.0.get(&shipping_type).copied().unwrap_or(DEFAULT_SHIPPING_SUITABILITY)
    }

    pub fn entries(&self) -> impl Iterator<Item = (ShippingType, f64)> + '_ {
        self.0.iter().map(|(shipping_type, value)| (*shipping_type, *value))
    }
}

/// Per-category multiplier on biodegradability and recyclability. Unlisted
/// categories read as [`DEFAULT_CATEGORY_BONUS`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryBonus(BTreeMap<Category, f64>);

impl CategoryBonus {
    pub fn new(entries: impl IntoIterator<Item = (Category, f64)>) -> Self {
        Self(entries.into_iter().collect())
    }

    pub fn get(&self, category: Category) -> f64 {
        self.0.get(&category).copied().unwrap_or(DEFAULT_CATEGORY_BONUS)
    }

    pub fn entries(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.0.iter().map(|(category, value)| (*category, *value))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialProfile {
    pub name: String,
    /// kg CO2 emitted per kg of packaged product at unit thickness.
    pub base_co2_per_kg: f64,
    pub recyclability: f64,
    pub biodegradability: f64,
    pub is_renewable: bool,
    /// Divides the cost formula; must stay strictly positive.
    pub strength_factor: f64,
    /// Heaviest product (kg) the material can carry.
    pub max_weight: f64,
    pub fragility_protection: u8,
    pub shipping_suitability: ShippingSuitability,
    pub category_bonus: CategoryBonus,
}

impl MaterialProfile {
    /// Checks the invariants every catalog entry must hold. Returns the first
    /// violated rule as a human-readable reason.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_owned());
        }
        if !self.base_co2_per_kg.is_finite() || self.base_co2_per_kg < 0.0 {
            return Err("base_co2_per_kg must be a finite value >= 0".to_owned());
        }
        for (field, value) in
            [("recyclability", self.recyclability), ("biodegradability", self.biodegradability)]
        {
            if !(0.0..=100.0).contains(&value) {
                return Err(format!("{field} must be in range 0..=100"));
            }
        }
        if !self.strength_factor.is_finite() || self.strength_factor <= 0.0 {
            return Err("strength_factor must be a finite value > 0".to_owned());
        }
        if !self.max_weight.is_finite() || self.max_weight <= 0.0 {
            return Err("max_weight must be a finite value > 0".to_owned());
        }
        for (shipping_type, value) in self.shipping_suitability.entries() {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("shipping_suitability.{shipping_type} must be in range 0..=1"));
            }
        }
        for (category, value) in self.category_bonus.entries() {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("category_bonus.{category} must be a finite value > 0"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryBonus, MaterialProfile, ShippingSuitability};
    use crate::domain::product::{Category, ShippingType};

    fn profile() -> MaterialProfile {
        MaterialProfile {
            name: "Test Board".to_owned(),
            base_co2_per_kg: 1.0,
            recyclability: 80.0,
            biodegradability: 70.0,
            is_renewable: true,
            strength_factor: 0.6,
            max_weight: 10.0,
            fragility_protection: 5,
            shipping_suitability: ShippingSuitability::new([(ShippingType::Road, 1.0)]),
            category_bonus: CategoryBonus::new([(Category::Food, 1.1)]),
        }
    }

    #[test]
    fn lookup_tables_fall_back_to_documented_defaults() {
        let material = profile();
        assert_eq!(material.shipping_suitability.get(ShippingType::Road), 1.0);
        assert_eq!(material.shipping_suitability.get(ShippingType::Sea), 0.0);
        assert_eq!(material.category_bonus.get(Category::Food), 1.1);
        assert_eq!(material.category_bonus.get(Category::Pharmacy), 1.0);
    }

    #[test]
    fn non_positive_strength_factor_violates_invariants() {
        let mut material = profile();
        material.strength_factor = 0.0;
        let reason = material.check_invariants().expect_err("zero strength must be rejected");
        assert!(reason.contains("strength_factor"));

        material.strength_factor = -0.5;
        assert!(material.check_invariants().is_err());
    }

    #[test]
    fn out_of_range_suitability_violates_invariants() {
        let mut material = profile();
        material.shipping_suitability = ShippingSuitability::new([(ShippingType::Air, 1.4)]);
        let reason = material.check_invariants().expect_err("suitability above 1 is invalid");
        assert!(reason.contains("shipping_suitability.Air"));
    }

    #[test]
    fn valid_profile_passes() {
        assert_eq!(profile().check_invariants(), Ok(()));
    }
}
