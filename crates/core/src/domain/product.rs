use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Electronics,
    Cosmetics,
    Pharmacy,
}

impl Category {
    pub const ALL: [Category; 4] =
        [Category::Food, Category::Electronics, Category::Cosmetics, Category::Pharmacy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Electronics => "Electronics",
            Self::Cosmetics => "Cosmetics",
            Self::Pharmacy => "Pharmacy",
        }
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| UnknownVariant(value.to_owned()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShippingType {
    Air,
    Road,
    Sea,
}

impl ShippingType {
    pub const ALL: [ShippingType; 3] = [ShippingType::Air, ShippingType::Road, ShippingType::Sea];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Air => "Air",
            Self::Road => "Road",
            Self::Sea => "Sea",
        }
    }
}

impl FromStr for ShippingType {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|shipping| shipping.as_str() == value)
            .ok_or_else(|| UnknownVariant(value.to_owned()))
    }
}

impl fmt::Display for ShippingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a category or shipping label is not one of the accepted values.
/// Matching is exact and case-sensitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

/// A product that passed validation. Only `validation::validate` builds these from
/// caller input, so every instance satisfies the weight and fragility ranges.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductRequest {
    pub name: String,
    pub weight_kg: f64,
    pub category: Category,
    pub fragility_index: f64,
    pub shipping_type: ShippingType,
}
