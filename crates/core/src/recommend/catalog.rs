use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::domain::material::{CategoryBonus, MaterialProfile, ShippingSuitability};
use crate::domain::product::{Category, ShippingType};
use crate::errors::{CatalogError, ComputeError};

/// Static seed for the reference packaging materials.
#[derive(Debug, Clone, Copy)]
struct MaterialSeed {
    name: &'static str,
    base_co2_per_kg: f64,
    recyclability: f64,
    biodegradability: f64,
    is_renewable: bool,
    strength_factor: f64,
    max_weight: f64,
    fragility_protection: u8,
    /// Air, Road, Sea.
    shipping: [f64; 3],
    /// Food, Electronics, Cosmetics, Pharmacy.
    category: [f64; 4],
}

const MATERIAL_SEEDS: &[MaterialSeed] = &[
    MaterialSeed {
        name: "Recycled Cardboard",
        base_co2_per_kg: 1.3,
        recyclability: 88.0,
        biodegradability: 85.0,
        is_renewable: true,
        strength_factor: 0.7,
        max_weight: 15.0,
        fragility_protection: 6,
        shipping: [0.9, 1.0, 0.95],
        category: [1.1, 0.9, 0.95, 0.9],
    },
    MaterialSeed {
        name: "PLA (Polylactic Acid)",
        base_co2_per_kg: 0.7,
        recyclability: 92.0,
        biodegradability: 95.0,
        is_renewable: true,
        strength_factor: 0.85,
        max_weight: 10.0,
        fragility_protection: 8,
        shipping: [1.0, 0.95, 0.7],
        category: [1.0, 1.1, 1.15, 1.1],
    },
    MaterialSeed {
        name: "Kraft Paper",
        base_co2_per_kg: 1.1,
        recyclability: 85.0,
        biodegradability: 90.0,
        is_renewable: true,
        strength_factor: 0.5,
        max_weight: 8.0,
        fragility_protection: 4,
        shipping: [0.7, 1.0, 0.9],
        category: [1.05, 0.7, 1.0, 0.9],
    },
    MaterialSeed {
        name: "Bio-Plastic (Cornstarch)",
        base_co2_per_kg: 0.8,
        recyclability: 90.0,
        biodegradability: 98.0,
        is_renewable: true,
        strength_factor: 0.8,
        max_weight: 12.0,
        fragility_protection: 7,
        shipping: [0.95, 1.0, 0.9],
        category: [1.15, 1.0, 1.1, 1.2],
    },
    MaterialSeed {
        name: "Mushroom Packaging",
        base_co2_per_kg: 0.4,
        recyclability: 75.0,
        biodegradability: 100.0,
        is_renewable: true,
        strength_factor: 0.6,
        max_weight: 7.0,
        fragility_protection: 9,
        shipping: [0.8, 0.95, 0.6],
        category: [0.9, 1.2, 1.0, 0.95],
    },
    MaterialSeed {
        name: "Bagasse (Sugarcane Fiber)",
        base_co2_per_kg: 0.5,
        recyclability: 80.0,
        biodegradability: 95.0,
        is_renewable: true,
        strength_factor: 0.55,
        max_weight: 6.0,
        fragility_protection: 5,
        shipping: [0.75, 1.0, 0.85],
        category: [1.2, 0.8, 1.0, 1.0],
    },
];

impl MaterialSeed {
    fn to_profile(self) -> MaterialProfile {
        MaterialProfile {
            name: self.name.to_owned(),
            base_co2_per_kg: self.base_co2_per_kg,
            recyclability: self.recyclability,
            biodegradability: self.biodegradability,
            is_renewable: self.is_renewable,
            strength_factor: self.strength_factor,
            max_weight: self.max_weight,
            fragility_protection: self.fragility_protection,
            shipping_suitability: ShippingSuitability::new(
                ShippingType::ALL.into_iter().zip(self.shipping),
            ),
            category_bonus: CategoryBonus::new(Category::ALL.into_iter().zip(self.category)),
        }
    }
}

/// Immutable, ordered set of material profiles. Built once at startup and shared
/// by reference with every request; iteration order is the tie-break order for
/// ranking.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialCatalog {
    materials: Vec<MaterialProfile>,
    rejected: Vec<ComputeError>,
}

impl MaterialCatalog {
    /// Builds a catalog. Profiles that break the profile invariants are dropped
    /// and kept in [`MaterialCatalog::rejected`]; duplicate names fail the whole
    /// catalog, as does having no valid profile left.
    pub fn new(materials: Vec<MaterialProfile>) -> Result<Self, CatalogError> {
        let mut valid = Vec::with_capacity(materials.len());
        let mut rejected = Vec::new();

        for material in materials {
            match material.check_invariants() {
                Ok(()) => valid.push(material),
                Err(reason) => {
                    warn!(
                        event_name = "catalog.material.rejected",
                        correlation_id = "catalog",
                        material = %material.name,
                        reason = %reason,
                        "material profile dropped from catalog"
                    );
                    rejected.push(ComputeError::InvalidProfile { material: material.name, reason });
                }
            }
        }

        if valid.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen_names: HashSet<&str> = HashSet::new();
        for material in &valid {
            if !seen_names.insert(material.name.as_str()) {
                return Err(CatalogError::DuplicateMaterial(material.name.clone()));
            }
        }

        Ok(Self { materials: valid, rejected })
    }

    /// The six reference packaging materials.
    pub fn builtin() -> Self {
        Self {
            materials: MATERIAL_SEEDS.iter().map(|seed| seed.to_profile()).collect(),
            rejected: Vec::new(),
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(raw)?;
        let materials =
            file.materials.into_iter().map(MaterialEntry::into_profile).collect::<Result<_, _>>()?;
        Self::new(materials)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::ReadFile { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&raw)
    }

    pub fn find(&self, name: &str) -> Option<&MaterialProfile> {
        self.materials.iter().find(|material| material.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MaterialProfile> {
        self.materials.iter()
    }

    pub fn materials(&self) -> &[MaterialProfile] {
        &self.materials
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Profiles dropped at construction, in input order.
    pub fn rejected(&self) -> &[ComputeError] {
        &self.rejected
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    materials: Vec<MaterialEntry>,
}

#[derive(Debug, Deserialize)]
struct MaterialEntry {
    name: String,
    base_co2_per_kg: f64,
    recyclability: f64,
    biodegradability: f64,
    is_renewable: bool,
    strength_factor: f64,
    max_weight: f64,
    fragility_protection: u8,
    #[serde(default)]
    shipping_suitability: BTreeMap<String, f64>,
    #[serde(default)]
    category_bonus: BTreeMap<String, f64>,
}

impl MaterialEntry {
    fn into_profile(self) -> Result<MaterialProfile, CatalogError> {
        let shipping_suitability = self
            .shipping_suitability
            .into_iter()
            .map(|(key, value)| match key.parse::<ShippingType>() {
                Ok(shipping_type) => Ok((shipping_type, value)),
                Err(_) => Err(CatalogError::UnknownKey {
                    material: self.name.clone(),
                    table: "shipping_suitability",
                    key,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let category_bonus = self
            .category_bonus
            .into_iter()
            .map(|(key, value)| match key.parse::<Category>() {
                Ok(category) => Ok((category, value)),
                Err(_) => Err(CatalogError::UnknownKey {
                    material: self.name.clone(),
                    table: "category_bonus",
                    key,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MaterialProfile {
            name: self.name,
            base_co2_per_kg: self.base_co2_per_kg,
            recyclability: self.recyclability,
            biodegradability: self.biodegradability,
            is_renewable: self.is_renewable,
            strength_factor: self.strength_factor,
            max_weight: self.max_weight,
            fragility_protection: self.fragility_protection,
            shipping_suitability: ShippingSuitability::new(shipping_suitability),
            category_bonus: CategoryBonus::new(category_bonus),
        })
    }
}
