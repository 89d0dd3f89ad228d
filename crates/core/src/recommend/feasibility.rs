use crate::domain::material::MaterialProfile;
use crate::domain::product::ProductRequest;
use crate::recommend::catalog::MaterialCatalog;

/// Lowest shipping suitability a material may have and still be offered.
pub const MIN_SHIPPING_SUITABILITY: f64 = 0.7;

/// Why a material cannot carry a product.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Infeasibility {
    OverCapacity { weight_kg: f64, max_weight: f64 },
    InsufficientProtection { required: u8, available: u8 },
    UnsuitableShipping { suitability: f64 },
}

/// Materials that may carry the product, in catalog order.
#[derive(Clone, Debug, PartialEq)]
pub struct FeasibleSet<'a> {
    pub materials: Vec<&'a MaterialProfile>,
    /// Set when nothing passed and the full catalog was substituted.
    pub relaxed: bool,
}

/// Protection level a material needs for a given fragility. Step function:
/// above 0.7 needs 6, above 0.4 needs 4, otherwise 2.
pub fn required_protection(fragility_index: f64) -> u8 {
    if fragility_index > 0.7 {
        6
    } else if fragility_index > 0.4 {
        4
    } else {
        2
    }
}

pub fn assess(request: &ProductRequest, material: &MaterialProfile) -> Result<(), Infeasibility> {
    if request.weight_kg > material.max_weight {
        return Err(Infeasibility::OverCapacity {
            weight_kg: request.weight_kg,
            max_weight: material.max_weight,
        });
    }

    let required = required_protection(request.fragility_index);
    if material.fragility_protection < required {
        return Err(Infeasibility::InsufficientProtection {
            required,
            available: material.fragility_protection,
        });
    }

    let suitability = material.shipping_suitability.get(request.shipping_type);
    if suitability < MIN_SHIPPING_SUITABILITY {
        return Err(Infeasibility::UnsuitableShipping { suitability });
    }

    Ok(())
}

/// Reduces the catalog to feasible materials. When nothing qualifies the whole
/// catalog comes back with `relaxed` set, so the result is never empty for a
/// non-empty catalog.
pub fn filter<'a>(request: &ProductRequest, catalog: &'a MaterialCatalog) -> FeasibleSet<'a> {
    let materials: Vec<&MaterialProfile> =
        catalog.iter().filter(|material| assess(request, material).is_ok()).collect();

    if materials.is_empty() {
        return FeasibleSet { materials: catalog.iter().collect(), relaxed: true };
    }

    FeasibleSet { materials, relaxed: false }
}
