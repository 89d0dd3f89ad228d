use crate::domain::material::MaterialProfile;
use crate::domain::product::{ProductRequest, ShippingType};
use crate::errors::ComputeError;

/// Packaging cost per kg of product at unit thickness and unit strength.
pub const BASE_COST_PER_KG: f64 = 45.0;
pub const BASE_THICKNESS: f64 = 1.0;
/// Multiplier used when a shipping type has no entry in the emission table.
pub const DEFAULT_SHIPPING_MULTIPLIER: f64 = 1.5;

const SHIPPING_EMISSION_MULTIPLIERS: [(ShippingType, f64); 3] =
    [(ShippingType::Air, 3.5), (ShippingType::Road, 1.5), (ShippingType::Sea, 0.8)];

pub fn shipping_multiplier(shipping_type: ShippingType) -> f64 {
    SHIPPING_EMISSION_MULTIPLIERS
        .iter()
        .find(|(candidate, _)| *candidate == shipping_type)
        .map(|(_, multiplier)| *multiplier)
        .unwrap_or(DEFAULT_SHIPPING_MULTIPLIER)
}

/// Relative thickness needed to carry the product: heavier loads relative to
/// capacity and more fragile goods both thicken the packaging.
pub fn required_thickness(request: &ProductRequest, material: &MaterialProfile) -> f64 {
    let weight_factor = 1.0 + (request.weight_kg / material.max_weight) * 0.5;
    let fragility_factor = 1.0 + request.fragility_index * material.strength_factor;
    BASE_THICKNESS * weight_factor * fragility_factor
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Estimate {
    pub required_thickness: f64,
    pub cost: f64,
    pub co2: f64,
}

/// Produces predicted cost and CO2 for one material. Implementations must not
/// depend on anything but their inputs.
pub trait Estimator: Send + Sync {
    fn estimate(
        &self,
        request: &ProductRequest,
        material: &MaterialProfile,
    ) -> Result<Estimate, ComputeError>;
}

/// Closed-form thickness, cost and CO2 estimate.
#[derive(Clone, Copy, Debug, Default)]
pub struct FormulaEstimator;

impl Estimator for FormulaEstimator {
    fn estimate(
        &self,
        request: &ProductRequest,
        material: &MaterialProfile,
    ) -> Result<Estimate, ComputeError> {
        Ok(estimate_with_formula(request, material))
    }
}

/// `strength_factor` is assumed positive; catalogs enforce it at construction.
pub fn estimate_with_formula(request: &ProductRequest, material: &MaterialProfile) -> Estimate {
    let required_thickness = required_thickness(request, material);
    let co2 = material.base_co2_per_kg
        * request.weight_kg
        * required_thickness
        * shipping_multiplier(request.shipping_type);
    let cost = BASE_COST_PER_KG
        * request.weight_kg
        * required_thickness
        * (1.0 / material.strength_factor);

    Estimate { required_thickness, cost, co2 }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelPrediction {
    pub cost: f64,
    pub co2: f64,
}

/// External cost/CO2 model. Nothing in this workspace ships one; callers that
/// have a trained model plug it in through [`ModelEstimator`].
pub trait CostCo2Model: Send + Sync {
    fn predict(
        &self,
        request: &ProductRequest,
        material: &MaterialProfile,
    ) -> Result<ModelPrediction, String>;
}

/// Replaces the formula's cost and CO2 with model output. Thickness is still
/// reported from the formula.
pub struct ModelEstimator<M> {
    model: M,
}

impl<M> ModelEstimator<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }
}

impl<M: CostCo2Model> Estimator for ModelEstimator<M> {
    fn estimate(
        &self,
        request: &ProductRequest,
        material: &MaterialProfile,
    ) -> Result<Estimate, ComputeError> {
        let prediction = self.model.predict(request, material).map_err(|message| {
            ComputeError::Model { material: material.name.clone(), message }
        })?;

        Ok(Estimate {
            required_thickness: required_thickness(request, material),
            cost: prediction.cost,
            co2: prediction.co2,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{
        shipping_multiplier, CostCo2Model, Estimator, FormulaEstimator, ModelEstimator,
        ModelPrediction,
    };
    use crate::domain::material::MaterialProfile;
    use crate::domain::product::{Category, ProductRequest, ShippingType};
    use crate::errors::ComputeError;
    use crate::recommend::catalog::MaterialCatalog;

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    fn food_road_request() -> ProductRequest {
        ProductRequest {
            name: "Granola Box".to_owned(),
            weight_kg: 2.0,
            category: Category::Food,
            fragility_index: 0.5,
            shipping_type: ShippingType::Road,
        }
    }

    #[test]
    fn shipping_multipliers_follow_emission_table() {
        assert_eq!(shipping_multiplier(ShippingType::Air), 3.5);
        assert_eq!(shipping_multiplier(ShippingType::Road), 1.5);
        assert_eq!(shipping_multiplier(ShippingType::Sea), 0.8);
    }

    #[test]
    fn kraft_paper_food_road_estimate() {
        let catalog = MaterialCatalog::builtin();
        let kraft = catalog.find("Kraft Paper").expect("seeded");

        let estimate =
            FormulaEstimator.estimate(&food_road_request(), kraft).expect("formula never fails");

        assert!(close(estimate.required_thickness, 1.40625));
        assert!(close(estimate.co2, 4.640625));
        assert!(close(estimate.cost, 253.125));
    }

    #[test]
    fn air_freight_emits_more_than_sea() {
        let catalog = MaterialCatalog::builtin();
        let cardboard = catalog.find("Recycled Cardboard").expect("seeded");
        let mut request = food_road_request();

        request.shipping_type = ShippingType::Air;
        let air = FormulaEstimator.estimate(&request, cardboard).expect("estimate");
        request.shipping_type = ShippingType::Sea;
        let sea = FormulaEstimator.estimate(&request, cardboard).expect("estimate");

        assert!(air.co2 > sea.co2);
        assert!(close(air.cost, sea.cost), "shipping does not change cost");
    }

    struct FixedModel;

    impl CostCo2Model for FixedModel {
        fn predict(
            &self,
            _request: &ProductRequest,
            material: &MaterialProfile,
        ) -> Result<ModelPrediction, String> {
            if material.name == "Kraft Paper" {
                return Err("feature vector rejected".to_owned());
            }
            Ok(ModelPrediction { cost: 12.5, co2: 3.0 })
        }
    }

    #[test]
    fn model_estimator_substitutes_cost_and_co2() {
        let catalog = MaterialCatalog::builtin();
        let estimator = ModelEstimator::new(FixedModel);
        let pla = catalog.find("PLA (Polylactic Acid)").expect("seeded");

        let estimate = estimator.estimate(&food_road_request(), pla).expect("model predicts");
        assert_eq!(estimate.cost, 12.5);
        assert_eq!(estimate.co2, 3.0);
        assert!(estimate.required_thickness > 1.0);

        let kraft = catalog.find("Kraft Paper").expect("seeded");
        assert_eq!(
            estimator.estimate(&food_road_request(), kraft),
            Err(ComputeError::Model {
                material: "Kraft Paper".to_owned(),
                message: "feature vector rejected".to_owned(),
            })
        );
    }
}
