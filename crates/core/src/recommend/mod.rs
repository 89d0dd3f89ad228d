pub mod catalog;
pub mod estimator;
pub mod feasibility;
pub mod ranking;
pub mod scoring;
pub mod validation;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{EngineConfig, ScoringStrategyKind};
use crate::domain::material::MaterialProfile;
use crate::domain::prediction::{
    Recommendation, RecommendationStatus, RecommendationWarning, ScoredMaterial, MODEL_VERSION,
};
use crate::domain::product::ProductRequest;
use crate::errors::{ComputeError, ValidationError};

use self::{
    catalog::MaterialCatalog,
    estimator::{Estimator, FormulaEstimator},
    scoring::{round2, ScoringStrategy},
};

#[derive(Clone, Copy, Debug)]
pub struct RecommendationInput<'a> {
    pub catalog: &'a MaterialCatalog,
    pub payload: &'a Value,
    pub correlation_id: &'a str,
}

/// Validation, feasibility, estimation, scoring and ranking in one pass.
/// Holds no mutable state; one instance serves any number of threads.
pub struct RecommendationEngine<E, S> {
    estimator: E,
    strategy: S,
    max_results: Option<usize>,
}

impl<E, S> RecommendationEngine<E, S> {
    pub fn new(estimator: E, strategy: S) -> Self {
        Self { estimator, strategy, max_results: None }
    }

    pub fn with_max_results(mut self, max_results: Option<usize>) -> Self {
        self.max_results = max_results;
        self
    }
}

/// Formula estimator with the strategy picked in configuration.
pub type StandardEngine = RecommendationEngine<FormulaEstimator, ScoringStrategyKind>;

impl StandardEngine {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(FormulaEstimator, config.strategy).with_max_results(config.max_results)
    }
}

impl Default for StandardEngine {
    fn default() -> Self {
        Self::new(FormulaEstimator, ScoringStrategyKind::FeasibilityWeighted)
    }
}

impl<E, S> RecommendationEngine<E, S>
where
    E: Estimator,
    S: ScoringStrategy,
{
    pub fn recommend(
        &self,
        input: RecommendationInput<'_>,
    ) -> Result<Recommendation, ValidationError> {
        let request = validation::validate(input.payload).map_err(|error| {
            info!(
                event_name = "engine.request.rejected",
                correlation_id = input.correlation_id,
                error_kind = error.kind(),
                error = %error,
                "product request failed validation"
            );
            error
        })?;

        Ok(self.recommend_request(input.catalog, &request, input.correlation_id))
    }

    pub fn recommend_request(
        &self,
        catalog: &MaterialCatalog,
        request: &ProductRequest,
        correlation_id: &str,
    ) -> Recommendation {
        let mut warnings = Vec::new();
        let feasible = feasibility::filter(request, catalog);

        if feasible.relaxed {
            warn!(
                event_name = "engine.feasibility.relaxed",
                correlation_id,
                product = %request.name,
                weight_kg = request.weight_kg,
                fragility_index = request.fragility_index,
                shipping_type = %request.shipping_type,
                "no material meets all feasibility criteria; scoring the full catalog"
            );
            warnings.push(RecommendationWarning::FeasibilityRelaxed {
                message: "No materials meet all feasibility criteria. Showing all options."
                    .to_owned(),
            });
        }

        let mut scored = Vec::with_capacity(feasible.materials.len());
        for material in feasible.materials {
            match self.evaluate(request, material) {
                Ok(result) => {
                    debug!(
                        event_name = "engine.material.scored",
                        correlation_id,
                        material = %result.material,
                        final_score = result.sustainability_score,
                        co2 = result.co2,
                        "material scored"
                    );
                    scored.push(result);
                }
                Err(error) => {
                    warn!(
                        event_name = "engine.material.excluded",
                        correlation_id,
                        material = %material.name,
                        error = %error,
                        "material excluded from results"
                    );
                    warnings.push(RecommendationWarning::MaterialExcluded {
                        material: material.name.clone(),
                        reason: error.to_string(),
                    });
                }
            }
        }

        let mut predictions = ranking::rank(scored);
        if let Some(limit) = self.max_results {
            predictions.truncate(limit);
        }

        info!(
            event_name = "engine.recommendation.completed",
            correlation_id,
            strategy = self.strategy.name(),
            feasibility_relaxed = feasible.relaxed,
            result_count = predictions.len(),
            top_material = predictions.first().map(|top| top.material.as_str()).unwrap_or("none"),
            "recommendation computed"
        );

        Recommendation {
            status: RecommendationStatus::Success,
            model_version: MODEL_VERSION.to_owned(),
            scoring_strategy: self.strategy.name().to_owned(),
            feasibility_relaxed: feasible.relaxed,
            warnings,
            predictions,
        }
    }

    fn evaluate(
        &self,
        request: &ProductRequest,
        material: &MaterialProfile,
    ) -> Result<ScoredMaterial, ComputeError> {
        let estimate = self.estimator.estimate(request, material)?;
        let predicted_cost = round2(estimate.cost);
        let co2 = round2(estimate.co2);
        ensure_estimate(material, "predicted cost", predicted_cost)?;
        ensure_estimate(material, "co2 estimate", co2)?;

        let scores = self.strategy.score(material, &estimate, request);
        ensure_finite(material, "sustainability score", scores.final_score)?;
        ensure_finite(material, "co2 performance score", scores.co2_performance)?;

        Ok(ScoredMaterial {
            material: material.name.clone(),
            predicted_cost,
            co2,
            sustainability_score: scores.final_score,
            biodegradability: material.biodegradability,
            recyclability: material.recyclability,
            co2_performance: scores.co2_performance,
        })
    }
}

fn ensure_finite(
    material: &MaterialProfile,
    quantity: &'static str,
    value: f64,
) -> Result<(), ComputeError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ComputeError::NonFinite { material: material.name.clone(), quantity })
    }
}

fn ensure_estimate(
    material: &MaterialProfile,
    quantity: &'static str,
    value: f64,
) -> Result<(), ComputeError> {
    ensure_finite(material, quantity, value)?;
    if value < 0.0 {
        return Err(ComputeError::Negative { material: material.name.clone(), quantity });
    }
    Ok(())
}
