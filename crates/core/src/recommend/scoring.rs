//! Scoring strategies for packaging materials.
//!
//! Every score handed back to callers lives on a 0-100 scale, is clamped to that
//! range and is rounded to two decimals as soon as it is produced.

use crate::config::ScoringStrategyKind;
use crate::domain::material::MaterialProfile;
use crate::domain::product::{Category, ProductRequest};
use crate::recommend::estimator::Estimate;

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

/// Renewability contribution for bio-based and fossil-based materials.
pub const RENEWABLE_SCORE: f64 = 80.0;
pub const NON_RENEWABLE_SCORE: f64 = 20.0;

/// CO2 (kg) at which CO2 performance bottoms out at zero.
pub const CO2_CEILING_KG: f64 = 50.0;

/// Weights of the sustainability blend. Sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SustainabilityWeights {
    pub biodegradability: f64,
    pub recyclability: f64,
    pub renewability: f64,
}

pub const SUSTAINABILITY_WEIGHTS: SustainabilityWeights =
    SustainabilityWeights { biodegradability: 0.40, recyclability: 0.40, renewability: 0.20 };

/// Weights of the final composite score. Sum to 1.0; sustainability dominates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeWeights {
    pub sustainability: f64,
    pub co2_performance: f64,
}

pub const COMPOSITE_WEIGHTS: CompositeWeights =
    CompositeWeights { sustainability: 0.60, co2_performance: 0.40 };

/// Weights of the category-weighted blend. Sum to 1.0 per category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendWeights {
    pub cost: f64,
    pub co2: f64,
    pub recyclability: f64,
}

/// Used for a category with no row in [`CATEGORY_BLEND_WEIGHTS`].
pub const DEFAULT_BLEND_WEIGHTS: BlendWeights =
    BlendWeights { cost: 0.33, co2: 0.33, recyclability: 0.34 };

pub const CATEGORY_BLEND_WEIGHTS: [(Category, BlendWeights); 4] = [
    (Category::Food, BlendWeights { cost: 0.40, co2: 0.30, recyclability: 0.30 }),
    (Category::Electronics, BlendWeights { cost: 0.30, co2: 0.20, recyclability: 0.50 }),
    (Category::Cosmetics, BlendWeights { cost: 0.50, co2: 0.20, recyclability: 0.30 }),
    (Category::Pharmacy, BlendWeights { cost: 0.35, co2: 0.25, recyclability: 0.40 }),
];

pub fn blend_weights(category: Category) -> BlendWeights {
    CATEGORY_BLEND_WEIGHTS
        .iter()
        .find(|(candidate, _)| *candidate == category)
        .map(|(_, weights)| *weights)
        .unwrap_or(DEFAULT_BLEND_WEIGHTS)
}

/// Clamps to the score range and rounds to two decimals. NaN passes through
/// unchanged so callers can detect it.
pub fn bounded_score(value: f64) -> f64 {
    round2(value.clamp(SCORE_MIN, SCORE_MAX))
}

/// Rounds half away from zero. Values too large to scale by 100 are already
/// whole numbers and come back unchanged.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        value
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBundle {
    pub sustainability: f64,
    pub co2_performance: f64,
    /// Ranking key, reported as `sustainability_score`.
    pub final_score: f64,
}

pub trait ScoringStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn score(
        &self,
        material: &MaterialProfile,
        estimate: &Estimate,
        request: &ProductRequest,
    ) -> ScoreBundle;
}

/// Sustainability and CO2 performance blended 60/40, with category bonuses
/// applied to biodegradability and recyclability.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeasibilityWeighted;

impl FeasibilityWeighted {
    pub fn sustainability_score(
        biodegradability: f64,
        recyclability: f64,
        is_renewable: bool,
    ) -> f64 {
        let renewability = if is_renewable { RENEWABLE_SCORE } else { NON_RENEWABLE_SCORE };
        let weights = SUSTAINABILITY_WEIGHTS;
        bounded_score(
            biodegradability * weights.biodegradability
                + recyclability * weights.recyclability
                + renewability * weights.renewability,
        )
    }

    pub fn co2_performance_score(co2: f64) -> f64 {
        bounded_score(SCORE_MAX - (co2 / CO2_CEILING_KG * 100.0))
    }

    pub fn final_score(sustainability: f64, co2_performance: f64) -> f64 {
        let weights = COMPOSITE_WEIGHTS;
        bounded_score(
            weights.sustainability * sustainability + weights.co2_performance * co2_performance,
        )
    }
}

impl ScoringStrategy for FeasibilityWeighted {
    fn name(&self) -> &'static str {
        "feasibility_weighted"
    }

    fn score(
        &self,
        material: &MaterialProfile,
        estimate: &Estimate,
        request: &ProductRequest,
    ) -> ScoreBundle {
        let modifier = material.category_bonus.get(request.category);
        let biodegradability = (material.biodegradability * modifier).min(SCORE_MAX);
        let recyclability = (material.recyclability * modifier).min(SCORE_MAX);

        let sustainability =
            Self::sustainability_score(biodegradability, recyclability, material.is_renewable);
        let co2_performance = Self::co2_performance_score(estimate.co2);
        let final_score = Self::final_score(sustainability, co2_performance);

        ScoreBundle { sustainability, co2_performance, final_score }
    }
}

/// Simpler blend of cost, CO2 and raw recyclability weighted per category. It
/// ignores category bonuses and renewability.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryWeighted;

impl ScoringStrategy for CategoryWeighted {
    fn name(&self) -> &'static str {
        "category_weighted"
    }

    fn score(
        &self,
        material: &MaterialProfile,
        estimate: &Estimate,
        request: &ProductRequest,
    ) -> ScoreBundle {
        let weights = blend_weights(request.category);
        let cost_score = (SCORE_MAX - estimate.cost).max(SCORE_MIN);
        let co2_score = (SCORE_MAX - estimate.co2 * 5.0).max(SCORE_MIN);

        let final_score = bounded_score(
            cost_score * weights.cost
                + co2_score * weights.co2
                + material.recyclability * weights.recyclability,
        );

        ScoreBundle {
            sustainability: final_score,
            co2_performance: bounded_score(co2_score),
            final_score,
        }
    }
}

impl ScoringStrategy for ScoringStrategyKind {
    fn name(&self) -> &'static str {
        match self {
            Self::FeasibilityWeighted => FeasibilityWeighted.name(),
            Self::CategoryWeighted => CategoryWeighted.name(),
        }
    }

    fn score(
        &self,
        material: &MaterialProfile,
        estimate: &Estimate,
        request: &ProductRequest,
    ) -> ScoreBundle {
        match self {
            Self::FeasibilityWeighted => FeasibilityWeighted.score(material, estimate, request),
            Self::CategoryWeighted => CategoryWeighted.score(material, estimate, request),
        }
    }
}
