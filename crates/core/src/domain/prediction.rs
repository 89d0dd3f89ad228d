use serde::{Deserialize, Serialize};

/// Version label carried in every recommendation envelope.
pub const MODEL_VERSION: &str = "v1.0";

/// A scored material before ranking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredMaterial {
    pub material: String,
    pub predicted_cost: f64,
    pub co2: f64,
    /// Final composite score, the ranking key.
    pub sustainability_score: f64,
    pub biodegradability: f64,
    pub recyclability: f64,
    pub co2_performance: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub rank: u32,
    pub material: String,
    pub predicted_cost: f64,
    pub co2: f64,
    pub sustainability_score: f64,
    pub biodegradability: f64,
    pub recyclability: f64,
    pub co2_performance: f64,
}

impl PredictionResult {
    pub fn from_scored(scored: ScoredMaterial, rank: u32) -> Self {
        Self {
            rank,
            material: scored.material,
            predicted_cost: scored.predicted_cost,
            co2: scored.co2,
            sustainability_score: scored.sustainability_score,
            biodegradability: scored.biodegradability,
            recyclability: scored.recyclability,
            co2_performance: scored.co2_performance,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStatus {
    Success,
}

/// Non-fatal conditions attached to a successful recommendation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecommendationWarning {
    /// No material passed every feasibility check; the whole catalog was scored.
    FeasibilityRelaxed { message: String },
    MaterialExcluded { material: String, reason: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub status: RecommendationStatus,
    pub model_version: String,
    pub scoring_strategy: String,
    pub feasibility_relaxed: bool,
    pub warnings: Vec<RecommendationWarning>,
    pub predictions: Vec<PredictionResult>,
}
