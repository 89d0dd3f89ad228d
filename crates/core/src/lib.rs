pub mod config;
pub mod domain;
pub mod errors;
pub mod recommend;

pub use config::{AppConfig, ConfigError, LoadOptions, ScoringStrategyKind};
pub use domain::material::{CategoryBonus, MaterialProfile, ShippingSuitability};
pub use domain::prediction::{PredictionResult, Recommendation, RecommendationWarning};
pub use domain::product::{Category, ProductRequest, ShippingType};
pub use errors::{CatalogError, ComputeError, InterfaceError, ValidationError};
pub use recommend::{
    catalog::MaterialCatalog,
    estimator::{CostCo2Model, Estimator, FormulaEstimator, ModelEstimator},
    scoring::{CategoryWeighted, FeasibilityWeighted, ScoringStrategy},
    RecommendationEngine, RecommendationInput, StandardEngine,
};
