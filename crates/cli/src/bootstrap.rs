use ecopack_core::config::{AppConfig, ConfigError, LoadOptions};
use ecopack_core::{CatalogError, MaterialCatalog, StandardEngine};
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub catalog: MaterialCatalog,
    pub engine: StandardEngine,
}

impl Application {
    /// Where the catalog came from: the configured file or the built-in set.
    pub fn catalog_source(&self) -> String {
        self.config
            .engine
            .catalog_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "builtin".to_string())
    }
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("material catalog could not be loaded: {0}")]
    Catalog(#[from] CatalogError),
}

impl BootstrapError {
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_validation",
            Self::Catalog(_) => "catalog_invalid",
        }
    }
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    crate::init_logging(&config.logging);
    bootstrap_with_config(config)
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        strategy = config.engine.strategy.as_str(),
        "starting application bootstrap"
    );

    let catalog = match &config.engine.catalog_path {
        Some(path) => MaterialCatalog::load(path)?,
        None => MaterialCatalog::builtin(),
    };
    info!(
        event_name = "system.bootstrap.catalog_loaded",
        correlation_id = "bootstrap",
        materials = catalog.len(),
        rejected = catalog.rejected().len(),
        "material catalog loaded"
    );

    let engine = StandardEngine::from_config(&config.engine);

    Ok(Application { config, catalog, engine })
}
