use super::{
    evolution::EvolutionConfig,
    generation::GenerationConfig,
    render::RenderConfig,
    traits::ConfigSection,
};
use crate::engines::generation::SessionConfig;
use crate::error::TunebreedError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Prefix of environment overrides, e.g. `TUNEBREED__EVOLUTION__POPULATION_SIZE=20`
pub const ENV_PREFIX: &str = "TUNEBREED";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub generation: GenerationConfig,
    pub evolution: EvolutionConfig,
    pub render: RenderConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), TunebreedError> {
        self.generation.validate()?;
        self.evolution.validate()?;
        self.render.validate()?;
        Ok(())
    }

    /// Parameters for `EvolutionSession::new`
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            melody: self.generation.melody_params(),
            tempo: self.generation.tempo,
            population_size: self.evolution.population_size,
            mutation_count: self.evolution.mutation_count,
            mutation_probability: self.evolution.mutation_probability,
        }
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Load defaults, then the optional TOML file, then environment overrides
    pub fn load(&self, path: Option<&Path>) -> Result<(), TunebreedError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(true));
        }
        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| TunebreedError::Configuration(format!("Failed to load config: {}", e)))?;

        config.validate()?;

        *self.config.write().unwrap_or_else(|e| e.into_inner()) = config;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), TunebreedError> {
        self.load(Some(path.as_ref()))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), TunebreedError> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| TunebreedError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| TunebreedError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn update<F>(&self, f: F) -> Result<(), TunebreedError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap_or_else(|e| e.into_inner());
        let mut updated = config.clone();
        f(&mut updated);
        updated.validate()?;
        *config = updated;
        Ok(())
    }
}
