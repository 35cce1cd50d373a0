use super::traits::ConfigSection;
use crate::error::TunebreedError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub mutation_count: usize,
    pub mutation_probability: f64,
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            mutation_count: 2,
            mutation_probability: 0.5,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), TunebreedError> {
        if self.population_size < 2 {
            return Err(TunebreedError::Configuration(
                "Population size must be at least 2".to_string()
            ));
        }
        if self.mutation_probability < 0.0 || self.mutation_probability > 1.0 {
            return Err(TunebreedError::Configuration(
                "Mutation probability must be between 0 and 1".to_string()
            ));
        }
        Ok(())
    }
}
