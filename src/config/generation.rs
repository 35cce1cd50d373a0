use super::traits::ConfigSection;
use crate::engines::decoding::{scale, MelodyParams};
use crate::error::TunebreedError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub bars: usize,
    pub notes_per_bar: usize,
    pub num_steps: usize,
    pub pauses: bool,
    pub key: String,
    pub scale: String,
    pub octave: i8,
    pub tempo: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            bars: 8,
            notes_per_bar: 4,
            num_steps: 1,
            pauses: true,
            key: "C".to_string(),
            scale: "major".to_string(),
            octave: 4,
            tempo: 128,
        }
    }
}

impl GenerationConfig {
    pub fn melody_params(&self) -> MelodyParams {
        MelodyParams {
            bars: self.bars,
            notes_per_bar: self.notes_per_bar,
            pauses: self.pauses,
            key: self.key.clone(),
            scale: self.scale.clone(),
            octave: self.octave,
        }
    }
}

impl ConfigSection for GenerationConfig {
    fn section_name() -> &'static str {
        "generation"
    }

    fn validate(&self) -> Result<(), TunebreedError> {
        if self.bars == 0 {
            return Err(TunebreedError::Configuration(
                "Number of bars must be at least 1".to_string()
            ));
        }
        if self.notes_per_bar == 0 {
            return Err(TunebreedError::Configuration(
                "Notes per bar must be at least 1".to_string()
            ));
        }
        if self.num_steps == 0 {
            return Err(TunebreedError::Configuration(
                "Number of steps must be at least 1".to_string()
            ));
        }
        if self.tempo == 0 {
            return Err(TunebreedError::Configuration(
                "Tempo must be positive".to_string()
            ));
        }
        scale::scale_pitches(&self.key, &self.scale, self.octave)
            .map_err(|e| TunebreedError::Configuration(e.to_string()))?;
        Ok(())
    }
}
