use crate::engines::generation::genome::Genome;
use serde::{Deserialize, Serialize};

/// Velocity given to every sounding note
pub const LOUD_VELOCITY: u8 = 127;

/// Decoded value of one 4-bit chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleDegree {
    Rest,
    Index(u8), // 0..=7, position in the resolved scale
}

impl ScaleDegree {
    pub fn is_rest(&self) -> bool {
        matches!(self, ScaleDegree::Rest)
    }
}

/// One note or rest of a decoded melody
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MelodyEntry {
    pub degree: ScaleDegree,
    pub velocity: u8,
    pub beat_duration: f64, // quarter-note units
}

/// Rhythm and scale degrees of a genome, before pitches are assigned
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecodedMelody {
    pub entries: Vec<MelodyEntry>,
}

impl DecodedMelody {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn degrees(&self) -> Vec<ScaleDegree> {
        self.entries.iter().map(|e| e.degree).collect()
    }

    pub fn velocities(&self) -> Vec<u8> {
        self.entries.iter().map(|e| e.velocity).collect()
    }

    pub fn beats(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.beat_duration).collect()
    }

    /// Total length in quarter notes
    pub fn total_duration(&self) -> f64 {
        self.entries.iter().map(|e| e.beat_duration).sum()
    }
}

/// A note (or rest, when `pitch` is `None`) with an absolute MIDI pitch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepNote {
    pub pitch: Option<u8>,
    pub duration: f64,
    pub velocity: u8,
}

/// One transposition step of a melody
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSequence {
    pub step: usize,
    pub notes: Vec<StepNote>,
}

/// Result of producing a candidate in an evolution session
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub id: String,
    pub generation: u64,
    pub genome: Genome,
    pub melody: DecodedMelody,
    pub steps: Vec<StepSequence>,
}
