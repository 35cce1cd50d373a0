use crate::engines::decoding::scale;
use crate::engines::generation::{chunk_consumer::ChunkConsumer, genome::BITS_PER_NOTE, Genome};
use crate::error::TunebreedError;
use crate::types::{DecodedMelody, MelodyEntry, ScaleDegree, StepNote, StepSequence, LOUD_VELOCITY};
use serde::{Deserialize, Serialize};

/// Chunk values at or above this are rests
const REST_THRESHOLD: u8 = 1 << (BITS_PER_NOTE - 1);

/// Musical parameters that fix how a genome sounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MelodyParams {
    pub bars: usize,
    pub notes_per_bar: usize,
    pub pauses: bool,
    pub key: String,
    pub scale: String,
    pub octave: i8,
}

impl MelodyParams {
    /// Number of bits a genome needs for these parameters
    pub fn genome_length(&self) -> usize {
        self.bars * self.notes_per_bar * BITS_PER_NOTE
    }

    /// Length of one chunk in quarter notes
    pub fn note_length(&self) -> f64 {
        4.0 / self.notes_per_bar as f64
    }

    pub fn validate(&self) -> Result<(), TunebreedError> {
        if self.bars == 0 {
            return Err(TunebreedError::InvalidParameter(
                "bars must be positive".to_string(),
            ));
        }
        if self.notes_per_bar == 0 {
            return Err(TunebreedError::InvalidParameter(
                "notes_per_bar must be positive".to_string(),
            ));
        }
        scale::scale_pitches(&self.key, &self.scale, self.octave)?;
        Ok(())
    }
}

/// Deterministic genome -> melody -> per-step pitches mapping
pub struct MelodyDecoder {
    params: MelodyParams,
    scale_pitches: Vec<u8>,
}

impl MelodyDecoder {
    pub fn new(params: MelodyParams) -> Result<Self, TunebreedError> {
        params.validate()?;
        let scale_pitches = scale::scale_pitches(&params.key, &params.scale, params.octave)?;
        Ok(Self {
            params,
            scale_pitches,
        })
    }

    pub fn params(&self) -> &MelodyParams {
        &self.params
    }

    /// Resolved scale, one octave from the tonic
    pub fn scale_pitches(&self) -> &[u8] {
        &self.scale_pitches
    }

    /// Decode chunks into scale degrees, merging repeated notes into longer ones
    pub fn decode(&self, genome: &Genome) -> Result<DecodedMelody, TunebreedError> {
        let expected = self.params.genome_length();
        if genome.len() != expected {
            return Err(TunebreedError::InvalidParameter(format!(
                "Genome has {} bits, expected {}",
                genome.len(),
                expected
            )));
        }

        let note_length = self.params.note_length();
        let mut consumer = ChunkConsumer::new(genome.bits());
        let mut melody = DecodedMelody::default();

        while let Some(mut value) = consumer.consume() {
            if !self.params.pauses {
                value %= REST_THRESHOLD;
            }

            if value >= REST_THRESHOLD {
                melody.entries.push(MelodyEntry {
                    degree: ScaleDegree::Rest,
                    velocity: 0,
                    beat_duration: note_length,
                });
                continue;
            }

            let degree = ScaleDegree::Index(value);
            match melody.entries.last_mut() {
                Some(previous) if previous.degree == degree => {
                    previous.beat_duration += note_length;
                }
                _ => melody.entries.push(MelodyEntry {
                    degree,
                    velocity: LOUD_VELOCITY,
                    beat_duration: note_length,
                }),
            }
        }

        Ok(melody)
    }

    /// Expand a melody into `num_steps` parallel lines, step `s` shifted up
    /// `2 * s` scale degrees (wrapping within the resolved octave)
    pub fn realize(&self, melody: &DecodedMelody, num_steps: usize) -> Vec<StepSequence> {
        let len = self.scale_pitches.len();
        (0..num_steps)
            .map(|step| StepSequence {
                step,
                notes: melody
                    .entries
                    .iter()
                    .map(|entry| StepNote {
                        pitch: match entry.degree {
                            ScaleDegree::Rest => None,
                            ScaleDegree::Index(v) => {
                                Some(self.scale_pitches[(v as usize + step * 2) % len])
                            }
                        },
                        duration: entry.beat_duration,
                        velocity: entry.velocity,
                    })
                    .collect(),
            })
            .collect()
    }

    /// `decode` followed by `realize`
    pub fn decode_steps(
        &self,
        genome: &Genome,
        num_steps: usize,
    ) -> Result<(DecodedMelody, Vec<StepSequence>), TunebreedError> {
        let melody = self.decode(genome)?;
        let steps = self.realize(&melody, num_steps);
        Ok((melody, steps))
    }
}
