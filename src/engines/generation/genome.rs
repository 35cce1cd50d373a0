use crate::error::TunebreedError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bits per decoded note
pub const BITS_PER_NOTE: usize = 4;

/// Genome representation for the melody GA
///
/// A genome is a fixed-length sequence of bits. Every 4 consecutive bits form a
/// chunk that the `MelodyDecoder` turns into one note or rest, so a genome for
/// `bars` bars of `notes_per_bar` notes holds `bars * notes_per_bar * 4` bits.
///
/// Genomes are values: operators never modify a genome in place, they build a
/// new one. Equality is element-wise over the bit sequence.
///
/// # Example
///
/// ```
/// use tunebreed::engines::generation::Genome;
///
/// let genome: Genome = "0000 0000 1000 0100".parse().unwrap();
/// assert_eq!(genome.len(), 16);
/// assert_eq!(genome.canonical_string(), "0000000010000100");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genome {
    bits: Vec<bool>,
}

impl Genome {
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Canonical '0'/'1' encoding, used to key ratings by genome value
    pub fn canonical_string(&self) -> String {
        self.bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }

    /// New genome with the bit at `index` inverted
    pub fn with_flipped(&self, index: usize) -> Genome {
        let mut genome = self.clone();
        genome.flip(index);
        genome
    }

    pub(crate) fn flip(&mut self, index: usize) {
        self.bits[index] = !self.bits[index];
    }

    /// Join the first `point` bits of `self` with the rest of `other`
    pub fn splice(&self, other: &Genome, point: usize) -> Genome {
        let mut bits = Vec::with_capacity(self.len());
        bits.extend_from_slice(&self.bits[..point]);
        bits.extend_from_slice(&other.bits[point..]);
        Genome { bits }
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chunk) in self.bits.chunks(BITS_PER_NOTE).enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            for &bit in chunk {
                write!(f, "{}", if bit { '1' } else { '0' })?;
            }
        }
        Ok(())
    }
}

/// Parses '0'/'1' characters, ignoring whitespace
impl FromStr for Genome {
    type Err = TunebreedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(TunebreedError::InvalidParameter(format!(
                    "Genome may only contain 0 and 1, found {:?}",
                    other
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Genome { bits })
    }
}
