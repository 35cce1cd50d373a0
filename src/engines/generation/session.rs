use crate::engines::decoding::{MelodyDecoder, MelodyParams};
use crate::engines::generation::{
    genome::Genome,
    operators::{mutation, random_genome, selection_pair, single_point_crossover},
    rating_ledger::RatingLedger,
};
use crate::error::TunebreedError;
use crate::types::Candidate;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Ratings at or above this also copy the genome back into the population
pub const ELITE_RATING: u8 = 4;

/// Everything needed to start an interactive session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub melody: MelodyParams,
    pub tempo: u32,
    pub population_size: usize,
    pub mutation_count: usize,
    pub mutation_probability: f64,
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), TunebreedError> {
        self.melody.validate()?;
        if self.population_size < 2 {
            return Err(TunebreedError::InvalidParameter(format!(
                "population_size must be at least 2, got {}",
                self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(TunebreedError::InvalidParameter(format!(
                "mutation_probability must be between 0 and 1, got {}",
                self.mutation_probability
            )));
        }
        if self.tempo == 0 {
            return Err(TunebreedError::InvalidParameter(
                "tempo must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// What `record_rating` did with a rating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingOutcome {
    Recorded { rating: u8, reinserted: bool },
    Ignored,
}

/// One interactive steady-state GA run.
///
/// Each `produce_candidate` breeds a single child and overwrites a random
/// population slot with it; each `record_rating` stores the listener's score
/// for the last child and, for high scores, overwrites another random slot.
pub struct EvolutionSession {
    config: SessionConfig,
    decoder: MelodyDecoder,
    population: Vec<Genome>,
    ratings: RatingLedger,
    last: Option<(String, Genome)>,
    generation: u64,
    rng: StdRng,
}

impl EvolutionSession {
    pub fn new(config: SessionConfig, seed: Option<u64>) -> Result<Self, TunebreedError> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: SessionConfig, mut rng: StdRng) -> Result<Self, TunebreedError> {
        config.validate()?;
        let decoder = MelodyDecoder::new(config.melody.clone())?;

        let genome_length = config.melody.genome_length();
        let population = (0..config.population_size)
            .map(|_| random_genome(genome_length, &mut rng))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "New session: population {} x {} bits",
            config.population_size, genome_length
        );

        Ok(Self {
            config,
            decoder,
            population,
            ratings: RatingLedger::new(),
            last: None,
            generation: 0,
            rng,
        })
    }

    /// Breed, insert and decode the next candidate
    pub fn produce_candidate(&mut self, num_steps: usize) -> Result<Candidate, TunebreedError> {
        self.generation += 1;

        let ratings = &self.ratings;
        let (parent1, parent2) =
            selection_pair(&self.population, |g| ratings.fitness(g), &mut self.rng)?;
        let (child1, child2) = single_point_crossover(&parent1, &parent2, &mut self.rng)?;
        let child = if self.rng.gen_bool(0.5) { child1 } else { child2 };
        let child = mutation(
            &child,
            self.config.mutation_count,
            self.config.mutation_probability,
            &mut self.rng,
        )?;

        let replace_idx = self.rng.gen_range(0..self.population.len());
        self.population[replace_idx] = child.clone();

        let id = format!(
            "g{}_{}",
            self.generation,
            self.rng.gen_range(100_000..1_000_000)
        );
        self.last = Some((id.clone(), child.clone()));

        let (melody, steps) = self.decoder.decode_steps(&child, num_steps)?;
        debug!(
            "Candidate {} replaces slot {}: {} events",
            id,
            replace_idx,
            melody.len()
        );

        Ok(Candidate {
            id,
            generation: self.generation,
            genome: child,
            melody,
            steps,
        })
    }

    /// The last produced genome, if `candidate_id` names it
    pub fn check_candidate(&self, candidate_id: &str) -> Result<&Genome, TunebreedError> {
        match &self.last {
            Some((id, genome)) if id == candidate_id => Ok(genome),
            last => Err(TunebreedError::UnknownCandidate {
                expected: last.as_ref().map(|(id, _)| id.clone()),
                got: candidate_id.to_string(),
            }),
        }
    }

    /// Store a rating for the last candidate. Stale or unknown ids are ignored.
    pub fn record_rating(&mut self, candidate_id: &str, rating: i64) -> RatingOutcome {
        let genome = match self.check_candidate(candidate_id) {
            Ok(genome) => genome.clone(),
            Err(e) => {
                warn!("Ignoring rating {}: {}", rating, e);
                return RatingOutcome::Ignored;
            }
        };

        let rating = self.ratings.record(genome.clone(), rating);

        let reinserted = rating >= ELITE_RATING;
        if reinserted {
            let idx = self.rng.gen_range(0..self.population.len());
            self.population[idx] = genome;
            info!("Candidate {} rated {}, copied into slot {}", candidate_id, rating, idx);
        } else {
            info!("Candidate {} rated {}", candidate_id, rating);
        }

        RatingOutcome::Recorded { rating, reinserted }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn decoder(&self) -> &MelodyDecoder {
        &self.decoder
    }

    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    pub fn ratings(&self) -> &RatingLedger {
        &self.ratings
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn last_genome(&self) -> Option<&Genome> {
        self.last.as_ref().map(|(_, genome)| genome)
    }

    pub fn last_candidate_id(&self) -> Option<&str> {
        self.last.as_ref().map(|(id, _)| id.as_str())
    }
}
