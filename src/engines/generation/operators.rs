use crate::engines::generation::genome::{Genome, BITS_PER_NOTE};
use crate::error::TunebreedError;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Generate random genome, each bit drawn uniformly
pub fn random_genome<R: Rng>(length: usize, rng: &mut R) -> Result<Genome, TunebreedError> {
    if length == 0 || length % BITS_PER_NOTE != 0 {
        return Err(TunebreedError::InvalidParameter(format!(
            "Genome length must be a positive multiple of {}, got {}",
            BITS_PER_NOTE, length
        )));
    }

    Ok(Genome::from_bits((0..length).map(|_| rng.gen::<bool>()).collect()))
}

/// Roulette wheel selection of two parents, drawn with replacement.
///
/// Each genome is weighted by `fitness + 1`, so unrated genomes (fitness 0)
/// keep a non-zero chance of being picked.
pub fn selection_pair<R, F>(
    population: &[Genome],
    fitness: F,
    rng: &mut R,
) -> Result<(Genome, Genome), TunebreedError>
where
    R: Rng,
    F: Fn(&Genome) -> u32,
{
    if population.is_empty() {
        return Err(TunebreedError::InvalidParameter(
            "Cannot select parents from an empty population".to_string(),
        ));
    }

    let weights: Vec<u64> = population
        .iter()
        .map(|genome| fitness(genome) as u64 + 1)
        .collect();
    let wheel = WeightedIndex::new(&weights)
        .map_err(|e| TunebreedError::InvalidParameter(format!("Bad selection weights: {}", e)))?;

    let first = &population[wheel.sample(rng)];
    let second = &population[wheel.sample(rng)];
    Ok((first.clone(), second.clone()))
}

/// Single-point crossover: swap genome suffixes at a cut in `1..len`
pub fn single_point_crossover<R: Rng>(
    parent1: &Genome,
    parent2: &Genome,
    rng: &mut R,
) -> Result<(Genome, Genome), TunebreedError> {
    if parent1.len() != parent2.len() {
        return Err(TunebreedError::InvalidParameter(format!(
            "Crossover parents differ in length: {} vs {}",
            parent1.len(),
            parent2.len()
        )));
    }

    let len = parent1.len();
    if len < 2 {
        return Ok((parent1.clone(), parent2.clone()));
    }

    let point = rng.gen_range(1..len);
    Ok(crossover_at(parent1, parent2, point))
}

/// Children of a crossover cut at `point`
pub fn crossover_at(parent1: &Genome, parent2: &Genome, point: usize) -> (Genome, Genome) {
    (parent1.splice(parent2, point), parent2.splice(parent1, point))
}

/// Mutation: `count` independent trials, each flipping one random bit with
/// probability `probability`. A position hit twice flips back.
pub fn mutation<R: Rng>(
    genome: &Genome,
    count: usize,
    probability: f64,
    rng: &mut R,
) -> Result<Genome, TunebreedError> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(TunebreedError::InvalidParameter(format!(
            "Mutation probability must be between 0 and 1, got {}",
            probability
        )));
    }
    if genome.is_empty() {
        return Ok(genome.clone());
    }

    let mut mutated = genome.clone();
    for _ in 0..count {
        let index = rng.gen_range(0..mutated.len());
        if rng.gen_bool(probability) {
            mutated.flip(index);
        }
    }

    Ok(mutated)
}
