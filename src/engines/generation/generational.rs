use crate::engines::generation::{
    genome::Genome,
    operators::{mutation, selection_pair, single_point_crossover},
};
use crate::error::TunebreedError;
use log::debug;
use rand::Rng;

/// Individuals copied unchanged into the next generation
pub const ELITE_COUNT: usize = 2;

/// Batch mode: breed a whole new population from a fully rated one.
///
/// The best `ELITE_COUNT` genomes survive, the rest of the slots are filled
/// with mutated crossover children of roulette-selected parents. Output has
/// the same size as the input.
pub fn next_generation<R: Rng>(
    rated: &[(Genome, u8)],
    mutation_count: usize,
    mutation_probability: f64,
    rng: &mut R,
) -> Result<Vec<Genome>, TunebreedError> {
    if rated.len() < ELITE_COUNT {
        return Err(TunebreedError::InvalidParameter(format!(
            "Generational run needs at least {} rated genomes, got {}",
            ELITE_COUNT,
            rated.len()
        )));
    }

    let mut sorted = rated.to_vec();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    let population: Vec<Genome> = sorted.iter().map(|(g, _)| g.clone()).collect();

    // Equal genomes take the rating of the first match
    let fitness = |genome: &Genome| -> u32 {
        rated
            .iter()
            .find(|(g, _)| g == genome)
            .map(|(_, r)| *r as u32)
            .unwrap_or(0)
    };

    let mut next: Vec<Genome> = population.iter().take(ELITE_COUNT).cloned().collect();

    while next.len() < population.len() {
        let (parent1, parent2) = selection_pair(&population, fitness, rng)?;
        let (child1, child2) = single_point_crossover(&parent1, &parent2, rng)?;

        next.push(mutation(&child1, mutation_count, mutation_probability, rng)?);
        if next.len() < population.len() {
            next.push(mutation(&child2, mutation_count, mutation_probability, rng)?);
        }
    }

    debug!(
        "Next generation: {} elites, best rating {}",
        ELITE_COUNT, sorted[0].1
    );

    Ok(next)
}
