use crate::engines::generation::genome::Genome;

use std::collections::HashMap;

/// Highest rating a listener can give
pub const MAX_RATING: u8 = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct RatingRecord {
    pub genome: Genome,
    pub rating: u8,
}

/// Append-only rating history with lookup by genome value.
///
/// Duplicate genomes are kept as separate records. Lookups return the rating of
/// the earliest record whose genome equals the query.
#[derive(Default)]
pub struct RatingLedger {
    records: Vec<RatingRecord>,
    first_rating: HashMap<String, u8>, // canonical genome string -> rating
}

impl RatingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rating, clamped to `0..=MAX_RATING`. Returns the stored value.
    pub fn record(&mut self, genome: Genome, rating: i64) -> u8 {
        let rating = clamp_rating(rating);
        self.first_rating
            .entry(genome.canonical_string())
            .or_insert(rating);
        self.records.push(RatingRecord { genome, rating });
        rating
    }

    /// Rating of `genome`, 0 when it was never rated
    pub fn fitness(&self, genome: &Genome) -> u32 {
        self.first_rating
            .get(&genome.canonical_string())
            .copied()
            .unwrap_or(0) as u32
    }

    pub fn records(&self) -> &[RatingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub fn clamp_rating(rating: i64) -> u8 {
    rating.clamp(0, MAX_RATING as i64) as u8
}
