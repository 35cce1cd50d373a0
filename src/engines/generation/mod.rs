pub mod chunk_consumer;
pub mod generational;
pub mod genome;
pub mod operators;
pub mod rating_ledger;
pub mod session;

pub use genome::Genome;
pub use operators::{mutation, random_genome, selection_pair, single_point_crossover};
pub use rating_ledger::{RatingLedger, RatingRecord};
pub use session::{EvolutionSession, RatingOutcome, SessionConfig};
