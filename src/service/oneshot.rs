use crate::engines::generation::{EvolutionSession, SessionConfig};
use crate::engines::rendering::{MidiRenderer, Renderer};
use crate::error::TunebreedError;
use crate::types::Candidate;
use std::path::{Path, PathBuf};

/// Generate and render a single candidate from a fresh population, no rating loop
pub fn generate_midi_file<P: AsRef<Path>>(
    out_path: P,
    config: SessionConfig,
    num_steps: usize,
    seed: Option<u64>,
) -> Result<(Candidate, Vec<PathBuf>), TunebreedError> {
    let mut session = EvolutionSession::new(config, seed)?;
    let candidate = session.produce_candidate(num_steps)?;
    let files = MidiRenderer::new(out_path).render(&candidate.steps, session.config().tempo)?;
    Ok((candidate, files))
}
