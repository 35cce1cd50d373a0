use crate::error::TunebreedError;
use crate::types::StepSequence;

/// Turns realized step sequences into something a listener can play
pub trait Renderer {
    type Artifact;

    fn render(&self, steps: &[StepSequence], tempo: u32) -> Result<Self::Artifact, TunebreedError>;
}
