pub mod decoder;
pub mod scale;

pub use decoder::{MelodyDecoder, MelodyParams};
pub use scale::{scale_pitches, SCALE_TABLE};
