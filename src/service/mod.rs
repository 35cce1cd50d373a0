pub mod oneshot;
pub mod registry;

pub use oneshot::generate_midi_file;
pub use registry::{SessionHandle, SessionRegistry};
