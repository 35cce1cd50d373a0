pub mod midi;
pub mod renderer;

pub use midi::MidiRenderer;
pub use renderer::Renderer;
