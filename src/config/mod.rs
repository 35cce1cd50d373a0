pub mod evolution;
pub mod generation;
pub mod manager;
pub mod render;
pub mod traits;

pub use evolution::EvolutionConfig;
pub use generation::GenerationConfig;
pub use manager::{AppConfig, ConfigManager};
pub use render::RenderConfig;
pub use traits::ConfigSection;
