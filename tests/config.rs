use std::path::PathBuf;
use tunebreed::config::{AppConfig, ConfigManager, ConfigSection, EvolutionConfig, GenerationConfig};
use tunebreed::engines::generation::EvolutionSession;
use tunebreed::TunebreedError;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tunebreed-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_defaults_are_valid() {
    let config = AppConfig::default();
    config.validate().unwrap();

    assert_eq!(GenerationConfig::section_name(), "generation");
    assert_eq!(config.generation.bars, 8);
    assert_eq!(config.generation.notes_per_bar, 4);
    assert_eq!(config.evolution.population_size, 10);
    assert_eq!(config.evolution.mutation_count, 2);
    assert_eq!(config.evolution.mutation_probability, 0.5);
}

#[test]
fn test_session_config_from_app_config() {
    let config = AppConfig::default();
    let session_config = config.session_config();

    assert_eq!(session_config.melody.genome_length(), 8 * 4 * 4);
    assert_eq!(session_config.tempo, 128);

    let session = EvolutionSession::new(session_config, Some(1)).unwrap();
    assert_eq!(session.population().len(), 10);
}

#[test]
fn test_invalid_sections_rejected() {
    let evolution = EvolutionConfig {
        population_size: 1,
        ..EvolutionConfig::default()
    };
    assert!(matches!(
        evolution.validate(),
        Err(TunebreedError::Configuration(_))
    ));

    let generation = GenerationConfig {
        key: "Z".to_string(),
        ..GenerationConfig::default()
    };
    assert!(generation.validate().is_err());
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = scratch_dir("roundtrip");
    let path = dir.join("tunebreed.toml");

    let manager = ConfigManager::new();
    manager
        .update(|config| {
            config.generation.scale = "minorBlues".to_string();
            config.generation.key = "F#".to_string();
            config.evolution.population_size = 24;
            config.evolution.seed = Some(17);
        })
        .unwrap();
    manager.save_to_file(&path).unwrap();

    let loaded = ConfigManager::new();
    loaded.load_from_file(&path).unwrap();
    let config = loaded.get();

    assert_eq!(config.generation.scale, "minorBlues");
    assert_eq!(config.generation.key, "F#");
    assert_eq!(config.evolution.population_size, 24);
    assert_eq!(config.evolution.seed, Some(17));

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = scratch_dir("partial");
    let path = dir.join("partial.toml");
    std::fs::write(&path, "[generation]\nbars = 2\n").unwrap();

    let manager = ConfigManager::new();
    manager.load_from_file(&path).unwrap();
    let config = manager.get();

    assert_eq!(config.generation.bars, 2);
    assert_eq!(config.generation.notes_per_bar, 4);
    assert_eq!(config.evolution.population_size, 10);

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_invalid_update_is_rolled_back() {
    let manager = ConfigManager::new();
    let result = manager.update(|config| config.generation.notes_per_bar = 0);

    assert!(result.is_err());
    assert_eq!(manager.get().generation.notes_per_bar, 4);
}
