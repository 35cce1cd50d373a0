use midly::Smf;
use std::path::PathBuf;
use tunebreed::engines::decoding::MelodyParams;
use tunebreed::engines::generation::SessionConfig;
use tunebreed::engines::rendering::{MidiRenderer, Renderer};
use tunebreed::service::generate_midi_file;
use tunebreed::types::{StepNote, StepSequence};

fn scratch_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tunebreed-render-{}-{}", name, std::process::id()))
}

#[test]
fn test_render_writes_one_file_per_step() {
    let dir = scratch_dir("steps");
    let steps: Vec<StepSequence> = (0..3)
        .map(|step| StepSequence {
            step,
            notes: vec![
                StepNote {
                    pitch: Some(60 + step as u8 * 4),
                    duration: 1.0,
                    velocity: 127,
                },
                StepNote {
                    pitch: None,
                    duration: 0.5,
                    velocity: 0,
                },
            ],
        })
        .collect();

    let files = MidiRenderer::new(dir.join("cand.mid")).render(&steps, 120).unwrap();

    assert_eq!(
        files,
        vec![
            dir.join("cand.mid"),
            dir.join("cand_step1.mid"),
            dir.join("cand_step2.mid"),
        ]
    );
    for file in &files {
        let bytes = std::fs::read(file).unwrap();
        let smf = Smf::parse(&bytes).unwrap();
        assert_eq!(smf.tracks.len(), 1);
    }

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_render_rejects_zero_tempo() {
    let renderer = MidiRenderer::new(scratch_dir("tempo").join("x.mid"));
    assert!(renderer.render(&[], 0).is_err());
}

#[test]
fn test_generate_midi_file_once() {
    let dir = scratch_dir("once");
    let config = SessionConfig {
        melody: MelodyParams {
            bars: 4,
            notes_per_bar: 4,
            pauses: false,
            key: "G".to_string(),
            scale: "mixolydian".to_string(),
            octave: 3,
        },
        tempo: 128,
        population_size: 8,
        mutation_count: 2,
        mutation_probability: 0.5,
    };

    let (candidate, files) = generate_midi_file(dir.join("generated"), config, 2, Some(4)).unwrap();

    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| f.exists()));
    assert_eq!(candidate.steps.len(), 2);
    assert!(candidate.melody.degrees().iter().all(|d| !d.is_rest()));
    assert_eq!(candidate.melody.total_duration(), 16.0);

    std::fs::remove_dir_all(dir).ok();
}
