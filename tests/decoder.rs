use tunebreed::engines::decoding::{scale_pitches, MelodyDecoder, MelodyParams};
use tunebreed::engines::generation::Genome;
use tunebreed::types::{ScaleDegree, LOUD_VELOCITY};
use tunebreed::TunebreedError;

fn params(bars: usize, notes_per_bar: usize, pauses: bool) -> MelodyParams {
    MelodyParams {
        bars,
        notes_per_bar,
        pauses,
        key: "C".to_string(),
        scale: "major".to_string(),
        octave: 4,
    }
}

fn genome(bits: &str) -> Genome {
    bits.parse().unwrap()
}

#[test]
fn test_merge_rest_and_note_scenario() {
    let decoder = MelodyDecoder::new(params(1, 4, true)).unwrap();

    // Chunks are little-endian: 0001 = 8 (rest), 0100 = 2
    let melody = decoder.decode(&genome("0000 0000 0001 0100")).unwrap();

    assert_eq!(melody.len(), 3);
    assert_eq!(
        melody.degrees(),
        vec![ScaleDegree::Index(0), ScaleDegree::Rest, ScaleDegree::Index(2)]
    );
    assert_eq!(melody.beats(), vec![2.0, 1.0, 1.0]);
    assert_eq!(melody.velocities(), vec![LOUD_VELOCITY, 0, LOUD_VELOCITY]);
}

#[test]
fn test_notes_never_merge_across_rests() {
    let decoder = MelodyDecoder::new(params(1, 4, true)).unwrap();

    // 3, rest, 3, rest(9)
    let melody = decoder.decode(&genome("1100 0001 1100 1001")).unwrap();

    assert_eq!(
        melody.degrees(),
        vec![
            ScaleDegree::Index(3),
            ScaleDegree::Rest,
            ScaleDegree::Index(3),
            ScaleDegree::Rest,
        ]
    );
    assert!(melody.beats().iter().all(|&b| b == 1.0));
}

#[test]
fn test_all_rests_when_high_bits_set() {
    let decoder = MelodyDecoder::new(params(2, 4, true)).unwrap();
    let melody = decoder.decode(&genome(&"1111".repeat(8))).unwrap();

    assert_eq!(melody.len(), 8);
    assert!(melody.degrees().iter().all(|d| d.is_rest()));
    assert_eq!(melody.total_duration(), 8.0);
}

#[test]
fn test_no_rests_without_pauses() {
    let decoder = MelodyDecoder::new(params(1, 4, false)).unwrap();
    let melody = decoder.decode(&genome("1111 0001 1111 0000")).unwrap();

    // 15 -> 7, 8 -> 0, 15 -> 7, 0 -> 0 (merges with nothing: previous is 7)
    assert_eq!(
        melody.degrees(),
        vec![
            ScaleDegree::Index(7),
            ScaleDegree::Index(0),
            ScaleDegree::Index(7),
            ScaleDegree::Index(0),
        ]
    );
    assert!(melody.degrees().iter().all(|d| !d.is_rest()));
}

#[test]
fn test_decode_is_deterministic() {
    let decoder = MelodyDecoder::new(params(2, 3, true)).unwrap();
    let g = genome("1010 0110 0001 1110 0000 0000");

    let first = decoder.decode_steps(&g, 3).unwrap();
    let second = decoder.decode_steps(&g, 3).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_uneven_note_length() {
    let decoder = MelodyDecoder::new(params(1, 2, true)).unwrap();
    let melody = decoder.decode(&genome("0100 0100")).unwrap();

    assert_eq!(melody.len(), 1);
    assert_eq!(melody.total_duration(), 4.0);
}

#[test]
fn test_c_major_scale() {
    let pitches = scale_pitches("C", "major", 4).unwrap();
    assert_eq!(pitches, vec![60, 62, 64, 65, 67, 69, 71]);
}

#[test]
fn test_blues_scales_have_six_notes() {
    assert_eq!(
        scale_pitches("A", "minorBlues", 3).unwrap(),
        vec![57, 60, 62, 63, 64, 67]
    );
    assert_eq!(scale_pitches("C", "majorblues", 4).unwrap().len(), 6);
}

#[test]
fn test_unknown_scale_falls_back_to_major() {
    let fallback = scale_pitches("D", "bebop", 4).unwrap();
    assert_eq!(fallback, scale_pitches("D", "major", 4).unwrap());
}

#[test]
fn test_steps_shift_two_degrees() {
    let decoder = MelodyDecoder::new(params(1, 4, true)).unwrap();
    // degrees 0, rest, 6, 5
    let (_, steps) = decoder.decode_steps(&genome("0000 0001 0110 1010"), 3).unwrap();

    let pitches = |s: usize| -> Vec<Option<u8>> { steps[s].notes.iter().map(|n| n.pitch).collect() };

    assert_eq!(steps.len(), 3);
    assert_eq!(pitches(0), vec![Some(60), None, Some(71), Some(69)]);
    // wraps within the octave: (6 + 2) % 7 = 1
    assert_eq!(pitches(1), vec![Some(64), None, Some(62), Some(60)]);
    assert_eq!(pitches(2), vec![Some(67), None, Some(65), Some(64)]);

    for step in &steps {
        let durations: Vec<f64> = step.notes.iter().map(|n| n.duration).collect();
        assert_eq!(durations, vec![1.0, 1.0, 1.0, 1.0]);
    }
}

#[test]
fn test_zero_notes_per_bar_rejected() {
    let result = MelodyDecoder::new(params(1, 0, true));
    assert!(matches!(result, Err(TunebreedError::InvalidParameter(_))));
}

#[test]
fn test_wrong_genome_length_rejected() {
    let decoder = MelodyDecoder::new(params(1, 4, true)).unwrap();

    let short = decoder.decode(&genome("0000 0000 0000"));
    assert!(matches!(short, Err(TunebreedError::InvalidParameter(_))));

    let long = decoder.decode(&genome("0000 0000 0000 0000 0000"));
    assert!(matches!(long, Err(TunebreedError::InvalidParameter(_))));
}

#[test]
fn test_unknown_key_rejected() {
    let mut p = params(1, 4, true);
    p.key = "X#".to_string();
    assert!(MelodyDecoder::new(p).is_err());
}
