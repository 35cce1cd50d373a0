//! Scale table and key parsing.
//!
//! Scales are stored as semitone offsets from the tonic and realized into one
//! octave of absolute MIDI pitches starting at the key's tonic.

use crate::error::TunebreedError;
use log::warn;

/// Scale used when a requested name is not in the table
pub const FALLBACK_SCALE: &str = "major";

/// Supported scale shapes, matched case-insensitively by name
pub const SCALE_TABLE: &[(&str, &[u8])] = &[
    ("major", &[0, 2, 4, 5, 7, 9, 11]),
    ("minor", &[0, 2, 3, 5, 7, 8, 10]),
    ("dorian", &[0, 2, 3, 5, 7, 9, 10]),
    ("phrygian", &[0, 1, 3, 5, 7, 8, 10]),
    ("lydian", &[0, 2, 4, 6, 7, 9, 11]),
    ("mixolydian", &[0, 2, 4, 5, 7, 9, 10]),
    ("majorBlues", &[0, 2, 3, 4, 7, 9]),
    ("minorBlues", &[0, 3, 5, 6, 7, 10]),
];

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];
const FLAT_NAMES: [(&str, u8); 5] = [("Db", 1), ("Eb", 3), ("Gb", 6), ("Ab", 8), ("Bb", 10)];

/// Names accepted for the `scale` parameter
pub fn scale_names() -> Vec<&'static str> {
    SCALE_TABLE.iter().map(|(name, _)| *name).collect()
}

/// Pitch class (0 = C) of a key name such as `"F#"` or `"bb"`
pub fn pitch_class(key: &str) -> Result<u8, TunebreedError> {
    let key = key.trim();
    SHARP_NAMES
        .iter()
        .position(|name| name.eq_ignore_ascii_case(key))
        .map(|pc| pc as u8)
        .or_else(|| {
            FLAT_NAMES
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(key))
                .map(|(_, pc)| *pc)
        })
        .ok_or_else(|| TunebreedError::InvalidParameter(format!("Unknown key: {:?}", key)))
}

/// MIDI number of the tonic; C4 = 60
pub fn tonic_midi(key: &str, octave: i8) -> Result<i32, TunebreedError> {
    Ok(12 * (octave as i32 + 1) + pitch_class(key)? as i32)
}

fn lookup(name: &str) -> Option<&'static [u8]> {
    SCALE_TABLE
        .iter()
        .find(|(entry, _)| entry.eq_ignore_ascii_case(name))
        .map(|(_, intervals)| *intervals)
}

/// Interval offsets for `name`, falling back to major for unknown names
pub fn scale_intervals(name: &str) -> Result<&'static [u8], TunebreedError> {
    if let Some(intervals) = lookup(name).filter(|i| !i.is_empty()) {
        return Ok(intervals);
    }

    warn!("Unknown scale {:?}, using {}", name, FALLBACK_SCALE);
    lookup(FALLBACK_SCALE)
        .filter(|i| !i.is_empty())
        .ok_or_else(|| TunebreedError::UnresolvedScale(name.to_string()))
}

/// Absolute MIDI pitches of one octave of `scale` starting at `key` in `octave`
pub fn scale_pitches(key: &str, scale: &str, octave: i8) -> Result<Vec<u8>, TunebreedError> {
    let tonic = tonic_midi(key, octave)?;
    scale_intervals(scale)?
        .iter()
        .map(|&offset| {
            let pitch = tonic + offset as i32;
            u8::try_from(pitch)
                .ok()
                .filter(|p| *p <= 127)
                .ok_or_else(|| {
                    TunebreedError::InvalidParameter(format!(
                        "Key {} in octave {} leaves the MIDI range",
                        key, octave
                    ))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_class_aliases() {
        assert_eq!(pitch_class("C").unwrap(), 0);
        assert_eq!(pitch_class("f#").unwrap(), 6);
        assert_eq!(pitch_class("Bb").unwrap(), 10);
        assert!(pitch_class("H").is_err());
    }

    #[test]
    fn test_every_scale_resolves() {
        for name in scale_names() {
            let pitches = scale_pitches("C", name, 4).unwrap();
            assert!(!pitches.is_empty(), "{} is empty", name);
            assert_eq!(pitches[0], 60);
        }
    }

    #[test]
    fn test_octave_out_of_range() {
        assert!(scale_pitches("B", "major", 9).is_err());
        assert!(scale_pitches("C", "major", -2).is_err());
    }
}
