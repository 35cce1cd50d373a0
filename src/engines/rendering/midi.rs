// MIDI output for realized melodies.
//
// Each step becomes its own Standard MIDI File: step 0 is written to the
// requested path, step i to `<base>_step{i}.mid`. A file holds a single track
// with the tempo, a piano program change and one note on/off pair per note.
// Rests only advance time.

use crate::engines::rendering::renderer::Renderer;
use crate::error::TunebreedError;
use crate::types::StepSequence;
use log::debug;
use midly::{
    num::{u15, u24, u28, u4, u7},
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
};
use std::path::{Path, PathBuf};

/// Ticks per quarter note in MIDI output.
pub const TICKS_PER_QUARTER: u16 = 480;

const CHANNEL: u8 = 0;
const PIANO_PROGRAM: u8 = 0;

/// Writes one `.mid` file per step next to `path`
pub struct MidiRenderer {
    path: PathBuf,
}

impl MidiRenderer {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Output file for `step`; the extension is always `.mid`
    pub fn step_path(&self, step: usize) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "melody".to_string());
        let name = if step == 0 {
            format!("{}.mid", stem)
        } else {
            format!("{}_step{}.mid", stem, step)
        };
        self.path.with_file_name(name)
    }
}

impl Renderer for MidiRenderer {
    type Artifact = Vec<PathBuf>;

    fn render(&self, steps: &[StepSequence], tempo: u32) -> Result<Vec<PathBuf>, TunebreedError> {
        if tempo == 0 {
            return Err(TunebreedError::InvalidParameter(
                "tempo must be positive".to_string(),
            ));
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut written = Vec::with_capacity(steps.len());
        for sequence in steps {
            let path = self.step_path(sequence.step);
            let bytes = midi_bytes(sequence, tempo)?;
            std::fs::write(&path, &bytes)?;
            debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
            written.push(path);
        }

        Ok(written)
    }
}

/// Encode one step as an in-memory SMF
pub fn midi_bytes(sequence: &StepSequence, tempo: u32) -> Result<Vec<u8>, TunebreedError> {
    let smf = sequence_to_smf(sequence, tempo);
    let mut buf = Vec::new();
    smf.write_std(&mut buf)?;
    Ok(buf)
}

fn duration_ticks(quarters: f64) -> u32 {
    (quarters * TICKS_PER_QUARTER as f64).round() as u32
}

fn sequence_to_smf(sequence: &StepSequence, tempo: u32) -> Smf<'static> {
    let mut smf = Smf::new(Header::new(
        Format::SingleTrack,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));

    let channel = u4::new(CHANNEL);
    let mut track: Track<'static> = Vec::new();
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(60_000_000 / tempo))),
    });
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Midi {
            channel,
            message: MidiMessage::ProgramChange {
                program: u7::new(PIANO_PROGRAM),
            },
        },
    });

    // Ticks of silence before the next event
    let mut pending: u32 = 0;
    for note in &sequence.notes {
        let ticks = duration_ticks(note.duration);
        match note.pitch {
            None => pending += ticks,
            Some(pitch) => {
                track.push(TrackEvent {
                    delta: u28::new(pending),
                    kind: TrackEventKind::Midi {
                        channel,
                        message: MidiMessage::NoteOn {
                            key: u7::new(pitch),
                            vel: u7::new(note.velocity.min(127)),
                        },
                    },
                });
                track.push(TrackEvent {
                    delta: u28::new(ticks),
                    kind: TrackEventKind::Midi {
                        channel,
                        message: MidiMessage::NoteOff {
                            key: u7::new(pitch),
                            vel: u7::new(0),
                        },
                    },
                });
                pending = 0;
            }
        }
    }

    track.push(TrackEvent {
        delta: u28::new(pending),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    smf.tracks.push(track);

    smf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StepNote;

    fn note(pitch: Option<u8>, duration: f64) -> StepNote {
        StepNote {
            pitch,
            duration,
            velocity: if pitch.is_some() { 127 } else { 0 },
        }
    }

    #[test]
    fn test_sequence_to_smf_events() {
        let sequence = StepSequence {
            step: 0,
            notes: vec![note(Some(60), 2.0), note(None, 1.0), note(Some(64), 1.0)],
        };

        let smf = sequence_to_smf(&sequence, 120);
        assert_eq!(smf.tracks.len(), 1);
        let track = &smf.tracks[0];
        // tempo, program, 2 x (on, off), end of track
        assert_eq!(track.len(), 7);

        // Second note starts after the rest
        assert_eq!(track[4].delta.as_int(), 480);
        assert_eq!(track[3].delta.as_int(), 960);
    }

    #[test]
    fn test_midi_bytes_round_trip_header() {
        let sequence = StepSequence {
            step: 0,
            notes: vec![note(Some(72), 1.0)],
        };
        let bytes = midi_bytes(&sequence, 128).unwrap();
        let parsed = Smf::parse(&bytes).unwrap();
        assert_eq!(parsed.tracks.len(), 1);
        assert_eq!(&bytes[..4], b"MThd");
    }

    #[test]
    fn test_step_paths() {
        let renderer = MidiRenderer::new("out/cand.midi");
        assert_eq!(renderer.step_path(0), PathBuf::from("out/cand.mid"));
        assert_eq!(renderer.step_path(2), PathBuf::from("out/cand_step2.mid"));
    }
}
