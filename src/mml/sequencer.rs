// syn.mml -- a band-limited square wave renderer for music macro language
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The state machine stepping through a song one tick at a time.

use log::trace;

use super::command::{duration, next_command, Command, SongError};
use super::cursor::{Cursor, Song};
use crate::note::{Note, NUM_OCTAVES};
use crate::tuning::PitchTable;

pub const DEFAULT_OCTAVE: u8 = 1;
pub const DEFAULT_TEMPO: u8 = 4;

/// Turns notation into a sequence of phase rates, one per tick of the song.
///
/// The sequencer does not produce audio itself. The phase rate indicates how far
/// to move through a wavetable per sample, and a rate of 0 indicates silence.
pub struct Sequencer<'a> {
    song: &'a Song,
    pitches: &'a PitchTable,
    /// `None` once the end of the song has been decoded.
    cursor: Option<Cursor>,
    octave: u8,
    tempo: u8,
    /// Ticks left for the current note or rest, including the current one.
    remaining: u32,
    output: u32,
}

impl<'a> Sequencer<'a> {
    pub fn new(song: &'a Song, pitches: &'a PitchTable) -> Self {
        Self::with_cursor(song, pitches, Cursor::new())
    }

    /// Start decoding somewhere in the middle of a song, with default settings.
    pub fn with_cursor(song: &'a Song, pitches: &'a PitchTable, cursor: Cursor) -> Self {
        Self {
            song,
            pitches,
            cursor: Some(cursor),
            octave: DEFAULT_OCTAVE,
            tempo: DEFAULT_TEMPO,
            remaining: 0,
            output: 0,
        }
    }

    /// Produce the phase rate of the next tick.
    ///
    /// Returns `Ok(None)` when the song is over; no further ticks should be played then.
    /// Settings changed on the way to a note or rest only take effect once it has
    /// been decoded successfully, so after an error the sequencer is stuck at the
    /// offending command with its state untouched.
    pub fn tick(&mut self) -> Result<Option<u32>, SongError> {
        // still playing the last note or rest
        if self.remaining > 1 {
            self.remaining -= 1;
            return Ok(Some(self.output));
        }

        let mut cursor = match self.cursor {
            Some(cursor) => cursor,
            None => return Ok(None),
        };

        let mut octave = self.octave;
        let mut tempo = self.tempo;
        loop {
            let (offset, command) = match next_command(self.song, &mut cursor)? {
                Some(decoded) => decoded,
                None => {
                    trace!("{:6}: end of song", cursor.offset());
                    self.octave = octave;
                    self.tempo = tempo;
                    self.cursor = None;
                    self.remaining = 0;
                    self.output = 0;
                    return Ok(None);
                }
            };

            match command {
                Command::OctaveUp => {
                    if octave < NUM_OCTAVES - 1 {
                        octave += 1;
                    }
                }
                Command::OctaveDown => octave = octave.saturating_sub(1),
                Command::SetOctave(value) => octave = value,
                Command::SetTempo(value) => tempo = value,
                Command::Rest { length } => {
                    self.remaining = duration(length, tempo);
                    self.output = 0;
                    trace!("{:6}: rest for {} ticks", offset, self.remaining);
                    break;
                }
                Command::Note {
                    name,
                    accidental,
                    length,
                } => {
                    let note = Note::named_clamped(name, accidental, octave);
                    self.remaining = duration(length, tempo);
                    self.output = self.pitches.rate(note);
                    trace!(
                        "{:6}: play {:?} for {} ticks at rate {}",
                        offset,
                        note,
                        self.remaining,
                        self.output
                    );
                    break;
                }
            }
        }

        self.octave = octave;
        self.tempo = tempo;
        self.cursor = Some(cursor);
        Ok(Some(self.output))
    }

    pub fn is_done(&self) -> bool {
        self.cursor.is_none()
    }

    /// Byte offset of the next command to be decoded, `None` when done.
    pub fn position(&self) -> Option<usize> {
        self.cursor.map(Cursor::offset)
    }

    pub fn octave(&self) -> u8 {
        self.octave
    }

    pub fn tempo(&self) -> u8 {
        self.tempo
    }

    /// Ticks left for the current note or rest, including the most recent one.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

impl<'a> Iterator for Sequencer<'a> {
    type Item = Result<u32, SongError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.tick().transpose()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mml::command::Argument;
    use crate::note::{Accidental, NoteName};
    use crate::tuning::Tuning;

    fn pitches() -> PitchTable {
        PitchTable::new(&Tuning::default(), 44100)
    }

    fn ticks(input: &str) -> Result<Vec<u32>, SongError> {
        let song = Song::new(input);
        let pitches = pitches();
        Sequencer::new(&song, &pitches).collect()
    }

    fn rate(name: NoteName, accidental: Accidental, octave: u8) -> u32 {
        pitches().rate(Note::named_clamped(name, accidental, octave))
    }

    #[test]
    fn empty_song_is_done_immediately() {
        let song = Song::new("");
        let pitches = pitches();
        let mut seq = Sequencer::new(&song, &pitches);
        assert!(!seq.is_done());
        assert_eq!(seq.tick(), Ok(None));
        assert!(seq.is_done());
        assert_eq!(seq.position(), None);
        assert_eq!(seq.tick(), Ok(None));

        assert_eq!(ticks("  \n\t"), Ok(vec![]));
        assert_eq!(ticks("o2 t0 > <"), Ok(vec![]));
    }

    #[test]
    fn rest_duration() {
        assert_eq!(ticks("R5"), Ok(vec![0; 5 * 8]));
        assert_eq!(ticks("t0 r0"), Ok(vec![0]));
    }

    #[test]
    fn note_duration_and_pitch() {
        let c0 = rate(NoteName::C, Accidental::Base, 0);
        assert_eq!(c0, pitches().rates()[0]);
        assert_eq!(ticks("T0 O0 C1"), Ok(vec![c0; 2]));
        assert_eq!(ticks("T9 O0 C9").map(|t| t.len()), Ok(320));
        // defaults: octave 1, tempo 4
        let a1 = rate(NoteName::A, Accidental::Base, 1);
        assert_eq!(ticks("a0"), Ok(vec![a1; 5]));
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(ticks("t0o2c#3r1<g-2"), ticks("T0O2C#3R1<G-2"));
    }

    #[test]
    fn sequence_of_events() {
        let c = rate(NoteName::C, Accidental::Base, 1);
        let e = rate(NoteName::E, Accidental::Base, 1);
        let mut expected = vec![c; 2];
        expected.extend(vec![0; 1]);
        expected.extend(vec![e; 3]);
        assert_eq!(ticks("t0 c1 r0 e2"), Ok(expected));
    }

    #[test]
    fn octave_clamps() {
        let song = Song::new("o0 c#9 < c0");
        let pitches = pitches();
        let mut seq = Sequencer::new(&song, &pitches);
        seq.tick().unwrap();
        assert_eq!(seq.octave(), 0);
        let last: Vec<_> = seq.collect::<Result<_, _>>().unwrap();
        assert_eq!(last.last(), Some(&pitches.rates()[0]));

        let top = rate(NoteName::C, Accidental::Base, 2);
        assert_eq!(ticks("t0 o2 > c0"), Ok(vec![top]));
        assert_eq!(ticks("t0 o1 >>>> c0"), Ok(vec![top]));
        assert_eq!(ticks("t0 o1 <<<< c0"), Ok(vec![pitches.rates()[0]]));
    }

    #[test]
    fn accidental_clamps() {
        let rates = pitches().rates().to_vec();
        assert_eq!(ticks("t0 o0 c-0"), Ok(vec![rates[0]]));
        assert_eq!(ticks("t0 o2 b#0"), Ok(vec![rates[35]]));
        // a flat C keeps the C of the current octave
        assert_eq!(ticks("t0 o1 c-0"), Ok(vec![rates[12]]));
        assert_eq!(ticks("t0 o1 c-0 o2 c-0"), Ok(vec![rates[12], rates[24]]));
        assert_eq!(ticks("t0 o0 b+0"), Ok(vec![rates[12]]));
    }

    #[test]
    fn settings_persist() {
        let song = Song::new("t7 o2 c0 d0");
        let pitches = pitches();
        let mut seq = Sequencer::new(&song, &pitches);
        seq.tick().unwrap();
        assert_eq!((seq.octave(), seq.tempo(), seq.remaining()), (2, 7, 8));
        assert_eq!(seq.position(), Some(8));
    }

    #[test]
    fn out_of_range_octave_fails() {
        assert_eq!(
            ticks("O3"),
            Err(SongError::InvalidArgument {
                argument: Argument::Octave,
                found: Some('3'),
                offset: 1
            })
        );
    }

    #[test]
    fn errors_surface_when_reached() {
        let song = Song::new("t0 c1 x");
        let pitches = pitches();
        let mut seq = Sequencer::new(&song, &pitches);
        assert!(seq.tick().unwrap().is_some());
        assert!(seq.tick().unwrap().is_some());
        assert_eq!(
            seq.tick(),
            Err(SongError::InvalidCharacter { ch: 'X', offset: 6 })
        );
        assert!(!seq.is_done());
    }

    #[test]
    fn failed_tick_leaves_settings_alone() {
        let song = Song::new("t0 c0 >t2 x");
        let pitches = pitches();
        let mut seq = Sequencer::new(&song, &pitches);
        assert!(seq.tick().unwrap().is_some());
        for _ in 0..3 {
            assert_eq!(
                seq.tick(),
                Err(SongError::InvalidCharacter { ch: 'X', offset: 10 })
            );
            assert_eq!((seq.octave(), seq.tempo()), (1, 0));
            assert_eq!(seq.position(), Some(5));
        }
    }

    #[test]
    fn resume_from_cursor() {
        let song = Song::new("zz c0");
        let pitches = pitches();
        let seq = Sequencer::with_cursor(&song, &pitches, Cursor::at(2));
        let c1 = pitches.rates()[12];
        assert_eq!(seq.collect::<Result<Vec<_>, _>>(), Ok(vec![c1; 5]));
    }
}
