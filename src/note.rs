// syn.mml -- a band-limited square wave renderer for music macro language
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Definitions of what a note is.

/// Number of octaves that can be addressed by the `O` command.
pub const NUM_OCTAVES: u8 = 3;

/// Semitones per octave in equal temperament.
pub const NOTES_PER_OCTAVE: u8 = 12;

/// Total number of playable notes.
pub const NUM_NOTES: usize = NUM_OCTAVES as usize * NOTES_PER_OCTAVE as usize;

/// A "note" is an index into the range of playable pitches.
///
/// Index 0 is the C of the lowest octave, each step is one semitone,
/// and the highest note is the B of octave `NUM_OCTAVES - 1`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Note(u8);

/// The name of a note in standard notation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NoteName {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

/// Any offset applied to a note in standard notation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Accidental {
    /// The note is a half-tone lower then indicated by its name.
    Flat,
    /// The note is left unchanged.
    Base,
    /// The note is a half-tone higher then indicated by its name.
    Sharp,
}

impl NoteName {
    /// Map an (uppercase) letter to a note name.
    pub fn from_letter(letter: char) -> Option<NoteName> {
        match letter {
            'A' => Some(NoteName::A),
            'B' => Some(NoteName::B),
            'C' => Some(NoteName::C),
            'D' => Some(NoteName::D),
            'E' => Some(NoteName::E),
            'F' => Some(NoteName::F),
            'G' => Some(NoteName::G),
            _ => None,
        }
    }

    /// Semitones above the C of the same octave.
    pub fn semitone(self) -> i32 {
        match self {
            NoteName::C => 0,
            NoteName::D => 2,
            NoteName::E => 4,
            NoteName::F => 5,
            NoteName::G => 7,
            NoteName::A => 9,
            NoteName::B => 11,
        }
    }
}

impl Accidental {
    /// Map the character following a note letter to an accidental.
    /// Returns `None` if the character is not an accidental symbol.
    pub fn from_symbol(symbol: char) -> Option<Accidental> {
        match symbol {
            '#' | '+' => Some(Accidental::Sharp),
            '-' => Some(Accidental::Flat),
            _ => None,
        }
    }

    pub fn semitones(self) -> i32 {
        match self {
            Accidental::Flat => -1,
            Accidental::Base => 0,
            Accidental::Sharp => 1,
        }
    }
}

impl Note {
    pub const LOWEST: Note = Note(0);
    pub const HIGHEST: Note = Note(NUM_NOTES as u8 - 1);

    /// Convert a note from standard notation to a note index.
    /// Returns `None` if the note lies outside of the playable range.
    ///
    /// # Examples
    ///
    /// ```
    /// use syn_mml::note::*;
    ///
    /// assert_eq!(Note::try_named(NoteName::A, Accidental::Base, 1), Some(Note::from_index(21)));
    /// assert_eq!(Note::try_named(NoteName::C, Accidental::Sharp, 0), Some(Note::from_index(1)));
    /// assert_eq!(Note::try_named(NoteName::C, Accidental::Flat, 0), None);
    /// assert_eq!(Note::try_named(NoteName::B, Accidental::Sharp, 2), None);
    /// ```
    pub fn try_named(name: NoteName, accidental: Accidental, octave: u8) -> Option<Note> {
        Self::try_from_index(Self::raw_index(name, accidental, octave))
    }

    /// Like `try_named`, but an accidental never leaves the octave downwards:
    /// a flat on the lowest note of an octave is ignored. Above the top of the
    /// playable range, the highest note is used instead.
    ///
    /// # Panics
    ///
    /// - If `octave` is not below `NUM_OCTAVES`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use syn_mml::note::*;
    ///
    /// assert_eq!(Note::named_clamped(NoteName::C, Accidental::Flat, 0), Note::LOWEST);
    /// assert_eq!(Note::named_clamped(NoteName::C, Accidental::Flat, 1), Note::from_index(12));
    /// assert_eq!(Note::named_clamped(NoteName::B, Accidental::Sharp, 2), Note::HIGHEST);
    /// assert_eq!(Note::named_clamped(NoteName::B, Accidental::Sharp, 1), Note::from_index(24));
    /// ```
    pub fn named_clamped(name: NoteName, accidental: Accidental, octave: u8) -> Note {
        assert!(octave < NUM_OCTAVES, "octave {} out of range", octave);
        // the offset within the octave is nudged before the octave is applied
        let mut offset = name.semitone() + accidental.semitones();
        if offset >= NUM_NOTES as i32 {
            offset -= 1;
        } else if offset < 0 {
            offset += 1;
        }
        let index = octave as i32 * NOTES_PER_OCTAVE as i32 + offset;
        Note(index.min(NUM_NOTES as i32 - 1) as u8)
    }

    fn raw_index(name: NoteName, accidental: Accidental, octave: u8) -> i32 {
        octave as i32 * NOTES_PER_OCTAVE as i32 + name.semitone() + accidental.semitones()
    }

    pub fn from_index(index: u8) -> Note {
        assert!((index as usize) < NUM_NOTES, "only notes 0 - {} are playable", NUM_NOTES - 1);
        Note(index)
    }

    pub fn try_from_index(index: i32) -> Option<Note> {
        if index >= 0 && index < NUM_NOTES as i32 {
            Some(Note(index as u8))
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}
