// syn.mml -- a band-limited square wave renderer for music macro language
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Decoding of individual commands from the notation.

use std::fmt;

use snafu::Snafu;

use super::cursor::{Cursor, Song};
use crate::note::{Accidental, NoteName, NUM_OCTAVES};

/// Ticks per length digit, before multiplying with the tempo factor.
pub const LENGTH_TICKS: [u32; 10] = [1, 2, 3, 4, 6, 8, 12, 16, 24, 32];

/// Highest tempo digit. Larger digits mean slower playback.
pub const MAX_TEMPO: u8 = 9;

/// Number of ticks a note or rest of the given length lasts at `tempo`.
///
/// # Examples
///
/// ```
/// use syn_mml::mml::command::duration;
///
/// assert_eq!(duration(0, 0), 1);
/// assert_eq!(duration(5, 4), 40);
/// assert_eq!(duration(9, 9), 320);
/// ```
pub fn duration(length: u8, tempo: u8) -> u32 {
    (tempo as u32 + 1) * LENGTH_TICKS[length as usize]
}

/// A single decoded command.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    /// `>`
    OctaveUp,
    /// `<`
    OctaveDown,
    /// `O<digit>`
    SetOctave(u8),
    /// `T<digit>`
    SetTempo(u8),
    /// `R<digit>`
    Rest { length: u8 },
    /// `<letter>[#+-]<digit>`
    Note {
        name: NoteName,
        accidental: Accidental,
        length: u8,
    },
}

/// The digit arguments taken by commands.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Argument {
    Octave,
    Tempo,
    RestLength,
    NoteLength,
}

impl Argument {
    /// Largest accepted value, the smallest one is always zero.
    pub fn max(self) -> u8 {
        match self {
            Argument::Octave => NUM_OCTAVES - 1,
            Argument::Tempo => MAX_TEMPO,
            Argument::RestLength | Argument::NoteLength => LENGTH_TICKS.len() as u8 - 1,
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Octave => write!(f, "O command"),
            Argument::Tempo => write!(f, "T command"),
            Argument::RestLength => write!(f, "R command"),
            Argument::NoteLength => write!(f, "length in note command"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum SongError {
    #[snafu(display("Invalid character {:?} in song at offset {}", ch, offset))]
    InvalidCharacter { ch: char, offset: usize },
    #[snafu(display(
        "Invalid {} at offset {}: expected a digit from 0 to {}, found {}",
        argument,
        offset,
        argument.max(),
        describe(found)
    ))]
    InvalidArgument {
        argument: Argument,
        found: Option<char>,
        offset: usize,
    },
}

impl SongError {
    /// Byte offset of the offending character in the notation.
    pub fn offset(&self) -> usize {
        match self {
            SongError::InvalidCharacter { offset, .. } => *offset,
            SongError::InvalidArgument { offset, .. } => *offset,
        }
    }
}

fn describe(found: &Option<char>) -> String {
    match found {
        Some(ch) => format!("{:?}", ch),
        None => "end of song".to_string(),
    }
}

/// Read a single digit argument, which must not exceed `argument.max()`.
pub fn read_digit(song: &Song, cursor: &mut Cursor, argument: Argument) -> Result<u8, SongError> {
    let offset = cursor.offset();
    let found = cursor.next_char(song).map(|(_, ch)| ch);
    match found.and_then(|ch| ch.to_digit(10)) {
        Some(digit) if digit <= argument.max() as u32 => Ok(digit as u8),
        _ => Err(SongError::InvalidArgument {
            argument,
            found,
            offset,
        }),
    }
}

/// Decode the next command at the cursor, skipping whitespace.
/// Returns the command together with the offset it started at,
/// or `None` once the end of the song is reached.
pub fn next_command(song: &Song, cursor: &mut Cursor) -> Result<Option<(usize, Command)>, SongError> {
    while let Some((pos, ch)) = cursor.next_char(song) {
        let command = match ch {
            '>' => Command::OctaveUp,
            '<' => Command::OctaveDown,
            'O' => Command::SetOctave(read_digit(song, cursor, Argument::Octave)?),
            'T' => Command::SetTempo(read_digit(song, cursor, Argument::Tempo)?),
            ' ' | '\n' | '\r' | '\t' => continue,
            'R' => Command::Rest {
                length: read_digit(song, cursor, Argument::RestLength)?,
            },
            _ => match NoteName::from_letter(ch) {
                Some(name) => {
                    // an optional sharp or flat sits between the letter and the length
                    let accidental = cursor
                        .next_if(song, |c| Accidental::from_symbol(c).is_some())
                        .and_then(Accidental::from_symbol)
                        .unwrap_or(Accidental::Base);
                    let length = read_digit(song, cursor, Argument::NoteLength)?;
                    Command::Note {
                        name,
                        accidental,
                        length,
                    }
                }
                None => return Err(SongError::InvalidCharacter { ch, offset: pos }),
            },
        };
        return Ok(Some((pos, command)));
    }
    Ok(None)
}

#[cfg(test)]
mod test {
    use super::*;
    use expect_test::{expect, Expect};

    fn decode_all(input: &str) -> Result<Vec<(usize, Command)>, SongError> {
        let song = Song::new(input);
        let mut cursor = Cursor::new();
        let mut commands = Vec::new();
        while let Some(command) = next_command(&song, &mut cursor)? {
            commands.push(command);
        }
        Ok(commands)
    }

    fn check_error(input: &str, output: Expect) {
        let err = decode_all(input).unwrap_err();
        output.assert_eq(&err.to_string());
    }

    #[test]
    fn decode_stream() {
        let commands = decode_all("t2 o0 c#4 r0 >b-1< e9").unwrap();
        expect![[r#"
            [
                (
                    0,
                    SetTempo(
                        2,
                    ),
                ),
                (
                    3,
                    SetOctave(
                        0,
                    ),
                ),
                (
                    6,
                    Note {
                        name: C,
                        accidental: Sharp,
                        length: 4,
                    },
                ),
                (
                    10,
                    Rest {
                        length: 0,
                    },
                ),
                (
                    13,
                    OctaveUp,
                ),
                (
                    14,
                    Note {
                        name: B,
                        accidental: Flat,
                        length: 1,
                    },
                ),
                (
                    17,
                    OctaveDown,
                ),
                (
                    19,
                    Note {
                        name: E,
                        accidental: Base,
                        length: 9,
                    },
                ),
            ]"#]]
        .assert_eq(&format!("{:#?}", commands));
    }

    #[test]
    fn empty_and_blank() {
        assert_eq!(decode_all(""), Ok(vec![]));
        assert_eq!(decode_all(" \t\r\n "), Ok(vec![]));
    }

    #[test]
    fn sharp_spellings() {
        let commands = decode_all("f+1 F#1").unwrap();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].1, commands[1].1);
    }

    #[test]
    fn error_messages() {
        check_error("o3", expect![["Invalid O command at offset 1: expected a digit from 0 to 2, found '3'"]]);
        check_error("t", expect![["Invalid T command at offset 1: expected a digit from 0 to 9, found end of song"]]);
        check_error("rx", expect![["Invalid R command at offset 1: expected a digit from 0 to 9, found 'X'"]]);
        check_error(
            "c#",
            expect![["Invalid length in note command at offset 2: expected a digit from 0 to 9, found end of song"]],
        );
        check_error("c4 h4", expect![["Invalid character 'H' in song at offset 3"]]);
        check_error("c4;", expect![["Invalid character ';' in song at offset 2"]]);
    }

    #[test]
    fn error_offsets() {
        assert_eq!(
            decode_all("c4 d##4"),
            Err(SongError::InvalidArgument {
                argument: Argument::NoteLength,
                found: Some('#'),
                offset: 5,
            })
        );
        assert_eq!(decode_all("ä").unwrap_err().offset(), 0);
        assert_eq!(decode_all("a1ä").unwrap_err().offset(), 2);
    }

    #[test]
    fn partial_decoding() {
        // decoding stops right after the command, before any trailing garbage
        let song = Song::new("c4!");
        let mut cursor = Cursor::new();
        assert!(next_command(&song, &mut cursor).unwrap().is_some());
        assert_eq!(cursor.offset(), 2);
        assert!(next_command(&song, &mut cursor).is_err());
    }
}
