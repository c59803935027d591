// syn.mml -- a band-limited square wave renderer for music macro language
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Notation text and positions within it.

/// Notation text normalized for decoding.
///
/// Commands are case-insensitive, so the text is stored in uppercase.
/// Only ASCII letters are converted, which keeps byte offsets identical
/// to those of the original text.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Song {
    text: String,
}

impl Song {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_ascii_uppercase(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Byte offset of the next character to be decoded.
///
/// The cursor does not borrow the song, so it can be stored alongside it
/// and handed to the decoding functions explicitly.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd)]
pub struct Cursor {
    offset: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self { offset: 0 }
    }

    pub fn at(offset: usize) -> Self {
        Self { offset }
    }

    pub fn offset(self) -> usize {
        self.offset
    }

    pub fn eof(self, song: &Song) -> bool {
        self.offset >= song.len()
    }

    /// The next character, without consuming it.
    pub fn peek(self, song: &Song) -> Option<char> {
        song.text().get(self.offset..)?.chars().next()
    }

    /// Consume the next character, returning it with its offset.
    pub fn next_char(&mut self, song: &Song) -> Option<(usize, char)> {
        let ch = self.peek(song)?;
        let pos = self.offset;
        self.offset += ch.len_utf8();
        Some((pos, ch))
    }

    /// Consume the next character if it satisfies `predicate`.
    pub fn next_if<P: Fn(char) -> bool>(&mut self, song: &Song, predicate: P) -> Option<char> {
        match self.peek(song) {
            Some(ch) if predicate(ch) => {
                self.offset += ch.len_utf8();
                Some(ch)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalization_keeps_offsets() {
        let song = Song::new("t4 ä c#");
        assert_eq!(song.text(), "T4 ä C#");
        assert_eq!(song.len(), "t4 ä c#".len());
    }

    #[test]
    fn walking() {
        let song = Song::new("aä1");
        let mut cursor = Cursor::new();
        assert_eq!(cursor.next_char(&song), Some((0, 'A')));
        assert_eq!(cursor.next_if(&song, |c| c.is_ascii_digit()), None);
        assert_eq!(cursor.next_char(&song), Some((1, 'ä')));
        assert_eq!(cursor.offset(), 3);
        assert!(!cursor.eof(&song));
        assert_eq!(cursor.next_if(&song, |c| c.is_ascii_digit()), Some('1'));
        assert!(cursor.eof(&song));
        assert_eq!(cursor.peek(&song), None);
        assert_eq!(cursor.next_char(&song), None);
        assert_eq!(cursor.offset(), 4);
    }
}
