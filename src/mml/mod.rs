// syn.mml -- a band-limited square wave renderer for music macro language
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Decoding of music macro language (MML) notation.
//!
//! The notation is a flat stream of single-letter commands:
//! `A`-`G` play notes, `R` rests, `O`, `<` and `>` change the octave
//! and `T` changes the tempo. Notes and rests take a length digit,
//! which is scaled by the tempo to obtain their duration in ticks.

pub mod command;
pub mod cursor;
pub mod sequencer;
pub mod span;

pub use command::{Argument, Command, SongError};
pub use cursor::{Cursor, Song};
pub use sequencer::Sequencer;
