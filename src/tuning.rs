// syn.mml -- a band-limited square wave renderer for music macro language
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Equal temperament tuning and the table of phase increments derived from it.

use log::debug;

use crate::note::*;

/// Defines the tuning by assigning a frequency to a certain note.
/// This defines the frequencies of all other notes at a standard tuning of 12 half-tones per octave.
///
/// # Examples
///
/// ```
/// use syn_mml::note::*;
/// use syn_mml::tuning::*;
/// assert_eq!(Tuning::default().frequency(Note::from_index(9)), 220.0);
/// assert_eq!(Tuning::default().frequency(Note::from_index(33)), 880.0);
/// ```
pub struct Tuning {
    pub reference_note: Note,
    pub reference_frequency: f64,
}

impl Tuning {
    /// Return the frequency of a note relative to this tuning.
    pub fn frequency(&self, other: Note) -> f64 {
        let semitones = other.index() as i32 - self.reference_note.index() as i32;
        let octaves = semitones as f64 / 12.0;
        self.reference_frequency * 2.0f64.powf(octaves)
    }
}

/// Default concert tuning, where the A of the middle octave corresponds to 440 Hz.
impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            reference_note: Note::named_clamped(NoteName::A, Accidental::Base, 1),
            reference_frequency: 440.0,
        }
    }
}

/// Convert a frequency to the amount a 32 bit phase counter advances per sample,
/// where a full period spans the whole `u32` range.
///
/// Frequencies at or above the sample rate saturate at `u32::MAX`.
///
/// # Examples
///
/// ```
/// # use syn_mml::tuning::*;
/// assert_eq!(phase_rate(0.0, 44100), 0);
/// assert_eq!(phase_rate(11025.0, 44100), u32::MAX / 4);
/// assert_eq!(phase_rate(50000.0, 44100), u32::MAX);
/// ```
pub fn phase_rate(frequency: f64, sample_rate: u32) -> u32 {
    (u32::MAX as f64 * frequency / sample_rate as f64) as u32
}

/// Phase increments of every playable note at a fixed sample rate.
#[derive(Debug, Clone)]
pub struct PitchTable {
    rates: [u32; NUM_NOTES],
}

impl PitchTable {
    pub fn new(tuning: &Tuning, sample_rate: u32) -> Self {
        let mut rates = [0; NUM_NOTES];
        for (index, rate) in rates.iter_mut().enumerate() {
            let note = Note::from_index(index as u8);
            *rate = phase_rate(tuning.frequency(note), sample_rate);
        }
        debug!(
            "pitch table at {} Hz: {} .. {}",
            sample_rate,
            rates[0],
            rates[NUM_NOTES - 1]
        );
        Self { rates }
    }

    /// The phase increment of a note.
    pub fn rate(&self, note: Note) -> u32 {
        self.rates[note.index()]
    }

    pub fn rates(&self) -> &[u32] {
        &self.rates
    }
}
