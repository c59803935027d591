// syn.mml -- a band-limited square wave renderer for music macro language
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Band-limited square waves, stored as a set of tables with decreasing harmonic content.
//!
//! A square wave only contains odd harmonics, but infinitely many of them.
//! Playing back a single table at high pitches would push the upper harmonics
//! above the Nyquist frequency where they fold back as audible distortion.
//! Each table therefore only contains the harmonics that stay below the cutoff
//! frequency for the octave of pitches it is used for.

use log::debug;

use crate::tuning::phase_rate;

/// Samples per table. Must be a power of two.
pub const WAVETABLE_SIZE: usize = 1024;

/// Right shift converting a 32 bit phase into a table index.
pub const WAVETABLE_SHIFT: u32 = 22;

/// Bits of the phase below the table index, i.e. the fractional part.
pub const WAVETABLE_MASK: u32 = 0x3F_FFFF;

pub const WAVETABLE_NUM_TABLES: usize = 8;

/// Highest pitch the lowest table is meant for.
pub const WAVETABLE_BASE_FREQ: f64 = 40.0;

/// No table contains harmonics above this frequency at its intended pitch.
pub const WAVETABLE_CUTOFF_FREQ: f64 = 20000.0;

/// Octave spaced tables of a band-limited square wave.
pub struct SquareWavetable {
    data: Vec<[f32; WAVETABLE_SIZE]>,
    /// Largest phase increment each table can be played at without aliasing.
    top_phase_rate: [u32; WAVETABLE_NUM_TABLES],
}

impl SquareWavetable {
    pub fn new(sample_rate: u32) -> Self {
        let mut table = Self {
            data: vec![[0.0; WAVETABLE_SIZE]; WAVETABLE_NUM_TABLES],
            top_phase_rate: [0; WAVETABLE_NUM_TABLES],
        };
        table.generate(sample_rate);
        table
    }

    /// Fill all tables by additive synthesis.
    ///
    /// The bottom table gets all harmonics of the base frequency up to the cutoff.
    /// Each subsequent table serves notes an octave higher, and thus gets half as
    /// many harmonics, but never less than the fundamental.
    pub fn generate(&mut self, sample_rate: u32) {
        use std::f64::consts::PI;

        let mut frequency = WAVETABLE_BASE_FREQ;
        let mut max_harmonic = (WAVETABLE_CUTOFF_FREQ / WAVETABLE_BASE_FREQ) as usize;

        for (samples, top_rate) in self.data.iter_mut().zip(self.top_phase_rate.iter_mut()) {
            let mut wave = [0.0f64; WAVETABLE_SIZE];
            // only odd harmonics, with amplitude inversely proportional to the harmonic
            for harmonic in (1..=max_harmonic).step_by(2) {
                let level = 1.0 / harmonic as f64;
                for (i, sample) in wave.iter_mut().enumerate() {
                    let phase = 2.0 * PI * (harmonic * i) as f64 / WAVETABLE_SIZE as f64;
                    *sample += level * phase.sin();
                }
            }

            let peak = wave.iter().fold(0.0f64, |peak, s| peak.max(s.abs()));
            for (target, sample) in samples.iter_mut().zip(wave.iter()) {
                *target = (sample / peak) as f32;
            }

            *top_rate = phase_rate(2.0 * frequency, sample_rate);
            debug!(
                "wavetable up to {:.0} Hz: {} harmonics, top phase rate {}",
                frequency, max_harmonic, top_rate
            );

            frequency *= 2.0;
            max_harmonic = (max_harmonic / 2).max(1);
        }
    }

    /// Return the index of the lowest table that does not alias when played back
    /// at `phase_rate`. Rates beyond the last threshold use the last table.
    ///
    /// # Examples
    ///
    /// ```
    /// use syn_mml::wavetable::*;
    ///
    /// let tables = SquareWavetable::new(44100);
    /// assert_eq!(tables.table_for(0), 0);
    /// assert_eq!(tables.table_for(u32::MAX), WAVETABLE_NUM_TABLES - 1);
    /// ```
    pub fn table_for(&self, phase_rate: u32) -> usize {
        self.top_phase_rate[..WAVETABLE_NUM_TABLES - 1].partition_point(|&top| top < phase_rate)
    }

    /// Sample the given table at `phase`, a 32 bit fixed point number spanning one period.
    /// Linearly interpolates between neighbouring samples, wrapping at the end of the table.
    pub fn lookup(&self, phase: u32, table: usize) -> f32 {
        let samples = &self.data[table];
        let left = (phase >> WAVETABLE_SHIFT) as usize;
        let right = (phase.wrapping_add(WAVETABLE_MASK + 1) >> WAVETABLE_SHIFT) as usize;
        let fraction = (phase & WAVETABLE_MASK) as f32 / (WAVETABLE_MASK + 1) as f32;
        let s1 = samples[left];
        let s2 = samples[right];
        s1 + (s2 - s1) * fraction
    }

    pub fn top_phase_rate(&self, table: usize) -> u32 {
        self.top_phase_rate[table]
    }

    /// Largest absolute sample of a table.
    pub fn peak(&self, table: usize) -> f32 {
        self.data[table].iter().fold(0.0f32, |peak, s| peak.max(s.abs()))
    }

    pub fn samples(&self, table: usize) -> &[f32] {
        &self.data[table]
    }
}
