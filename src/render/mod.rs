// syn.mml -- a band-limited square wave renderer for music macro language
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The glue responsible for turning notation into actual waveforms.

use std::iter;

use log::{debug, info};

use crate::config::{ConfigError, RenderConfig};
use crate::mml::{Sequencer, Song, SongError};
use crate::oscillator::Phase;
use crate::tuning::{PitchTable, Tuning};
use crate::wavetable::SquareWavetable;

/// Everything needed for rendering songs at a fixed sample rate.
pub struct Synth {
    config: RenderConfig,
    pitches: PitchTable,
    wavetable: SquareWavetable,
    song: Song,
}

impl Synth {
    /// Build the pitch and wave tables for the configured sample rate.
    pub fn new(config: RenderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!("building tables for {} Hz", config.sample_rate);
        Ok(Self {
            config,
            pitches: PitchTable::new(&Tuning::default(), config.sample_rate),
            wavetable: SquareWavetable::new(config.sample_rate),
            song: Song::new(""),
        })
    }

    /// Replace the current song. Errors in the notation are only reported while rendering.
    pub fn load_song(&mut self, text: &str) {
        debug!("loaded song of {} bytes", text.len());
        self.song = Song::new(text);
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn pitches(&self) -> &PitchTable {
        &self.pitches
    }

    pub fn wavetable(&self) -> &SquareWavetable {
        &self.wavetable
    }

    /// A fresh sequencer positioned at the start of the loaded song.
    pub fn sequencer(&self) -> Sequencer<'_> {
        Sequencer::new(&self.song, &self.pitches)
    }

    /// Render the loaded song to mono 16 bit samples.
    ///
    /// Every call starts from the beginning with a zero phase,
    /// so rendering the same song twice yields the same samples.
    pub fn render_song(&self) -> Result<Vec<i16>, SongError> {
        let mut sequencer = self.sequencer();
        let mut renderer = TickRenderer::new(&self.wavetable, &self.config);
        let mut samples = Vec::new();
        while let Some(phase_rate) = sequencer.tick()? {
            renderer.render_tick(phase_rate, &mut samples);
        }
        info!(
            "rendered {} samples ({:.2} seconds)",
            samples.len(),
            samples.len() as f64 / self.config.sample_rate as f64
        );
        Ok(samples)
    }

    /// The phase rate of every tick of the loaded song.
    pub fn ticks(&self) -> Result<Vec<u32>, SongError> {
        self.sequencer().collect()
    }
}

/// Generates the samples of one tick after another from a wavetable.
///
/// The phase is carried over from tick to tick, even when the pitch changes.
/// This keeps the waveform continuous at note boundaries, which avoids clicks.
pub struct TickRenderer<'w> {
    wavetable: &'w SquareWavetable,
    tick_length: usize,
    amplitude: f32,
    phase: Phase,
}

impl<'w> TickRenderer<'w> {
    pub fn new(wavetable: &'w SquareWavetable, config: &RenderConfig) -> Self {
        Self {
            wavetable,
            tick_length: config.tick_length,
            amplitude: config.amplitude,
            phase: Phase::ZERO,
        }
    }

    /// Append the samples of one tick at the given phase rate, where 0 means silence.
    pub fn render_tick(&mut self, phase_rate: u32, output: &mut Vec<i16>) {
        if phase_rate == 0 {
            output.extend(iter::repeat(0).take(self.tick_length));
            return;
        }

        let table = self.wavetable.table_for(phase_rate);
        output.reserve(self.tick_length);
        for _ in 0..self.tick_length {
            let sample = self.wavetable.lookup(self.phase.raw(), table);
            output.push((self.amplitude * sample) as i16);
            self.phase = self.phase.step(phase_rate);
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
}
