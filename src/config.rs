// syn.mml -- a band-limited square wave renderer for music macro language
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Parameters shared by all parts of the renderer.

use snafu::Snafu;

/// Settings that stay fixed for the lifetime of a [`Synth`](crate::render::Synth).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Number of samples per second of the generated signal.
    pub sample_rate: u32,
    /// Number of samples generated for each tick of the sequencer.
    pub tick_length: usize,
    /// Factor applied to the normalized waveform before converting to 16 bit.
    pub amplitude: f32,
}

impl RenderConfig {
    pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
    pub const DEFAULT_TICK_LENGTH: usize = 2700;
    pub const DEFAULT_AMPLITUDE: f32 = 16384.0;

    /// Check that the configuration describes a signal that can actually be generated.
    ///
    /// # Examples
    ///
    /// ```
    /// use syn_mml::config::*;
    ///
    /// assert!(RenderConfig::default().validate().is_ok());
    ///
    /// let broken = RenderConfig { sample_rate: 0, ..RenderConfig::default() };
    /// assert_eq!(broken.validate(), Err(ConfigError::ZeroSampleRate));
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }
        if self.tick_length == 0 {
            return Err(ConfigError::ZeroTickLength);
        }
        // i16 can represent up to 32767, anything louder would only clip
        if !self.amplitude.is_finite() || self.amplitude <= 0.0 || self.amplitude > 32767.0 {
            return Err(ConfigError::InvalidAmplitude {
                amplitude: self.amplitude,
            });
        }
        Ok(())
    }

    /// Length of a single tick in seconds.
    pub fn tick_seconds(&self) -> f64 {
        self.tick_length as f64 / self.sample_rate as f64
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sample_rate: Self::DEFAULT_SAMPLE_RATE,
            tick_length: Self::DEFAULT_TICK_LENGTH,
            amplitude: Self::DEFAULT_AMPLITUDE,
        }
    }
}

#[derive(Debug, PartialEq, Snafu)]
pub enum ConfigError {
    #[snafu(display("The sample rate must be positive"))]
    ZeroSampleRate,
    #[snafu(display("A tick must last at least one sample"))]
    ZeroTickLength,
    #[snafu(display("Amplitude {} is not in the range (0, 32767]", amplitude))]
    InvalidAmplitude { amplitude: f32 },
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_degenerate_settings() {
        let base = RenderConfig::default();
        assert_eq!(
            RenderConfig { tick_length: 0, ..base }.validate(),
            Err(ConfigError::ZeroTickLength)
        );
        assert_eq!(
            RenderConfig { amplitude: -1.0, ..base }.validate(),
            Err(ConfigError::InvalidAmplitude { amplitude: -1.0 })
        );
        assert!(RenderConfig { amplitude: f32::NAN, ..base }.validate().is_err());
        assert!(RenderConfig { amplitude: 40000.0, ..base }.validate().is_err());
    }

    #[test]
    fn tick_duration() {
        let config = RenderConfig {
            sample_rate: 1000,
            tick_length: 250,
            ..RenderConfig::default()
        };
        assert_eq!(config.tick_seconds(), 0.25);
    }
}
