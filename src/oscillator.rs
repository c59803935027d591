// syn.mml -- a band-limited square wave renderer for music macro language
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Phase accumulator used for reading periodic waveforms.

/// Position within one period of a waveform as 32 bit fixed point number.
///
/// A full period spans the complete `u32` range, so stepping simply wraps around.
///
/// # Examples
///
/// ```
/// use syn_mml::oscillator::Phase;
///
/// let phase = Phase::ZERO.step(u32::MAX / 2).step(u32::MAX / 2).step(2);
/// assert_eq!(phase, Phase::new(0));
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Phase(u32);

impl Phase {
    pub const ZERO: Phase = Phase(0);

    pub fn new(raw: u32) -> Phase {
        Phase(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    pub fn step(self, amount: u32) -> Phase {
        Phase(self.0.wrapping_add(amount))
    }

    /// Advance by `amount` per sample for `samples` samples.
    pub fn step_n(self, amount: u32, samples: usize) -> Phase {
        Phase(self.0.wrapping_add(amount.wrapping_mul(samples as u32)))
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::ZERO
    }
}
