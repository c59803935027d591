//! This is the namespace for all parts dealing with data in sampled waves.

/// Information about how audio is sampled.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SamplerInfo {
    /// Number of samples per second.
    pub sample_rate: u32,
    /// Number of interleaved channels.
    pub channels: u16,
    /// Bits per sample of a single channel.
    pub bits_per_sample: u16,
}

impl SamplerInfo {
    /// Mono 16 bit audio, as produced by the renderer.
    pub fn mono_i16(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            channels: 1,
            bits_per_sample: 16,
        }
    }

    /// Playback length of the given number of samples in seconds.
    pub fn seconds(&self, samples: usize) -> f64 {
        samples as f64 / (self.sample_rate as f64 * self.channels as f64)
    }
}

/// Copy the `i16` samples to little-endian bytes.
///
/// Returns the number of samples that were actually copied.
/// Might be less than the number of input samples if the output buffer was not large enough.
///
/// # Examples
///
/// ```
/// use syn_mml::wave::copy_i16_bytes;
///
/// let mut bytes = [0u8; 5];
/// assert_eq!(copy_i16_bytes(&[1, -2, 3], &mut bytes), 2);
/// assert_eq!(bytes, [1, 0, 0xFE, 0xFF, 0]);
/// ```
pub fn copy_i16_bytes(samples: &[i16], bytes: &mut [u8]) -> usize {
    let mut processed = 0;
    for (sample, target) in samples.iter().zip(bytes.chunks_exact_mut(2)) {
        target.copy_from_slice(&sample.to_le_bytes());
        processed += 1;
    }
    processed
}
