//! Getting rendered samples out of the program, either into files or onto the speakers.

pub mod sox;
pub mod wav;

use std::io;
use std::path::Path;

use log::info;

use crate::wave::SamplerInfo;

/// Write the samples to a file. WAV files are written directly,
/// any other extension is handed to sox for conversion.
pub fn write(samples: &[i16], info: SamplerInfo, path: &Path) -> io::Result<()> {
    info!("writing {} samples to {}", samples.len(), path.display());
    if wav::is_wav_path(path) {
        wav::write_wav(path, samples, info)
    } else {
        sox::stream(samples, info, sox::SoxTarget::File(path))
    }
}

/// Play the samples on the default speakers.
pub fn play(samples: &[i16], info: SamplerInfo) -> io::Result<()> {
    info!("playing {:.2} seconds of audio", info.seconds(samples.len()));
    sox::stream(samples, info, sox::SoxTarget::Play)
}
