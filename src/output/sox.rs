//! Easy interface for getting sound to play using a sox subprocess.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::wave::{copy_i16_bytes, SamplerInfo};

/// Samples written to sox at once, 10 ms at 44100 Hz.
const BUFFER_SIZE: usize = 441;

pub enum SoxTarget<'a> {
    Play,
    File(&'a Path),
}

/// Arguments describing the raw sample stream sox reads from stdin.
fn input_args(info: SamplerInfo) -> Vec<String> {
    vec![
        "-R".to_string(), // make the output reproducible
        "--channels".to_string(),
        info.channels.to_string(),
        "--rate".to_string(),
        info.sample_rate.to_string(),
        "--type".to_string(),
        "s16".to_string(),
        "--endian".to_string(),
        "little".to_string(),
        "/dev/stdin".to_string(),
    ]
}

/// Locations of the `play` and `sox` binaries.
fn binaries() -> (PathBuf, PathBuf) {
    // For properly recording the sox dependency on nix:
    if let Some(sox_bin) = option_env!("NIX_SOX_BIN") {
        log::debug!("using sox from nix store {}", sox_bin);
        (Path::new(sox_bin).join("play"), Path::new(sox_bin).join("sox"))
    } else {
        ("play".into(), "sox".into())
    }
}

/// Spawn sox for the given target and hand its input stream to `callback`.
pub fn with_sox<R, F: FnOnce(&mut dyn io::Write) -> io::Result<R>>(
    info: SamplerInfo,
    target: SoxTarget,
    callback: F,
) -> io::Result<R> {
    let (play, sox) = binaries();
    let mut player = match target {
        SoxTarget::Play => Command::new(&play)
            .args(input_args(info))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?,
        SoxTarget::File(outfile) => Command::new(&sox)
            .args(input_args(info))
            .arg(outfile)
            .stdin(Stdio::piped())
            .spawn()?,
    };

    let mut audio_stream = player
        .stdin
        .take()
        .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "sox has no input stream"))?;

    let result = callback(&mut audio_stream);

    // sox exits once its input is closed
    drop(audio_stream);
    let status = player.wait()?;
    if !status.success() {
        log::warn!("sox exited with {}", status);
    }

    result
}

/// Feed all samples to sox.
pub fn stream(samples: &[i16], info: SamplerInfo, target: SoxTarget) -> io::Result<()> {
    with_sox(info, target, |audio_stream| {
        let mut byte_buffer = vec![0u8; BUFFER_SIZE * 2];
        for chunk in samples.chunks(BUFFER_SIZE) {
            let n = copy_i16_bytes(chunk, &mut byte_buffer);
            audio_stream.write_all(&byte_buffer[..2 * n])?;
        }
        audio_stream.flush()
    })
}
