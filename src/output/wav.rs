//! Writing rendered songs as WAV files.

use std::io;
use std::path::Path;

use crate::wave::SamplerInfo;

fn wav_spec(info: SamplerInfo) -> hound::WavSpec {
    hound::WavSpec {
        channels: info.channels,
        sample_rate: info.sample_rate,
        bits_per_sample: info.bits_per_sample,
        sample_format: hound::SampleFormat::Int,
    }
}

fn to_io_error(err: hound::Error) -> io::Error {
    match err {
        hound::Error::IoError(err) => err,
        other => io::Error::new(io::ErrorKind::InvalidData, other),
    }
}

/// Whether the path has a `.wav` extension (case-insensitive).
pub fn is_wav_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("wav"))
}

/// Encode the samples as a complete PCM WAV file to any seekable writer.
pub fn encode<W: io::Write + io::Seek>(
    writer: W,
    samples: &[i16],
    info: SamplerInfo,
) -> io::Result<()> {
    let mut writer = hound::WavWriter::new(writer, wav_spec(info)).map_err(to_io_error)?;
    for &sample in samples {
        writer.write_sample(sample).map_err(to_io_error)?;
    }
    writer.finalize().map_err(to_io_error)
}

pub fn write_wav(path: &Path, samples: &[i16], info: SamplerInfo) -> io::Result<()> {
    let file = io::BufWriter::new(std::fs::File::create(path)?);
    encode(file, samples, info)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn header_and_samples() {
        let samples = [0i16, 1000, -1000, i16::MAX, i16::MIN];
        let mut cursor = io::Cursor::new(Vec::new());
        encode(&mut cursor, &samples, SamplerInfo::mono_i16(44100)).unwrap();
        let bytes = cursor.into_inner();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert!(bytes.len() >= 44 + 2 * samples.len());

        let reader = hound::WavReader::new(io::Cursor::new(bytes)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 44100);
        assert_eq!(spec.bits_per_sample, 16);
        let decoded: Vec<i16> = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(decoded, samples);
    }

    #[test]
    fn file_round_trip() {
        let path = std::env::temp_dir().join(format!("syn-mml-test-{}.wav", std::process::id()));
        write_wav(&path, &[7, -7], SamplerInfo::mono_i16(8000)).unwrap();
        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.duration(), 2);
        drop(reader);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn extensions() {
        assert!(is_wav_path(Path::new("song.wav")));
        assert!(is_wav_path(Path::new("SONG.WAV")));
        assert!(!is_wav_path(Path::new("song.flac")));
        assert!(!is_wav_path(Path::new("wav")));
    }
}
