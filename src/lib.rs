//! Rendering of music macro language songs to band-limited square waves.
//!
//! ```
//! use syn_mml::config::RenderConfig;
//! use syn_mml::render::Synth;
//!
//! let mut synth = Synth::new(RenderConfig::default()).unwrap();
//! synth.load_song("t0 o1 c1 e1 g1");
//! let samples = synth.render_song().unwrap();
//! assert_eq!(samples.len(), 3 * 2 * 2700);
//! ```

pub mod config;
pub mod demo;
pub mod mml;
pub mod note;
pub mod oscillator;
pub mod output;
pub mod render;
pub mod tuning;
pub mod wave;
pub mod wavetable;

use snafu::{ResultExt, Snafu};

#[derive(Debug, PartialEq, Snafu)]
pub enum Error {
    #[snafu(display("Invalid configuration: {}", source))]
    Config { source: config::ConfigError },
    #[snafu(display("Invalid song: {}", source))]
    Notation { source: mml::SongError },
}

/// Render a song in one go.
pub fn render_song(song: &str, config: config::RenderConfig) -> Result<Vec<i16>, Error> {
    let mut synth = render::Synth::new(config).context(Config)?;
    synth.load_song(song);
    synth.render_song().context(Notation)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn errors_are_wrapped() {
        let config = config::RenderConfig::default();
        assert!(matches!(render_song("o9", config), Err(Error::Notation { .. })));
        let broken = config::RenderConfig {
            tick_length: 0,
            ..config
        };
        assert!(matches!(render_song("", broken), Err(Error::Config { .. })));
        assert_eq!(
            render_song("x", config).unwrap_err().to_string(),
            "Invalid song: Invalid character 'X' in song at offset 0"
        );
    }
}
