// syn.mml -- a band-limited square wave renderer for music macro language
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! `mmlc` - the MML compiler, turning notation into square wave audio.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{error, info};
use structopt::StructOpt;

use syn_mml::config::RenderConfig;
use syn_mml::mml::span::LineMap;
use syn_mml::mml::SongError;
use syn_mml::render::Synth;
use syn_mml::{demo, output, wave};

#[derive(Debug, StructOpt)]
#[structopt(name = "mmlc", about = "Rendering MML notation into square waves")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// The notation of the song, e.g. "t3 o0 c3 g3 o1 c3 g3". Plays a demo if omitted.
    song: Option<String>,

    /// Read the notation from a file instead.
    #[structopt(short, long, parse(from_os_str), conflicts_with = "song")]
    file: Option<PathBuf>,

    /// Output file (WAV, or any other sox-supported format). Music is played directly if not given.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Samples per second of the generated audio.
    #[structopt(short = "r", long, default_value = "44100")]
    sample_rate: u32,

    /// Samples per tick of the song.
    #[structopt(long, default_value = "2700")]
    tick_length: usize,

    /// Peak amplitude of the 16 bit output.
    #[structopt(long, default_value = "16384")]
    amplitude: f32,

    /// Dump the phase rate of every tick, one per line.
    #[structopt(long)]
    #[allow(clippy::option_option)]
    dump_ticks: Option<Option<PathBuf>>,
}

fn main() -> io::Result<()> {
    let opt = Opt::from_args();

    let level = match opt.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let (name, source) = match (&opt.song, &opt.file) {
        (_, Some(path)) => (path.to_string_lossy().into_owned(), std::fs::read_to_string(path)?),
        (Some(song), None) => ("<command line>".to_string(), song.clone()),
        (None, None) => {
            info!("no song given, playing the demo (usage: mmlc \"songtext\" [-o file])");
            ("<demo>".to_string(), demo::demo_song())
        }
    };

    let config = RenderConfig {
        sample_rate: opt.sample_rate,
        tick_length: opt.tick_length,
        amplitude: opt.amplitude,
    };
    let mut synth =
        Synth::new(config).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    synth.load_song(&source);

    if let Some(dump_out) = &opt.dump_ticks {
        let ticks = synth
            .ticks()
            .map_err(|err| report_song_error(&name, &source, err))?;
        dump_ticks(&ticks, dump_out.as_deref())?;
    }

    let samples = synth
        .render_song()
        .map_err(|err| report_song_error(&name, &source, err))?;

    let info = wave::SamplerInfo::mono_i16(config.sample_rate);
    match &opt.output {
        Some(path) => output::write(&samples, info, path),
        None => output::play(&samples, info),
    }
}

fn dump_ticks(ticks: &[u32], path: Option<&Path>) -> io::Result<()> {
    let mut out: Box<dyn Write> = match path {
        Some(path) => Box::new(io::BufWriter::new(std::fs::File::create(path)?)),
        None => Box::new(io::stdout()),
    };
    for rate in ticks {
        writeln!(out, "{}", rate)?;
    }
    out.flush()
}

/// Log the error together with the offending part of the notation.
fn report_song_error(name: &str, source: &str, err: SongError) -> io::Error {
    let lines = LineMap::new(source);
    let pos = lines.offset_to_pos(err.offset());
    error!(
        "error: {} ({} {})\n{}",
        err,
        name,
        pos,
        lines.highlight(err.offset(), true)
    );
    io::Error::new(io::ErrorKind::InvalidData, err)
}
