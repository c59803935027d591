//! The tune played when no notation is given.

const INTRO: &str = "t0E5R1E3R0D3R0E3R0E1R0D1R0>G4R1<";
const VERSE: &str = "F3R0F1R0F1R0A3R0F1R0E1R0D1R0D1R0E5R0";
const TURN: &str = "C3R0C1R0C1R0E3R0C1R0>B1<R0C1R0>B1R0A1R0A1B5R0<";
const RUN: &str = "E1R0E1R0E1R0E1R0E1R0E1R0D1R0E1R0E1R0E1R0D1R0>A1R0A1R0B3R1<";
const OUTRO: &str = ">A1R0B1R0<C1R0D1R0E1R0F1R0E1R0F3R1A3R1B1R0A1R0F3R0E3R0E1R0E4R0";

/// Notation of the demo song.
pub fn demo_song() -> String {
    [
        INTRO, VERSE, VERSE, TURN, TURN, VERSE, TURN, RUN, OUTRO,
    ]
    .concat()
}
