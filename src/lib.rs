// 16 8-bit data registers named V0 to VF
// I -> address register (12 bits, arithmetic on it is not masked)
//
// Stack of 16 return addresses, pointer starts at 15 and grows down
//
// Delay timer & Sound timer: Count down at 60 times / s until 0
// Beep when the sound timer reaches 0
//
// Display res: 64 width, 32 height
//
// 35 opcodes, each are 2 bytes (big-endian)
//      NNN: address
//      NN: 8-bit constant
//      N: 4-bit constant
//      X and Y: 4-bit register identifier
//
// The machine itself (memory, registers, decode, emulator, timer, display,
// keyboard) never touches a window or audio device; `screen` and `sound` are
// the presentation side driven by the binary.

use std::path::PathBuf;

pub mod config;
pub mod decode;
pub mod display;
pub mod emulator;
pub mod keyboard;
pub mod memory;
pub mod registers;
pub mod screen;
pub mod sound;
pub mod timer;

pub use config::{Config, LoadMode};
pub use emulator::{Emulator, FrameOutput};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not read program {path}")]
    Rom {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("window error: {0}")]
    Window(String),

    #[error("audio unavailable: {0}")]
    Audio(String),
}

/// Reads a program image from disk. Size is not checked here; the loader
/// truncates whatever does not fit.
pub fn read_program(path: impl Into<PathBuf>) -> Result<Vec<u8>, Error> {
    let path = path.into();
    std::fs::read(&path).map_err(|source| Error::Rom { path, source })
}
