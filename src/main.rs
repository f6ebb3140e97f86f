use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use chipvm::{
    config::{parse_colour, DEFAULT_INSTRUCTIONS_PER_FRAME, DEFAULT_SCALE},
    read_program,
    screen::Screen,
    sound::Sound,
    Config, Emulator, LoadMode,
};

// Separately:
// CPU: 8 instructions per frame (~480 per second)
// Display: 60 times per second
// Timer: 60 times per second

/// Interpret CHIP-8 code written in FILE.
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    after_help = "example: chipvm -c F7A8B8FF -e pong.ch8"
)]
struct Args {
    /// Program image to run
    file: PathBuf,

    /// Colour of lit pixels as RGBA hex
    #[arg(short, long, value_parser = parse_colour, default_value = "FFFFFFFF")]
    colour: u32,

    /// Run in ETI 660 mode (load at 0x660)
    #[arg(short, long)]
    eti660: bool,

    /// Instructions executed per 60 Hz frame
    #[arg(long, default_value_t = DEFAULT_INSTRUCTIONS_PER_FRAME)]
    ipf: usize,

    /// Window size as a multiple of 64x32
    #[arg(long, default_value_t = DEFAULT_SCALE)]
    scale: usize,

    /// Seed for the random number opcode
    #[arg(long)]
    seed: Option<u64>,

    /// Do not open an audio device
    #[arg(long)]
    mute: bool,
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Config {
            load_mode: if args.eti660 {
                LoadMode::Eti660
            } else {
                LoadMode::Standard
            },
            colour: args.colour,
            instructions_per_frame: args.ipf,
            scale: args.scale,
            seed: args.seed,
            mute: args.mute,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = Config::from(&args);

    let program = read_program(&args.file)?;
    let mut emu = Emulator::new(&program, &config);
    let mut screen = Screen::new(&config).context("failed to open the display")?;
    let sound = if config.mute {
        None
    } else {
        match Sound::new() {
            Ok(sound) => Some(sound),
            Err(e) => {
                log::warn!("{e}; running without sound");
                None
            }
        }
    };

    while screen.is_running() {
        for (index, is_down) in screen.poll_keys() {
            emu.set_key(index, is_down);
        }
        let out = emu.run_frame();
        if out.beep {
            if let Some(sound) = &sound {
                sound.beep();
            }
        }
        screen.sync(&emu.fb, out.draw)?;
    }
    Ok(())
}
