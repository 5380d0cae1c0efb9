use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use emu8_core::constants::{
    DEFAULT_INSTRUCTIONS_PER_FRAME, FRAME_DURATION, MAX_PROGRAM_SIZE, PROGRAM_START,
};
use emu8_core::{disassemble, Chip8, LoadError};

mod keymap;
mod run;

/// A Chip-8 emulator.
///
/// Keys 1234/QWER/ASDF/ZXCV make up the hex keypad. Hold Space to run unthrottled and
/// press Escape to quit.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Path to a Chip-8 ROM
    #[arg(value_name = "ROM")]
    rom: PathBuf,

    /// Instructions executed between timer ticks
    #[arg(long, default_value_t = DEFAULT_INSTRUCTIONS_PER_FRAME)]
    instructions_per_frame: u32,

    /// Length of a frame in milliseconds
    #[arg(long, default_value_t = FRAME_DURATION.as_millis() as u64)]
    frame_millis: u64,

    /// Screen pixels per Chip-8 pixel
    #[arg(long, default_value_t = 10)]
    scale: u32,

    /// Print a disassembly of the ROM and exit
    #[arg(long)]
    disassemble: bool,

    /// Log filter directive, e.g. `info` or `emu8_core=trace`; overrides RUST_LOG
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,
}

fn setup_logging(directive: Option<&str>) -> anyhow::Result<()> {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
    Ok(())
}

/// Loads the ROM at `path` into a fresh machine.
fn load(path: &Path) -> Result<Chip8, LoadError> {
    let mut chip8 = Chip8::new();
    chip8.load_rom_from(&mut BufReader::new(File::open(path)?))?;
    Ok(chip8)
}

/// Reads the ROM at `path` for disassembly, refusing anything that wouldn't fit in memory.
fn read_rom(path: &Path) -> Result<Vec<u8>, LoadError> {
    let mut rom = Vec::new();
    BufReader::new(File::open(path)?)
        .take(MAX_PROGRAM_SIZE as u64 + 1)
        .read_to_end(&mut rom)?;
    if rom.len() > MAX_PROGRAM_SIZE {
        return Err(LoadError::TooLarge {
            len: rom.len(),
            max: MAX_PROGRAM_SIZE,
        });
    }
    Ok(rom)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_logging(args.log_level.as_deref())?;

    if args.disassemble {
        let rom = read_rom(&args.rom)
            .with_context(|| format!("unable to read {}", args.rom.display()))?;
        for line in disassemble(&rom, PROGRAM_START as u16) {
            println!("{}", line);
        }
        return Ok(());
    }

    let chip8 =
        load(&args.rom).with_context(|| format!("unable to load {}", args.rom.display()))?;
    tracing::info!("Loaded {}", args.rom.display());

    run::run(
        chip8,
        run::Timing {
            instructions_per_frame: args.instructions_per_frame,
            frame_duration: Duration::from_millis(args.frame_millis),
        },
        args.scale,
    )
}
