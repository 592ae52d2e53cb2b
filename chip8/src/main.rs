//! Headless Chip-8 runner.
//!
//! Loads a ROM, runs it against the wall clock (or as fast as possible with `--fast`), then
//! prints the final frame buffer. Programs that wait for input are fed keys from `--press`.
//!
//! ```bash
//! emu8 roms/ibm-logo.ch8 --max-cycles 1000
//! emu8 roms/keypad-test.ch8 --fast --press 1 --press A --cosmac-vip
//! ```
//!
//! Logging is controlled with `RUST_LOG`; `RUST_LOG=emu8_core=trace` traces every instruction.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use emu8_core::{Chip8, Config, Quirks, CLOCK_SPEED};

mod run;

use run::Settings;

#[derive(Parser, Debug)]
#[command(version, about = "Headless Chip-8 interpreter", long_about = None)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// TOML file with quirk and stack settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use the original COSMAC VIP quirks, overriding any from --config
    #[arg(long)]
    cosmac_vip: bool,

    /// Instructions per second
    #[arg(short, long, default_value_t = CLOCK_SPEED, value_parser = clap::value_parser!(u32).range(1..))]
    ips: u32,

    /// Stop after this many instructions
    #[arg(short, long)]
    max_cycles: Option<u64>,

    /// Hexadecimal key (0-F) to hand the program when it waits for input; repeatable
    #[arg(short, long = "press", value_parser = parse_key)]
    presses: Vec<u8>,

    /// Run as fast as possible instead of in real time
    #[arg(short, long)]
    fast: bool,

    /// Print a listing of memory after the run
    #[arg(long)]
    dump_memory: bool,
}

fn parse_key(key: &str) -> Result<u8, String> {
    match u8::from_str_radix(key, 16) {
        Ok(value) if value <= 0xF => Ok(value),
        _ => Err(format!("`{}` is not a key between 0 and F", key)),
    }
}

fn load_config(path: Option<&Path>, cosmac_vip: bool) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("unable to read config {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => Config::default(),
    };
    if cosmac_vip {
        config.quirks = Quirks::cosmac_vip();
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref(), args.cosmac_vip)?;

    let mut chip8 = Chip8::new(config);
    log::debug!("{:?}", chip8.config());
    let loaded = chip8.load_file(&args.rom)?;
    log::info!("loaded {} bytes from {}", loaded, args.rom.display());

    let settings = Settings {
        ips: args.ips,
        max_cycles: args.max_cycles,
        presses: args.presses,
        fast_forward: args.fast,
    };
    let outcome = run::run(&mut chip8, &settings)
        .with_context(|| format!("{} stopped with an error", args.rom.display()))?;
    log::info!("{} frames drawn", outcome.frames);

    print!("{}", chip8.frame_buffer());
    if args.dump_memory {
        print!("{}", chip8.memory_dump());
    }
    Ok(())
}
