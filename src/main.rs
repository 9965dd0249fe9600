use std::path::PathBuf;

use anyhow::Context;
use chip8::interpreter::{Interpreter, DEFAULT_CLOCK_SPEED};
use clap::Parser;
use log::info;

#[derive(Parser, Debug)]
#[command(version, about = "Run a CHIP-8 ROM", long_about = None)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(short, long, default_value_t = DEFAULT_CLOCK_SPEED,
          value_parser = clap::value_parser!(u64).range(1..))]
    clock_speed: u64,

    /// Seed for the random number generator, for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut interpreter = match args.seed {
        Some(seed) => Interpreter::with_seed(seed),
        None => Interpreter::new(),
    }
    .clock_speed(args.clock_speed);

    interpreter
        .load_file(&args.rom)
        .with_context(|| format!("could not load {}", args.rom.display()))?;

    info!("starting CHIP-8 at {} Hz", args.clock_speed);
    chip8_base::run(interpreter)
}
