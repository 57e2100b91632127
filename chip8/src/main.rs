use std::path::PathBuf;

use clap::Parser;
use log::error;

use emu8_core::CLOCK_SPEED;

mod audio;
mod keymap;
mod run;

/// Emu-8, a Chip-8 interpreter
#[derive(Parser, Debug)]
#[command(name = "emu8", about, long_about = None)]
pub struct Args {
    /// Path to the ROM to run
    pub rom: PathBuf,

    /// CPU cycles per second
    #[arg(short, long, default_value_t = CLOCK_SPEED)]
    pub clock_speed: u32,

    /// Size of each Chip-8 pixel on screen
    #[arg(short, long, default_value_t = 10)]
    pub scale: u32,

    /// Don't play a tone while the sound timer runs
    #[arg(short, long)]
    pub mute: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run::run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
