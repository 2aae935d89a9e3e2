use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use chip8_core::EdgePolicy;

mod keymap;
mod run;

/// Run a Chip-8 ROM without a window, printing the final frame to stdout.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// The ROM to load at 0x200.
    rom: PathBuf,

    /// How many cycles to execute.
    #[arg(short, long, default_value_t = 1000)]
    cycles: u64,

    /// Target cycles per second; 0 runs as fast as possible.
    #[arg(long, default_value_t = 0)]
    hz: u32,

    /// What happens to sprites drawn past the edge of the display.
    #[arg(long, value_enum, default_value_t = SpriteEdge::Wrap)]
    sprite_edge: SpriteEdge,

    /// Seed for the RND instruction.
    #[arg(long)]
    seed: Option<u64>,

    /// Keys held down for the whole run, on the QWERTY layout (e.g. "qe" holds 4 and 6).
    #[arg(long, default_value = "")]
    hold: String,

    /// Stop at the first fault instead of continuing past it.
    #[arg(long)]
    halt_on_fault: bool,

    /// List the program's instructions instead of running it.
    #[arg(long)]
    disassemble: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SpriteEdge {
    Wrap,
    Clip,
}

impl From<SpriteEdge> for EdgePolicy {
    fn from(edge: SpriteEdge) -> Self {
        match edge {
            SpriteEdge::Wrap => EdgePolicy::Wrap,
            SpriteEdge::Clip => EdgePolicy::Clip,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let args = Args::parse();
    if args.disassemble {
        run::disassemble(&args.rom)
    } else {
        run::run(&args)
    }
}
