use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use tracing::info;

use chip8_core::constants::PROGRAM_START;
use chip8_core::{decode, Chip8, Config, Quirks};

use crate::keymap::keymap;
use crate::Args;

pub fn run(args: &Args) -> anyhow::Result<()> {
    let mut chip8 = Chip8::with_config(Config {
        quirks: Quirks {
            sprite_edge: args.sprite_edge.into(),
        },
        seed: args.seed,
    });

    // Load ROM
    let file = File::open(&args.rom)
        .with_context(|| format!("unable to open {}", args.rom.display()))?;
    let mut reader = BufReader::new(file);
    chip8
        .load_rom(&mut reader)
        .with_context(|| format!("unable to load {}", args.rom.display()))?;
    info!(rom = %args.rom.display(), "successfully loaded ROM");

    hold_keys(&chip8, &args.hold)?;

    // Set initial timing
    let cycle_time: Option<Duration> = (args.hz > 0).then(|| Duration::from_secs(1) / args.hz);
    let mut last_cycle: Instant = Instant::now();

    let mut frames: u64 = 0;
    let mut faults: u64 = 0;
    for cycle in 0..args.cycles {
        let outcome = chip8.step();
        if outcome.dirty {
            frames += 1;
        }
        if let Some(fault) = outcome.fault {
            faults += 1;
            if args.halt_on_fault {
                print_machine(&chip8);
                bail!("halted at cycle {}: {}", cycle, fault);
            }
        }

        // Handle timing
        if let Some(cycle_time) = cycle_time {
            let elapsed_cycle_time = last_cycle.elapsed();
            if cycle_time > elapsed_cycle_time {
                std::thread::sleep(cycle_time - elapsed_cycle_time);
            }
            last_cycle = Instant::now();
        }
    }

    info!(cycles = args.cycles, frames, faults, "finished");
    print_machine(&chip8);
    Ok(())
}

/// Presses every keypad key named in `keys` (QWERTY layout), ignoring whitespace
fn hold_keys(chip8: &Chip8, keys: &str) -> anyhow::Result<()> {
    for key in keys.chars().filter(|c| !c.is_whitespace()) {
        let kc = keymap(key).with_context(|| format!("'{}' is not mapped to the keypad", key))?;
        chip8.set_key(kc as usize, true)?;
    }
    Ok(())
}

fn print_machine(chip8: &Chip8) {
    let registers = chip8.registers();
    print!("{}", chip8.frame_buffer());
    println!(
        "pc {:03X}  i {:03X}  dt {:02X}  st {:02X}  sp {}",
        registers.pc,
        registers.i,
        registers.delay_timer,
        registers.sound_timer,
        chip8.stack().depth()
    );
    println!("v {:02X?}", registers.v);
}

pub fn disassemble(rom: &Path) -> anyhow::Result<()> {
    let bytes = fs::read(rom).with_context(|| format!("unable to read {}", rom.display()))?;
    for line in listing(&bytes) {
        println!("{}", line);
    }
    Ok(())
}

/// One line per opcode-sized chunk of the ROM, addressed as it would be once loaded.
/// Data mixed into the program shows up as `??` or as whatever instruction it happens to spell.
fn listing(rom: &[u8]) -> Vec<String> {
    rom.chunks(2)
        .enumerate()
        .map(|(index, chunk)| {
            let addr = PROGRAM_START as usize + index * 2;
            let op = u16::from(chunk[0]) << 8 | u16::from(chunk.get(1).copied().unwrap_or(0));
            match decode(op) {
                Some(instruction) => format!("{:03X}: {:04X}  {}", addr, op, instruction),
                None => format!("{:03X}: {:04X}  ??", addr, op),
            }
        })
        .collect()
}
