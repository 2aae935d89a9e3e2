use std::fmt;

use crate::config::EdgePolicy;
use crate::constants::{DISPLAY_HEIGHT, DISPLAY_SIZE, DISPLAY_WIDTH};

/// # Frame Buffer
/// The 64x32 monochrome display, stored row-major: cell `x + y * 64`.
///
/// Only `CLS` and `DRW` touch it. Either raises the dirty flag, which tells the host the
/// frame should be redrawn; the engine lowers it again at the start of every cycle.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    cells: [bool; DISPLAY_SIZE],
    dirty: bool,
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            cells: [false; DISPLAY_SIZE],
            dirty: false,
        }
    }

    pub fn clear(&mut self) {
        self.cells = [false; DISPLAY_SIZE];
        self.dirty = true;
    }

    /// XORs an 8-pixel wide sprite, one byte per row, onto the display at (x, y).
    /// Returns whether any lit pixel was turned off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, rows: &[u8], edge: EdgePolicy) -> bool {
        let origin_x = x as usize % DISPLAY_WIDTH;
        let origin_y = y as usize % DISPLAY_HEIGHT;
        let mut collision = false;

        for (row, byte) in rows.iter().enumerate() {
            let py = match (origin_y + row, edge) {
                (py, _) if py < DISPLAY_HEIGHT => py,
                (py, EdgePolicy::Wrap) => py % DISPLAY_HEIGHT,
                (_, EdgePolicy::Clip) => break,
            };
            for bit in 0..8 {
                if (byte >> (7 - bit)) & 1 == 0 {
                    continue;
                }
                let px = match (origin_x + bit, edge) {
                    (px, _) if px < DISPLAY_WIDTH => px,
                    (px, EdgePolicy::Wrap) => px % DISPLAY_WIDTH,
                    (_, EdgePolicy::Clip) => break,
                };
                let cell = &mut self.cells[px + py * DISPLAY_WIDTH];
                collision |= *cell;
                *cell = !*cell;
            }
        }

        self.dirty = true;
        collision
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.cells[(x % DISPLAY_WIDTH) + (y % DISPLAY_HEIGHT) * DISPLAY_WIDTH]
    }

    pub fn cells(&self) -> &[bool; DISPLAY_SIZE] {
        &self.cells
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// One line per row: `#` for lit pixels, `.` for dark ones
impl fmt::Display for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(DISPLAY_WIDTH) {
            let line: String = row.iter().map(|&lit| if lit { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("lit", &self.cells.iter().filter(|&&lit| lit).count())
            .field("dirty", &self.dirty)
            .finish()
    }
}
