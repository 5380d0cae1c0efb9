use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// One row of pixels, indexed by x.
pub type Row = [bool; DISPLAY_WIDTH];

/// # Frame Buffer
/// The Chip-8 display is composed of 64x32 black/white pixels.
/// Their on/off state is stored as a 2d array indexed as [y][x].
///
/// Every coordinate wraps: x is taken modulo 64 and y modulo 32, both for point access
/// and for sprites that run off an edge of the screen.
///
/// `dirty` tracks whether anything has changed since the renderer last took the frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [Row; DISPLAY_HEIGHT],
    dirty: bool,
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            dirty: true,
        }
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH]
    }

    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH] = on;
        self.dirty = true;
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        self.pixels = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.dirty = true;
    }

    /// XORs `sprite` onto the screen with its top left corner at (x, y).
    ///
    /// Each byte of `sprite` is one 8 pixel row, most significant bit leftmost.
    /// Returns true if any pixel that was on got turned off.
    pub fn draw(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let mut collision = false;

        for (row, byte) in sprite.iter().enumerate() {
            let py = (y as usize + row) % DISPLAY_HEIGHT;
            for bit in 0..8 {
                if byte & (0x80 >> bit) == 0 {
                    continue;
                }
                let px = (x as usize + bit) % DISPLAY_WIDTH;
                let pixel = &mut self.pixels[py][px];
                collision |= *pixel;
                *pixel ^= true;
            }
        }

        self.dirty = true;
        collision
    }

    pub fn rows(&self) -> &[Row; DISPLAY_HEIGHT] {
        &self.pixels
    }

    /// Whether the frame changed since the last call to `take_dirty`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether the frame changed and marks it clean.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
