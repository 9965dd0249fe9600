use chip8_base::{Display, Pixel};

pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 32;

/// Monochrome 64x32 screen, stored row-major. `true` is a lit pixel.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    cells: [bool; WIDTH * HEIGHT],
}

impl Framebuffer {
    pub fn new() -> Framebuffer {
        Framebuffer {
            cells: [false; WIDTH * HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.cells = [false; WIDTH * HEIGHT];
    }

    /// pixel at (x, y); coordinates wrap around the screen edges
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[Self::offset(x, y)]
    }

    /// all pixels, row after row, `stride()` cells per row
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn stride(&self) -> usize {
        WIDTH
    }

    /// XOR each sprite row onto the screen with its top-left corner at (x, y).
    ///
    /// Every set bit flips the pixel under it; pixels that fall off the right
    /// or bottom edge wrap to the opposite side. Returns true if any lit pixel
    /// was switched off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, &byte) in sprite.iter().enumerate() {
            for col in 0..8 {
                if byte & (0x80 >> col) == 0 {
                    continue;
                }
                let cell = &mut self.cells[Self::offset(x + col, y + row)];
                collision |= *cell;
                *cell = !*cell;
            }
        }
        collision
    }

    /// convert to the host display grid
    pub fn to_display(&self) -> Display {
        let mut display = [[Pixel::Black; WIDTH]; HEIGHT];
        for (y, row) in self.cells.chunks(WIDTH).enumerate() {
            for (x, &lit) in row.iter().enumerate() {
                if lit {
                    display[y][x] = Pixel::White;
                }
            }
        }
        display
    }

    fn offset(x: usize, y: usize) -> usize {
        (y % HEIGHT) * WIDTH + (x % WIDTH)
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(WIDTH) {
            let line: String = row.iter().map(|&lit| if lit { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
