/// width of the CHIP-8 display in pixels
pub const DISPLAY_WIDTH: usize = 64;

/// height of the CHIP-8 display in pixels
pub const DISPLAY_HEIGHT: usize = 32;

/// # FrameBuffer
/// The 64x32 monochrome screen, indexed as `[y][x]`. Every coordinate wraps
/// on both axes, so sprites that run off an edge reappear on the opposite one.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    /// switch every pixel off
    pub fn clear(&mut self) {
        self.pixels = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH] = on;
    }

    /// Flip the pixel at (x, y). Returns true if it was on and is now off.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        let pixel = &mut self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH];
        let erased = *pixel;
        *pixel = !*pixel;
        erased
    }

    /// XOR one 8-pixel sprite row onto the screen, MSB leftmost.
    /// Returns true if any pixel was erased.
    pub fn xor_row(&mut self, x: usize, y: usize, row: u8) -> bool {
        let mut collision = false;
        for bit in 0..8 {
            if row & (0x80 >> bit) != 0 {
                collision |= self.toggle(x + bit, y);
            }
        }
        collision
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool; DISPLAY_WIDTH]> {
        self.pixels.iter()
    }

    /// (x, y) of every lit pixel, row by row
    pub fn lit_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, on)| **on)
                .map(move |(x, _)| (x, y))
        })
    }

    pub fn is_blank(&self) -> bool {
        self.lit_pixels().next().is_none()
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|on| if *on { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_blank() {
        assert!(FrameBuffer::new().is_blank());
    }

    #[test]
    fn test_toggle_reports_erase() {
        let mut fb = FrameBuffer::new();
        assert!(!fb.toggle(3, 4));
        assert!(fb.pixel(3, 4));
        assert!(fb.toggle(3, 4));
        assert!(!fb.pixel(3, 4));
    }

    #[test]
    fn test_coordinates_wrap() {
        let mut fb = FrameBuffer::new();
        fb.set_pixel(64 + 2, 32 + 1, true);
        assert!(fb.pixel(2, 1));
    }

    #[test]
    fn test_xor_row() {
        let mut fb = FrameBuffer::new();
        // 0 1 0 1 -> Set
        fb.set_pixel(1, 0, true);
        fb.set_pixel(3, 0, true);
        // 1 1 0 0 -> Draw xor
        assert!(fb.xor_row(0, 0, 0b1100_0000));
        let row: Vec<bool> = (0..4).map(|x| fb.pixel(x, 0)).collect();
        assert_eq!(row, [true, false, false, true]);
    }

    #[test]
    fn test_xor_row_wraps_horizontally() {
        let mut fb = FrameBuffer::new();
        assert!(!fb.xor_row(62, 5, 0xFF));
        let lit: Vec<(usize, usize)> = fb.lit_pixels().collect();
        assert_eq!(
            lit,
            [(0, 5), (1, 5), (2, 5), (3, 5), (4, 5), (5, 5), (62, 5), (63, 5)]
        );
    }

    #[test]
    fn test_clear() {
        let mut fb = FrameBuffer::new();
        fb.xor_row(0, 0, 0xFF);
        fb.clear();
        assert!(fb.is_blank());
    }
}
