pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 32;

/// 64x32 one-byte-per-pixel grid, row-major, each cell 0 or 1.
pub struct FrameBuffer {
    bit_buffer: [u8; WIDTH * HEIGHT],
    draw_requested: bool,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            bit_buffer: [0; WIDTH * HEIGHT],
            draw_requested: false,
        }
    }

    pub fn clear_buffer(&mut self) {
        self.bit_buffer = [0; WIDTH * HEIGHT];
        self.draw_requested = true;
    }

    /// XORs `sprite` onto the grid at (x, y). Each pixel wraps around both
    /// edges. Returns whether any lit pixel was switched off.
    pub fn paint(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (i, &row) in sprite.iter().enumerate() {
            for j in 0..8 {
                let bit = (row >> (7 - j)) & 1;
                if bit == 0 {
                    continue;
                }
                let (nx, ny) = ((x as usize + j) % WIDTH, (y as usize + i) % HEIGHT);
                let index = ny * WIDTH + nx;
                if self.bit_buffer[index] == 1 {
                    collision = true;
                }
                self.bit_buffer[index] ^= 1;
            }
        }
        self.draw_requested = true;
        collision
    }

    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.bit_buffer[(y % HEIGHT) * WIDTH + (x % WIDTH)]
    }

    pub fn pixels(&self) -> &[u8] {
        &self.bit_buffer
    }

    pub fn draw_requested(&self) -> bool {
        self.draw_requested
    }

    /// Hands the pending draw request to the renderer and clears it.
    pub fn take_draw_request(&mut self) -> bool {
        std::mem::take(&mut self.draw_requested)
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_and_erase() {
        let mut fb = FrameBuffer::new();
        assert!(!fb.paint(0, 0, &[0b1010_0000]));
        assert_eq!(fb.pixel(0, 0), 1);
        assert_eq!(fb.pixel(1, 0), 0);
        assert_eq!(fb.pixel(2, 0), 1);
        assert!(fb.paint(0, 0, &[0b1000_0000]));
        assert_eq!(fb.pixel(0, 0), 0);
        assert_eq!(fb.pixel(2, 0), 1);
    }

    #[test]
    fn test_paint_wraps_each_pixel() {
        let mut fb = FrameBuffer::new();
        fb.paint(62, 31, &[0xFF, 0xFF]);
        assert_eq!(fb.pixel(63, 31), 1);
        assert_eq!(fb.pixel(0, 31), 1);
        assert_eq!(fb.pixel(5, 31), 1);
        assert_eq!(fb.pixel(6, 31), 0);
        assert_eq!(fb.pixel(62, 0), 1);
        assert_eq!(fb.pixels().iter().filter(|&&p| p == 1).count(), 16);
    }

    #[test]
    fn test_coordinates_beyond_screen_wrap() {
        let mut fb = FrameBuffer::new();
        fb.paint(64 + 3, 32 + 1, &[0x80]);
        assert_eq!(fb.pixel(3, 1), 1);
    }

    #[test]
    fn test_draw_request_handoff() {
        let mut fb = FrameBuffer::new();
        assert!(!fb.draw_requested());
        fb.paint(0, 0, &[]);
        assert!(fb.take_draw_request());
        assert!(!fb.take_draw_request());
        fb.clear_buffer();
        assert!(fb.draw_requested());
    }
}
