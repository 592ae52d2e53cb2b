use std::fmt;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// # FrameBuffer
/// The Chip-8 display is composed of 64x32 black/white pixels.
///
/// Pixels are stored as rows and indexed as `[y][x]`. Coordinates are not wrapped here; callers
/// must pass `x < DISPLAY_WIDTH` and `y < DISPLAY_HEIGHT`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[y][x]
    }

    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        self.pixels[y][x] = on;
    }

    /// Turns every pixel off
    pub fn clear(&mut self) {
        self.pixels = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    /// XORs a single pixel on.
    /// Returns true if the pixel was lit and has now been erased.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        let erased = self.pixels[y][x];
        self.pixels[y][x] = !erased;
        erased
    }

    /// Read-only view of the pixel rows for rendering
    pub fn rows(&self) -> &[[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT] {
        &self.pixels
    }

    pub fn lit_pixels(&self) -> usize {
        self.pixels
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&on| on)
            .count()
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders lit pixels as `#` and unlit pixels as `.`, one line per row.
impl fmt::Display for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.pixels.iter() {
            let line: String = row.iter().map(|&on| if on { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_blank() {
        let frame = FrameBuffer::new();
        assert_eq!(frame.lit_pixels(), 0);
    }

    #[test]
    fn test_set_and_get() {
        let mut frame = FrameBuffer::new();
        frame.set(63, 31, true);
        assert!(frame.get(63, 31));
        assert!(!frame.get(0, 0));
        assert!(frame.rows()[31][63]);
    }

    #[test]
    fn test_toggle_reports_erasure() {
        let mut frame = FrameBuffer::new();
        assert!(!frame.toggle(3, 4));
        assert!(frame.get(3, 4));
        assert!(frame.toggle(3, 4));
        assert!(!frame.get(3, 4));
    }

    #[test]
    fn test_clear() {
        let mut frame = FrameBuffer::new();
        frame.set(1, 1, true);
        frame.set(2, 2, true);
        frame.clear();
        assert_eq!(frame, FrameBuffer::new());
    }

    #[test]
    fn test_display_renders_rows() {
        let mut frame = FrameBuffer::new();
        frame.set(0, 0, true);
        let text = frame.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), DISPLAY_HEIGHT);
        assert!(lines[0].starts_with("#."));
        assert_eq!(lines[1], ".".repeat(DISPLAY_WIDTH));
    }
}
