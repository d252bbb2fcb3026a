use crate::{
    consts::{FRAME_PIXELS, HEIGHT, WIDTH},
    geometry::slot,
    palette::Rgb,
};
use alloc::{vec, vec::Vec};
use snafu::{ensure, Snafu};

/// One fixed-size raster, row-major RGB.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    pixels: Vec<Rgb>,
}

#[derive(Debug, Snafu)]
#[snafu(module)]
pub enum FrameError {
    #[snafu(display("frames are {WIDTH}x{HEIGHT}, got {width}x{height}"))]
    InvalidDimensions { width: usize, height: usize },
    #[snafu(display("expected {expected} bytes of RGB data, got {actual}"))]
    BufferSizeMismatch { expected: usize, actual: usize },
}

impl Frame {
    /// A frame with every pixel set to `[0, 0, 0]`.
    pub fn new() -> Self {
        Self {
            pixels: vec![[0; 3]; FRAME_PIXELS],
        }
    }

    /// Builds a frame from packed 8-bit RGB data, as produced by [`Frame::as_raw_rgb`] or by
    /// an image library's RGB8 buffer.
    pub fn from_raw_rgb(width: usize, height: usize, raw: &[u8]) -> Result<Self, FrameError> {
        ensure!(
            width == WIDTH && height == HEIGHT,
            frame_error::InvalidDimensionsSnafu { width, height }
        );
        ensure!(
            raw.len() == FRAME_PIXELS * 3,
            frame_error::BufferSizeMismatchSnafu {
                expected: FRAME_PIXELS * 3,
                actual: raw.len()
            }
        );

        let pixels = raw
            .chunks_exact(3)
            .map(|p| [p[0], p[1], p[2]])
            .collect();

        Ok(Self { pixels })
    }

    pub const fn width(&self) -> usize {
        WIDTH
    }

    pub const fn height(&self) -> usize {
        HEIGHT
    }

    /// # Panics
    ///
    /// If `(x, y)` is outside the frame.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        assert!(x < WIDTH && y < HEIGHT, "pixel ({x}, {y}) out of bounds");
        self.pixels[slot(x, y)]
    }

    /// # Panics
    ///
    /// If `(x, y)` is outside the frame.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        assert!(x < WIDTH && y < HEIGHT, "pixel ({x}, {y}) out of bounds");
        self.pixels[slot(x, y)] = color;
    }

    #[inline]
    pub(crate) fn set_slot(&mut self, slot: usize, color: Rgb) {
        self.pixels[slot] = color;
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Packed `R G B R G B ...` bytes, row-major.
    pub fn as_raw_rgb(&self) -> Vec<u8> {
        let mut raw = Vec::with_capacity(FRAME_PIXELS * 3);
        for pixel in &self.pixels {
            raw.extend_from_slice(pixel);
        }
        raw
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

// 2M pixels are not useful in a debug print.
impl core::fmt::Debug for Frame {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &WIDTH)
            .field("height", &HEIGHT)
            .finish_non_exhaustive()
    }
}
