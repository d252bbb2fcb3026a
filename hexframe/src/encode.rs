use crate::{
    consts::{FRAME_PIXELS, MAGIC, MAX_SINGLE_FRAME_PAYLOAD},
    frame::Frame,
    palette::{nibble_color, EOF_COLOR},
};
use alloc::vec::Vec;
use snafu::{ensure, Snafu};

#[cfg(feature = "std")]
mod std_api;

#[derive(Debug, Snafu)]
pub enum EncodeError {
    #[snafu(display(
        "payload of {len} bytes does not fit into a single frame (at most {MAX_SINGLE_FRAME_PAYLOAD} bytes)"
    ))]
    PayloadTooLarge { len: usize },
}

/// Rasterizes a byte stream into frames.
///
/// The magic marker is written on construction. Call [`Encoder::write`] as often as needed, then
/// [`Encoder::finish`] to place the EOF pixel and collect the frames.
pub struct Encoder {
    frames: Vec<Frame>,
    current: Frame,
    /// Next free frame-relative nibble slot in `current`. Always even.
    slot: usize,
    bytes_written: usize,
}

impl Encoder {
    pub fn new() -> Self {
        let mut encoder = Self {
            frames: Vec::new(),
            current: Frame::new(),
            slot: 0,
            bytes_written: 0,
        };
        encoder.write(&MAGIC);
        encoder
    }

    /// Appends payload bytes to the framed stream.
    pub fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_byte(byte);
        }
    }

    #[inline]
    fn write_byte(&mut self, byte: u8) {
        self.current.set_slot(self.slot, nibble_color(byte >> 4));
        self.current.set_slot(self.slot + 1, nibble_color(byte));
        self.slot += 2;
        self.bytes_written += 1;

        if self.slot == FRAME_PIXELS {
            // full frames carry no EOF
            let full = core::mem::take(&mut self.current);
            self.frames.push(full);
            self.slot = 0;
            tracing::debug!(frames = self.frames.len(), "frame full, flushed");
        }
    }

    /// Number of framed-stream bytes written so far, magic included.
    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Writes the EOF pixel right after the last data pixel and returns all frames in order.
    ///
    /// If the last byte filled its frame exactly, the EOF goes to `(0, 0)` of one more frame.
    pub fn finish(mut self) -> Vec<Frame> {
        self.current.set_slot(self.slot, EOF_COLOR);
        self.frames.push(self.current);
        tracing::debug!(
            frames = self.frames.len(),
            bytes = self.bytes_written,
            "encoding finished"
        );
        self.frames
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Encodes `payload` into as many frames as it needs.
pub fn encode(payload: &[u8]) -> Vec<Frame> {
    let mut encoder = Encoder::new();
    encoder.write(payload);
    encoder.finish()
}

/// Encodes `payload` into exactly one frame.
pub fn encode_single(payload: &[u8]) -> Result<Frame, EncodeError> {
    ensure!(
        payload.len() <= MAX_SINGLE_FRAME_PAYLOAD,
        PayloadTooLargeSnafu { len: payload.len() }
    );

    let frames = encode(payload);
    debug_assert_eq!(frames.len(), 1);
    Ok(frames.into_iter().next().unwrap_or_default())
}
