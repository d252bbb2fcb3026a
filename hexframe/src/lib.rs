//! Stores arbitrary bytes in the pixel colors of fixed-size raster frames.
//!
//! Every nibble of the input becomes one pixel painted with one of 16 palette colors. A 17th color
//! marks the end of the stream. Because the information lives in discrete colors instead of in the
//! byte layout of a media container, a frame can be stored as a still image (or as one frame of a
//! video) and read back as long as the colors survive exactly.
//!
//! # Stream format
//!
//! ```plain
//! .- framed stream -------------------------------------------.
//! | 0xF9 0xAC | payload bytes ...                   | EOF     |
//! |-----------+-------------------------------------+---------|
//! | magic     | two pixels per byte, high nibble    | 1 pixel |
//! |           | first                               |         |
//! `-----------------------------------------------------------`
//! ```
//!
//! - Frames are [`WIDTH`](consts::WIDTH) x [`HEIGHT`](consts::HEIGHT) pixels, filled row-major,
//!   left to right, top to bottom.
//! - Nibble `i` of the framed stream lives in frame `i / (W * H)`, see [`geometry::position`].
//! - A frame that fills up before the stream ends carries no EOF. Only the last frame does, at the
//!   slot right after the last data pixel. If that slot falls outside the last data frame, an
//!   extra frame is emitted holding nothing but the EOF at `(0, 0)`.
//! - Unused slots are left as `[0, 0, 0]`, which is the color of nibble `0`.
//!
//! # Palette
//!
//! See [`palette`] for the color table.
#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "alloc")]
pub mod encode;
#[cfg(feature = "alloc")]
pub mod frame;

pub mod decode;
pub mod geometry;
pub mod palette;

pub use decode::{ColorMatch, HexFrameDecodeContext, Progress};
#[cfg(feature = "alloc")]
pub use decode::{decode, decode_frames, Decoder};
#[cfg(feature = "alloc")]
pub use encode::{encode, encode_single, Encoder};
#[cfg(feature = "alloc")]
pub use frame::Frame;
pub use palette::{Rgb, Symbol};

pub mod consts {
    /// Frame width in pixels.
    pub const WIDTH: usize = 1920;

    /// Frame height in pixels.
    pub const HEIGHT: usize = 1080;

    /// Nibble slots per frame. One pixel holds one nibble.
    pub const FRAME_PIXELS: usize = WIDTH * HEIGHT;

    /// Byte slots per frame.
    pub const FRAME_BYTES: usize = FRAME_PIXELS / 2;

    /// Prepended to every payload before it is rasterized. Read as a big-endian `u16`: `0xF9AC`.
    pub const MAGIC: [u8; 2] = [0xF9, 0xAC];

    /// Largest payload whose framed stream and EOF pixel still fit into a single frame.
    pub const MAX_SINGLE_FRAME_PAYLOAD: usize = FRAME_BYTES - 1 - MAGIC.len();

    // A byte must never straddle two frames.
    const _: () = assert!(FRAME_PIXELS % 2 == 0);
}
