use crate::{
    consts::{FRAME_PIXELS, MAGIC},
    geometry::frame_xy,
    palette::{color_to_symbol, nearest_symbol, Rgb, Symbol},
};
use byteorder::{BigEndian, ByteOrder};
use itertools::Itertools;
use snafu::{ensure, Snafu};

#[cfg(feature = "alloc")]
mod alloc_api;
#[cfg(feature = "alloc")]
pub use alloc_api::*;

/// How pixel colors are mapped back to symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMatch {
    /// A pixel must carry exactly one of the palette colors. Anything else is an error.
    #[default]
    Exact,
    /// A pixel that is not a palette color is read as the closest one.
    ///
    /// Meant for frames that went through lossy video compression. A wrong guess silently
    /// produces a wrong byte, so this is opt-in.
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// The frame held no EOF pixel. The stream continues in the next frame.
    NeedMore,
    /// The EOF pixel was found. Further frames are ignored.
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
#[snafu(module)]
pub enum DecodeError {
    #[snafu(display(
        "corrupt frame: pixel ({x}, {y}) in frame {frame} has color {color:?}, which is not a palette color"
    ))]
    UnknownColor {
        frame: usize,
        x: usize,
        y: usize,
        color: Rgb,
    },
    #[snafu(display("no EOF pixel in {frames} frame(s)"))]
    TruncatedStream { frames: usize },
    #[snafu(display("EOF pixel found before the magic marker was complete"))]
    TruncatedHeader,
    #[snafu(display("stream ends after an odd number of nibbles ({nibbles})"))]
    OddHexLength { nibbles: usize },
    #[snafu(display("invalid magic marker {found:#06x}, expected 0xf9ac"))]
    InvalidMagic { found: u16 },
    #[snafu(display("expected {expected} pixels per frame, got {actual}"))]
    InvalidFrameSize { expected: usize, actual: usize },
}

#[derive(Debug, Clone, Copy)]
enum DecodeState {
    Scanning,
    Terminated,
    Failed(DecodeError),
}

/// Walks frames in raster order and reassembles the payload.
///
/// Feed frames in order with [`decode_pixels`](Self::decode_pixels) until it returns
/// [`Progress::Done`], then call [`finish`](Self::finish). The magic marker is checked and never
/// written to the output.
#[derive(Debug, Clone)]
pub struct HexFrameDecodeContext {
    state: DecodeState,
    color_match: ColorMatch,
    frames_seen: usize,
    /// Framed-stream bytes decoded so far, magic included.
    bytes_seen: usize,
    magic: [u8; 2],
    /// Pixels read through [`ColorMatch::Nearest`] that were not exact palette colors.
    substituted: usize,
}

impl HexFrameDecodeContext {
    pub const fn new(color_match: ColorMatch) -> Self {
        Self {
            state: DecodeState::Scanning,
            color_match,
            frames_seen: 0,
            bytes_seen: 0,
            magic: [0; 2],
            substituted: 0,
        }
    }

    /// Decodes one frame worth of row-major pixels, appending payload bytes to `output`.
    ///
    /// Once the context returned an error it keeps returning it. Once it returned
    /// [`Progress::Done`], further calls return `Done` without looking at the pixels.
    pub fn decode_pixels(
        &mut self,
        pixels: &[Rgb],
        output: &mut impl Extend<u8>,
    ) -> Result<Progress, DecodeError> {
        match self.state {
            DecodeState::Scanning => {}
            DecodeState::Terminated => return Ok(Progress::Done),
            DecodeState::Failed(err) => return Err(err),
        }

        let result = self.scan(pixels, output);
        match result {
            Ok(Progress::NeedMore) => {}
            Ok(Progress::Done) => self.state = DecodeState::Terminated,
            Err(err) => self.state = DecodeState::Failed(err),
        }
        result
    }

    fn scan(
        &mut self,
        pixels: &[Rgb],
        output: &mut impl Extend<u8>,
    ) -> Result<Progress, DecodeError> {
        ensure!(
            pixels.len() == FRAME_PIXELS,
            decode_error::InvalidFrameSizeSnafu {
                expected: FRAME_PIXELS,
                actual: pixels.len()
            }
        );

        let frame = self.frames_seen;
        self.frames_seen += 1;

        // pixel pairs never straddle frames, FRAME_PIXELS is even
        for ((slot, &high), (_, &low)) in pixels.iter().enumerate().tuples() {
            let Symbol::Nibble(high) = self.classify(frame, slot, high)? else {
                return self.terminate();
            };
            let Symbol::Nibble(low) = self.classify(frame, slot + 1, low)? else {
                return decode_error::OddHexLengthSnafu {
                    nibbles: self.bytes_seen * 2 + 1,
                }
                .fail();
            };

            self.push_byte(high << 4 | low, output)?;
        }

        tracing::debug!(frame, "no EOF in frame, continuing");
        Ok(Progress::NeedMore)
    }

    #[inline]
    fn classify(&mut self, frame: usize, slot: usize, color: Rgb) -> Result<Symbol, DecodeError> {
        match color_to_symbol(color) {
            Ok(symbol) => Ok(symbol),
            Err(_) if self.color_match == ColorMatch::Nearest => {
                self.substituted += 1;
                Ok(nearest_symbol(color))
            }
            Err(_) => {
                let (x, y) = frame_xy(slot);
                decode_error::UnknownColorSnafu { frame, x, y, color }.fail()
            }
        }
    }

    #[inline]
    fn push_byte(&mut self, byte: u8, output: &mut impl Extend<u8>) -> Result<(), DecodeError> {
        if self.bytes_seen >= MAGIC.len() {
            output.extend(core::iter::once(byte));
            self.bytes_seen += 1;
            return Ok(());
        }

        self.magic[self.bytes_seen] = byte;
        self.bytes_seen += 1;

        if self.bytes_seen == MAGIC.len() {
            ensure!(
                self.magic == MAGIC,
                decode_error::InvalidMagicSnafu {
                    found: BigEndian::read_u16(&self.magic)
                }
            );
        }

        Ok(())
    }

    fn terminate(&self) -> Result<Progress, DecodeError> {
        ensure!(
            self.bytes_seen >= MAGIC.len(),
            decode_error::TruncatedHeaderSnafu
        );

        if self.substituted > 0 {
            tracing::warn!(
                pixels = self.substituted,
                "pixels did not match the palette exactly and were read as the nearest color"
            );
        }
        tracing::debug!(
            frames = self.frames_seen,
            bytes = self.payload_len(),
            "EOF found"
        );

        Ok(Progress::Done)
    }

    /// Payload bytes written to the output so far.
    pub fn payload_len(&self) -> usize {
        self.bytes_seen.saturating_sub(MAGIC.len())
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, DecodeState::Terminated)
    }

    /// Ends decoding. Returns the payload length, or [`DecodeError::TruncatedStream`] if no EOF
    /// pixel was seen in any of the frames.
    pub fn finish(&self) -> Result<usize, DecodeError> {
        match self.state {
            DecodeState::Terminated => Ok(self.payload_len()),
            DecodeState::Failed(err) => Err(err),
            DecodeState::Scanning => decode_error::TruncatedStreamSnafu {
                frames: self.frames_seen,
            }
            .fail(),
        }
    }
}

impl Default for HexFrameDecodeContext {
    fn default() -> Self {
        Self::new(ColorMatch::Exact)
    }
}
