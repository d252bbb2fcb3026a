use crate::{
    decode::{ColorMatch, DecodeError, HexFrameDecodeContext, Progress},
    frame::Frame,
};
use alloc::vec::Vec;

/// Decodes frames into an owned buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    color_match: ColorMatch,
}

impl Decoder {
    pub const fn new() -> Self {
        Self {
            color_match: ColorMatch::Exact,
        }
    }

    pub const fn with_color_match(mut self, color_match: ColorMatch) -> Self {
        self.color_match = color_match;
        self
    }

    /// Decodes a payload that fits into one frame.
    pub fn decode(&self, frame: &Frame) -> Result<Vec<u8>, DecodeError> {
        self.decode_frames(core::slice::from_ref(frame))
    }

    /// Decodes a payload spread over `frames`, in order. Frames after the one holding the EOF
    /// pixel are ignored.
    pub fn decode_frames(&self, frames: &[Frame]) -> Result<Vec<u8>, DecodeError> {
        let mut state = HexFrameDecodeContext::new(self.color_match);
        let mut output = Vec::new();

        for frame in frames {
            if state.decode_pixels(frame.pixels(), &mut output)? == Progress::Done {
                break;
            }
        }

        let len = state.finish()?;
        debug_assert_eq!(len, output.len());
        Ok(output)
    }
}

/// Decodes a single frame with exact color matching.
pub fn decode(frame: &Frame) -> Result<Vec<u8>, DecodeError> {
    Decoder::new().decode(frame)
}

/// Decodes a sequence of frames with exact color matching.
pub fn decode_frames(frames: &[Frame]) -> Result<Vec<u8>, DecodeError> {
    Decoder::new().decode_frames(frames)
}
