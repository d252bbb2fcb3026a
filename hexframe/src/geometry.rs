use crate::consts::{FRAME_BYTES, FRAME_PIXELS, MAGIC, WIDTH};

/// Location of a nibble slot: the frame it lives in and its pixel coordinates in that frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub frame: usize,
    pub x: usize,
    pub y: usize,
}

/// Maps a global nibble index (counted across the whole framed stream) to its pixel.
#[inline]
pub const fn position(nibble_index: usize) -> Position {
    let frame = nibble_index / FRAME_PIXELS;
    let (x, y) = frame_xy(nibble_index % FRAME_PIXELS);
    Position { frame, x, y }
}

/// Coordinates of a frame-relative slot.
#[inline]
pub const fn frame_xy(slot: usize) -> (usize, usize) {
    (slot % WIDTH, slot / WIDTH)
}

/// Frame-relative slot of a pixel. Inverse of [`frame_xy`].
#[inline]
pub const fn slot(x: usize, y: usize) -> usize {
    y * WIDTH + x
}

/// Number of frames the encoder emits for a payload of `payload_len` bytes.
///
/// The EOF pixel takes one slot after the last data pixel, so a framed stream that exactly fills
/// its last frame needs one more frame.
pub const fn frame_count(payload_len: usize) -> usize {
    let framed_len = payload_len + MAGIC.len();
    framed_len / FRAME_BYTES + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{HEIGHT, MAX_SINGLE_FRAME_PAYLOAD};

    #[test]
    fn byte_pairs_are_horizontal_neighbours() {
        for byte_index in [0, 1, 959, 960, 1919, FRAME_BYTES - 1, FRAME_BYTES, 3 * FRAME_BYTES + 7] {
            let high = position(byte_index * 2);
            let low = position(byte_index * 2 + 1);
            assert_eq!(high.frame, low.frame);
            assert_eq!(high.y, low.y);
            assert_eq!(high.x + 1, low.x);
        }
    }

    #[test]
    fn positions_are_frame_relative() {
        assert_eq!(position(0), Position { frame: 0, x: 0, y: 0 });
        assert_eq!(position(WIDTH), Position { frame: 0, x: 0, y: 1 });
        assert_eq!(
            position(FRAME_PIXELS - 1),
            Position { frame: 0, x: WIDTH - 1, y: HEIGHT - 1 }
        );
        assert_eq!(position(FRAME_PIXELS), Position { frame: 1, x: 0, y: 0 });
        assert_eq!(position(FRAME_PIXELS + WIDTH + 3), Position { frame: 1, x: 3, y: 1 });
    }

    #[test]
    fn slot_inverts_frame_xy() {
        for s in [0, 1, WIDTH - 1, WIDTH, 12345, FRAME_PIXELS - 1] {
            let (x, y) = frame_xy(s);
            assert_eq!(slot(x, y), s);
        }
    }

    #[test]
    fn frame_count_accounts_for_eof() {
        assert_eq!(frame_count(0), 1);
        assert_eq!(frame_count(MAX_SINGLE_FRAME_PAYLOAD), 1);
        // last data byte lands in the final slot pair, EOF spills over
        assert_eq!(frame_count(MAX_SINGLE_FRAME_PAYLOAD + 1), 2);
        assert_eq!(frame_count(FRAME_BYTES), 2);
        assert_eq!(frame_count(2 * FRAME_BYTES - MAGIC.len()), 3);
    }
}
