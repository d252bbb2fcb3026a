//! The fixed color table.
//!
//! | Symbol | Color             | Symbol | Color             |
//! |--------|-------------------|--------|-------------------|
//! | `0`    | `(0, 0, 0)`       | `9`    | `(0, 0, 255)`     |
//! | `1`    | `(0, 0, 128)`     | `a`    | `(0, 255, 0)`     |
//! | `2`    | `(0, 128, 0)`     | `b`    | `(0, 255, 255)`   |
//! | `3`    | `(0, 128, 128)`   | `c`    | `(255, 0, 0)`     |
//! | `4`    | `(128, 0, 0)`     | `d`    | `(255, 0, 255)`   |
//! | `5`    | `(128, 0, 128)`   | `e`    | `(255, 255, 0)`   |
//! | `6`    | `(128, 128, 0)`   | `f`    | `(255, 255, 255)` |
//! | `7`    | `(192, 192, 192)` | EOF    | `(128, 192, 128)` |
//! | `8`    | `(128, 128, 128)` |        |                   |
//!
//! Only the forward table is written out. The reverse lookup is derived from it at compile time,
//! and a duplicated color fails the build.
use snafu::Snafu;

/// An 8-bit-per-component color.
pub type Rgb = [u8; 3];

/// One value of the 17-symbol alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A hex digit, `0..=15`.
    Nibble(u8),
    /// End of the framed stream.
    Eof,
}

pub const SYMBOL_COUNT: usize = 17;

const EOF_INDEX: usize = 16;

/// Colors indexed by nibble value, EOF last.
pub const COLORS: [Rgb; SYMBOL_COUNT] = [
    [0, 0, 0],
    [0, 0, 128],
    [0, 128, 0],
    [0, 128, 128],
    [128, 0, 0],
    [128, 0, 128],
    [128, 128, 0],
    [192, 192, 192],
    [128, 128, 128],
    [0, 0, 255],
    [0, 255, 0],
    [0, 255, 255],
    [255, 0, 0],
    [255, 0, 255],
    [255, 255, 0],
    [255, 255, 255],
    // EOF
    [128, 192, 128],
];

pub const EOF_COLOR: Rgb = COLORS[EOF_INDEX];

/// `(packed color, symbol index)`, sorted by packed color.
const REVERSE: [(u32, u8); SYMBOL_COUNT] = build_reverse(&COLORS);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
#[snafu(module)]
pub enum PaletteError {
    #[snafu(display("symbol value {value} is outside the palette alphabet"))]
    UnknownSymbol { value: u8 },
    #[snafu(display("color {color:?} is not a palette color"))]
    UnknownColor { color: Rgb },
}

impl Symbol {
    #[inline]
    const fn from_index(index: u8) -> Self {
        if index as usize == EOF_INDEX {
            Symbol::Eof
        } else {
            Symbol::Nibble(index)
        }
    }
}

#[inline]
const fn pack([r, g, b]: Rgb) -> u32 {
    (r as u32) << 16 | (g as u32) << 8 | b as u32
}

const fn build_reverse(colors: &[Rgb; SYMBOL_COUNT]) -> [(u32, u8); SYMBOL_COUNT] {
    let mut table = [(0u32, 0u8); SYMBOL_COUNT];
    let mut i = 0;
    while i < SYMBOL_COUNT {
        table[i] = (pack(colors[i]), i as u8);
        i += 1;
    }

    // insertion sort, 17 entries
    let mut i = 1;
    while i < SYMBOL_COUNT {
        let mut j = i;
        while j > 0 && table[j - 1].0 > table[j].0 {
            let tmp = table[j - 1];
            table[j - 1] = table[j];
            table[j] = tmp;
            j -= 1;
        }
        i += 1;
    }

    let mut i = 1;
    while i < SYMBOL_COUNT {
        assert!(table[i - 1].0 != table[i].0, "palette colors must be distinct");
        i += 1;
    }

    table
}

/// Looks up the color of a symbol.
pub fn symbol_to_color(symbol: Symbol) -> Result<Rgb, PaletteError> {
    match symbol {
        Symbol::Nibble(value) if value < 16 => Ok(COLORS[usize::from(value)]),
        Symbol::Nibble(value) => palette_error::UnknownSymbolSnafu { value }.fail(),
        Symbol::Eof => Ok(EOF_COLOR),
    }
}

/// Color of the low four bits of `nibble`.
#[inline]
pub(crate) const fn nibble_color(nibble: u8) -> Rgb {
    COLORS[(nibble & 0b1111) as usize]
}

/// Looks up the symbol painted with exactly `color`.
pub fn color_to_symbol(color: Rgb) -> Result<Symbol, PaletteError> {
    REVERSE
        .binary_search_by_key(&pack(color), |&(packed, _)| packed)
        .map(|i| Symbol::from_index(REVERSE[i].1))
        .map_err(|_| PaletteError::UnknownColor { color })
}

/// Classifies `color` as the palette symbol with the smallest squared RGB distance.
///
/// Not part of the exact decoding contract. Used by [`ColorMatch::Nearest`](crate::ColorMatch) to
/// read frames that went through lossy re-encoding. Ties go to the lower symbol index.
pub fn nearest_symbol(color: Rgb) -> Symbol {
    let distance = |candidate: &Rgb| -> u32 {
        color
            .iter()
            .zip(candidate)
            .map(|(&a, &b)| {
                let d = u32::from(a.abs_diff(b));
                d * d
            })
            .sum()
    };

    let (index, _) = COLORS
        .iter()
        .enumerate()
        .min_by_key(|(_, candidate)| distance(*candidate))
        .unwrap_or((0, &COLORS[0]));

    Symbol::from_index(index as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alphabet() -> impl Iterator<Item = Symbol> {
        (0..16).map(Symbol::Nibble).chain(core::iter::once(Symbol::Eof))
    }

    #[test]
    fn bijection() {
        for symbol in alphabet() {
            let color = symbol_to_color(symbol).unwrap();
            assert_eq!(color_to_symbol(color).unwrap(), symbol);
        }
    }

    #[test]
    fn spot_check_table() {
        assert_eq!(symbol_to_color(Symbol::Nibble(0x0)).unwrap(), [0, 0, 0]);
        assert_eq!(symbol_to_color(Symbol::Nibble(0x7)).unwrap(), [192, 192, 192]);
        assert_eq!(symbol_to_color(Symbol::Nibble(0xc)).unwrap(), [255, 0, 0]);
        assert_eq!(symbol_to_color(Symbol::Nibble(0xf)).unwrap(), [255, 255, 255]);
        assert_eq!(symbol_to_color(Symbol::Eof).unwrap(), [128, 192, 128]);
    }

    #[test]
    fn unknown_symbol() {
        assert_eq!(
            symbol_to_color(Symbol::Nibble(16)),
            Err(PaletteError::UnknownSymbol { value: 16 })
        );
    }

    #[test]
    fn unknown_color() {
        for color in [[1, 0, 0], [128, 192, 129], [64, 64, 64]] {
            assert_eq!(color_to_symbol(color), Err(PaletteError::UnknownColor { color }));
        }
    }

    #[test]
    fn nearest_recovers_drifted_colors() {
        assert_eq!(nearest_symbol([3, 2, 1]), Symbol::Nibble(0));
        assert_eq!(nearest_symbol([250, 8, 247]), Symbol::Nibble(0xd));
        assert_eq!(nearest_symbol([120, 185, 133]), Symbol::Eof);
        assert_eq!(nearest_symbol([190, 195, 189]), Symbol::Nibble(7));
    }

    #[test]
    fn nearest_is_exact_on_palette_colors() {
        for symbol in alphabet() {
            let color = symbol_to_color(symbol).unwrap();
            assert_eq!(nearest_symbol(color), symbol);
        }
    }
}
