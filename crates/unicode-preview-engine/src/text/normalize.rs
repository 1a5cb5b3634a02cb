//! Reversal of presentation-only Unicode styling.
//!
//! Renderers express emphasis by swapping letters for their look-alikes in
//! the Mathematical Alphanumeric Symbols block and by decorating characters
//! with combining strike-through or underline marks. Before two texts can be
//! aligned character by character, both are folded back to plain characters
//! here, keeping index maps in both directions so positions found in the
//! folded text can be reported in the caller's coordinates.

const COMBINING_STRIKE: u32 = 0x0336;
const COMBINING_UNDERLINE: u32 = 0x0332;

/// `(first, last, plain)`: code points `first..=last` fold to `plain` onwards.
const STYLED_RANGES: [(u32, u32, char); 10] = [
    // sans-serif bold
    (0x1D5D4, 0x1D5ED, 'A'),
    (0x1D5EE, 0x1D607, 'a'),
    (0x1D7EC, 0x1D7F5, '0'),
    // sans-serif italic
    (0x1D608, 0x1D621, 'A'),
    (0x1D622, 0x1D63B, 'a'),
    // sans-serif bold italic
    (0x1D63C, 0x1D655, 'A'),
    (0x1D656, 0x1D66F, 'a'),
    // monospace
    (0x1D670, 0x1D689, 'A'),
    (0x1D68A, 0x1D6A3, 'a'),
    (0x1D7F6, 0x1D7FF, '0'),
];

/// A text with styling folded away, plus index maps back to the original.
///
/// All indices are UTF-16 code units. Both maps are non-decreasing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText {
    pub units: Vec<u16>,
    /// `to_original[k]`: original index that produced normalized unit `k`.
    pub to_original: Vec<usize>,
    /// `to_normalized[k]`: normalized index original unit `k` collapsed into.
    pub to_normalized: Vec<usize>,
}

impl NormalizedText {
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn original_len(&self) -> usize {
        self.to_normalized.len()
    }

    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.units)
    }
}

/// What a single code point becomes after folding.
enum Folded {
    /// A decoration mark that attaches to the preceding character.
    Dropped,
    Char(char),
}

fn fold(ch: char) -> Folded {
    let code = u32::from(ch);
    if code == COMBINING_STRIKE || code == COMBINING_UNDERLINE {
        return Folded::Dropped;
    }
    STYLED_RANGES
        .iter()
        .find(|(first, last, _)| (*first..=*last).contains(&code))
        .and_then(|(first, _, plain)| char::from_u32(u32::from(*plain) + (code - first)))
        .map_or(Folded::Char(ch), Folded::Char)
}

/// Folds styled letters and digits to ASCII and drops decoration marks.
///
/// Total over all input: code points outside the known styled ranges pass
/// through unchanged, and every unit of a surrogate pair maps to the same
/// normalized index.
pub fn normalize(text: &str) -> NormalizedText {
    let mut out = NormalizedText {
        units: Vec::with_capacity(text.len()),
        to_original: Vec::with_capacity(text.len()),
        to_normalized: Vec::with_capacity(text.len()),
    };

    let mut original = 0;
    let mut buf = [0u16; 2];
    for ch in text.chars() {
        let width = ch.len_utf16();
        match fold(ch) {
            Folded::Dropped => {
                let decorated = out.units.len().saturating_sub(1);
                out.to_normalized.extend(std::iter::repeat_n(decorated, width));
            }
            Folded::Char(plain) => {
                let at = out.units.len();
                let encoded = plain.encode_utf16(&mut buf);
                out.units.extend_from_slice(encoded);
                out.to_original.extend(std::iter::repeat_n(original, encoded.len()));
                out.to_normalized.extend(std::iter::repeat_n(at, width));
            }
        }
        original += width;
    }

    out
}

/// Emphasis styles a renderer may apply with mathematical alphanumerics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Plain,
    Bold,
    Italic,
    BoldItalic,
    Monospace,
}

impl TextStyle {
    /// First code points of the styled capitals, lower-case letters and digits.
    fn bases(self) -> Option<(u32, u32, Option<u32>)> {
        match self {
            TextStyle::Plain => None,
            TextStyle::Bold => Some((0x1D5D4, 0x1D5EE, Some(0x1D7EC))),
            TextStyle::Italic => Some((0x1D608, 0x1D622, None)),
            TextStyle::BoldItalic => Some((0x1D63C, 0x1D656, None)),
            TextStyle::Monospace => Some((0x1D670, 0x1D68A, Some(0x1D7F6))),
        }
    }
}

/// Applies `style` to ASCII letters (and digits, where the style has them),
/// the inverse of [`normalize`]. Anything else is copied unchanged.
pub fn stylize(text: &str, style: TextStyle) -> String {
    let Some((upper, lower, digits)) = style.bases() else {
        return text.to_string();
    };
    text.chars()
        .map(|ch| {
            let code = u32::from(ch);
            let styled = match ch {
                'A'..='Z' => Some(upper + (code - u32::from('A'))),
                'a'..='z' => Some(lower + (code - u32::from('a'))),
                '0'..='9' => digits.map(|base| base + (code - u32::from('0'))),
                _ => None,
            };
            styled.and_then(char::from_u32).unwrap_or(ch)
        })
        .collect()
}
