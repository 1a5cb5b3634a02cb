use super::span::Span;

const NEWLINE: u16 = b'\n' as u16;

/// A text encoded as UTF-16 together with the offsets where each line starts.
///
/// Lines are 1-based and split on `\n` only. A text always has at least one
/// line, so an empty text is a single empty line and a trailing newline opens
/// a final empty line. Every lookup clamps its input instead of failing.
#[derive(Debug, Clone)]
pub struct LineIndex {
    units: Vec<u16>,
    /// Offset of the first unit of every line; `starts[0] == 0`.
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        Self::from_units(text.encode_utf16().collect())
    }

    pub fn from_units(units: Vec<u16>) -> Self {
        let mut starts = vec![0];
        starts.extend(
            units
                .iter()
                .enumerate()
                .filter(|(_, unit)| **unit == NEWLINE)
                .map(|(i, _)| i + 1),
        );
        Self { units, starts }
    }

    pub fn units(&self) -> &[u16] {
        &self.units
    }

    /// Length in UTF-16 code units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// 1-based line containing `offset`. A newline belongs to the line it ends.
    pub fn offset_to_line(&self, offset: usize) -> usize {
        // starts[0] == 0, so at least one start is <= offset.
        self.starts.partition_point(|&start| start <= offset)
    }

    /// 1-based column of `offset`, clamped to `[1, line_len + 1]`.
    pub fn offset_to_column(&self, offset: usize) -> usize {
        let span = self.line_range(self.offset_to_line(offset));
        (offset.saturating_sub(span.start) + 1).clamp(1, span.len() + 1)
    }

    /// Absolute offset of a 1-based `(line, column)` pair.
    ///
    /// The line is clamped into the document and the column into the line, so
    /// the result never runs past the line's end (its newline excluded).
    pub fn cursor_to_offset(&self, line: usize, column: usize) -> usize {
        if self.is_empty() {
            return 0;
        }
        let span = self.line_range(line);
        span.start
            .saturating_add(column.saturating_sub(1))
            .min(span.end)
    }

    /// Span of a 1-based line without its trailing newline.
    pub fn line_range(&self, line: usize) -> Span {
        let index = line.clamp(1, self.line_count()) - 1;
        let start = self.starts[index];
        let end = match self.starts.get(index + 1) {
            // the unit before the next line start is this line's newline
            Some(&next) => next - 1,
            None => self.len(),
        };
        Span::new(start, end)
    }

    pub fn line_text(&self, line: usize) -> String {
        self.slice(self.line_range(line))
    }

    /// Decodes the units covered by `span`; unpaired surrogates become U+FFFD.
    pub fn slice(&self, span: Span) -> String {
        let end = span.end.min(self.len());
        let start = span.start.min(end);
        String::from_utf16_lossy(&self.units[start..end])
    }

    /// The offset a line is best identified by: its first letter or digit,
    /// else its first non-whitespace character, else the line start.
    pub fn semantic_anchor(&self, line: usize) -> usize {
        let span = self.line_range(line);
        self.chars_in(span)
            .find(|(_, ch)| ch.is_some_and(char::is_alphanumeric))
            .or_else(|| {
                self.chars_in(span)
                    .find(|(_, ch)| !ch.is_some_and(char::is_whitespace))
            })
            .map_or(span.start, |(offset, _)| offset)
    }

    /// Characters of `span` with their offsets. `None` marks an unpaired surrogate.
    fn chars_in(&self, span: Span) -> impl Iterator<Item = (usize, Option<char>)> + '_ {
        let mut offset = span.start;
        char::decode_utf16(self.units[span.start..span.end].iter().copied()).map(move |decoded| {
            let at = offset;
            match decoded {
                Ok(ch) => {
                    offset += ch.len_utf16();
                    (at, Some(ch))
                }
                Err(_) => {
                    offset += 1;
                    (at, None)
                }
            }
        })
    }
}
