use super::{Aligner, EditTable};
use crate::text::normalize::{NormalizedText, normalize};

/// Character-level aligner over style-normalized text.
///
/// Both texts are normalized once on construction. The edit-distance table is
/// built on the first query and reused for every later one.
#[derive(Debug)]
pub struct TextDiffAligner {
    source: NormalizedText,
    target: NormalizedText,
    table: Option<EditTable>,
}

impl TextDiffAligner {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: normalize(source),
            target: normalize(target),
            table: None,
        }
    }

    /// Whether a query has built the edit table yet.
    pub fn has_table(&self) -> bool {
        self.table.is_some()
    }

    pub fn source(&self) -> &NormalizedText {
        &self.source
    }

    pub fn target(&self) -> &NormalizedText {
        &self.target
    }
}

impl Aligner for TextDiffAligner {
    fn align(&mut self, source_offset: usize) -> usize {
        let normalized_pos = self
            .source
            .to_normalized
            .get(source_offset)
            .copied()
            .unwrap_or(self.source.len());

        let target_pos = if normalized_pos >= self.source.len() {
            self.target.len()
        } else {
            let (source, target) = (&self.source.units, &self.target.units);
            self.table
                .get_or_insert_with(|| EditTable::build(source, target))
                .project(source, target, normalized_pos)
        };

        self.target
            .to_original
            .get(target_pos)
            .copied()
            .unwrap_or(self.target.original_len())
    }
}
