//! The mapping engine's public face.
//!
//! A [`Mapper`] is built once per (source, rendered) pair and answers offset,
//! cursor and line queries against it. Offsets and columns are UTF-16 code
//! units, lines and columns are 1-based, and every input is clamped into the
//! document rather than rejected.

use std::collections::HashMap;

use crate::align::{Aligner, TextDiffAligner};
use crate::similarity::choose_best_target_line;
use crate::text::LineIndex;

pub mod export;
pub mod tuning;
pub mod types;

pub use export::{Point, Range, SourcemapData, SourcemapSegment, resolve_preview_line};
pub use tuning::MatchTuning;
pub use types::{Cursor, LineMapping, OffsetMapping, Strategy};

/// Builds a mapper over the character diff aligner with default tuning.
pub fn create_mapping(source: &str, target: &str) -> Mapper {
    create_mapping_with(source, target, MatchTuning::default())
}

pub fn create_mapping_with(source: &str, target: &str, tuning: MatchTuning) -> Mapper {
    Mapper::with_aligner(source, target, TextDiffAligner::new(source, target), tuning)
}

/// Maps positions in a source text to positions in its rendering.
///
/// Line answers are memoized per source line for the mapper's lifetime, and
/// the aligner keeps whatever it builds on the first query.
#[derive(Debug)]
pub struct Mapper<A = TextDiffAligner> {
    source: LineIndex,
    target: LineIndex,
    aligner: A,
    tuning: MatchTuning,
    line_cache: HashMap<usize, LineMapping>,
}

impl<A: Aligner> Mapper<A> {
    pub fn with_aligner(source: &str, target: &str, aligner: A, tuning: MatchTuning) -> Self {
        let source = LineIndex::new(source);
        let target = LineIndex::new(target);
        log::debug!(
            "new mapping: source {} units / {} lines, target {} units / {} lines",
            source.len(),
            source.line_count(),
            target.len(),
            target.line_count()
        );
        Self {
            source,
            target,
            aligner,
            tuning: tuning.clamped(),
            line_cache: HashMap::new(),
        }
    }

    pub fn source(&self) -> &LineIndex {
        &self.source
    }

    pub fn target(&self) -> &LineIndex {
        &self.target
    }

    pub fn aligner(&self) -> &A {
        &self.aligner
    }

    pub fn tuning(&self) -> &MatchTuning {
        &self.tuning
    }

    /// Character-level mapping of a source offset. Negative offsets count as 0
    /// and offsets past the end as the end.
    pub fn map_offset(&mut self, offset: isize) -> OffsetMapping {
        let source_offset = usize::try_from(offset).unwrap_or(0).min(self.source.len());
        self.project(source_offset)
    }

    /// Maps an editor cursor.
    ///
    /// A cursor inside a line is mapped character by character. A cursor at
    /// the start of a line (column 1 or less) means "this line", so it lands
    /// at the start of the matched target line instead; the source fields
    /// still describe the cursor itself.
    pub fn map_cursor(&mut self, cursor: Cursor) -> OffsetMapping {
        let source_offset = self.source.cursor_to_offset(cursor.line, cursor.column);
        let by_offset = self.project(source_offset);
        if cursor.column > 1 {
            return by_offset;
        }

        let line = self.map_line(cursor.line);
        let target_offset = self.target.line_range(line.target_line).start;
        OffsetMapping {
            target_offset,
            target_line: line.target_line,
            target_column: self.target.offset_to_column(target_offset),
            strategy: line.strategy,
            confidence: line.confidence,
            ..by_offset
        }
    }

    /// Finds the target line showing a source line.
    ///
    /// The aligner projects the line's first letter or digit to get a base
    /// line, which line matching may then move within a window around it.
    pub fn map_line(&mut self, line: usize) -> LineMapping {
        let source_line = line.clamp(1, self.source.line_count());
        if let Some(cached) = self.line_cache.get(&source_line) {
            return *cached;
        }

        let anchor = self.source.semantic_anchor(source_line);
        let base_line = self.project(anchor).target_line;
        let text = self.source.line_text(source_line);
        let choice = choose_best_target_line(&text, base_line, &self.target, &self.tuning);

        let mapping = LineMapping {
            source_line,
            target_line: choice.target_line,
            strategy: choice.strategy,
            confidence: choice.confidence,
        };
        self.line_cache.insert(source_line, mapping);
        mapping
    }

    /// Target line of every source line, forced to never go backwards.
    pub fn map_lines(&mut self) -> Vec<usize> {
        let mut floor = 1;
        (1..=self.source.line_count())
            .map(|line| {
                floor = floor.max(self.map_line(line).target_line);
                floor
            })
            .collect()
    }

    /// The line table as a sourcemap with one `line` segment per source line.
    pub fn sourcemap(&mut self) -> SourcemapData {
        let table = self.map_lines();
        SourcemapData::from_line_table(&table, &self.source, &self.target)
    }

    fn project(&mut self, source_offset: usize) -> OffsetMapping {
        let target_offset = self.aligner.align(source_offset).min(self.target.len());
        OffsetMapping {
            source_offset,
            target_offset,
            source_line: self.source.offset_to_line(source_offset),
            target_line: self.target.offset_to_line(target_offset),
            source_column: self.source.offset_to_column(source_offset),
            target_column: self.target.offset_to_column(target_offset),
            strategy: Strategy::Diff,
            confidence: self.tuning.diff_confidence,
        }
    }
}
