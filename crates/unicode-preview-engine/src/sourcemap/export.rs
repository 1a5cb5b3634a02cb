//! Serializable sourcemap documents.
//!
//! A sourcemap is a list of segments, each pairing a range of the source text
//! with the range it was rendered to. Preview panes use it to scroll to the
//! rendered line of whatever the editor cursor is on.

use serde::{Deserialize, Serialize};

use crate::text::{LineIndex, Span};

/// A position in a text: 1-based line and column, 0-based UTF-16 offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Point {
    pub fn at(index: &LineIndex, offset: usize) -> Self {
        let offset = offset.min(index.len());
        Self {
            line: index.offset_to_line(offset),
            column: index.offset_to_column(offset),
            offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Point,
    pub end: Point,
}

impl Range {
    pub fn of(index: &LineIndex, span: Span) -> Self {
        Self {
            start: Point::at(index, span.start),
            end: Point::at(index, span.end.max(span.start)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcemapSegment {
    pub node_type: String,
    pub output: Range,
    pub input: Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcemapData {
    pub version: u32,
    pub segments: Vec<SourcemapSegment>,
}

impl SourcemapData {
    pub const VERSION: u32 = 2;

    pub fn new(segments: Vec<SourcemapSegment>) -> Self {
        Self {
            version: Self::VERSION,
            segments,
        }
    }

    /// One `line` segment per source line, from a table of 1-based target
    /// lines indexed by source line minus one.
    pub fn from_line_table(table: &[usize], source: &LineIndex, target: &LineIndex) -> Self {
        let segments = table
            .iter()
            .enumerate()
            .map(|(i, &target_line)| SourcemapSegment {
                node_type: "line".to_string(),
                output: Range::of(target, target.line_range(target_line)),
                input: Range::of(source, source.line_range(i + 1)),
            })
            .collect();
        Self::new(segments)
    }
}

/// Rendered line for a 1-based source line.
///
/// The first segment whose input lines cover `source_line` decides; with no
/// such segment the source line is returned unchanged.
pub fn resolve_preview_line(data: &SourcemapData, source_line: usize) -> usize {
    data.segments
        .iter()
        .find(|segment| {
            (segment.input.start.line..=segment.input.end.line).contains(&source_line)
        })
        .map_or(source_line, |segment| segment.output.start.line)
}
