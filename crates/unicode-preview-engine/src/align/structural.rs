//! Alignment through matched document nodes.
//!
//! Both texts are described as flat lists of nodes, each carrying a kind, a
//! text signature and a span. The longest common subsequence of the two
//! signature lists pairs nodes that survived rendering; offsets inside a
//! paired source node land at the same relative position in its partner.

use super::Aligner;
use super::markdown::markdown_nodes;
use crate::sourcemap::export::{Range, SourcemapData, SourcemapSegment};
use crate::text::{LineIndex, Span};

/// One parsed node as seen by the aligner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    pub kind: String,
    /// `"<kind>:<text>"` with the text lower-cased and whitespace collapsed.
    pub signature: String,
    pub span: Span,
}

impl NodeRecord {
    pub fn new(kind: impl Into<String>, text: &str, span: Span) -> Self {
        let kind = kind.into();
        let collapsed = text
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            signature: format!("{kind}:{collapsed}"),
            kind,
            span,
        }
    }
}

/// A matched pair of node spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub node_type: String,
    pub input: Span,
    pub output: Span,
}

/// Longest common subsequence of the two signature lists.
///
/// Returns `(source_index, target_index)` pairs in document order. When the
/// back-trace has a choice it steps back through the target list first.
pub fn lcs_match(source: &[NodeRecord], target: &[NodeRecord]) -> Vec<(usize, usize)> {
    let rows = target.len() + 1;
    let cols = source.len() + 1;
    let mut table = vec![0u32; rows * cols];

    for i in 1..rows {
        for j in 1..cols {
            table[i * cols + j] = if target[i - 1].signature == source[j - 1].signature {
                table[(i - 1) * cols + j - 1] + 1
            } else {
                table[(i - 1) * cols + j].max(table[i * cols + j - 1])
            };
        }
    }

    let mut pairs = Vec::new();
    let (mut i, mut j) = (target.len(), source.len());
    while i > 0 && j > 0 {
        if target[i - 1].signature == source[j - 1].signature {
            pairs.push((j - 1, i - 1));
            i -= 1;
            j -= 1;
        } else if table[(i - 1) * cols + j] >= table[i * cols + j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    pairs.reverse();
    pairs
}

/// Aligner over node spans matched by [`lcs_match`].
#[derive(Debug, Clone)]
pub struct StructuralLcsAligner {
    segments: Vec<Segment>,
    target_len: usize,
}

impl StructuralLcsAligner {
    pub fn new(source_nodes: &[NodeRecord], target_nodes: &[NodeRecord], target_len: usize) -> Self {
        let segments: Vec<Segment> = lcs_match(source_nodes, target_nodes)
            .into_iter()
            .map(|(s, t)| Segment {
                node_type: source_nodes[s].kind.clone(),
                input: source_nodes[s].span,
                output: target_nodes[t].span,
            })
            .collect();
        log::debug!(
            "matched {} of {} source nodes against {} target nodes",
            segments.len(),
            source_nodes.len(),
            target_nodes.len()
        );
        Self {
            segments,
            target_len,
        }
    }

    /// Parses both texts as Markdown and matches their block nodes.
    pub fn from_markdown(source: &str, target: &str) -> Self {
        let target_len = target.encode_utf16().count();
        Self::new(&markdown_nodes(source), &markdown_nodes(target), target_len)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Matched node segments as a sourcemap, positions resolved against the
    /// line tables of the two texts.
    pub fn sourcemap(&self, source: &LineIndex, target: &LineIndex) -> SourcemapData {
        SourcemapData::new(
            self.segments
                .iter()
                .map(|segment| SourcemapSegment {
                    node_type: segment.node_type.clone(),
                    output: Range::of(target, segment.output),
                    input: Range::of(source, segment.input),
                })
                .collect(),
        )
    }
}

impl Aligner for StructuralLcsAligner {
    fn align(&mut self, source_offset: usize) -> usize {
        let innermost = self
            .segments
            .iter()
            .filter(|segment| segment.input.contains(source_offset))
            .min_by_key(|segment| segment.input.len());

        let projected = match innermost {
            Some(segment) => {
                let delta = source_offset - segment.input.start;
                segment.output.start + delta.min(segment.output.len())
            }
            None => self
                .segments
                .iter()
                .filter(|segment| segment.input.end <= source_offset)
                .max_by_key(|segment| (segment.input.end, segment.input.len()))
                .map_or(0, |segment| segment.output.end),
        };

        projected.min(self.target_len)
    }
}
