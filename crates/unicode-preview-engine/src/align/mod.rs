//! Source-to-target offset projection.
//!
//! An [`Aligner`] answers one question: given an offset in the source text,
//! where does the same content sit in the rendered text? Two strategies exist
//! and a mapper is built around exactly one of them:
//!
//! - [`TextDiffAligner`] diffs the style-normalized characters of both texts.
//!   It needs nothing but the two strings.
//! - [`StructuralLcsAligner`] matches parser-provided block nodes by their
//!   text signatures and projects offsets through matched node spans.

pub mod edit_distance;
pub mod markdown;
pub mod structural;
pub mod text_diff;

pub use edit_distance::{EditDistanceCache, EditTable};
pub use markdown::markdown_nodes;
pub use structural::{NodeRecord, Segment, StructuralLcsAligner, lcs_match};
pub use text_diff::TextDiffAligner;

/// Projects source offsets into a target text. Offsets are UTF-16 code units.
pub trait Aligner {
    /// Maps `source_offset` (already clamped to `[0, source_len]`) to a target
    /// offset in `[0, target_len]`.
    fn align(&mut self, source_offset: usize) -> usize;
}
