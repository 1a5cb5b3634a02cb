pub mod align;
pub mod similarity;
pub mod sourcemap;
pub mod text;

// Re-export key types for easier usage
pub use align::{Aligner, NodeRecord, StructuralLcsAligner, TextDiffAligner};
pub use sourcemap::{
    Cursor, LineMapping, MatchTuning, Mapper, OffsetMapping, SourcemapData, Strategy,
    create_mapping, create_mapping_with, resolve_preview_line,
};
pub use text::{LineIndex, Span, TextStyle, stylize};
