pub mod lines;
pub mod normalize;
pub mod span;

pub use lines::LineIndex;
pub use normalize::{NormalizedText, TextStyle, normalize, stylize};
pub use span::Span;
