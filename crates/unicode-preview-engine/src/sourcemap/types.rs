use std::fmt;

use serde::{Deserialize, Serialize};

/// How a mapping result was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Straight from the character aligner.
    Diff,
    /// The aligner's line, kept after line matching.
    LineAnchor,
    /// A different line picked by line matching.
    LineSimilarity,
}

impl Strategy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Strategy::Diff => "diff",
            Strategy::LineAnchor => "line-anchor",
            Strategy::LineSimilarity => "line-similarity",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1-based editor cursor position; `column` counts UTF-16 units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
}

impl Cursor {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetMapping {
    pub source_offset: usize,
    pub target_offset: usize,
    pub source_line: usize,
    pub target_line: usize,
    pub source_column: usize,
    pub target_column: usize,
    pub strategy: Strategy,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineMapping {
    pub source_line: usize,
    pub target_line: usize,
    pub strategy: Strategy,
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Strategy::Diff, "diff")]
    #[case(Strategy::LineAnchor, "line-anchor")]
    #[case(Strategy::LineSimilarity, "line-similarity")]
    fn strategy_names(#[case] strategy: Strategy, #[case] name: &str) {
        assert_eq!(strategy.to_string(), name);
        assert_eq!(
            serde_json::to_string(&strategy).unwrap(),
            format!("\"{name}\"")
        );
    }

    #[test]
    fn line_mapping_serializes_camel_case() {
        let mapping = LineMapping {
            source_line: 3,
            target_line: 5,
            strategy: Strategy::LineSimilarity,
            confidence: 0.5,
        };
        insta::assert_yaml_snapshot!(mapping, @r#"
        sourceLine: 3
        targetLine: 5
        strategy: line-similarity
        confidence: 0.5
        "#);
    }
}
