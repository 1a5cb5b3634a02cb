//! Line-level fuzzy matching between a source line and rendered lines.
//!
//! Character alignment drifts through inserted decoration such as table
//! borders, heading underlines and renumbered list markers. Whole lines
//! survive rendering much better once compared as sets of words, so line
//! queries are refined here around the line the aligner suggested.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::sourcemap::{MatchTuning, Strategy};
use crate::text::LineIndex;

/// Splits a line into case-folded, NFKC-normalized words.
///
/// Separators are runs of anything that is neither a letter nor a digit, so
/// box-drawing, list markers and punctuation never become tokens.
pub fn tokenize(line: &str) -> Vec<String> {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    let separator =
        SEPARATOR.get_or_init(|| Regex::new(r"[^\p{L}\p{N}]+").expect("Invalid separator regex"));

    let folded = line.nfkc().collect::<String>().to_lowercase();
    separator
        .split(&folded)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Jaccard similarity of the two lines' token sets, in `[0, 1]`.
///
/// Lines whose joined tokens contain one another get a bonus, provided the
/// shorter side is long enough to be meaningful.
pub fn line_similarity(source: &str, target: &str, tuning: &MatchTuning) -> f64 {
    let source = source.trim();
    let target = target.trim();

    match (source.is_empty(), target.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        (false, false) if source == target => return 1.0,
        _ => {}
    }

    let source_tokens = tokenize(source);
    let target_tokens = tokenize(target);
    if source_tokens.is_empty() || target_tokens.is_empty() {
        return 0.0;
    }

    let source_set: HashSet<&str> = source_tokens.iter().map(String::as_str).collect();
    let target_set: HashSet<&str> = target_tokens.iter().map(String::as_str).collect();
    let intersection = source_set.intersection(&target_set).count();
    let union = source_set.len() + target_set.len() - intersection;
    if union == 0 {
        return 0.0;
    }

    let mut score = intersection as f64 / union as f64;

    let source_joined = source_tokens.join(" ");
    let target_joined = target_tokens.join(" ");
    let (shorter, longer) = if source_joined.len() <= target_joined.len() {
        (&source_joined, &target_joined)
    } else {
        (&target_joined, &source_joined)
    };
    if shorter.chars().count() >= tuning.substring_min_len && longer.contains(shorter.as_str()) {
        score += tuning.substring_bonus;
    }

    score.clamp(0.0, 1.0)
}

/// The matcher's answer for one source line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineChoice {
    pub target_line: usize,
    pub strategy: Strategy,
    pub confidence: f64,
}

/// Searches the target lines around `base_line` for the best match of
/// `source_line_text`.
///
/// Each candidate scores its similarity minus a small penalty that grows with
/// the distance from `base_line`, so near matches win ties. A best similarity
/// under the tuning threshold means nothing matched and `base_line` is kept.
pub fn choose_best_target_line(
    source_line_text: &str,
    base_line: usize,
    target: &LineIndex,
    tuning: &MatchTuning,
) -> LineChoice {
    let line_count = target.line_count();
    let base_line = base_line.clamp(1, line_count);

    if source_line_text.trim().is_empty() {
        return LineChoice {
            target_line: base_line,
            strategy: Strategy::LineAnchor,
            confidence: tuning.blank_line_confidence,
        };
    }

    let window_start = base_line.saturating_sub(tuning.window_before).max(1);
    let window_end = base_line.saturating_add(tuning.window_after).min(line_count);

    let mut best_line = base_line;
    let mut best_score = f64::NEG_INFINITY;
    let mut best_similarity = 0.0;

    for line in window_start..=window_end {
        let candidate = target.line_text(line);
        let similarity = line_similarity(source_line_text, &candidate, tuning);
        if similarity == 0.0 {
            continue;
        }

        let penalty = line.abs_diff(base_line) as f64 / tuning.distance_penalty;
        let score = similarity - penalty;
        if score > best_score {
            best_score = score;
            best_similarity = similarity;
            best_line = line;
        }
    }

    let choice = if best_similarity < tuning.min_similarity {
        LineChoice {
            target_line: base_line,
            strategy: Strategy::LineAnchor,
            confidence: tuning.no_match_confidence,
        }
    } else if best_line == base_line {
        LineChoice {
            target_line: base_line,
            strategy: Strategy::LineAnchor,
            confidence: best_similarity,
        }
    } else {
        LineChoice {
            target_line: best_line,
            strategy: Strategy::LineSimilarity,
            confidence: best_similarity,
        }
    };

    log::trace!(
        "line match {:?}: base {base_line}, window {window_start}..={window_end}, chose {} ({}, {:.2})",
        source_line_text,
        choice.target_line,
        choice.strategy,
        choice.confidence
    );
    choice
}
