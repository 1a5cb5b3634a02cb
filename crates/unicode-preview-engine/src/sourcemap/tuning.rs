use serde::{Deserialize, Serialize};

/// Thresholds and weights for line matching and reported confidences.
///
/// Missing fields deserialize to their defaults, so a config file only needs
/// to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchTuning {
    /// Target lines searched before the aligner's line.
    pub window_before: usize,
    /// Target lines searched after the aligner's line.
    pub window_after: usize,
    /// One unit of score is lost per this many lines of distance.
    pub distance_penalty: f64,
    /// Best similarity below this keeps the aligner's line.
    pub min_similarity: f64,
    pub substring_bonus: f64,
    /// Shortest joined token text that earns the substring bonus.
    pub substring_min_len: usize,
    pub blank_line_confidence: f64,
    pub no_match_confidence: f64,
    pub diff_confidence: f64,
}

impl Default for MatchTuning {
    fn default() -> Self {
        Self {
            window_before: 80,
            window_after: 120,
            distance_penalty: 220.0,
            min_similarity: 0.17,
            substring_bonus: 0.25,
            substring_min_len: 4,
            blank_line_confidence: 0.5,
            no_match_confidence: 0.35,
            diff_confidence: 0.25,
        }
    }
}

impl MatchTuning {
    /// Names of fields holding values the matcher cannot use.
    ///
    /// Weights and confidences must lie in `[0, 1]` and the distance penalty
    /// must be at least 1.
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        let unit = |value: f64| (0.0..=1.0).contains(&value);
        let mut invalid = Vec::new();
        if !(self.distance_penalty.is_finite() && self.distance_penalty >= 1.0) {
            invalid.push("distance_penalty");
        }
        for (name, value) in [
            ("min_similarity", self.min_similarity),
            ("substring_bonus", self.substring_bonus),
            ("blank_line_confidence", self.blank_line_confidence),
            ("no_match_confidence", self.no_match_confidence),
            ("diff_confidence", self.diff_confidence),
        ] {
            if !unit(value) {
                invalid.push(name);
            }
        }
        invalid
    }

    /// Pulls every value into its usable range; NaN falls back to the default.
    pub fn clamped(self) -> Self {
        let defaults = Self::default();
        let unit = |value: f64, default: f64| {
            if value.is_nan() {
                default
            } else {
                value.clamp(0.0, 1.0)
            }
        };
        Self {
            distance_penalty: if self.distance_penalty.is_nan() {
                defaults.distance_penalty
            } else {
                self.distance_penalty.max(1.0)
            },
            min_similarity: unit(self.min_similarity, defaults.min_similarity),
            substring_bonus: unit(self.substring_bonus, defaults.substring_bonus),
            blank_line_confidence: unit(self.blank_line_confidence, defaults.blank_line_confidence),
            no_match_confidence: unit(self.no_match_confidence, defaults.no_match_confidence),
            diff_confidence: unit(self.diff_confidence, defaults.diff_confidence),
            ..self
        }
    }
}
