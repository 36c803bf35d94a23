//! Display data for the result panel.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A statistic as returned by the backend, kept verbatim for display.
///
/// Numbers keep their JSON text (`9.4` stays `9.4`, `42` stays `42`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Stat {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stat::Number(n) => write!(f, "{}", n),
            Stat::Text(s) => f.write_str(s),
        }
    }
}

/// How prominently a row is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// Heading-sized value (the subject of the prediction).
    Headline,
    /// Context the prediction was made for.
    Context,
    /// A predicted figure.
    Figure,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub label: &'static str,
    pub value: String,
    pub emphasis: Emphasis,
}

impl ResultRow {
    pub fn new(label: &'static str, value: impl fmt::Display, emphasis: Emphasis) -> Self {
        Self {
            label,
            value: value.to_string(),
            emphasis,
        }
    }
}

/// Informational panel shown before any prediction exists. The figures are
/// fixed marketing copy, not derived from data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Insight {
    pub title: &'static str,
    pub blurb: &'static str,
    pub stats: &'static [(&'static str, &'static str)],
}

pub const PERFORMANCE_STATS: &[(&str, &str)] = &[("Accuracy", "92%"), ("Data Points", "10M+")];

/// Render a win probability fraction as a one-decimal percentage. Ties
/// round up (`0.0625` is `6.3%`).
pub fn format_win_probability(probability: f64) -> String {
    let tenths = (probability * 1000.0).round() / 10.0;
    format!("{:.1}%", tenths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probability_rounds_to_one_decimal() {
        assert_eq!(format_win_probability(0.6789), "67.9%");
        assert_eq!(format_win_probability(1.0), "100.0%");
        assert_eq!(format_win_probability(0.0), "0.0%");
        assert_eq!(format_win_probability(0.5), "50.0%");
    }

    #[test]
    fn probability_ties_round_up() {
        assert_eq!(format_win_probability(0.0625), "6.3%");
        assert_eq!(format_win_probability(0.3125), "31.3%");
        assert_eq!(format_win_probability(0.5625), "56.3%");
        assert_eq!(format_win_probability(0.8125), "81.3%");
    }

    #[test]
    fn stats_display_verbatim() {
        let overs: Stat = serde_json::from_str("9.4").unwrap();
        let runs: Stat = serde_json::from_str("42").unwrap();
        let text: Stat = serde_json::from_str(r#""caught""#).unwrap();
        assert_eq!(overs.to_string(), "9.4");
        assert_eq!(runs.to_string(), "42");
        assert_eq!(text.to_string(), "caught");
    }
}
