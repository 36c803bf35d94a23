//! Application-level configuration constants and the runtime [`AppConfig`].

use url::Url;

use crate::error::{LoadError, PredictError};
use crate::options::BattingOptions;
use crate::PredictionKind;

// Prediction backends
pub const PERFORMANCE_API_URL: &str = "http://127.0.0.1:8000/";
pub const MATCH_API_URL: &str = "https://match-predict-backend.onrender.com/";

// Endpoint paths, relative to their API base
pub const BOWLING_ENDPOINT: &str = "predict-bowling-performance";
pub const BATTING_ENDPOINT: &str = "predict-player";
pub const WINNER_ENDPOINT: &str = "predict-match-winner";

// Static option resources, relative to the page origin
pub const TEAMS_PATH: &str = "match_prediction/teams.txt";
pub const VENUES_PATH: &str = "match_prediction/venues.txt";
pub const TOSS_DECISIONS_PATH: &str = "match_prediction/toss_decisions.txt";
pub const BOWLING_DATA_PATH: &str = "bowlersData/data.json";

// Fixed choice sets
pub const MATCH_FORMATS: [&str; 3] = ["T20", "ODI", "Test"];
pub const YES: &str = "Yes";
pub const NO: &str = "No";
pub const FIELD_DECISION: &str = "field";

/// Batting choices shipped with the binary (`field,label` rows).
pub const BATTING_OPTIONS_CSV: &str = include_str!("batting_options.csv");

// Used when the page origin cannot be read (e.g. outside a browser).
pub const FALLBACK_ORIGIN: &str = "http://127.0.0.1:8080/";

/// Everything a prediction view needs from its surroundings.
///
/// Built once at startup and handed to each view; nothing here is global.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base that static option resources are resolved against.
    pub assets_base: Url,
    /// Base of the batting/bowling backend.
    pub performance_api: Url,
    /// Base of the match-winner backend.
    pub match_api: Url,
    pub batting: BattingOptions,
}

impl AppConfig {
    /// Config with the default API bases and the embedded batting table.
    pub fn new(assets_base: Url) -> Result<Self, LoadError> {
        let performance_api = parse_base(PERFORMANCE_API_URL)?;
        let match_api = parse_base(MATCH_API_URL)?;
        let batting = BattingOptions::from_csv_str(BATTING_OPTIONS_CSV)?;
        Ok(Self {
            assets_base,
            performance_api,
            match_api,
            batting,
        })
    }

    /// Config rooted at the current page's origin.
    pub fn from_window() -> Result<Self, LoadError> {
        let origin = gloo_utils::window()
            .location()
            .origin()
            .ok()
            .filter(|o| !o.is_empty() && o != "null")
            .map(|o| format!("{}/", o.trim_end_matches('/')))
            .unwrap_or_else(|| FALLBACK_ORIGIN.to_string());
        Self::new(parse_base(&origin)?)
    }

    /// Absolute URL of the endpoint serving `kind`.
    pub fn endpoint(&self, kind: PredictionKind) -> Result<Url, PredictError> {
        let (base, path) = match kind {
            PredictionKind::Batting => (&self.performance_api, BATTING_ENDPOINT),
            PredictionKind::Bowling => (&self.performance_api, BOWLING_ENDPOINT),
            PredictionKind::Winner => (&self.match_api, WINNER_ENDPOINT),
        };
        base.join(path)
            .map_err(|e| PredictError::Endpoint(format!("{}{}: {}", base, path, e)))
    }
}

fn parse_base(raw: &str) -> Result<Url, LoadError> {
    Url::parse(raw).map_err(|e| LoadError::Location {
        path: raw.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig::new(Url::parse("http://localhost:8080/").unwrap()).unwrap()
    }

    #[test]
    fn endpoints_resolve_against_their_backend() {
        let cfg = config();
        assert_eq!(
            cfg.endpoint(PredictionKind::Bowling).unwrap().as_str(),
            "http://127.0.0.1:8000/predict-bowling-performance"
        );
        assert_eq!(
            cfg.endpoint(PredictionKind::Batting).unwrap().as_str(),
            "http://127.0.0.1:8000/predict-player"
        );
        assert_eq!(
            cfg.endpoint(PredictionKind::Winner).unwrap().as_str(),
            "https://match-predict-backend.onrender.com/predict-match-winner"
        );
    }

    #[test]
    fn embedded_batting_table_is_complete() {
        let cfg = config();
        assert!(!cfg.batting.players.is_empty());
        assert!(!cfg.batting.venues.is_empty());
        assert!(!cfg.batting.against_teams.is_empty());
        assert!(!cfg.batting.match_formats.is_empty());
    }
}
