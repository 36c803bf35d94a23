//! Bowling performance prediction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::LoadError;
use crate::options::{BowlingOptions, OptionsLoader};
use crate::results::{Emphasis, Insight, ResultRow, Stat, PERFORMANCE_STATS};
use crate::transport::Transport;
use crate::{Field, Prediction, PredictionKind};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BowlingSelection {
    pub bowler: String,
    pub opponent: String,
    pub match_type: String,
}

/// Body of `POST /predict-bowling-performance`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BowlingRequest {
    pub bowler: String,
    pub opponent: String,
    #[serde(rename = "matchType")]
    pub match_type: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BowlingResponse {
    pub bowler: String,
    pub opponent: String,
    pub match_type: String,
    pub overs_bowled: Stat,
    pub runs_conceded: Stat,
    pub economy_rate: Stat,
    pub wickets_taken: Stat,
}

pub struct BowlingForecast;

#[async_trait(?Send)]
impl Prediction for BowlingForecast {
    const KIND: PredictionKind = PredictionKind::Bowling;
    const SUPPORTS_RESET: bool = true;
    const SUBMIT_LABEL: &'static str = "PREDICT PERFORMANCE";

    type Options = BowlingOptions;
    type Selection = BowlingSelection;
    type Request = BowlingRequest;
    type Response = BowlingResponse;

    async fn load_options<T: Transport>(
        loader: &OptionsLoader<T>,
        _config: &AppConfig,
    ) -> Result<BowlingOptions, LoadError> {
        loader.load_bowling_options().await
    }

    fn default_selection(options: &BowlingOptions) -> BowlingSelection {
        let first = |list: &[String]| list.first().cloned().unwrap_or_default();
        BowlingSelection {
            bowler: first(&options.bowlers),
            opponent: first(&options.teams),
            match_type: first(&options.match_formats),
        }
    }

    fn fields(options: &BowlingOptions, selection: &BowlingSelection) -> Vec<Field> {
        vec![
            Field {
                key: "bowler",
                label: "Bowler",
                placeholder: "Select Bowler",
                choices: options.bowlers.clone(),
                value: selection.bowler.clone(),
            },
            Field {
                key: "opponent",
                label: "Opposition",
                placeholder: "Select Opposition",
                choices: options.teams.clone(),
                value: selection.opponent.clone(),
            },
            Field {
                key: "match_type",
                label: "Match Format",
                placeholder: "Select Match Format",
                choices: options.match_formats.clone(),
                value: selection.match_type.clone(),
            },
        ]
    }

    fn set_field(selection: &mut BowlingSelection, key: &str, value: String) {
        match key {
            "bowler" => selection.bowler = value,
            "opponent" => selection.opponent = value,
            "match_type" => selection.match_type = value,
            _ => {}
        }
    }

    fn to_request(selection: &BowlingSelection) -> BowlingRequest {
        BowlingRequest {
            bowler: selection.bowler.clone(),
            opponent: selection.opponent.clone(),
            match_type: selection.match_type.clone(),
        }
    }

    fn result_rows(_selection: &BowlingSelection, response: &BowlingResponse) -> Vec<ResultRow> {
        vec![
            ResultRow::new("Bowler", &response.bowler, Emphasis::Headline),
            ResultRow::new("Opponent", &response.opponent, Emphasis::Context),
            ResultRow::new("Match Type", &response.match_type, Emphasis::Context),
            ResultRow::new("Overs Bowled", &response.overs_bowled, Emphasis::Figure),
            ResultRow::new("Runs Conceded", &response.runs_conceded, Emphasis::Figure),
            ResultRow::new("Economy Rate", &response.economy_rate, Emphasis::Figure),
            ResultRow::new("Wickets Taken", &response.wickets_taken, Emphasis::Figure),
        ]
    }

    fn insight() -> Insight {
        Insight {
            title: "PERFORMANCE INSIGHTS",
            blurb: "Our AI analyzes historical data to predict how a bowler will perform in specific match conditions.",
            stats: PERFORMANCE_STATS,
        }
    }
}
