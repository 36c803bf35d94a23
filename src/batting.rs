//! Batting (run) prediction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::LoadError;
use crate::options::{BattingOptions, OptionsLoader};
use crate::results::{Emphasis, Insight, ResultRow, Stat, PERFORMANCE_STATS};
use crate::transport::Transport;
use crate::{Field, Prediction, PredictionKind};

/// Field names double as the request body keys.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BattingSelection {
    pub player_name: String,
    pub venue: String,
    pub against_team: String,
    pub match_format: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BattingResponse {
    pub predicted_score: Stat,
    pub predicted_dismissal: Stat,
}

pub struct BattingForecast;

#[async_trait(?Send)]
impl Prediction for BattingForecast {
    const KIND: PredictionKind = PredictionKind::Batting;
    const SUPPORTS_RESET: bool = true;
    const SUBMIT_LABEL: &'static str = "PREDICT PERFORMANCE";

    type Options = BattingOptions;
    type Selection = BattingSelection;
    type Request = BattingSelection;
    type Response = BattingResponse;

    async fn load_options<T: Transport>(
        _loader: &OptionsLoader<T>,
        config: &AppConfig,
    ) -> Result<BattingOptions, LoadError> {
        Ok(config.batting.clone())
    }

    fn default_selection(options: &BattingOptions) -> BattingSelection {
        let first = |list: &[String]| list.first().cloned().unwrap_or_default();
        BattingSelection {
            player_name: first(&options.players),
            venue: first(&options.venues),
            against_team: first(&options.against_teams),
            match_format: first(&options.match_formats),
        }
    }

    fn fields(options: &BattingOptions, selection: &BattingSelection) -> Vec<Field> {
        vec![
            Field {
                key: "player_name",
                label: "Player",
                placeholder: "Select Player",
                choices: options.players.clone(),
                value: selection.player_name.clone(),
            },
            Field {
                key: "venue",
                label: "Venue",
                placeholder: "Select Venue",
                choices: options.venues.clone(),
                value: selection.venue.clone(),
            },
            Field {
                key: "against_team",
                label: "Opposition",
                placeholder: "Select Opposition",
                choices: options.against_teams.clone(),
                value: selection.against_team.clone(),
            },
            Field {
                key: "match_format",
                label: "Match Format",
                placeholder: "Select Match Format",
                choices: options.match_formats.clone(),
                value: selection.match_format.clone(),
            },
        ]
    }

    fn set_field(selection: &mut BattingSelection, key: &str, value: String) {
        match key {
            "player_name" => selection.player_name = value,
            "venue" => selection.venue = value,
            "against_team" => selection.against_team = value,
            "match_format" => selection.match_format = value,
            _ => {}
        }
    }

    fn to_request(selection: &BattingSelection) -> BattingSelection {
        selection.clone()
    }

    /// Context rows come from the selection that was submitted, not the
    /// form's live values.
    fn result_rows(selection: &BattingSelection, response: &BattingResponse) -> Vec<ResultRow> {
        vec![
            ResultRow::new("Player", &selection.player_name, Emphasis::Headline),
            ResultRow::new("Venue", &selection.venue, Emphasis::Context),
            ResultRow::new("Opposition", &selection.against_team, Emphasis::Context),
            ResultRow::new("Predicted Score", &response.predicted_score, Emphasis::Figure),
            ResultRow::new("Dismissal", &response.predicted_dismissal, Emphasis::Figure),
        ]
    }

    fn insight() -> Insight {
        Insight {
            title: "PERFORMANCE INSIGHTS",
            blurb: "Our AI analyzes historical data to predict how a player will perform in specific match conditions.",
            stats: PERFORMANCE_STATS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::decode_response;

    #[test]
    fn request_body_mirrors_selection() {
        let sel = BattingSelection {
            player_name: "Virat Kohli".into(),
            venue: "Eden Gardens".into(),
            against_team: "England".into(),
            match_format: "ODI".into(),
        };
        let body = serde_json::to_value(BattingForecast::to_request(&sel)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "player_name": "Virat Kohli",
                "venue": "Eden Gardens",
                "against_team": "England",
                "match_format": "ODI"
            })
        );
    }

    #[test]
    fn rows_combine_selection_and_prediction() {
        let sel = BattingSelection {
            player_name: "Virat Kohli".into(),
            venue: "Eden Gardens".into(),
            against_team: "England".into(),
            match_format: "ODI".into(),
        };
        let resp = decode_response::<BattingForecast>(
            r#"{"predicted_score": 57, "predicted_dismissal": "caught"}"#,
        )
        .unwrap();
        let rows = BattingForecast::result_rows(&sel, &resp);
        assert_eq!(rows[0].value, "Virat Kohli");
        assert_eq!(rows[3].value, "57");
        assert_eq!(rows[4].value, "caught");
    }
}
