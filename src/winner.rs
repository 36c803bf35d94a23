//! Match-winner prediction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{AppConfig, FIELD_DECISION, NO, YES};
use crate::error::LoadError;
use crate::options::{OptionsLoader, WinnerOptions};
use crate::results::{format_win_probability, Emphasis, Insight, ResultRow};
use crate::transport::Transport;
use crate::{Field, Prediction, PredictionKind};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WinnerSelection {
    pub team1: String,
    pub team2: String,
    pub toss_winner: String,
    pub toss_decision: String,
    pub venue: String,
    pub tournament_match: String,
    pub test_match: String,
}

/// Body of `POST /predict-match-winner`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinnerRequest {
    pub team: String,
    pub opponent: String,
    pub venue: String,
    pub is_test_match: u8,
    pub toss_winner: u8,
    pub toss_decision_field: u8,
    pub is_tournament_match: u8,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WinnerResponse {
    pub predicted_winner: String,
    /// Fraction in `[0, 1]`.
    pub win_probability: f64,
}

/// `1` when the toss went to the first team, `2` for anything else.
pub fn encode_toss_winner(team1: &str, toss_winner: &str) -> u8 {
    if toss_winner == team1 {
        1
    } else {
        2
    }
}

/// `1` for "Yes", `0` otherwise.
pub fn encode_flag(value: &str) -> u8 {
    u8::from(value == YES)
}

/// `1` when the toss winner chose to field, `0` otherwise.
pub fn encode_toss_decision(decision: &str) -> u8 {
    u8::from(decision == FIELD_DECISION)
}

pub struct WinnerForecast;

#[async_trait(?Send)]
impl Prediction for WinnerForecast {
    const KIND: PredictionKind = PredictionKind::Winner;
    const SUPPORTS_RESET: bool = false;
    const SUBMIT_LABEL: &'static str = "PREDICT WINNER";

    type Options = WinnerOptions;
    type Selection = WinnerSelection;
    type Request = WinnerRequest;
    type Response = WinnerResponse;

    async fn load_options<T: Transport>(
        loader: &OptionsLoader<T>,
        _config: &AppConfig,
    ) -> Result<WinnerOptions, LoadError> {
        loader.load_winner_options().await
    }

    fn default_selection(options: &WinnerOptions) -> WinnerSelection {
        let first = |list: &[String]| list.first().cloned().unwrap_or_default();
        let team1 = first(&options.teams);
        // Avoid a team playing itself when there is a choice.
        let team2 = options.teams.get(1).cloned().unwrap_or_else(|| team1.clone());
        WinnerSelection {
            toss_winner: team1.clone(),
            team1,
            team2,
            toss_decision: first(&options.toss_decisions),
            venue: first(&options.venues),
            tournament_match: NO.to_string(),
            test_match: NO.to_string(),
        }
    }

    fn fields(options: &WinnerOptions, selection: &WinnerSelection) -> Vec<Field> {
        let mut toss_choices: Vec<String> = Vec::with_capacity(2);
        for team in [&selection.team1, &selection.team2] {
            if !team.is_empty() && !toss_choices.contains(team) {
                toss_choices.push(team.clone());
            }
        }

        vec![
            Field {
                key: "team1",
                label: "Team 1",
                placeholder: "Select Team",
                choices: options.teams.clone(),
                value: selection.team1.clone(),
            },
            Field {
                key: "team2",
                label: "Team 2",
                placeholder: "Select Team",
                choices: options.teams.clone(),
                value: selection.team2.clone(),
            },
            Field {
                key: "toss_winner",
                label: "Toss Winner",
                placeholder: "Select Toss Winner",
                choices: toss_choices,
                value: selection.toss_winner.clone(),
            },
            Field {
                key: "toss_decision",
                label: "Toss Decision",
                placeholder: "Select Toss Decision",
                choices: options.toss_decisions.clone(),
                value: selection.toss_decision.clone(),
            },
            Field {
                key: "venue",
                label: "Venue",
                placeholder: "Select Venue",
                choices: options.venues.clone(),
                value: selection.venue.clone(),
            },
            Field {
                key: "tournament_match",
                label: "Tournament Match",
                placeholder: "Select",
                choices: options.tournament.clone(),
                value: selection.tournament_match.clone(),
            },
            Field {
                key: "test_match",
                label: "Test Match",
                placeholder: "Select",
                choices: options.test.clone(),
                value: selection.test_match.clone(),
            },
        ]
    }

    fn set_field(selection: &mut WinnerSelection, key: &str, value: String) {
        match key {
            "team1" => selection.team1 = value,
            "team2" => selection.team2 = value,
            "toss_winner" => selection.toss_winner = value,
            "toss_decision" => selection.toss_decision = value,
            "venue" => selection.venue = value,
            "tournament_match" => selection.tournament_match = value,
            "test_match" => selection.test_match = value,
            _ => return,
        }
        // Keep the toss winner one of the two playing teams.
        if (key == "team1" || key == "team2")
            && selection.toss_winner != selection.team1
            && selection.toss_winner != selection.team2
        {
            selection.toss_winner = selection.team1.clone();
        }
    }

    fn to_request(selection: &WinnerSelection) -> WinnerRequest {
        WinnerRequest {
            team: selection.team1.clone(),
            opponent: selection.team2.clone(),
            venue: selection.venue.clone(),
            is_test_match: encode_flag(&selection.test_match),
            toss_winner: encode_toss_winner(&selection.team1, &selection.toss_winner),
            toss_decision_field: encode_toss_decision(&selection.toss_decision),
            is_tournament_match: encode_flag(&selection.tournament_match),
        }
    }

    fn check_response(response: &WinnerResponse) -> Result<(), String> {
        let p = response.win_probability;
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(format!("win_probability {} is not a fraction in [0, 1]", p));
        }
        Ok(())
    }

    fn result_rows(_selection: &WinnerSelection, response: &WinnerResponse) -> Vec<ResultRow> {
        vec![
            ResultRow::new("Winner", &response.predicted_winner, Emphasis::Headline),
            ResultRow::new(
                "Confidence",
                format!(
                    "{} chance that {} wins.",
                    format_win_probability(response.win_probability),
                    response.predicted_winner
                ),
                Emphasis::Figure,
            ),
        ]
    }

    fn insight() -> Insight {
        Insight {
            title: "WINNER INSIGHT",
            blurb: "Our AI predicts the winning team based on match context.",
            stats: &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::decode_response;
    use crate::error::PredictError;

    fn options(teams: &[&str]) -> WinnerOptions {
        WinnerOptions::new(
            teams.iter().map(|t| t.to_string()).collect(),
            vec!["Eden Gardens".into()],
            vec!["bat".into(), "field".into()],
        )
    }

    #[test]
    fn toss_winner_encoding() {
        assert_eq!(encode_toss_winner("India", "India"), 1);
        assert_eq!(encode_toss_winner("India", "Australia"), 2);
        assert_eq!(encode_toss_winner("India", "England"), 2);
        assert_eq!(encode_toss_winner("India", ""), 2);
    }

    #[test]
    fn flag_and_decision_encoding() {
        assert_eq!(encode_flag("Yes"), 1);
        assert_eq!(encode_flag("No"), 0);
        assert_eq!(encode_toss_decision("field"), 1);
        assert_eq!(encode_toss_decision("bat"), 0);
    }

    #[test]
    fn defaults_pick_two_different_teams() {
        let sel = WinnerForecast::default_selection(&options(&["India", "Australia", "England"]));
        assert_eq!(sel.team1, "India");
        assert_eq!(sel.team2, "Australia");
        assert_eq!(sel.toss_winner, "India");
        assert_eq!(sel.toss_decision, "bat");
        assert_eq!(sel.venue, "Eden Gardens");
        assert_eq!(sel.tournament_match, "No");
        assert_eq!(sel.test_match, "No");
    }

    #[test]
    fn single_team_defaults_to_itself() {
        let sel = WinnerForecast::default_selection(&options(&["India"]));
        assert_eq!(sel.team1, "India");
        assert_eq!(sel.team2, "India");
    }

    #[test]
    fn toss_choices_follow_selected_teams() {
        let opts = options(&["India", "Australia", "England"]);
        let sel = WinnerForecast::default_selection(&opts);
        let fields = WinnerForecast::fields(&opts, &sel);
        let toss = fields.iter().find(|f| f.key == "toss_winner").unwrap();
        assert_eq!(toss.choices, vec!["India", "Australia"]);
    }

    #[test]
    fn changing_teams_reseeds_stale_toss_winner() {
        let opts = options(&["India", "Australia", "England"]);
        let mut sel = WinnerForecast::default_selection(&opts);
        WinnerForecast::set_field(&mut sel, "toss_winner", "Australia".into());
        WinnerForecast::set_field(&mut sel, "team2", "England".into());
        assert_eq!(sel.toss_winner, "India");

        WinnerForecast::set_field(&mut sel, "toss_winner", "England".into());
        WinnerForecast::set_field(&mut sel, "venue", "Lord's".into());
        assert_eq!(sel.toss_winner, "England");
    }

    #[test]
    fn request_body_shape() {
        let sel = WinnerSelection {
            team1: "India".into(),
            team2: "Australia".into(),
            toss_winner: "Australia".into(),
            toss_decision: "field".into(),
            venue: "Eden Gardens".into(),
            tournament_match: "Yes".into(),
            test_match: "No".into(),
        };
        let body = serde_json::to_value(WinnerForecast::to_request(&sel)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "team": "India",
                "opponent": "Australia",
                "venue": "Eden Gardens",
                "is_test_match": 0,
                "toss_winner": 2,
                "toss_decision_field": 1,
                "is_tournament_match": 1
            })
        );
    }

    #[test]
    fn probability_outside_unit_interval_is_rejected() {
        let err = decode_response::<WinnerForecast>(
            r#"{"predicted_winner": "India", "win_probability": 67.9}"#,
        )
        .unwrap_err();
        assert!(matches!(err, PredictError::Decode(_)));
    }

    #[test]
    fn missing_probability_is_a_decode_error() {
        let err = decode_response::<WinnerForecast>(r#"{"predicted_winner": "India"}"#).unwrap_err();
        assert!(matches!(err, PredictError::Decode(_)));
    }

    #[test]
    fn confidence_row_uses_percentage() {
        let resp = WinnerResponse {
            predicted_winner: "India".into(),
            win_probability: 0.6789,
        };
        let rows = WinnerForecast::result_rows(&WinnerSelection::default(), &resp);
        assert_eq!(rows[0].value, "India");
        assert_eq!(rows[1].value, "67.9% chance that India wins.");
    }
}
