//! Loading and normalising the choice lists behind each form's dropdowns.

use std::collections::HashSet;

use log::{debug, info};
use serde::Deserialize;
use url::Url;

use crate::config::{
    BOWLING_DATA_PATH, MATCH_FORMATS, NO, TEAMS_PATH, TOSS_DECISIONS_PATH, VENUES_PATH, YES,
};
use crate::error::LoadError;
use crate::transport::Transport;
use crate::ChoiceSet;

/// Parse a list resource: a JSON array of strings if it is one, otherwise one
/// label per line with surrounding whitespace and blank lines dropped.
/// Repeated labels keep their first position.
pub fn parse_choice_list(path: &str, text: &str) -> Result<ChoiceSet, LoadError> {
    let raw = match serde_json::from_str::<Vec<String>>(text) {
        Ok(list) => list,
        Err(_) => text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
    };

    let mut seen = HashSet::new();
    let mut list = ChoiceSet::with_capacity(raw.len());
    for label in raw {
        if !seen.insert(label.clone()) {
            debug!("Duplicate choice '{}' in {}, skipping", label, path);
            continue;
        }
        list.push(label);
    }

    if list.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_string(),
        });
    }
    Ok(list)
}

/// Parse the bowling table: a two-element JSON array `[bowlers, teams]`.
pub fn parse_bowling_table(path: &str, text: &str) -> Result<(ChoiceSet, ChoiceSet), LoadError> {
    let (bowlers, teams): (ChoiceSet, ChoiceSet) =
        serde_json::from_str(text).map_err(|e| LoadError::Malformed {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

    if bowlers.is_empty() || teams.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_string(),
        });
    }
    Ok((bowlers, teams))
}

fn yes_no() -> ChoiceSet {
    vec![YES.to_string(), NO.to_string()]
}

fn match_formats() -> ChoiceSet {
    MATCH_FORMATS.iter().map(|f| f.to_string()).collect()
}

/// Choices for the match-winner form.
#[derive(Debug, Clone, PartialEq)]
pub struct WinnerOptions {
    pub teams: ChoiceSet,
    pub venues: ChoiceSet,
    pub toss_decisions: ChoiceSet,
    pub tournament: ChoiceSet,
    pub test: ChoiceSet,
}

impl WinnerOptions {
    pub fn new(teams: ChoiceSet, venues: ChoiceSet, toss_decisions: ChoiceSet) -> Self {
        Self {
            teams,
            venues,
            toss_decisions,
            tournament: yes_no(),
            test: yes_no(),
        }
    }
}

/// Choices for the bowling performance form.
#[derive(Debug, Clone, PartialEq)]
pub struct BowlingOptions {
    pub bowlers: ChoiceSet,
    pub teams: ChoiceSet,
    pub match_formats: ChoiceSet,
}

impl BowlingOptions {
    pub fn new(bowlers: ChoiceSet, teams: ChoiceSet) -> Self {
        Self {
            bowlers,
            teams,
            match_formats: match_formats(),
        }
    }
}

/// Choices for the batting form. Supplied by the caller through
/// [`crate::config::AppConfig`] rather than fetched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BattingOptions {
    pub players: ChoiceSet,
    pub venues: ChoiceSet,
    pub against_teams: ChoiceSet,
    pub match_formats: ChoiceSet,
}

#[derive(Deserialize)]
struct BattingRow {
    field: String,
    label: String,
}

impl BattingOptions {
    /// Build from `field,label` CSV rows. Unknown fields and duplicate labels
    /// are skipped; every field must end up with at least one label.
    pub fn from_csv_str(csv_content: &str) -> Result<Self, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(csv_content.as_bytes());

        let mut options = BattingOptions::default();
        let mut seen = HashSet::new();

        for (i, row) in reader.deserialize::<BattingRow>().enumerate() {
            let row = row.map_err(|e| LoadError::Table(e.to_string()))?;
            if row.label.is_empty() {
                continue;
            }
            if !seen.insert((row.field.clone(), row.label.clone())) {
                debug!("Duplicate batting option '{}' on row {}, skipping", row.label, i + 1);
                continue;
            }
            let list = match row.field.as_str() {
                "player" => &mut options.players,
                "venue" => &mut options.venues,
                "against_team" => &mut options.against_teams,
                "match_format" => &mut options.match_formats,
                other => {
                    debug!("Unknown batting field '{}' on row {}, skipping", other, i + 1);
                    continue;
                }
            };
            list.push(row.label);
        }

        for (name, list) in [
            ("player", &options.players),
            ("venue", &options.venues),
            ("against_team", &options.against_teams),
            ("match_format", &options.match_formats),
        ] {
            if list.is_empty() {
                return Err(LoadError::Table(format!("no labels for '{}'", name)));
            }
        }
        Ok(options)
    }
}

/// Fetches option resources relative to a base URL.
#[derive(Clone)]
pub struct OptionsLoader<T> {
    transport: T,
    base: Url,
}

impl<T: Transport> OptionsLoader<T> {
    pub fn new(transport: T, base: Url) -> Self {
        Self { transport, base }
    }

    /// GET a resource and return its body, failing on transport errors and
    /// non-success statuses.
    pub async fn load_text(&self, path: &str) -> Result<String, LoadError> {
        let url = self.base.join(path).map_err(|e| LoadError::Location {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        let resp = self
            .transport
            .get_text(&url)
            .await
            .map_err(|e| LoadError::Fetch {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        if !resp.is_success() {
            return Err(LoadError::Status {
                path: path.to_string(),
                status: resp.status,
            });
        }
        Ok(resp.body)
    }

    /// Load several list resources in order. Stops at the first failure, so
    /// callers get either every list or none.
    pub async fn load_lists(&self, paths: &[&str]) -> Result<Vec<ChoiceSet>, LoadError> {
        let mut lists = Vec::with_capacity(paths.len());
        for path in paths {
            let text = self.load_text(path).await?;
            lists.push(parse_choice_list(path, &text)?);
        }
        Ok(lists)
    }

    pub async fn load_winner_options(&self) -> Result<WinnerOptions, LoadError> {
        let mut lists = self
            .load_lists(&[TEAMS_PATH, VENUES_PATH, TOSS_DECISIONS_PATH])
            .await?
            .into_iter();
        let (Some(teams), Some(venues), Some(toss_decisions)) =
            (lists.next(), lists.next(), lists.next())
        else {
            return Err(LoadError::Empty {
                path: TEAMS_PATH.to_string(),
            });
        };
        info!(
            "Loaded {} teams, {} venues, {} toss decisions",
            teams.len(),
            venues.len(),
            toss_decisions.len()
        );
        Ok(WinnerOptions::new(teams, venues, toss_decisions))
    }

    pub async fn load_bowling_options(&self) -> Result<BowlingOptions, LoadError> {
        let text = self.load_text(BOWLING_DATA_PATH).await?;
        let (bowlers, teams) = parse_bowling_table(BOWLING_DATA_PATH, &text)?;
        info!("Loaded {} bowlers and {} teams", bowlers.len(), teams.len());
        Ok(BowlingOptions::new(bowlers, teams))
    }
}
