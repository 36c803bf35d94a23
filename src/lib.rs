//! Core of the CricketAI prediction front-end.
//!
//! Everything that does not touch the DOM lives here: option loading, the
//! per-endpoint request/response schemas, the form state machine and the
//! display rows for results. The Yew views in `main.rs` are thin wrappers.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

pub mod batting;
pub mod bowling;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod options;
pub mod results;
pub mod transport;
pub mod winner;

use config::AppConfig;
use error::LoadError;
use options::OptionsLoader;
use results::{Insight, ResultRow};
use transport::Transport;

/// Ordered labels offered by one dropdown. Non-empty once loaded.
pub type ChoiceSet = Vec<String>;

/// Which backend endpoint a form talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredictionKind {
    Batting,
    Bowling,
    Winner,
}

impl PredictionKind {
    pub const ALL: [PredictionKind; 3] = [
        PredictionKind::Winner,
        PredictionKind::Batting,
        PredictionKind::Bowling,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PredictionKind::Batting => "Run Prediction",
            PredictionKind::Bowling => "Bowling Prediction",
            PredictionKind::Winner => "Match Winner",
        }
    }
}

impl fmt::Display for PredictionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One controlled dropdown as the view should render it.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Key passed back to [`Prediction::set_field`].
    pub key: &'static str,
    pub label: &'static str,
    /// Shown as a disabled first entry while nothing is chosen.
    pub placeholder: &'static str,
    pub choices: ChoiceSet,
    pub value: String,
}

/// A prediction endpoint together with the form that feeds it.
///
/// Each implementor fixes the option set it needs, the selection record the
/// user edits, the JSON body it posts and the schema it expects back.
#[async_trait(?Send)]
pub trait Prediction: 'static {
    const KIND: PredictionKind;
    /// Whether the form offers a reset action that clears the result.
    const SUPPORTS_RESET: bool;
    const SUBMIT_LABEL: &'static str;

    type Options: Clone + PartialEq + 'static;
    type Selection: Clone + PartialEq + fmt::Debug + 'static;
    type Request: Serialize;
    type Response: DeserializeOwned + Clone + PartialEq + fmt::Debug + 'static;

    async fn load_options<T: Transport>(
        loader: &OptionsLoader<T>,
        config: &AppConfig,
    ) -> Result<Self::Options, LoadError>;

    fn default_selection(options: &Self::Options) -> Self::Selection;

    fn fields(options: &Self::Options, selection: &Self::Selection) -> Vec<Field>;

    /// Apply a user edit. Unknown keys are ignored.
    fn set_field(selection: &mut Self::Selection, key: &str, value: String);

    fn to_request(selection: &Self::Selection) -> Self::Request;

    /// Semantic checks on a response that decoded successfully.
    fn check_response(_response: &Self::Response) -> Result<(), String> {
        Ok(())
    }

    fn result_rows(selection: &Self::Selection, response: &Self::Response) -> Vec<ResultRow>;

    /// Static panel shown while there is no result.
    fn insight() -> Insight;
}

/// Keys of the fields that still need a value.
pub fn missing_fields<P: Prediction>(options: &P::Options, selection: &P::Selection) -> Vec<&'static str> {
    P::fields(options, selection)
        .into_iter()
        .filter(|f| f.value.trim().is_empty())
        .map(|f| f.key)
        .collect()
}
