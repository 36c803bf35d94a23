//! Per-form state: the user's selection and the lifecycle of its requests.
//!
//! ```text
//! Idle ──submit──▶ Loading ──ok──▶ Success ─┐
//!   ▲                 │                     ├─submit─▶ Loading
//!   │                 └──err──▶ Failed ─────┘
//!   └──────────────reset (batting/bowling)───────────┘
//! ```
//!
//! Every submission gets a token. A response is applied only if its token is
//! still the latest; reset also moves the token on, so late responses are
//! dropped.

use std::cell::RefCell;

use log::{debug, info, warn};

use crate::client::PredictionClient;
use crate::error::PredictError;
use crate::results::ResultRow;
use crate::transport::Transport;
use crate::{missing_fields, Field, Prediction};

/// Lifecycle of the latest submit-to-response cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<S, R> {
    Idle,
    Loading,
    /// `selection` is the snapshot that was submitted.
    Success { selection: S, response: R },
    Failed(String),
}

/// What a caller needs to send one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission<S> {
    pub token: u64,
    pub selection: S,
}

/// How a call to [`submit`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Precondition failed; nothing was sent.
    Rejected,
    /// The response (or error) became the form's state.
    Applied,
    /// A newer submission or a reset superseded this one.
    Discarded,
}

pub struct FormController<P: Prediction> {
    options: P::Options,
    selection: P::Selection,
    state: RequestState<P::Selection, P::Response>,
    token: u64,
}

impl<P: Prediction> FormController<P> {
    /// Seed the selection with defaults derived from `options`.
    pub fn new(options: P::Options) -> Self {
        let selection = P::default_selection(&options);
        Self {
            options,
            selection,
            state: RequestState::Idle,
            token: 0,
        }
    }

    pub fn options(&self) -> &P::Options {
        &self.options
    }

    pub fn selection(&self) -> &P::Selection {
        &self.selection
    }

    pub fn state(&self) -> &RequestState<P::Selection, P::Response> {
        &self.state
    }

    pub fn fields(&self) -> Vec<Field> {
        P::fields(&self.options, &self.selection)
    }

    pub fn set_field(&mut self, key: &str, value: String) {
        P::set_field(&mut self.selection, key, value);
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RequestState::Loading)
    }

    /// True when every field has a value and nothing is in flight.
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && missing_fields::<P>(&self.options, &self.selection).is_empty()
    }

    /// Move to `Loading` and hand out a token, or `None` if submitting is not
    /// allowed right now.
    pub fn begin_submit(&mut self) -> Option<Submission<P::Selection>> {
        if self.is_loading() {
            debug!("{} submit ignored: request already in flight", P::KIND);
            return None;
        }
        let missing = missing_fields::<P>(&self.options, &self.selection);
        if !missing.is_empty() {
            debug!("{} submit ignored: missing {:?}", P::KIND, missing);
            return None;
        }

        self.token += 1;
        self.state = RequestState::Loading;
        Some(Submission {
            token: self.token,
            selection: self.selection.clone(),
        })
    }

    /// Apply the result of submission `token`. Returns false when the
    /// result was stale and dropped.
    pub fn complete(
        &mut self,
        submission: Submission<P::Selection>,
        result: Result<P::Response, PredictError>,
    ) -> bool {
        if submission.token != self.token || !self.is_loading() {
            debug!(
                "{} dropping stale response #{} (latest #{})",
                P::KIND,
                submission.token,
                self.token
            );
            return false;
        }

        self.state = match result {
            Ok(response) => RequestState::Success {
                selection: submission.selection,
                response,
            },
            Err(err) => {
                warn!("{} prediction failed: {}", P::KIND, err);
                RequestState::Failed(err.to_string())
            }
        };
        true
    }

    /// Clear the result (keeping the selection) on forms that support it.
    pub fn reset(&mut self) -> bool {
        if !P::SUPPORTS_RESET {
            return false;
        }
        self.token += 1;
        self.state = RequestState::Idle;
        true
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            RequestState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn result_rows(&self) -> Option<Vec<ResultRow>> {
        match &self.state {
            RequestState::Success {
                selection,
                response,
            } => Some(P::result_rows(selection, response)),
            _ => None,
        }
    }
}

/// Run one full submission against `form`. The `RefCell` is never borrowed
/// across the network await, so the view can keep reading it meanwhile.
/// `on_update` fires whenever the form's state changed.
pub async fn submit<P, T>(
    form: &RefCell<FormController<P>>,
    client: &PredictionClient<T>,
    on_update: impl Fn(),
) -> SubmitOutcome
where
    P: Prediction,
    T: Transport,
{
    let Some(submission) = form.borrow_mut().begin_submit() else {
        return SubmitOutcome::Rejected;
    };
    info!("{} submission #{} sent", P::KIND, submission.token);
    on_update();

    let result = client.predict::<P>(&submission.selection).await;

    let applied = form.borrow_mut().complete(submission, result);
    if applied {
        on_update();
        SubmitOutcome::Applied
    } else {
        SubmitOutcome::Discarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bowling::{BowlingForecast, BowlingResponse};
    use crate::options::{BowlingOptions, WinnerOptions};
    use crate::results::Stat;
    use crate::winner::WinnerForecast;

    fn bowling_form() -> FormController<BowlingForecast> {
        FormController::new(BowlingOptions::new(
            vec!["Bumrah".into(), "Shami".into()],
            vec!["Australia".into()],
        ))
    }

    fn response(bowler: &str) -> BowlingResponse {
        BowlingResponse {
            bowler: bowler.into(),
            opponent: "Australia".into(),
            match_type: "T20".into(),
            overs_bowled: Stat::Text("4".into()),
            runs_conceded: Stat::Text("28".into()),
            economy_rate: Stat::Text("7.0".into()),
            wickets_taken: Stat::Text("2".into()),
        }
    }

    #[test]
    fn starts_idle_with_defaults() {
        let form = bowling_form();
        assert_eq!(form.state(), &RequestState::Idle);
        assert_eq!(form.selection().bowler, "Bumrah");
        assert!(form.can_submit());
    }

    #[test]
    fn empty_field_blocks_submit() {
        let mut form = bowling_form();
        form.set_field("opponent", String::new());
        assert!(!form.can_submit());
        assert!(form.begin_submit().is_none());
        assert_eq!(form.state(), &RequestState::Idle);
    }

    #[test]
    fn second_submit_while_loading_is_rejected() {
        let mut form = bowling_form();
        assert!(form.begin_submit().is_some());
        assert!(form.is_loading());
        assert!(!form.can_submit());
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn success_keeps_submitted_snapshot() {
        let mut form = bowling_form();
        let sub = form.begin_submit().unwrap();
        form.set_field("bowler", "Shami".into());
        assert!(form.complete(sub, Ok(response("Bumrah"))));
        match form.state() {
            RequestState::Success { selection, .. } => assert_eq!(selection.bowler, "Bumrah"),
            other => panic!("unexpected state {:?}", other),
        }
        assert_eq!(form.selection().bowler, "Shami");
    }

    #[test]
    fn failure_records_message_and_allows_resubmit() {
        let mut form = bowling_form();
        let sub = form.begin_submit().unwrap();
        form.complete(sub, Err(PredictError::Network("connection refused".into())));
        assert_eq!(form.error(), Some("Network error: connection refused"));
        assert!(form.can_submit());
        assert!(form.begin_submit().is_some());
        assert_eq!(form.error(), None);
    }

    #[test]
    fn reset_clears_result_and_keeps_selection() {
        let mut form = bowling_form();
        form.set_field("bowler", "Shami".into());
        let sub = form.begin_submit().unwrap();
        form.complete(sub, Ok(response("Shami")));
        assert!(form.result_rows().is_some());

        assert!(form.reset());
        assert_eq!(form.state(), &RequestState::Idle);
        assert!(form.result_rows().is_none());
        assert_eq!(form.selection().bowler, "Shami");
    }

    #[test]
    fn response_after_reset_is_dropped() {
        let mut form = bowling_form();
        let sub = form.begin_submit().unwrap();
        form.reset();
        assert!(!form.complete(sub, Ok(response("Bumrah"))));
        assert_eq!(form.state(), &RequestState::Idle);
    }

    #[test]
    fn only_latest_submission_applies() {
        let mut form = bowling_form();
        let first = form.begin_submit().unwrap();
        form.complete(first.clone(), Err(PredictError::Network("timeout".into())));
        let second = form.begin_submit().unwrap();

        assert!(!form.complete(first, Ok(response("stale"))));
        assert!(form.is_loading());
        assert!(form.complete(second, Ok(response("Bumrah"))));
    }

    #[test]
    fn winner_form_has_no_reset() {
        let mut form: FormController<WinnerForecast> = FormController::new(WinnerOptions::new(
            vec!["India".into(), "Australia".into()],
            vec!["Eden Gardens".into()],
            vec!["bat".into()],
        ));
        let sub = form.begin_submit().unwrap();
        form.complete(sub, Err(PredictError::Decode("bad".into())));
        assert!(!form.reset());
        assert!(form.error().is_some());
    }
}
