//! Submission state machine for the disclosure form.
//!
//! The transitions are plain methods so an event loop can drive them one
//! event at a time; [`FormController::submit`] and [`FormController::load`]
//! chain them around a [`DisclosureApi`] for callers that can simply await.

use shared::protocol::{DisclosureRequest, DisclosureResponse, HistoryItem};
use tracing::{debug, info, warn};

use crate::{
    error::{ClientError, GENERATE_FAILED_MESSAGE, VALIDATION_MESSAGE},
    form::DisclosureForm,
    transport::{DisclosureApi, DEFAULT_HISTORY_LIMIT},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone)]
pub struct FormController {
    pub form: DisclosureForm,
    phase: SubmitPhase,
    error_message: Option<&'static str>,
    result: Option<DisclosureResponse>,
    history: Vec<HistoryItem>,
    history_limit: u32,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(DisclosureForm::default())
    }
}

impl FormController {
    pub fn new(form: DisclosureForm) -> Self {
        Self {
            form,
            phase: SubmitPhase::Idle,
            error_message: None,
            result: None,
            history: Vec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn with_history_limit(mut self, limit: u32) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error_message
    }

    pub fn result(&self) -> Option<&DisclosureResponse> {
        self.result.as_ref()
    }

    pub fn history(&self) -> &[HistoryItem] {
        &self.history
    }

    pub fn history_limit(&self) -> u32 {
        self.history_limit
    }

    /// Starts a submission: clears error and result, validates, and moves to `Submitting`.
    ///
    /// A submit while one is already in flight is rejected and leaves all state untouched.
    pub fn begin_submit(&mut self) -> Result<DisclosureRequest, ClientError> {
        if self.phase == SubmitPhase::Submitting {
            debug!("ignoring submit while a generation request is in flight");
            return Err(ClientError::SubmissionInFlight);
        }

        self.error_message = None;
        self.result = None;

        match self.form.to_request() {
            Ok(request) => {
                self.phase = SubmitPhase::Submitting;
                Ok(request)
            }
            Err(err) => {
                debug!(error = %err, "form failed validation");
                self.phase = SubmitPhase::Idle;
                self.error_message = Some(VALIDATION_MESSAGE);
                Err(err.into())
            }
        }
    }

    pub fn finish_submit_ok(&mut self, response: DisclosureResponse) {
        self.result = Some(response);
        self.error_message = None;
        self.phase = SubmitPhase::Succeeded;
    }

    pub fn finish_submit_err(&mut self) {
        self.error_message = Some(GENERATE_FAILED_MESSAGE);
        self.phase = SubmitPhase::Failed;
    }

    /// Replaces the cached history wholesale.
    pub fn apply_history(&mut self, items: Vec<HistoryItem>) {
        self.history = items;
    }

    pub fn history_refresh_failed(&mut self, reason: &str) {
        debug!(reason, "history refresh failed; keeping previous list");
    }

    /// Initial page load: one history fetch.
    pub async fn load<A: DisclosureApi + ?Sized>(&mut self, api: &A) {
        self.refresh_history(api).await;
    }

    pub async fn refresh_history<A: DisclosureApi + ?Sized>(&mut self, api: &A) {
        match api.history(self.history_limit).await {
            Ok(items) => self.apply_history(items),
            Err(err) => self.history_refresh_failed(&format!("{err:#}")),
        }
    }

    /// Runs one full submission: validate, generate, then refresh history on success.
    pub async fn submit<A: DisclosureApi + ?Sized>(
        &mut self,
        api: &A,
    ) -> Result<DisclosureResponse, ClientError> {
        let request = self.begin_submit()?;

        let response = match api.generate_disclosure(&request).await {
            Ok(response) => response,
            Err(err) => {
                warn!("disclosure generation failed: {err:#}");
                self.finish_submit_err();
                return Err(ClientError::Transport(err));
            }
        };

        info!(company = %request.company_name, "disclosure ready");
        self.finish_submit_ok(response.clone());
        self.refresh_history(api).await;
        Ok(response)
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
