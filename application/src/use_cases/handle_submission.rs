//! Handle Submission use case
//!
//! Runs once per form submission and removes every claimed option from the
//! pools of gated questions.
//!
//! # Flow
//!
//! ```text
//! Received
//!    │ authorization Required ─▶ ReauthRequested (notice, content dropped)
//!    ▼
//! AuthChecked
//!    │ keep MultipleChoice / List / Checkbox responses
//!    ▼
//! Filtered
//!    │ configuration unreadable ─▶ Applied (nothing gated)
//!    │ per response: skip | deplete with versioned write, retry on conflict
//!    │ unexpected failure ─▶ Failed (logged, still handled)
//!    ▼
//! Applied
//! ```
//!
//! Whatever happens inside, the host always sees a handled submission so a
//! single bad submission never disables the trigger.

use crate::config::DepletionParams;
use crate::ports::form_gateway::{FormError, FormGateway, PoolWrite};
use crate::ports::host::{AuthorizationPort, AuthorizationStatus};
use crate::ports::property_store::PropertyStore;
use crate::ports::submission_logger::{NoSubmissionLogger, SubmissionLogEntry, SubmissionLogger};
use crate::use_cases::configuration_store::ConfigurationStore;
use crate::use_cases::notify_reauthorization::ReauthorizationNotifier;
use serde_json::json;
use slotguard_domain::{
    Configuration, Depletion, ResponseOutcome, ResponseStatus, SkipReason, SubmissionEvent,
    SubmissionOutcome, SubmissionResponse, SubmissionState,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Use case invoked by the form submission trigger
pub struct HandleSubmissionUseCase<S: PropertyStore + 'static, F: FormGateway + 'static> {
    configuration: ConfigurationStore<S>,
    form: Arc<F>,
    authorization: Arc<dyn AuthorizationPort>,
    notifier: ReauthorizationNotifier<S>,
    logger: Arc<dyn SubmissionLogger>,
    params: DepletionParams,
}

impl<S, F> HandleSubmissionUseCase<S, F>
where
    S: PropertyStore + 'static,
    F: FormGateway + 'static,
{
    pub fn new(
        store: Arc<S>,
        form: Arc<F>,
        authorization: Arc<dyn AuthorizationPort>,
        notifier: ReauthorizationNotifier<S>,
    ) -> Self {
        Self {
            configuration: ConfigurationStore::new(store),
            form,
            authorization,
            notifier,
            logger: Arc::new(NoSubmissionLogger),
            params: DepletionParams::default(),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn SubmissionLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_params(mut self, params: DepletionParams) -> Self {
        self.params = params;
        self
    }

    /// Process one submission. Never fails from the host's point of view.
    pub async fn execute(&self, event: &SubmissionEvent) -> SubmissionOutcome {
        let mut state = SubmissionState::Received;
        self.logger.log(SubmissionLogEntry::new(
            "submission_received",
            json!({
                "source": event.source,
                "responses": event.response.item_responses.len(),
            }),
        ));

        if self.authorization.authorization_status().await == AuthorizationStatus::Required {
            self.advance(&mut state, SubmissionState::ReauthRequested);
            let sent = match self.notifier.notify().await {
                Ok(sent) => sent,
                Err(e) => {
                    warn!(error = %e, "Could not send reauthorization notice");
                    false
                }
            };
            info!(sent, "Authorization required; submission content not processed");
            self.logger.log(SubmissionLogEntry::new(
                "reauthorization_requested",
                json!({ "source": event.source, "notification_sent": sent }),
            ));
            return SubmissionOutcome::reauth_requested(sent);
        }
        self.advance(&mut state, SubmissionState::AuthChecked);

        let responses = event.supported_responses();
        self.advance(&mut state, SubmissionState::Filtered);
        debug!("{} gateable responses in submission", responses.len());

        let configuration = match self.configuration.get().await {
            Ok(snapshot) => snapshot.configuration,
            Err(e) => {
                // Gating is opt-in: without configuration nothing is gated.
                warn!(error = %e, "Configuration unavailable; submission left ungated");
                self.advance(&mut state, SubmissionState::Applied);
                return SubmissionOutcome::applied(Vec::new());
            }
        };

        let mut outcomes = Vec::with_capacity(responses.len());
        for response in &responses {
            match self.apply_response(&configuration, response).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    error!(
                        question = %response.item_id,
                        error = %e,
                        "Submission processing failed; remaining responses dropped"
                    );
                    self.logger.log(SubmissionLogEntry::new(
                        "submission_failed",
                        json!({
                            "source": event.source,
                            "question_id": response.item_id,
                            "error": e.to_string(),
                        }),
                    ));
                    self.advance(&mut state, SubmissionState::Failed);
                    return SubmissionOutcome::failed(outcomes, e.to_string());
                }
            }
        }

        self.advance(&mut state, SubmissionState::Applied);
        let outcome = SubmissionOutcome::applied(outcomes);
        info!(
            depleted = outcome.depleted_count(),
            responses = outcome.responses.len(),
            "Submission handled"
        );
        outcome
    }

    fn advance(&self, state: &mut SubmissionState, next: SubmissionState) {
        debug_assert!(state.can_transition_to(next), "{state} -> {next}");
        debug!(from = %state, to = %next, "Submission state");
        *state = next;
    }

    /// Apply one response. Only failures that should abort the whole
    /// submission are returned as errors.
    async fn apply_response(
        &self,
        configuration: &Configuration,
        response: &SubmissionResponse,
    ) -> Result<ResponseOutcome, FormError> {
        let id = &response.item_id;

        let Some(settings) = configuration.get(id) else {
            return Ok(ResponseOutcome::skipped(id.clone(), SkipReason::NotConfigured));
        };
        if !settings.enabled {
            return Ok(ResponseOutcome::skipped(id.clone(), SkipReason::Disabled));
        }

        match self.deplete(response).await {
            Err(FormError::QuestionNotFound(_)) => {
                warn!(question = %id, "Gated question no longer on the form; response skipped");
                self.logger.log(SubmissionLogEntry::new(
                    "response_skipped",
                    json!({ "question_id": id, "reason": SkipReason::QuestionNotFound }),
                ));
                Ok(ResponseOutcome::skipped(id.clone(), SkipReason::QuestionNotFound))
            }
            other => other,
        }
    }

    /// Versioned read-deplete-write loop for one gated response.
    async fn deplete(&self, response: &SubmissionResponse) -> Result<ResponseOutcome, FormError> {
        let id = &response.item_id;
        let removed = response.removed_values();
        let max_attempts = self.params.max_write_attempts.max(1);

        for attempt in 1..=max_attempts {
            let snapshot = self.form.get_choice_pool(id, response.item_type).await?;
            let depletion = Depletion::plan(&snapshot.pool, &removed, &self.params.placeholder_text);
            let stale = depletion.stale().to_vec();

            if !stale.is_empty() {
                warn!(question = %id, ?stale, "Selected values were already claimed");
            }

            if !depletion.is_changed() {
                return Ok(ResponseOutcome {
                    question_id: id.clone(),
                    status: ResponseStatus::Unchanged,
                    stale,
                });
            }

            let write = self
                .form
                .set_choice_pool(id, response.item_type, snapshot.version, depletion.after())
                .await?;

            match write {
                PoolWrite::Written { version } => {
                    debug!(question = %id, version, attempt, "Pool rewritten");
                    self.logger.log(SubmissionLogEntry::new(
                        "pool_depleted",
                        json!({
                            "question_id": id,
                            "before": depletion.before(),
                            "after": depletion.after(),
                            "attempts": attempt,
                            "stale": stale,
                        }),
                    ));
                    return Ok(ResponseOutcome {
                        question_id: id.clone(),
                        status: ResponseStatus::Depleted {
                            before: depletion.before().clone(),
                            after: depletion.after().clone(),
                            attempts: attempt,
                        },
                        stale,
                    });
                }
                PoolWrite::Conflict { current_version } => {
                    debug!(
                        question = %id,
                        expected = snapshot.version,
                        current_version,
                        attempt,
                        "Pool changed underneath; retrying"
                    );
                    if attempt < max_attempts {
                        tokio::time::sleep(self.params.backoff_after(attempt)).await;
                    }
                }
            }
        }

        let message = format!("pool still contended after {max_attempts} write attempts");
        error!(question = %id, "{}", message);
        self.logger.log(SubmissionLogEntry::new(
            "response_failed",
            json!({ "question_id": id, "error": message }),
        ));
        Ok(ResponseOutcome::failed(id.clone(), message))
    }
}
