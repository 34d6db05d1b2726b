//! Submission processing entities

use crate::pool::choice_pool::ChoicePool;
use crate::question::entities::QuestionId;
use serde::{Deserialize, Serialize};

/// State of a submission moving through the handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    /// Event accepted from the host
    Received,
    /// Authorization confirmed as granted
    AuthChecked,
    /// Responses narrowed to gateable question types
    Filtered,
    /// Depletion applied to every gated response
    Applied,
    /// Authorization pending; content was not processed
    ReauthRequested,
    /// Processing aborted; the failure was logged
    Failed,
}

impl SubmissionState {
    pub fn as_str(&self) -> &str {
        match self {
            SubmissionState::Received => "received",
            SubmissionState::AuthChecked => "auth_checked",
            SubmissionState::Filtered => "filtered",
            SubmissionState::Applied => "applied",
            SubmissionState::ReauthRequested => "reauth_requested",
            SubmissionState::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionState::Applied | SubmissionState::ReauthRequested | SubmissionState::Failed
        )
    }

    /// Whether the handler may move from `self` to `next`.
    pub fn can_transition_to(&self, next: SubmissionState) -> bool {
        use SubmissionState::*;
        matches!(
            (self, next),
            (Received, AuthChecked)
                | (Received, ReauthRequested)
                | (AuthChecked, Filtered)
                | (Filtered, Applied)
                | (Filtered, Failed)
        )
    }
}

impl std::fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a response was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No settings stored for the question
    NotConfigured,
    /// Settings exist but gating is off
    Disabled,
    /// The question no longer resolves on the live form
    QuestionNotFound,
}

impl SkipReason {
    pub fn as_str(&self) -> &str {
        match self {
            SkipReason::NotConfigured => "not configured",
            SkipReason::Disabled => "disabled",
            SkipReason::QuestionNotFound => "question not found",
        }
    }
}

/// What happened to one response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResponseStatus {
    /// The pool was rewritten
    Depleted {
        before: ChoicePool,
        after: ChoicePool,
        /// Write attempts used, counting conflicts
        attempts: u32,
    },
    /// Nothing in the pool matched the selection; no write issued
    Unchanged,
    Skipped { reason: SkipReason },
    Failed { message: String },
}

/// Result of processing one response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseOutcome {
    pub question_id: QuestionId,
    #[serde(flatten)]
    pub status: ResponseStatus,
    /// Selected values that were already gone from the pool
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stale: Vec<String>,
}

impl ResponseOutcome {
    pub fn skipped(question_id: QuestionId, reason: SkipReason) -> Self {
        Self {
            question_id,
            status: ResponseStatus::Skipped { reason },
            stale: Vec::new(),
        }
    }

    pub fn failed(question_id: QuestionId, message: impl Into<String>) -> Self {
        Self {
            question_id,
            status: ResponseStatus::Failed {
                message: message.into(),
            },
            stale: Vec::new(),
        }
    }

    pub fn is_stale(&self) -> bool {
        !self.stale.is_empty()
    }
}

/// Report of a whole submission.
///
/// From the host's point of view every submission is handled; the report
/// only exists for logs and the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    pub state: SubmissionState,
    #[serde(default)]
    pub responses: Vec<ResponseOutcome>,
    /// Whether a reauthorization notice went out (only when reauth was requested)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_sent: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmissionOutcome {
    pub fn applied(responses: Vec<ResponseOutcome>) -> Self {
        Self {
            state: SubmissionState::Applied,
            responses,
            notification_sent: None,
            error: None,
        }
    }

    pub fn reauth_requested(notification_sent: bool) -> Self {
        Self {
            state: SubmissionState::ReauthRequested,
            responses: Vec::new(),
            notification_sent: Some(notification_sent),
            error: None,
        }
    }

    pub fn failed(responses: Vec<ResponseOutcome>, error: impl Into<String>) -> Self {
        Self {
            state: SubmissionState::Failed,
            responses,
            notification_sent: None,
            error: Some(error.into()),
        }
    }

    /// Always true: the host must never see a failed submission.
    pub fn is_handled(&self) -> bool {
        self.state.is_terminal()
    }

    /// Number of pools rewritten.
    pub fn depleted_count(&self) -> usize {
        self.responses
            .iter()
            .filter(|r| matches!(r.status, ResponseStatus::Depleted { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_transitions() {
        assert!(SubmissionState::Received.can_transition_to(SubmissionState::AuthChecked));
        assert!(SubmissionState::Received.can_transition_to(SubmissionState::ReauthRequested));
        assert!(SubmissionState::Filtered.can_transition_to(SubmissionState::Applied));
        assert!(!SubmissionState::Received.can_transition_to(SubmissionState::Applied));
        assert!(!SubmissionState::Applied.can_transition_to(SubmissionState::Failed));
    }

    #[test]
    fn test_terminal_states() {
        assert!(SubmissionState::Applied.is_terminal());
        assert!(SubmissionState::ReauthRequested.is_terminal());
        assert!(SubmissionState::Failed.is_terminal());
        assert!(!SubmissionState::Filtered.is_terminal());
    }

    #[test]
    fn test_every_outcome_is_handled() {
        assert!(SubmissionOutcome::applied(vec![]).is_handled());
        assert!(SubmissionOutcome::reauth_requested(false).is_handled());
        assert!(SubmissionOutcome::failed(vec![], "boom").is_handled());
    }

    #[test]
    fn test_response_outcome_json_shape() {
        let outcome = ResponseOutcome::skipped(QuestionId::new("5"), SkipReason::Disabled);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"question_id": "5", "status": "skipped", "reason": "disabled"})
        );
    }
}
