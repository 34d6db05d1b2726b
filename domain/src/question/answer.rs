//! Submission payloads and the responses derived from them

use super::entities::{QuestionId, QuestionType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A respondent's answer to one item.
///
/// MultipleChoice and List answers are a single string; Checkbox answers
/// are the list of every ticked value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Single(String),
    Multiple(Vec<String>),
}

impl Answer {
    /// Values this answer claims, as a set.
    pub fn selected_values(&self) -> BTreeSet<String> {
        match self {
            Answer::Single(value) => BTreeSet::from([value.clone()]),
            Answer::Multiple(values) => values.iter().cloned().collect(),
        }
    }
}

/// Item reference carried by a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: QuestionId,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
}

/// One answered item inside a submission event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResponse {
    pub item: ItemRef,
    pub response: Answer,
}

/// The response part of a submission event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    #[serde(default)]
    pub item_responses: Vec<ItemResponse>,
}

/// A form submission event as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionEvent {
    /// Handle of the form that received the submission
    pub source: String,
    pub response: FormResponse,
}

impl SubmissionEvent {
    pub fn new(source: impl Into<String>, item_responses: Vec<ItemResponse>) -> Self {
        Self {
            source: source.into(),
            response: FormResponse { item_responses },
        }
    }

    /// Responses to questions with a choice pool, in submission order.
    ///
    /// Answers to any other item type are dropped; they are never gated.
    pub fn supported_responses(&self) -> Vec<SubmissionResponse> {
        self.response
            .item_responses
            .iter()
            .filter(|r| r.item.question_type.is_supported())
            .map(|r| SubmissionResponse {
                item_id: r.item.id.clone(),
                item_type: r.item.question_type,
                answer: r.response.clone(),
            })
            .collect()
    }
}

/// A response retained for gating. Transient, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResponse {
    pub item_id: QuestionId,
    pub item_type: QuestionType,
    pub answer: Answer,
}

impl SubmissionResponse {
    /// Values to remove from the question's pool.
    pub fn removed_values(&self) -> BTreeSet<String> {
        self.answer.selected_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, question_type: QuestionType, response: Answer) -> ItemResponse {
        ItemResponse {
            item: ItemRef {
                id: QuestionId::new(id),
                question_type,
            },
            response,
        }
    }

    #[test]
    fn test_answer_deserializes_single_and_multiple() {
        let single: Answer = serde_json::from_str("\"9am\"").unwrap();
        assert_eq!(single, Answer::Single("9am".to_string()));

        let multiple: Answer = serde_json::from_str("[\"red\", \"blue\"]").unwrap();
        assert_eq!(
            multiple,
            Answer::Multiple(vec!["red".to_string(), "blue".to_string()])
        );
    }

    #[test]
    fn test_checkbox_selected_values_deduplicate() {
        let answer = Answer::Multiple(vec!["a".into(), "b".into(), "a".into()]);
        assert_eq!(answer.selected_values().len(), 2);
    }

    #[test]
    fn test_supported_responses_filters_free_text() {
        let event = SubmissionEvent::new(
            "form-1",
            vec![
                item("1", QuestionType::MultipleChoice, Answer::Single("9am".into())),
                item("2", QuestionType::Text, Answer::Single("Ada".into())),
                item(
                    "3",
                    QuestionType::Checkbox,
                    Answer::Multiple(vec!["red".into()]),
                ),
            ],
        );

        let responses = event.supported_responses();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].item_id.as_str(), "1");
        assert_eq!(responses[1].item_type, QuestionType::Checkbox);
    }

    #[test]
    fn test_submission_event_wire_format() {
        let json = r#"{
            "source": "form-1",
            "response": {
                "itemResponses": [
                    { "item": { "id": "42", "type": "LIST" }, "response": "Team A" }
                ]
            }
        }"#;
        let event: SubmissionEvent = serde_json::from_str(json).unwrap();
        let responses = event.supported_responses();
        assert_eq!(responses.len(), 1);
        assert_eq!(
            responses[0].removed_values(),
            BTreeSet::from(["Team A".to_string()])
        );
    }
}
