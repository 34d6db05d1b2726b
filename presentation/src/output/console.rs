//! Console output formatter for questions, configuration and submission outcomes

use colored::Colorize;
use serde::Serialize;
use slotguard_application::ConfigurationSnapshot;
use slotguard_domain::{
    Configuration, ResponseOutcome, ResponseStatus, SubmissionOutcome, SubmissionState,
    SupportedQuestion,
};
use std::path::PathBuf;

/// Formats slotguard results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Supported questions with their gating state
    pub fn format_questions(questions: &[SupportedQuestion], configuration: &Configuration) -> String {
        if questions.is_empty() {
            return format!("{}\n", "No choice questions in this form.".dimmed());
        }

        let mut output = Self::header("Questions");
        output.push('\n');
        for question in questions {
            let marker = if configuration.is_enabled(&question.id) {
                "single-use".green().bold()
            } else {
                "open".dimmed()
            };
            output.push_str(&format!(
                "  {:<12} {:<16} {:<10} {}\n",
                question.id.as_str().yellow(),
                question.question_type.as_str(),
                marker,
                question.title
            ));
        }
        output
    }

    /// Stored configuration, its owner and any unreadable entries
    pub fn format_configuration(snapshot: &ConfigurationSnapshot, owner: Option<&str>) -> String {
        let mut output = Self::header("Configuration");
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Owner:".cyan().bold(),
            owner.unwrap_or("(none)")
        ));

        if snapshot.configuration.is_empty() {
            output.push_str(&format!("{}\n", "No questions configured.".dimmed()));
        }
        for (id, settings) in snapshot.configuration.iter() {
            let state = if settings.enabled {
                "enabled".green()
            } else {
                "disabled".dimmed()
            };
            output.push_str(&format!("  {:<12} {}\n", id.as_str().yellow(), state));
        }

        if !snapshot.decode_errors.is_empty() {
            output.push_str(&format!("\n{}\n", "Unreadable entries:".red().bold()));
            for error in &snapshot.decode_errors {
                output.push_str(&format!("  {}: {}\n", error.key, error.message));
            }
        }

        output
    }

    /// Report of one processed submission
    pub fn format_outcome(outcome: &SubmissionOutcome) -> String {
        let state = match outcome.state {
            SubmissionState::Applied => outcome.state.as_str().green().bold(),
            SubmissionState::ReauthRequested => outcome.state.as_str().yellow().bold(),
            _ => outcome.state.as_str().red().bold(),
        };
        let mut output = format!("{} {}\n", "Submission:".cyan().bold(), state);

        if let Some(sent) = outcome.notification_sent {
            let note = if sent {
                "reauthorization notice sent"
            } else {
                "reauthorization notice already sent recently"
            };
            output.push_str(&format!("  {}\n", note.yellow()));
        }

        for response in &outcome.responses {
            output.push_str(&Self::format_response(response));
        }

        if let Some(error) = &outcome.error {
            output.push_str(&format!("{} {}\n", "Error:".red().bold(), error));
        }

        output
    }

    fn format_response(response: &ResponseOutcome) -> String {
        let id = response.question_id.as_str().yellow();
        let mut line = match &response.status {
            ResponseStatus::Depleted { before, after, .. } => format!(
                "  {} {} -> {}\n",
                id,
                before.values().join(", "),
                after.values().join(", ").green()
            ),
            ResponseStatus::Unchanged => format!("  {} {}\n", id, "unchanged".dimmed()),
            ResponseStatus::Skipped { reason } => {
                format!("  {} {}\n", id, format!("skipped ({})", reason.as_str()).dimmed())
            }
            ResponseStatus::Failed { message } => {
                format!("  {} {}\n", id, format!("failed: {}", message).red())
            }
        };
        if response.is_stale() {
            line.push_str(&format!(
                "    {} {}\n",
                "already taken:".yellow(),
                response.stale.join(", ")
            ));
        }
        line
    }

    /// Configuration file locations, highest priority first
    pub fn format_config_sources(sources: &[(String, PathBuf, bool)]) -> String {
        let mut output = String::from("Configuration sources (in priority order):\n");
        output.push_str("  [ENV  ] SLOTGUARD_<SECTION>__<KEY>\n");
        for (label, path, found) in sources {
            let status = if *found { "FOUND" } else { "     " };
            output.push_str(&format!("  [{}] {:<9} {}\n", status, format!("{}:", label), path.display()));
        }
        output.push_str("  [     ] Default:  built-in defaults\n");
        output
    }

    /// Format as JSON
    pub fn format_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }
}
