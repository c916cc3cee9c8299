use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::error::ExpungementError;

/// Classification of the offense as entered on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OffenseType {
    Misdemeanor,
    Felony,
}

impl OffenseType {
    pub fn from_form(value: &str) -> Option<Self> {
        match value {
            "Misdemeanor" => Some(Self::Misdemeanor),
            "Felony" => Some(Self::Felony),
            _ => None,
        }
    }
}

impl fmt::Display for OffenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OffenseType::Misdemeanor => write!(f, "Misdemeanor"),
            OffenseType::Felony => write!(f, "Felony"),
        }
    }
}

/// Yes/No radio answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub fn from_form(value: &str) -> Option<Self> {
        match value {
            "Yes" => Some(Self::Yes),
            "No" => Some(Self::No),
            _ => None,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Yes => write!(f, "Yes"),
            Answer::No => write!(f, "No"),
        }
    }
}

/// Raw questionnaire submission exactly as the browser posts it.
///
/// Every field defaults to an empty string so that omitted inputs reach the
/// validator instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EligibilityForm {
    pub charge: String,
    pub offense_type: String,
    pub convicted: String,
    pub sentence_completed: String,
    pub first_offense: String,
    pub county: String,
    pub age: String,
}

/// One validated questionnaire submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityRequest {
    pub charge: String,
    pub offense_type: OffenseType,
    pub convicted: Answer,
    pub sentence_completed: NaiveDate,
    pub first_offense: Answer,
    pub county: String,
    pub age: u8,
}

/// Markdown text returned by the completion endpoint, kept opaque
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityReport(pub String);

impl EligibilityReport {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Report ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    /// The report exactly as returned
    pub markdown: String,
    pub html: String,
}

/// A PDF summary written to the export directory
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub file_id: String,
    pub file_name: String,
    pub path: PathBuf,
    /// Text laid out in the document: title line, blank line, report
    pub body: String,
    pub page_count: usize,
}

/// Everything one submission produces.
///
/// The report is shown even when the PDF could not be written, so the
/// export outcome is kept alongside it rather than failing the submission.
#[derive(Debug)]
pub struct Evaluation {
    pub report: EligibilityReport,
    pub rendered: RenderedReport,
    pub document: Result<ExportedDocument, ExpungementError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat-completion request body (OpenAI wire format)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
}
