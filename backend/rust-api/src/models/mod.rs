use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod report;

/// Mode a test session was taken in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Learning,
    Exam,
    Errors,
}

/// One test-taking attempt on a diagram.
///
/// `completed_at = None` means the session is still in progress; such
/// sessions never contribute to completed-session aggregates.
/// Invariant: `correct_count + incorrect_count <= total_questions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSession {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub diagram_id: String,
    pub mode: SessionMode,
    pub total_questions: u32,
    pub correct_count: u32,
    pub incorrect_count: u32,
    /// Exam score on the 0-10 scale; only exam sessions carry one.
    pub score: Option<f64>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "completedAt")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub results: Vec<QuestionResult>,
}

impl TestSession {
    /// Per-session accuracy percentage (unrounded).
    pub fn accuracy_pct(&self) -> f64 {
        if self.total_questions == 0 {
            0.0
        } else {
            self.correct_count as f64 * 100.0 / self.total_questions as f64
        }
    }
}

/// One question instance inside a session.
///
/// Prompt and option texts are snapshots taken at test time so historical
/// statistics stay stable when a question is later edited or deleted.
/// Invariant: when `selected_index` is set,
/// `is_correct == Some(selected_index == correct_index_at_test)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResult {
    /// None when the source question has been deleted.
    pub question_id: Option<String>,
    pub question_title: Option<String>,
    pub order_index: u32,
    pub prompt_snapshot: String,
    #[serde(default)]
    pub options_snapshot: Vec<String>,
    pub correct_index_at_test: usize,
    /// None = unanswered.
    pub selected_index: Option<usize>,
    #[serde(default)]
    pub used_hint: bool,
    pub time_spent_seconds: f64,
    /// Tri-state: None until answered.
    pub is_correct: Option<bool>,
}

impl QuestionResult {
    /// Display label: the live question title when still present, otherwise
    /// the prompt snapshot.
    pub fn title(&self) -> &str {
        self.question_title
            .as_deref()
            .unwrap_or(&self.prompt_snapshot)
    }

    /// Text of the chosen option, if one was chosen and the snapshot still
    /// covers its index.
    pub fn selected_text(&self) -> Option<&str> {
        self.selected_index
            .and_then(|i| self.options_snapshot.get(i))
            .map(String::as_str)
    }
}

/// Per-question claim aggregate (appeals are only consumed as counts).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ClaimTotals {
    pub total: u64,
    pub approved: u64,
}

/// Denormalized user reference for report labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub last_name: String,
}
