#![allow(dead_code)]

use std::collections::HashMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use diagramlab_api::models::{QuestionResult, SessionMode, TestSession, UserRef};
use diagramlab_api::services::dataset_loader::DiagramDataset;

/// Noon UTC on the n-th of March 2024. Keeping one timestamp per day makes
/// trend buckets deterministic.
pub fn day(n: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, n, 12, 0, 0).unwrap()
}

/// An answered result. Correct answers select option 0 ("Alpha"), wrong
/// answers option 1 ("Beta").
pub fn result(question_id: &str, correct: bool, time_spent_seconds: f64) -> QuestionResult {
    QuestionResult {
        question_id: Some(question_id.to_string()),
        question_title: Some(format!("Question {}", question_id)),
        order_index: 0,
        prompt_snapshot: format!("Prompt {}", question_id),
        options_snapshot: vec![
            "Alpha".to_string(),
            "Beta".to_string(),
            "Gamma".to_string(),
            "Delta".to_string(),
        ],
        correct_index_at_test: 0,
        selected_index: Some(if correct { 0 } else { 1 }),
        used_hint: false,
        time_spent_seconds,
        is_correct: Some(correct),
    }
}

/// A completed session with counts derived from its results.
pub fn session(
    id: &str,
    user_id: &str,
    mode: SessionMode,
    score: Option<f64>,
    created_at: DateTime<Utc>,
    results: Vec<QuestionResult>,
) -> TestSession {
    let correct_count = results
        .iter()
        .filter(|r| r.is_correct == Some(true))
        .count() as u32;
    let incorrect_count = results
        .iter()
        .filter(|r| r.is_correct == Some(false))
        .count() as u32;

    TestSession {
        id: id.to_string(),
        user_id: user_id.to_string(),
        diagram_id: "diagram-1".to_string(),
        mode,
        total_questions: results.len() as u32,
        correct_count,
        incorrect_count,
        score,
        created_at,
        completed_at: Some(created_at + Duration::minutes(10)),
        results,
    }
}

pub fn exam(
    id: &str,
    user_id: &str,
    score: f64,
    created_at: DateTime<Utc>,
    results: Vec<QuestionResult>,
) -> TestSession {
    session(id, user_id, SessionMode::Exam, Some(score), created_at, results)
}

pub fn learning(
    id: &str,
    user_id: &str,
    created_at: DateTime<Utc>,
    results: Vec<QuestionResult>,
) -> TestSession {
    session(id, user_id, SessionMode::Learning, None, created_at, results)
}

pub fn user(id: &str, name: &str, last_name: &str) -> (String, UserRef) {
    (
        id.to_string(),
        UserRef {
            id: id.to_string(),
            name: name.to_string(),
            last_name: last_name.to_string(),
        },
    )
}

/// Dataset with sessions only; callers fill in claims/ratings/users when a
/// scenario needs them. Sessions must already be in chronological order,
/// matching the loader contract.
pub fn dataset(sessions: Vec<TestSession>) -> DiagramDataset {
    DiagramDataset {
        sessions,
        claims: HashMap::new(),
        ratings: HashMap::new(),
        users: HashMap::new(),
    }
}
