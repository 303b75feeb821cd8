//! Temporal difficulty drift: first half of history vs second half.

use std::cmp::Ordering;

use indexmap::IndexSet;

use crate::models::report::DriftEntry;
use crate::models::TestSession;
use crate::utils::stats::{median, pct_num, round1, round2};

use super::{question_attempts, question_label, Attempt};

/// Splits the chronologically-ordered session list at `floor(n / 2)` and
/// compares per-question p-correct and median response time across halves.
pub(crate) fn detect(sessions: &[&TestSession]) -> Vec<DriftEntry> {
    let mid = sessions.len() / 2;
    let (first, second) = sessions.split_at(mid);
    let first_groups = question_attempts(first);
    let second_groups = question_attempts(second);

    let question_ids: IndexSet<&String> =
        first_groups.keys().chain(second_groups.keys()).collect();

    let mut entries = Vec::new();
    for question_id in question_ids {
        let first_attempts = first_groups.get(question_id).map(Vec::as_slice);
        let second_attempts = second_groups.get(question_id).map(Vec::as_slice);

        let first_p = first_attempts.map(p_correct_pct).unwrap_or(0.0);
        let second_p = second_attempts.map(p_correct_pct).unwrap_or(0.0);

        let first_median = first_attempts.and_then(median_time);
        let second_median = second_attempts.and_then(median_time);
        // When one half has no data, fall back to the half that does.
        let delta_median_time_sec = match (first_median, second_median) {
            (Some(first), Some(second)) => Some(round2(second - first)),
            (None, Some(second)) => Some(round2(second)),
            (Some(first), None) => Some(round2(first)),
            (None, None) => None,
        };

        let title = second_attempts
            .or(first_attempts)
            .map(question_label)
            .unwrap_or_default();

        entries.push(DriftEntry {
            question_id: question_id.clone(),
            title,
            delta_p_correct_pct: round1(second_p - first_p),
            delta_median_time_sec,
        });
    }

    entries.sort_by(|a, b| {
        b.delta_p_correct_pct
            .abs()
            .partial_cmp(&a.delta_p_correct_pct.abs())
            .unwrap_or(Ordering::Equal)
    });
    entries
}

fn p_correct_pct(attempts: &[Attempt<'_>]) -> f64 {
    let correct = attempts
        .iter()
        .filter(|(_, r)| r.is_correct == Some(true))
        .count();
    pct_num(correct as f64, attempts.len() as f64)
}

fn median_time(attempts: &[Attempt<'_>]) -> Option<f64> {
    let times: Vec<f64> = attempts.iter().map(|(_, r)| r.time_spent_seconds).collect();
    median(&times)
}
