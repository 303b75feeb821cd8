//! Attempts-to-mastery percentile and KR-20 internal consistency.

use std::collections::HashSet;

use crate::models::report::{LearningCurves, Reliability};
use crate::models::TestSession;
use crate::utils::grouping::{count_by, group_by, max_by_count};
use crate::utils::stats::{median, round2, variance};

use super::{question_attempts, MASTERY_SCORE};

pub(crate) fn estimate(
    exam_sessions: &[&TestSession],
    delta_practice_to_exam_avg_pts: f64,
) -> (LearningCurves, Reliability) {
    (
        LearningCurves {
            attempts_to_mastery_p50: attempts_to_mastery_p50(exam_sessions),
            delta_practice_to_exam_avg_pts,
        },
        Reliability {
            kr20: kr20(exam_sessions),
        },
    )
}

/// Median number of exam attempts a user needs before first reaching the
/// mastery score. Users who never reach it are excluded; `None` when nobody
/// does.
fn attempts_to_mastery_p50(exam_sessions: &[&TestSession]) -> Option<f64> {
    let by_user = group_by(exam_sessions.iter().copied(), |s| s.user_id.clone());

    let mut counts = Vec::new();
    for (_user_id, user_sessions) in &by_user {
        // Sessions arrive in chronological order from the loader.
        let mut attempts = 0u32;
        for session in user_sessions {
            attempts += 1;
            if session.score.map_or(false, |score| score >= MASTERY_SCORE) {
                counts.push(attempts as f64);
                break;
            }
        }
    }

    median(&counts)
}

/// KR-20 over the modal exam length `k`, using the `k` most-attempted
/// questions and the sample variance of each session's raw score restricted
/// to those questions. Clamped to `[0, 1]`; `None` on degenerate input.
///
/// The modal-`k` choice is a heuristic for exams of varying length; with
/// strongly bimodal lengths it is an approximation, not a guaranteed
/// psychometric result.
fn kr20(exam_sessions: &[&TestSession]) -> Option<f64> {
    let lengths = count_by(exam_sessions.iter(), |s| s.total_questions);
    let k = max_by_count(&lengths)?;
    if k <= 1 {
        return None;
    }

    let groups = question_attempts(exam_sessions);
    let mut by_attempts: Vec<(&String, usize)> = groups
        .iter()
        .map(|(question_id, attempts)| (question_id, attempts.len()))
        .collect();
    // Stable: equally-attempted questions keep first-encounter order.
    by_attempts.sort_by(|a, b| b.1.cmp(&a.1));
    let chosen: HashSet<&String> = by_attempts
        .iter()
        .take(k as usize)
        .map(|(question_id, _)| *question_id)
        .collect();
    if chosen.is_empty() {
        return None;
    }

    let sum_pq: f64 = chosen
        .iter()
        .filter_map(|question_id| groups.get(*question_id))
        .map(|attempts| {
            let correct = attempts
                .iter()
                .filter(|(_, r)| r.is_correct == Some(true))
                .count();
            let p = correct as f64 / attempts.len() as f64;
            p * (1.0 - p)
        })
        .sum();

    let restricted_scores: Vec<f64> = exam_sessions
        .iter()
        .map(|session| {
            session
                .results
                .iter()
                .filter(|r| {
                    r.is_correct == Some(true)
                        && r.question_id
                            .as_ref()
                            .map_or(false, |question_id| chosen.contains(question_id))
                })
                .count() as f64
        })
        .collect();

    let score_variance = variance(&restricted_scores);
    if score_variance == 0.0 {
        return None;
    }

    let k = k as f64;
    let coefficient = k / (k - 1.0) * (1.0 - sum_pq / score_variance);
    if coefficient.is_finite() {
        Some(round2(coefficient.clamp(0.0, 1.0)))
    } else {
        None
    }
}
