//! Top-line scalar KPIs.

use crate::models::report::Kpis;
use crate::models::{SessionMode, TestSession};
use crate::utils::grouping::group_by;
use crate::utils::stats::{mean, median, pct_num, round1, round2};

use super::{AT_RISK_SCORE, MASTERY_SCORE};

pub(crate) fn compute(sessions: &[&TestSession], error_concentration_top5_pct: f64) -> Kpis {
    let exam: Vec<&TestSession> = sessions
        .iter()
        .copied()
        .filter(|s| s.mode == SessionMode::Exam)
        .collect();
    let learning: Vec<&TestSession> = sessions
        .iter()
        .copied()
        .filter(|s| s.mode == SessionMode::Learning)
        .collect();

    let exam_scores: Vec<f64> = exam.iter().filter_map(|s| s.score).collect();
    let exam_score_avg10 = round2(mean(&exam_scores));

    // Per-session average, not pooled across results.
    let learning_accuracies: Vec<f64> = learning.iter().map(|s| s.accuracy_pct()).collect();
    let learning_accuracy_pct = round1(mean(&learning_accuracies));

    let mastery_rate_pct = pct_num(
        exam_scores.iter().filter(|s| **s >= MASTERY_SCORE).count() as f64,
        exam_scores.len() as f64,
    );
    let at_risk_rate_pct = pct_num(
        exam_scores.iter().filter(|s| **s <= AT_RISK_SCORE).count() as f64,
        exam_scores.len() as f64,
    );

    let exam_times: Vec<f64> = exam
        .iter()
        .flat_map(|s| s.results.iter())
        .map(|r| r.time_spent_seconds)
        .collect();
    let median_time_per_question_exam_sec = round2(median(&exam_times).unwrap_or(0.0));

    let learning_results_total: usize = learning.iter().map(|s| s.results.len()).sum();
    let hints_used: usize = learning
        .iter()
        .flat_map(|s| s.results.iter())
        .filter(|r| r.used_hint)
        .count();
    // Denominator floored to 1 so an empty learning set yields 0, not NaN.
    let hint_usage_pct = pct_num(hints_used as f64, learning_results_total.max(1) as f64);

    Kpis {
        exam_score_avg10,
        learning_accuracy_pct,
        mastery_rate_pct,
        at_risk_rate_pct,
        practice_to_exam_delta_pts: practice_to_exam_delta(sessions),
        median_time_per_question_exam_sec,
        hint_usage_pct,
        error_concentration_top5_pct,
    }
}

/// Average per-user gap between exam performance and practice accuracy,
/// on the 10-point scale. Only users with sessions in both modes count;
/// 0 when no user qualifies.
fn practice_to_exam_delta(sessions: &[&TestSession]) -> f64 {
    let by_user = group_by(sessions.iter().copied(), |s| s.user_id.clone());

    let mut deltas = Vec::new();
    for (_user_id, user_sessions) in &by_user {
        let exam_scores: Vec<f64> = user_sessions
            .iter()
            .filter(|s| s.mode == SessionMode::Exam)
            .filter_map(|s| s.score)
            .collect();
        let learning_accuracies: Vec<f64> = user_sessions
            .iter()
            .filter(|s| s.mode == SessionMode::Learning)
            .map(|s| s.accuracy_pct())
            .collect();
        if exam_scores.is_empty() || learning_accuracies.is_empty() {
            continue;
        }
        deltas.push(mean(&exam_scores) - mean(&learning_accuracies) / 10.0);
    }

    if deltas.is_empty() {
        0.0
    } else {
        round2(mean(&deltas))
    }
}
