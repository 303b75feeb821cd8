//! Exam score histogram and per-student speed-vs-accuracy scatter.

use std::collections::HashMap;

use crate::models::report::{HistogramBucket, ScatterPoint};
use crate::models::{SessionMode, TestSession, UserRef};
use crate::utils::grouping::group_by;
use crate::utils::stats::{mean, median, round1, round2};

/// 10 fixed-width buckets, `"0-1"` through `"9-10"`. Scores are clamped to
/// `[0, 9]` before flooring, so a perfect 10 lands in the top bucket.
pub(crate) fn histogram(exam_sessions: &[&TestSession]) -> Vec<HistogramBucket> {
    let mut counts = [0u64; 10];
    for session in exam_sessions {
        if let Some(score) = session.score {
            let bucket = score.clamp(0.0, 9.0).floor() as usize;
            counts[bucket] += 1;
        }
    }

    counts
        .iter()
        .enumerate()
        .map(|(i, count)| HistogramBucket {
            label: format!("{}-{}", i, i + 1),
            count: *count,
        })
        .collect()
}

/// One point per user with either a learning-accuracy or an exam-time
/// signal. Exam times are pooled across the user's sessions before taking
/// the median.
pub(crate) fn scatter(
    sessions: &[&TestSession],
    users: &HashMap<String, UserRef>,
) -> Vec<ScatterPoint> {
    let by_user = group_by(sessions.iter().copied(), |s| s.user_id.clone());

    let mut points = Vec::new();
    for (user_id, user_sessions) in by_user {
        let learning_accuracies: Vec<f64> = user_sessions
            .iter()
            .filter(|s| s.mode == SessionMode::Learning)
            .map(|s| s.accuracy_pct())
            .collect();
        let exam_times: Vec<f64> = user_sessions
            .iter()
            .filter(|s| s.mode == SessionMode::Exam)
            .flat_map(|s| s.results.iter())
            .map(|r| r.time_spent_seconds)
            .collect();

        if learning_accuracies.is_empty() && exam_times.is_empty() {
            continue;
        }

        let name = users
            .get(&user_id)
            .map(|u| format!("{} {}", u.name, u.last_name))
            .unwrap_or_else(|| user_id.clone());

        points.push(ScatterPoint {
            student_id: user_id,
            name,
            accuracy_pct: round1(mean(&learning_accuracies)),
            time_sec_per_question: round2(median(&exam_times).unwrap_or(0.0)),
        });
    }

    points
}
