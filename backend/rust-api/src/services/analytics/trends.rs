//! Per-day accuracy and score series.

use crate::models::report::TrendPoint;
use crate::models::{SessionMode, TestSession};
use crate::utils::grouping::{day_key, group_by};
use crate::utils::stats::{mean, round1};

pub(crate) fn build(sessions: &[&TestSession]) -> Vec<TrendPoint> {
    let by_day = group_by(sessions.iter().copied(), |s| day_key(&s.created_at));

    let mut points: Vec<TrendPoint> = by_day
        .into_iter()
        .map(|(date, day_sessions)| {
            let exam_pcts: Vec<f64> = day_sessions
                .iter()
                .filter(|s| s.mode == SessionMode::Exam)
                .filter_map(|s| s.score)
                .map(|score| score * 10.0)
                .collect();
            let learning_pcts: Vec<f64> = day_sessions
                .iter()
                .filter(|s| s.mode == SessionMode::Learning)
                .map(|s| s.accuracy_pct())
                .collect();

            TrendPoint {
                date,
                exam_score_pct: if exam_pcts.is_empty() {
                    None
                } else {
                    Some(round1(mean(&exam_pcts)))
                },
                learning_accuracy_pct: if learning_pcts.is_empty() {
                    None
                } else {
                    Some(round1(mean(&learning_pcts)))
                },
            }
        })
        .collect();

    points.sort_by(|a, b| a.date.cmp(&b.date));
    points
}
