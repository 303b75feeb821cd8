//! Diagram analytics engine.
//!
//! `build_report` is a pure function over a [`DiagramDataset`] snapshot: it
//! performs no I/O, holds no state between invocations, and raises no domain
//! errors — degenerate inputs produce zeros, empty lists, or `None`.

use indexmap::IndexMap;

use crate::models::report::AnalyticsReport;
use crate::models::{QuestionResult, SessionMode, TestSession};
use crate::services::dataset_loader::DiagramDataset;
use crate::utils::grouping::group_by;

pub mod distractors;
pub mod distribution;
pub mod drift;
pub mod hotspots;
pub mod item_quality;
pub mod kpis;
pub mod learning_curve;
pub mod risk;
pub mod trends;

/// Exam score at or above which a session counts as mastery.
pub const MASTERY_SCORE: f64 = 8.0;
/// Exam score at or below which a student is considered at risk.
pub const AT_RISK_SCORE: f64 = 5.0;

/// An answered question instance together with its owning session.
pub(crate) type Attempt<'a> = (&'a TestSession, &'a QuestionResult);

/// Composes the full analytics report from one dataset snapshot.
pub fn build_report(dataset: &DiagramDataset) -> AnalyticsReport {
    // In-progress sessions are excluded from every aggregate.
    let sessions: Vec<&TestSession> = dataset
        .sessions
        .iter()
        .filter(|s| s.completed_at.is_some())
        .collect();
    let exam_sessions: Vec<&TestSession> = sessions
        .iter()
        .copied()
        .filter(|s| s.mode == SessionMode::Exam)
        .collect();

    let (hotspots, error_concentration_top5_pct) = hotspots::detect(&sessions);
    let kpis = kpis::compute(&sessions, error_concentration_top5_pct);
    let (learning_curves, reliability) =
        learning_curve::estimate(&exam_sessions, kpis.practice_to_exam_delta_pts);

    AnalyticsReport {
        trends: trends::build(&sessions),
        histogram_exam10: distribution::histogram(&exam_sessions),
        scatter_speed_vs_accuracy: distribution::scatter(&sessions, &dataset.users),
        hotspots,
        risk_students: risk::detect(&exam_sessions, &dataset.users),
        item_quality: item_quality::analyze(&exam_sessions, &dataset.claims, &dataset.ratings),
        distractors: distractors::analyze(&sessions),
        learning_curves,
        reliability,
        drift: drift::detect(&sessions),
        kpis,
    }
}

/// Groups answered results by question id, first-encounter order.
///
/// Results whose source question was deleted have no stable key and are
/// skipped here; they still count toward session-level KPIs.
pub(crate) fn question_attempts<'a>(
    sessions: &[&'a TestSession],
) -> IndexMap<String, Vec<Attempt<'a>>> {
    let answered = sessions.iter().flat_map(|session| {
        session
            .results
            .iter()
            .filter(|result| result.question_id.is_some() && result.is_correct.is_some())
            .map(move |result| (*session, result))
    });
    group_by(answered, |(_, result)| {
        result.question_id.clone().unwrap_or_default()
    })
}

/// Display label for a question group.
pub(crate) fn question_label(attempts: &[Attempt<'_>]) -> String {
    attempts
        .first()
        .map(|(_, result)| result.title().to_string())
        .unwrap_or_default()
}
