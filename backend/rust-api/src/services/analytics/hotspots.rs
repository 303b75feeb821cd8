//! Error hotspot ranking and top-5 error concentration.

use std::cmp::Ordering;

use crate::models::report::Hotspot;
use crate::models::TestSession;
use crate::utils::grouping::{count_by, max_by_count};
use crate::utils::stats::{median, pct_num, round2};

use super::{question_attempts, question_label};

/// Ranks questions by error rate across all modes and returns the top 5,
/// plus the share of all incorrect answers those 5 account for.
pub(crate) fn detect(sessions: &[&TestSession]) -> (Vec<Hotspot>, f64) {
    let groups = question_attempts(sessions);

    let mut rows: Vec<(Hotspot, u64)> = Vec::new();
    for (question_id, attempts) in &groups {
        let incorrect: Vec<_> = attempts
            .iter()
            .filter(|(_, r)| r.is_correct == Some(false))
            .collect();
        let times: Vec<f64> = attempts.iter().map(|(_, r)| r.time_spent_seconds).collect();

        let wrong_choices = count_by(
            incorrect
                .iter()
                .filter_map(|(_, r)| r.selected_text().map(str::to_string)),
            |text| text.clone(),
        );

        rows.push((
            Hotspot {
                question_id: question_id.clone(),
                title: question_label(attempts),
                error_rate_pct: pct_num(incorrect.len() as f64, attempts.len() as f64),
                median_time_sec: round2(median(&times).unwrap_or(0.0)),
                common_wrong_text: max_by_count(&wrong_choices),
                attempts: attempts.len() as u64,
            },
            incorrect.len() as u64,
        ));
    }

    let total_incorrect: u64 = rows.iter().map(|(_, incorrect)| incorrect).sum();

    // Stable sort keeps first-encounter order for equal error rates.
    rows.sort_by(|(a, _), (b, _)| {
        b.error_rate_pct
            .partial_cmp(&a.error_rate_pct)
            .unwrap_or(Ordering::Equal)
    });
    rows.truncate(5);

    let top_incorrect: u64 = rows.iter().map(|(_, incorrect)| incorrect).sum();
    let error_concentration_top5_pct = pct_num(top_incorrect as f64, total_incorrect as f64);

    let hotspots = rows.into_iter().map(|(hotspot, _)| hotspot).collect();
    (hotspots, error_concentration_top5_pct)
}
