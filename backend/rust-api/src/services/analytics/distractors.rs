//! Per-option choice shares, globally and split by performance quartile.

use indexmap::IndexMap;

use crate::models::report::DistractorShare;
use crate::models::{SessionMode, TestSession};
use crate::utils::grouping::{count_by, group_by};
use crate::utils::stats::{mean, pct_num, quantile};

use super::question_attempts;

/// Quartile membership is decided per *user* on their mean exam score:
/// low if at or below the global 25th percentile, high if at or above the
/// 75th. Shares in each band are percentages of that band's selections for
/// the question, not of the global total.
pub(crate) fn analyze(sessions: &[&TestSession]) -> Vec<DistractorShare> {
    let scored_exams: Vec<&TestSession> = sessions
        .iter()
        .copied()
        .filter(|s| s.mode == SessionMode::Exam && s.score.is_some())
        .collect();
    let exam_by_user = group_by(scored_exams, |s| s.user_id.clone());
    let user_means: IndexMap<String, f64> = exam_by_user
        .into_iter()
        .map(|(user_id, user_sessions)| {
            let scores: Vec<f64> = user_sessions.iter().filter_map(|s| s.score).collect();
            (user_id, mean(&scores))
        })
        .collect();

    let means: Vec<f64> = user_means.values().copied().collect();
    let bounds = if means.is_empty() {
        None
    } else {
        Some((quantile(&means, 0.25), quantile(&means, 0.75)))
    };
    let is_low = |user_id: &str| {
        bounds
            .and_then(|(q25, _)| user_means.get(user_id).map(|m| *m <= q25))
            .unwrap_or(false)
    };
    let is_high = |user_id: &str| {
        bounds
            .and_then(|(_, q75)| user_means.get(user_id).map(|m| *m >= q75))
            .unwrap_or(false)
    };

    let groups = question_attempts(sessions);

    let mut shares = Vec::new();
    for (question_id, attempts) in &groups {
        // (user, option text) for every selection that still resolves to a
        // snapshot option.
        let selections: Vec<(&str, String)> = attempts
            .iter()
            .filter_map(|(session, result)| {
                result
                    .selected_text()
                    .map(|text| (session.user_id.as_str(), text.to_string()))
            })
            .collect();
        if selections.is_empty() {
            continue;
        }

        let low_total = selections.iter().filter(|(user, _)| is_low(user)).count();
        let high_total = selections.iter().filter(|(user, _)| is_high(user)).count();

        let option_counts = count_by(selections.iter(), |(_, text)| text.clone());
        for (option_text, count) in option_counts {
            let low_count = selections
                .iter()
                .filter(|(user, text)| is_low(user) && *text == option_text)
                .count();
            let high_count = selections
                .iter()
                .filter(|(user, text)| is_high(user) && *text == option_text)
                .count();

            shares.push(DistractorShare {
                question_id: question_id.clone(),
                option_text,
                chosen_pct: pct_num(count as f64, selections.len() as f64),
                chosen_pct_low_quartile: (low_total > 0)
                    .then(|| pct_num(low_count as f64, low_total as f64)),
                chosen_pct_high_quartile: (high_total > 0)
                    .then(|| pct_num(high_count as f64, high_total as f64)),
            });
        }
    }

    shares
}
