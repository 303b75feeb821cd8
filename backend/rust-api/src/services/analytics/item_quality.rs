//! Per-item difficulty, discrimination, and feedback signals.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::report::ItemQuality;
use crate::models::{ClaimTotals, TestSession};
use crate::utils::stats::{mean, median, pct_num, round2, stdev};

use super::{question_attempts, question_label, Attempt};

/// Analyzes every question with at least one exam attempt, hardest items
/// (lowest p-correct) first.
pub(crate) fn analyze(
    exam_sessions: &[&TestSession],
    claims: &HashMap<String, ClaimTotals>,
    ratings: &HashMap<String, f64>,
) -> Vec<ItemQuality> {
    let groups = question_attempts(exam_sessions);

    let mut items = Vec::new();
    for (question_id, attempts) in &groups {
        let total = attempts.len();
        let correct = attempts
            .iter()
            .filter(|(_, r)| r.is_correct == Some(true))
            .count();
        let times: Vec<f64> = attempts.iter().map(|(_, r)| r.time_spent_seconds).collect();

        let claim_totals = claims.get(question_id).copied().unwrap_or_default();
        let claim_approval_rate_pct = if claim_totals.total == 0 {
            None
        } else {
            Some(pct_num(
                claim_totals.approved as f64,
                claim_totals.total as f64,
            ))
        };

        items.push(ItemQuality {
            question_id: question_id.clone(),
            title: question_label(attempts),
            p_correct_pct: pct_num(correct as f64, total as f64),
            discr_point_biserial: point_biserial(attempts),
            median_time_sec: round2(median(&times).unwrap_or(0.0)),
            attempts: total as u64,
            claim_rate_pct: pct_num(claim_totals.total as f64, total as f64),
            claim_approval_rate_pct,
            avg_rating: ratings.get(question_id).copied().map(round2),
        });
    }

    items.sort_by(|a, b| {
        a.p_correct_pct
            .partial_cmp(&b.p_correct_pct)
            .unwrap_or(Ordering::Equal)
    });
    items
}

/// Point-biserial correlation between item correctness and the session's
/// total correct count excluding this item (the ability proxy). `None` when
/// either side of the split is empty or the proxy has zero spread.
fn point_biserial(attempts: &[Attempt<'_>]) -> Option<f64> {
    let mut ability = Vec::with_capacity(attempts.len());
    let mut ability_correct = Vec::new();
    let mut ability_incorrect = Vec::new();

    for (session, result) in attempts {
        let correct = result.is_correct == Some(true);
        let x = session.correct_count as f64 - if correct { 1.0 } else { 0.0 };
        ability.push(x);
        if correct {
            ability_correct.push(x);
        } else {
            ability_incorrect.push(x);
        }
    }

    if ability_correct.is_empty() || ability_incorrect.is_empty() {
        return None;
    }
    let sd = stdev(&ability);
    if sd == 0.0 {
        return None;
    }

    let p = ability_correct.len() as f64 / ability.len() as f64;
    let r = (mean(&ability_correct) - mean(&ability_incorrect)) / sd * (p * (1.0 - p)).sqrt();
    if r.is_finite() {
        Some(round2(r.clamp(-1.0, 1.0)))
    } else {
        None
    }
}
