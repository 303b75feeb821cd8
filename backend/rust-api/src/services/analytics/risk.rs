//! Students whose latest exam attempt is below the at-risk threshold.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::report::RiskStudent;
use crate::models::{TestSession, UserRef};
use crate::utils::grouping::group_by;
use crate::utils::stats::round2;

use super::AT_RISK_SCORE;

pub(crate) fn detect(
    exam_sessions: &[&TestSession],
    users: &HashMap<String, UserRef>,
) -> Vec<RiskStudent> {
    let scored: Vec<&TestSession> = exam_sessions
        .iter()
        .copied()
        .filter(|s| s.score.is_some())
        .collect();
    let by_user = group_by(scored, |s| s.user_id.clone());

    let mut students = Vec::new();
    for (user_id, user_sessions) in &by_user {
        let Some(latest) = user_sessions.iter().max_by_key(|s| s.created_at) else {
            continue;
        };
        let score = latest.score.unwrap_or(0.0);
        if score > AT_RISK_SCORE {
            continue;
        }

        let user = users.get(user_id);
        students.push(RiskStudent {
            student_id: user_id.clone(),
            name: user.map(|u| u.name.clone()).unwrap_or_default(),
            last_name: user.map(|u| u.last_name.clone()).unwrap_or_default(),
            last_exam_score10: round2(score),
            attempts: user_sessions.len() as u64,
            last_attempt_at: latest.created_at,
        });
    }

    // Worst score first.
    students.sort_by(|a, b| {
        a.last_exam_score10
            .partial_cmp(&b.last_exam_score10)
            .unwrap_or(Ordering::Equal)
    });
    students
}
