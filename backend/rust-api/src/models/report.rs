//! Output shape of the diagram analytics report.
//!
//! Field names follow the public JSON contract (camelCase). Percentages are
//! rounded to 1 decimal, second/score values to 2 decimals; `None` fields
//! mean "not computable from the data in range", never an error.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub kpis: Kpis,
    pub trends: Vec<TrendPoint>,
    /// Exactly 10 buckets, `"0-1"` through `"9-10"`, in order.
    pub histogram_exam10: Vec<HistogramBucket>,
    pub scatter_speed_vs_accuracy: Vec<ScatterPoint>,
    /// At most 5 entries, worst error rate first.
    pub hotspots: Vec<Hotspot>,
    pub risk_students: Vec<RiskStudent>,
    pub item_quality: Vec<ItemQuality>,
    pub distractors: Vec<DistractorShare>,
    pub learning_curves: LearningCurves,
    pub reliability: Reliability,
    pub drift: Vec<DriftEntry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub exam_score_avg10: f64,
    pub learning_accuracy_pct: f64,
    pub mastery_rate_pct: f64,
    pub at_risk_rate_pct: f64,
    pub practice_to_exam_delta_pts: f64,
    pub median_time_per_question_exam_sec: f64,
    pub hint_usage_pct: f64,
    pub error_concentration_top5_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: String,
    pub exam_score_pct: Option<f64>,
    pub learning_accuracy_pct: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBucket {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterPoint {
    pub student_id: String,
    pub name: String,
    pub accuracy_pct: f64,
    pub time_sec_per_question: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    pub question_id: String,
    pub title: String,
    pub error_rate_pct: f64,
    pub median_time_sec: f64,
    pub common_wrong_text: Option<String>,
    pub attempts: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskStudent {
    pub student_id: String,
    pub name: String,
    pub last_name: String,
    pub last_exam_score10: f64,
    pub attempts: u64,
    pub last_attempt_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemQuality {
    pub question_id: String,
    pub title: String,
    pub p_correct_pct: f64,
    pub discr_point_biserial: Option<f64>,
    pub median_time_sec: f64,
    pub attempts: u64,
    pub claim_rate_pct: f64,
    pub claim_approval_rate_pct: Option<f64>,
    pub avg_rating: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistractorShare {
    pub question_id: String,
    pub option_text: String,
    pub chosen_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chosen_pct_low_quartile: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chosen_pct_high_quartile: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningCurves {
    pub attempts_to_mastery_p50: Option<f64>,
    pub delta_practice_to_exam_avg_pts: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reliability {
    pub kr20: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftEntry {
    pub question_id: String,
    pub title: String,
    pub delta_p_correct_pct: f64,
    pub delta_median_time_sec: Option<f64>,
}
