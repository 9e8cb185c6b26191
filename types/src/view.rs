//! View models for the dashboard's non-KTo1 report surfaces.
//!
//! These are plain structured records: all reshaping happens in
//! `flexdash-core`, the presentation layer only serializes. The optional
//! `graph_ql_query` diagnostic field is populated outside production and
//! suppressed (None) in production mode.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::filters::Filter;
use crate::location::BreadCrumb;
use crate::table::TableColumn;

/// Top-level page flags resolved once per dashboard load.
#[derive(Debug, Clone, Serialize)]
pub struct PageViewModel {
    pub is_adaptive: bool,
    pub is_demo: bool,
    pub is_prod: bool,
}

/// The filter panel as the frontend sees it.
#[derive(Debug, Clone, Serialize)]
pub struct FiltersViewModel {
    pub filters: Vec<Filter>,
    pub locations_bread_crumbs: Vec<BreadCrumb>,
    pub root_location_level: String,
    pub is_kto1: bool,
    pub has_differentiated_kto1_report: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_ql_query: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Scores Card
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct TestScoresModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_ql_query: Option<String>,
    pub title: String,
    pub category: String,
    pub average_standard_score: f64,
    pub national_percentile_rank: f64,
    pub url: String,
    pub is_longitudinal: bool,
    pub is_cogat: bool,
    pub values: Vec<ScoreBand>,
}

/// One quantile-range bar of the test-scores card.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreBand {
    pub caption: String,
    pub color: String,
    pub number: i64,
    pub percent: f64,
    pub range_band: String,
    pub url_params: String,
    pub range: i64,
    pub average_standard_score: f64,
    pub national_percentile_rank: f64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Domain Cards
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct DomainCardsModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_ql_query: Option<String>,
    pub cards: Vec<DomainCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DomainCard {
    pub title: String,
    pub url: String,
    pub values: Vec<DomainBand>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DomainBand {
    pub caption: String,
    pub number: i64,
    pub percent: f64,
    pub url_params: String,
    pub range: i64,
    pub range_band: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Profile Narrative
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ProfileNarrativeViewModel {
    pub reports: Vec<ProfileNarrativeReport>,
    /// Standard-score band ranges, keyed by grade name. Fetched once per
    /// grade across all requested students.
    pub ranges: BTreeMap<String, Vec<Band>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileNarrativeReport {
    pub student_id: i64,
    pub external_id: String,
    pub first_name: String,
    pub last_name: String,
    pub subject: String,
    pub subject_abbreviation: String,
    pub grade: String,
    pub domains: Vec<DomainNarrative>,
    pub test_events: Vec<NarrativeTestEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_ql_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_ql_lookup_query: Option<String>,
}

/// Narrative text for one domain. When the upstream domain score carried no
/// performance levels the entry is an explicit error placeholder instead of
/// failing the whole report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DomainNarrative {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_level_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NarrativeTestEvent {
    pub id: i64,
    pub name: String,
    pub date: String,
    pub grade: String,
    pub subject: String,
    pub standard_score: f64,
}

/// One standard-score band range for the narrative longitudinal chart.
#[derive(Debug, Clone, Serialize)]
pub struct Band {
    pub id: i64,
    pub name: String,
    pub lower: i64,
    pub upper: i64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Cogat Roster + Performance Level Matrix
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct CogatRosterModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_ql_query: Option<String>,
    pub roster_type: String,
    pub roster_level: String,
    pub columns: Vec<TableColumn>,
    pub values: Vec<CogatRosterValue>,
}

/// Fixed cogat ability-score row: verbal/quantitative/nonverbal plus the
/// four composite scores.
#[derive(Debug, Clone, Serialize)]
pub struct CogatRosterValue {
    pub node_id: i64,
    pub node_name: String,
    pub npr: Option<i64>,
    pub ss: Option<i64>,
    pub verbal: Option<i64>,
    pub quantitative: Option<i64>,
    pub non_verbal: Option<i64>,
    pub comp_vq: Option<i64>,
    pub comp_vn: Option<i64>,
    pub comp_qn: Option<i64>,
    pub comp_vqn: Option<i64>,
    pub link: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceLevelMatrixModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_ql_query: Option<String>,
    pub data_points: Vec<MatrixDataPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatrixDataPoint {
    pub ability_achievement: String,
    pub student_count: i64,
}
