//! Typed response models for the assessment API.
//!
//! These structs define the deserialization contract with the upstream
//! GraphQL endpoints; field names follow the wire's camelCase. Collections
//! default to empty so partially-populated responses (each query selects a
//! different slice of the user tree) deserialize without ceremony.

use serde::Deserialize;

// ─────────────────────────────────────────────────────────────────────────────
// User Endpoint
// ─────────────────────────────────────────────────────────────────────────────

/// Root of every user-endpoint response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResult {
    /// Filter option sets, present on filter queries only.
    #[serde(default)]
    pub filters: Vec<ApiFilter>,
    #[serde(default)]
    pub test_events: Vec<TestEvent>,
}

/// One filter option set as the API reports it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFilter {
    pub filter_type: String,
    pub name: String,
    #[serde(default)]
    pub node_type: Option<String>,
    #[serde(default)]
    pub items: Vec<ApiFilterItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFilterItem {
    pub id: String,
    pub value: String,
    #[serde(default)]
    pub selected: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestEvent {
    #[serde(default)]
    pub test_event_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub is_longitudinal: bool,
    #[serde(default)]
    pub is_cogat: bool,
    #[serde(default)]
    pub test_score: Option<TestScore>,
    #[serde(default)]
    pub domain_scores: Vec<DomainScore>,
    #[serde(default)]
    pub location_roster: Option<LocationRoster>,
    #[serde(default)]
    pub student_roster: Option<StudentRoster>,
    #[serde(default)]
    pub roster_card: Option<RosterCardKto1>,
    #[serde(default)]
    pub cogat_roster: Option<CogatRoster>,
    #[serde(default)]
    pub performance_level_matrix: Option<PerformanceLevelMatrix>,
    #[serde(default)]
    pub differentiated_report_kto1: Vec<DifferentiatedRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestScore {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub standard_score: f64,
    #[serde(default)]
    pub scores: Vec<ScoreEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub performance_bands: Vec<PerformanceBand>,
}

/// One quantile band of a test score.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceBand {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub number_of_students: i64,
    #[serde(default)]
    pub percent: f64,
    #[serde(default)]
    pub lower: i64,
    #[serde(default)]
    pub upper: i64,
    #[serde(default)]
    pub standard_score: f64,
    #[serde(default)]
    pub npr: f64,
}

/// Per-domain score with its performance-level breakdown. A present domain
/// with an empty level list is the "missing dimension data" case handled
/// per-item by the narrative path.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainScore {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub performance_levels: Vec<PerformanceLevel>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceLevel {
    pub id: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub number_of_students: i64,
    #[serde(default)]
    pub percent: f64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Rosters
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRoster {
    #[serde(default)]
    pub locations: Vec<LocationEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationEntry {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub average_score: f64,
    #[serde(default)]
    pub npr_average_score: f64,
    #[serde(default)]
    pub domain_scores: Vec<DomainScore>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRoster {
    #[serde(default)]
    pub students: Vec<StudentEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentEntry {
    pub id: i64,
    #[serde(default)]
    pub external_id: String,
    #[serde(default)]
    pub name: StudentName,
    #[serde(default)]
    pub test_score: f64,
    #[serde(default)]
    pub npr: f64,
    #[serde(default)]
    pub domain_scores: Vec<DomainScore>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentName {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// KTo1 Roster Card
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterCardKto1 {
    #[serde(default)]
    pub performance_score_graph: Option<PerformanceScoreGraph>,
    #[serde(default)]
    pub performance_level_donuts: Vec<PerformanceLevelDonut>,
    #[serde(default)]
    pub roster: Option<RosterKto1>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceScoreGraph {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub total_count: i64,
    #[serde(default)]
    pub pld_stages: Vec<PldStageCount>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PldStageCount {
    #[serde(default)]
    pub pld_stage: String,
    #[serde(default)]
    pub pld_stage_num: i64,
    #[serde(default)]
    pub percent: f64,
    #[serde(default)]
    pub student_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceLevelDonut {
    #[serde(default)]
    pub pld_stage: String,
    #[serde(default)]
    pub pld_level: i64,
    #[serde(default)]
    pub percent: f64,
    #[serde(default)]
    pub student_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterKto1 {
    #[serde(default)]
    pub roster_list: Vec<RosterEntryKto1>,
}

/// One KTo1 roster row. Student rows populate the pld fields; location rows
/// populate the per-stage counts.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntryKto1 {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub external_student_id: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub pld_stage: String,
    #[serde(default)]
    pub pld_level: Option<i64>,
    #[serde(default)]
    pub pld_stage_num: i64,
    #[serde(default)]
    pub pre_emerging: i64,
    #[serde(default)]
    pub emerging: i64,
    #[serde(default)]
    pub beginning: i64,
    #[serde(default)]
    pub transitioning: i64,
    #[serde(default)]
    pub independent: i64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Cogat Roster + Performance Level Matrix
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CogatRoster {
    #[serde(default)]
    pub records: Vec<CogatRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CogatRecord {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub npr: Option<i64>,
    #[serde(default)]
    pub test_score: Option<i64>,
    #[serde(default)]
    pub verbal: Option<i64>,
    #[serde(default)]
    pub quantitative: Option<i64>,
    #[serde(default)]
    pub non_verbal: Option<i64>,
    #[serde(default, rename = "compVQ")]
    pub comp_vq: Option<i64>,
    #[serde(default, rename = "compVN")]
    pub comp_vn: Option<i64>,
    #[serde(default, rename = "compQN")]
    pub comp_qn: Option<i64>,
    #[serde(default, rename = "compVQN")]
    pub comp_vqn: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceLevelMatrix {
    #[serde(default)]
    pub data_points: Vec<MatrixPoint>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixPoint {
    #[serde(default)]
    pub ability_achievement: String,
    #[serde(default, rename = "studCount")]
    pub stud_count: i64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Differentiated Report
// ─────────────────────────────────────────────────────────────────────────────

/// One flat record of the differentiated-report hierarchy. The anchor fields
/// (district, building, grade) may each be null on malformed rows.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifferentiatedRecord {
    #[serde(default)]
    pub district_id: Option<i64>,
    #[serde(default)]
    pub district_name: Option<String>,
    #[serde(default)]
    pub building_id: Option<i64>,
    #[serde(default)]
    pub building_name: Option<String>,
    #[serde(default)]
    pub class_id: Option<i64>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub student_list: Vec<DifferentiatedStudent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifferentiatedStudent {
    pub student_id: i64,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub class_id: i64,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub pld_stage: String,
    #[serde(default)]
    pub pld_stage_num: i64,
    #[serde(default)]
    pub pld_level: i64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Student Endpoint
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResult {
    pub user_id: i64,
    #[serde(default)]
    pub external_id: String,
    #[serde(default)]
    pub name: StudentName,
    pub current_test_event: StudentTestEvent,
    #[serde(default)]
    pub test_events: Vec<StudentTestEvent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentTestEvent {
    #[serde(default)]
    pub test_event_id: i64,
    #[serde(default)]
    pub test_event_name: String,
    #[serde(default)]
    pub test_date: String,
    #[serde(default)]
    pub grade: GradeRef,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub subject_name: String,
    #[serde(default)]
    pub test_score: Option<TestScore>,
    #[serde(default)]
    pub domain_scores: Vec<DomainScore>,
    #[serde(default)]
    pub pld_name: Option<String>,
    #[serde(default)]
    pub pld_level: Option<i64>,
    #[serde(default)]
    pub district: Option<DistrictRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeRef {
    #[serde(default)]
    pub name: String,
}

/// District subtree on the student endpoint: district → school → class.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictRef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub child_locations: Vec<DistrictRef>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Lookup Endpoints
// ─────────────────────────────────────────────────────────────────────────────

/// Narrative lookup: domain and performance-level text for a subject/grade.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectGradeDomains {
    #[serde(default)]
    pub subject: SubjectRef,
    #[serde(default)]
    pub domains: Vec<NarrativeDomain>,
    #[serde(default)]
    pub performance_levels: Vec<NarrativeLevel>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRef {
    #[serde(default)]
    pub subject_abbreviation: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeDomain {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeLevel {
    pub id: i64,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PldDescriptor {
    #[serde(default)]
    pub pld_desc: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PldStatement {
    #[serde(default)]
    pub can_statement: String,
    #[serde(default)]
    pub practice_statement: String,
    #[serde(default)]
    pub ready_statement: String,
    #[serde(default)]
    pub can_description: String,
    #[serde(default)]
    pub need_description: String,
    #[serde(default)]
    pub ready_description: String,
}

/// Standard-score band range for the narrative longitudinal chart.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandRange {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lower: i64,
    #[serde(default)]
    pub upper: i64,
}
