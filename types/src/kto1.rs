//! View models for the Kindergarten-through-Grade-1 report variant.
//!
//! KTo1 swaps the standard-score surfaces for PLD (Performance Level
//! Descriptor) stages and levels: five named stages, each with up to three
//! sub-levels. The differentiated report arranges a roster into the full
//! district → building → stage → level → class tree.

use serde::Serialize;

use crate::table::TableColumn;

// ─────────────────────────────────────────────────────────────────────────────
// Performance Scores + Donut Cards
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceScoresKto1Model {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_ql_query: Option<String>,
    pub is_longitudinal: bool,
    pub is_cogat: bool,
    pub subject: String,
    pub total_count: i64,
    pub pld_values: Vec<PldStageScore>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PldStageScore {
    pub percent: f64,
    pub pld_stage: String,
    pub pld_stage_num: i64,
    pub student_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DonutCardsKto1Model {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_ql_query: Option<String>,
    pub cards: Vec<DonutCardKto1>,
}

/// Per-stage donut card; one ring segment per level.
#[derive(Debug, Clone, Serialize)]
pub struct DonutCardKto1 {
    pub pld_stage: String,
    pub card_levels: Vec<DonutCardLevelKto1>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DonutCardLevelKto1 {
    pub student_count: i64,
    pub percent: f64,
    pub pld_level: i64,
}

// ─────────────────────────────────────────────────────────────────────────────
// KTo1 Roster
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RosterKto1Model {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_ql_query: Option<String>,
    pub roster_type: String,
    pub roster_level: String,
    pub columns: Vec<TableColumn>,
    pub values: Vec<RosterKto1Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_level_descriptor: Option<PerformanceLevelDescriptorView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_level_statement: Option<PerformanceLevelStatementView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RosterKto1Value {
    Student(RosterKto1Student),
    Location(RosterKto1Location),
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterKto1Student {
    pub id: i64,
    pub name: String,
    pub external_id: String,
    pub link: String,
    /// Serialized under the grid field codes the column schema references.
    #[serde(rename = "PLDS0")]
    pub pld_stage: String,
    #[serde(rename = "PLDL0")]
    pub pld_level: Option<i64>,
    pub pld_stage_num: i64,
}

/// Location comparison row: student counts per stage.
#[derive(Debug, Clone, Serialize)]
pub struct RosterKto1Location {
    pub id: i64,
    pub name: String,
    pub level: String,
    pub link: String,
    #[serde(rename = "PE0")]
    pub pre_emerging: i64,
    #[serde(rename = "E0")]
    pub emerging: i64,
    #[serde(rename = "B0")]
    pub beginning: i64,
    #[serde(rename = "T0")]
    pub transitioning: i64,
    #[serde(rename = "I0")]
    pub independent: i64,
}

/// Descriptor text for a PLD stage.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceLevelDescriptorView {
    pub pld_desc: String,
}

/// Statement text for a (stage, level) pair.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceLevelStatementView {
    pub can_statement: String,
    pub need_practice_statement: String,
    pub ready_statement: String,
    pub can_descriptor: String,
    pub need_practice_descriptor: String,
    pub ready_descriptor: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// KTo1 Profile Narrative
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ProfileNarrativeKto1ViewModel {
    pub assessment_name: String,
    pub district: String,
    pub school: String,
    pub class: String,
    pub grade: String,
    pub subject_name: String,
    pub test_date: String,
    pub student_id: String,
    pub student_external_id: String,
    pub student_first_name: String,
    pub student_last_name: String,
    pub pld_name: Option<String>,
    pub pld_level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_level_descriptor: Option<PerformanceLevelDescriptorView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_level_statement: Option<PerformanceLevelStatementView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_ql_query: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Differentiated Report
// ─────────────────────────────────────────────────────────────────────────────

/// Raw hierarchy records echoed to the frontend for the hierarchy picker.
#[derive(Debug, Clone, Serialize)]
pub struct DifferentiatedReportHierarchyViewModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_ql_query: Option<String>,
    pub values: Vec<DifferentiatedHierarchyRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DifferentiatedHierarchyRecord {
    pub district_id: Option<i64>,
    pub district_name: Option<String>,
    pub building_id: Option<i64>,
    pub building_name: Option<String>,
    pub class_id: Option<i64>,
    pub class_name: Option<String>,
    pub grade: Option<String>,
    pub subject: Option<String>,
    pub students: Vec<DifferentiatedHierarchyStudent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DifferentiatedHierarchyStudent {
    pub student_id: i64,
    pub student_name: String,
}

/// The assembled four-level aggregation tree.
#[derive(Debug, Clone, Serialize)]
pub struct DifferentiatedReportKto1ViewModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_ql_query: Option<String>,
    pub values: DifferentiatedReportValues,
}

#[derive(Debug, Clone, Serialize)]
pub struct DifferentiatedReportValues {
    pub district_id: i64,
    pub district_name: String,
    pub grade: String,
    pub subject: String,
    pub test_event_name: String,
    pub test_event_date: String,
    pub buildings: Vec<DifferentiatedPldBuilding>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DifferentiatedPldBuilding {
    pub building_id: i64,
    pub building_name: String,
    pub pld_stages: Vec<DifferentiatedPldStage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DifferentiatedPldStage {
    pub pld_stage_num: i64,
    pub pld_stage_name: String,
    pub pld_stage_descriptor_text: String,
    pub pld_levels: Vec<DifferentiatedPldLevel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DifferentiatedPldLevel {
    pub pld_level_num: i64,
    pub pld_level_name: String,
    pub can_statement: String,
    pub need_practice_statement: String,
    pub ready_statement: String,
    pub can_descriptor: String,
    pub need_practice_descriptor: String,
    pub ready_descriptor: String,
    pub classes: Vec<DifferentiatedPldClass>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DifferentiatedPldClass {
    pub class_id: String,
    pub class_name: String,
    pub student_names: Vec<String>,
}
