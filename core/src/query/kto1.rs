//! Queries for the KTo1 report family (grades 0, K and 1).
//!
//! KTo1 data hangs off `rosterCard`; stage and level arguments narrow the
//! donut and roster reads the same way band and domain arguments narrow the
//! score-based reads.

use super::{gql_escape, push_arg, scope_args};
use crate::panel::FilterPanel;

fn kto1_args(panel: &FilterPanel, stage: Option<&str>, level: Option<i64>) -> String {
    let mut args = scope_args(panel);
    push_arg(&mut args, "pldStage", stage.unwrap_or(""));
    if let Some(level) = level {
        args.push_str(&format!(", pldLevel: {level}"));
    }
    args
}

pub fn performance_scores_kto1_query(panel: &FilterPanel, user_id: i64) -> String {
    let args = scope_args(panel);
    format!(
        "query {{ user(userId: {user_id}) {{ testEvents({args}) \
         {{ testEventId rosterCard {{ performanceScoreGraph {{ subject totalCount \
         pldStages {{ pldStage pldStageNum percent studentCount }} }} }} }} }} }}",
    )
}

pub fn donuts_kto1_query(panel: &FilterPanel, stage: Option<&str>, level: Option<i64>, user_id: i64) -> String {
    let args = kto1_args(panel, stage, level);
    format!(
        "query {{ user(userId: {user_id}) {{ testEvents({args}) \
         {{ testEventId rosterCard {{ performanceLevelDonuts {{ pldStage pldLevel percent studentCount }} }} }} }} }}",
    )
}

pub fn roster_kto1_query(panel: &FilterPanel, stage: Option<&str>, level: Option<i64>, user_id: i64) -> String {
    let args = kto1_args(panel, stage, level);
    format!(
        "query {{ user(userId: {user_id}) {{ testEvents({args}) \
         {{ testEventId rosterCard {{ roster {{ rosterList {{ id name externalStudentId level \
         pldStage pldLevel pldStageNum preEmerging emerging beginning transitioning independent }} }} }} }} }} }}",
    )
}

pub fn narrative_kto1_query(panel: &FilterPanel, student_id: &str) -> String {
    let mut args = format!("userId: {}", gql_escape(student_id));
    push_arg(&mut args, "subject", &panel.subject());

    format!(
        "query {{ student({args}) {{ userId externalId name {{ firstName lastName }} \
         currentTestEvent {{ testEventId testEventName testDate subject subjectName \
         grade {{ name }} pldName pldLevel }} }} }}",
    )
}

/// Full class/student hierarchy feeding the differentiated report.
pub fn differentiated_report_kto1_query(panel: &FilterPanel, user_id: i64) -> String {
    let args = scope_args(panel);
    format!(
        "query {{ user(userId: {user_id}) {{ testEvents({args}) \
         {{ testEventId differentiatedReportKto1 {{ districtId districtName buildingId buildingName \
         classId className grade subject \
         studentList {{ studentId studentName classId className pldStage pldStageNum pldLevel }} }} }} }} }}",
    )
}

pub fn pld_descriptor_query(subject: &str, stage: &str) -> String {
    format!(
        "query {{ pldDescriptor(subject: \"{}\", pldStage: \"{}\") {{ pldDesc }} }}",
        gql_escape(subject),
        gql_escape(stage),
    )
}

pub fn pld_statement_query(subject: &str, stage: &str, level: i64) -> String {
    format!(
        "query {{ pldStatement(subject: \"{}\", pldStage: \"{}\", pldLevel: {level}) \
         {{ canStatement practiceStatement readyStatement \
         canDescription needDescription readyDescription }} }}",
        gql_escape(subject),
        gql_escape(stage),
    )
}
