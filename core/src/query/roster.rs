//! Queries for the drilled-down rosters: location, student and cogat.

use super::{push_arg, scope_args};
use crate::panel::FilterPanel;
use crate::query::scores::ScoreArgs;

/// Aggregate roster over the child locations of the current node.
pub fn location_roster_query(panel: &FilterPanel, user_id: i64) -> String {
    let args = scope_args(panel);
    format!(
        "query {{ user(userId: {user_id}) {{ testEvents({args}) \
         {{ testEventId locationRoster {{ locations {{ id name averageScore nprAverageScore \
         domainScores {{ id name performanceLevels {{ id description numberOfStudents percent }} }} }} }} }} }} }}",
    )
}

/// Per-student roster, optionally narrowed to one band or domain level.
pub fn student_roster_query(panel: &FilterPanel, score_args: ScoreArgs<'_>, user_id: i64) -> String {
    let mut args = scope_args(panel);
    push_arg(&mut args, "performanceBand", score_args.performance_band.unwrap_or(""));
    push_arg(&mut args, "domainId", score_args.domain_id.unwrap_or(""));
    push_arg(&mut args, "domainLevel", score_args.domain_level.unwrap_or(""));

    format!(
        "query {{ user(userId: {user_id}) {{ testEvents({args}) \
         {{ testEventId studentRoster {{ students {{ id externalId name {{ firstName lastName }} \
         testScore npr domainScores {{ id name performanceLevels {{ id description numberOfStudents percent }} }} }} }} }} }} }}",
    )
}

/// Narrowing arguments for the cogat roster; all optional, fixed order.
#[derive(Debug, Clone, Copy, Default)]
pub struct CogatRosterArgs<'a> {
    pub band: Option<i64>,
    pub domain_id: Option<i64>,
    pub domain_level: Option<i64>,
    pub ability: Option<i64>,
    pub score: Option<&'a str>,
    pub content_name: Option<&'a str>,
    /// Per-student rows instead of per-location rows.
    pub students: bool,
}

pub fn cogat_roster_query(panel: &FilterPanel, roster_args: CogatRosterArgs<'_>, user_id: i64) -> String {
    let mut args = scope_args(panel);
    if let Some(band) = roster_args.band {
        args.push_str(&format!(", performanceBand: {band}"));
    }
    if let Some(domain_id) = roster_args.domain_id {
        args.push_str(&format!(", domainId: {domain_id}"));
    }
    if let Some(level) = roster_args.domain_level {
        args.push_str(&format!(", domainLevel: {level}"));
    }
    if let Some(ability) = roster_args.ability {
        args.push_str(&format!(", ability: {ability}"));
    }
    push_arg(&mut args, "score", roster_args.score.unwrap_or(""));
    push_arg(&mut args, "contentName", roster_args.content_name.unwrap_or(""));
    if roster_args.students {
        args.push_str(", students: true");
    }

    format!(
        "query {{ user(userId: {user_id}) {{ testEvents({args}, cogat: true) \
         {{ testEventId cogatRoster {{ records {{ id name npr testScore \
         verbal quantitative nonVerbal compVQ compVN compQN compVQN }} }} }} }} }}",
    )
}
