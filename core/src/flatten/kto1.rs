//! Flattening for the KTo1 roster: fixed PLD column sets instead of the
//! canonical-schema projection the score-based rosters need.

use flexdash_types::{RosterKto1Location, RosterKto1Student, RosterKto1Value, TableColumn};

use super::{capitalize, drill_down_link};
use crate::api::models::RosterEntryKto1;

/// The five PLD stages in display order, with the count field each maps to.
pub const PLD_STAGES: [(&str, &str); 5] = [
    ("Pre-Emerging", "PE0"),
    ("Emerging", "E0"),
    ("Beginning", "B0"),
    ("Transitioning", "T0"),
    ("Independent", "I0"),
];

/// Columns for the per-student KTo1 roster: name, stage, level.
pub fn student_columns() -> Vec<TableColumn> {
    vec![
        TableColumn::scalar("Student Name", "Student Name", "name"),
        TableColumn::scalar("PLD", "Performance Level Descriptor", "PLDS0"),
        TableColumn::scalar("PLD Level", "Performance Level", "PLDL0"),
    ]
}

/// Columns for the location comparison KTo1 roster: name plus one count
/// column per stage.
pub fn location_columns(roster_level: &str) -> Vec<TableColumn> {
    let mut columns = vec![TableColumn::scalar(
        format!("{} Comparison", capitalize(roster_level)),
        format!("{} Comparison", capitalize(roster_level)),
        "name",
    )];
    for (stage, field) in PLD_STAGES {
        columns.push(TableColumn::scalar(stage, stage, field));
    }
    columns
}

pub fn student_values(roster: &[RosterEntryKto1]) -> Vec<RosterKto1Value> {
    roster
        .iter()
        .map(|entry| {
            RosterKto1Value::Student(RosterKto1Student {
                id: entry.id,
                name: entry.name.clone(),
                external_id: entry.external_student_id.clone(),
                link: "#".to_string(),
                pld_stage: entry.pld_stage.clone(),
                pld_level: entry.pld_level,
                pld_stage_num: entry.pld_stage_num,
            })
        })
        .collect()
}

pub fn location_values(roster: &[RosterEntryKto1], roster_level: &str, app_path: &str) -> Vec<RosterKto1Value> {
    roster
        .iter()
        .map(|entry| {
            RosterKto1Value::Location(RosterKto1Location {
                id: entry.id,
                name: entry.name.clone(),
                level: entry.level.clone(),
                link: drill_down_link(app_path, entry.id, &entry.name, roster_level),
                pre_emerging: entry.pre_emerging,
                emerging: entry.emerging,
                beginning: entry.beginning,
                transitioning: entry.transitioning,
                independent: entry.independent,
            })
        })
        .collect()
}
