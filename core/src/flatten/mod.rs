//! Response flattening: nested roster entities into rectangular tables.
//!
//! The widest entity (most domains; first wins on ties) defines the
//! canonical column schema. Every row is then projected onto that schema:
//! location rows zero-fill domains the entity lacks, student rows use the
//! `"*"` sentinel. The output is always rectangular regardless of how
//! ragged the source entities were.

pub mod kto1;
#[cfg(test)]
mod flatten_tests;

use std::collections::BTreeMap;

use flexdash_types::{CellValue, TableColumn, TableModel, TableRow};

use crate::api::models::{DomainScore, LocationEntry, StudentEntry};

/// Field name for the count cell of one domain level.
fn num_field(domain_id: i64, level_id: i64) -> String {
    format!("DOM_{domain_id}_num_{level_id}")
}

/// Field name for the percent cell of one domain level.
fn per_field(domain_id: i64, level_id: i64) -> String {
    format!("DOM_{domain_id}_per_{level_id}")
}

/// Field name for a student's score cell in one domain.
fn score_field(domain_id: i64) -> String {
    format!("DOM_{domain_id}_score")
}

/// The canonical domain set: the widest entity's domains, first on ties.
fn canonical_domains<'a, T>(entities: &'a [T], domains_of: fn(&'a T) -> &'a [DomainScore]) -> &'a [DomainScore] {
    let widest = entities.iter().map(|e| domains_of(e).len()).max().unwrap_or(0);
    entities
        .iter()
        .map(domains_of)
        .find(|d| d.len() == widest)
        .unwrap_or(&[])
}

pub(crate) fn capitalize(level: &str) -> String {
    let mut chars = level.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn drill_down_link(app_path: &str, id: i64, name: &str, node_type: &str) -> String {
    format!("{app_path}/api/Dashboard/DrillDownLocations?id={id}&name={name}&type={node_type}")
}

// ─────────────────────────────────────────────────────────────────────────────
// Location Roster
// ─────────────────────────────────────────────────────────────────────────────

/// Flatten a location roster into a rectangular comparison table.
///
/// `roster_level` is the node type of the listed child locations, which also
/// titles the first column ("Building Comparison" and so on).
pub fn location_roster_table(
    locations: &[LocationEntry],
    roster_level: &str,
    app_path: &str,
    graph_ql_query: Option<String>,
) -> TableModel {
    let canonical = canonical_domains(locations, |l: &LocationEntry| l.domain_scores.as_slice());

    let mut columns = vec![
        TableColumn::scalar(
            format!("{} Comparison", capitalize(roster_level)),
            format!("{} Comparison", capitalize(roster_level)),
            "node_name",
        ),
        TableColumn::scalar("SS", "Standard Score", "SS"),
        TableColumn::scalar("NPR", "National Percentile Rank", "NPR"),
    ];
    for domain in canonical {
        let fields_num = domain.performance_levels.iter().map(|l| num_field(domain.id, l.id)).collect();
        let fields_per = domain.performance_levels.iter().map(|l| per_field(domain.id, l.id)).collect();
        columns.push(TableColumn::location_domain(
            domain.name.clone(),
            domain.description.clone(),
            fields_num,
            fields_per,
        ));
    }

    let values = locations
        .iter()
        .map(|location| {
            let mut cells = BTreeMap::new();
            for domain in canonical {
                // Location entities are matched to the schema by domain name.
                let own = location.domain_scores.iter().find(|d| d.name == domain.name);
                for level in &domain.performance_levels {
                    let (count, percent) = own
                        .and_then(|d| d.performance_levels.iter().find(|l| l.id == level.id))
                        .map(|l| (l.number_of_students, l.percent))
                        .unwrap_or((0, 0.0));
                    cells.insert(num_field(domain.id, level.id), CellValue::Count(count));
                    cells.insert(per_field(domain.id, level.id), CellValue::Percent(percent));
                }
            }
            TableRow {
                node_name: location.name.clone(),
                node_id: location.id,
                external_id: None,
                node_type: roster_level.to_string(),
                link: drill_down_link(app_path, location.id, &location.name, roster_level),
                ss: location.average_score,
                npr: location.npr_average_score,
                cells,
            }
        })
        .collect();

    TableModel {
        graph_ql_query,
        roster_type: "compare".to_string(),
        roster_level: roster_level.to_string(),
        columns,
        values,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Student Roster
// ─────────────────────────────────────────────────────────────────────────────

/// Flatten a student roster. Domain cells carry the performance-level id the
/// student landed in ("0" when the level holds no student, "*" when the
/// entity lacks the domain entirely).
pub fn student_roster_table(
    students: &[StudentEntry],
    graph_ql_query: Option<String>,
) -> TableModel {
    let canonical = canonical_domains(students, |s: &StudentEntry| s.domain_scores.as_slice());

    let mut columns = vec![
        TableColumn::scalar("Student Name", "Student Name", "node_name"),
        TableColumn::scalar("SS", "Standard Score", "SS"),
        TableColumn::scalar("NPR", "National Percentile Rank", "NPR"),
    ];
    for domain in canonical {
        columns.push(TableColumn::student_domain(
            domain.name.clone(),
            domain.description.clone(),
            vec![score_field(domain.id)],
        ));
    }

    let values = students
        .iter()
        .map(|student| {
            let mut cells = BTreeMap::new();
            for domain in canonical {
                // Student entities are matched to the schema by domain id.
                let cell = student
                    .domain_scores
                    .iter()
                    .find(|d| d.id == domain.id)
                    .map(|own| {
                        own.performance_levels
                            .iter()
                            .find(|l| l.number_of_students == 1)
                            .map(|l| l.id.to_string())
                            .unwrap_or_else(|| "0".to_string())
                    })
                    .unwrap_or_else(|| "*".to_string());
                cells.insert(score_field(domain.id), CellValue::Text(cell));
            }
            TableRow {
                node_name: format!("{}, {}", student.name.last_name, student.name.first_name),
                node_id: student.id,
                external_id: Some(student.external_id.clone()),
                node_type: "STUDENT".to_string(),
                link: "#".to_string(),
                ss: student.test_score,
                npr: student.npr,
                cells,
            }
        })
        .collect();

    TableModel {
        graph_ql_query,
        roster_type: "students".to_string(),
        roster_level: "students".to_string(),
        columns,
        values,
    }
}
