//! Grouping rules for the differentiated KTo1 report.
//!
//! The report arranges a flat record list into building → stage → level →
//! class → students. Stages run 1..=5 and levels 1..=3, but not every
//! (stage, level) pair exists: the outer stages collapse some levels, so
//! eligibility is a fixed table keyed by stage name.

use std::collections::HashSet;

use flexdash_types::DifferentiatedPldClass;

use crate::api::models::{DifferentiatedRecord, DifferentiatedStudent};

pub const PLD_STAGE_NUMS: std::ops::RangeInclusive<i64> = 1..=5;
pub const PLD_LEVEL_NUMS: std::ops::RangeInclusive<i64> = 1..=3;

/// Whether a (stage, level) pair can exist. Pre-emerging and transitioning
/// stop at level 2; independent has only level 1.
pub fn level_allowed(stage_name: &str, level: i64) -> bool {
    match stage_name.to_ascii_lowercase().as_str() {
        "pre-emerging" | "transitioning" => level < 3,
        "independent" => level < 2,
        _ => true,
    }
}

/// The record whose district, building and grade are all present; its
/// identity anchors the whole report. `None` means the response is
/// malformed and the report cannot be built.
pub fn anchor_record(records: &[DifferentiatedRecord]) -> Option<&DifferentiatedRecord> {
    records
        .iter()
        .find(|r| r.district_id.is_some() && r.building_id.is_some() && r.grade.is_some())
}

/// Parse the request's comma-separated student id list; malformed entries
/// are dropped rather than failing the request.
pub fn parse_student_ids(student_ids: &str) -> HashSet<i64> {
    student_ids
        .split(',')
        .filter_map(|id| id.trim().parse::<i64>().ok())
        .collect()
}

/// Students of `record` that the caller asked for and that sit in the given
/// (stage, level) cell.
pub fn students_in_cell<'a>(
    record: &'a DifferentiatedRecord,
    requested: &HashSet<i64>,
    stage: i64,
    level: i64,
) -> Vec<&'a DifferentiatedStudent> {
    record
        .student_list
        .iter()
        .filter(|s| requested.contains(&s.student_id))
        .filter(|s| s.pld_stage_num == stage && s.pld_level == level)
        .collect()
}

/// Group one cell's students into classes, in first-seen order. Students
/// without their own class identity inherit the record's; classes with no
/// students are omitted entirely.
pub fn classes_for(students: &[&DifferentiatedStudent], record: &DifferentiatedRecord) -> Vec<DifferentiatedPldClass> {
    let mut classes: Vec<DifferentiatedPldClass> = Vec::new();
    for student in students {
        let class_id = if student.class_id != 0 {
            student.class_id.to_string()
        } else {
            record.class_id.map(|id| id.to_string()).unwrap_or_default()
        };
        let class_name = student
            .class_name
            .clone()
            .or_else(|| record.class_name.clone())
            .unwrap_or_default();

        match classes.iter_mut().find(|c| c.class_id == class_id) {
            Some(class) => class.student_names.push(student.student_name.clone()),
            None => classes.push(DifferentiatedPldClass {
                class_id,
                class_name,
                student_names: vec![student.student_name.clone()],
            }),
        }
    }
    classes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: i64, name: &str, class_id: i64, stage: i64, level: i64) -> DifferentiatedStudent {
        DifferentiatedStudent {
            student_id: id,
            student_name: name.to_string(),
            class_id,
            class_name: (class_id != 0).then(|| format!("Class {class_id}")),
            pld_stage: String::new(),
            pld_stage_num: stage,
            pld_level: level,
        }
    }

    fn record(students: Vec<DifferentiatedStudent>) -> DifferentiatedRecord {
        DifferentiatedRecord {
            district_id: Some(10),
            district_name: Some("Cedar Rapids CSD".into()),
            building_id: Some(21),
            building_name: Some("Lincoln".into()),
            class_id: Some(35),
            class_name: Some("Room 101".into()),
            grade: Some("K".into()),
            subject: Some("Math".into()),
            student_list: students,
        }
    }

    #[test]
    fn test_level_eligibility_table() {
        for level in 1..=3 {
            assert_eq!(level_allowed("Pre-Emerging", level), level < 3);
            assert_eq!(level_allowed("transitioning", level), level < 3);
            assert_eq!(level_allowed("Independent", level), level < 2);
            assert!(level_allowed("Emerging", level));
            assert!(level_allowed("Beginning", level));
        }
    }

    #[test]
    fn test_anchor_requires_all_three_identity_fields() {
        let mut incomplete = record(vec![]);
        incomplete.grade = None;
        let complete = record(vec![]);

        let records = vec![incomplete, complete];
        let anchor = anchor_record(&records).unwrap();
        assert_eq!(anchor.grade.as_deref(), Some("K"));

        let mut broken = record(vec![]);
        broken.building_id = None;
        assert!(anchor_record(&[broken]).is_none());
    }

    #[test]
    fn test_students_filtered_by_request_and_cell() {
        let rec = record(vec![
            student(1, "Doe, Jane", 35, 2, 1),
            student(2, "Roe, John", 35, 2, 1),
            student(3, "Poe, Ann", 35, 2, 2),
        ]);
        let requested = parse_student_ids("1, 3, nonsense");

        let cell = students_in_cell(&rec, &requested, 2, 1);
        assert_eq!(cell.len(), 1);
        assert_eq!(cell[0].student_name, "Doe, Jane");
    }

    #[test]
    fn test_classes_group_in_first_seen_order_and_inherit_identity() {
        let rec = record(vec![]);
        let a = student(1, "Doe, Jane", 40, 2, 1);
        let b = student(2, "Roe, John", 0, 2, 1);
        let c = student(3, "Poe, Ann", 40, 2, 1);

        let classes = classes_for(&[&a, &b, &c], &rec);
        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0].class_id, "40");
        assert_eq!(classes[0].student_names, vec!["Doe, Jane", "Poe, Ann"]);
        // Classless student inherits the record's class identity.
        assert_eq!(classes[1].class_id, "35");
        assert_eq!(classes[1].class_name, "Room 101");
    }

    #[test]
    fn test_empty_cell_yields_no_classes() {
        let rec = record(vec![student(1, "Doe, Jane", 35, 4, 1)]);
        let requested = parse_student_ids("1");
        let cell = students_in_cell(&rec, &requested, 2, 1);
        assert!(classes_for(&cell, &rec).is_empty());
    }
}
