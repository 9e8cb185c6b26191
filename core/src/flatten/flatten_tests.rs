use flexdash_types::{CellValue, RosterKto1Value, TableColumn};

use super::kto1::{location_columns, location_values, student_values};
use super::{location_roster_table, student_roster_table};
use crate::api::models::{
    DomainScore, LocationEntry, PerformanceLevel, RosterEntryKto1, StudentEntry, StudentName,
};

fn level(id: i64, count: i64, percent: f64) -> PerformanceLevel {
    PerformanceLevel {
        id,
        description: format!("Level {id}"),
        number_of_students: count,
        percent,
    }
}

fn domain(id: i64, name: &str, levels: Vec<PerformanceLevel>) -> DomainScore {
    DomainScore {
        id,
        name: name.to_string(),
        description: format!("{name} description"),
        performance_levels: levels,
    }
}

fn location(id: i64, name: &str, domains: Vec<DomainScore>) -> LocationEntry {
    LocationEntry {
        id,
        name: name.to_string(),
        average_score: 200.0,
        npr_average_score: 50.0,
        domain_scores: domains,
    }
}

fn student(id: i64, first: &str, last: &str, domains: Vec<DomainScore>) -> StudentEntry {
    StudentEntry {
        id,
        external_id: format!("EXT-{id}"),
        name: StudentName {
            first_name: first.to_string(),
            last_name: last.to_string(),
        },
        test_score: 195.0,
        npr: 40.0,
        domain_scores: domains,
    }
}

// --- Location Roster ---

#[test]
fn test_ragged_locations_flatten_to_a_rectangle() {
    let wide = location(
        1,
        "Lincoln",
        vec![
            domain(7, "Algebra", vec![level(1, 3, 30.0), level(2, 7, 70.0)]),
            domain(8, "Geometry", vec![level(1, 5, 50.0), level(2, 5, 50.0)]),
            domain(9, "Data", vec![level(1, 10, 100.0)]),
        ],
    );
    let narrow = location(2, "Adams", vec![domain(8, "Geometry", vec![level(1, 2, 20.0), level(2, 8, 80.0)])]);

    let table = location_roster_table(&[wide, narrow], "building", "/app", None);

    assert_eq!(table.roster_type, "compare");
    assert_eq!(table.roster_level, "building");
    // Schema comes from the widest entity: 3 scalar + 3 domain groups.
    assert_eq!(table.columns.len(), 6);
    // Both rows carry the full cell set.
    let keys: Vec<Vec<&String>> = table.values.iter().map(|r| r.cells.keys().collect()).collect();
    assert_eq!(keys[0], keys[1]);

    // Adams reported Geometry, so those cells carry its counts.
    let adams = &table.values[1];
    assert_eq!(adams.cells["DOM_8_num_1"], CellValue::Count(2));
    assert_eq!(adams.cells["DOM_8_per_2"], CellValue::Percent(80.0));
    // Adams lacks Algebra and Data, so those cells are zero-filled.
    assert_eq!(adams.cells["DOM_7_num_1"], CellValue::Count(0));
    assert_eq!(adams.cells["DOM_9_per_1"], CellValue::Percent(0.0));
}

#[test]
fn test_location_rows_link_to_drill_down() {
    let table = location_roster_table(&[location(21, "Lincoln", vec![])], "building", "/app", None);
    assert_eq!(
        table.values[0].link,
        "/app/api/Dashboard/DrillDownLocations?id=21&name=Lincoln&type=building"
    );
    match &table.columns[0] {
        TableColumn::Scalar { title, .. } => assert_eq!(title, "Building Comparison"),
        other => panic!("unexpected column {other:?}"),
    }
}

#[test]
fn test_location_domains_match_by_name_not_id() {
    // Same domain under a different id on the second entity still matches.
    let a = location(1, "Lincoln", vec![domain(7, "Algebra", vec![level(1, 3, 30.0)])]);
    let b = location(2, "Adams", vec![domain(99, "Algebra", vec![level(1, 6, 60.0)])]);

    let table = location_roster_table(&[a, b], "building", "/app", None);
    assert_eq!(table.values[1].cells["DOM_7_num_1"], CellValue::Count(6));
}

// --- Student Roster ---

#[test]
fn test_student_cells_use_the_level_id_and_sentinels() {
    let scored = student(
        1,
        "Jane",
        "Doe",
        vec![
            // Level 2 holds exactly this student.
            domain(7, "Algebra", vec![level(1, 0, 0.0), level(2, 1, 100.0)]),
            // Domain present but no level holds the student.
            domain(8, "Geometry", vec![level(1, 0, 0.0)]),
        ],
    );
    let missing = student(2, "John", "Roe", vec![domain(7, "Algebra", vec![level(1, 1, 100.0)])]);

    let table = student_roster_table(&[scored, missing], None);

    assert_eq!(table.roster_type, "students");
    assert_eq!(table.roster_level, "students");
    let jane = &table.values[0];
    assert_eq!(jane.node_name, "Doe, Jane");
    assert_eq!(jane.node_type, "STUDENT");
    assert_eq!(jane.cells["DOM_7_score"], CellValue::Text("2".into()));
    assert_eq!(jane.cells["DOM_8_score"], CellValue::Text("0".into()));

    // Roe lacks Geometry entirely.
    let roe = &table.values[1];
    assert_eq!(roe.cells["DOM_7_score"], CellValue::Text("1".into()));
    assert_eq!(roe.cells["DOM_8_score"], CellValue::Text("*".into()));
}

#[test]
fn test_student_domains_match_by_id() {
    let a = student(1, "Jane", "Doe", vec![domain(7, "Algebra", vec![level(2, 1, 100.0)])]);
    // Same name, different id: must NOT match the schema domain.
    let b = student(2, "John", "Roe", vec![domain(70, "Algebra", vec![level(3, 1, 100.0)])]);

    let table = student_roster_table(&[a, b], None);
    assert_eq!(table.values[1].cells["DOM_7_score"], CellValue::Text("*".into()));
}

#[test]
fn test_empty_roster_flattens_to_scalar_columns_only() {
    let table = student_roster_table(&[], None);
    assert_eq!(table.columns.len(), 3);
    assert!(table.values.is_empty());
}

// --- KTo1 ---

#[test]
fn test_kto1_location_columns_cover_the_five_stages() {
    let columns = location_columns("class");
    assert_eq!(columns.len(), 6);
    match &columns[1] {
        TableColumn::Scalar { title, field, .. } => {
            assert_eq!(title, "Pre-Emerging");
            assert_eq!(field, "PE0");
        }
        other => panic!("unexpected column {other:?}"),
    }
}

#[test]
fn test_kto1_rows_serialize_under_the_grid_field_codes() {
    let entry = RosterEntryKto1 {
        id: 5,
        name: "Doe, Jane".into(),
        external_student_id: "EXT-5".into(),
        level: String::new(),
        pld_stage: "Emerging".into(),
        pld_level: Some(2),
        pld_stage_num: 2,
        pre_emerging: 0,
        emerging: 0,
        beginning: 0,
        transitioning: 0,
        independent: 0,
    };
    let values = student_values(&[entry.clone()]);
    let json = serde_json::to_value(&values[0]).unwrap();
    assert_eq!(json["PLDS0"], "Emerging");
    assert_eq!(json["PLDL0"], 2);

    let location_entry = RosterEntryKto1 {
        level: "class".into(),
        transitioning: 4,
        ..entry
    };
    let values = location_values(&[location_entry], "class", "/app");
    let json = serde_json::to_value(&values[0]).unwrap();
    assert_eq!(json["T0"], 4);
    match &values[0] {
        RosterKto1Value::Location(row) => assert!(row.link.contains("DrillDownLocations")),
        other => panic!("unexpected value {other:?}"),
    }
}
