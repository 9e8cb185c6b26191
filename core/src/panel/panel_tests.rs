use flexdash_types::{Filter, FilterItem, FilterType, LocationNode};

use super::materializer::merge_filters;
use super::FilterPanel;
use crate::api::models::{ApiFilter, ApiFilterItem};

fn filter(filter_type: FilterType, node_type: Option<&str>, items: &[(&str, &str, bool)]) -> Filter {
    Filter {
        filter_type,
        name: filter_type.token().to_string(),
        node_type: node_type.map(str::to_string),
        items: items
            .iter()
            .map(|(id, value, selected)| FilterItem::new(*id, *value, *selected))
            .collect(),
    }
}

fn api_filter(token: &str, node_type: Option<&str>, items: &[(&str, &str, bool)]) -> ApiFilter {
    ApiFilter {
        filter_type: token.to_string(),
        name: token.to_string(),
        node_type: node_type.map(str::to_string),
        items: items
            .iter()
            .map(|(id, value, selected)| ApiFilterItem {
                id: (*id).to_string(),
                value: (*value).to_string(),
                selected: *selected,
            })
            .collect(),
    }
}

fn district_panel() -> FilterPanel {
    let mut panel = FilterPanel::new(vec![LocationNode::new(10, "district")]);
    panel.set_filter(filter(FilterType::Subject, None, &[("1", "Math", true)]));
    panel.set_filter(filter(
        FilterType::ParentLocations,
        Some("district"),
        &[("10", "Cedar Rapids CSD", true)],
    ));
    panel.set_filter(filter(
        FilterType::ChildLocations,
        Some("building"),
        &[("21", "Lincoln Elementary", false)],
    ));
    panel.set_filter(filter(FilterType::Grade, None, &[("3", "3", true), ("4", "4", false)]));
    panel.set_filter(filter(FilterType::TestEvent, None, &[("900", "Fall 2025", true)]));
    panel
}

// --- Precedence And Merging ---

#[test]
fn test_remove_filters_from_drops_only_at_and_above_the_trigger() {
    let mut panel = district_panel();
    panel.remove_filters_from(FilterType::Grade);

    assert!(panel.filter(FilterType::Subject).is_some());
    assert!(panel.filter(FilterType::ParentLocations).is_some());
    assert!(panel.filter(FilterType::ChildLocations).is_some());
    assert!(panel.filter(FilterType::Grade).is_none());
    assert!(panel.filter(FilterType::TestEvent).is_none());
}

#[test]
fn test_merge_preserves_upstream_filters_and_surviving_selection() {
    let mut panel = district_panel();
    let response = vec![
        api_filter("grade", None, &[("3", "3", false), ("5", "5", true)]),
        api_filter("testEvent", None, &[("901", "Spring 2026", true)]),
    ];
    merge_filters(&mut panel, &response, FilterType::Grade);

    // Upstream untouched.
    assert_eq!(panel.subject(), "Math");
    assert_eq!(panel.selected_ids_of(FilterType::ParentLocations), "10");
    // Grade keeps the prior selection because option id 3 survived.
    assert_eq!(panel.selected_values_of(FilterType::Grade), "3");
    // TestEvent was rebuilt; its old selection id is gone, response wins.
    assert_eq!(panel.selected_ids_of(FilterType::TestEvent), "901");
}

#[test]
fn test_merge_drops_selection_whose_option_vanished() {
    let mut panel = district_panel();
    let response = vec![api_filter("grade", None, &[("5", "5", true), ("6", "6", false)])];
    merge_filters(&mut panel, &response, FilterType::Grade);

    assert_eq!(panel.selected_values_of(FilterType::Grade), "5");
}

#[test]
fn test_merge_skips_unknown_tokens_and_lower_precedence() {
    let mut panel = district_panel();
    let response = vec![
        api_filter("sparkle", None, &[("1", "x", true)]),
        api_filter("subject", None, &[("2", "Reading", true)]),
        api_filter("testEvent", None, &[("902", "Winter 2026", true)]),
    ];
    merge_filters(&mut panel, &response, FilterType::TestEvent);

    // Subject sits below the trigger and must not be overwritten.
    assert_eq!(panel.subject(), "Math");
    assert_eq!(panel.selected_ids_of(FilterType::TestEvent), "902");
}

#[test]
fn test_merge_with_initial_trigger_rebuilds_everything() {
    let mut panel = district_panel();
    let response = vec![
        api_filter("subject", None, &[("2", "Reading", true)]),
        api_filter("parentLocations", Some("district"), &[("10", "Cedar Rapids CSD", true)]),
    ];
    merge_filters(&mut panel, &response, FilterType::Initial);

    assert!(panel.filter(FilterType::Grade).is_none());
    assert!(panel.filter(FilterType::TestEvent).is_none());
    // Subject's old id "1" vanished, so the response selection stands.
    assert_eq!(panel.subject(), "Reading");
}

// --- Derived State ---

#[test]
fn test_kto1_grades_select_the_variant() {
    for grade in ["0", "K", "k", "1"] {
        let mut panel = FilterPanel::new(vec![LocationNode::new(1, "building")]);
        panel.set_filter(filter(FilterType::Grade, None, &[(grade, grade, true)]));
        assert!(panel.is_kto1(), "grade {grade} should be kto1");
        assert!(panel.has_differentiated_kto1_report());
    }

    let mut panel = FilterPanel::new(vec![LocationNode::new(1, "building")]);
    panel.set_filter(filter(FilterType::Grade, None, &[("3", "3", true)]));
    assert!(!panel.is_kto1());
    assert!(!panel.has_differentiated_kto1_report());
}

#[test]
fn test_differentiated_report_requires_building_or_class_root() {
    let mut panel = FilterPanel::new(vec![LocationNode::new(10, "district")]);
    panel.set_filter(filter(FilterType::Grade, None, &[("K", "K", true)]));
    assert!(panel.is_kto1());
    assert!(!panel.has_differentiated_kto1_report());
}

#[test]
fn test_child_location_student_detection() {
    let mut panel = district_panel();
    assert!(!panel.is_child_location_student());

    panel.set_filter(filter(
        FilterType::ChildLocations,
        Some("STUDENT"),
        &[("7", "Doe, Jane", false)],
    ));
    assert!(panel.is_child_location_student());
}

// --- Breadcrumbs ---

#[test]
fn test_root_bread_crumb_prefers_parent_locations_filter() {
    let panel = district_panel();
    let crumb = panel.root_bread_crumb().unwrap();
    assert_eq!(crumb.node_id, 10);
    assert_eq!(crumb.node_type, "district");
}

#[test]
fn test_root_bread_crumb_falls_back_to_root_scope() {
    let panel = FilterPanel::new(vec![LocationNode::new(44, "building")]);
    let crumb = panel.root_bread_crumb().unwrap();
    assert_eq!(crumb.node_id, 44);
    assert_eq!(crumb.node_type, "building");
}

#[test]
fn test_drill_down_walks_one_level_at_a_time() {
    let mut panel = FilterPanel::new(vec![LocationNode::new(10, "district")]);
    panel.drill_down(LocationNode::new(10, "district")).unwrap();
    panel.drill_down(LocationNode::new(21, "building")).unwrap();
    panel.drill_down(LocationNode::new(35, "class")).unwrap();

    assert_eq!(panel.bread_crumbs.len(), 3);
    assert_eq!(panel.current_node().unwrap().node_id, 35);
}

#[test]
fn test_drill_down_rejects_level_skips_and_foreign_roots() {
    let mut panel = FilterPanel::new(vec![LocationNode::new(10, "district")]);

    // Not a root node.
    assert!(panel.drill_down(LocationNode::new(99, "district")).is_err());
    assert!(panel.bread_crumbs.is_empty());

    panel.drill_down(LocationNode::new(10, "district")).unwrap();
    // District -> class skips the building level.
    assert!(panel.drill_down(LocationNode::new(35, "class")).is_err());
    assert_eq!(panel.bread_crumbs.len(), 1);
}

#[test]
fn test_drill_up_truncates_to_the_target_inclusive() {
    let mut panel = FilterPanel::new(vec![LocationNode::new(10, "district")]);
    panel.drill_down(LocationNode::new(10, "district")).unwrap();
    panel.drill_down(LocationNode::new(21, "building")).unwrap();
    panel.drill_down(LocationNode::new(35, "class")).unwrap();

    panel.drill_up(&LocationNode::new(21, "building")).unwrap();
    assert_eq!(panel.bread_crumbs.len(), 2);
    assert_eq!(panel.current_node().unwrap().node_id, 21);

    assert!(panel.drill_up(&LocationNode::new(77, "building")).is_err());
    assert_eq!(panel.bread_crumbs.len(), 2);
}

#[test]
fn test_panel_round_trips_through_json() {
    let mut panel = district_panel();
    panel.last_updated_filter_type = FilterType::Grade;
    panel.set_root_bread_crumb();

    let json = serde_json::to_value(&panel).unwrap();
    let restored: FilterPanel = serde_json::from_value(json).unwrap();

    assert_eq!(restored.subject(), "Math");
    assert_eq!(restored.last_updated_filter_type, FilterType::Grade);
    assert_eq!(restored.bread_crumbs.len(), 1);
    assert_eq!(restored.bread_crumbs[0].node_id, 10);
}
