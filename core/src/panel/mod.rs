//! The filter panel: aggregate root of drill-down state.
//!
//! Pure storage plus mutators. Recompute orchestration (which filters to
//! re-query after a change) lives in the dashboard service; the panel only
//! enforces its own invariants: at most one filter per type, breadcrumbs
//! forming a root-to-node path, selections staying inside the root scope.

pub mod drill;
pub mod materializer;
#[cfg(test)]
mod panel_tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use flexdash_types::{Filter, FilterType, LocationNode};

/// Grade values that select the KTo1 report variant.
pub const KTO1_GRADES: [&str; 4] = ["0", "K", "k", "1"];

/// Drill-down state for one session. Persisted by the caller between
/// requests; replaced wholesale (never merged) when the cogat toggle flips,
/// because cogat and non-cogat query shapes are incompatible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterPanel {
    /// The scope the user is authorized to see; fixed at panel creation.
    pub root_nodes: Vec<LocationNode>,
    /// Resolved filters, keyed (and iterated) in precedence order.
    filters: BTreeMap<FilterType, Filter>,
    /// Drill path from root to the current location; empty means "at root".
    pub bread_crumbs: Vec<LocationNode>,
    /// Drives which dependent filters are recomputed on the next read.
    pub last_updated_filter_type: FilterType,
    pub is_cogat: bool,
    /// Last query text, retained for diagnostic echo only.
    pub graphql_query: Option<String>,
}

impl FilterPanel {
    pub fn new(root_nodes: Vec<LocationNode>) -> Self {
        Self {
            root_nodes,
            filters: BTreeMap::new(),
            bread_crumbs: Vec::new(),
            last_updated_filter_type: FilterType::Initial,
            is_cogat: false,
            graphql_query: None,
        }
    }

    // --- Filter Access ---

    pub fn filter(&self, filter_type: FilterType) -> Option<&Filter> {
        self.filters.get(&filter_type)
    }

    /// All resolved filters in precedence order.
    pub fn all_filters(&self) -> Vec<Filter> {
        self.filters.values().cloned().collect()
    }

    /// Replace (or insert) the filter for its type.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filters.insert(filter.filter_type, filter);
    }

    /// Drop every filter with precedence >= `filter_type`. Lower-precedence
    /// filters are never touched here.
    pub fn remove_filters_from(&mut self, filter_type: FilterType) {
        self.filters.retain(|ft, _| ft.rank() < filter_type.rank());
    }

    /// Comma-joined selected values of a filter (empty when unresolved).
    pub fn selected_values_of(&self, filter_type: FilterType) -> String {
        self.filter(filter_type)
            .map(|f| f.selected_values_string())
            .unwrap_or_default()
    }

    /// Comma-joined selected ids of a filter (empty when unresolved).
    pub fn selected_ids_of(&self, filter_type: FilterType) -> String {
        self.filter(filter_type)
            .map(|f| f.selected_ids_string())
            .unwrap_or_default()
    }

    pub fn subject(&self) -> String {
        self.selected_values_of(FilterType::Subject)
    }

    /// Mark the items whose id (or value) appears in `values` as the new
    /// selection for `filter_type`; everything else is de-selected.
    pub fn change_selection(&mut self, filter_type: FilterType, values: &[String]) {
        if let Some(filter) = self.filters.get_mut(&filter_type) {
            for item in &mut filter.items {
                item.selected = values.contains(&item.id) || values.contains(&item.value);
            }
        }
    }

    // --- Derived State ---

    /// Node type of the current child-location filter options.
    pub fn child_location_node_type(&self) -> Option<&str> {
        self.filter(FilterType::ChildLocations)
            .and_then(|f| f.node_type.as_deref())
    }

    /// True when the current child-location level is "student", which flips
    /// the roster to its per-student shape downstream.
    pub fn is_child_location_student(&self) -> bool {
        self.child_location_node_type()
            .is_some_and(|t| t.eq_ignore_ascii_case("student"))
    }

    /// Selected grade is one of the KTo1 grades.
    pub fn is_kto1(&self) -> bool {
        let grade = self.selected_values_of(FilterType::Grade);
        KTO1_GRADES.contains(&grade.as_str())
    }

    pub fn root_location_level(&self) -> &str {
        self.root_nodes
            .first()
            .map(|n| n.node_type.as_str())
            .unwrap_or("")
    }

    /// KTo1 grade and a root scope narrow enough for the report.
    pub fn has_differentiated_kto1_report(&self) -> bool {
        let level = self.root_location_level().to_ascii_lowercase();
        self.is_kto1() && (level == "building" || level == "class")
    }

    // --- Breadcrumbs ---

    /// The node the next query scopes to: the deepest breadcrumb, or the
    /// first root node when at root.
    pub fn current_node(&self) -> Option<&LocationNode> {
        self.bread_crumbs.last().or_else(|| self.root_nodes.first())
    }

    /// Synthesize the root breadcrumb from the ParentLocations filter
    /// (falling back to the root scope when the filter is unresolved).
    pub fn root_bread_crumb(&self) -> Option<LocationNode> {
        if let Some(filter) = self.filter(FilterType::ParentLocations) {
            let node_type = filter
                .node_type
                .clone()
                .unwrap_or_else(|| self.root_location_level().to_string());
            if let Some(item) = filter.first_selected() {
                if let Ok(node_id) = item.id.parse::<i64>() {
                    return Some(LocationNode { node_id, node_type });
                }
            }
        }
        self.root_nodes.first().cloned()
    }

    /// Reset the breadcrumb trail to just the root crumb.
    pub fn set_root_bread_crumb(&mut self) {
        self.bread_crumbs = self.root_bread_crumb().into_iter().collect();
    }
}
