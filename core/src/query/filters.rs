//! Query for the filter options at and downstream of a trigger type.

use flexdash_types::FilterType;

use super::scope_args;
use crate::panel::FilterPanel;

/// Build the filters query for everything at and above `trigger` in the
/// precedence chain. The cogat flag changes which option sets the backend
/// resolves (cogat test events carry no grade axis), so it is part of the
/// query itself.
pub fn filters_query(panel: &FilterPanel, trigger: FilterType, user_id: i64) -> String {
    let requested: Vec<&str> = trigger
        .and_downstream()
        .filter(|ft| *ft != FilterType::Initial)
        .map(FilterType::token)
        .collect();

    let mut args = scope_args(panel);
    if panel.is_cogat {
        args.push_str(", cogat: true");
    }

    format!(
        "query {{ user(userId: {user_id}) {{ filters({args}, types: [{types}]) \
         {{ filterType name nodeType items {{ id value selected }} }} }} }}",
        types = requested.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexdash_types::{Filter, FilterItem, LocationNode};

    fn panel() -> FilterPanel {
        let mut panel = FilterPanel::new(vec![LocationNode::new(10, "district")]);
        panel.set_filter(Filter {
            filter_type: FilterType::Subject,
            name: "Subject".into(),
            node_type: None,
            items: vec![FilterItem::new("1", "Math", true)],
        });
        panel
    }

    #[test]
    fn test_filters_query_requests_only_the_invalidation_set() {
        let query = filters_query(&panel(), FilterType::Grade, 42);
        assert!(query.contains("types: [grade, testEvent]"));
        assert!(!query.contains("parentLocations"));
        assert!(query.contains("user(userId: 42)"));
    }

    #[test]
    fn test_filters_query_is_deterministic() {
        let panel = panel();
        assert_eq!(
            filters_query(&panel, FilterType::Initial, 42),
            filters_query(&panel, FilterType::Initial, 42),
        );
    }

    #[test]
    fn test_cogat_panel_changes_the_query_shape() {
        let mut panel = panel();
        let plain = filters_query(&panel, FilterType::Initial, 42);
        panel.is_cogat = true;
        let cogat = filters_query(&panel, FilterType::Initial, 42);

        assert_ne!(plain, cogat);
        assert!(cogat.contains("cogat: true"));
    }
}
