//! Merge freshly fetched filter options into the panel.
//!
//! The trigger type marks where the recompute started: every filter at or
//! above the trigger's precedence is rebuilt from the response, everything
//! below it is left untouched. Selections survive a rebuild only when the
//! selected option id still exists in the new option set.

use std::collections::{BTreeMap, HashSet};

use tracing::warn;

use flexdash_types::{Filter, FilterItem, FilterType};

use super::FilterPanel;
use crate::api::models::ApiFilter;

/// Rebuild `panel`'s filters at and above `trigger` from `response_filters`.
pub fn merge_filters(panel: &mut FilterPanel, response_filters: &[ApiFilter], trigger: FilterType) {
    let previous = selected_ids_by_type(panel);
    panel.remove_filters_from(trigger);

    for api_filter in response_filters {
        let Some(filter_type) = FilterType::from_token(&api_filter.filter_type) else {
            warn!(token = %api_filter.filter_type, "skipping unknown filter type in response");
            continue;
        };
        if filter_type == FilterType::Initial || filter_type.rank() < trigger.rank() {
            continue;
        }

        let mut filter = Filter {
            filter_type,
            name: api_filter.name.clone(),
            node_type: api_filter.node_type.clone(),
            items: api_filter
                .items
                .iter()
                .map(|item| FilterItem {
                    id: item.id.clone(),
                    value: item.value.clone(),
                    selected: item.selected,
                })
                .collect(),
        };

        // Carry a prior selection over only while its option id survives.
        if let Some(old_ids) = previous.get(&filter_type) {
            let survives = filter.items.iter().any(|i| old_ids.contains(&i.id));
            if survives {
                for item in &mut filter.items {
                    item.selected = old_ids.contains(&item.id);
                }
            }
        }

        panel.set_filter(filter);
    }
}

fn selected_ids_by_type(panel: &FilterPanel) -> BTreeMap<FilterType, HashSet<String>> {
    panel
        .all_filters()
        .into_iter()
        .map(|f| {
            let ids = f
                .selected_items()
                .into_iter()
                .map(|i| i.id.clone())
                .collect();
            (f.filter_type, ids)
        })
        .collect()
}
