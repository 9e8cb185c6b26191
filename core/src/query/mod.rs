//! GraphQL query-string builders, one per dashboard read.
//!
//! Builders are pure functions of the filter panel and their explicit
//! arguments, so the same panel state always yields byte-identical query
//! text. Optional arguments are appended in a fixed order and omitted
//! entirely when empty, never sent as empty strings.

pub mod filters;
pub mod kto1;
pub mod narrative;
pub mod roster;
pub mod scores;

use flexdash_types::FilterType;

use crate::panel::FilterPanel;

/// Escape a value for embedding inside a double-quoted GraphQL string.
pub(crate) fn gql_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// The common scope arguments every data query carries: the current node
/// plus whichever of subject, grade and test event are resolved.
pub(crate) fn scope_args(panel: &FilterPanel) -> String {
    let (node_id, node_type) = panel
        .current_node()
        .map(|n| (n.node_id, n.node_type.clone()))
        .unwrap_or((0, String::new()));

    let mut args = format!("nodeId: {node_id}, nodeType: \"{}\"", gql_escape(&node_type));
    push_arg(&mut args, "subject", &panel.subject());
    push_arg(&mut args, "grade", &panel.selected_values_of(FilterType::Grade));
    push_arg(&mut args, "testEventId", &panel.selected_ids_of(FilterType::TestEvent));
    args
}

/// Append `, name: "value"` when the value is non-empty.
pub(crate) fn push_arg(args: &mut String, name: &str, value: &str) {
    if !value.is_empty() {
        args.push_str(&format!(", {name}: \"{}\"", gql_escape(value)));
    }
}
