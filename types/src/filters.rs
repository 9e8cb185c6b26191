//! Filter kinds and their precedence order.
//!
//! Filters form a strict precedence chain: changing a filter invalidates
//! every filter downstream of it and nothing upstream. The order lives in an
//! explicit table (`FilterType::PRECEDENCE`) rather than in enum declaration
//! order, so the chain cannot drift when variants are added.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The kinds of filters a panel can hold, plus the `Initial` sentinel used
/// before any filter has been resolved (first load of a session).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterType {
    Initial,
    Subject,
    ParentLocations,
    ChildLocations,
    Grade,
    TestEvent,
}

impl FilterType {
    /// Precedence chain, lowest first. A filter invalidates everything that
    /// appears after it in this table.
    pub const PRECEDENCE: [FilterType; 6] = [
        FilterType::Initial,
        FilterType::Subject,
        FilterType::ParentLocations,
        FilterType::ChildLocations,
        FilterType::Grade,
        FilterType::TestEvent,
    ];

    /// Position in the precedence chain.
    pub fn rank(self) -> usize {
        Self::PRECEDENCE
            .iter()
            .position(|ft| *ft == self)
            .unwrap_or(0)
    }

    /// Parse a filter-type token from a request. Accepts the wire name
    /// (`"grade"`) or the numeric position used by older clients (`"4"`).
    /// Returns `None` for anything unrecognized; callers reject the request
    /// before touching panel state.
    pub fn from_token(token: &str) -> Option<Self> {
        if let Ok(n) = token.parse::<usize>() {
            return Self::PRECEDENCE.get(n).copied();
        }
        match token.to_ascii_lowercase().as_str() {
            "subject" => Some(Self::Subject),
            "parentlocations" | "parent_locations" => Some(Self::ParentLocations),
            "childlocations" | "child_locations" => Some(Self::ChildLocations),
            "grade" => Some(Self::Grade),
            "testevent" | "test_event" => Some(Self::TestEvent),
            _ => None,
        }
    }

    /// Wire name for query building.
    pub fn token(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Subject => "subject",
            Self::ParentLocations => "parentLocations",
            Self::ChildLocations => "childLocations",
            Self::Grade => "grade",
            Self::TestEvent => "testEvent",
        }
    }

    /// Every filter type with precedence `>=` this one, in chain order.
    /// This is the invalidation set used when the filter changes.
    pub fn and_downstream(self) -> impl Iterator<Item = FilterType> {
        let rank = self.rank();
        Self::PRECEDENCE.into_iter().filter(move |ft| ft.rank() >= rank)
    }
}

impl PartialOrd for FilterType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FilterType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

/// One selectable option inside a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterItem {
    pub id: String,
    pub value: String,
    pub selected: bool,
}

impl FilterItem {
    pub fn new(id: impl Into<String>, value: impl Into<String>, selected: bool) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            selected,
        }
    }
}

/// A named, ordered collection of selectable items for one filter type.
/// Location filters additionally carry the node type of their options
/// (the level drilled-down rosters compare against).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub filter_type: FilterType,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    pub items: Vec<FilterItem>,
}

impl Filter {
    pub fn selected_items(&self) -> impl Iterator<Item = &FilterItem> {
        self.items.iter().filter(|i| i.selected)
    }

    /// Comma-joined selected values, e.g. `"K"` or `"3,4"`.
    pub fn selected_values_string(&self) -> String {
        self.selected_items()
            .map(|i| i.value.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Comma-joined selected ids (query-argument form).
    pub fn selected_ids_string(&self) -> String {
        self.selected_items()
            .map(|i| i.id.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn first_selected(&self) -> Option<&FilterItem> {
        self.selected_items().next()
    }
}
