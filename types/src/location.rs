//! Location hierarchy value types.
//!
//! A location node is a point in the district → building → class → student
//! hierarchy. Nodes are plain values: they are copied into breadcrumbs, root
//! scopes and drill links without ownership concerns.

use serde::{Deserialize, Serialize};

/// A node in the location hierarchy (district/building/class/student).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationNode {
    pub node_id: i64,
    pub node_type: String,
}

impl LocationNode {
    pub fn new(node_id: i64, node_type: impl Into<String>) -> Self {
        Self {
            node_id,
            node_type: node_type.into(),
        }
    }

    /// The hierarchy level this node sits at, if its type string is known.
    pub fn level(&self) -> Option<LocationLevel> {
        LocationLevel::parse(&self.node_type)
    }
}

/// Levels of the location hierarchy, ordered root-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LocationLevel {
    District,
    Building,
    Class,
    Student,
}

impl LocationLevel {
    /// Parse a node-type string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "district" => Some(Self::District),
            "building" | "school" => Some(Self::Building),
            "class" => Some(Self::Class),
            "student" => Some(Self::Student),
            _ => None,
        }
    }

    /// The level one step further down the drill path.
    pub fn child(self) -> Option<Self> {
        match self {
            Self::District => Some(Self::Building),
            Self::Building => Some(Self::Class),
            Self::Class => Some(Self::Student),
            Self::Student => None,
        }
    }
}

/// A breadcrumb entry in the filters view model: the node plus the drill-up
/// link the frontend navigates to when the crumb is clicked.
#[derive(Debug, Clone, Serialize)]
pub struct BreadCrumb {
    pub node_id: i64,
    pub node_type: String,
    pub link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parse_is_case_insensitive() {
        assert_eq!(LocationLevel::parse("District"), Some(LocationLevel::District));
        assert_eq!(LocationLevel::parse("BUILDING"), Some(LocationLevel::Building));
        assert_eq!(LocationLevel::parse("warehouse"), None);
    }

    #[test]
    fn test_child_walks_down_the_hierarchy() {
        assert_eq!(LocationLevel::District.child(), Some(LocationLevel::Building));
        assert_eq!(LocationLevel::Student.child(), None);
    }
}
