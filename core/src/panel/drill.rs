//! Breadcrumb navigation: drill down one level, drill back up the trail.
//!
//! Validity is purely structural. Down requires the target to be either a
//! root node (empty trail) or exactly one level below the deepest crumb; up
//! requires the target to already be on the trail. Filter recomputation
//! after a successful move is the dashboard service's job.

use flexdash_types::LocationNode;

use super::FilterPanel;
use crate::error::DashboardError;

impl FilterPanel {
    /// Append `node` to the breadcrumb trail.
    pub fn drill_down(&mut self, node: LocationNode) -> Result<(), DashboardError> {
        match self.bread_crumbs.last() {
            None => {
                let is_root = self.root_nodes.iter().any(|r| {
                    r.node_id == node.node_id && r.node_type.eq_ignore_ascii_case(&node.node_type)
                });
                if !is_root {
                    return Err(DashboardError::InvalidDrillTarget(node));
                }
            }
            Some(last) => {
                let expected = last.level().and_then(|l| l.child());
                let actual = node.level();
                match (expected, actual) {
                    (Some(e), Some(a)) if e == a => {}
                    _ => return Err(DashboardError::InvalidDrillTarget(node)),
                }
            }
        }
        self.bread_crumbs.push(node);
        Ok(())
    }

    /// Truncate the trail so `node` is the deepest crumb.
    pub fn drill_up(&mut self, node: &LocationNode) -> Result<(), DashboardError> {
        let position = self.bread_crumbs.iter().position(|c| {
            c.node_id == node.node_id && c.node_type.eq_ignore_ascii_case(&node.node_type)
        });
        match position {
            Some(idx) => {
                self.bread_crumbs.truncate(idx + 1);
                Ok(())
            }
            None => Err(DashboardError::NodeNotOnPath(node.clone())),
        }
    }
}
