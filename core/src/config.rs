//! Environment configuration for the dashboard core.
//!
//! Loaded once at host startup via confy and passed into the service by
//! value. `is_prod` suppresses the diagnostic query echo in every view
//! model; `cogat_enabled` gates the cogat flag on the test-scores card.

use serde::{Deserialize, Serialize};

const APP_NAME: &str = "flexdash";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Production mode: omit the graph_ql_query diagnostic field.
    pub is_prod: bool,
    /// Whether the cogat report variant is enabled for this deployment.
    pub cogat_enabled: bool,
}

impl DashboardConfig {
    /// Load from the user config directory (creates a default file on first run).
    pub fn load() -> Result<Self, confy::ConfyError> {
        confy::load(APP_NAME, None)
    }

    pub fn store(&self) -> Result<(), confy::ConfyError> {
        confy::store(APP_NAME, None, self)
    }
}
