//! flexdash-core: filter state machine, query builders and response
//! flattening for the student-assessment reporting dashboard.
//!
//! The core is stateless between requests: the filter panel is loaded from
//! and stored back to the caller-provided session store on every operation,
//! and all upstream data comes through the `ApiClient` collaborator trait.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod flatten;
pub mod panel;
pub mod query;
pub mod report;
pub mod session;

// Re-exports for convenience
pub use api::ApiClient;
pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use error::{ApiError, DashboardError};
pub use panel::FilterPanel;
pub use session::{SessionKey, SessionStore, UserContext};
