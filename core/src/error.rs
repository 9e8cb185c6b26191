//! Error taxonomy for dashboard operations.
//!
//! "No data" is deliberately absent here: an upstream null or empty entity
//! list is an expected state and surfaces as `ReportResult::NoData`, never
//! as an error.

use flexdash_types::LocationNode;
use thiserror::Error;

/// Failures surfaced to the controller layer.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// A filter operation arrived before any panel was built for the session.
    #[error("filter panel has not been initialized for this session")]
    MissingFilterPanel,

    /// Request carried a filter-type token the panel does not recognize.
    /// Rejected before any panel state is touched.
    #[error("unrecognized filter type token: {0:?}")]
    UnknownFilterType(String),

    /// Drill-up target is not on the current breadcrumb path.
    #[error("location {0:?} is not on the current breadcrumb path")]
    NodeNotOnPath(LocationNode),

    /// Drill-down target is not a valid child of the current position.
    #[error("location {0:?} is not a valid child of the current drill position")]
    InvalidDrillTarget(LocationNode),

    /// The differentiated-report payload contained no record with all of
    /// district, building and grade. There is no partial-output recovery.
    #[error("differentiated report returned no record with district, building and grade")]
    MalformedDifferentiatedReport,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Failure reported by the assessment API collaborator. Propagated as-is;
/// the core performs no retries.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("assessment api call failed: {0}")]
    Backend(String),
}
