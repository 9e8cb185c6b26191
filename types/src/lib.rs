//! Shared value types and view models for flexdash.
//!
//! Contains the types that cross the boundary between `flexdash-core` (which
//! produces them) and the dashboard presentation layer (which serializes them
//! for the frontend). This crate stays serde-only so frontends can depend on
//! it without pulling in the core's async stack.

pub mod filters;
pub mod kto1;
pub mod location;
pub mod table;
pub mod view;

// Re-exports for convenience
pub use filters::{Filter, FilterItem, FilterType};
pub use kto1::{
    DifferentiatedHierarchyRecord, DifferentiatedHierarchyStudent, DifferentiatedPldBuilding,
    DifferentiatedPldClass, DifferentiatedPldLevel, DifferentiatedPldStage,
    DifferentiatedReportHierarchyViewModel, DifferentiatedReportKto1ViewModel,
    DifferentiatedReportValues, DonutCardKto1, DonutCardLevelKto1, DonutCardsKto1Model,
    PerformanceLevelDescriptorView, PerformanceLevelStatementView, PerformanceScoresKto1Model,
    PldStageScore, ProfileNarrativeKto1ViewModel, RosterKto1Location, RosterKto1Model,
    RosterKto1Student, RosterKto1Value,
};
pub use location::{BreadCrumb, LocationLevel, LocationNode};
pub use table::{CellValue, NoData, ReportResult, TableColumn, TableModel, TableRow};
pub use view::{
    Band, CogatRosterModel, CogatRosterValue, DomainBand, DomainCard, DomainCardsModel,
    DomainNarrative, FiltersViewModel, MatrixDataPoint, NarrativeTestEvent, PageViewModel,
    PerformanceLevelMatrixModel, ProfileNarrativeReport, ProfileNarrativeViewModel, ScoreBand,
    TestScoresModel,
};
