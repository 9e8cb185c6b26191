//! Pure aggregation logic behind the narrative and differentiated reports.
//! API fan-out and caching live in the dashboard service.

pub mod differentiated;
pub mod narrative;
