//! Assessment API collaborator contract.
//!
//! The transport (GraphQL client, auth, caching) lives outside the core;
//! this trait is the seam. Queries are opaque strings built by the `query`
//! module, and the two lookup-style calls additionally receive the key
//! fields the client uses for its own response caching. The
//! differentiated-report call carries a pre-computed opaque cache key with
//! the same purpose.

pub mod models;

use async_trait::async_trait;

use crate::error::ApiError;
use models::{
    BandRange, PldDescriptor, PldStatement, StudentResult, SubjectGradeDomains, UserResult,
};

/// Asynchronous client for the assessment data API.
///
/// A `None` user result signals "no data for this scope" and must
/// short-circuit to the no-data sentinel, not an error.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn make_user_call(&self, query: &str) -> Result<Option<UserResult>, ApiError>;

    async fn make_student_call(&self, query: &str) -> Result<StudentResult, ApiError>;

    async fn make_narrative_lookup_call(
        &self,
        query: &str,
        subject: &str,
        grade: &str,
    ) -> Result<SubjectGradeDomains, ApiError>;

    async fn make_bands_lookup_call(
        &self,
        query: &str,
        subject: &str,
        grade: &str,
    ) -> Result<Vec<BandRange>, ApiError>;

    async fn make_pld_descriptor_call(
        &self,
        query: &str,
        subject: &str,
        stage: &str,
    ) -> Result<PldDescriptor, ApiError>;

    async fn make_pld_statement_call(
        &self,
        query: &str,
        subject: &str,
        stage: &str,
        level: i64,
    ) -> Result<PldStatement, ApiError>;

    async fn make_differentiated_report_call(
        &self,
        query: &str,
        cache_key: &str,
    ) -> Result<Option<UserResult>, ApiError>;
}
