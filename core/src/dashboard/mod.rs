//! The dashboard service: orchestrates panel state, query building, API
//! calls and flattening into the view models the controller layer returns.
//!
//! Every operation follows the same shape: load the panel from the session,
//! build a query from it, call the API, reshape the response, store the
//! panel back if it changed. Upstream nulls and empty entity lists become
//! `ReportResult::NoData`; only transport failures and invalid requests are
//! errors.

mod cogat;
mod kto1;

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use flexdash_types::{
    BreadCrumb, DomainBand, DomainCard, DomainCardsModel, FilterType, FiltersViewModel,
    LocationNode, MatrixDataPoint, NarrativeTestEvent, PageViewModel,
    PerformanceLevelMatrixModel, ProfileNarrativeReport, ProfileNarrativeViewModel,
    ReportResult, ScoreBand, TableModel, TestScoresModel,
};

use crate::api::models::TestEvent;
use crate::api::ApiClient;
use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::flatten;
use crate::panel::materializer::merge_filters;
use crate::panel::FilterPanel;
use crate::query;
use crate::query::scores::ScoreArgs;
use crate::report::narrative;
use crate::session::{SessionKey, SessionStore, UserContext};

/// Quantile band colors by band id, lowest to highest.
const BAND_COLORS: [&str; 4] = ["#D55E00", "#E69F00", "#56B4E9", "#009E73"];

fn band_color(band_id: i64) -> &'static str {
    usize::try_from(band_id - 1)
        .ok()
        .and_then(|idx| BAND_COLORS.get(idx))
        .copied()
        .unwrap_or("#999999")
}

/// Display form of an API date (`2025-09-15` -> `09/15/2025`). Dates the
/// API sends in any other shape pass through unchanged.
pub(crate) fn display_date(date: &str) -> String {
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%m/%d/%Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}

pub struct Dashboard {
    api: Arc<dyn ApiClient>,
    session: Arc<dyn SessionStore>,
    user: UserContext,
    config: DashboardConfig,
}

impl Dashboard {
    pub fn new(
        api: Arc<dyn ApiClient>,
        session: Arc<dyn SessionStore>,
        user: UserContext,
        config: DashboardConfig,
    ) -> Self {
        Self {
            api,
            session,
            user,
            config,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Session Plumbing
    // ─────────────────────────────────────────────────────────────────────

    fn load_panel(&self) -> Option<FilterPanel> {
        let value = self.session.retrieve(SessionKey::FilterPanel)?;
        match serde_json::from_value(value) {
            Ok(panel) => Some(panel),
            Err(err) => {
                warn!(%err, "discarding unreadable filter panel from session");
                None
            }
        }
    }

    fn require_panel(&self) -> Result<FilterPanel, DashboardError> {
        self.load_panel().ok_or(DashboardError::MissingFilterPanel)
    }

    fn store_panel(&self, panel: &FilterPanel) {
        match serde_json::to_value(panel) {
            Ok(value) => self.session.store(value, SessionKey::FilterPanel),
            Err(err) => warn!(%err, "failed to serialize filter panel"),
        }
    }

    /// The query echo returned to the frontend outside production.
    fn diagnostic(&self, query: &str) -> Option<String> {
        (!self.config.is_prod).then(|| query.to_string())
    }

    /// Emit the query text when the session has logging switched on.
    fn log_query(&self, operation: &str, query: &str) {
        let enabled = self
            .session
            .retrieve(SessionKey::QueryLogging)
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        if enabled {
            info!(operation, query, "assessment api query");
        }
    }

    /// Re-resolve every filter at and above `trigger` and merge the result
    /// into the panel.
    async fn recreate_filters(
        &self,
        panel: &mut FilterPanel,
        trigger: FilterType,
    ) -> Result<(), DashboardError> {
        debug!(trigger = trigger.token(), "recreating filters");
        let query = query::filters::filters_query(panel, trigger, self.user.user_id);
        self.log_query("filters", &query);
        panel.graphql_query = Some(query.clone());

        if let Some(result) = self.api.make_user_call(&query).await? {
            merge_filters(panel, &result.filters, trigger);
        }
        Ok(())
    }

    /// Run a user-endpoint query and hand back the first test event, the
    /// unit every report hangs off. `None` means no data for this scope.
    async fn fetch_event(&self, operation: &str, query: &str) -> Result<Option<TestEvent>, DashboardError> {
        self.log_query(operation, query);
        let result = self.api.make_user_call(query).await?;
        Ok(result.and_then(|r| r.test_events.into_iter().next()))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Page + Filters
    // ─────────────────────────────────────────────────────────────────────

    /// Top-level page flags; also latches the per-session query-logging
    /// switch carried on the page request.
    pub fn build_page_view_model(&self, query_logging: bool) -> PageViewModel {
        self.session
            .store(serde_json::Value::Bool(query_logging), SessionKey::QueryLogging);
        PageViewModel {
            is_adaptive: self.user.is_adaptive,
            is_demo: self.user.is_demo,
            is_prod: self.config.is_prod,
        }
    }

    /// Load (or build) the filter panel and return it as a view model. A
    /// cogat toggle that differs from the stored panel rebuilds the panel
    /// from scratch; cogat and non-cogat filter sets do not mix.
    pub async fn get_filters(
        &self,
        app_path: &str,
        is_cogat: bool,
    ) -> Result<FiltersViewModel, DashboardError> {
        let want_cogat = is_cogat && self.config.cogat_enabled;
        let panel = match self.load_panel() {
            Some(panel) if panel.is_cogat == want_cogat => panel,
            _ => {
                let mut panel = FilterPanel::new(self.user.customer_info_list.clone());
                panel.is_cogat = want_cogat;
                self.recreate_filters(&mut panel, FilterType::Initial).await?;
                panel.set_root_bread_crumb();
                panel
            }
        };
        self.store_panel(&panel);
        Ok(self.filters_view(&panel, app_path))
    }

    /// Apply a new selection for one filter type, then re-resolve everything
    /// downstream of it. The token is validated before any state changes.
    pub async fn update_filters(
        &self,
        app_path: &str,
        filter_type_token: &str,
        values: &[String],
    ) -> Result<FiltersViewModel, DashboardError> {
        let filter_type = FilterType::from_token(filter_type_token)
            .filter(|ft| *ft != FilterType::Initial)
            .ok_or_else(|| DashboardError::UnknownFilterType(filter_type_token.to_string()))?;

        let mut panel = self.require_panel()?;
        panel.change_selection(filter_type, values);
        // Picking a test event always leaves cogat mode; the cogat event set
        // is entered only through the explicit toggle on get_filters.
        if filter_type == FilterType::TestEvent {
            panel.is_cogat = false;
        }
        self.recreate_filters(&mut panel, filter_type).await?;
        panel.last_updated_filter_type = filter_type;
        if filter_type.rank() <= FilterType::ParentLocations.rank() {
            panel.set_root_bread_crumb();
        }
        self.store_panel(&panel);
        Ok(self.filters_view(&panel, app_path))
    }

    /// Drop the stored panel; the next get rebuilds from scratch.
    pub fn reset_filters(&self) {
        self.session.delete(SessionKey::FilterPanel);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Drill Navigation
    // ─────────────────────────────────────────────────────────────────────

    /// Return to the root of the drill path and re-resolve the downstream
    /// filters for the root scope.
    pub async fn go_to_root(&self, app_path: &str) -> Result<FiltersViewModel, DashboardError> {
        let mut panel = self.require_panel()?;
        panel.bread_crumbs.clear();
        self.recreate_filters(&mut panel, FilterType::Grade).await?;
        panel.set_root_bread_crumb();
        self.store_panel(&panel);
        Ok(self.filters_view(&panel, app_path))
    }

    pub async fn drill_down(
        &self,
        app_path: &str,
        node: LocationNode,
    ) -> Result<FiltersViewModel, DashboardError> {
        let mut panel = self.require_panel()?;
        panel.drill_down(node)?;
        self.recreate_filters(&mut panel, FilterType::ParentLocations).await?;
        self.store_panel(&panel);
        Ok(self.filters_view(&panel, app_path))
    }

    pub async fn drill_up(
        &self,
        app_path: &str,
        node: LocationNode,
    ) -> Result<FiltersViewModel, DashboardError> {
        let mut panel = self.require_panel()?;
        panel.drill_up(&node)?;
        self.recreate_filters(&mut panel, FilterType::ParentLocations).await?;
        self.store_panel(&panel);
        Ok(self.filters_view(&panel, app_path))
    }

    fn filters_view(&self, panel: &FilterPanel, app_path: &str) -> FiltersViewModel {
        let locations_bread_crumbs = panel
            .bread_crumbs
            .iter()
            .map(|crumb| BreadCrumb {
                node_id: crumb.node_id,
                node_type: crumb.node_type.clone(),
                link: format!(
                    "{app_path}/api/Dashboard/DrillUpLocations?id={}&type={}",
                    crumb.node_id, crumb.node_type
                ),
            })
            .collect();

        FiltersViewModel {
            filters: panel.all_filters(),
            locations_bread_crumbs,
            root_location_level: panel.root_location_level().to_string(),
            is_kto1: panel.is_kto1(),
            has_differentiated_kto1_report: panel.has_differentiated_kto1_report(),
            graph_ql_query: panel
                .graphql_query
                .as_deref()
                .and_then(|q| self.diagnostic(q)),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Test Scores + Domains
    // ─────────────────────────────────────────────────────────────────────

    pub async fn get_test_scores(
        &self,
        app_path: &str,
        score_args: ScoreArgs<'_>,
    ) -> Result<ReportResult<TestScoresModel>, DashboardError> {
        let panel = self.require_panel()?;
        let query = query::scores::test_scores_query(&panel, score_args, self.user.user_id);
        let Some(event) = self.fetch_event("test_scores", &query).await? else {
            return Ok(ReportResult::no_data());
        };
        let Some(score) = event.test_score else {
            return Ok(ReportResult::no_data());
        };

        let npr = score.scores.first().map(|s| s.value).unwrap_or(0.0);
        let bands = score
            .scores
            .first()
            .map(|s| s.performance_bands.as_slice())
            .unwrap_or(&[]);

        let values = bands
            .iter()
            .map(|band| ScoreBand {
                caption: band.name.clone(),
                color: band_color(band.id).to_string(),
                number: band.number_of_students,
                percent: band.percent,
                range_band: format!("{}:{}", band.lower, band.upper),
                url_params: format!("performanceBand={}", band.id),
                range: band.id,
                average_standard_score: band.standard_score,
                national_percentile_rank: band.npr,
            })
            .collect();

        Ok(ReportResult::data(TestScoresModel {
            graph_ql_query: self.diagnostic(&query),
            title: "Percent of Students in each Quantile Range".to_string(),
            category: score.subject,
            average_standard_score: score.standard_score,
            national_percentile_rank: npr,
            url: format!("{app_path}/api/Dashboard/GetStudentRoster"),
            is_longitudinal: event.is_longitudinal,
            is_cogat: event.is_cogat && self.config.cogat_enabled,
            values,
        }))
    }

    pub async fn get_domains(
        &self,
        app_path: &str,
        band_id: Option<&str>,
    ) -> Result<ReportResult<DomainCardsModel>, DashboardError> {
        let panel = self.require_panel()?;
        let query = query::scores::domains_query(&panel, band_id, self.user.user_id);
        let Some(event) = self.fetch_event("domains", &query).await? else {
            return Ok(ReportResult::no_data());
        };
        if event.domain_scores.is_empty() {
            return Ok(ReportResult::no_data());
        }

        let cards = event
            .domain_scores
            .iter()
            .map(|domain| DomainCard {
                title: domain.description.clone(),
                url: format!("{app_path}/api/Dashboard/GetStudentRoster"),
                values: domain
                    .performance_levels
                    .iter()
                    .map(|level| DomainBand {
                        caption: level.description.clone(),
                        number: level.number_of_students,
                        percent: level.percent,
                        url_params: format!("domainId={}&domainLevel={}", domain.id, level.id),
                        range: level.id,
                        range_band: format!("{0}:{0}", level.id),
                    })
                    .collect(),
            })
            .collect();

        Ok(ReportResult::data(DomainCardsModel {
            graph_ql_query: self.diagnostic(&query),
            cards,
        }))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Rosters
    // ─────────────────────────────────────────────────────────────────────

    /// Roster for the current drill position. Dispatches to the per-student
    /// shape when the child-location level is "student".
    pub async fn get_roster(
        &self,
        app_path: &str,
        score_args: ScoreArgs<'_>,
    ) -> Result<ReportResult<TableModel>, DashboardError> {
        let panel = self.require_panel()?;
        if panel.is_child_location_student() {
            return self.student_roster(&panel, score_args).await;
        }

        let roster_level = panel.child_location_node_type().unwrap_or("building").to_string();
        let query = query::roster::location_roster_query(&panel, self.user.user_id);
        let Some(event) = self.fetch_event("roster", &query).await? else {
            return Ok(ReportResult::no_data());
        };
        let locations = event
            .location_roster
            .map(|r| r.locations)
            .unwrap_or_default();
        if locations.is_empty() {
            return Ok(ReportResult::no_data());
        }

        Ok(ReportResult::data(flatten::location_roster_table(
            &locations,
            &roster_level,
            app_path,
            self.diagnostic(&query),
        )))
    }

    pub async fn get_student_roster(
        &self,
        score_args: ScoreArgs<'_>,
    ) -> Result<ReportResult<TableModel>, DashboardError> {
        let panel = self.require_panel()?;
        self.student_roster(&panel, score_args).await
    }

    async fn student_roster(
        &self,
        panel: &FilterPanel,
        score_args: ScoreArgs<'_>,
    ) -> Result<ReportResult<TableModel>, DashboardError> {
        let query = query::roster::student_roster_query(panel, score_args, self.user.user_id);
        let Some(event) = self.fetch_event("student_roster", &query).await? else {
            return Ok(ReportResult::no_data());
        };
        let students = event.student_roster.map(|r| r.students).unwrap_or_default();
        if students.is_empty() {
            return Ok(ReportResult::no_data());
        }

        Ok(ReportResult::data(flatten::student_roster_table(
            &students,
            self.diagnostic(&query),
        )))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Profile Narrative
    // ─────────────────────────────────────────────────────────────────────

    /// One narrative report per requested student, fetched sequentially.
    /// Band ranges are fetched once per distinct grade across the batch.
    pub async fn get_profile_narrative(
        &self,
        student_ids: &str,
    ) -> Result<ReportResult<ProfileNarrativeViewModel>, DashboardError> {
        let panel = self.require_panel()?;
        let subject = panel.subject();

        let mut reports = Vec::new();
        let mut ranges: BTreeMap<String, Vec<flexdash_types::Band>> = BTreeMap::new();

        for student_id in student_ids.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let query = query::narrative::profile_narrative_query(&panel, student_id);
            self.log_query("profile_narrative", &query);
            let student = self.api.make_student_call(&query).await?;

            let grade = student.current_test_event.grade.name.clone();
            let lookup_query = query::narrative::narrative_lookup_query(&subject, &grade);
            self.log_query("narrative_lookup", &lookup_query);
            let lookup = self
                .api
                .make_narrative_lookup_call(&lookup_query, &subject, &grade)
                .await?;

            if !ranges.contains_key(&grade) {
                let range_query = query::narrative::standard_score_range_query(&subject, &grade);
                self.log_query("score_ranges", &range_query);
                let bands = self
                    .api
                    .make_bands_lookup_call(&range_query, &subject, &grade)
                    .await?;
                ranges.insert(grade.clone(), narrative::build_bands(&bands));
            }

            let domains = student
                .current_test_event
                .domain_scores
                .iter()
                .map(|score| narrative::domain_narrative(&lookup, score, &student.name.first_name))
                .collect();

            let test_events = student
                .test_events
                .iter()
                .map(|event| NarrativeTestEvent {
                    id: event.test_event_id,
                    name: event.test_event_name.clone(),
                    date: display_date(&event.test_date),
                    grade: event.grade.name.clone(),
                    subject: event.subject.clone(),
                    standard_score: event
                        .test_score
                        .as_ref()
                        .map(|s| s.standard_score)
                        .unwrap_or(0.0),
                })
                .collect();

            reports.push(ProfileNarrativeReport {
                student_id: student.user_id,
                external_id: student.external_id,
                first_name: student.name.first_name,
                last_name: student.name.last_name,
                subject: subject.clone(),
                subject_abbreviation: lookup.subject.subject_abbreviation,
                grade,
                domains,
                test_events,
                graph_ql_query: self.diagnostic(&query),
                graph_ql_lookup_query: self.diagnostic(&lookup_query),
            });
        }

        if reports.is_empty() {
            return Ok(ReportResult::no_data());
        }
        Ok(ReportResult::data(ProfileNarrativeViewModel { reports, ranges }))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Performance Level Matrix
    // ─────────────────────────────────────────────────────────────────────

    pub async fn get_performance_level_matrix(
        &self,
        content_type: &str,
        content_name: &str,
        score_args: ScoreArgs<'_>,
    ) -> Result<ReportResult<PerformanceLevelMatrixModel>, DashboardError> {
        let panel = self.require_panel()?;
        let query = query::scores::performance_level_matrix_query(
            &panel,
            content_type,
            content_name,
            score_args,
            self.user.user_id,
        );
        let Some(event) = self.fetch_event("performance_level_matrix", &query).await? else {
            return Ok(ReportResult::no_data());
        };

        // A present event without matrix data is an empty chart, not no-data.
        let data_points = event
            .performance_level_matrix
            .map(|m| {
                m.data_points
                    .into_iter()
                    .map(|p| MatrixDataPoint {
                        ability_achievement: p.ability_achievement,
                        student_count: p.stud_count,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(ReportResult::data(PerformanceLevelMatrixModel {
            graph_ql_query: self.diagnostic(&query),
            data_points,
        }))
    }
}
