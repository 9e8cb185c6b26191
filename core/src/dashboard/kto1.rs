//! KTo1 operations: performance scores, donut cards, the PLD roster, the
//! KTo1 narrative and the differentiated report.

use flexdash_types::{
    DifferentiatedHierarchyRecord, DifferentiatedHierarchyStudent, DifferentiatedPldBuilding,
    DifferentiatedPldClass, DifferentiatedPldLevel, DifferentiatedPldStage,
    DifferentiatedReportHierarchyViewModel, DifferentiatedReportKto1ViewModel,
    DifferentiatedReportValues, DonutCardKto1, DonutCardLevelKto1, DonutCardsKto1Model,
    FilterType, PerformanceLevelDescriptorView, PerformanceLevelStatementView,
    PerformanceScoresKto1Model, PldStageScore, ProfileNarrativeKto1ViewModel, ReportResult,
    RosterKto1Model,
};

use super::Dashboard;
use crate::api::models::{DifferentiatedRecord, PldStatement};
use crate::error::DashboardError;
use crate::flatten::kto1 as flatten_kto1;
use crate::panel::FilterPanel;
use crate::query;
use crate::report::differentiated;

fn statement_view(statement: PldStatement) -> PerformanceLevelStatementView {
    PerformanceLevelStatementView {
        can_statement: statement.can_statement,
        need_practice_statement: statement.practice_statement,
        ready_statement: statement.ready_statement,
        can_descriptor: statement.can_description,
        need_practice_descriptor: statement.need_description,
        ready_descriptor: statement.ready_description,
    }
}

impl Dashboard {
    // ─────────────────────────────────────────────────────────────────────
    // Score Graph + Donuts
    // ─────────────────────────────────────────────────────────────────────

    pub async fn get_performance_scores_kto1(
        &self,
    ) -> Result<ReportResult<PerformanceScoresKto1Model>, DashboardError> {
        let panel = self.require_panel()?;
        let query = query::kto1::performance_scores_kto1_query(&panel, self.user.user_id);
        let Some(event) = self.fetch_event("performance_scores_kto1", &query).await? else {
            return Ok(ReportResult::no_data());
        };
        let Some(graph) = event.roster_card.and_then(|c| c.performance_score_graph) else {
            return Ok(ReportResult::no_data());
        };

        Ok(ReportResult::data(PerformanceScoresKto1Model {
            graph_ql_query: self.diagnostic(&query),
            is_longitudinal: event.is_longitudinal,
            is_cogat: event.is_cogat,
            subject: graph.subject,
            total_count: graph.total_count,
            pld_values: graph
                .pld_stages
                .into_iter()
                .map(|stage| PldStageScore {
                    percent: stage.percent,
                    pld_stage: stage.pld_stage,
                    pld_stage_num: stage.pld_stage_num,
                    student_count: stage.student_count,
                })
                .collect(),
        }))
    }

    /// Donut cards grouped by stage, stages and levels in response order.
    pub async fn get_donut_cards_kto1(
        &self,
        stage: Option<&str>,
        level: Option<i64>,
    ) -> Result<ReportResult<DonutCardsKto1Model>, DashboardError> {
        let panel = self.require_panel()?;
        let query = query::kto1::donuts_kto1_query(&panel, stage, level, self.user.user_id);
        let Some(event) = self.fetch_event("donut_cards_kto1", &query).await? else {
            return Ok(ReportResult::no_data());
        };
        let donuts = event
            .roster_card
            .map(|c| c.performance_level_donuts)
            .unwrap_or_default();
        if donuts.is_empty() {
            return Ok(ReportResult::no_data());
        }

        let mut cards: Vec<DonutCardKto1> = Vec::new();
        for donut in donuts {
            let ring = DonutCardLevelKto1 {
                student_count: donut.student_count,
                percent: donut.percent,
                pld_level: donut.pld_level,
            };
            match cards.iter_mut().find(|c| c.pld_stage == donut.pld_stage) {
                Some(card) => card.card_levels.push(ring),
                None => cards.push(DonutCardKto1 {
                    pld_stage: donut.pld_stage,
                    card_levels: vec![ring],
                }),
            }
        }

        Ok(ReportResult::data(DonutCardsKto1Model {
            graph_ql_query: self.diagnostic(&query),
            cards,
        }))
    }

    // ─────────────────────────────────────────────────────────────────────
    // KTo1 Roster
    // ─────────────────────────────────────────────────────────────────────

    /// PLD roster for the current drill position. When a stage (and level)
    /// narrowing is active the matching descriptor and statement text rides
    /// along on the model.
    pub async fn get_roster_kto1(
        &self,
        app_path: &str,
        stage: Option<&str>,
        level: Option<i64>,
    ) -> Result<ReportResult<RosterKto1Model>, DashboardError> {
        let panel = self.require_panel()?;
        let query = query::kto1::roster_kto1_query(&panel, stage, level, self.user.user_id);
        let Some(event) = self.fetch_event("roster_kto1", &query).await? else {
            return Ok(ReportResult::no_data());
        };
        let roster = event
            .roster_card
            .and_then(|c| c.roster)
            .map(|r| r.roster_list)
            .unwrap_or_default();
        if roster.is_empty() {
            return Ok(ReportResult::no_data());
        }

        let subject = panel.subject();
        let performance_level_descriptor = match stage {
            Some(stage_name) => {
                let descriptor_query = query::kto1::pld_descriptor_query(&subject, stage_name);
                let descriptor = self
                    .api
                    .make_pld_descriptor_call(&descriptor_query, &subject, stage_name)
                    .await?;
                Some(PerformanceLevelDescriptorView {
                    pld_desc: descriptor.pld_desc,
                })
            }
            None => None,
        };
        let performance_level_statement = match (stage, level) {
            (Some(stage_name), Some(level_num)) => {
                let statement_query = query::kto1::pld_statement_query(&subject, stage_name, level_num);
                let statement = self
                    .api
                    .make_pld_statement_call(&statement_query, &subject, stage_name, level_num)
                    .await?;
                Some(statement_view(statement))
            }
            _ => None,
        };

        // A stage narrowing always lists students, whatever the drill level.
        let is_student = panel.is_child_location_student() || stage.is_some();
        let roster_level = if is_student {
            "Student".to_string()
        } else {
            panel.child_location_node_type().unwrap_or("building").to_string()
        };
        let (roster_type, columns, values) = if is_student {
            (
                "students".to_string(),
                flatten_kto1::student_columns(),
                flatten_kto1::student_values(&roster),
            )
        } else {
            (
                "compare".to_string(),
                flatten_kto1::location_columns(&roster_level),
                flatten_kto1::location_values(&roster, &roster_level, app_path),
            )
        };

        Ok(ReportResult::data(RosterKto1Model {
            graph_ql_query: self.diagnostic(&query),
            roster_type,
            roster_level,
            columns,
            values,
            performance_level_descriptor,
            performance_level_statement,
        }))
    }

    // ─────────────────────────────────────────────────────────────────────
    // KTo1 Narrative + PLD Lookups
    // ─────────────────────────────────────────────────────────────────────

    /// One KTo1 narrative report per requested student, fetched
    /// sequentially. A student without a PLD placement still gets a report;
    /// only the descriptor and statement attachments are skipped.
    pub async fn get_profile_narrative_kto1(
        &self,
        student_ids: &str,
    ) -> Result<ReportResult<Vec<ProfileNarrativeKto1ViewModel>>, DashboardError> {
        let panel = self.require_panel()?;
        let subject = panel.subject();

        let mut reports = Vec::new();
        for student_id in student_ids.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let query = query::kto1::narrative_kto1_query(&panel, student_id);
            self.log_query("profile_narrative_kto1", &query);
            let student = self.api.make_student_call(&query).await?;
            let event = student.current_test_event;

            // district → school → class along the first-child chain.
            let district = event.district.unwrap_or_default();
            let school = district.child_locations.first();
            let class = school.and_then(|s| s.child_locations.first());

            let performance_level_descriptor = match event.pld_name.as_deref() {
                Some(pld_name) if !pld_name.is_empty() => {
                    let descriptor_query = query::kto1::pld_descriptor_query(&subject, pld_name);
                    let descriptor = self
                        .api
                        .make_pld_descriptor_call(&descriptor_query, &subject, pld_name)
                        .await?;
                    Some(PerformanceLevelDescriptorView {
                        pld_desc: descriptor.pld_desc,
                    })
                }
                _ => None,
            };
            let performance_level_statement = match event.pld_level {
                Some(level) => {
                    let stage = event.pld_name.as_deref().unwrap_or_default();
                    let statement_query = query::kto1::pld_statement_query(&subject, stage, level);
                    let statement = self
                        .api
                        .make_pld_statement_call(&statement_query, &subject, stage, level)
                        .await?;
                    Some(statement_view(statement))
                }
                None => None,
            };

            reports.push(ProfileNarrativeKto1ViewModel {
                assessment_name: event.test_event_name,
                district: district.name.clone(),
                school: school.map(|s| s.name.clone()).unwrap_or_default(),
                class: class.map(|c| c.name.clone()).unwrap_or_default(),
                grade: event.grade.name,
                subject_name: event.subject_name,
                test_date: super::display_date(&event.test_date),
                student_id: student.user_id.to_string(),
                student_external_id: student.external_id,
                student_first_name: student.name.first_name,
                student_last_name: student.name.last_name,
                pld_name: event.pld_name,
                pld_level: event.pld_level,
                performance_level_descriptor,
                performance_level_statement,
                graph_ql_query: self.diagnostic(&query),
            });
        }

        if reports.is_empty() {
            return Ok(ReportResult::no_data());
        }
        Ok(ReportResult::data(reports))
    }

    pub async fn get_pld_descriptor(
        &self,
        stage: &str,
    ) -> Result<PerformanceLevelDescriptorView, DashboardError> {
        let panel = self.require_panel()?;
        let subject = panel.subject();
        let query = query::kto1::pld_descriptor_query(&subject, stage);
        self.log_query("pld_descriptor", &query);
        let descriptor = self
            .api
            .make_pld_descriptor_call(&query, &subject, stage)
            .await?;
        Ok(PerformanceLevelDescriptorView {
            pld_desc: descriptor.pld_desc,
        })
    }

    pub async fn get_pld_statement(
        &self,
        stage: &str,
        level: i64,
    ) -> Result<PerformanceLevelStatementView, DashboardError> {
        let panel = self.require_panel()?;
        let subject = panel.subject();
        let query = query::kto1::pld_statement_query(&subject, stage, level);
        self.log_query("pld_statement", &query);
        let statement = self
            .api
            .make_pld_statement_call(&query, &subject, stage, level)
            .await?;
        Ok(statement_view(statement))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Differentiated Report
    // ─────────────────────────────────────────────────────────────────────

    /// Raw hierarchy records for the student picker in front of the report.
    pub async fn get_differentiated_report_hierarchy(
        &self,
    ) -> Result<ReportResult<DifferentiatedReportHierarchyViewModel>, DashboardError> {
        let panel = self.require_panel()?;
        let (query, records) = self.fetch_differentiated(&panel).await?;
        if records.is_empty() {
            return Ok(ReportResult::no_data());
        }

        let values = records
            .into_iter()
            .map(|record| DifferentiatedHierarchyRecord {
                district_id: record.district_id,
                district_name: record.district_name,
                building_id: record.building_id,
                building_name: record.building_name,
                class_id: record.class_id,
                class_name: record.class_name,
                grade: record.grade,
                subject: record.subject,
                students: record
                    .student_list
                    .into_iter()
                    .map(|s| DifferentiatedHierarchyStudent {
                        student_id: s.student_id,
                        student_name: s.student_name,
                    })
                    .collect(),
            })
            .collect();

        Ok(ReportResult::data(DifferentiatedReportHierarchyViewModel {
            graph_ql_query: self.diagnostic(&query),
            values,
        }))
    }

    /// Assemble the building → stage → level → class tree for the requested
    /// students. Stages appear only when a requested student sits in them;
    /// descriptor text is fetched once per stage, statement text once per
    /// (stage, level).
    pub async fn get_differentiated_report_kto1(
        &self,
        student_ids: &str,
    ) -> Result<ReportResult<DifferentiatedReportKto1ViewModel>, DashboardError> {
        let panel = self.require_panel()?;
        let query = query::kto1::differentiated_report_kto1_query(&panel, self.user.user_id);
        self.log_query("differentiated_report_kto1", &query);
        let cache_key = self.differentiated_cache_key(&panel);
        let result = self
            .api
            .make_differentiated_report_call(&query, &cache_key)
            .await?;
        let Some(event) = result.and_then(|r| r.test_events.into_iter().next()) else {
            return Ok(ReportResult::no_data());
        };
        let records = event.differentiated_report_kto1;
        if records.is_empty() {
            return Ok(ReportResult::no_data());
        }

        let anchor = differentiated::anchor_record(&records)
            .ok_or(DashboardError::MalformedDifferentiatedReport)?
            .clone();
        let requested = differentiated::parse_student_ids(student_ids);
        let subject = panel.subject();
        let grade = panel.selected_values_of(FilterType::Grade);

        let mut buildings: Vec<DifferentiatedPldBuilding> = Vec::new();
        for record in &records {
            let (Some(building_id), Some(building_name)) =
                (record.building_id, record.building_name.as_deref())
            else {
                continue;
            };
            if buildings.iter().any(|b| b.building_id == building_id) {
                continue;
            }
            let building_records: Vec<&DifferentiatedRecord> = records
                .iter()
                .filter(|r| r.building_id == Some(building_id))
                .collect();
            let pld_stages = self
                .differentiated_stages(&building_records, &requested, &subject)
                .await?;
            buildings.push(DifferentiatedPldBuilding {
                building_id,
                building_name: building_name.to_string(),
                pld_stages,
            });
        }

        Ok(ReportResult::data(DifferentiatedReportKto1ViewModel {
            graph_ql_query: self.diagnostic(&query),
            values: DifferentiatedReportValues {
                district_id: anchor.district_id.unwrap_or_default(),
                district_name: anchor.district_name.clone().unwrap_or_default(),
                grade,
                subject,
                test_event_name: event.name,
                test_event_date: super::display_date(&event.date),
                buildings,
            },
        }))
    }

    async fn differentiated_stages(
        &self,
        building_records: &[&DifferentiatedRecord],
        requested: &std::collections::HashSet<i64>,
        subject: &str,
    ) -> Result<Vec<DifferentiatedPldStage>, DashboardError> {
        let mut stages = Vec::new();
        for stage_num in differentiated::PLD_STAGE_NUMS {
            // Stage display name comes from the records themselves; a stage
            // with no requested student in it never materializes.
            let Some(stage_name) = building_records
                .iter()
                .flat_map(|r| r.student_list.iter())
                .find(|s| requested.contains(&s.student_id) && s.pld_stage_num == stage_num)
                .map(|s| s.pld_stage.clone())
            else {
                continue;
            };

            let descriptor_query = query::kto1::pld_descriptor_query(subject, &stage_name);
            let descriptor = self
                .api
                .make_pld_descriptor_call(&descriptor_query, subject, &stage_name)
                .await?;

            let mut pld_levels = Vec::new();
            for level_num in differentiated::PLD_LEVEL_NUMS {
                if !differentiated::level_allowed(&stage_name, level_num) {
                    continue;
                }
                let statement_query = query::kto1::pld_statement_query(subject, &stage_name, level_num);
                let statement = self
                    .api
                    .make_pld_statement_call(&statement_query, subject, &stage_name, level_num)
                    .await?;

                let mut classes: Vec<DifferentiatedPldClass> = Vec::new();
                for record in building_records {
                    let cell = differentiated::students_in_cell(record, requested, stage_num, level_num);
                    classes.extend(differentiated::classes_for(&cell, record));
                }
                // A level appears only when a requested student sits in it.
                if classes.is_empty() {
                    continue;
                }

                let statement = statement_view(statement);
                pld_levels.push(DifferentiatedPldLevel {
                    pld_level_num: level_num,
                    pld_level_name: format!("Level {level_num}"),
                    can_statement: statement.can_statement,
                    need_practice_statement: statement.need_practice_statement,
                    ready_statement: statement.ready_statement,
                    can_descriptor: statement.can_descriptor,
                    need_practice_descriptor: statement.need_practice_descriptor,
                    ready_descriptor: statement.ready_descriptor,
                    classes,
                });
            }

            stages.push(DifferentiatedPldStage {
                pld_stage_num: stage_num,
                pld_stage_name: stage_name,
                pld_stage_descriptor_text: descriptor.pld_desc,
                pld_levels,
            });
        }
        Ok(stages)
    }

    async fn fetch_differentiated(
        &self,
        panel: &FilterPanel,
    ) -> Result<(String, Vec<DifferentiatedRecord>), DashboardError> {
        let query = query::kto1::differentiated_report_kto1_query(panel, self.user.user_id);
        self.log_query("differentiated_hierarchy", &query);
        let cache_key = self.differentiated_cache_key(panel);
        let result = self
            .api
            .make_differentiated_report_call(&query, &cache_key)
            .await?;
        let records = result
            .and_then(|r| r.test_events.into_iter().next())
            .map(|event| event.differentiated_report_kto1)
            .unwrap_or_default();
        Ok((query, records))
    }

    /// Cache key for the differentiated payload: user id, first character
    /// of the root node type, the parent-location selection, subject and
    /// grade, concatenated.
    fn differentiated_cache_key(&self, panel: &FilterPanel) -> String {
        let root_initial = panel
            .root_location_level()
            .chars()
            .next()
            .map(|c| c.to_string())
            .unwrap_or_default();
        let parent_values: String = panel
            .filter(FilterType::ParentLocations)
            .map(|f| f.selected_items().map(|i| i.value.clone()).collect())
            .unwrap_or_default();
        format!(
            "{}{}{}{}{}",
            self.user.user_id,
            root_initial,
            parent_values,
            panel.subject(),
            panel.selected_values_of(FilterType::Grade),
        )
    }
}
