//! Cogat roster: the fixed ability-score grid (verbal, quantitative,
//! nonverbal and the four composites).

use flexdash_types::{CogatRosterModel, CogatRosterValue, ReportResult, TableColumn};

use super::Dashboard;
use crate::error::DashboardError;
use crate::query;
use crate::query::roster::CogatRosterArgs;

/// Ability columns after the name column; field names match the serialized
/// row fields.
const ABILITY_COLUMNS: [(&str, &str, &str); 9] = [
    ("SS", "Standard Score", "ss"),
    ("NPR", "National Percentile Rank", "npr"),
    ("V", "Verbal", "verbal"),
    ("Q", "Quantitative", "quantitative"),
    ("N", "Nonverbal", "non_verbal"),
    ("VQ", "Verbal-Quantitative", "comp_vq"),
    ("VN", "Verbal-Nonverbal", "comp_vn"),
    ("QN", "Quantitative-Nonverbal", "comp_qn"),
    ("VQN", "Verbal-Quantitative-Nonverbal", "comp_vqn"),
];

impl Dashboard {
    pub async fn get_cogat_roster(
        &self,
        app_path: &str,
        roster_args: CogatRosterArgs<'_>,
    ) -> Result<ReportResult<CogatRosterModel>, DashboardError> {
        let panel = self.require_panel()?;
        let query = query::roster::cogat_roster_query(&panel, roster_args, self.user.user_id);
        let Some(event) = self.fetch_event("cogat_roster", &query).await? else {
            return Ok(ReportResult::no_data());
        };
        let records = event.cogat_roster.map(|r| r.records).unwrap_or_default();
        if records.is_empty() {
            return Ok(ReportResult::no_data());
        }

        let roster_level = if roster_args.students {
            "students".to_string()
        } else {
            panel.child_location_node_type().unwrap_or("building").to_string()
        };

        let name_title = if roster_args.students {
            "Student Name".to_string()
        } else {
            format!("{} Comparison", crate::flatten::capitalize(&roster_level))
        };
        let mut columns = vec![TableColumn::scalar(name_title.clone(), name_title, "node_name")];
        for (title, title_full, field) in ABILITY_COLUMNS {
            columns.push(TableColumn::scalar(title, title_full, field));
        }

        let values = records
            .into_iter()
            .map(|record| {
                let link = if roster_args.students {
                    "#".to_string()
                } else {
                    format!(
                        "{app_path}/api/Dashboard/DrillDownLocations?id={}&name={}&type={}",
                        record.id, record.name, roster_level
                    )
                };
                CogatRosterValue {
                    node_id: record.id,
                    node_name: record.name,
                    npr: record.npr,
                    ss: record.test_score,
                    verbal: record.verbal,
                    quantitative: record.quantitative,
                    non_verbal: record.non_verbal,
                    comp_vq: record.comp_vq,
                    comp_vn: record.comp_vn,
                    comp_qn: record.comp_qn,
                    comp_vqn: record.comp_vqn,
                    link,
                }
            })
            .collect();

        Ok(ReportResult::data(CogatRosterModel {
            graph_ql_query: self.diagnostic(&query),
            roster_type: if roster_args.students { "students" } else { "compare" }.to_string(),
            roster_level,
            columns,
            values,
        }))
    }
}
