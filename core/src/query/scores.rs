//! Queries for the test-scores card, domain cards and the ability matrix.

use super::{push_arg, scope_args};
use crate::panel::FilterPanel;

/// Optional drill arguments shared by the score-shaped queries. Order is
/// fixed so query text stays deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreArgs<'a> {
    pub performance_band: Option<&'a str>,
    pub domain_id: Option<&'a str>,
    pub domain_level: Option<&'a str>,
}

impl ScoreArgs<'_> {
    fn append_to(&self, args: &mut String) {
        push_arg(args, "performanceBand", self.performance_band.unwrap_or(""));
        push_arg(args, "domainId", self.domain_id.unwrap_or(""));
        push_arg(args, "domainLevel", self.domain_level.unwrap_or(""));
    }
}

pub fn test_scores_query(panel: &FilterPanel, score_args: ScoreArgs<'_>, user_id: i64) -> String {
    let mut args = scope_args(panel);
    score_args.append_to(&mut args);
    if panel.is_cogat {
        args.push_str(", cogat: true");
    }

    format!(
        "query {{ user(userId: {user_id}) {{ testEvents({args}) \
         {{ testEventId name date subject isLongitudinal isCogat \
         testScore {{ subject standardScore scores {{ value \
         performanceBands {{ id name numberOfStudents percent lower upper standardScore npr }} }} }} }} }} }}",
    )
}

pub fn domains_query(panel: &FilterPanel, band_id: Option<&str>, user_id: i64) -> String {
    let mut args = scope_args(panel);
    push_arg(&mut args, "performanceBand", band_id.unwrap_or(""));
    if panel.is_cogat {
        args.push_str(", cogat: true");
    }

    format!(
        "query {{ user(userId: {user_id}) {{ testEvents({args}) \
         {{ testEventId domainScores {{ id name description \
         performanceLevels {{ id description numberOfStudents percent }} }} }} }} }}",
    )
}

pub fn performance_level_matrix_query(
    panel: &FilterPanel,
    content_type: &str,
    content_name: &str,
    score_args: ScoreArgs<'_>,
    user_id: i64,
) -> String {
    let mut args = scope_args(panel);
    push_arg(&mut args, "contentType", content_type);
    push_arg(&mut args, "contentName", content_name);
    score_args.append_to(&mut args);

    format!(
        "query {{ user(userId: {user_id}) {{ testEvents({args}) \
         {{ testEventId performanceLevelMatrix {{ dataPoints {{ abilityAchievement studCount }} }} }} }} }}",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexdash_types::LocationNode;

    fn panel() -> FilterPanel {
        FilterPanel::new(vec![LocationNode::new(10, "district")])
    }

    #[test]
    fn test_score_args_append_in_fixed_order() {
        let query = test_scores_query(
            &panel(),
            ScoreArgs {
                performance_band: Some("2"),
                domain_id: Some("11"),
                domain_level: None,
            },
            7,
        );
        let band = query.find("performanceBand").unwrap();
        let domain = query.find("domainId").unwrap();
        assert!(band < domain);
        assert!(!query.contains("domainLevel"));
    }

    #[test]
    fn test_matrix_query_carries_content_identity() {
        let query = performance_level_matrix_query(&panel(), "domain", "Algebra", ScoreArgs::default(), 7);
        assert!(query.contains("contentType: \"domain\""));
        assert!(query.contains("contentName: \"Algebra\""));
        assert!(query.contains("abilityAchievement studCount"));
    }
}
