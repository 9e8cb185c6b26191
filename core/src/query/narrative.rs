//! Queries for the profile narrative and its two lookup tables.

use flexdash_types::FilterType;

use super::{gql_escape, push_arg};
use crate::panel::FilterPanel;

/// Full test-event history for one student, scoped to the panel's subject.
pub fn profile_narrative_query(panel: &FilterPanel, student_id: &str) -> String {
    let mut args = format!("userId: {}", gql_escape(student_id));
    push_arg(&mut args, "subject", &panel.subject());
    push_arg(&mut args, "testEventId", &panel.selected_ids_of(FilterType::TestEvent));

    let event_fields = "testEventId testEventName testDate subject subjectName grade { name } \
         testScore { subject standardScore scores { value performanceBands { id name lower upper standardScore npr } } }";
    format!(
        "query {{ student({args}) {{ userId externalId name {{ firstName lastName }} \
         currentTestEvent {{ {event_fields} \
         district {{ name childLocations {{ name childLocations {{ name }} }} }} \
         domainScores {{ id name description performanceLevels {{ id description numberOfStudents percent }} }} }} \
         testEvents {{ {event_fields} }} }} }}",
    )
}

/// Narrative copy for every domain and performance level of one
/// subject-grade pair. Keyed by (subject, grade) for client-side caching.
pub fn narrative_lookup_query(subject: &str, grade: &str) -> String {
    format!(
        "query {{ subjectGrade(subject: \"{}\", grade: \"{}\") \
         {{ subject {{ subjectAbbreviation }} domains {{ id name text }} \
         performanceLevels {{ id text }} }} }}",
        gql_escape(subject),
        gql_escape(grade),
    )
}

/// Standard-score band boundaries for one subject-grade pair.
pub fn standard_score_range_query(subject: &str, grade: &str) -> String {
    format!(
        "query {{ standardScoreRanges(subject: \"{}\", grade: \"{}\") \
         {{ id name lower upper }} }}",
        gql_escape(subject),
        gql_escape(grade),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexdash_types::{Filter, FilterItem, LocationNode};

    #[test]
    fn test_profile_narrative_query_scopes_subject_from_panel() {
        let mut panel = FilterPanel::new(vec![LocationNode::new(10, "district")]);
        panel.set_filter(Filter {
            filter_type: FilterType::Subject,
            name: "Subject".into(),
            node_type: None,
            items: vec![FilterItem::new("1", "Reading", true)],
        });

        let query = profile_narrative_query(&panel, "5001");
        assert!(query.contains("student(userId: 5001, subject: \"Reading\")"));
        assert!(query.contains("currentTestEvent"));
    }

    #[test]
    fn test_lookup_queries_embed_their_cache_key_fields() {
        let query = narrative_lookup_query("Math", "K");
        assert!(query.contains("subject: \"Math\""));
        assert!(query.contains("grade: \"K\""));

        let ranges = standard_score_range_query("Math", "3");
        assert!(ranges.contains("standardScoreRanges"));
        assert!(ranges.contains("lower upper"));
    }
}
