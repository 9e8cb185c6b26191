//! Assembly of per-domain narrative text for the profile narrative report.

use flexdash_types::{Band, DomainNarrative};

use crate::api::models::{BandRange, DomainScore, NarrativeLevel, SubjectGradeDomains};

/// Placeholder narrative shown when a domain score arrived without its
/// performance levels. Renders as a per-domain error, not a failed report.
pub const BAD_DATA_MESSAGE: &str = "Error. Bad data.";

/// Narrative copy for a performance level id; empty when the lookup lacks
/// the level.
pub fn performance_level_text(levels: &[NarrativeLevel], level_id: i64) -> String {
    levels
        .iter()
        .find(|l| l.id == level_id)
        .map(|l| l.text.clone())
        .unwrap_or_default()
}

/// Build the narrative entry for one scored domain. The lookup table keys
/// by domain id; the copy carries a `{firstName}` placeholder filled per
/// student.
pub fn domain_narrative(lookup: &SubjectGradeDomains, score: &DomainScore, first_name: &str) -> DomainNarrative {
    let Some(level) = score.performance_levels.first() else {
        return DomainNarrative {
            id: Some(score.id),
            name: Some(score.name.clone()),
            error_message: Some(BAD_DATA_MESSAGE.to_string()),
            ..DomainNarrative::default()
        };
    };

    let text = lookup
        .domains
        .iter()
        .find(|d| d.id == score.id)
        .map(|d| d.text.replace("{firstName}", first_name))
        .unwrap_or_default();
    let performance_text = performance_level_text(&lookup.performance_levels, level.id)
        .replace("{firstName}", first_name);

    DomainNarrative {
        id: Some(score.id),
        name: Some(score.name.clone()),
        performance_text: Some(performance_text),
        text: Some(text),
        performance_level_id: Some(level.id),
        error_message: None,
    }
}

pub fn build_bands(ranges: &[BandRange]) -> Vec<Band> {
    ranges
        .iter()
        .map(|r| Band {
            id: r.id,
            name: r.name.clone(),
            lower: r.lower,
            upper: r.upper,
        })
        .collect()
}
