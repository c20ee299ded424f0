//! Constraint-driven recommendations.
//!
//! Candidates pass through a fixed chain of filters, each narrowing the set
//! left by the previous one: budget, then category, then performance tier.
//! The survivors are ordered by use-case fit when a use case is given, and by
//! performance score otherwise.

use crate::domain::{ItemRecord, Requirements};

const USE_CASE_MATCH: u32 = 5;

/// Recommends catalog records for the given requirements.
///
/// With no requirements set, this is the whole catalog ordered by descending
/// performance score. An empty result means nothing satisfied the
/// constraints.
#[must_use]
pub fn recommend<'a>(items: &'a [ItemRecord], requirements: &Requirements) -> Vec<&'a ItemRecord> {
    let mut candidates: Vec<&ItemRecord> = items.iter().collect();

    if let Some(budget) = requirements.budget {
        candidates.retain(|item| item.price <= budget);
    }

    if let Some(category) = requirements.category() {
        candidates.retain(|item| item.category.matches(category));
    }

    if let Some(needs) = requirements.performance_needs {
        let minimum = needs.minimum_score();
        candidates.retain(|item| item.performance_score >= minimum);
    }

    tracing::debug!(
        "{} of {} catalog items satisfy the constraints",
        candidates.len(),
        items.len()
    );

    if let Some(use_case) = requirements.use_case() {
        return rank_by_use_case(candidates, use_case);
    }

    candidates.sort_by(|a, b| b.performance_score.cmp(&a.performance_score));
    candidates
}

fn rank_by_use_case<'a>(candidates: Vec<&'a ItemRecord>, use_case: &str) -> Vec<&'a ItemRecord> {
    let needle = use_case.to_lowercase();
    let mut scored: Vec<(u32, &ItemRecord)> = candidates
        .into_iter()
        .map(|item| (use_case_score(item, &needle), item))
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, item)| item).collect()
}

fn use_case_score(item: &ItemRecord, needle: &str) -> u32 {
    if item.use_cases.join(" ").to_lowercase().contains(needle) {
        USE_CASE_MATCH
    } else {
        0
    }
}
