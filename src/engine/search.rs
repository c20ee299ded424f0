//! Keyword scoring of catalog records against free-text queries.

use crate::domain::ItemRecord;

/// Tokens this short or shorter are ignored.
const MIN_TOKEN_LEN: usize = 2;

const BLOB_WEIGHT: u32 = 1;
const MANUFACTURER_WEIGHT: u32 = 3;
const MODEL_WEIGHT: u32 = 3;
const CATEGORY_WEIGHT: u32 = 2;
const USE_CASE_WEIGHT: u32 = 2;

/// A catalog record paired with its relevance to a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedCandidate<'a> {
    /// The matching record.
    pub item: &'a ItemRecord,
    /// Cumulative keyword score; higher is more relevant.
    pub score: u32,
}

/// The fields a query is scored against.
///
/// Everything is lowercased except the use-case tags, which are matched as
/// written.
struct Searchable<'a> {
    item: &'a ItemRecord,
    blob: String,
    manufacturer: String,
    model: String,
    category: String,
    use_cases: &'a [String],
}

impl<'a> Searchable<'a> {
    fn new(item: &'a ItemRecord) -> Self {
        Self {
            item,
            blob: item.searchable_text(),
            manufacturer: item.manufacturer.to_lowercase(),
            model: item.model.to_lowercase(),
            category: item.category.as_str().to_lowercase(),
            use_cases: &item.use_cases,
        }
    }

    fn score(&self, tokens: &[String]) -> u32 {
        tokens.iter().map(|token| self.score_token(token)).sum()
    }

    fn score_token(&self, token: &str) -> u32 {
        let mut score = 0;
        if self.blob.contains(token) {
            score += BLOB_WEIGHT;
        }
        if self.manufacturer.contains(token) {
            score += MANUFACTURER_WEIGHT;
        }
        if self.model.contains(token) {
            score += MODEL_WEIGHT;
        }
        if self.category.contains(token) {
            score += CATEGORY_WEIGHT;
        }
        if self.use_cases.iter().any(|use_case| use_case.contains(token)) {
            score += USE_CASE_WEIGHT;
        }
        score
    }
}

/// Splits a query into lowercase keyword tokens, dropping short words.
#[must_use]
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|token| token.chars().count() > MIN_TOKEN_LEN)
        .map(ToString::to_string)
        .collect()
}

/// Ranks catalog records against a free-text query.
///
/// Records that match no token are dropped. The rest are ordered by
/// descending score; equal scores keep catalog order. At most `limit`
/// candidates are returned.
///
/// An empty query skips scoring and returns the first `limit` records in
/// catalog order, each with a score of zero.
#[must_use]
pub fn rank<'a>(items: &'a [ItemRecord], query: &str, limit: usize) -> Vec<RankedCandidate<'a>> {
    if query.is_empty() {
        return items
            .iter()
            .take(limit)
            .map(|item| RankedCandidate { item, score: 0 })
            .collect();
    }

    let tokens = tokenize(query);
    tracing::debug!(?tokens, "Scoring {} catalog items", items.len());

    let mut candidates: Vec<_> = items
        .iter()
        .map(Searchable::new)
        .map(|searchable| RankedCandidate {
            item: searchable.item,
            score: searchable.score(&tokens),
        })
        .filter(|candidate| candidate.score > 0)
        .collect();

    // `sort_by` is stable, which keeps ties in catalog order.
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates.truncate(limit);
    candidates
}

/// Like [`rank`], without the scores.
#[must_use]
pub fn search<'a>(items: &'a [ItemRecord], query: &str, limit: usize) -> Vec<&'a ItemRecord> {
    rank(items, query, limit)
        .into_iter()
        .map(|candidate| candidate.item)
        .collect()
}
