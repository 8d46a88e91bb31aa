//! Record search - filtering, scoring and ordering of free-text queries
//!
//! Matching is accent and case insensitive. A record qualifies when every
//! whitespace-separated term of the query occurs in at least one of its
//! name, street, block or plaque. Qualifying records are scored on how the
//! whole query relates to the name:
//!
//! | score | condition                         |
//! |-------|-----------------------------------|
//! | 3     | name starts with the query        |
//! | 2     | name contains the query           |
//! | 1     | matched through other fields only |
//!
//! Results are sorted by score, then name, de-duplicated by id and cut to
//! the requested size. Storage applies the same order before its `LIMIT`,
//! so the functions here re-check whatever window it returns.

mod normalize;

use std::cmp::Reverse;
use std::collections::HashSet;

use crate::entities::MemorialRecord;
use crate::value_objects::RecordId;

pub use normalize::normalize;

/// Result size when the caller does not ask for one
pub const DEFAULT_LIMIT: usize = 10;

/// Largest page the full results view may request
pub const MAX_LIMIT: usize = 50;

/// Queries shorter than this yield no suggestions or completions
pub const MIN_PREFIX_CHARS: usize = 2;

/// Suggestions returned per query
pub const SUGGESTION_LIMIT: usize = 5;

/// Completions returned per query
pub const AUTOCOMPLETE_LIMIT: usize = 8;

/// Field offering values to autocomplete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Name,
    Street,
    Block,
}

impl SearchField {
    /// Autocomplete draws from the fields in this order
    pub const ALL: [Self; 3] = [Self::Name, Self::Street, Self::Block];

    /// Most completions taken from this field
    pub fn completion_cap(self) -> usize {
        match self {
            Self::Name => 4,
            Self::Street | Self::Block => 3,
        }
    }
}

/// Fields a record exposes to search
pub trait Searchable {
    fn record_id(&self) -> RecordId;
    fn name(&self) -> &str;
    fn street(&self) -> Option<&str>;
    fn block(&self) -> &str;
    fn plaque(&self) -> &str;

    fn field(&self, field: SearchField) -> Option<&str> {
        match field {
            SearchField::Name => Some(self.name()),
            SearchField::Street => self.street(),
            SearchField::Block => Some(self.block()),
        }
    }
}

impl Searchable for MemorialRecord {
    fn record_id(&self) -> RecordId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn street(&self) -> Option<&str> {
        self.street.as_deref()
    }

    fn block(&self) -> &str {
        &self.block
    }

    fn plaque(&self) -> &str {
        &self.plaque
    }
}

/// Parsed search phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    normalized: String,
    terms: Vec<String>,
}

impl SearchQuery {
    /// Parse a phrase; `None` when it is empty or only whitespace
    pub fn parse(raw: &str) -> Option<Self> {
        let terms: Vec<String> = normalize(raw).split_whitespace().map(String::from).collect();
        if terms.is_empty() {
            return None;
        }
        let normalized = terms.join(" ");
        Some(Self {
            raw: raw.trim().to_string(),
            normalized,
            terms,
        })
    }

    /// Phrase as typed, trimmed
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Folded phrase, terms joined by single spaces
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Folded whitespace-separated terms
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Too short to drive suggestions or completions
    pub fn is_short(&self) -> bool {
        self.normalized.chars().count() < MIN_PREFIX_CHARS
    }

    /// Every term appears in at least one searchable field
    pub fn matches<T: Searchable>(&self, item: &T) -> bool {
        let fields = [
            normalize(item.name()),
            item.street().map(normalize).unwrap_or_default(),
            normalize(item.block()),
            normalize(item.plaque()),
        ];
        self.terms
            .iter()
            .all(|term| fields.iter().any(|field| field.contains(term.as_str())))
    }

    /// Relevance of a record whose folded name is `normalized_name`
    pub fn score(&self, normalized_name: &str) -> u8 {
        if normalized_name.starts_with(&self.normalized) {
            3
        } else if normalized_name.contains(&self.normalized) {
            2
        } else {
            1
        }
    }
}

/// Clamp a requested page size into `1..=MAX_LIMIT`
pub fn clamp_limit(requested: Option<i64>) -> usize {
    match requested {
        None => DEFAULT_LIMIT,
        Some(n) if n < 1 => 1,
        Some(n) => usize::try_from(n).map_or(MAX_LIMIT, |n| n.min(MAX_LIMIT)),
    }
}

/// Filter, score, order, de-duplicate and truncate `candidates`
pub fn rank<T: Searchable>(query: &SearchQuery, candidates: Vec<T>, limit: usize) -> Vec<T> {
    let mut scored: Vec<(u8, String, T)> = candidates
        .into_iter()
        .filter(|item| query.matches(item))
        .map(|item| {
            let name = normalize(item.name());
            (query.score(&name), name, item)
        })
        .collect();

    scored.sort_by(|a, b| {
        (Reverse(a.0), &a.1, a.2.name()).cmp(&(Reverse(b.0), &b.1, b.2.name()))
    });

    dedup_truncate(scored.into_iter().map(|(_, _, item)| item), limit)
}

/// Name-only matches, prefix matches first, capped at [`SUGGESTION_LIMIT`]
pub fn suggest<T: Searchable>(query: &SearchQuery, candidates: Vec<T>) -> Vec<T> {
    if query.is_short() {
        return Vec::new();
    }

    let mut matching: Vec<(bool, String, T)> = candidates
        .into_iter()
        .filter_map(|item| {
            let name = normalize(item.name());
            name.contains(query.normalized())
                .then(|| (!name.starts_with(query.normalized()), name, item))
        })
        .collect();

    matching.sort_by(|a, b| (a.0, &a.1, a.2.name()).cmp(&(b.0, &b.1, b.2.name())));

    dedup_truncate(matching.into_iter().map(|(_, _, item)| item), SUGGESTION_LIMIT)
}

/// Distinct values of one field that contain the query
///
/// Values are trimmed, blanks dropped, ordered by folded form and capped at
/// the field's [`SearchField::completion_cap`].
pub fn field_completions<'a>(
    query: &SearchQuery,
    field: SearchField,
    values: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let mut found: Vec<(String, &str)> = values
        .into_iter()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| (normalize(value), value))
        .filter(|(folded, _)| folded.contains(query.normalized()))
        .collect();
    found.sort_unstable();
    found.dedup_by(|a, b| a.1 == b.1);
    found
        .into_iter()
        .take(field.completion_cap())
        .map(|(_, value)| value.to_string())
        .collect()
}

/// Join per-field completions in [`SearchField::ALL`] order
///
/// Repeats across fields keep their first occurrence; the list is capped at
/// [`AUTOCOMPLETE_LIMIT`]. Short queries complete to nothing.
pub fn merge_completions(
    query: &SearchQuery,
    per_field: impl IntoIterator<Item = Vec<String>>,
) -> Vec<String> {
    if query.is_short() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    per_field
        .into_iter()
        .flatten()
        .filter(|value| seen.insert(value.clone()))
        .take(AUTOCOMPLETE_LIMIT)
        .collect()
}

fn dedup_truncate<T: Searchable>(items: impl Iterator<Item = T>, limit: usize) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .filter(|item| seen.insert(item.record_id()))
        .take(limit)
        .collect()
}
