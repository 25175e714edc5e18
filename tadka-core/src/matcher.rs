//! Dish-name matching against the catalogue.
//!
//! Two matchers are provided:
//!
//! - **Strict** ([`Matcher::strict_match`]): normalizes the query and every key,
//!   scores keys by whole-word containment, and picks the most specific one.
//! - **Loose** ([`Matcher::loose_match`]): plain substring containment after
//!   trimming a plural `s` and a trailing "recipe(s)".
//!
//! Both are pure and deterministic. Ties are broken by catalogue order.

use regex::Regex;

use crate::catalogue::{Catalogue, CatalogueEntry, NormalizedKey, VarietyRecord};
use crate::normalize::{normalize, phrase_pattern};

/// Score for a query that equals a key after normalization.
pub const EXACT_SCORE: usize = 100;

/// Base score when a key appears as a phrase inside the query.
/// The key's length is added so longer, more specific keys win.
pub const KEY_IN_QUERY_BASE: usize = 50;

/// Base score when the query appears as a phrase inside a key.
/// The query's length is added.
pub const QUERY_IN_KEY_BASE: usize = 10;

/// How a strict match was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrictMatchKind {
    /// Normalized query equals the normalized key.
    Exact,
    /// The key is a whole phrase inside the query ("fresh prawn biryani" ⊃ "prawn biryani").
    KeyInQuery,
    /// The query is a whole phrase inside the key ("curry" ⊂ "chicken curry").
    QueryInKey,
    /// Nothing scored; the query minus a trailing `s` is a key.
    Singular,
}

/// How a loose match was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LooseMatchKind {
    Exact,
    Partial,
}

#[derive(Debug, Clone, Copy)]
pub struct StrictMatch<'a> {
    pub entry: &'a CatalogueEntry,
    pub kind: StrictMatchKind,
    /// Zero for [`StrictMatchKind::Singular`] matches.
    pub score: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct LooseMatch<'a> {
    pub entry: &'a CatalogueEntry,
    pub kind: LooseMatchKind,
}

/// Matches free-text dish names against a borrowed catalogue.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    catalogue: &'a Catalogue,
}

impl<'a> Matcher<'a> {
    pub fn new(catalogue: &'a Catalogue) -> Self {
        Self { catalogue }
    }

    pub fn catalogue(&self) -> &'a Catalogue {
        self.catalogue
    }

    /// Scored, word-boundary-aware lookup.
    pub fn strict_lookup(&self, query: &str) -> Option<StrictMatch<'a>> {
        let query = normalize(query);
        if query.is_empty() {
            return None;
        }

        let query_pattern = match phrase_pattern(&query) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "Query too large for phrase matching");
                None
            }
        };

        let mut best: Option<StrictMatch<'a>> = None;
        let mut max_score = 0;

        for (entry, key) in self.catalogue.normalized_entries() {
            let Some((score, kind)) = score_key(&query, query_pattern.as_ref(), key) else {
                continue;
            };

            // Strictly greater: the first key seen keeps a tie.
            if score > max_score {
                max_score = score;
                best = Some(StrictMatch { entry, kind, score });
            }
        }

        if best.is_none() {
            if let Some(singular) = query.strip_suffix('s') {
                best = self.catalogue.get(singular).map(|entry| StrictMatch {
                    entry,
                    kind: StrictMatchKind::Singular,
                    score: 0,
                });
            }
        }

        match &best {
            Some(m) => tracing::debug!(
                query = %query,
                key = %m.entry.key,
                score = m.score,
                kind = ?m.kind,
                "Strict catalogue match"
            ),
            None => tracing::debug!(query = %query, "No strict catalogue match"),
        }

        best
    }

    /// Substring lookup with naive plural and "recipe(s)" stripping.
    pub fn loose_lookup(&self, dish_name: &str) -> Option<LooseMatch<'a>> {
        let name = dish_name.to_lowercase();
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        if let Some(entry) = self.catalogue.get(name) {
            return Some(LooseMatch {
                entry,
                kind: LooseMatchKind::Exact,
            });
        }

        let cleaned = strip_loose_suffixes(name);
        if cleaned.is_empty() {
            return None;
        }

        let found = self
            .catalogue
            .entries()
            .iter()
            .find(|entry| entry.key.contains(cleaned) || cleaned.contains(entry.key.as_str()));

        if let Some(entry) = found {
            tracing::debug!(query = %name, key = %entry.key, "Loose catalogue match");
        }

        found.map(|entry| LooseMatch {
            entry,
            kind: LooseMatchKind::Partial,
        })
    }

    /// Varieties for the best strict match, or `None`.
    pub fn strict_match(&self, query: &str) -> Option<&'a [VarietyRecord]> {
        self.strict_lookup(query)
            .map(|m| m.entry.varieties.as_slice())
    }

    /// Varieties for the first loose match, or `None`.
    pub fn loose_match(&self, dish_name: &str) -> Option<&'a [VarietyRecord]> {
        self.loose_lookup(dish_name)
            .map(|m| m.entry.varieties.as_slice())
    }
}

/// Score a normalized key against a normalized query.
/// Returns `None` for a score of zero.
fn score_key(
    query: &str,
    query_pattern: Option<&Regex>,
    key: &NormalizedKey,
) -> Option<(usize, StrictMatchKind)> {
    if key.text.is_empty() {
        return None;
    }

    if query == key.text {
        Some((EXACT_SCORE, StrictMatchKind::Exact))
    } else if key.pattern.is_match(query) {
        Some((
            KEY_IN_QUERY_BASE + key.text.len(),
            StrictMatchKind::KeyInQuery,
        ))
    } else if query_pattern.is_some_and(|p| p.is_match(&key.text)) {
        Some((QUERY_IN_KEY_BASE + query.len(), StrictMatchKind::QueryInKey))
    } else {
        None
    }
}

/// Drop one trailing `s`, then a trailing " recipe" or " recipes".
fn strip_loose_suffixes(name: &str) -> &str {
    let name = name.strip_suffix('s').unwrap_or(name);
    name.strip_suffix(" recipes")
        .or_else(|| name.strip_suffix(" recipe"))
        .unwrap_or(name)
}
