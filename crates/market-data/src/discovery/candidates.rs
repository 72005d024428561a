//! Ticker candidate generation.
//!
//! The provider only answers exact-symbol lookups, so a free-text query is
//! turned into a list of plausible tickers that are verified downstream.
//! Generation is pure and deterministic. Duplicates are kept; the result
//! shaper removes them after resolution.

use crate::constants::EXCHANGE_SUFFIXES;
use crate::models::Candidate;

/// Maps a raw query to ordered symbol guesses.
#[derive(Clone, Debug)]
pub struct CandidateGenerator {
    exchange_suffixes: Vec<String>,
}

impl Default for CandidateGenerator {
    fn default() -> Self {
        Self::new(EXCHANGE_SUFFIXES)
    }
}

impl CandidateGenerator {
    /// Create a generator that tries each of `exchange_suffixes` on the query.
    pub fn new<I, S>(exchange_suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exchange_suffixes: exchange_suffixes.into_iter().map(Into::into).collect(),
        }
    }

    /// All strategies, in priority order:
    /// direct symbol, punctuation variations, short-symbol share classes,
    /// name patterns, exchange suffixes.
    ///
    /// Returns an empty list for a blank query.
    pub fn generate(&self, query: &str) -> Vec<Candidate> {
        let normalized = query.trim().to_uppercase();
        if normalized.is_empty() {
            return Vec::new();
        }

        let mut raw = Vec::new();
        direct_symbol(&normalized, &mut raw);
        punctuation_variations(&normalized, &mut raw);
        short_symbol_classes(&normalized, &mut raw);
        name_patterns(query, &mut raw);
        self.exchange_variants(&normalized, &mut raw);

        raw.into_iter().filter_map(Candidate::new).collect()
    }

    /// Only the name-pattern strategy, for company-name lookups.
    pub fn generate_name_patterns(&self, query: &str) -> Vec<Candidate> {
        let mut raw = Vec::new();
        name_patterns(query, &mut raw);
        raw.into_iter().filter_map(Candidate::new).collect()
    }

    fn exchange_variants(&self, normalized: &str, out: &mut Vec<String>) {
        out.push(normalized.to_string());
        for suffix in &self.exchange_suffixes {
            out.push(format!("{}{}", normalized, suffix));
        }
    }
}

/// A 1-5 letter query is probably already a ticker.
fn direct_symbol(normalized: &str, out: &mut Vec<String>) {
    let len = normalized.chars().count();
    if (1..=5).contains(&len) && normalized.chars().all(|c| c.is_ascii_alphabetic()) {
        out.push(normalized.to_string());
    }
}

/// Class separators differ between venues: BRK-B, BRK.B, BRKB.
fn punctuation_variations(normalized: &str, out: &mut Vec<String>) {
    if normalized.contains('-') {
        out.push(normalized.replace('-', ""));
        out.push(normalized.replace('-', "."));
    }
    if normalized.contains('.') {
        out.push(normalized.replace('.', ""));
        out.push(normalized.replace('.', "-"));
    }
}

/// Share-class and numbered tickers for very short queries.
fn short_symbol_classes(normalized: &str, out: &mut Vec<String>) {
    if normalized.chars().count() <= 3 {
        for suffix in ["A", "B", "1"] {
            out.push(format!("{}{}", normalized, suffix));
        }
    }
}

/// Acronyms and prefixes of a company name. Works on the original query so
/// word boundaries survive.
fn name_patterns(query: &str, out: &mut Vec<String>) {
    let words: Vec<&str> = query.split_whitespace().collect();
    let Some(first) = words.first() else {
        return;
    };
    let first_len = first.chars().count();

    if words.len() >= 2 {
        let acronym: String = words.iter().filter_map(|w| w.chars().next()).collect();
        out.push(acronym.to_uppercase());

        if first_len >= 2 {
            let head: String = first.chars().take(2).collect();
            let tail = words[1].chars().next().map(String::from).unwrap_or_default();
            out.push(format!("{}{}", head, tail).to_uppercase());
        }
    }

    if first_len >= 3 {
        out.push(first.chars().take(3).collect::<String>().to_uppercase());
    }
    if first_len >= 4 {
        out.push(first.chars().take(4).collect::<String>().to_uppercase());
    }
}
