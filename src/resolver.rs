//! Greedy longest-match-first phrase resolution.
//!
//! Start positions are visited left to right. At each position the longest
//! window that matches either table is taken and the scan resumes right
//! after it; when nothing matches, the scan moves on by one word. There is
//! no backtracking, so a match can block a longer one that would have
//! started a word later: "east new york" with entries for "east new" and
//! "new york" yields "east new" and leaves "york" alone. Results are
//! reproducible for a given pair of tables.

use serde::Serialize;

use crate::gazetteer::{FeatureKind, Gazetteer};
use crate::rules::{RuleCategory, RuleTable};
use crate::tokenizer::Token;
use crate::utils::{is_casing_of, join_with_spaces, keeps_non_letters};

/// Which table produced a match.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(tag = "table", content = "kind", rename_all = "snake_case")]
pub enum MatchSource {
    Rule(RuleCategory),
    Gazetteer(FeatureKind),
}

impl MatchSource {
    pub fn description(self) -> &'static str {
        match self {
            MatchSource::Rule(category) => category.description(),
            MatchSource::Gazetteer(_) => "Geographic name",
        }
    }
}

/// An accepted window of words `start..end` and its canonical form.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    pub start: usize,
    pub end: usize,
    pub canonical: String,
    pub source: MatchSource,
    /// Gazetteer importance; always zero for rules.
    pub importance: u64,
}

impl MatchCandidate {
    /// Canonical words, one per word of the window.
    pub fn words(&self) -> std::str::Split<'_, char> {
        self.canonical.split(' ')
    }
}

/// Non-overlapping matches sorted by start, plus how many gazetteer
/// lookups failed while resolving them.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub matches: Vec<MatchCandidate>,
    pub failed_lookups: usize,
}

impl Resolution {
    /// True when gazetteer failures may have hidden matches.
    pub fn is_degraded(&self) -> bool {
        self.failed_lookups > 0
    }
}

pub fn resolve<G>(words: &[Token], rules: &RuleTable, gazetteer: &G) -> Resolution
where
    G: Gazetteer + ?Sized,
{
    let max_window = rules.max_words().max(gazetteer.max_words());
    let mut resolution = Resolution::default();

    let mut start = 0;
    while start < words.len() {
        let longest = max_window.min(words.len() - start);
        let found = (1..=longest)
            .rev()
            .find_map(|size| match_window(words, start, size, rules, gazetteer, &mut resolution));

        match found {
            Some(candidate) => {
                start = candidate.end;
                resolution.matches.push(candidate);
            }
            None => start += 1,
        }
    }

    resolution
}

fn match_window<G>(
    words: &[Token],
    start: usize,
    size: usize,
    rules: &RuleTable,
    gazetteer: &G,
    resolution: &mut Resolution,
) -> Option<MatchCandidate>
where
    G: Gazetteer + ?Sized,
{
    let window = &words[start..start + size];
    let phrase = join_with_spaces(window.iter().map(Token::get_normalized));
    let fits = |canonical: &str| {
        is_casing_of(canonical, window.iter().map(Token::get_normalized))
            && keeps_non_letters(canonical, window.iter().map(Token::get_original))
    };

    // rules take precedence over geographic homographs ("may", "march")
    if size <= rules.max_words() {
        if let Some(rule) = rules.lookup(&phrase) {
            if fits(&rule.canonical) {
                return Some(MatchCandidate {
                    start,
                    end: start + size,
                    canonical: rule.canonical.clone(),
                    source: MatchSource::Rule(rule.category),
                    importance: 0,
                });
            }
        }
    }

    if size <= gazetteer.max_words() {
        match gazetteer.lookup(&phrase) {
            Ok(Some(place)) if fits(&place.canonical) => {
                return Some(MatchCandidate {
                    start,
                    end: start + size,
                    canonical: place.canonical,
                    source: MatchSource::Gazetteer(place.feature),
                    importance: place.importance,
                });
            }
            Ok(_) => {}
            Err(error) => {
                log::debug!("lookup of {:?} failed: {}", phrase, error);
                resolution.failed_lookups += 1;
            }
        }
    }

    None
}
