use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::TableLoadingError;
use crate::tokenizer::{tokenize, Token};
use crate::utils::{is_casing_of, join_with_spaces, title_case};

/// Closed grammatical categories that are always capitalized.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    Day,
    Month,
    Holiday,
    Language,
    MilitaryRank,
    Title,
    Religion,
    Deity,
}

impl RuleCategory {
    pub fn description(self) -> &'static str {
        match self {
            RuleCategory::Day => "Day of week",
            RuleCategory::Month => "Month",
            RuleCategory::Holiday => "Holiday",
            RuleCategory::Language => "Language",
            RuleCategory::MilitaryRank => "Military rank",
            RuleCategory::Title => "Title",
            RuleCategory::Religion => "Religion",
            RuleCategory::Deity => "Deity",
        }
    }
}

const BUILTIN_RULES: &[(RuleCategory, &[&str])] = &[
    (
        RuleCategory::Day,
        &["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"],
    ),
    (
        RuleCategory::Month,
        &[
            "january", "february", "march", "april", "may", "june", "july", "august",
            "september", "october", "november", "december",
        ],
    ),
    (
        RuleCategory::Holiday,
        &[
            "christmas", "easter", "thanksgiving", "halloween", "valentine",
            "independence day", "new year",
        ],
    ),
    (
        RuleCategory::Language,
        &[
            "english", "spanish", "french", "german", "italian", "chinese", "japanese",
            "russian", "arabic",
        ],
    ),
    (
        RuleCategory::MilitaryRank,
        &[
            "captain", "colonel", "general", "lieutenant", "sergeant", "major", "admiral",
            "commander",
        ],
    ),
    (
        RuleCategory::Title,
        &["president", "senator", "governor", "mayor", "doctor", "professor", "judge", "reverend"],
    ),
    (
        RuleCategory::Religion,
        &["christianity", "islam", "judaism", "buddhism", "hinduism"],
    ),
    (RuleCategory::Deity, &["god", "allah", "buddha", "jesus", "christ"]),
];

/// One line of a rule file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RuleEntry {
    pub phrase: String,
    pub canonical: String,
    pub category: RuleCategory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub canonical: String,
    pub category: RuleCategory,
}

/// Lowercase phrase to canonical form, for closed grammatical categories.
///
/// Immutable once built. The `Default` table holds the built-in categories.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: HashMap<String, Rule>,
    max_words: usize,
}

impl RuleTable {
    /// Build a table, rejecting duplicate phrases and canonical forms that
    /// are not a casing variant of their phrase.
    pub fn from_entries<I>(entries: I) -> Result<Self, TableLoadingError>
    where
        I: IntoIterator<Item = RuleEntry>,
    {
        let mut table = RuleTable {
            rules: HashMap::new(),
            max_words: 0,
        };

        for entry in entries {
            let phrase = normalize_phrase(&entry.phrase)?;
            let canonical = join_with_spaces(
                tokenize(&entry.canonical)
                    .words
                    .iter()
                    .map(Token::get_original),
            );

            if !is_casing_of(&canonical, phrase.split(' ')) {
                return Err(TableLoadingError::InvalidEntry {
                    phrase: entry.phrase,
                    reason: "canonical form must match the phrase word for word, differing only in case",
                });
            }

            if table.rules.contains_key(&phrase) {
                return Err(TableLoadingError::DuplicatePhrase(phrase));
            }

            table.insert(phrase, canonical, entry.category);
        }

        log::info!(
            "loaded rule table: {} phrases, up to {} words",
            table.len(),
            table.max_words
        );
        Ok(table)
    }

    /// Load a JSON list of `{"phrase", "canonical", "category"}` entries.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, TableLoadingError> {
        let mut string = String::new();
        File::open(path)?.read_to_string(&mut string)?;
        let entries: Vec<RuleEntry> = serde_json::from_str(&string)?;

        Self::from_entries(entries)
    }

    /// Look up a normalized phrase (lowercase words joined by single spaces).
    pub fn lookup(&self, phrase: &str) -> Option<&Rule> {
        self.rules.get(phrase)
    }

    /// Length in words of the longest phrase in the table.
    pub fn max_words(&self) -> usize {
        self.max_words
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of phrases in each category present in the table.
    pub fn category_counts(&self) -> BTreeMap<RuleCategory, usize> {
        let mut counts = BTreeMap::new();
        for rule in self.rules.values() {
            *counts.entry(rule.category).or_insert(0) += 1;
        }
        counts
    }

    fn insert(&mut self, phrase: String, canonical: String, category: RuleCategory) {
        let words = phrase.split(' ').count();
        self.max_words = self.max_words.max(words);
        self.rules.insert(
            phrase,
            Rule {
                canonical,
                category,
            },
        );
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        let mut table = RuleTable {
            rules: HashMap::new(),
            max_words: 0,
        };
        for &(category, phrases) in BUILTIN_RULES {
            for phrase in phrases {
                table.insert(phrase.to_string(), title_case(phrase), category);
            }
        }
        table
    }
}

/// Built-in rules as entries, e.g. to seed a custom rule file.
pub fn builtin_entries() -> Vec<RuleEntry> {
    BUILTIN_RULES
        .iter()
        .flat_map(|&(category, phrases)| {
            phrases.iter().map(move |phrase| RuleEntry {
                phrase: phrase.to_string(),
                canonical: title_case(phrase),
                category,
            })
        })
        .collect()
}

fn normalize_phrase(phrase: &str) -> Result<String, TableLoadingError> {
    let stream = tokenize(phrase);

    if stream.words.is_empty() {
        return Err(TableLoadingError::InvalidEntry {
            phrase: phrase.to_owned(),
            reason: "phrase has no words",
        });
    }

    if !stream
        .spans
        .iter()
        .all(|span| span.chars().all(char::is_whitespace))
    {
        return Err(TableLoadingError::InvalidEntry {
            phrase: phrase.to_owned(),
            reason: "phrase may only contain words separated by whitespace",
        });
    }

    Ok(join_with_spaces(
        stream.words.iter().map(Token::get_normalized),
    ))
}
