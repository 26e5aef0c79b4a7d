use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader};
use std::path::Path;

use indexmap::IndexMap;

use crate::gazetteer::{FeatureKind, GazetteerIndex, Place};
use crate::tokenizer::{tokenize, Token};
use crate::utils::join_with_spaces;

/// Default limit on the number of words in an indexed name.
pub const DEFAULT_MAX_WORDS: usize = 5;

// GeoNames dump columns
const NAME: usize = 1;
const ASCII_NAME: usize = 2;
const FEATURE_CLASS: usize = 6;
const COUNTRY_CODE: usize = 8;
const POPULATION: usize = 14;
const COLUMNS: usize = 19;

/// Builder for gazetteer indexes.
///
/// Feed it place names from GeoNames dumps or one at a time, then turn it
/// into a [`GazetteerIndex`](struct.GazetteerIndex.html). When several
/// names share a lowercase phrase, the one with the highest importance is
/// kept; ties go to the lexicographically smallest canonical form.
#[derive(Debug)]
pub struct GazetteerBuilder {
    max_words: usize,
    min_importance: u64,
    places: IndexMap<String, Place>,
    skipped: usize,
}

impl Default for GazetteerBuilder {
    fn default() -> Self {
        Self {
            max_words: DEFAULT_MAX_WORDS,
            min_importance: 0,
            places: IndexMap::new(),
            skipped: 0,
        }
    }
}

impl GazetteerBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip names longer than `max_words` words.
    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }

    /// Skip names less important than `min_importance`.
    pub fn with_min_importance(mut self, min_importance: u64) -> Self {
        self.min_importance = min_importance;
        self
    }

    /// Add places from a GeoNames dump file (tab separated, one place per line).
    pub fn add_geonames_file<P: AsRef<Path>>(&mut self, path: P) -> io::Result<&mut Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        for line in reader.lines() {
            self.add_geonames_line(&line?);
        }

        Ok(self)
    }

    /// Add one GeoNames dump line. Both its name and its ASCII name are
    /// offered; malformed lines are skipped.
    pub fn add_geonames_line(&mut self, line: &str) -> &mut Self {
        let columns: Vec<&str> = line.trim_end_matches(&['\r', '\n'][..]).split('\t').collect();
        if columns.len() < COLUMNS {
            self.skip(line, "too few columns");
            return self;
        }

        let importance = match columns[POPULATION] {
            "" => 0,
            population => match population.parse() {
                Ok(population) => population,
                Err(_) => {
                    self.skip(line, "bad population");
                    return self;
                }
            },
        };
        let feature = FeatureKind::from_class(columns[FEATURE_CLASS]);
        let country_code = Some(columns[COUNTRY_CODE]).filter(|code| !code.is_empty());

        self.insert(columns[NAME], importance, feature, country_code);
        if columns[ASCII_NAME] != columns[NAME] {
            self.insert(columns[ASCII_NAME], importance, feature, country_code);
        }

        self
    }

    /// Add one place name.
    pub fn add_place(&mut self, name: &str, importance: u64, feature: FeatureKind) -> &mut Self {
        self.insert(name, importance, feature, None)
    }

    /// Add one place name located in the country with the given ISO code.
    pub fn add_place_in(
        &mut self,
        name: &str,
        country_code: &str,
        importance: u64,
        feature: FeatureKind,
    ) -> &mut Self {
        self.insert(name, importance, feature, Some(country_code))
    }

    fn insert(
        &mut self,
        name: &str,
        importance: u64,
        feature: FeatureKind,
        country_code: Option<&str>,
    ) -> &mut Self {
        if importance < self.min_importance {
            self.skip(name, "below minimum importance");
            return self;
        }

        let stream = tokenize(name);
        if stream.words.is_empty() || stream.words.len() > self.max_words {
            self.skip(name, "word count out of range");
            return self;
        }
        if !stream.spans.iter().all(|span| is_plain_separator(span)) {
            self.skip(name, "contains non-word characters");
            return self;
        }
        if !name.chars().any(char::is_uppercase) {
            self.skip(name, "nothing to capitalize");
            return self;
        }

        let phrase = join_with_spaces(stream.words.iter().map(Token::get_normalized));
        let canonical = join_with_spaces(stream.words.iter().map(Token::get_original));
        let candidate = Place {
            canonical,
            importance,
            feature,
            country_code: country_code.map(str::to_owned),
        };

        // currently it's impossible to add things to a hashmap ergonomically
        // using the .entry() API without needlessly cloning the phrase every time
        if let Some(existing) = self.places.get_mut(&phrase) {
            if outranks(&candidate, existing) {
                log::debug!(
                    "{:?} replaces {:?} for {:?}",
                    candidate.canonical,
                    existing.canonical,
                    phrase
                );
                *existing = candidate;
            }
            return self;
        }

        self.places.insert(phrase, candidate);
        self
    }

    /// Build an index from all gathered places.
    pub fn into_index(self) -> GazetteerIndex {
        let max_words = self
            .places
            .keys()
            .map(|phrase| phrase.split(' ').count())
            .max()
            .unwrap_or(0);
        log::info!(
            "built gazetteer index: {} phrases, {} names skipped",
            self.places.len(),
            self.skipped
        );

        GazetteerIndex {
            max_words,
            places: self.places,
        }
    }

    fn skip(&mut self, name: &str, reason: &str) {
        log::debug!("skipping {:?}: {}", name, reason);
        self.skipped += 1;
    }
}

// "St. Louis" is fine, "Route 66" or "Paris (France)" is not
fn is_plain_separator(span: &str) -> bool {
    span.chars().all(|c| c.is_whitespace() || c == '.')
}

fn outranks(candidate: &Place, existing: &Place) -> bool {
    candidate.importance > existing.importance
        || (candidate.importance == existing.importance && candidate.canonical < existing.canonical)
}
