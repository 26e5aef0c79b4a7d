use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;

use crate::config::Config;
use crate::errors::TableLoadingError;
use crate::gazetteer::{Gazetteer, GazetteerIndex};
use crate::reconstructor::{reconstruct, render_match};
use crate::resolver::{resolve, MatchSource};
use crate::rules::RuleTable;
use crate::tokenizer::{tokenize, Token};
use crate::utils::join_with_spaces;

/// Capitalization corrector itself.
///
/// Holds read-only tables and can be shared between threads; each call is
/// independent of every other. See [crate documentation](index.html) for
/// examples.
#[derive(Clone)]
pub struct Corrector {
    rules: Arc<RuleTable>,
    gazetteer: Arc<dyn Gazetteer + Send + Sync>,
}

impl Corrector {
    pub fn new(rules: Arc<RuleTable>, gazetteer: Arc<dyn Gazetteer + Send + Sync>) -> Self {
        Self { rules, gazetteer }
    }

    /// A corrector that knows no place names.
    pub fn with_rules(rules: RuleTable) -> Self {
        Self::new(Arc::new(rules), Arc::new(GazetteerIndex::default()))
    }

    /// Load the tables named in `config`.
    pub fn from_config(config: &Config) -> Result<Self, TableLoadingError> {
        let rules = match &config.rules {
            Some(path) => RuleTable::load_from_file(path)?,
            None => RuleTable::default(),
        };
        let gazetteer = match &config.index {
            Some(path) => GazetteerIndex::load_from_file(path)?,
            None => GazetteerIndex::default(),
        };

        Ok(Self::new(Arc::new(rules), Arc::new(gazetteer)))
    }

    /// Restore capitalization of known names in `text`.
    ///
    /// Everything except the letters of matched words is returned as is.
    pub fn correct(&self, text: &str) -> String {
        self.correct_with_report(text).text
    }

    /// Like [`correct`](#method.correct), but also describes what changed.
    pub fn correct_with_report(&self, text: &str) -> Correction {
        let stream = tokenize(text);
        let resolution = resolve(&stream.words, &self.rules, self.gazetteer.as_ref());

        if resolution.is_degraded() {
            log::warn!(
                "{} gazetteer lookups failed, correcting with rules only where they did",
                resolution.failed_lookups
            );
        }

        let changes: Vec<Change> = resolution
            .matches
            .iter()
            .filter_map(|candidate| {
                let start = stream.words[candidate.start].start;
                let end = stream.words[candidate.end - 1].end();
                let original = &text[start..end];
                let corrected = render_match(&stream, candidate);

                if original == corrected {
                    return None;
                }

                Some(Change {
                    start,
                    end,
                    original: original.to_owned(),
                    corrected,
                    reason: candidate.source.description(),
                    source: candidate.source,
                    importance: candidate.importance,
                })
            })
            .collect();

        let mut stats = BTreeMap::new();
        for change in &changes {
            *stats.entry(change.reason).or_insert(0) += 1;
        }

        Correction {
            text: reconstruct(&stream, &resolution.matches),
            changes,
            stats,
            degraded: resolution.is_degraded(),
        }
    }

    /// Check whether a single word or name, taken as a whole, is a known
    /// name and how it should be written. `None` when it isn't known.
    pub fn check(&self, name: &str) -> Option<Check> {
        let stream = tokenize(name);
        let resolution = resolve(&stream.words, &self.rules, self.gazetteer.as_ref());

        match resolution.matches.as_slice() {
            [candidate] if candidate.start == 0 && candidate.end == stream.words.len() => {
                let correct = render_match(&stream, candidate);
                let start = stream.words[0].start;
                let end = stream.words[candidate.end - 1].end();
                Some(Check {
                    needs_correction: name[start..end] != correct,
                    correct,
                    reason: candidate.source.description(),
                    source: candidate.source,
                })
            }
            _ => None,
        }
    }

    /// Describe a place by name, e.g. "Paris (Populated place) in FR, population: 2,138,551".
    pub fn describe(&self, name: &str) -> Option<String> {
        let stream = tokenize(name);
        let phrase = join_with_spaces(stream.words.iter().map(Token::get_normalized));
        if phrase.is_empty() {
            return None;
        }

        match self.gazetteer.lookup(&phrase) {
            Ok(place) => place.map(|place| place.describe()),
            Err(error) => {
                log::warn!("cannot describe {:?}: {}", name, error);
                None
            }
        }
    }
}

/// Result of [`Corrector::check`](struct.Corrector.html#method.check).
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Check {
    pub needs_correction: bool,
    pub correct: String,
    pub reason: &'static str,
    pub source: MatchSource,
}

/// Result of [`Corrector::correct_with_report`](struct.Corrector.html#method.correct_with_report).
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Correction {
    /// Corrected text.
    pub text: String,
    /// Matches that actually changed the text, in order.
    pub changes: Vec<Change>,
    /// Number of changes per reason.
    pub stats: BTreeMap<&'static str, usize>,
    /// Set when gazetteer lookups failed and some names may have been missed.
    pub degraded: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Change {
    /// Byte range of the change in the input text.
    pub start: usize,
    pub end: usize,
    pub original: String,
    pub corrected: String,
    pub reason: &'static str,
    pub source: MatchSource,
    pub importance: u64,
}

/// A corrector that can be replaced while in use.
///
/// Readers take a cheap `Arc` snapshot; a reload builds a whole new
/// `Corrector` and swaps it in, so calls already running keep the tables
/// they started with.
pub struct SharedCorrector {
    current: RwLock<Arc<Corrector>>,
}

impl SharedCorrector {
    pub fn new(corrector: Corrector) -> Self {
        Self {
            current: RwLock::new(Arc::new(corrector)),
        }
    }

    pub fn get(&self) -> Arc<Corrector> {
        // tables are never mutated in place, so a poisoned lock still holds a valid corrector
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in `corrector`, returning the previous one.
    pub fn replace(&self, corrector: Corrector) -> Arc<Corrector> {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *current, Arc::new(corrector))
    }

    pub fn correct(&self, text: &str) -> String {
        self.get().correct(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GazetteerBuilder;
    use crate::gazetteer::FeatureKind;
    use crate::rules::RuleCategory;

    fn corrector() -> Corrector {
        let mut builder = GazetteerBuilder::new();
        builder
            .add_place("New York", 8_000_000, FeatureKind::PopulatedPlace)
            .add_place("Mississippi River", 0, FeatureKind::Hydrographic);
        Corrector::new(Arc::new(RuleTable::default()), Arc::new(builder.into_index()))
    }

    #[test]
    fn corrects_rules_and_places() {
        assert_eq!(
            corrector().correct("I visited new york on monday."),
            "I visited New York on Monday."
        );
    }

    #[test]
    fn report_lists_only_real_changes() {
        let report =
            corrector().correct_with_report("On Monday we left new\nyork for the MISSISSIPPI river.");

        assert_eq!(
            report.text,
            "On Monday we left New\nYork for the Mississippi River."
        );
        assert!(!report.degraded);
        assert_eq!(report.changes.len(), 2);

        let first = &report.changes[0];
        assert_eq!(first.original, "new\nyork");
        assert_eq!(first.corrected, "New\nYork");
        assert_eq!(first.reason, "Geographic name");
        assert_eq!(first.importance, 8_000_000);
        assert_eq!(&report.text[first.start..first.end], "New\nYork");

        assert_eq!(report.stats.get("Geographic name"), Some(&2));
        assert_eq!(report.stats.get("Day of week"), None);
    }

    #[test]
    fn report_serializes_sources() {
        let report = corrector().correct_with_report("see you in june");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["changes"][0]["source"]["table"], "rule");
        assert_eq!(json["changes"][0]["source"]["kind"], "month");
        assert_eq!(report.changes[0].source, MatchSource::Rule(RuleCategory::Month));
    }

    #[test]
    fn checks_single_names() {
        let corrector = corrector();

        let check = corrector.check("mississippi river").unwrap();
        assert!(check.needs_correction);
        assert_eq!(check.correct, "Mississippi River");
        assert_eq!(check.reason, "Geographic name");

        let check = corrector.check("Monday").unwrap();
        assert!(!check.needs_correction);
        assert_eq!(check.source, MatchSource::Rule(RuleCategory::Day));

        assert_eq!(corrector.check("visited new york"), None);
        assert_eq!(corrector.check("spring"), None);
        assert_eq!(corrector.check(""), None);
    }

    #[test]
    fn describes_places() {
        let mut builder = GazetteerBuilder::new();
        builder.add_place_in("New York", "US", 8_336_817, FeatureKind::PopulatedPlace);
        let corrector = Corrector::new(Arc::new(RuleTable::default()), Arc::new(builder.into_index()));

        assert_eq!(
            corrector.describe("new YORK").as_deref(),
            Some("New York (Populated place) in US, population: 8,336,817")
        );
        assert_eq!(corrector.describe("monday"), None);
        assert_eq!(corrector.describe("..."), None);
    }

    #[test]
    fn rules_only_corrector_ignores_places() {
        let corrector = Corrector::with_rules(RuleTable::default());
        assert_eq!(
            corrector.correct("colonel mustard in new york"),
            "Colonel mustard in new york"
        );
    }

    #[test]
    fn loads_from_config() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut builder = GazetteerBuilder::new();
        builder.add_place("Wilmington", 70_000, FeatureKind::PopulatedPlace);
        builder.into_index().save_to_file(file.path()).unwrap();

        let config = Config {
            index: Some(file.path().to_owned()),
            ..Config::default()
        };
        let corrector = Corrector::from_config(&config).unwrap();
        assert_eq!(corrector.correct("wilmington in may"), "Wilmington in May");
    }

    #[test]
    fn shared_corrector_swaps_tables() {
        let shared = SharedCorrector::new(Corrector::with_rules(RuleTable::default()));
        let before = shared.get();
        assert_eq!(shared.correct("new york"), "new york");

        let previous = shared.replace(corrector());
        assert!(Arc::ptr_eq(&previous, &before));
        assert_eq!(shared.correct("new york"), "New York");
        assert_eq!(before.correct("new york"), "new york");
    }

    #[test]
    fn corrector_is_shareable_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Corrector>();
        assert_send_sync::<SharedCorrector>();
    }
}
