use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::{IndexSavingError, LookupError, TableLoadingError};
use crate::utils::{group_thousands, is_casing_of};

/// GeoNames feature classes.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Administrative,
    Hydrographic,
    Area,
    PopulatedPlace,
    Road,
    Spot,
    Hypsographic,
    Undersea,
    Vegetation,
    Unknown,
}

impl FeatureKind {
    /// Map a one-letter GeoNames feature class.
    pub fn from_class(class: &str) -> Self {
        match class {
            "A" => FeatureKind::Administrative,
            "H" => FeatureKind::Hydrographic,
            "L" => FeatureKind::Area,
            "P" => FeatureKind::PopulatedPlace,
            "R" => FeatureKind::Road,
            "S" => FeatureKind::Spot,
            "T" => FeatureKind::Hypsographic,
            "U" => FeatureKind::Undersea,
            "V" => FeatureKind::Vegetation,
            _ => FeatureKind::Unknown,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FeatureKind::Administrative => "Administrative",
            FeatureKind::Hydrographic => "Hydrographic",
            FeatureKind::Area => "Area",
            FeatureKind::PopulatedPlace => "Populated place",
            FeatureKind::Road => "Road/Railroad",
            FeatureKind::Spot => "Spot",
            FeatureKind::Hypsographic => "Hypsographic",
            FeatureKind::Undersea => "Undersea",
            FeatureKind::Vegetation => "Vegetation",
            FeatureKind::Unknown => "Unknown",
        }
    }
}

/// The authoritative entry for one lowercase phrase.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Place {
    /// Canonical capitalization, words joined by single spaces.
    pub canonical: String,
    /// Population or feature rank; higher wins.
    pub importance: u64,
    pub feature: FeatureKind,
    /// ISO 3166 alpha-2 code, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

impl Place {
    /// Human readable summary, e.g. "Paris (Populated place) in FR, population: 2,138,551".
    pub fn describe(&self) -> String {
        let mut description = format!("{} ({})", self.canonical, self.feature.description());
        if let Some(country_code) = &self.country_code {
            description.push_str(" in ");
            description.push_str(country_code);
        }
        if self.importance > 0 {
            description.push_str(", population: ");
            description.push_str(&group_thousands(self.importance));
        }
        description
    }
}

/// Read-only exact phrase lookup over a name corpus.
///
/// Phrases are normalized: lowercase words joined by single spaces.
/// Implementations must be safe to query from many threads at once; the
/// corrector only ever reads from them.
///
/// [`GazetteerIndex`](struct.GazetteerIndex.html) keeps every phrase in
/// memory and parses the whole JSON file at startup. For a full GeoNames
/// dump (25M+ names) that means several GB resident and a startup measured
/// in minutes; a disk-backed store (memory-mapped sorted keys, an embedded
/// database) belongs behind this trait instead, reporting I/O failures as
/// `LookupError`.
pub trait Gazetteer {
    /// Longest phrase, in words, that can ever match.
    fn max_words(&self) -> usize;

    /// Look up a normalized phrase. An error means the backend could not
    /// answer, not that the phrase is unknown.
    fn lookup(&self, phrase: &str) -> Result<Option<Place>, LookupError>;
}

/// In-memory gazetteer, persisted as a JSON file.
///
/// Duplicates are already reduced: each phrase maps to one `Place`.
/// Phrases keep the order they were first added in, so saved files are
/// reproducible. Build one with [`GazetteerBuilder`](struct.GazetteerBuilder.html).
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct GazetteerIndex {
    pub(crate) max_words: usize,
    pub(crate) places: IndexMap<String, Place>,
}

/// Summary of a gazetteer index.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct IndexStats {
    pub phrases: usize,
    pub max_words: usize,
    pub by_feature: BTreeMap<FeatureKind, usize>,
}

impl GazetteerIndex {
    /// Save this index into a file with the given filename.
    pub fn save_to_file<P: AsRef<Path>>(&self, filename: P) -> Result<(), IndexSavingError> {
        let mut writer = BufWriter::new(File::create(filename)?);
        serde_json::to_writer(&mut writer, &self)?;
        writer.flush()?;

        Ok(())
    }

    /// Load and validate a previously saved index.
    pub fn load_from_file<P: AsRef<Path>>(filename: P) -> Result<Self, TableLoadingError> {
        let reader = BufReader::new(File::open(filename)?);
        let index: GazetteerIndex = serde_json::from_reader(reader)?;
        index.validate()?;

        log::info!(
            "loaded gazetteer index: {} phrases, up to {} words",
            index.len(),
            index.max_words
        );
        Ok(index)
    }

    pub fn get(&self, phrase: &str) -> Option<&Place> {
        self.places.get(phrase)
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        let mut by_feature = BTreeMap::new();
        for place in self.places.values() {
            *by_feature.entry(place.feature).or_insert(0) += 1;
        }

        IndexStats {
            phrases: self.len(),
            max_words: self.max_words,
            by_feature,
        }
    }

    fn validate(&self) -> Result<(), TableLoadingError> {
        for (phrase, place) in &self.places {
            let invalid = |reason| TableLoadingError::InvalidEntry {
                phrase: phrase.clone(),
                reason,
            };

            if phrase.is_empty() || phrase.split(' ').any(str::is_empty) {
                return Err(invalid("phrase must be words joined by single spaces"));
            }
            if phrase.to_lowercase() != *phrase {
                return Err(invalid("phrase must be lowercase"));
            }
            if phrase.split(' ').count() > self.max_words {
                return Err(invalid("phrase is longer than the index word limit"));
            }
            if !is_casing_of(&place.canonical, phrase.split(' ')) {
                return Err(invalid(
                    "canonical form must match the phrase word for word, differing only in case",
                ));
            }
        }

        Ok(())
    }
}

impl Gazetteer for GazetteerIndex {
    fn max_words(&self) -> usize {
        self.max_words
    }

    fn lookup(&self, phrase: &str) -> Result<Option<Place>, LookupError> {
        Ok(self.get(phrase).cloned())
    }
}
