//! Restore capitalization of place names and fixed categories in arbitrary text.
//!
//! Two read-only tables drive the correction: a small [`RuleTable`] for
//! closed grammatical categories (days, months, holidays, languages, ranks,
//! titles, religions, deities) and a [`Gazetteer`] of place names, usually a
//! [`GazetteerIndex`] built from GeoNames dumps with [`GazetteerBuilder`].
//!
//! Text is split into words and separators, the longest known phrase is
//! matched at each position from left to right, and matched words are
//! rewritten in their canonical case. Separators and unmatched words are
//! never touched.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use geocase::{Corrector, FeatureKind, GazetteerBuilder, RuleTable};
//!
//! let mut builder = GazetteerBuilder::new();
//! builder.add_place("New York", 8_000_000, FeatureKind::PopulatedPlace);
//!
//! let corrector = Corrector::new(Arc::new(RuleTable::default()), Arc::new(builder.into_index()));
//! let corrected = corrector.correct("In january, captain Smith visited new york on monday");
//!
//! assert_eq!(corrected, "In January, Captain Smith visited New York on Monday");
//! ```
//!
//! Indexes are persisted as JSON:
//!
//! ```no_run
//! use geocase::{GazetteerBuilder, GazetteerIndex};
//!
//! let mut builder = GazetteerBuilder::new();
//! builder.add_geonames_file("US.txt").unwrap();
//! builder.into_index().save_to_file("gazetteer.json").unwrap();
//!
//! let index = GazetteerIndex::load_from_file("gazetteer.json").unwrap();
//! ```

mod builder;
mod config;
mod corrector;
mod errors;
mod gazetteer;
mod reconstructor;
mod resolver;
mod rules;
mod tokenizer;
mod utils;

pub use builder::{GazetteerBuilder, DEFAULT_MAX_WORDS};
pub use config::Config;
pub use corrector::{Change, Check, Correction, Corrector, SharedCorrector};
pub use errors::{ConfigError, IndexSavingError, LookupError, TableLoadingError};
pub use gazetteer::{FeatureKind, Gazetteer, GazetteerIndex, IndexStats, Place};
pub use reconstructor::reconstruct;
pub use resolver::{resolve, MatchCandidate, MatchSource, Resolution};
pub use rules::{builtin_entries, Rule, RuleCategory, RuleEntry, RuleTable};
pub use tokenizer::{tokenize, Token, TokenKind, TokenStream};
