mod common;

use std::sync::Arc;

use geocase::{
    resolve, tokenize, Corrector, FeatureKind, Gazetteer, GazetteerBuilder, LookupError,
    MatchSource, Place, RuleCategory, RuleEntry, RuleTable,
};

#[test]
fn ranks_before_names() {
    assert_eq!(
        common::corrector().correct("captain Smith, colonel Johnson"),
        "Captain Smith, Colonel Johnson"
    );
}

#[test]
fn multi_word_places() {
    assert_eq!(
        common::corrector().correct("white clay creek and brandywine river"),
        "White Clay Creek and Brandywine River"
    );
}

#[test]
fn rules_and_places_in_one_pass() {
    assert_eq!(
        common::corrector().correct("In january, captain Smith visited new york on monday"),
        "In January, Captain Smith visited New York on Monday"
    );
}

#[test]
fn empty_text() {
    assert_eq!(common::corrector().correct(""), "");
}

#[test]
fn text_without_names_is_untouched() {
    let corrector = common::corrector();
    for text in [
        "nothing to see here.",
        "  12 + 30 = 42 ?!  ",
        "ALL CAPS SHOUTING STAYS",
        "\n\t\n",
    ] {
        assert_eq!(corrector.correct(text), text);
    }
}

#[test]
fn rules_win_over_places() {
    let corrector = common::corrector();
    let report = corrector.correct_with_report("see you in may");
    assert_eq!(report.text, "see you in May");
    assert_eq!(report.changes[0].source, MatchSource::Rule(RuleCategory::Month));
}

#[test]
fn longest_match_is_preferred() {
    let rules = RuleTable::from_entries(vec![RuleEntry {
        phrase: "new".to_owned(),
        canonical: "New".to_owned(),
        category: RuleCategory::Title,
    }])
    .unwrap();
    let corrector = Corrector::new(Arc::new(rules), Arc::new(common::gazetteer()));

    let report = corrector.correct_with_report("new york");
    assert_eq!(report.text, "New York");
    assert_eq!(report.changes.len(), 1);
    assert_eq!(
        report.changes[0].source,
        MatchSource::Gazetteer(FeatureKind::PopulatedPlace)
    );
}

#[test]
fn names_may_span_punctuation() {
    assert_eq!(
        common::corrector().correct("we flew from new. york to st louis and o'fallon"),
        "we flew from New. York to St Louis and O'Fallon"
    );
    assert_eq!(common::corrector().correct("st. louis"), "St. Louis");
}

#[test]
fn original_examples() {
    let corrector = common::corrector();
    let cases = [
        ("I visited new york on monday.", "I visited New York on Monday."),
        (
            "In january, we went to the mississippi river.",
            "In January, we went to the Mississippi River.",
        ),
        (
            "He speaks english and spanish fluently.",
            "He speaks English and Spanish fluently.",
        ),
        (
            "The meeting is next wednesday in los angeles.",
            "The meeting is next Wednesday in Los Angeles.",
        ),
        (
            "We celebrate christmas and easter every year.",
            "We celebrate Christmas and Easter every year.",
        ),
        (
            "Mount everest is far from the atlantic ocean.",
            "Mount Everest is far from the Atlantic Ocean.",
        ),
        (
            "happy new year, and a merry christmas to god and country",
            "happy New Year, and a merry Christmas to God and country",
        ),
    ];

    for (text, expected) in cases.iter() {
        assert_eq!(&corrector.correct(text), expected);
    }
}

#[test]
fn lowercase_folding_never_drops_marks() {
    let corrector = common::corrector();
    let text = "visit i\u{307}zmir";
    assert_eq!(corrector.correct(text), text);
    assert_eq!(corrector.correct("visit İZMIR"), "visit İzmir");
}

#[test]
fn wrong_casing_inside_names_is_fixed() {
    assert_eq!(
        common::corrector().correct("NEW york and pArIs"),
        "New York and Paris"
    );
}

struct FlakyGazetteer {
    inner: geocase::GazetteerIndex,
}

impl Gazetteer for FlakyGazetteer {
    fn max_words(&self) -> usize {
        self.inner.max_words()
    }

    // single words resolve, longer phrases hit a broken shard
    fn lookup(&self, phrase: &str) -> Result<Option<Place>, LookupError> {
        if phrase.contains(' ') {
            Err(LookupError("shard offline".to_owned()))
        } else {
            self.inner.lookup(phrase)
        }
    }
}

#[test]
fn lookup_failures_degrade_without_failing() {
    let corrector = Corrector::new(
        Arc::new(RuleTable::default()),
        Arc::new(FlakyGazetteer {
            inner: common::gazetteer(),
        }),
    );

    let report = corrector.correct_with_report("on monday, paris and new york");
    assert_eq!(report.text, "on Monday, Paris and new york");
    assert!(report.degraded);

    let clean = common::corrector().correct_with_report("on monday");
    assert!(!clean.degraded);
}

#[test]
fn resolved_matches_never_overlap() {
    let mut builder = GazetteerBuilder::new();
    builder
        .add_place("East New", 1, FeatureKind::PopulatedPlace)
        .add_place("New York City", 1, FeatureKind::PopulatedPlace)
        .add_place("York", 1, FeatureKind::PopulatedPlace);
    let index = builder.into_index();

    let stream = tokenize("east new york city york");
    let matches = resolve(&stream.words, &RuleTable::default(), &index).matches;
    let ranges: Vec<_> = matches.iter().map(|m| (m.start, m.end)).collect();
    assert_eq!(ranges, vec![(0, 2), (2, 3), (4, 5)]);
}
