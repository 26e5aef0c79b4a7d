#![allow(dead_code)]

use std::sync::Arc;

use geocase::{Corrector, FeatureKind, GazetteerBuilder, GazetteerIndex, RuleTable};

pub const PLACES: &[(&str, u64, FeatureKind)] = &[
    ("New York", 8_336_817, FeatureKind::PopulatedPlace),
    ("White Clay Creek", 0, FeatureKind::Hydrographic),
    ("Brandywine River", 0, FeatureKind::Hydrographic),
    ("Mississippi River", 0, FeatureKind::Hydrographic),
    ("Paris", 2_138_551, FeatureKind::PopulatedPlace),
    ("Los Angeles", 3_971_883, FeatureKind::PopulatedPlace),
    ("Mount Everest", 0, FeatureKind::Hypsographic),
    ("Atlantic Ocean", 0, FeatureKind::Hydrographic),
    ("St. Louis", 315_685, FeatureKind::PopulatedPlace),
    ("O'Fallon", 91_316, FeatureKind::PopulatedPlace),
    ("İzmir", 2_500_603, FeatureKind::PopulatedPlace),
    // a place homograph of a month, so rules must take precedence
    ("MAY", 12, FeatureKind::Spot),
];

pub fn gazetteer() -> GazetteerIndex {
    let mut builder = GazetteerBuilder::new();
    for &(name, importance, feature) in PLACES {
        builder.add_place(name, importance, feature);
    }
    builder.into_index()
}

pub fn corrector() -> Corrector {
    Corrector::new(Arc::new(RuleTable::default()), Arc::new(gazetteer()))
}
