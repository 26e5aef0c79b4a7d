use crate::resolver::MatchCandidate;
use crate::tokenizer::TokenStream;

/// Rebuild the text of `stream`, writing matched words in their canonical
/// form. Separators and unmatched words are copied verbatim.
///
/// `matches` must be sorted, disjoint and in range for `stream.words`.
pub fn reconstruct(stream: &TokenStream, matches: &[MatchCandidate]) -> String {
    let words = canonical_words(stream.words.len(), matches);

    let mut string = String::with_capacity(stream.spans.iter().map(|s| s.len()).sum::<usize>()
        + stream.words.iter().map(|w| w.original.len()).sum::<usize>());

    for (index, (span, word)) in stream.spans.iter().zip(&stream.words).enumerate() {
        string.push_str(span);
        string.push_str(words[index].unwrap_or(word.original));
    }
    if let Some(last) = stream.spans.last() {
        string.push_str(last);
    }

    string
}

/// Render the source text covered by one match, as it reads after correction.
pub(crate) fn render_match(stream: &TokenStream, candidate: &MatchCandidate) -> String {
    let mut string = String::new();
    for (offset, canonical) in candidate.words().enumerate() {
        let index = candidate.start + offset;
        if offset > 0 {
            string.push_str(stream.spans[index]);
        }
        string.push_str(canonical);
    }
    string
}

// per-word replacements, `None` where the original word stays
fn canonical_words<'m>(count: usize, matches: &'m [MatchCandidate]) -> Vec<Option<&'m str>> {
    let mut words = vec![None; count];
    for candidate in matches {
        for (index, canonical) in (candidate.start..candidate.end).zip(candidate.words()) {
            words[index] = Some(canonical);
        }
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gazetteer::FeatureKind;
    use crate::resolver::MatchSource;
    use crate::rules::RuleCategory;
    use crate::tokenizer::tokenize;

    fn candidate(start: usize, end: usize, canonical: &str) -> MatchCandidate {
        MatchCandidate {
            start,
            end,
            canonical: canonical.to_owned(),
            source: MatchSource::Gazetteer(FeatureKind::PopulatedPlace),
            importance: 0,
        }
    }

    #[test]
    fn keeps_everything_but_matched_words() {
        let stream = tokenize("  we saw new\n york, on monday!! ");
        let matches = vec![
            candidate(2, 4, "New York"),
            MatchCandidate {
                source: MatchSource::Rule(RuleCategory::Day),
                ..candidate(5, 6, "Monday")
            },
        ];
        assert_eq!(
            reconstruct(&stream, &matches),
            "  we saw New\n York, on Monday!! "
        );
    }

    #[test]
    fn no_matches_reproduces_input() {
        for text in ["", "...", "Plain text, 42 times."] {
            assert_eq!(reconstruct(&tokenize(text), &[]), text);
        }
    }

    #[test]
    fn renders_a_single_match_with_inner_separators() {
        let stream = tokenize("to st. louis today");
        let candidate = candidate(1, 3, "St Louis");
        assert_eq!(render_match(&stream, &candidate), "St. Louis");
    }
}
