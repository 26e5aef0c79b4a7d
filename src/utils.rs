pub(crate) fn split_in_three(string: &str, index1: usize, index2: usize) -> (&str, &str, &str) {
    let (first, rest) = string.split_at(index1);
    let (second, third) = rest.split_at(index2 - index1);
    (first, second, third)
}

pub(crate) fn uppercase_first_letter(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
    }
}

/// Capitalize every space-separated word of a normalized phrase.
pub(crate) fn title_case(phrase: &str) -> String {
    join_with_spaces(phrase.split(' ').map(uppercase_first_letter))
}

/// Whether `canonical` differs from the normalized `words` only in letter case.
pub(crate) fn is_casing_of<'a, I>(canonical: &str, mut words: I) -> bool
where
    I: Iterator<Item = &'a str>,
{
    for canonical_word in canonical.split(' ') {
        match words.next() {
            Some(word) if canonical_word.to_lowercase() == word => {}
            _ => return false,
        }
    }
    words.next().is_none()
}

/// Whether each canonical word carries the same non-letter characters, in
/// the same order, as the original word it replaces. Lowercasing can
/// fold structure away ("İ" lowercases to "i" plus U+0307), so matching
/// lowercase forms alone is not enough.
pub(crate) fn keeps_non_letters<'a, I>(canonical: &str, originals: I) -> bool
where
    I: Iterator<Item = &'a str>,
{
    canonical.split(' ').zip(originals).all(|(canonical_word, original)| {
        canonical_word
            .chars()
            .filter(|c| !c.is_alphabetic())
            .eq(original.chars().filter(|c| !c.is_alphabetic()))
    })
}

/// Format a number with comma thousands separators: 8336817 -> "8,336,817".
pub(crate) fn group_thousands(number: u64) -> String {
    let digits = number.to_string();
    let mut string = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            string.push(',');
        }
        string.push(digit);
    }
    string
}

pub(crate) fn join_with_spaces<I>(mut iter: I) -> String
where
    I: Iterator + Clone,
    I::Item: AsRef<str>,
{
    let length: usize = iter
        .clone()
        .map(|item| item.as_ref().len() + 1)
        .sum::<usize>()
        .saturating_sub(1);
    let mut string = String::with_capacity(length);

    match iter.next() {
        Some(item) => string.push_str(item.as_ref()),
        None => return string,
    };

    for item in iter {
        string.push(' ');
        string.push_str(item.as_ref());
    }
    string
}
