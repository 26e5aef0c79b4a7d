use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::split_in_three;

lazy_static! {
    // letters with internal apostrophes and hyphens, e.g. "o'brien" or "winston-salem"
    static ref WORD: Regex = Regex::new(r"[\p{L}\p{M}]+(?:['’\-][\p{L}\p{M}]+)*").unwrap();
}

/// Split `text` into words and the separators around them.
pub fn tokenize(text: &str) -> TokenStream {
    let mut stream = TokenStream {
        words: Vec::new(),
        spans: Vec::new(),
    };

    for token in Tokenizer::new(text) {
        match token.kind {
            TokenKind::Word => stream.words.push(token),
            TokenKind::Separator => stream.spans.push(token.original),
        }
    }

    stream
}

/// Tokenized text.
///
/// `spans` always holds exactly one more element than `words`: the text
/// reads `spans[0] words[0] spans[1] ... words[n-1] spans[n]`, and any
/// span may be empty.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    pub words: Vec<Token<'a>>,
    pub spans: Vec<&'a str>,
}

impl<'a> TokenStream<'a> {
    /// Concatenate the stream back into the text it came from.
    pub fn to_original(&self) -> String {
        let mut string = String::new();
        for (span, word) in self.spans.iter().zip(&self.words) {
            string.push_str(span);
            string.push_str(word.original);
        }
        if let Some(last) = self.spans.last() {
            string.push_str(last);
        }
        string
    }
}

/// Iterator over alternating separators and words.
///
/// Always starts and ends with a (possibly empty) separator.
pub(crate) struct Tokenizer<'a> {
    next_token: Option<Token<'a>>,
    string: &'a str,
    offset: usize,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(string: &'a str) -> Self {
        Self {
            next_token: None,
            string,
            offset: 0,
            finished: false,
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.next_token.take() {
            return Some(token);
        }

        if self.finished {
            return None;
        }

        if let Some(mat) = WORD.find(self.string) {
            let (before, word, rest) = split_in_three(self.string, mat.start(), mat.end());
            let separator = Token::new(before, self.offset, TokenKind::Separator);
            self.next_token = Some(Token::new(
                word,
                self.offset + before.len(),
                TokenKind::Word,
            ));
            self.offset += before.len() + word.len();
            self.string = rest;
            Some(separator)
        } else {
            self.finished = true;
            let rest = self.string;
            self.string = "";
            Some(Token::new(rest, self.offset, TokenKind::Separator))
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Separator,
}

#[derive(Debug, Clone)]
pub struct Token<'a> {
    pub original: &'a str,
    pub normalized: Cow<'a, str>,
    pub kind: TokenKind,
    /// Byte offset of the token in the source text.
    pub start: usize,
}

impl<'a> Token<'a> {
    pub fn new(original: &'a str, start: usize, kind: TokenKind) -> Self {
        let normalized = match kind {
            TokenKind::Word => normalize(original),
            TokenKind::Separator => Cow::Borrowed(original),
        };

        Self {
            original,
            normalized,
            kind,
            start,
        }
    }

    pub fn end(&self) -> usize {
        self.start + self.original.len()
    }

    // these functions are only necessary because closures can't be cloned and
    // `join_with_spaces` requires a cloneable iterator
    pub fn get_normalized(&self) -> &str {
        self.normalized.as_ref()
    }

    pub fn get_original(&self) -> &str {
        self.original
    }
}

fn normalize(word: &str) -> Cow<str> {
    let lowercase = word.to_lowercase();
    if lowercase == word {
        Cow::Borrowed(word)
    } else {
        Cow::Owned(lowercase)
    }
}
