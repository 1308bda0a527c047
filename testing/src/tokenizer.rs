use lazy_static::lazy_static;
use regex::Regex;

use barter_negotiator_component::Tokenizer;

lazy_static! {
    static ref TOKEN: Regex = Regex::new(r"\w+(?:'\w+)?|[^\w\s]").unwrap();
}

/// Lowercased words (with contractions kept whole) and punctuation marks.
#[derive(Clone, Debug, Default)]
pub struct SimpleTokenizer;

impl Tokenizer for SimpleTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        TOKEN
            .find_iter(text)
            .map(|token| token.as_str().to_lowercase())
            .collect()
    }
}
