//! Cheap pattern based classification of other party's utterances.
//! Misses are expected and handled by asking for clarification.

use lazy_static::lazy_static;
use regex::RegexSet;

const QUESTION_WORDS: [&str; 2] = ["what", "which"];
const REFUSAL_WORDS: [&str; 5] = ["nope", "not", "cannot", "can't", "sorry"];
const NEGATIONS: [&str; 3] = ["no", "cannot", "not"];

lazy_static! {
    /// Matched against lowercased utterance.
    static ref REFUSALS: RegexSet =
        RegexSet::new(["best i can do", "only get points", "no can do"]).unwrap();
    /// Matched against raw utterance.
    static ref ACCEPTANCES: RegexSet = RegexSet::new([
        "(W|w)orks for me",
        "(I|i) can (take|do|accept)",
        "(S|s)ounds (good|great)",
    ])
    .unwrap();
}

fn is_one_of(token: &str, words: &[&str]) -> bool {
    let token = token.to_lowercase();
    words.contains(&token.as_str())
}

pub fn is_question(tokens: &[String]) -> bool {
    if tokens.last().map_or(false, |token| token.ends_with('?')) {
        return true;
    }
    tokens
        .iter()
        .take(2)
        .any(|token| is_one_of(token, &QUESTION_WORDS))
}

pub fn is_disagreement(tokens: &[String]) -> bool {
    if tokens.iter().any(|token| is_one_of(token, &REFUSAL_WORDS)) {
        return true;
    }
    REFUSALS.is_match(&tokens.join(" ").to_lowercase())
}

/// Acceptance phrase or "deal" token. Negation anywhere before "deal"
/// vetoes agreement.
pub fn is_agreement(raw: &str, tokens: &[String]) -> bool {
    let accepted = ACCEPTANCES.is_match(raw);
    match tokens.iter().position(|token| token.eq_ignore_ascii_case("deal")) {
        Some(idx) => !tokens[..idx].iter().any(|token| is_one_of(token, &NEGATIONS)),
        None => accepted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn tokens(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test_case("what do you need", true)]
    #[test_case("so which one", true)]
    #[test_case("you want the hats ?", true)]
    #[test_case("hats?", true)]
    #[test_case("i want the hats", false)]
    #[test_case("", false)]
    fn test_question(text: &str, expected: bool) {
        assert_eq!(is_question(&tokens(text)), expected);
    }

    #[test_case("sorry , i need the book", true)]
    #[test_case("Nope", true)]
    #[test_case("that is the best I can do", true)]
    #[test_case("no can do", true)]
    #[test_case("i would like the balls", false)]
    fn test_disagreement(text: &str, expected: bool) {
        assert_eq!(is_disagreement(&tokens(text)), expected);
    }

    #[test_case("deal", true; "bare deal")]
    #[test_case("ok deal !", true; "deal without negation")]
    #[test_case("not a deal", false; "negated by not")]
    #[test_case("no deal", false; "negated by no")]
    #[test_case("i cannot make that deal", false; "negated by cannot")]
    #[test_case("Sounds good to me", true; "acceptance phrase")]
    #[test_case("that works for me", true; "works for me")]
    #[test_case("I can take that", true; "i can take")]
    #[test_case("Sounds good , but no deal", false; "negated deal vetoes phrase")]
    #[test_case("i want the hats", false; "no agreement")]
    fn test_agreement(text: &str, expected: bool) {
        assert_eq!(is_agreement(text, &tokens(text)), expected);
    }
}
