use barter_offer_utils::{ItemMap, Offer};

/// Splits utterance into tokens.
pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Extracts structured offers and referents from other party's utterances.
///
/// `their_offer` always describes items the other party wants to keep.
/// Scratch state (`made_offer`, `needs_clarification`, `lexicon`) describes
/// only the last utterance and is cleared by `reset`, while `their_offer`
/// survives until tracker resolves a newer one.
pub trait OfferTracker {
    /// Last resolved offer of the other party, if they made any.
    fn their_offer(&self) -> Option<Offer>;
    /// Structured offer was detected in the last utterance.
    fn made_offer(&self) -> bool;
    fn needs_clarification(&self) -> bool;
    /// Referents extracted from the last utterance.
    fn lexicon(&self) -> &[String];

    fn reset(&mut self);
    fn set_item_counts(&mut self, counts: &ItemMap<i32>);
    fn build_lexicon(&mut self, tokens: &[String]);

    /// Decide which agent ambiguous references address.
    fn determine_which_agent(&mut self);
    /// Resolve reference made in response to our persuasion against
    /// offer, that was on the table before.
    fn resolve_persuasion(&mut self, last_offer: Option<&Offer>);
    fn determine_item_count(&mut self);
    fn resolve_tracker(&mut self);
    /// Merge multiple detected offers into `their_offer`.
    fn merge_their_offers(&mut self);
}
