use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use barter_negotiator_component::{ItemMap, Offer, OfferTracker};

/// What tracker should find in the other party's next utterance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Analysis {
    /// Items, that speaker wants to keep.
    pub offer: Option<Offer>,
    pub unclear: bool,
    pub lexicon: Vec<String>,
}

/// Queue of analyses shared between test and tracker owned by negotiator.
#[derive(Clone, Debug, Default)]
pub struct TrackerScript(Arc<Mutex<VecDeque<Analysis>>>);

impl TrackerScript {
    pub fn push(&self, analysis: Analysis) {
        self.0.lock().unwrap().push_back(analysis);
    }

    fn pop(&self) -> Analysis {
        self.0.lock().unwrap().pop_front().unwrap_or_default()
    }

    pub fn pending(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

/// Offer tracker replaying analyses prepared by test instead of parsing
/// utterances. Utterances without prepared analysis carry no offer.
#[derive(Debug)]
pub struct ScriptedTracker {
    script: TrackerScript,
    counts: ItemMap<i32>,

    their_offer: Option<Offer>,
    detected: Option<Offer>,
    made_offer: bool,
    needs_clarification: bool,
    lexicon: Vec<String>,
}

impl ScriptedTracker {
    pub fn new() -> (ScriptedTracker, TrackerScript) {
        let script = TrackerScript::default();
        let tracker = ScriptedTracker {
            script: script.clone(),
            counts: ItemMap::default(),
            their_offer: None,
            detected: None,
            made_offer: false,
            needs_clarification: false,
            lexicon: vec![],
        };
        (tracker, script)
    }

    pub fn counts(&self) -> &ItemMap<i32> {
        &self.counts
    }
}

impl OfferTracker for ScriptedTracker {
    fn their_offer(&self) -> Option<Offer> {
        self.their_offer
    }

    fn made_offer(&self) -> bool {
        self.made_offer
    }

    fn needs_clarification(&self) -> bool {
        self.needs_clarification
    }

    fn lexicon(&self) -> &[String] {
        &self.lexicon
    }

    fn reset(&mut self) {
        self.detected = None;
        self.made_offer = false;
        self.needs_clarification = false;
        self.lexicon.clear();
    }

    fn set_item_counts(&mut self, counts: &ItemMap<i32>) {
        self.counts = *counts;
    }

    fn build_lexicon(&mut self, tokens: &[String]) {
        let analysis = self.script.pop();
        log::trace!("Tracker analysis of {:?}: {:?}", tokens, analysis);

        self.made_offer = analysis.offer.is_some();
        self.detected = analysis.offer;
        self.needs_clarification = analysis.unclear;
        self.lexicon = analysis.lexicon;
    }

    fn determine_which_agent(&mut self) {}

    fn resolve_persuasion(&mut self, last_offer: Option<&Offer>) {
        if let Some(offer) = self.detected.or_else(|| last_offer.copied()) {
            self.their_offer = Some(offer);
        }
    }

    fn determine_item_count(&mut self) {}

    fn resolve_tracker(&mut self) {}

    fn merge_their_offers(&mut self) {
        if self.detected.is_some() {
            self.their_offer = self.detected;
        }
    }
}
