use barter_offer_utils::{Offer, OfferError, Proposal, Valuation};

use crate::strategy::Thresholds;

#[derive(Clone, Copy, Debug)]
pub enum Criterion<'a> {
    GoodDeal,
    Bottomline,
    FinalCall,
    /// Offer must be at least as good as our current working proposal.
    MyProposal(&'a Proposal),
}

/// Scores offers from our perspective. Every offer passed here describes
/// items we would keep.
#[derive(Clone, Debug)]
pub struct Evaluator {
    valuation: Valuation,
    thresholds: Thresholds,
}

impl Evaluator {
    pub fn new(valuation: Valuation, thresholds: Thresholds) -> Evaluator {
        Evaluator {
            valuation,
            thresholds,
        }
    }

    pub fn valuation(&self) -> &Valuation {
        &self.valuation
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn score(&self, offer: &Offer) -> i32 {
        self.valuation.score(offer)
    }

    /// Proposal without committed numbers has no score, which ranks it
    /// below any real offer.
    pub fn score_proposal(&self, proposal: &Proposal) -> Option<i32> {
        proposal.offer().map(|offer| self.score(offer))
    }

    pub fn validate(&self, offer: &Offer) -> Result<(), OfferError> {
        self.valuation.validate(offer)
    }

    pub fn reverse(&self, offer: &Offer) -> Offer {
        self.valuation.reverse(offer)
    }

    /// Invalid offers never meet any criterion.
    pub fn meets(&self, offer: &Offer, criterion: Criterion) -> bool {
        if self.validate(offer).is_err() {
            return false;
        }

        let points = self.score(offer);
        match criterion {
            Criterion::GoodDeal => points >= self.thresholds.good_deal,
            Criterion::Bottomline => points >= self.thresholds.bottomline,
            Criterion::FinalCall => points >= self.thresholds.final_call,
            Criterion::MyProposal(proposal) => match self.score_proposal(proposal) {
                Some(mine) if mine >= 0 => points >= mine,
                _ => false,
            },
        }
    }
}
