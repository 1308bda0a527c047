use barter_offer_utils::{Item, Offer, Proposal};

use crate::evaluator::{Criterion, Evaluator};
use crate::strategy::{ItemRanking, Strategy};
use crate::templates::Phrase;

/// Outcome of trying to meet other party halfway.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Compromise {
    /// Their offer is already above our bottomline.
    Accept,
    /// We give up one unit of their ask. Contains what they keep.
    Give(Offer),
    /// We give up one unit of our own ask. Contains what we keep.
    Take(Offer),
    /// No valid concession exists.
    Hold,
}

fn with(mut offer: Offer, item: Item, units: i32) -> Offer {
    offer[item] += units;
    offer
}

/// Builds and adjusts our working proposal. Only committed proposals are
/// valid ones, so `0 <= proposal[item] <= count[item]` holds after every step.
#[derive(Clone, Debug)]
pub struct ProposalGenerator {
    strategy: Strategy,
    ranking: ItemRanking,
    proposal: Proposal,
}

impl ProposalGenerator {
    pub fn new(strategy: Strategy, ranking: ItemRanking) -> ProposalGenerator {
        ProposalGenerator {
            strategy,
            ranking,
            proposal: Proposal::new(),
        }
    }

    pub fn proposal(&self) -> &Proposal {
        &self.proposal
    }

    /// Commits `offer` if it respects item counts.
    pub fn commit(&mut self, offer: Offer, evaluator: &Evaluator) -> bool {
        match evaluator.validate(&offer) {
            Ok(()) => {
                self.proposal.commit(offer);
                true
            }
            Err(e) => {
                log::debug!("Proposal [{}] not committed. {}", offer, e);
                false
            }
        }
    }

    /// Fills proposal from `offer` only if no numbers were committed yet.
    pub fn fill_unset(&mut self, offer: Offer, evaluator: &Evaluator) {
        if self.proposal.offer().is_none() {
            self.commit(offer, evaluator);
        }
    }

    /// Opening proposal.
    pub fn init_propose(&mut self, evaluator: &Evaluator) -> Phrase {
        let ItemRanking { top, middle, bottom } = self.ranking;
        match self.strategy {
            Strategy::Obsessed => {
                self.proposal.make();
                let mut proposal = self.proposal.offer_or_zero();
                proposal[top] = evaluator.valuation().count(top);
                self.commit(proposal, evaluator);

                Phrase::OpenObsessed { top }
            }
            Strategy::Overvalued => {
                self.proposal.make();
                let proposal = with(with(self.proposal.offer_or_zero(), top, 1), middle, 1);
                self.commit(proposal, evaluator);

                let ours = self.proposal.offer_or_zero();
                Phrase::OpenOvervalued {
                    top,
                    middle,
                    ours,
                    theirs: evaluator.reverse(&ours),
                }
            }
            Strategy::Balanced => {
                self.proposal.mark_made();
                Phrase::OpenBalanced { bottom }
            }
        }
    }

    /// Follow-up proposal, asking for a bit more each round.
    pub fn propose(&mut self, evaluator: &Evaluator) -> Phrase {
        match self.strategy {
            Strategy::Obsessed => {
                self.proposal.mark_made();
                Phrase::InsistObsessed {
                    top: self.ranking.top,
                }
            }
            Strategy::Overvalued => {
                self.overvalued_step(evaluator);
                Phrase::Ask {
                    ours: self.proposal.offer_or_zero(),
                }
            }
            Strategy::Balanced => {
                self.balanced_step(evaluator);
                Phrase::Ask {
                    ours: self.proposal.offer_or_zero(),
                }
            }
        }
    }

    fn overvalued_step(&mut self, evaluator: &Evaluator) {
        let middle = self.ranking.middle;
        let base = self.proposal.offer_or_zero();

        let one_more = with(base, middle, 1);
        let candidate = if evaluator.meets(&one_more, Criterion::GoodDeal) {
            one_more
        } else {
            with(base, middle, 2)
        };
        self.commit(candidate, evaluator);
    }

    fn balanced_step(&mut self, evaluator: &Evaluator) {
        let ItemRanking { top, middle, bottom } = self.ranking;
        let base = with(self.proposal.offer_or_zero(), top, 1);

        let with_middle = with(base, middle, 1);
        let with_middle_bottom = with(with_middle, bottom, 1);
        let with_all = with(with_middle_bottom, top, 1);
        let over_ask = with(with(base, middle, 2), bottom, 1);

        // Tried in order, first valid candidate with passing guard wins.
        let candidates = [
            (
                with_middle,
                evaluator.meets(&with_middle, Criterion::GoodDeal),
            ),
            (
                with_middle_bottom,
                evaluator.meets(&with_middle_bottom, Criterion::GoodDeal),
            ),
            (with_all, true),
            (over_ask, true),
            (base, true),
        ];

        for (candidate, guard) in candidates {
            if guard && self.commit(candidate, evaluator) {
                return;
            }
        }
    }

    /// `their_offer` describes what they want to keep.
    pub fn compromise(&mut self, their_offer: &Offer, evaluator: &Evaluator) -> Compromise {
        if evaluator.meets(&evaluator.reverse(their_offer), Criterion::Bottomline) {
            return Compromise::Accept;
        }

        let package_a = {
            let item = self.find_high_value(their_offer);
            let theirs = with(*their_offer, item, -1);
            self.viable(evaluator.reverse(&theirs), evaluator)
                .map(|points| (theirs, points))
        };
        let package_b = self.proposal.offer().and_then(|ours| {
            let item = self.find_low_value(ours);
            let ours = with(*ours, item, -1);
            self.viable(ours, evaluator).map(|points| (ours, points))
        });

        let choice = match (package_a, package_b) {
            (Some((theirs, points_a)), Some((_, points_b))) if points_a < points_b => {
                Compromise::Give(theirs)
            }
            (_, Some((ours, _))) => Compromise::Take(ours),
            (Some((theirs, _)), None) => Compromise::Give(theirs),
            (None, None) => Compromise::Hold,
        };

        match &choice {
            Compromise::Give(theirs) => {
                self.commit(evaluator.reverse(theirs), evaluator);
            }
            Compromise::Take(ours) => {
                self.commit(*ours, evaluator);
            }
            _ => (),
        }
        choice
    }

    /// Points we would get, if package is valid and not negative.
    fn viable(&self, ours: Offer, evaluator: &Evaluator) -> Option<i32> {
        evaluator.validate(&ours).ok()?;
        Some(evaluator.score(&ours)).filter(|points| *points >= 0)
    }

    fn find_high_value(&self, package: &Offer) -> Item {
        let ItemRanking { top, middle, bottom } = self.ranking;
        [top, middle]
            .into_iter()
            .find(|item| package[*item] > 0)
            .unwrap_or(bottom)
    }

    fn find_low_value(&self, package: &Offer) -> Item {
        let ItemRanking { top, middle, bottom } = self.ranking;
        [bottom, middle]
            .into_iter()
            .find(|item| package[*item] > 0)
            .unwrap_or(top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barter_offer_utils::{ItemMap, Valuation};

    use crate::strategy::Thresholds;

    fn setup(values: ItemMap<i32>, counts: ItemMap<i32>) -> (ProposalGenerator, Evaluator) {
        let valuation = Valuation::new(values, counts).unwrap();
        let ranking = ItemRanking::new(&valuation.values);
        let strategy = Strategy::pick(&valuation.values, 7);
        let thresholds = Thresholds::new(&valuation, &ranking, 7);
        (
            ProposalGenerator::new(strategy, ranking),
            Evaluator::new(valuation, thresholds),
        )
    }

    fn assert_within_counts(generator: &ProposalGenerator, evaluator: &Evaluator) {
        if let Some(offer) = generator.proposal().offer() {
            evaluator.validate(offer).unwrap();
        }
    }

    #[test]
    fn test_obsessed_claims_whole_top_item() {
        let (mut generator, evaluator) = setup(ItemMap::new(8, 1, 1), ItemMap::new(1, 2, 2));

        let phrase = generator.init_propose(&evaluator);
        assert_eq!(phrase, Phrase::OpenObsessed { top: Item::Book });
        assert_eq!(generator.proposal().offer(), Some(&ItemMap::new(1, 0, 0)));

        let phrase = generator.propose(&evaluator);
        assert_eq!(phrase, Phrase::InsistObsessed { top: Item::Book });
        assert_eq!(generator.proposal().offer(), Some(&ItemMap::new(1, 0, 0)));
    }

    #[test]
    fn test_overvalued_opening_and_steps() {
        // Strategy: overvalued, top = ball, middle = hat.
        let (mut generator, evaluator) = setup(ItemMap::new(0, 2, 3), ItemMap::new(2, 3, 2));

        match generator.init_propose(&evaluator) {
            Phrase::OpenOvervalued { ours, theirs, .. } => {
                assert_eq!(ours, ItemMap::new(0, 1, 1));
                assert_eq!(theirs, ItemMap::new(2, 2, 1));
            }
            phrase => panic!("Unexpected phrase {:?}", phrase),
        }

        // One more hat gives 7 points, which is still a good deal.
        generator.propose(&evaluator);
        assert_eq!(generator.proposal().offer(), Some(&ItemMap::new(0, 2, 1)));
        generator.propose(&evaluator);
        assert_eq!(generator.proposal().offer(), Some(&ItemMap::new(0, 3, 1)));

        // Fourth hat would exceed available count, so proposal stays untouched.
        generator.propose(&evaluator);
        assert_eq!(generator.proposal().offer(), Some(&ItemMap::new(0, 3, 1)));
    }

    #[test]
    fn test_overvalued_asks_for_two_when_one_is_not_good_deal() {
        // top = ball (3), middle = hat (1): one more hat never reaches 7 points.
        let (mut generator, evaluator) = setup(ItemMap::new(0, 1, 3), ItemMap::new(1, 4, 1));

        generator.init_propose(&evaluator);
        assert_eq!(generator.proposal().offer(), Some(&ItemMap::new(0, 1, 1)));

        generator.propose(&evaluator);
        assert_eq!(generator.proposal().offer(), Some(&ItemMap::new(0, 3, 1)));
    }

    #[test]
    fn test_balanced_opening_commits_no_numbers() {
        let (mut generator, evaluator) = setup(ItemMap::new(2, 3, 1), ItemMap::new(2, 2, 2));

        let phrase = generator.init_propose(&evaluator);
        assert_eq!(phrase, Phrase::OpenBalanced { bottom: Item::Ball });
        assert!(generator.proposal().is_made());
        assert_eq!(generator.proposal().offer(), None);
    }

    #[test]
    fn test_balanced_steps() {
        // top = hat (3), middle = book (2), bottom = ball (1).
        let (mut generator, evaluator) = setup(ItemMap::new(2, 3, 1), ItemMap::new(2, 2, 2));
        generator.init_propose(&evaluator);

        // hat+1 = 3 points. hat+book = 5, hat+book+ball = 6: none is good deal,
        // so we ask for 2 hats, 1 book and 1 ball.
        generator.propose(&evaluator);
        assert_eq!(generator.proposal().offer(), Some(&ItemMap::new(1, 2, 1)));

        // Base: 1 book, 3 hats, 1 ball is invalid, so every candidate is too.
        generator.propose(&evaluator);
        assert_eq!(generator.proposal().offer(), Some(&ItemMap::new(1, 2, 1)));
    }

    #[test]
    fn test_balanced_keeps_middle_when_good_deal() {
        // top = hat (4), middle = book (3), bottom = ball (2).
        let (mut generator, evaluator) = setup(ItemMap::new(3, 4, 2), ItemMap::new(3, 3, 3));
        generator.init_propose(&evaluator);

        // hat + book = 7 points.
        generator.propose(&evaluator);
        assert_eq!(generator.proposal().offer(), Some(&ItemMap::new(1, 1, 0)));
    }

    #[test]
    fn test_proposals_stay_within_counts() {
        let valuations = [
            ItemMap::new(8, 1, 1),
            ItemMap::new(0, 2, 3),
            ItemMap::new(0, 1, 6),
            ItemMap::new(2, 3, 1),
            ItemMap::new(1, 1, 1),
            ItemMap::new(0, 0, 5),
        ];
        let counts = [
            ItemMap::new(1, 2, 2),
            ItemMap::new(1, 1, 1),
            ItemMap::new(3, 1, 2),
            ItemMap::new(4, 4, 4),
        ];

        for values in valuations.iter() {
            for counts in counts.iter() {
                let (mut generator, evaluator) = setup(*values, *counts);
                generator.init_propose(&evaluator);
                assert_within_counts(&generator, &evaluator);

                for _ in 0..6 {
                    generator.propose(&evaluator);
                    assert_within_counts(&generator, &evaluator);
                }

                let their_offer = ItemMap::from_fn(|item| counts[item] / 2);
                generator.compromise(&their_offer, &evaluator);
                assert_within_counts(&generator, &evaluator);
            }
        }
    }

    #[test]
    fn test_compromise_accepts_above_bottomline() {
        let (mut generator, evaluator) = setup(ItemMap::new(8, 1, 1), ItemMap::new(1, 2, 2));
        generator.init_propose(&evaluator);

        // We would keep 2 hats, which is exactly our bottomline.
        let result = generator.compromise(&ItemMap::new(1, 0, 2), &evaluator);
        assert_eq!(result, Compromise::Accept);
    }

    #[test]
    fn test_compromise_picks_smaller_package() {
        let (mut generator, evaluator) = setup(ItemMap::new(8, 1, 1), ItemMap::new(1, 2, 2));
        generator.init_propose(&evaluator);

        // They want everything. Package A: they give up the book, we get 8 points.
        // Package B: our proposal is just the book, dropping it leaves 0 points.
        let result = generator.compromise(&ItemMap::new(1, 2, 2), &evaluator);
        assert_eq!(result, Compromise::Take(ItemMap::new(0, 0, 0)));
        assert_eq!(generator.proposal().offer(), Some(&ItemMap::new(0, 0, 0)));
    }

    #[test]
    fn test_compromise_gives_from_their_ask() {
        // top = ball (5), middle = hat (2), bottom = book (1); bottomline 4.
        let (mut generator, evaluator) = setup(ItemMap::new(1, 2, 5), ItemMap::new(2, 2, 1));
        generator.commit(ItemMap::new(2, 2, 1), &evaluator);

        // They keep everything but one book. Package A: they drop the ball,
        // we'd keep 1 book and 1 ball = 6 points. Package B: we drop one book,
        // keeping 1 book, 2 hats and 1 ball = 10 points.
        let result = generator.compromise(&ItemMap::new(1, 2, 1), &evaluator);
        assert_eq!(result, Compromise::Give(ItemMap::new(1, 2, 0)));
        assert_eq!(generator.proposal().offer(), Some(&ItemMap::new(1, 0, 1)));
    }

    #[test]
    fn test_compromise_without_viable_package() {
        let (mut generator, evaluator) = setup(ItemMap::new(8, 1, 1), ItemMap::new(1, 2, 2));

        // Their offer exceeds available counts, even after dropping a hat.
        // We have no proposal to concede from either.
        let result = generator.compromise(&ItemMap::new(0, 3, 3), &evaluator);
        assert_eq!(result, Compromise::Hold);
        assert_eq!(generator.proposal().offer(), None);
    }
}
