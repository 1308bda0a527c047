use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use barter_negotiator_component::{
    Action, DialogueNegotiator, Event, OfferTracker, Tokenizer,
};
use barter_offer_utils::{Offer, Proposal, Valuation};

use crate::config::Config;
use crate::evaluator::{Criterion, Evaluator};
use crate::generator::{Compromise, ProposalGenerator};
use crate::nlu;
use crate::rules::{self, Decision, Signals};
use crate::state::{escalation, DialogueState, MyAction, Tactic, TheirIntent};
use crate::strategy::{ItemRanking, Strategy, Thresholds};
use crate::templates::{MessageTemplater, Phrase};

/// Why we escalate: their offer was acceptable for further bargaining or
/// below our bottomline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Escalation {
    Negotiate,
    Hardball,
}

/// Rule based negotiator bargaining over books, hats and balls.
pub struct RuleBased {
    config: Config,
    strategy: Strategy,
    ranking: ItemRanking,
    evaluator: Evaluator,
    generator: ProposalGenerator,
    templater: MessageTemplater,
    state: DialogueState,

    tokenizer: Box<dyn Tokenizer>,
    tracker: Box<dyn OfferTracker>,
    rng: StdRng,
}

impl RuleBased {
    pub fn new(
        config: serde_yaml::Value,
        valuation: Valuation,
        tokenizer: Box<dyn Tokenizer>,
        tracker: Box<dyn OfferTracker>,
    ) -> anyhow::Result<RuleBased> {
        Self::with_config(Config::from_yaml(config)?, valuation, tokenizer, tracker)
    }

    pub fn with_config(
        config: Config,
        valuation: Valuation,
        tokenizer: Box<dyn Tokenizer>,
        mut tracker: Box<dyn OfferTracker>,
    ) -> anyhow::Result<RuleBased> {
        valuation.check()?;

        let strategy = Strategy::pick(&valuation.values, config.good_deal_threshold);
        let ranking = ItemRanking::new(&valuation.values);
        let thresholds = Thresholds::new(&valuation, &ranking, config.good_deal_threshold);

        log::info!(
            "RuleBased: strategy {:?} for values [{}], thresholds: {:?}",
            strategy,
            valuation.values,
            thresholds
        );

        tracker.set_item_counts(&valuation.counts);
        tracker.reset();

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let templater = MessageTemplater::new(
            valuation.counts,
            config.seed.map(|seed| seed.wrapping_add(1)),
        );

        Ok(RuleBased {
            state: DialogueState::new(strategy.opening_rounds()),
            generator: ProposalGenerator::new(strategy, ranking),
            evaluator: Evaluator::new(valuation, thresholds),
            templater,
            config,
            strategy,
            ranking,
            tokenizer,
            tracker,
            rng,
        })
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn state(&self) -> &DialogueState {
        &self.state
    }

    pub fn proposal(&self) -> &Proposal {
        self.generator.proposal()
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    fn say(&mut self, phrase: Phrase) -> Action {
        Action::Message(self.templater.render(&phrase))
    }

    fn signals(&mut self) -> Signals {
        let wants_intro =
            !self.state.introduced && self.rng.gen::<f64>() < self.config.speaker_order;
        Signals {
            their_offer_made: self.tracker.made_offer(),
            needs_clarification: self.tracker.needs_clarification(),
            wants_intro,
            proposal_made: self.generator.proposal().is_made(),
        }
    }

    /// Their offer turned into what we would keep, if it respects item counts.
    fn their_offer_for_us(&self) -> Option<Offer> {
        let their_offer = self.tracker.their_offer()?;
        let ours = self.evaluator.reverse(&their_offer);
        match self.evaluator.validate(&ours) {
            Ok(()) => Some(ours),
            Err(e) => {
                log::info!("RuleBased: their offer [{}] is invalid. {}", their_offer, e);
                None
            }
        }
    }

    /// On our agreement proposal becomes exactly their offer. Otherwise
    /// only missing numbers are taken from it.
    fn finalize_proposal(&mut self, agreed: bool) {
        if let Some(ours) = self.their_offer_for_us() {
            if agreed {
                self.generator.commit(ours, &self.evaluator);
            } else {
                self.generator.fill_unset(ours, &self.evaluator);
            }
        }
    }

    fn select_deal(&mut self) -> Action {
        self.finalize_proposal(false);

        let selected = self
            .generator
            .proposal()
            .offer()
            .copied()
            .filter(|offer| self.evaluator.score(offer) >= 0);

        match selected {
            Some(offer) => {
                log::info!(
                    "RuleBased: selecting deal [{}] worth {} points.",
                    offer,
                    self.evaluator.score(&offer)
                );
                self.state = self.state.acted(MyAction::Select);
                Action::Select(offer)
            }
            None => {
                log::warn!("RuleBased: settled without valid proposal, rejecting.");
                self.reject()
            }
        }
    }

    fn reject(&mut self) -> Action {
        log::info!("RuleBased: rejecting in round {}.", self.state.round);
        self.state = self.state.rejected();
        Action::Reject
    }

    fn intro(&mut self) -> Action {
        self.state = self.state.acted(MyAction::Intro);
        self.say(Phrase::Intro)
    }

    fn init_propose(&mut self) -> Action {
        self.state = self.state.acted(MyAction::InitPropose);
        let phrase = self.generator.init_propose(&self.evaluator);
        self.say(phrase)
    }

    fn propose(&mut self) -> Action {
        self.state = self.state.acted(MyAction::Propose);
        if !self.generator.proposal().is_made() {
            return self.init_propose();
        }
        let phrase = self.generator.propose(&self.evaluator);
        self.say(phrase)
    }

    fn agree(&mut self) -> Action {
        self.state = self.state.acted(MyAction::Agree).settled();
        self.finalize_proposal(true);
        self.say(Phrase::Agree)
    }

    fn persuade(&mut self) -> Action {
        self.state = self.state.acted(MyAction::Persuade);
        self.say(Phrase::Persuade {
            technique: self.config.persuade_technique,
            top: self.ranking.top,
        })
    }

    fn clarify(&mut self) -> Action {
        self.state = self.state.acted(MyAction::Clarify);
        self.say(Phrase::Clarify {
            their_offer: self.tracker.their_offer(),
        })
    }

    fn compromise(&mut self, their_offer: &Offer) -> Action {
        self.state = self.state.acted(MyAction::Compromise);
        match self.generator.compromise(their_offer, &self.evaluator) {
            Compromise::Accept => self.agree(),
            Compromise::Give(theirs) => self.say(Phrase::CompromiseGive { theirs }),
            Compromise::Take(ours) => self.say(Phrase::CompromiseTake { ours }),
            Compromise::Hold => self.say(Phrase::Refuse),
        }
    }

    fn final_call(&mut self, ours: &Offer) -> Action {
        self.state = self.state.acted(MyAction::FinalCall);
        if self.evaluator.meets(ours, Criterion::FinalCall) {
            self.agree()
        } else {
            self.say(Phrase::Refuse)
        }
    }

    fn escalate(&mut self, mode: Escalation, their_offer: &Offer, ours: &Offer) -> Action {
        self.state = self.state.next_round();
        let tactic = escalation(self.state.round);
        log::debug!(
            "RuleBased: {:?} escalation, round {}: {:?}",
            mode,
            self.state.round,
            tactic
        );

        match tactic {
            Tactic::Propose => match (mode, self.propose()) {
                (Escalation::Hardball, Action::Message(proposal)) => {
                    let bottom = self.ranking.bottom;
                    let refusal = self.templater.render(&Phrase::Hardball {
                        bottom,
                        value: self.evaluator.valuation().value(bottom),
                    });
                    Action::Message(format!("{} {}", refusal, proposal))
                }
                (_, action) => action,
            },
            Tactic::Persuade => self.persuade(),
            Tactic::Compromise => self.compromise(their_offer),
            Tactic::FinalCall => self.final_call(ours),
            Tactic::Reject => self.reject(),
        }
    }

    fn process_offer(&mut self) -> Action {
        self.state = self.state.with_intent(TheirIntent::Propose);
        self.tracker.determine_item_count();
        self.tracker.determine_which_agent();
        self.tracker.resolve_tracker();
        self.tracker.merge_their_offers();

        let (their_offer, ours) = match (self.tracker.their_offer(), self.their_offer_for_us()) {
            (Some(their_offer), Some(ours)) => (their_offer, ours),
            _ => return self.clarify(),
        };

        log::debug!(
            "RuleBased: their offer leaves us [{}] worth {} points.",
            ours,
            self.evaluator.score(&ours)
        );

        if self.evaluator.meets(&ours, Criterion::GoodDeal)
            || self
                .evaluator
                .meets(&ours, Criterion::MyProposal(self.generator.proposal()))
        {
            return self.agree();
        }

        let mode = if self.evaluator.meets(&ours, Criterion::Bottomline) {
            Escalation::Negotiate
        } else {
            Escalation::Hardball
        };
        self.escalate(mode, &their_offer, &ours)
    }

    fn resolve_persuasion(&mut self) -> Action {
        self.tracker.determine_item_count();

        if self.state.their_intent == TheirIntent::Disagree {
            // They refused to give more, so we settle on their previous offer.
            let earlier = self
                .state
                .last_offer
                .map(|offer| self.evaluator.reverse(&offer));
            if let Some(ours) = earlier {
                if self.generator.commit(ours, &self.evaluator) {
                    self.state = self.state.settled();
                    return self.say(Phrase::AcceptEarlier);
                }
            }
            return self.clarify();
        }

        if !self.tracker.lexicon().is_empty() {
            self.tracker.determine_which_agent();
            self.tracker.resolve_persuasion(self.state.last_offer.as_ref());
            if self.their_offer_for_us().is_some() {
                return self.agree();
            }
        }
        self.clarify()
    }
}

impl DialogueNegotiator for RuleBased {
    fn receive(&mut self, event: &Event) -> anyhow::Result<()> {
        match event {
            Event::Select => {
                log::info!("RuleBased: other party selected deal.");
                self.state = self.state.settled();
            }
            Event::Reject => {
                log::info!("RuleBased: other party rejected negotiations.");
                self.state = self.state.rejected();
            }
            Event::Message(text) => {
                let tokens = self.tokenizer.tokenize(text);
                if self.state.my_action == Some(MyAction::Persuade) {
                    let intent = if nlu::is_disagreement(&tokens) {
                        TheirIntent::Disagree
                    } else {
                        TheirIntent::Unknown
                    };
                    self.state = self.state.heard_after_persuasion(
                        text,
                        intent,
                        self.tracker.their_offer(),
                    );
                } else {
                    let intent = if nlu::is_question(&tokens) {
                        TheirIntent::Question
                    } else {
                        TheirIntent::Unknown
                    };
                    self.state = self.state.heard(text, intent);

                    if nlu::is_agreement(text, &tokens) {
                        log::info!("RuleBased: other party agreed: '{}'", text);
                        self.finalize_proposal(false);
                        self.state = self.state.settled();
                    }
                }

                self.tracker.reset();
                self.tracker.build_lexicon(&tokens);
            }
        }
        Ok(())
    }

    fn send(&mut self) -> anyhow::Result<Action> {
        let signals = self.signals();
        let rule = rules::decide(&self.state, &signals)?;
        log::debug!("RuleBased: rule '{}' fired.", rule.name);

        let action = match rule.decision {
            Decision::SelectDeal => self.select_deal(),
            Decision::Reject => self.reject(),
            Decision::ResolvePersuasion => self.resolve_persuasion(),
            Decision::ProcessOffer => self.process_offer(),
            Decision::AnswerQuestion | Decision::Propose => {
                self.state = self.state.next_round();
                self.propose()
            }
            Decision::Intro => self.intro(),
            Decision::InitPropose => self.init_propose(),
            Decision::Clarify => self.clarify(),
        };
        Ok(action)
    }
}
