//! Ordered decision table used on our turn. First rule with passing guard wins.

use crate::error::PolicyError;
use crate::state::{DialogueState, MyAction, Settlement, TheirIntent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    SelectDeal,
    Reject,
    ResolvePersuasion,
    ProcessOffer,
    AnswerQuestion,
    Intro,
    InitPropose,
    Propose,
    Clarify,
}

/// Facts from outside of `DialogueState`, snapshotted before deciding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Signals {
    /// Tracker detected structured offer in their last utterance.
    pub their_offer_made: bool,
    pub needs_clarification: bool,
    /// Result of coin flip between opening question and opening proposal.
    pub wants_intro: bool,
    pub proposal_made: bool,
}

pub struct Rule {
    pub name: &'static str,
    pub guard: fn(&DialogueState, &Signals) -> bool,
    pub decision: Decision,
}

fn settled(state: &DialogueState, _: &Signals) -> bool {
    state.settlement == Settlement::Selected
}

fn rejected(state: &DialogueState, _: &Signals) -> bool {
    state.settlement == Settlement::Rejected
}

fn persuading(state: &DialogueState, _: &Signals) -> bool {
    state.my_action == Some(MyAction::Persuade)
}

fn their_offer(_: &DialogueState, signals: &Signals) -> bool {
    signals.their_offer_made
}

fn question(state: &DialogueState, _: &Signals) -> bool {
    state.their_intent == TheirIntent::Question
}

fn opening_question(state: &DialogueState, signals: &Signals) -> bool {
    !state.introduced && signals.wants_intro
}

fn opening_proposal(state: &DialogueState, signals: &Signals) -> bool {
    !state.introduced && !signals.proposal_made
}

fn follow_up_proposal(state: &DialogueState, signals: &Signals) -> bool {
    !signals.their_offer_made && state.my_action == Some(MyAction::InitPropose)
}

fn no_offer_yet(_: &DialogueState, signals: &Signals) -> bool {
    !signals.their_offer_made
}

fn unclear(_: &DialogueState, signals: &Signals) -> bool {
    signals.needs_clarification
}

pub const RULES: &[Rule] = &[
    Rule {
        name: "settled",
        guard: settled,
        decision: Decision::SelectDeal,
    },
    Rule {
        name: "rejected",
        guard: rejected,
        decision: Decision::Reject,
    },
    Rule {
        name: "persuading",
        guard: persuading,
        decision: Decision::ResolvePersuasion,
    },
    Rule {
        name: "their-offer",
        guard: their_offer,
        decision: Decision::ProcessOffer,
    },
    Rule {
        name: "question",
        guard: question,
        decision: Decision::AnswerQuestion,
    },
    Rule {
        name: "opening-question",
        guard: opening_question,
        decision: Decision::Intro,
    },
    Rule {
        name: "opening-proposal",
        guard: opening_proposal,
        decision: Decision::InitPropose,
    },
    Rule {
        name: "follow-up-proposal",
        guard: follow_up_proposal,
        decision: Decision::Propose,
    },
    Rule {
        name: "no-offer-yet",
        guard: no_offer_yet,
        decision: Decision::InitPropose,
    },
    Rule {
        name: "clarification",
        guard: unclear,
        decision: Decision::Clarify,
    },
];

pub fn decide(state: &DialogueState, signals: &Signals) -> Result<&'static Rule, PolicyError> {
    decide_from(RULES, state, signals)
}

fn decide_from(
    rules: &'static [Rule],
    state: &DialogueState,
    signals: &Signals,
) -> Result<&'static Rule, PolicyError> {
    rules
        .iter()
        .find(|rule| (rule.guard)(state, signals))
        .ok_or_else(|| PolicyError::PolicyGap(format!("{:?}, {:?}", state, signals)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn introduced(action: MyAction) -> DialogueState {
        DialogueState::new(0).acted(action)
    }

    fn offer_made() -> Signals {
        Signals {
            their_offer_made: true,
            proposal_made: true,
            ..Signals::default()
        }
    }

    #[test_case(DialogueState::new(0).settled(), offer_made(), Decision::SelectDeal; "settled wins")]
    #[test_case(DialogueState::new(0).rejected(), offer_made(), Decision::Reject; "rejected")]
    #[test_case(introduced(MyAction::Persuade), offer_made(), Decision::ResolvePersuasion; "persuading")]
    #[test_case(introduced(MyAction::Propose), offer_made(), Decision::ProcessOffer; "their offer")]
    #[test_case(
        introduced(MyAction::Propose).with_intent(TheirIntent::Question),
        Signals { proposal_made: true, ..Signals::default() },
        Decision::AnswerQuestion;
        "question"
    )]
    #[test_case(
        DialogueState::new(0),
        Signals { wants_intro: true, ..Signals::default() },
        Decision::Intro;
        "opening question"
    )]
    #[test_case(DialogueState::new(0), Signals::default(), Decision::InitPropose; "opening proposal")]
    #[test_case(
        DialogueState::new(0),
        Signals { proposal_made: true, ..Signals::default() },
        Decision::InitPropose;
        "not introduced with proposal made"
    )]
    #[test_case(
        introduced(MyAction::InitPropose),
        Signals { proposal_made: true, ..Signals::default() },
        Decision::Propose;
        "follow up proposal"
    )]
    #[test_case(
        introduced(MyAction::Intro),
        Signals { proposal_made: false, ..Signals::default() },
        Decision::InitPropose;
        "proposal after intro"
    )]
    fn test_decision_rules(state: DialogueState, signals: Signals, expected: Decision) {
        assert_eq!(decide(&state, &signals).unwrap().decision, expected);
    }

    #[test]
    fn test_clarification_rule() {
        let rule = RULES.iter().find(|rule| rule.name == "clarification").unwrap();
        let signals = Signals {
            needs_clarification: true,
            ..Signals::default()
        };
        assert!((rule.guard)(&introduced(MyAction::Agree), &signals));
        assert_eq!(rule.decision, Decision::Clarify);
    }

    #[test]
    fn test_policy_gap_is_error() {
        let state = introduced(MyAction::Propose);
        let result = decide_from(&RULES[..3], &state, &Signals::default());
        assert!(matches!(result, Err(PolicyError::PolicyGap(_))));
    }

    #[test]
    fn test_rule_names_are_unique() {
        let mut names = RULES.iter().map(|rule| rule.name).collect::<Vec<_>>();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), RULES.len());
    }
}
