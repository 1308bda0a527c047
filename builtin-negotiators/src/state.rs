use barter_offer_utils::Offer;

/// Last act we performed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MyAction {
    Intro,
    InitPropose,
    Propose,
    Persuade,
    Compromise,
    FinalCall,
    Agree,
    Clarify,
    Select,
    Reject,
}

/// Last classified act of the other party.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TheirIntent {
    Unknown,
    Question,
    Disagree,
    Propose,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settlement {
    Open,
    /// Deal is locked, next turn selects it.
    Selected,
    /// Next turn rejects.
    Rejected,
}

/// Tactic for given negotiation round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tactic {
    Propose,
    Persuade,
    Compromise,
    FinalCall,
    Reject,
}

/// Round based escalation. Every round ends up in `Reject` after 6 rounds,
/// so negotiation always terminates.
pub fn escalation(round: u32) -> Tactic {
    match round {
        0..=1 => Tactic::Propose,
        2..=3 => Tactic::Persuade,
        4 => Tactic::Compromise,
        5 => Tactic::FinalCall,
        _ => Tactic::Reject,
    }
}

/// Conversation state. Transitions never mutate state in place, they
/// return the next one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogueState {
    pub introduced: bool,
    pub settlement: Settlement,
    pub my_action: Option<MyAction>,
    pub their_intent: TheirIntent,
    pub last_utterance: Option<String>,
    pub round: u32,
    /// Their offer on the table, when we tried to persuade them.
    pub last_offer: Option<Offer>,
}

impl DialogueState {
    pub fn new(opening_rounds: u32) -> DialogueState {
        DialogueState {
            introduced: false,
            settlement: Settlement::Open,
            my_action: None,
            their_intent: TheirIntent::Unknown,
            last_utterance: None,
            round: opening_rounds,
            last_offer: None,
        }
    }

    pub fn acted(&self, action: MyAction) -> DialogueState {
        DialogueState {
            introduced: true,
            my_action: Some(action),
            ..self.clone()
        }
    }

    pub fn next_round(&self) -> DialogueState {
        DialogueState {
            round: self.round + 1,
            ..self.clone()
        }
    }

    pub fn with_intent(&self, intent: TheirIntent) -> DialogueState {
        DialogueState {
            their_intent: intent,
            ..self.clone()
        }
    }

    pub fn settled(&self) -> DialogueState {
        DialogueState {
            settlement: Settlement::Selected,
            my_action: Some(MyAction::Select),
            ..self.clone()
        }
    }

    pub fn rejected(&self) -> DialogueState {
        DialogueState {
            settlement: Settlement::Rejected,
            my_action: Some(MyAction::Reject),
            ..self.clone()
        }
    }

    /// Other party's utterance, classified.
    pub fn heard(&self, utterance: &str, intent: TheirIntent) -> DialogueState {
        DialogueState {
            their_intent: intent,
            last_utterance: Some(utterance.to_string()),
            ..self.clone()
        }
    }

    /// Response to our persuasion. Remembers offer, that was on the table.
    pub fn heard_after_persuasion(
        &self,
        utterance: &str,
        intent: TheirIntent,
        last_offer: Option<Offer>,
    ) -> DialogueState {
        DialogueState {
            last_offer,
            ..self.heard(utterance, intent)
        }
    }
}
