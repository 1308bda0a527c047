use serde::{Deserialize, Serialize};
use std::fmt;

use barter_negotiator_component::{Action, Event, Offer};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum NegotiationStage {
    /// Turn taken by negotiator under test.
    Agent(Action),
    /// Scripted turn of the other party.
    Opponent(Event),
    Error(String),
    InfiniteLoop,
    /// Other party has nothing more to say.
    ScriptEnded,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NegotiationRecord {
    pub stages: Vec<NegotiationStage>,
    max_steps: usize,
}

impl NegotiationRecord {
    pub fn new(max_steps: usize) -> NegotiationRecord {
        NegotiationRecord {
            stages: vec![],
            max_steps,
        }
    }

    pub fn agent(&mut self, action: Action) {
        self.stages.push(NegotiationStage::Agent(action));
        if self.steps() > self.max_steps {
            self.stages.push(NegotiationStage::InfiniteLoop);
        }
    }

    pub fn opponent(&mut self, event: Event) {
        self.stages.push(NegotiationStage::Opponent(event));
    }

    pub fn error(&mut self, e: &anyhow::Error) {
        self.stages.push(NegotiationStage::Error(e.to_string()));
    }

    pub fn script_ended(&mut self) {
        self.stages.push(NegotiationStage::ScriptEnded);
    }

    /// Number of turns taken by the agent.
    pub fn steps(&self) -> usize {
        self.agent_actions().count()
    }

    pub fn agent_actions(&self) -> impl Iterator<Item = &Action> + '_ {
        self.stages.iter().filter_map(|stage| match stage {
            NegotiationStage::Agent(action) => Some(action),
            _ => None,
        })
    }

    /// Messages sent by the agent, in order.
    pub fn agent_messages(&self) -> Vec<&str> {
        self.agent_actions()
            .filter_map(|action| match action {
                Action::Message(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last_action(&self) -> Option<&Action> {
        self.agent_actions().last()
    }

    /// Items agent selected, if negotiation ended with a deal.
    pub fn agreement(&self) -> Option<Offer> {
        match self.stages.last() {
            Some(NegotiationStage::Agent(Action::Select(offer))) => Some(*offer),
            _ => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(
            self.stages.last(),
            Some(NegotiationStage::Agent(Action::Reject))
        )
    }

    pub fn is_finished(&self) -> bool {
        match self.stages.last() {
            Some(stage) => match stage {
                NegotiationStage::Agent(action) => action.is_final(),
                NegotiationStage::Opponent(_) => false,
                NegotiationStage::Error(_) => true,
                NegotiationStage::InfiniteLoop => true,
                NegotiationStage::ScriptEnded => true,
            },
            None => false,
        }
    }
}

impl fmt::Display for NegotiationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(&self.stages).map_err(|_| fmt::Error)?;
        write!(f, "{}", json)
    }
}
