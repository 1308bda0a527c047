use derive_more::Display;
use serde::{Deserialize, Serialize};

use barter_offer_utils::Offer;

/// Event coming from the other party of the conversation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "lowercase")]
pub enum Event {
    /// Other party selected final deal.
    Select,
    /// Other party walked away.
    Reject,
    /// Free text utterance.
    Message(String),
}

/// Turn produced by `DialogueNegotiator::send`.
#[derive(Clone, Debug, Display, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    #[display(fmt = "Message: {}", _0)]
    Message(String),
    /// Final selection: items we keep.
    #[display(fmt = "Select ({})", _0)]
    Select(Offer),
    #[display(fmt = "Reject")]
    Reject,
}

impl Action {
    pub fn message(text: impl ToString) -> Action {
        Action::Message(text.to_string())
    }

    /// Select and Reject end the conversation.
    pub fn is_final(&self) -> bool {
        !matches!(self, Action::Message(_))
    }
}

/// Negotiation policy of one agent in one conversation. Turns are taken
/// cooperatively: `receive` is called with the other party's event, `send`
/// when it is our turn.
///
/// Implementations don't do any IO and are not shared between conversations.
pub trait DialogueNegotiator {
    /// Consume other party's turn and update internal state.
    fn receive(&mut self, event: &Event) -> anyhow::Result<()>;

    /// Decide our next turn. Returning an error means, that negotiator
    /// reached state it doesn't know how to handle and conversation
    /// should be aborted.
    fn send(&mut self) -> anyhow::Result<Action>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use barter_offer_utils::ItemMap;

    #[test]
    fn test_action_display() {
        let message = Action::message("How about I get 1 book?");
        let select = Action::Select(ItemMap::new(1, 0, 2));

        assert_eq!(message.to_string(), "Message: How about I get 1 book?");
        assert_eq!(select.to_string(), "Select (book=1 hat=0 ball=2)");
        assert_eq!(Action::Reject.to_string(), "Reject");

        assert!(!message.is_final());
        assert!(select.is_final());
        assert!(Action::Reject.is_final());
    }

    #[test]
    fn test_event_serialization() {
        let event: Event =
            serde_json::from_str(r#"{"action": "message", "data": "deal"}"#).unwrap();
        assert_eq!(event, Event::Message("deal".to_string()));

        let event: Event = serde_json::from_str(r#"{"action": "select"}"#).unwrap();
        assert_eq!(event, Event::Select);
    }
}
