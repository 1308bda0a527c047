pub mod factory;
mod negotiators;

pub use negotiators::{NegotiatorActor, NegotiatorAddr, ReceiveEvent, SendTurn};

pub use barter_negotiator_component::{Action, DialogueNegotiator, Event};

pub mod builtin {
    pub use barter_builtin_negotiators::{Config, PersuadeTechnique, RuleBased, Strategy};
}

pub mod component {
    pub use barter_negotiator_component::{
        Action, DialogueNegotiator, Event, Item, ItemMap, Offer, OfferError, OfferTracker,
        Proposal, Tokenizer, Valuation,
    };
}
