pub mod collaborators;
pub mod component;

pub use collaborators::{OfferTracker, Tokenizer};
pub use component::{Action, DialogueNegotiator, Event};

pub use barter_offer_utils::{Item, ItemMap, Offer, OfferError, Proposal, Valuation};
