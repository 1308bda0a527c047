mod error;
mod item;
mod offer;
mod valuation;

pub use error::OfferError;
pub use item::{Item, ItemMap};
pub use offer::{Offer, Proposal};
pub use valuation::Valuation;
