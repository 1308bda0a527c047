use crate::item::Item;

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum OfferError {
    #[error("Unknown item '{0}'")]
    UnknownItem(String),
    #[error("Offer asks for {requested} {item}(s), but only {available} available")]
    CountExceeded {
        item: Item,
        requested: i32,
        available: i32,
    },
    #[error("Negative count {count} for {item}")]
    NegativeCount { item: Item, count: i32 },
}

impl OfferError {
    /// Item which made the offer invalid, if any.
    pub fn item(&self) -> Option<Item> {
        match self {
            OfferError::UnknownItem(_) => None,
            OfferError::CountExceeded { item, .. } | OfferError::NegativeCount { item, .. } => {
                Some(*item)
            }
        }
    }
}
