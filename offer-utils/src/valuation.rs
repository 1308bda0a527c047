use serde::{Deserialize, Serialize};

use crate::error::OfferError;
use crate::item::{Item, ItemMap};
use crate::offer::Offer;

/// Knowledge base of one negotiator: its private item values and the item
/// counts shared by both sides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Valuation {
    #[serde(rename = "item_values")]
    pub values: ItemMap<i32>,
    #[serde(rename = "item_counts")]
    pub counts: ItemMap<i32>,
}

impl Valuation {
    pub fn new(values: ItemMap<i32>, counts: ItemMap<i32>) -> Result<Valuation, OfferError> {
        let valuation = Valuation { values, counts };
        valuation.check()?;
        Ok(valuation)
    }

    /// Values and counts must be non-negative.
    pub fn check(&self) -> Result<(), OfferError> {
        for (item, value) in self.values.iter().chain(self.counts.iter()) {
            if *value < 0 {
                return Err(OfferError::NegativeCount {
                    item,
                    count: *value,
                });
            }
        }
        Ok(())
    }

    pub fn value(&self, item: Item) -> i32 {
        self.values[item]
    }

    pub fn count(&self, item: Item) -> i32 {
        self.counts[item]
    }

    /// Points this negotiator gets for keeping `offer`.
    pub fn score(&self, offer: &Offer) -> i32 {
        offer
            .iter()
            .map(|(item, count)| self.values[item] * count)
            .sum()
    }

    /// Every count must lie in `0..=available`. Reports first offending item.
    pub fn validate(&self, offer: &Offer) -> Result<(), OfferError> {
        for (item, requested) in offer.iter() {
            let available = self.counts[item];
            if *requested < 0 {
                return Err(OfferError::NegativeCount {
                    item,
                    count: *requested,
                });
            }
            if *requested > available {
                return Err(OfferError::CountExceeded {
                    item,
                    requested: *requested,
                    available,
                });
            }
        }
        Ok(())
    }

    /// Turns what one side keeps into what the other side keeps.
    pub fn reverse(&self, offer: &Offer) -> Offer {
        ItemMap::from_fn(|item| self.counts[item] - offer[item])
    }
}
