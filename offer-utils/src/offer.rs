use serde::{Deserialize, Serialize};

use crate::item::ItemMap;

/// Split of item counts. Counts are signed, so that candidate packages built
/// by subtracting units can be represented and rejected by validation.
pub type Offer = ItemMap<i32>;

impl ItemMap<i32> {
    pub fn zero() -> Offer {
        ItemMap::new(0, 0, 0)
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, count)| *count == 0)
    }
}

/// Our own working offer. It can be announced (`made`) before any numbers
/// are committed, so the offer itself stays optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    made: bool,
    offer: Option<Offer>,
}

impl Proposal {
    pub fn new() -> Proposal {
        Proposal::default()
    }

    pub fn is_made(&self) -> bool {
        self.made
    }

    pub fn offer(&self) -> Option<&Offer> {
        self.offer.as_ref()
    }

    /// Committed numbers, or all zeros if nothing was committed yet.
    pub fn offer_or_zero(&self) -> Offer {
        self.offer.unwrap_or_else(Offer::zero)
    }

    /// Marks proposal as announced without committing numbers.
    pub fn mark_made(&mut self) {
        self.made = true;
    }

    /// First call zeroes all items. Later calls don't change anything.
    pub fn make(&mut self) {
        if !self.made {
            self.made = true;
            self.offer = Some(Offer::zero());
        }
    }

    pub fn commit(&mut self, offer: Offer) {
        self.made = true;
        self.offer = Some(offer);
    }

    /// Commits `offer` only if no numbers were committed before.
    pub fn fill_unset(&mut self, offer: Offer) {
        if self.offer.is_none() {
            self.commit(offer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_is_idempotent() {
        let mut proposal = Proposal::new();
        assert!(!proposal.is_made());
        assert_eq!(proposal.offer(), None);

        proposal.make();
        assert!(proposal.is_made());
        assert_eq!(proposal.offer(), Some(&Offer::zero()));

        proposal.commit(ItemMap::new(1, 0, 2));
        proposal.make();
        assert_eq!(proposal.offer(), Some(&ItemMap::new(1, 0, 2)));
    }

    #[test]
    fn test_announced_proposal_has_no_numbers() {
        let mut proposal = Proposal::new();
        proposal.mark_made();
        proposal.make();

        assert!(proposal.is_made());
        assert_eq!(proposal.offer(), None);
        assert_eq!(proposal.offer_or_zero(), Offer::zero());

        proposal.fill_unset(ItemMap::new(1, 1, 1));
        proposal.fill_unset(ItemMap::new(2, 2, 2));
        assert_eq!(proposal.offer(), Some(&ItemMap::new(1, 1, 1)));
    }
}
