use serde::{Deserialize, Serialize};

use barter_offer_utils::{Item, ItemMap, Valuation};

/// Lowest bottomline we ever demand, in points.
pub const BOTTOMLINE_FLOOR: i32 = 5;
/// Minimal number of points we accept in the last round before rejecting.
pub const FINAL_CALL_POINTS: i32 = 2;

/// Bargaining strategy derived from our own valuation skew.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// We care about one item only.
    Obsessed,
    /// One item is worthless to us, interest is spread over the remaining two.
    Overvalued,
    /// All items are worth something.
    Balanced,
}

impl Strategy {
    pub fn pick(values: &ItemMap<i32>, good_deal: i32) -> Strategy {
        let max = values.iter().map(|(_, value)| *value).max().unwrap_or(0);
        let zeros = values.iter().filter(|(_, value)| **value == 0).count();

        if max >= good_deal {
            Strategy::Obsessed
        } else if zeros == 1 {
            Strategy::Overvalued
        } else if zeros >= 2 {
            Strategy::Obsessed
        } else {
            Strategy::Balanced
        }
    }

    /// Rounds consumed before the first negotiation round. Balanced openers
    /// spend one extra conversational beat.
    pub fn opening_rounds(&self) -> u32 {
        match self {
            Strategy::Balanced => 1,
            _ => 0,
        }
    }
}

/// Our items ordered by value, descending. Ties keep `Item::ALL` order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemRanking {
    pub top: Item,
    pub middle: Item,
    pub bottom: Item,
}

impl ItemRanking {
    pub fn new(values: &ItemMap<i32>) -> ItemRanking {
        let mut items = Item::ALL;
        items.sort_by(|a, b| values[*b].cmp(&values[*a]));

        ItemRanking {
            top: items[0],
            middle: items[1],
            bottom: items[2],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Thresholds {
    pub good_deal: i32,
    pub bottomline: i32,
    pub final_call: i32,
}

impl Thresholds {
    pub fn new(valuation: &Valuation, ranking: &ItemRanking, good_deal: i32) -> Thresholds {
        let bottomline = valuation
            .value(ranking.top)
            .min(2 * valuation.value(ranking.middle))
            .min(BOTTOMLINE_FLOOR);

        Thresholds {
            good_deal,
            bottomline,
            final_call: FINAL_CALL_POINTS,
        }
    }
}
