use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::error::OfferError;

/// One of the three item categories split between negotiators.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Item {
    #[display(fmt = "book")]
    Book,
    #[display(fmt = "hat")]
    Hat,
    #[display(fmt = "ball")]
    Ball,
}

impl Item {
    /// Canonical iteration order. Rendering and tie-breaking follow it.
    pub const ALL: [Item; 3] = [Item::Book, Item::Hat, Item::Ball];
}

impl FromStr for Item {
    type Err = OfferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().trim_end_matches('s') {
            "book" => Ok(Item::Book),
            "hat" => Ok(Item::Hat),
            "ball" => Ok(Item::Ball),
            _ => Err(OfferError::UnknownItem(s.to_string())),
        }
    }
}

/// Fixed-size map holding one value per `Item`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemMap<T> {
    pub book: T,
    pub hat: T,
    pub ball: T,
}

impl<T> ItemMap<T> {
    pub fn new(book: T, hat: T, ball: T) -> ItemMap<T> {
        ItemMap { book, hat, ball }
    }

    pub fn from_fn(mut f: impl FnMut(Item) -> T) -> ItemMap<T> {
        ItemMap {
            book: f(Item::Book),
            hat: f(Item::Hat),
            ball: f(Item::Ball),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Item, &T)> + '_ {
        Item::ALL.into_iter().map(move |item| (item, &self[item]))
    }
}

impl<T> Index<Item> for ItemMap<T> {
    type Output = T;

    fn index(&self, item: Item) -> &T {
        match item {
            Item::Book => &self.book,
            Item::Hat => &self.hat,
            Item::Ball => &self.ball,
        }
    }
}

impl<T> IndexMut<Item> for ItemMap<T> {
    fn index_mut(&mut self, item: Item) -> &mut T {
        match item {
            Item::Book => &mut self.book,
            Item::Hat => &mut self.hat,
            Item::Ball => &mut self.ball,
        }
    }
}

impl<T: fmt::Display> fmt::Display for ItemMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "book={} hat={} ball={}", self.book, self.hat, self.ball)
    }
}
