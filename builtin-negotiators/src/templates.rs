use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use barter_offer_utils::{Item, ItemMap, Offer};

use crate::config::PersuadeTechnique;

/// What we want to say, independent of wording.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phrase {
    Intro,
    OpenObsessed { top: Item },
    OpenOvervalued {
        top: Item,
        middle: Item,
        ours: Offer,
        theirs: Offer,
    },
    OpenBalanced { bottom: Item },
    InsistObsessed { top: Item },
    Ask { ours: Offer },
    Hardball { bottom: Item, value: i32 },
    Persuade {
        technique: PersuadeTechnique,
        top: Item,
    },
    Agree,
    Refuse,
    CompromiseGive { theirs: Offer },
    CompromiseTake { ours: Offer },
    Clarify { their_offer: Option<Offer> },
    AcceptEarlier,
}

/// Renders `Phrase` into one of several equivalent wordings. Choice is
/// random, but reproducible for seeded templater.
pub struct MessageTemplater {
    counts: ItemMap<i32>,
    rng: StdRng,
}

impl MessageTemplater {
    pub fn new(counts: ItemMap<i32>, seed: Option<u64>) -> MessageTemplater {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        MessageTemplater { counts, rng }
    }

    pub fn render(&mut self, phrase: &Phrase) -> String {
        let options = match phrase {
            Phrase::Intro => vec![
                "So what looks good to you?".to_string(),
                "Which items do you value highly?".to_string(),
                "Hi, what would you like?".to_string(),
            ],
            Phrase::OpenObsessed { top } => {
                let items = self.pluralize(*top);
                vec![
                    format!(
                        "The {} alone {} good to me. What about you?",
                        items,
                        self.verb(*top, "looks", "look")
                    ),
                    format!("I only need the {}, you can have the rest!", items),
                    format!("I would really appreciate getting just the {} :)", items),
                ]
            }
            Phrase::OpenOvervalued {
                top,
                middle,
                ours,
                theirs,
            } => vec![
                format!(
                    "What if I get a {} along with a {} and you take the rest?",
                    top, middle
                ),
                format!("I would like {}, please.", offer_to_string(ours)),
                format!("How does {} for you sound?", offer_to_string(theirs)),
            ],
            Phrase::OpenBalanced { bottom } => vec![
                "They all look good to me, what do you want?".to_string(),
                "Hi, they all look nice, what do you propose?".to_string(),
                format!("Would you like to have all the {}?", self.pluralize(*bottom)),
            ],
            Phrase::InsistObsessed { top } => {
                let items = self.pluralize(*top);
                vec![
                    format!("I would really like the {}, you can have the rest!", items),
                    format!(
                        "The {} {} the only item worth anything to me, you can have the rest!",
                        items,
                        self.verb(*top, "is", "are")
                    ),
                    format!("Hmm, I actually only get points for the {}.", items),
                ]
            }
            Phrase::Ask { ours } => {
                let ours = offer_to_string(ours);
                vec![
                    format!("I would really like {}.", ours),
                    format!("Would it be ok for me to get {}?", ours),
                    format!("How about I get {}?", ours),
                ]
            }
            Phrase::Hardball { bottom, value } => vec![
                "You drive a hard bargain here!".to_string(),
                "That is too low, I can't do that!".to_string(),
                format!(
                    "The {}s are worth {} point{} to me, I can't take that!",
                    bottom,
                    value,
                    if *value == 1 { "" } else { "s" }
                ),
            ],
            Phrase::Persuade { technique, top } => persuasion_lines(*technique, *top),
            Phrase::Agree => vec![
                "Great deal, thanks!".to_string(),
                "Yes, that sounds good".to_string(),
                "Perfect, sounds like we have a deal!".to_string(),
                "OK, it's a deal".to_string(),
            ],
            Phrase::Refuse => vec![
                "No, I can't do that.".to_string(),
                "Sorry, need more than that".to_string(),
                "Let's try something else".to_string(),
            ],
            Phrase::CompromiseGive { theirs } => vec![format!(
                "How about this, you can have {}.",
                offer_to_string(theirs)
            )],
            Phrase::CompromiseTake { ours } => vec![format!(
                "Hmm, how about I take just {}.",
                offer_to_string(ours)
            )],
            Phrase::Clarify {
                their_offer: Some(offer),
            } if offer.iter().any(|(_, count)| *count > 0) => {
                let offer = offer_to_string(offer);
                vec![
                    format!("I believe you want {}?", offer),
                    format!("I think you want {}?", offer),
                    format!("Do you want {}?", offer),
                ]
            }
            Phrase::Clarify { .. } => vec![
                "I'm not sure what you meant there, can you clarify?".to_string(),
                "Can you please explain again?".to_string(),
                "Sorry, what is it that you want exactly?".to_string(),
            ],
            Phrase::AcceptEarlier => {
                vec!["OK, we can go with what you said earlier then.".to_string()]
            }
        };
        self.choose(options)
    }

    fn choose(&mut self, mut options: Vec<String>) -> String {
        let idx = self.rng.gen_range(0..options.len());
        options.swap_remove(idx)
    }

    fn pluralize(&self, item: Item) -> String {
        if self.counts[item] > 1 {
            format!("{}s", item)
        } else {
            item.to_string()
        }
    }

    fn verb(&self, item: Item, singular: &'static str, plural: &'static str) -> &'static str {
        if self.counts[item] > 1 {
            plural
        } else {
            singular
        }
    }
}

fn persuasion_lines(technique: PersuadeTechnique, top: Item) -> Vec<String> {
    let lines: [&str; 3] = match (technique, top) {
        (PersuadeTechnique::Boring, _) => [
            "Can you do better than that?",
            "Maybe just one more item for me?",
            "Can you offer me just one more item?",
        ],
        (PersuadeTechnique::Creative, Item::Book) => [
            "I have always been a book worm.",
            "The books come in a set, so I would want them all.",
            "I'm trying to complete my collection of novels in this series.",
        ],
        (PersuadeTechnique::Creative, Item::Hat) => [
            "I need to hide a bald spot with the hat.",
            "People tell me I look great with a hat on.",
            "This hat fits perfectly with my head.",
        ],
        (PersuadeTechnique::Creative, Item::Ball) => [
            "I have always loved sports.",
            "I need these for my youth rec league.",
            "My kids would love to play with the balls.",
        ],
    };
    lines.iter().map(|line| line.to_string()).collect()
}

fn count_to_string(item: Item, count: i32) -> String {
    match count {
        count if count < 1 => format!("no {}s", item),
        1 => format!("1 {}", item),
        count => format!("{} {}s", count, item),
    }
}

/// Lists every item when at most one of them is zero, otherwise only the
/// non-zero ones.
pub fn offer_to_string(offer: &Offer) -> String {
    let zeros = offer.iter().filter(|(_, count)| **count < 1).count();
    let parts = offer
        .iter()
        .filter(|(_, count)| zeros < 2 || **count > 0)
        .map(|(item, count)| count_to_string(item, *count))
        .collect::<Vec<_>>();

    match parts.split_last() {
        None => "nothing".to_string(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    }
}
