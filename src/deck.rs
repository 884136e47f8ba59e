use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeckSection {
    Main,
    Sideboard,
    Schemes,
    Planes,
    Avatar,
    Commander,
}

impl fmt::Display for DeckSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use DeckSection::*;
        match self {
            Main => write!(f, "Main"),
            Sideboard => write!(f, "Sideboard"),
            Schemes => write!(f, "Schemes"),
            Planes => write!(f, "Planes"),
            Avatar => write!(f, "Avatar"),
            Commander => write!(f, "Commander"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeckType {
    CustomDeck,
    PreconstructedDeck,
    ColorDeck,
    CommanderDeck,
    RandomDeck,
}

impl fmt::Display for DeckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use DeckType::*;
        match self {
            CustomDeck => write!(f, "Custom Deck"),
            PreconstructedDeck => write!(f, "Preconstructed Deck"),
            ColorDeck => write!(f, "Color Deck"),
            CommanderDeck => write!(f, "Commander Deck"),
            RandomDeck => write!(f, "Random Deck"),
        }
    }
}

/// Multiset of card names forming one deck section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPool {
    cards: BTreeMap<String, u32>,
}

impl CardPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str) {
        self.add_n(name, 1);
    }

    pub fn add_n(&mut self, name: &str, count: u32) {
        if count == 0 {
            return;
        }
        *self.cards.entry(name.to_string()).or_insert(0) += count;
    }

    pub fn count(&self, name: &str) -> u32 {
        self.cards.get(name).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.cards.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.cards.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub name: String,
    sections: BTreeMap<DeckSection, CardPool>,
}

impl Deck {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            sections: BTreeMap::new(),
        }
    }

    /// Replaces the section wholesale, discarding any previous pool.
    pub fn put_section(&mut self, section: DeckSection, cards: CardPool) {
        self.sections.insert(section, cards);
    }

    pub fn section(&self, section: DeckSection) -> Option<&CardPool> {
        self.sections.get(&section)
    }

    pub fn has_section(&self, section: DeckSection) -> bool {
        self.sections.contains_key(&section)
    }

    pub fn sections(&self) -> impl Iterator<Item = (DeckSection, &CardPool)> {
        self.sections.iter().map(|(section, pool)| (*section, pool))
    }
}
