use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameType {
    Vanguard,
    MomirBasic,
    Commander,
    TinyLeaders,
    Planechase,
    Archenemy,
    ArchenemyRumble,
}

impl GameType {
    /// Variants that own deck selection outright and bypass the main chooser.
    pub fn replaces_main_deck(&self) -> bool {
        matches!(self, GameType::Commander | GameType::TinyLeaders)
    }

    pub fn uses_scheme_section(&self) -> bool {
        matches!(self, GameType::Archenemy | GameType::ArchenemyRumble)
    }

    pub fn uses_planar_section(&self) -> bool {
        matches!(self, GameType::Planechase)
    }

    pub fn uses_avatar_section(&self) -> bool {
        matches!(self, GameType::Vanguard)
    }

    pub fn description(&self) -> &'static str {
        use GameType::*;
        match self {
            Vanguard => "Each player has a vanguard avatar that alters their starting stats",
            MomirBasic => "Decks are replaced by basic lands and the Momir avatar",
            Commander => "100-card singleton decks led by a legendary commander",
            TinyLeaders => "Commander at converted cost three or less, 50-card decks",
            Planechase => "A shared planar deck moves the game between planes",
            Archenemy => "One player battles all others with a deck of schemes",
            ArchenemyRumble => "Every player is an archenemy with their own schemes",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use GameType::*;
        match self {
            Vanguard => write!(f, "Vanguard"),
            MomirBasic => write!(f, "Momir Basic"),
            Commander => write!(f, "Commander"),
            TinyLeaders => write!(f, "Tiny Leaders"),
            Planechase => write!(f, "Planechase"),
            Archenemy => write!(f, "Archenemy"),
            ArchenemyRumble => write!(f, "Archenemy Rumble"),
        }
    }
}

/// The set of applied variants. Variants that replace the main deck are
/// mutually exclusive; everything else may be layered freely.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VariantSet {
    variants: BTreeSet<GameType>,
}

impl VariantSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, variant: GameType) {
        if variant.replaces_main_deck() {
            self.variants.retain(|v| !v.replaces_main_deck());
        }
        self.variants.insert(variant);
    }

    pub fn remove(&mut self, variant: GameType) -> bool {
        self.variants.remove(&variant)
    }

    pub fn clear(&mut self) {
        self.variants.clear();
    }

    pub fn contains(&self, variant: GameType) -> bool {
        self.variants.contains(&variant)
    }

    pub fn replaces_main_deck(&self) -> bool {
        self.variants.iter().any(|v| v.replaces_main_deck())
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = GameType> + '_ {
        self.variants.iter().copied()
    }

    /// Label for the variant selector: "(None)", the single variant, or a
    /// comma-joined list.
    pub fn summary(&self) -> String {
        if self.variants.is_empty() {
            return "(None)".to_string();
        }
        let names: Vec<String> = self.variants.iter().map(|v| v.to_string()).collect();
        names.join(", ")
    }
}
