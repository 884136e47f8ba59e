use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotType {
    Local,
    Ai,
    Remote,
    Open,
}

impl SlotType {
    /// Whether the local side may edit this seat. Remote seats belong to
    /// their owner, open seats have nobody to edit yet.
    pub fn is_local_editable(&self) -> bool {
        matches!(self, SlotType::Local | SlotType::Ai)
    }
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use SlotType::*;
        match self {
            Local => write!(f, "Local"),
            Ai => write!(f, "AI"),
            Remote => write!(f, "Remote"),
            Open => write!(f, "Open"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AiOption {
    UseSimulation,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbySlot {
    pub slot_type: SlotType,
    pub name: String,
    pub avatar_index: i32,
    pub team: u8,
    pub is_ready: bool,
    pub is_archenemy: bool,
    pub ai_options: BTreeSet<AiOption>,
}

impl LobbySlot {
    pub fn new(slot_type: SlotType, name: &str, avatar_index: i32, team: u8) -> Self {
        Self {
            slot_type,
            name: name.to_string(),
            avatar_index,
            team,
            is_ready: false,
            is_archenemy: false,
            ai_options: BTreeSet::new(),
        }
    }

    pub fn has_avatar(&self) -> bool {
        self.avatar_index >= 0
    }
}
