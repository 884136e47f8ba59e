mod deck;
mod error;
mod launcher;
mod lobby;
mod prefs;
mod prompt;
mod slot;
mod tasks;
mod variant;

pub use deck::{CardPool, Deck, DeckSection, DeckType};
pub use error::MusterError;
pub use launcher::{load_deck_states, start_match, DeckSource, GameStartTask, LobbyHost};
pub use lobby::{
    DeckChoices, DeckUpdate, LobbyController, LobbyError, LobbyEvent, MainDeckChoice, MAX_SEATS,
    NUM_AVATARS,
};
pub use prefs::{
    ColumnId, ColumnPrefs, EditorPref, ItemTablePrefs, LobbyPrefs, PrefsError, SavedDeckChoice,
    SortState, ViewColumn,
};
pub use prompt::{AbilityId, CardId, Prompt, PromptAction, PromptGate};
pub use slot::{AiOption, LobbySlot, SlotType};
pub use tasks::{BackgroundTask, TaskError, UiExecutor, UiHandle};
pub use variant::{GameType, VariantSet};
