use crate::deck::DeckType;
use directories::BaseDirs;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{create_dir_all, read_to_string, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{error, fmt, io};
use tracing::warn;

#[derive(Debug)]
pub enum PrefsError {
    IoError,
    ParseError,
}

impl fmt::Display for PrefsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefsError::IoError => write!(f, "Preference file I/O error"),
            PrefsError::ParseError => write!(f, "Preference file parse error"),
        }
    }
}

impl error::Error for PrefsError {}

impl From<io::Error> for PrefsError {
    fn from(_value: io::Error) -> Self {
        Self::IoError
    }
}

impl From<toml::de::Error> for PrefsError {
    fn from(_value: toml::de::Error) -> Self {
        Self::ParseError
    }
}

impl From<toml::ser::Error> for PrefsError {
    fn from(_value: toml::ser::Error) -> Self {
        Self::ParseError
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum EditorPref {
    StatsDeck,
    DisplayUniqueOnly,
    ElasticColumns,
}

impl EditorPref {
    pub fn as_str(&self) -> &'static str {
        use EditorPref::*;
        match self {
            StatsDeck => "stats_deck",
            DisplayUniqueOnly => "display_unique_only",
            ElasticColumns => "elastic_columns",
        }
    }
}

impl FromStr for EditorPref {
    type Err = PrefsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use EditorPref::*;
        match s {
            "stats_deck" => Ok(StatsDeck),
            "display_unique_only" => Ok(DisplayUniqueOnly),
            "elastic_columns" => Ok(ElasticColumns),
            _ => Err(PrefsError::ParseError),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ColumnId {
    Favorite,
    Name,
    Cost,
    Color,
    Type,
    Power,
    Toughness,
    Rarity,
    SetCode,
    Quantity,
}

impl ColumnId {
    pub fn as_str(&self) -> &'static str {
        use ColumnId::*;
        match self {
            Favorite => "favorite",
            Name => "name",
            Cost => "cost",
            Color => "color",
            Type => "type",
            Power => "power",
            Toughness => "toughness",
            Rarity => "rarity",
            SetCode => "set_code",
            Quantity => "quantity",
        }
    }
}

impl FromStr for ColumnId {
    type Err = PrefsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use ColumnId::*;
        match s {
            "favorite" => Ok(Favorite),
            "name" => Ok(Name),
            "cost" => Ok(Cost),
            "color" => Ok(Color),
            "type" => Ok(Type),
            "power" => Ok(Power),
            "toughness" => Ok(Toughness),
            "rarity" => Ok(Rarity),
            "set_code" => Ok(SetCode),
            "quantity" => Ok(Quantity),
            _ => Err(PrefsError::ParseError),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortState {
    None,
    Asc,
    Desc,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPrefs {
    pub identifier: String,
    pub show: bool,
    pub index: u16,
    pub sort_priority: u8,
    pub sort_state: SortState,
    pub width: u16,
}

/// A column as the table view currently shows it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewColumn {
    pub id: ColumnId,
    pub index: u16,
    pub width: u16,
}

// Raw on-disk shape; entries are validated one by one so a single bad key
// never poisons the rest of the file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RawDoc {
    #[serde(default)]
    prefs: BTreeMap<String, toml::Value>,
    #[serde(default)]
    cols: BTreeMap<String, toml::Value>,
}

static DEFAULT_EDITOR_PREFS: &str = include_str!("txt/default_prefs.toml");

lazy_static! {
    static ref DEFAULTS: ItemTablePrefs =
        ItemTablePrefs::from_toml_str(DEFAULT_EDITOR_PREFS).expect("bundled default preferences");
}

/// Editor item-table preferences: a boolean preference map plus per-column
/// layout. Explicitly constructed and passed down; load falls back to the
/// bundled defaults when no user file exists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemTablePrefs {
    prefs: BTreeMap<EditorPref, bool>,
    cols: BTreeMap<ColumnId, ColumnPrefs>,
}

impl ItemTablePrefs {
    pub fn pref(&self, pref: EditorPref) -> bool {
        self.prefs.get(&pref).copied().unwrap_or(false)
    }

    pub fn set_pref(&mut self, pref: EditorPref, value: bool) {
        self.prefs.insert(pref, value);
    }

    pub fn column(&self, id: ColumnId) -> Option<&ColumnPrefs> {
        self.cols.get(&id)
    }

    pub fn column_mut(&mut self, id: ColumnId) -> Option<&mut ColumnPrefs> {
        self.cols.get_mut(&id)
    }

    pub fn columns(&self) -> impl Iterator<Item = (ColumnId, &ColumnPrefs)> {
        self.cols.iter().map(|(id, col)| (*id, col))
    }

    /// Bundled defaults, then the user file layered on top when present.
    /// A missing user file is the expected silent path; an unreadable or
    /// unparseable one is logged and otherwise ignored.
    pub fn load() -> Self {
        let mut prefs = DEFAULTS.clone();
        if let Some(path) = user_file("editor.toml") {
            if path.exists() {
                match read_to_string(&path) {
                    Ok(text) => {
                        if prefs.overlay_str(&text).is_err() {
                            warn!("ignoring unparseable preference file {}", path.display());
                        }
                    }
                    Err(err) => warn!("failed to read {}: {}", path.display(), err),
                }
            }
        }
        prefs
    }

    /// Merges one document into this map, dropping unknown or malformed
    /// entries one by one.
    pub fn overlay_str(&mut self, text: &str) -> Result<(), PrefsError> {
        let raw: RawDoc = toml::from_str(text)?;
        for (key, value) in raw.prefs {
            match (EditorPref::from_str(&key), value.as_bool()) {
                (Ok(pref), Some(flag)) => {
                    self.prefs.insert(pref, flag);
                }
                _ => warn!("dropping unknown editor preference entry '{}'", key),
            }
        }
        for (key, value) in raw.cols {
            match (ColumnId::from_str(&key), value.try_into::<ColumnPrefs>()) {
                (Ok(id), Ok(col)) => {
                    self.cols.insert(id, col);
                }
                _ => warn!("dropping unknown column entry '{}'", key),
            }
        }
        Ok(())
    }

    pub fn from_toml_str(text: &str) -> Result<Self, PrefsError> {
        let mut prefs = Self::default();
        prefs.overlay_str(text)?;
        Ok(prefs)
    }

    pub fn to_toml_string(&self) -> Result<String, PrefsError> {
        let mut raw = RawDoc::default();
        for (pref, value) in &self.prefs {
            raw.prefs.insert(pref.as_str().to_string(), toml::Value::Boolean(*value));
        }
        for (id, col) in &self.cols {
            raw.cols.insert(id.as_str().to_string(), toml::Value::try_from(col)?);
        }
        Ok(toml::to_string_pretty(&raw)?)
    }

    /// Pulls visibility, order and width from the live view. Columns not in
    /// the view keep their previously stored index for the next time they
    /// are shown.
    pub fn sync_from_view(&mut self, view: &[ViewColumn]) {
        for (id, col) in self.cols.iter_mut() {
            match view.iter().find(|v| v.id == *id) {
                Some(shown) => {
                    col.show = true;
                    col.index = shown.index;
                    col.width = shown.width;
                }
                None => col.show = false,
            }
        }
    }

    pub fn try_save(&self) -> Result<(), PrefsError> {
        let text = self.to_toml_string()?;
        if let Some(path) = user_file("editor.toml") {
            write_user_file(&path, &text)?;
        }
        Ok(())
    }

    /// Boundary wrapper: a failed save is logged, never propagated.
    pub fn save(&self) {
        if let Err(err) = self.try_save() {
            warn!("failed to save editor preferences: {}", err);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedDeckChoice {
    pub deck_type: DeckType,
    pub deck_name: String,
}

/// Lobby-screen preferences: local player name, per-seat avatars and the
/// last deck-chooser state per seat.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbyPrefs {
    pub player_name: Option<String>,
    #[serde(default)]
    pub avatars: Vec<i32>,
    #[serde(default)]
    deck_states: BTreeMap<String, SavedDeckChoice>,
}

impl LobbyPrefs {
    pub fn deck_state(&self, seat: usize) -> Option<&SavedDeckChoice> {
        self.deck_states.get(&seat_key(seat))
    }

    pub fn set_deck_state(&mut self, seat: usize, choice: SavedDeckChoice) {
        self.deck_states.insert(seat_key(seat), choice);
    }

    pub fn load() -> Self {
        if let Some(path) = user_file("lobby.toml") {
            if path.exists() {
                match read_to_string(&path).map_err(PrefsError::from).and_then(|text| {
                    toml::from_str::<LobbyPrefs>(&text).map_err(PrefsError::from)
                }) {
                    Ok(prefs) => return prefs,
                    Err(err) => warn!("falling back to default lobby prefs: {}", err),
                }
            }
        }
        Self::default()
    }

    pub fn try_save(&self) -> Result<(), PrefsError> {
        let text = toml::to_string_pretty(self)?;
        if let Some(path) = user_file("lobby.toml") {
            write_user_file(&path, &text)?;
        }
        Ok(())
    }

    pub fn save(&self) {
        if let Err(err) = self.try_save() {
            warn!("failed to save lobby preferences: {}", err);
        }
    }
}

fn seat_key(seat: usize) -> String {
    format!("p{}", seat + 1)
}

fn user_file(name: &str) -> Option<PathBuf> {
    BaseDirs::new().map(|base| base.config_dir().join("Muster").join(name))
}

fn write_user_file(path: &Path, text: &str) -> Result<(), PrefsError> {
    if let Some(dir) = path.parent() {
        if !dir.exists() {
            create_dir_all(dir)?;
        }
    }
    let mut file = File::create(path)?;
    file.write_all(text.as_bytes())?;
    Ok(())
}
