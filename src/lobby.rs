use crate::deck::{CardPool, Deck, DeckSection, DeckType};
use crate::prefs::LobbyPrefs;
use crate::slot::{AiOption, LobbySlot, SlotType};
use crate::variant::{GameType, VariantSet};
use rand::{thread_rng, Rng};
use std::collections::{BTreeMap, VecDeque};
use std::{error, fmt};

// TODO: raise once remote seats are synced through the session layer
pub const MAX_SEATS: usize = 2;

pub const NUM_AVATARS: i32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LobbyError {
    SeatOutOfRange,
    SeatNotEditable,
    DeckRequired,
}

impl fmt::Display for LobbyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use LobbyError::*;
        match self {
            SeatOutOfRange => write!(f, "No such seat in this lobby"),
            SeatNotEditable => write!(f, "This seat cannot be edited from here"),
            DeckRequired => write!(f, "Select a deck before readying!"),
        }
    }
}

impl error::Error for LobbyError {}

/// Deck payloads are large, so consumers that only track seat state get the
/// slot shape and never a deck.
#[derive(Clone, Debug, PartialEq)]
pub enum LobbyEvent {
    SlotChanged { seat: usize, slot: LobbySlot },
    DeckChanged { seat: usize, update: DeckUpdate },
}

#[derive(Clone, Debug, PartialEq)]
pub enum DeckUpdate {
    Full(Deck),
    Section { section: DeckSection, cards: CardPool },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MainDeckChoice {
    pub deck_type: DeckType,
    pub deck: Deck,
    pub selection: Vec<String>,
}

/// What the seat's choosers currently offer, one slot per selection sub-flow.
/// Which of these actually reach the resolved deck is decided by the applied
/// variants.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeckChoices {
    pub main: Option<MainDeckChoice>,
    pub commander: Option<Deck>,
    pub schemes: Option<Deck>,
    pub planes: Option<Deck>,
    pub vanguard_avatar: Option<String>,
}

struct Seat {
    slot: LobbySlot,
    choices: DeckChoices,
    deck: Option<Deck>,
    deck_label: Option<String>,
}

pub struct LobbyController {
    seats: BTreeMap<usize, Seat>,
    variants: VariantSet,
    seat_count: usize,
    last_archenemy: usize,
    events: VecDeque<LobbyEvent>,
}

impl LobbyController {
    pub fn new() -> Self {
        let mut lobby = Self {
            seats: BTreeMap::new(),
            variants: VariantSet::new(),
            seat_count: 0,
            last_archenemy: 0,
            events: VecDeque::new(),
        };
        lobby.set_seat_count(2);
        lobby
    }

    pub fn seat_count(&self) -> usize {
        self.seat_count
    }

    pub fn is_active(&self, seat: usize) -> bool {
        seat < self.seat_count && self.seats.contains_key(&seat)
    }

    pub fn may_edit(&self, seat: usize) -> bool {
        self.seats
            .get(&seat)
            .map(|s| s.slot.slot_type.is_local_editable())
            .unwrap_or(false)
    }

    pub fn slot(&self, seat: usize) -> Option<&LobbySlot> {
        self.seats.get(&seat).map(|s| &s.slot)
    }

    pub fn deck(&self, seat: usize) -> Option<&Deck> {
        self.seats.get(&seat).and_then(|s| s.deck.as_ref())
    }

    pub fn deck_label(&self, seat: usize) -> Option<&str> {
        self.seats.get(&seat).and_then(|s| s.deck_label.as_deref())
    }

    pub fn choices(&self, seat: usize) -> Option<&DeckChoices> {
        self.seats.get(&seat).map(|s| &s.choices)
    }

    pub fn variants(&self) -> &VariantSet {
        &self.variants
    }

    pub fn all_ready(&self) -> bool {
        let mut active = 0;
        for (index, seat) in &self.seats {
            if *index < self.seat_count {
                if !seat.slot.is_ready {
                    return false;
                }
                active += 1;
            }
        }
        active >= 2
    }

    /// Drains one change notification; the caller decides how to deliver it.
    pub fn poll_event(&mut self) -> Option<LobbyEvent> {
        self.events.pop_front()
    }

    /// Adjusts the visible seat count. Seats hidden by shrinking keep their
    /// state and reappear intact when the count grows again.
    pub fn set_seat_count(&mut self, count: usize) {
        let count = count.clamp(1, MAX_SEATS);
        for index in 0..count {
            if !self.seats.contains_key(&index) {
                self.add_seat(index);
            }
        }
        self.seat_count = count;
    }

    fn add_seat(&mut self, index: usize) {
        let (slot_type, name) = if index == 0 {
            (SlotType::Local, "Human".to_string())
        } else {
            (SlotType::Ai, format!("AI ({})", index))
        };
        let avatar = self.random_unused_avatar();
        let slot = LobbySlot::new(slot_type, &name, avatar, index as u8);
        self.seats.insert(
            index,
            Seat {
                slot: slot.clone(),
                choices: DeckChoices::default(),
                deck: None,
                deck_label: None,
            },
        );
        self.events.push_back(LobbyEvent::SlotChanged { seat: index, slot });
    }

    fn random_unused_avatar(&self) -> i32 {
        let used: Vec<i32> = self.seats.values().map(|s| s.slot.avatar_index).collect();
        let mut rng = thread_rng();
        for _ in 0..32 {
            let index = rng.gen_range(0..NUM_AVATARS);
            if !used.contains(&index) {
                return index;
            }
        }
        rng.gen_range(0..NUM_AVATARS)
    }

    /// Removes the seat outright. Remaining seats keep their own indices.
    pub fn remove_seat(&mut self, seat: usize) -> Result<(), LobbyError> {
        if self.seats.remove(&seat).is_none() {
            return Err(LobbyError::SeatOutOfRange);
        }
        Ok(())
    }

    pub fn apply_variant(&mut self, variant: GameType) {
        self.variants.apply(variant);
        self.sync_archenemy_flags();
        self.refresh_all();
    }

    pub fn remove_variant(&mut self, variant: GameType) {
        if self.variants.remove(variant) {
            self.sync_archenemy_flags();
            self.refresh_all();
        }
    }

    pub fn clear_variants(&mut self) {
        if !self.variants.is_empty() {
            self.variants.clear();
            self.sync_archenemy_flags();
            self.refresh_all();
        }
    }

    pub fn has_variant(&self, variant: GameType) -> bool {
        self.variants.contains(variant)
    }

    /// Classic Archenemy has exactly one archenemy seat; Rumble marks all.
    pub fn set_archenemy(&mut self, seat: usize) -> Result<(), LobbyError> {
        if !self.is_active(seat) {
            return Err(LobbyError::SeatOutOfRange);
        }
        self.last_archenemy = seat;
        self.sync_archenemy_flags();
        Ok(())
    }

    fn sync_archenemy_flags(&mut self) {
        let rumble = self.variants.contains(GameType::ArchenemyRumble);
        let classic = self.variants.contains(GameType::Archenemy);
        for (index, seat) in self.seats.iter_mut() {
            let flag = rumble || (classic && *index == self.last_archenemy);
            if seat.slot.is_archenemy != flag {
                seat.slot.is_archenemy = flag;
                self.events.push_back(LobbyEvent::SlotChanged {
                    seat: *index,
                    slot: seat.slot.clone(),
                });
            }
        }
    }

    fn check_editable(&self, seat: usize) -> Result<(), LobbyError> {
        if !self.is_active(seat) {
            return Err(LobbyError::SeatOutOfRange);
        }
        if !self.may_edit(seat) {
            return Err(LobbyError::SeatNotEditable);
        }
        Ok(())
    }

    /// Main-deck chooser selection. The choice is always recorded, but only
    /// reaches the resolved deck while no deck-replacing variant is applied.
    pub fn select_deck(
        &mut self,
        seat: usize,
        deck_type: DeckType,
        deck: Deck,
        selection: &[&str],
    ) -> Result<(), LobbyError> {
        self.check_editable(seat)?;
        let entry = self.seats.get_mut(&seat).expect("seat");
        entry.choices.main = Some(MainDeckChoice {
            deck_type,
            deck,
            selection: selection.iter().map(|s| s.to_string()).collect(),
        });
        self.refresh_seat(seat);
        Ok(())
    }

    pub fn set_commander_deck(&mut self, seat: usize, deck: Deck) -> Result<(), LobbyError> {
        self.check_editable(seat)?;
        self.seats.get_mut(&seat).expect("seat").choices.commander = Some(deck);
        self.refresh_seat(seat);
        Ok(())
    }

    pub fn set_scheme_deck(&mut self, seat: usize, deck: Deck) -> Result<(), LobbyError> {
        self.check_editable(seat)?;
        self.seats.get_mut(&seat).expect("seat").choices.schemes = Some(deck);
        self.refresh_seat(seat);
        Ok(())
    }

    pub fn set_planar_deck(&mut self, seat: usize, deck: Deck) -> Result<(), LobbyError> {
        self.check_editable(seat)?;
        self.seats.get_mut(&seat).expect("seat").choices.planes = Some(deck);
        self.refresh_seat(seat);
        Ok(())
    }

    pub fn set_vanguard_avatar(&mut self, seat: usize, card: &str) -> Result<(), LobbyError> {
        self.check_editable(seat)?;
        self.seats.get_mut(&seat).expect("seat").choices.vanguard_avatar = Some(card.to_string());
        self.refresh_seat(seat);
        Ok(())
    }

    /// Readying without a resolved deck is refused and surfaced to the user;
    /// nothing changes and no event is raised.
    pub fn set_ready(&mut self, seat: usize, ready: bool) -> Result<(), LobbyError> {
        if !self.is_active(seat) {
            return Err(LobbyError::SeatOutOfRange);
        }
        let entry = self.seats.get_mut(&seat).expect("seat");
        if ready && entry.deck.is_none() {
            return Err(LobbyError::DeckRequired);
        }
        entry.slot.is_ready = ready;
        let slot = entry.slot.clone();
        self.events.push_back(LobbyEvent::SlotChanged { seat, slot });
        Ok(())
    }

    pub fn set_player_name(&mut self, seat: usize, name: &str) -> Result<(), LobbyError> {
        self.check_editable(seat)?;
        self.seats.get_mut(&seat).expect("seat").slot.name = name.to_string();
        self.emit_slot(seat);
        Ok(())
    }

    pub fn set_avatar_index(&mut self, seat: usize, avatar_index: i32) -> Result<(), LobbyError> {
        self.check_editable(seat)?;
        self.seats.get_mut(&seat).expect("seat").slot.avatar_index = avatar_index;
        self.emit_slot(seat);
        Ok(())
    }

    pub fn set_team(&mut self, seat: usize, team: u8) -> Result<(), LobbyError> {
        self.check_editable(seat)?;
        self.seats.get_mut(&seat).expect("seat").slot.team = team;
        self.emit_slot(seat);
        Ok(())
    }

    pub fn set_slot_type(&mut self, seat: usize, slot_type: SlotType) -> Result<(), LobbyError> {
        if !self.is_active(seat) {
            return Err(LobbyError::SeatOutOfRange);
        }
        self.seats.get_mut(&seat).expect("seat").slot.slot_type = slot_type;
        self.emit_slot(seat);
        Ok(())
    }

    pub fn set_ai_option(&mut self, seat: usize, option: AiOption, enabled: bool) -> Result<(), LobbyError> {
        self.check_editable(seat)?;
        let entry = self.seats.get_mut(&seat).expect("seat");
        if enabled {
            entry.slot.ai_options.insert(option);
        } else {
            entry.slot.ai_options.remove(&option);
        }
        self.emit_slot(seat);
        Ok(())
    }

    fn emit_slot(&mut self, seat: usize) {
        if let Some(entry) = self.seats.get(&seat) {
            self.events.push_back(LobbyEvent::SlotChanged {
                seat,
                slot: entry.slot.clone(),
            });
        }
    }

    pub fn apply_lobby_prefs(&mut self, prefs: &LobbyPrefs) {
        for (index, avatar) in prefs.avatars.iter().enumerate() {
            if self.seats.contains_key(&index) {
                self.seats.get_mut(&index).expect("seat").slot.avatar_index = *avatar;
                self.emit_slot(index);
            }
        }
        if let Some(name) = prefs.player_name.as_deref() {
            if !name.is_empty() && self.seats.contains_key(&0) {
                self.seats.get_mut(&0).expect("seat").slot.name = name.to_string();
                self.emit_slot(0);
            }
        }
    }

    pub fn store_avatar_prefs(&self, prefs: &mut LobbyPrefs) {
        prefs.avatars = self
            .seats
            .values()
            .map(|seat| seat.slot.avatar_index)
            .collect();
    }

    fn refresh_all(&mut self) {
        for seat in 0..self.seat_count {
            self.refresh_seat(seat);
        }
    }

    // Order matters: the commander path replaces the whole deck object that
    // the later section merges stack onto.
    fn refresh_seat(&mut self, seat: usize) {
        self.select_main_deck(seat);
        self.select_commander_deck(seat);
        self.select_scheme_deck(seat);
        self.select_planar_deck(seat);
        self.select_vanguard_avatar(seat);
    }

    fn select_main_deck(&mut self, seat: usize) {
        if self.variants.replaces_main_deck() {
            return;
        }
        if seat >= self.seat_count || !self.may_edit(seat) {
            return;
        }
        let choice = match self.seats.get(&seat).and_then(|s| s.choices.main.clone()) {
            Some(choice) => choice,
            None => return,
        };
        let label = format!("{}: {}", choice.deck_type, choice.selection.join(", "));
        let entry = self.seats.get_mut(&seat).expect("seat");
        entry.deck_label = Some(label);
        entry.deck = Some(choice.deck.clone());
        self.events.push_back(LobbyEvent::DeckChanged {
            seat,
            update: DeckUpdate::Full(choice.deck),
        });
    }

    fn select_commander_deck(&mut self, seat: usize) {
        if seat >= self.seat_count || !self.variants.replaces_main_deck() {
            return;
        }
        let deck = match self.seats.get(&seat).and_then(|s| s.choices.commander.clone()) {
            Some(deck) => deck,
            None => return,
        };
        let entry = self.seats.get_mut(&seat).expect("seat");
        entry.deck_label = Some(format!("{}: {}", DeckType::CommanderDeck, deck.name));
        entry.deck = Some(deck.clone());
        self.events.push_back(LobbyEvent::DeckChanged {
            seat,
            update: DeckUpdate::Full(deck),
        });
    }

    fn select_scheme_deck(&mut self, seat: usize) {
        if seat >= self.seat_count || !self.variants.iter().any(|v| v.uses_scheme_section()) {
            return;
        }
        let pool = match self
            .seats
            .get(&seat)
            .and_then(|s| s.choices.schemes.as_ref())
            .and_then(|deck| deck.section(DeckSection::Schemes))
            .cloned()
        {
            Some(pool) => pool,
            None => return,
        };
        self.merge_section(seat, DeckSection::Schemes, pool);
    }

    fn select_planar_deck(&mut self, seat: usize) {
        if seat >= self.seat_count || !self.variants.iter().any(|v| v.uses_planar_section()) {
            return;
        }
        let pool = match self
            .seats
            .get(&seat)
            .and_then(|s| s.choices.planes.as_ref())
            .and_then(|deck| deck.section(DeckSection::Planes))
            .cloned()
        {
            Some(pool) => pool,
            None => return,
        };
        self.merge_section(seat, DeckSection::Planes, pool);
    }

    fn select_vanguard_avatar(&mut self, seat: usize) {
        if seat >= self.seat_count || !self.variants.contains(GameType::Vanguard) {
            return;
        }
        let card = match self.seats.get(&seat).and_then(|s| s.choices.vanguard_avatar.clone()) {
            Some(card) => card,
            None => return,
        };
        let mut pool = CardPool::new();
        pool.add(&card);
        self.merge_section(seat, DeckSection::Avatar, pool);
    }

    // Copy-on-write: the stored deck is rebuilt from a clone, so decks
    // already handed out through events are never patched in place.
    fn merge_section(&mut self, seat: usize, section: DeckSection, cards: CardPool) {
        let entry = self.seats.get_mut(&seat).expect("seat");
        let mut copy = entry.deck.clone().unwrap_or_default();
        copy.put_section(section, cards.clone());
        entry.deck = Some(copy);
        self.events.push_back(LobbyEvent::DeckChanged {
            seat,
            update: DeckUpdate::Section { section, cards },
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_deck(name: &str, card: &str) -> Deck {
        let mut deck = Deck::new(name);
        let mut pool = CardPool::new();
        pool.add_n(card, 4);
        deck.put_section(DeckSection::Main, pool);
        deck
    }

    fn scheme_deck(cards: &[&str]) -> Deck {
        let mut deck = Deck::new("Schemes");
        let mut pool = CardPool::new();
        for card in cards {
            pool.add(card);
        }
        deck.put_section(DeckSection::Schemes, pool);
        deck
    }

    fn drain(lobby: &mut LobbyController) -> Vec<LobbyEvent> {
        let mut events = Vec::new();
        while let Some(event) = lobby.poll_event() {
            events.push(event);
        }
        events
    }

    #[test]
    fn main_deck_selection_resolves_and_labels() {
        let mut lobby = LobbyController::new();
        drain(&mut lobby);
        lobby
            .select_deck(0, DeckType::ColorDeck, sample_deck("Mono Red", "Shock"), &["Mono Red"])
            .unwrap();
        assert_eq!(lobby.deck(0).unwrap().name, "Mono Red");
        assert_eq!(lobby.deck_label(0), Some("Color Deck: Mono Red"));
        let events = drain(&mut lobby);
        assert!(matches!(
            events.as_slice(),
            [LobbyEvent::DeckChanged {
                seat: 0,
                update: DeckUpdate::Full(_)
            }]
        ));
    }

    #[test]
    fn main_path_is_noop_under_commander() {
        let mut lobby = LobbyController::new();
        lobby.apply_variant(GameType::Commander);
        drain(&mut lobby);
        for seat in 0..lobby.seat_count() {
            lobby
                .select_deck(seat, DeckType::CustomDeck, sample_deck("Burn", "Shock"), &["Burn"])
                .unwrap();
            assert!(lobby.deck(seat).is_none());
            // The choice itself is parked for when the variant clears.
            assert!(lobby.choices(seat).unwrap().main.is_some());
        }
        assert!(drain(&mut lobby).is_empty());
    }

    #[test]
    fn lobby_prefs_apply_name_and_avatars() {
        let mut lobby = LobbyController::new();
        let mut prefs = LobbyPrefs::default();
        prefs.player_name = Some("Karn".to_string());
        prefs.avatars = vec![3, 9];
        lobby.apply_lobby_prefs(&prefs);
        assert_eq!(lobby.slot(0).unwrap().name, "Karn");
        assert_eq!(lobby.slot(0).unwrap().avatar_index, 3);
        assert_eq!(lobby.slot(1).unwrap().avatar_index, 9);
        let mut saved = LobbyPrefs::default();
        lobby.store_avatar_prefs(&mut saved);
        assert_eq!(saved.avatars, vec![3, 9]);
    }

    #[test]
    fn commander_choice_replaces_whole_deck() {
        let mut lobby = LobbyController::new();
        lobby
            .select_deck(0, DeckType::CustomDeck, sample_deck("Burn", "Shock"), &["Burn"])
            .unwrap();
        lobby.set_commander_deck(0, sample_deck("Kess", "Ponder")).unwrap();
        // No commander variant yet, main selection still wins.
        assert_eq!(lobby.deck(0).unwrap().name, "Burn");
        lobby.apply_variant(GameType::Commander);
        assert_eq!(lobby.deck(0).unwrap().name, "Kess");
    }

    #[test]
    fn clearing_commander_restores_main_path() {
        let mut lobby = LobbyController::new();
        lobby.apply_variant(GameType::Commander);
        lobby
            .select_deck(0, DeckType::CustomDeck, sample_deck("Burn", "Shock"), &["Burn"])
            .unwrap();
        assert!(lobby.deck(0).is_none());
        lobby.clear_variants();
        assert_eq!(lobby.deck(0).unwrap().name, "Burn");
    }

    #[test]
    fn section_merge_is_last_write_wins_per_section() {
        let mut lobby = LobbyController::new();
        lobby.apply_variant(GameType::Archenemy);
        lobby.apply_variant(GameType::Planechase);
        lobby.set_scheme_deck(0, scheme_deck(&["Every Last Vestige"])).unwrap();
        let mut planes = Deck::new("Planes");
        let mut pool = CardPool::new();
        pool.add("Academy at Tolaria West");
        planes.put_section(DeckSection::Planes, pool);
        lobby.set_planar_deck(0, planes).unwrap();

        // Second scheme selection replaces only the scheme section.
        lobby.set_scheme_deck(0, scheme_deck(&["All in Good Time"])).unwrap();

        let deck = lobby.deck(0).unwrap();
        let schemes = deck.section(DeckSection::Schemes).unwrap();
        assert_eq!(schemes.count("Every Last Vestige"), 0);
        assert_eq!(schemes.count("All in Good Time"), 1);
        let planes = deck.section(DeckSection::Planes).unwrap();
        assert_eq!(planes.count("Academy at Tolaria West"), 1);
    }

    #[test]
    fn section_merge_does_not_alias_event_payloads() {
        let mut lobby = LobbyController::new();
        lobby.apply_variant(GameType::Archenemy);
        lobby.set_scheme_deck(0, scheme_deck(&["Behold the Power"])).unwrap();
        drain(&mut lobby);
        let before = lobby.deck(0).unwrap().clone();
        lobby.set_scheme_deck(0, scheme_deck(&["Dance, Pathetic Marionette"])).unwrap();
        // The earlier snapshot keeps the old section.
        assert_eq!(
            before.section(DeckSection::Schemes).unwrap().count("Behold the Power"),
            1
        );
    }

    #[test]
    fn vanguard_avatar_becomes_one_card_pool() {
        let mut lobby = LobbyController::new();
        lobby.apply_variant(GameType::Vanguard);
        lobby.set_vanguard_avatar(0, "Maraxus of Keld").unwrap();
        let deck = lobby.deck(0).unwrap();
        let avatar = deck.section(DeckSection::Avatar).unwrap();
        assert_eq!(avatar.total(), 1);
        assert_eq!(avatar.count("Maraxus of Keld"), 1);
    }

    #[test]
    fn ready_without_deck_is_refused() {
        let mut lobby = LobbyController::new();
        drain(&mut lobby);
        assert_eq!(lobby.set_ready(0, true), Err(LobbyError::DeckRequired));
        assert!(!lobby.slot(0).unwrap().is_ready);
        assert!(drain(&mut lobby).is_empty());
    }

    #[test]
    fn ready_with_deck_raises_slot_event() {
        let mut lobby = LobbyController::new();
        lobby
            .select_deck(0, DeckType::PreconstructedDeck, sample_deck("Starter", "Shock"), &["Starter"])
            .unwrap();
        drain(&mut lobby);
        lobby.set_ready(0, true).unwrap();
        assert!(lobby.slot(0).unwrap().is_ready);
        let events = drain(&mut lobby);
        assert!(matches!(
            events.as_slice(),
            [LobbyEvent::SlotChanged { seat: 0, slot }] if slot.is_ready
        ));
    }

    #[test]
    fn remove_seat_does_not_renumber() {
        let mut lobby = LobbyController::new();
        let name_before = lobby.slot(1).unwrap().name.clone();
        lobby.remove_seat(0).unwrap();
        assert!(lobby.slot(0).is_none());
        assert_eq!(lobby.slot(1).unwrap().name, name_before);
    }

    #[test]
    fn hidden_seats_keep_state_across_count_changes() {
        let mut lobby = LobbyController::new();
        lobby.set_player_name(1, "Circe").unwrap();
        lobby.set_seat_count(1);
        assert!(!lobby.is_active(1));
        lobby.set_seat_count(2);
        assert_eq!(lobby.slot(1).unwrap().name, "Circe");
    }

    #[test]
    fn seat_count_is_capped() {
        let mut lobby = LobbyController::new();
        lobby.set_seat_count(8);
        assert_eq!(lobby.seat_count(), MAX_SEATS);
    }

    #[test]
    fn out_of_range_and_remote_seats_are_rejected() {
        let mut lobby = LobbyController::new();
        assert_eq!(
            lobby.select_deck(5, DeckType::CustomDeck, Deck::default(), &[]),
            Err(LobbyError::SeatOutOfRange)
        );
        lobby.set_slot_type(1, SlotType::Remote).unwrap();
        assert_eq!(
            lobby.select_deck(1, DeckType::CustomDeck, Deck::default(), &[]),
            Err(LobbyError::SeatNotEditable)
        );
    }

    #[test]
    fn classic_archenemy_marks_one_seat() {
        let mut lobby = LobbyController::new();
        lobby.apply_variant(GameType::Archenemy);
        assert!(lobby.slot(0).unwrap().is_archenemy);
        assert!(!lobby.slot(1).unwrap().is_archenemy);
        lobby.set_archenemy(1).unwrap();
        assert!(!lobby.slot(0).unwrap().is_archenemy);
        assert!(lobby.slot(1).unwrap().is_archenemy);
    }

    #[test]
    fn rumble_marks_every_seat() {
        let mut lobby = LobbyController::new();
        lobby.apply_variant(GameType::ArchenemyRumble);
        assert!(lobby.slot(0).unwrap().is_archenemy);
        assert!(lobby.slot(1).unwrap().is_archenemy);
        lobby.clear_variants();
        assert!(!lobby.slot(0).unwrap().is_archenemy);
    }

    #[test]
    fn new_seats_get_distinct_avatars() {
        let lobby = LobbyController::new();
        let a = lobby.slot(0).unwrap().avatar_index;
        let b = lobby.slot(1).unwrap().avatar_index;
        assert!(a >= 0 && b >= 0);
        assert_ne!(a, b);
    }

    #[test]
    fn all_ready_needs_two_ready_seats() {
        let mut lobby = LobbyController::new();
        for seat in 0..lobby.seat_count() {
            lobby
                .select_deck(seat, DeckType::ColorDeck, sample_deck("Deck", "Shock"), &["Deck"])
                .unwrap();
        }
        assert!(!lobby.all_ready());
        lobby.set_ready(0, true).unwrap();
        assert!(!lobby.all_ready());
        lobby.set_ready(1, true).unwrap();
        assert!(lobby.all_ready());
    }
}
