use crate::deck::{Deck, DeckType};
use crate::lobby::LobbyController;
use crate::prefs::LobbyPrefs;
use crate::tasks::{BackgroundTask, UiHandle};
use std::time::Duration;
use tracing::warn;

/// Narrow view interface between the launcher and whatever renders the
/// lobby; keeps the controller free of toolkit types.
pub trait LobbyHost {
    fn lobby(&mut self) -> &mut LobbyController;
    fn set_start_enabled(&mut self, enabled: bool);
    fn run_with_loading_overlay(&mut self, caption: &str, task: GameStartTask);
}

pub type GameStartTask = Box<dyn FnOnce() + Send>;

/// Deck storage the saved chooser state is restored from.
pub trait DeckSource: Send {
    fn deck(&self, deck_type: DeckType, name: &str) -> Option<Deck>;
    fn default_deck(&self, deck_type: DeckType) -> Option<(String, Deck)>;
}

fn fallback_deck_type(seat: usize) -> DeckType {
    if seat == 0 {
        DeckType::PreconstructedDeck
    } else {
        DeckType::ColorDeck
    }
}

/// Restores each seat's saved deck-chooser state off the UI thread, then
/// applies the results and enables the start action back on it. Screen
/// construction never blocks on deck storage.
pub fn load_deck_states<H, D>(
    ui: UiHandle<H>,
    prefs: LobbyPrefs,
    source: D,
    seats: usize,
    timeout: Option<Duration>,
) -> BackgroundTask
where
    H: LobbyHost + 'static,
    D: DeckSource + 'static,
{
    BackgroundTask::spawn(
        ui,
        timeout,
        move || {
            let mut restored = Vec::new();
            for seat in 0..seats {
                let saved = prefs.deck_state(seat).and_then(|choice| {
                    source
                        .deck(choice.deck_type, &choice.deck_name)
                        .map(|deck| (choice.deck_type, choice.deck_name.clone(), deck))
                });
                let fallback = fallback_deck_type(seat);
                let choice = saved.or_else(|| {
                    source
                        .default_deck(fallback)
                        .map(|(name, deck)| (fallback, name, deck))
                });
                if let Some(choice) = choice {
                    restored.push((seat, choice));
                }
            }
            restored
        },
        |host, result| {
            match result {
                Ok(restored) => {
                    for (seat, (deck_type, name, deck)) in restored {
                        if let Err(err) = host.lobby().select_deck(seat, deck_type, deck, &[name.as_str()]) {
                            warn!("could not restore deck for seat {}: {}", seat, err);
                        }
                    }
                }
                Err(err) => warn!("deck state restore failed: {}", err),
            }
            host.set_start_enabled(true);
        },
    )
}

/// Starting a game may block on user-facing confirmations, so the start
/// routine runs in the background; the task it yields is posted back to run
/// under the caller's loading overlay.
pub fn start_match<H, F>(ui: UiHandle<H>, start_game: F, timeout: Option<Duration>) -> BackgroundTask
where
    H: LobbyHost + 'static,
    F: FnOnce() -> Option<GameStartTask> + Send + 'static,
{
    BackgroundTask::spawn(ui, timeout, start_game, |host, result| match result {
        Ok(Some(task)) => host.run_with_loading_overlay("Loading new game...", task),
        Ok(None) => {}
        Err(err) => warn!("match start failed: {}", err),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{CardPool, DeckSection};
    use crate::prefs::SavedDeckChoice;
    use crate::tasks::UiExecutor;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::time;

    struct TestHost {
        lobby: LobbyController,
        start_enabled: bool,
        overlays: Vec<String>,
    }

    impl TestHost {
        fn new() -> Self {
            Self {
                lobby: LobbyController::new(),
                start_enabled: false,
                overlays: Vec::new(),
            }
        }
    }

    impl LobbyHost for TestHost {
        fn lobby(&mut self) -> &mut LobbyController {
            &mut self.lobby
        }

        fn set_start_enabled(&mut self, enabled: bool) {
            self.start_enabled = enabled;
        }

        fn run_with_loading_overlay(&mut self, caption: &str, task: GameStartTask) {
            self.overlays.push(caption.to_string());
            task();
        }
    }

    struct FixedDecks;

    impl FixedDecks {
        fn named(name: &str) -> Deck {
            let mut deck = Deck::new(name);
            let mut pool = CardPool::new();
            pool.add_n("Plains", 24);
            deck.put_section(DeckSection::Main, pool);
            deck
        }
    }

    impl DeckSource for FixedDecks {
        fn deck(&self, _deck_type: DeckType, name: &str) -> Option<Deck> {
            if name == "Missing" {
                None
            } else {
                Some(Self::named(name))
            }
        }

        fn default_deck(&self, deck_type: DeckType) -> Option<(String, Deck)> {
            let name = match deck_type {
                DeckType::PreconstructedDeck => "Starter",
                DeckType::ColorDeck => "White",
                _ => "Fallback",
            };
            Some((name.to_string(), Self::named(name)))
        }
    }

    async fn wait_for(task: &BackgroundTask) {
        while !task.is_finished() {
            time::sleep(time::Duration::from_millis(2)).await;
        }
    }

    #[tokio::test]
    async fn restores_saved_state_and_enables_start() {
        let mut exec: UiExecutor<TestHost> = UiExecutor::new();
        let mut prefs = LobbyPrefs::default();
        prefs.set_deck_state(
            0,
            SavedDeckChoice {
                deck_type: DeckType::CustomDeck,
                deck_name: "Goblins".to_string(),
            },
        );
        let task = load_deck_states(exec.handle(), prefs, FixedDecks, 2, None);
        wait_for(&task).await;
        let mut host = TestHost::new();
        exec.run_pending(&mut host);
        assert!(host.start_enabled);
        assert_eq!(host.lobby.deck(0).unwrap().name, "Goblins");
        assert_eq!(host.lobby.deck_label(0), Some("Custom Deck: Goblins"));
        // No saved state for seat 1, color-deck fallback applies.
        assert_eq!(host.lobby.deck(1).unwrap().name, "White");
    }

    #[tokio::test]
    async fn missing_saved_deck_falls_back_to_default() {
        let mut exec: UiExecutor<TestHost> = UiExecutor::new();
        let mut prefs = LobbyPrefs::default();
        prefs.set_deck_state(
            0,
            SavedDeckChoice {
                deck_type: DeckType::CustomDeck,
                deck_name: "Missing".to_string(),
            },
        );
        let task = load_deck_states(exec.handle(), prefs, FixedDecks, 1, None);
        wait_for(&task).await;
        let mut host = TestHost::new();
        exec.run_pending(&mut host);
        assert_eq!(host.lobby.deck(0).unwrap().name, "Starter");
    }

    #[tokio::test]
    async fn start_task_runs_under_overlay() {
        let mut exec: UiExecutor<TestHost> = UiExecutor::new();
        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();
        let task = start_match(
            exec.handle(),
            move || {
                let flag = flag.clone();
                Some(Box::new(move || flag.store(true, Ordering::SeqCst)) as GameStartTask)
            },
            None,
        );
        wait_for(&task).await;
        let mut host = TestHost::new();
        exec.run_pending(&mut host);
        assert_eq!(host.overlays, vec!["Loading new game...".to_string()]);
        assert!(ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn declined_start_posts_no_overlay() {
        let mut exec: UiExecutor<TestHost> = UiExecutor::new();
        let task = start_match(exec.handle(), || None, None);
        wait_for(&task).await;
        let mut host = TestHost::new();
        exec.run_pending(&mut host);
        assert!(host.overlays.is_empty());
    }
}
