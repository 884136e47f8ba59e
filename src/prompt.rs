use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CardId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AbilityId(pub u32);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card #{}", self.0)
    }
}

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ability #{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptAction {
    Continue,
    Finish,
}

/// One turn-based player prompt. `show_message` is always the first call of
/// a prompt cycle; the hooks decide when the prompt is done by returning
/// [`PromptAction::Finish`].
pub trait Prompt {
    fn show_message(&mut self);

    fn on_ok(&mut self) -> PromptAction {
        PromptAction::Continue
    }

    fn on_cancel(&mut self) -> PromptAction {
        PromptAction::Continue
    }

    fn on_card_selected(&mut self, _card: CardId) -> PromptAction {
        PromptAction::Continue
    }

    fn on_ability_selected(&mut self, _ability: AbilityId) -> PromptAction {
        PromptAction::Continue
    }

    fn on_player_selected(&mut self, _seat: usize) -> PromptAction {
        PromptAction::Continue
    }
}

/// One-prompt-at-a-time gate. Once a hook finishes the prompt, every further
/// event is swallowed until the next `show_message_initial`, which debounces
/// double-submission from re-entrant UI callbacks.
pub struct PromptGate<P: Prompt> {
    prompt: P,
    finished: bool,
}

impl<P: Prompt> PromptGate<P> {
    pub fn new(prompt: P) -> Self {
        Self {
            prompt,
            finished: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn show_message_initial(&mut self) {
        self.finished = false;
        self.prompt.show_message();
    }

    pub fn select_ok(&mut self) {
        self.dispatch(|prompt| prompt.on_ok());
    }

    pub fn select_cancel(&mut self) {
        self.dispatch(|prompt| prompt.on_cancel());
    }

    pub fn select_card(&mut self, card: CardId) {
        self.dispatch(|prompt| prompt.on_card_selected(card));
    }

    pub fn select_ability(&mut self, ability: AbilityId) {
        self.dispatch(|prompt| prompt.on_ability_selected(ability));
    }

    pub fn select_player(&mut self, seat: usize) {
        self.dispatch(|prompt| prompt.on_player_selected(seat));
    }

    fn dispatch(&mut self, event: impl FnOnce(&mut P) -> PromptAction) {
        if self.finished {
            return;
        }
        if let PromptAction::Finish = event(&mut self.prompt) {
            self.finished = true;
        }
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn into_inner(self) -> P {
        self.prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct ConfirmPrompt {
        shown: u32,
        confirmations: u32,
        cancelled: bool,
    }

    impl Prompt for ConfirmPrompt {
        fn show_message(&mut self) {
            self.shown += 1;
        }

        fn on_ok(&mut self) -> PromptAction {
            self.confirmations += 1;
            PromptAction::Finish
        }

        fn on_cancel(&mut self) -> PromptAction {
            self.cancelled = true;
            PromptAction::Finish
        }
    }

    #[derive(Default)]
    struct PickTwoCards {
        picked: Vec<CardId>,
    }

    impl Prompt for PickTwoCards {
        fn show_message(&mut self) {}

        fn on_card_selected(&mut self, card: CardId) -> PromptAction {
            self.picked.push(card);
            if self.picked.len() == 2 {
                PromptAction::Finish
            } else {
                PromptAction::Continue
            }
        }
    }

    #[test]
    fn double_click_confirms_once() {
        let mut gate = PromptGate::new(ConfirmPrompt::default());
        gate.show_message_initial();
        gate.select_ok();
        gate.select_ok();
        assert!(gate.is_finished());
        assert_eq!(gate.prompt().confirmations, 1);
    }

    #[test]
    fn all_events_are_noops_once_finished() {
        let mut gate = PromptGate::new(ConfirmPrompt::default());
        gate.show_message_initial();
        gate.select_ok();
        gate.select_cancel();
        gate.select_card(CardId(1));
        gate.select_ability(AbilityId(2));
        gate.select_player(0);
        let prompt = gate.into_inner();
        assert_eq!(prompt.confirmations, 1);
        assert!(!prompt.cancelled);
    }

    #[test]
    fn reset_reopens_the_gate() {
        let mut gate = PromptGate::new(ConfirmPrompt::default());
        gate.show_message_initial();
        gate.select_ok();
        assert!(gate.is_finished());
        gate.show_message_initial();
        assert!(!gate.is_finished());
        gate.select_ok();
        let prompt = gate.into_inner();
        assert_eq!(prompt.shown, 2);
        assert_eq!(prompt.confirmations, 2);
    }

    #[test]
    fn multi_step_prompt_finishes_on_its_own_terms() {
        let mut gate = PromptGate::new(PickTwoCards::default());
        gate.show_message_initial();
        gate.select_card(CardId(10));
        assert!(!gate.is_finished());
        gate.select_card(CardId(11));
        assert!(gate.is_finished());
        gate.select_card(CardId(12));
        assert_eq!(gate.prompt().picked, vec![CardId(10), CardId(11)]);
    }
}
