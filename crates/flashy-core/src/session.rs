// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The practice session state machine.
//!
//! ```text
//! LanguageSelect --select_language--> ModeSelect --select_mode--> Practicing
//!        ^                                |  ^                        |
//!        +-------------back---------------+  +----------back----------+
//!
//! any state --exit--> Exit
//! ```
//!
//! Choosing a mode whose pool is empty leaves the session in `ModeSelect`
//! and queues a notification instead.

use std::fmt::Display;
use std::fmt::Formatter;
use std::time::Instant;

use crate::deck::DeckManager;
use crate::error::Fallible;
use crate::error::fail;
use crate::rng::TinyRng;
use crate::scheduler::CountdownEvent;
use crate::scheduler::CountdownScheduler;
use crate::scheduler::CountdownState;
use crate::store::DataStore;
use crate::types::card::Card;
use crate::types::language::Language;
use crate::types::language::TRANSLATION_FIELD;
use crate::types::mode::Action;
use crate::types::mode::PracticeMode;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    LanguageSelect,
    ModeSelect,
    Practicing,
    Exit,
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::LanguageSelect => write!(f, "selecting a language"),
            Phase::ModeSelect => write!(f, "selecting a practice mode"),
            Phase::Practicing => write!(f, "practicing"),
            Phase::Exit => write!(f, "exited"),
        }
    }
}

/// Something the user should be told about.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Notification {
    /// The chosen mode has no cards to practice.
    NoData(PracticeMode),
    /// The session's pool ran out of cards.
    NoMoreCards,
}

impl Notification {
    pub fn message(self) -> &'static str {
        match self {
            Notification::NoData(PracticeMode::AllWords) => "No data available to practice.",
            Notification::NoData(PracticeMode::WordsToLearn) => "No data available to learn.",
            Notification::NoData(PracticeMode::WordsKnown) => "No known words available.",
            Notification::NoMoreCards => "No more cards.",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub language: Option<Language>,
    pub mode: Option<PracticeMode>,
    pub current_card: Option<Card>,
    /// Whether the back of the current card is showing.
    pub revealed: bool,
}

/// What one side of the current card shows.
#[derive(Clone, Debug, PartialEq)]
pub struct CardFace {
    pub title: String,
    pub text: String,
    pub revealed: bool,
}

pub struct SessionController {
    store: DataStore,
    phase: Phase,
    state: SessionState,
    deck: Option<DeckManager>,
    countdown: CountdownScheduler,
    notifications: Vec<Notification>,
    rng: TinyRng,
}

impl SessionController {
    pub fn new(store: DataStore, countdown_seconds: u32, rng: TinyRng) -> Self {
        Self {
            store,
            phase: Phase::LanguageSelect,
            state: SessionState::default(),
            deck: None,
            countdown: CountdownScheduler::new(countdown_seconds),
            notifications: Vec::new(),
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn countdown(&self) -> CountdownState {
        self.countdown.state()
    }

    /// Number of timers waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.countdown.pending()
    }

    pub fn deck(&self) -> Option<&DeckManager> {
        self.deck.as_ref()
    }

    pub fn select_language(&mut self, language: Language) -> Fallible<()> {
        self.expect_phase(Phase::LanguageSelect, "select a language")?;
        log::info!("Selected language: {language}");
        self.state.language = Some(language);
        self.phase = Phase::ModeSelect;
        Ok(())
    }

    /// Load the pools for `mode` and start practicing. Returns false, and
    /// queues a notification, when the mode has nothing to practice.
    pub fn select_mode(&mut self, mode: PracticeMode, now: Instant) -> Fallible<bool> {
        self.expect_phase(Phase::ModeSelect, "select a practice mode")?;
        let language = match &self.state.language {
            Some(language) => language.clone(),
            None => return fail("no language selected."),
        };
        let rng = TinyRng::from_seed(
            (u64::from(self.rng.next_u32()) << 32) | u64::from(self.rng.next_u32()),
        );
        let deck = DeckManager::load(self.store.clone(), language, mode, rng);
        if deck.active().is_empty() {
            let notification = Notification::NoData(mode);
            log::info!("{}", notification.message());
            self.notifications.push(notification);
            return Ok(false);
        }
        self.state.mode = Some(mode);
        self.deck = Some(deck);
        self.phase = Phase::Practicing;
        self.next_card(now);
        Ok(true)
    }

    /// Apply an action to the current card, then draw the next one.
    pub fn perform(&mut self, action: Action, now: Instant) -> Fallible<()> {
        self.expect_phase(Phase::Practicing, "answer a card")?;
        if !self.available_actions().contains(&action) {
            return fail(format!(
                "'{}' is not available right now.",
                action.label()
            ));
        }
        let (Some(deck), Some(card)) = (self.deck.as_mut(), self.state.current_card.clone())
        else {
            return fail("there is no card to answer.");
        };
        match action {
            Action::MarkKnown => deck.mark_known(&card),
            Action::MarkUnknown => deck.mark_unknown(&card),
            Action::Keep => deck.keep_known(&card),
            Action::Remove => deck.remove_known(&card),
        }
        self.next_card(now);
        Ok(())
    }

    /// Show the back of the current card without waiting for the countdown.
    pub fn flip(&mut self) -> Fallible<()> {
        self.expect_phase(Phase::Practicing, "flip a card")?;
        if self.state.current_card.is_none() {
            return fail("there is no card to flip.");
        }
        self.countdown.cancel();
        self.state.revealed = true;
        Ok(())
    }

    /// Return to the previous menu, discarding the session's pools.
    pub fn back(&mut self) -> Fallible<()> {
        match self.phase {
            Phase::ModeSelect => {
                self.state = SessionState::default();
                self.phase = Phase::LanguageSelect;
                Ok(())
            }
            Phase::Practicing => {
                self.countdown.cancel();
                self.deck = None;
                self.state.mode = None;
                self.state.current_card = None;
                self.state.revealed = false;
                self.phase = Phase::ModeSelect;
                Ok(())
            }
            phase => fail(format!("cannot go back while {phase}.")),
        }
    }

    /// End the session. Pending timers are dropped.
    pub fn exit(&mut self) {
        self.countdown.cancel();
        self.deck = None;
        self.state.current_card = None;
        self.state.revealed = false;
        self.phase = Phase::Exit;
    }

    /// Run the timers due by `now`. A reveal flips the current card.
    pub fn poll(&mut self, now: Instant) -> Vec<CountdownEvent> {
        if self.phase != Phase::Practicing {
            return Vec::new();
        }
        let events = self.countdown.poll(now);
        if events.contains(&CountdownEvent::Reveal) {
            self.state.revealed = true;
        }
        events
    }

    /// Notifications queued since the last call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn available_actions(&self) -> &'static [Action] {
        match (self.phase, self.state.mode, &self.state.current_card) {
            (Phase::Practicing, Some(mode), Some(_)) => mode.actions(),
            _ => &[],
        }
    }

    /// The side of the current card that is showing.
    pub fn face(&self) -> Option<CardFace> {
        let card = self.state.current_card.as_ref()?;
        let language = self.state.language.as_ref()?;
        let face = if self.state.revealed {
            CardFace {
                title: TRANSLATION_FIELD.to_string(),
                text: card.translation().unwrap_or("No English").to_string(),
                revealed: true,
            }
        } else {
            CardFace {
                title: language.word_field(),
                text: card.word(language).unwrap_or("No Word").to_string(),
                revealed: false,
            }
        };
        Some(face)
    }

    fn next_card(&mut self, now: Instant) {
        self.countdown.cancel();
        self.state.revealed = false;
        let Some(deck) = self.deck.as_mut() else {
            return;
        };
        match deck.pick_random() {
            Ok(card) => {
                self.state.current_card = Some(card);
                self.countdown.start(now);
            }
            Err(e) => {
                log::info!("No cards to display: {e}");
                self.state.current_card = None;
                self.notifications.push(Notification::NoMoreCards);
            }
        }
    }

    fn expect_phase(&self, expected: Phase, what: &str) -> Fallible<()> {
        if self.phase == expected {
            Ok(())
        } else {
            fail(format!("cannot {what} while {}.", self.phase))
        }
    }
}
