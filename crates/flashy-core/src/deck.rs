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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use crate::rng::TinyRng;
use crate::store::DataStore;
use crate::types::card::Card;
use crate::types::language::Language;
use crate::types::mode::PoolKind;
use crate::types::mode::PracticeMode;
use crate::types::pool::Pool;

/// Drawing from a pool with no cards in it.
#[derive(Debug, PartialEq)]
pub struct EmptyPoolError;

impl Display for EmptyPoolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "no cards to draw from.")
    }
}

impl Error for EmptyPoolError {}

/// The working set of cards for one practice session: the words still to
/// learn and the words already known. Every change is written through to
/// the store.
pub struct DeckManager {
    store: DataStore,
    language: Language,
    mode: PracticeMode,
    to_learn: Pool,
    known: Pool,
    rng: TinyRng,
}

impl DeckManager {
    /// Load the pools a session in `mode` needs.
    pub fn load(store: DataStore, language: Language, mode: PracticeMode, rng: TinyRng) -> Self {
        let to_learn = match mode {
            PracticeMode::AllWords | PracticeMode::WordsToLearn => store.load(&language, mode),
            PracticeMode::WordsKnown => Pool::new(),
        };
        let known = store.load(&language, PracticeMode::WordsKnown);
        log::info!(
            "Deck for {language} has {} words to learn and {} known words",
            to_learn.len(),
            known.len()
        );
        Self {
            store,
            language,
            mode,
            to_learn,
            known,
            rng,
        }
    }

    pub fn to_learn(&self) -> &Pool {
        &self.to_learn
    }

    pub fn known(&self) -> &Pool {
        &self.known
    }

    /// The pool the session draws from.
    pub fn active(&self) -> &Pool {
        match self.mode.active_pool() {
            PoolKind::ToLearn => &self.to_learn,
            PoolKind::Known => &self.known,
        }
    }

    /// Draw a random card from the active pool.
    pub fn pick_random(&mut self) -> Result<Card, EmptyPoolError> {
        let pool = match self.mode.active_pool() {
            PoolKind::ToLearn => &self.to_learn,
            PoolKind::Known => &self.known,
        };
        pool.choose(&mut self.rng).cloned().ok_or(EmptyPoolError)
    }

    /// Move a card from the words to learn to the known words.
    pub fn mark_known(&mut self, card: &Card) {
        if self.to_learn.remove(card) {
            self.store
                .save(&self.language, &self.to_learn, PoolKind::ToLearn);
        }
        self.known.insert(card.clone());
        self.store.save(&self.language, &self.known, PoolKind::Known);
    }

    /// Leave a card among the words to learn. The pool is written out so that
    /// a session over all words records what is left to learn.
    pub fn mark_unknown(&mut self, card: &Card) {
        if self.to_learn.contains(card) {
            self.store
                .save(&self.language, &self.to_learn, PoolKind::ToLearn);
        }
    }

    pub fn remove_known(&mut self, card: &Card) {
        if self.known.remove(card) {
            self.store.save(&self.language, &self.known, PoolKind::Known);
        }
    }

    pub fn keep_known(&mut self, _card: &Card) {}
}

#[cfg(test)]
mod tests {
    use std::fs::read_to_string;
    use std::fs::write;

    use tempfile::TempDir;
    use tempfile::tempdir;

    use super::*;
    use crate::error::Fallible;
    use crate::types::card::card;

    const WORDS: &str = "Spanish,English\nhola,hello\ngato,cat\nperro,dog\n";

    fn setup(mode: PracticeMode, files: &[(&str, &str)]) -> Fallible<(TempDir, DeckManager)> {
        let dir = tempdir()?;
        for (name, content) in files {
            write(dir.path().join(name), content)?;
        }
        let store = DataStore::new(dir.path().to_path_buf());
        let language = Language::try_from("spanish")?;
        let deck = DeckManager::load(store, language, mode, TinyRng::from_seed(3));
        Ok((dir, deck))
    }

    fn hola() -> Card {
        card(&[("Spanish", "hola"), ("English", "hello")])
    }

    #[test]
    fn test_pick_random_from_empty_pool() -> Fallible<()> {
        let (_dir, mut deck) = setup(PracticeMode::WordsKnown, &[])?;
        assert_eq!(deck.pick_random(), Err(EmptyPoolError));
        Ok(())
    }

    #[test]
    fn test_pick_random_draws_from_active_pool() -> Fallible<()> {
        let (_dir, mut deck) = setup(
            PracticeMode::WordsKnown,
            &[
                ("spanish_words.csv", WORDS),
                ("spanish_words_known.csv", "Spanish,English\nhola,hello\n"),
            ],
        )?;
        for _ in 0..10 {
            assert_eq!(deck.pick_random(), Ok(hola()));
        }
        Ok(())
    }

    #[test]
    fn test_mark_known_is_idempotent() -> Fallible<()> {
        let (dir, mut deck) = setup(PracticeMode::AllWords, &[("spanish_words.csv", WORDS)])?;
        deck.mark_known(&hola());
        deck.mark_known(&hola());
        assert_eq!(deck.known().len(), 1);
        assert!(deck.known().contains(&hola()));
        assert!(!deck.to_learn().contains(&hola()));
        assert_eq!(deck.to_learn().len(), 2);

        let known = read_to_string(dir.path().join("spanish_words_known.csv"))?;
        assert_eq!(known, "Spanish,English\nhola,hello\n");
        let to_learn = read_to_string(dir.path().join("spanish_words_to_learn.csv"))?;
        assert_eq!(to_learn, "Spanish,English\ngato,cat\nperro,dog\n");
        // The full word list is never rewritten.
        assert_eq!(read_to_string(dir.path().join("spanish_words.csv"))?, WORDS);
        Ok(())
    }

    #[test]
    fn test_mark_unknown_records_words_to_learn() -> Fallible<()> {
        let (dir, mut deck) = setup(PracticeMode::AllWords, &[("spanish_words.csv", WORDS)])?;
        deck.mark_unknown(&hola());
        assert_eq!(deck.to_learn().len(), 3);
        assert!(deck.known().is_empty());
        let to_learn = read_to_string(dir.path().join("spanish_words_to_learn.csv"))?;
        assert_eq!(to_learn, WORDS);
        assert!(!dir.path().join("spanish_words_known.csv").exists());
        Ok(())
    }

    #[test]
    fn test_remove_last_known_card_leaves_file_alone() -> Fallible<()> {
        let known_file = "Spanish,English\nhola,hello\n";
        let (dir, mut deck) = setup(
            PracticeMode::WordsKnown,
            &[("spanish_words_known.csv", known_file)],
        )?;
        deck.remove_known(&hola());
        assert!(deck.known().is_empty());
        assert_eq!(deck.pick_random(), Err(EmptyPoolError));
        // Empty pools are not written, so the file keeps its last contents.
        assert_eq!(
            read_to_string(dir.path().join("spanish_words_known.csv"))?,
            known_file
        );
        Ok(())
    }

    #[test]
    fn test_remove_known_rewrites_remaining_cards() -> Fallible<()> {
        let (dir, mut deck) = setup(
            PracticeMode::WordsKnown,
            &[("spanish_words_known.csv", WORDS)],
        )?;
        deck.remove_known(&hola());
        assert_eq!(deck.known().len(), 2);
        assert_eq!(
            read_to_string(dir.path().join("spanish_words_known.csv"))?,
            "Spanish,English\ngato,cat\nperro,dog\n"
        );
        Ok(())
    }

    #[test]
    fn test_mark_known_survives_failed_writes() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join("spanish_words.csv"), WORDS)?;
        // Directories in place of the pool files make every save fail.
        std::fs::create_dir(dir.path().join("spanish_words_to_learn.csv"))?;
        std::fs::create_dir(dir.path().join("spanish_words_known.csv"))?;
        let store = DataStore::new(dir.path().to_path_buf());
        let language = Language::try_from("spanish")?;
        let mut deck = DeckManager::load(
            store,
            language,
            PracticeMode::AllWords,
            TinyRng::from_seed(3),
        );
        assert_eq!(deck.to_learn().len(), 3);
        assert!(deck.known().is_empty());

        deck.mark_known(&hola());
        assert_eq!(deck.to_learn().len(), 2);
        assert!(!deck.to_learn().contains(&hola()));
        assert_eq!(deck.known().len(), 1);
        assert!(deck.known().contains(&hola()));
        assert!(dir.path().join("spanish_words_known.csv").is_dir());
        Ok(())
    }

    #[test]
    fn test_keep_known_changes_nothing() -> Fallible<()> {
        let (_dir, mut deck) = setup(
            PracticeMode::WordsKnown,
            &[("spanish_words_known.csv", WORDS)],
        )?;
        deck.keep_known(&hola());
        assert_eq!(deck.known().len(), 3);
        Ok(())
    }
}
