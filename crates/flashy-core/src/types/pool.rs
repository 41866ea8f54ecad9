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

use crate::rng::TinyRng;
use crate::types::card::Card;

/// An in-memory collection of cards holding no two equal cards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pool {
    cards: Vec<Card>,
}

impl Pool {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    /// Add a card unless an equal one is already present. Returns whether the
    /// card was added.
    pub fn insert(&mut self, card: Card) -> bool {
        if self.contains(&card) {
            false
        } else {
            self.cards.push(card);
            true
        }
    }

    /// Remove the card equal to `card`. Returns whether one was present.
    pub fn remove(&mut self, card: &Card) -> bool {
        match self.cards.iter().position(|c| c == card) {
            Some(idx) => {
                self.cards.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Pick a card uniformly at random. Successive picks are independent, so
    /// the same card may come up twice in a row.
    pub fn choose(&self, rng: &mut TinyRng) -> Option<&Card> {
        if self.cards.is_empty() {
            return None;
        }
        let idx = rng.generate(self.cards.len() as u32) as usize;
        self.cards.get(idx)
    }

    /// The column headers to write this pool with: the fields of the first
    /// card in order, followed by any field only later cards have.
    pub fn headers(&self) -> Vec<String> {
        let mut headers: Vec<String> = Vec::new();
        for card in &self.cards {
            for name in card.field_names() {
                if !headers.iter().any(|h| h == name) {
                    headers.push(name.to_string());
                }
            }
        }
        headers
    }
}

impl FromIterator<Card> for Pool {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut pool = Pool::new();
        for card in iter {
            pool.insert(card);
        }
        pool
    }
}

/// Pools compare as sets.
#[cfg(test)]
pub fn same_cards(a: &Pool, b: &Pool) -> bool {
    a.len() == b.len() && a.cards.iter().all(|card| b.contains(card))
}
