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

use crate::types::language::Language;
use crate::types::language::TRANSLATION_FIELD;

/// A vocabulary record: one row of a data file.
///
/// Fields keep the column order they were read in, but two cards are equal
/// when they hold the same set of fields, regardless of order.
#[derive(Clone, Debug)]
pub struct Card {
    fields: Vec<(String, String)>,
}

impl Card {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        let mut deduped: Vec<(String, String)> = Vec::with_capacity(fields.len());
        for (name, value) in fields {
            match deduped.iter_mut().find(|(n, _)| *n == name) {
                Some(existing) => existing.1 = value,
                None => deduped.push((name, value)),
            }
        }
        Self { fields: deduped }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    /// Field names, in column order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    #[cfg(test)]
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// The word in the given source language.
    pub fn word(&self, language: &Language) -> Option<&str> {
        self.get(&language.word_field())
    }

    /// The English translation.
    pub fn translation(&self) -> Option<&str> {
        self.get(TRANSLATION_FIELD)
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .all(|(name, value)| other.get(name) == Some(value.as_str()))
    }
}

impl Eq for Card {}

/// Build a card from `(field, value)` pairs.
#[cfg(test)]
pub fn card(fields: &[(&str, &str)]) -> Card {
    Card::new(
        fields
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
    )
}
