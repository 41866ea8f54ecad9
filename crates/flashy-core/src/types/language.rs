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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;

/// The name of the reference column every card is translated into.
pub const TRANSLATION_FIELD: &str = "English";

/// A study language, e.g. `Spanish`.
///
/// The name is stored in lowercase, since that is how it appears in file
/// names. The capitalized form is the header of the column holding the
/// source-language word.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Language(String);

impl Language {
    /// The lowercase name, used as the prefix of the data file names.
    pub fn file_stem(&self) -> &str {
        &self.0
    }

    /// The header of the column that holds the word in this language.
    pub fn word_field(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.word_field())
    }
}

impl TryFrom<String> for Language {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let name = value.trim();
        if name.is_empty() {
            return Err(ErrorReport::new("language name is empty."));
        }
        let valid = name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ErrorReport::new(format!(
                "invalid language name: '{value}'."
            )));
        }
        Ok(Language(name.to_lowercase()))
    }
}

impl TryFrom<&str> for Language {
    type Error = ErrorReport;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Language::try_from(value.to_string())
    }
}

impl From<Language> for String {
    fn from(language: Language) -> String {
        language.word_field()
    }
}
