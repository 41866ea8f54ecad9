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

/// Which pool a practice session draws its cards from.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticeMode {
    /// Every word of the language.
    AllWords,
    /// Words not yet marked known.
    WordsToLearn,
    /// Words already marked known.
    WordsKnown,
}

impl PracticeMode {
    pub const ALL: [PracticeMode; 3] = [
        PracticeMode::AllWords,
        PracticeMode::WordsToLearn,
        PracticeMode::WordsKnown,
    ];

    /// The actions a user may take on a card in this mode.
    pub fn actions(self) -> &'static [Action] {
        match self {
            PracticeMode::AllWords | PracticeMode::WordsToLearn => {
                &[Action::MarkUnknown, Action::MarkKnown]
            }
            PracticeMode::WordsKnown => &[Action::Keep, Action::Remove],
        }
    }

    /// The pool cards are drawn from.
    pub fn active_pool(self) -> PoolKind {
        match self {
            PracticeMode::AllWords | PracticeMode::WordsToLearn => PoolKind::ToLearn,
            PracticeMode::WordsKnown => PoolKind::Known,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PracticeMode::AllWords => "Practice All Words",
            PracticeMode::WordsToLearn => "Practice Unknown Words",
            PracticeMode::WordsKnown => "Practice Known Words",
        }
    }
}

impl Display for PracticeMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PracticeMode::AllWords => write!(f, "all_words"),
            PracticeMode::WordsToLearn => write!(f, "words_to_learn"),
            PracticeMode::WordsKnown => write!(f, "words_known"),
        }
    }
}

/// The two persisted classifications of a language's cards.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PoolKind {
    ToLearn,
    Known,
}

impl PoolKind {
    pub fn file_suffix(self) -> &'static str {
        match self {
            PoolKind::ToLearn => "words_to_learn",
            PoolKind::Known => "words_known",
        }
    }
}

impl Display for PoolKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolKind::ToLearn => write!(f, "words to learn"),
            PoolKind::Known => write!(f, "known words"),
        }
    }
}

/// Something the user can do with the current card.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    MarkKnown,
    MarkUnknown,
    Keep,
    Remove,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::MarkKnown => "Known",
            Action::MarkUnknown => "Unknown",
            Action::Keep => "Keep",
            Action::Remove => "Remove",
        }
    }
}
