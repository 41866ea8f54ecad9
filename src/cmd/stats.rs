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

use clap::ValueEnum;
use flashy_core::error::ErrorReport;
use flashy_core::error::Fallible;
use flashy_core::types::mode::PracticeMode;
use serde::Serialize;

use crate::collection::Collection;

#[derive(ValueEnum, Clone, Copy, PartialEq)]
pub enum StatsFormat {
    /// One line per language.
    Text,
    /// A JSON array.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct LanguageStats {
    pub language: String,
    pub all_words: usize,
    pub to_learn: usize,
    pub known: usize,
}

pub fn print_stats(directory: Option<String>, format: StatsFormat) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let stats = get_stats(&collection);
    match format {
        StatsFormat::Text => {
            for s in &stats {
                println!(
                    "{}: {} words, {} to learn, {} known",
                    s.language, s.all_words, s.to_learn, s.known
                );
            }
        }
        StatsFormat::Json => {
            let json = serde_json::to_string_pretty(&stats)
                .map_err(|e| ErrorReport::new(format!("JSON error: {e}")))?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Pool sizes per configured language, as a session would load them.
pub fn get_stats(collection: &Collection) -> Vec<LanguageStats> {
    collection
        .config
        .languages
        .iter()
        .map(|language| LanguageStats {
            language: language.to_string(),
            all_words: collection.store.load(language, PracticeMode::AllWords).len(),
            to_learn: collection
                .store
                .load(language, PracticeMode::WordsToLearn)
                .len(),
            known: collection.store.load(language, PracticeMode::WordsKnown).len(),
        })
        .collect()
}
