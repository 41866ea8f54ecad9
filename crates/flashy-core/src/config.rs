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

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::scheduler::DEFAULT_COUNTDOWN_SECONDS;
use crate::types::language::Language;

/// Name of the optional configuration file in the data directory.
pub const CONFIG_FILE_NAME: &str = "flashy.toml";

/// Settings read from `flashy.toml`.
#[derive(Debug, PartialEq)]
pub struct Config {
    /// Languages offered on the language menu, in order.
    pub languages: Vec<Language>,
    /// Seconds before a card is revealed.
    pub countdown_seconds: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    languages: Option<Vec<Language>>,
    countdown_seconds: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            languages: ["spanish", "french", "japanese"]
                .into_iter()
                .filter_map(|name| Language::try_from(name).ok())
                .collect(),
            countdown_seconds: DEFAULT_COUNTDOWN_SECONDS,
        }
    }
}

impl Config {
    /// Read the configuration from a data directory. A missing file means
    /// the defaults.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE_NAME);
        if !path.exists() {
            log::debug!("No {CONFIG_FILE_NAME} found, using defaults.");
            return Ok(Config::default());
        }
        let text = read_to_string(&path)?;
        Config::parse(&text)
    }

    pub fn parse(text: &str) -> Fallible<Self> {
        let raw: RawConfig = toml::from_str(text)?;
        let defaults = Config::default();
        let languages = raw.languages.unwrap_or(defaults.languages);
        if languages.is_empty() {
            return fail("at least one language must be configured.");
        }
        let countdown_seconds = raw.countdown_seconds.unwrap_or(defaults.countdown_seconds);
        if countdown_seconds == 0 {
            return fail("countdown_seconds must be at least 1.");
        }
        let mut deduped: Vec<Language> = Vec::new();
        for language in languages {
            if !deduped.contains(&language) {
                deduped.push(language);
            }
        }
        Ok(Config {
            languages: deduped,
            countdown_seconds,
        })
    }
}
