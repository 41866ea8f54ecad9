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

use std::env::current_dir;
use std::path::PathBuf;

use flashy_core::config::Config;
use flashy_core::error::Fallible;
use flashy_core::error::fail;
use flashy_core::store::DataStore;
use flashy_core::types::language::Language;
use flashy_core::types::mode::PoolKind;

/// A data directory: the word lists and the configuration next to them.
pub struct Collection {
    pub directory: PathBuf,
    pub config: Config,
    pub store: DataStore,
}

impl Collection {
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        if !directory.exists() {
            return fail("directory does not exist.");
        }
        if !directory.is_dir() {
            return fail("not a directory.");
        }
        let directory = directory.canonicalize()?;
        let config = Config::load(&directory)?;
        let store = DataStore::new(directory.clone());
        Ok(Self {
            directory,
            config,
            store,
        })
    }

    /// Every data file a language can have, in a fixed order.
    pub fn files(&self, language: &Language) -> Vec<PathBuf> {
        vec![
            self.store.words_path(language),
            self.store.pool_path(language, PoolKind::ToLearn),
            self.store.pool_path(language, PoolKind::Known),
        ]
    }
}
