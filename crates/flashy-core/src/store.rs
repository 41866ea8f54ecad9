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

//! Reading and writing a language's word lists.
//!
//! Each language has up to three CSV files in the data directory:
//!
//! - `{language}_words.csv`: every word.
//! - `{language}_words_to_learn.csv`: words not yet marked known.
//! - `{language}_words_known.csv`: words marked known.
//!
//! Nothing here returns an error to the session: missing files, bad rows,
//! and I/O failures are logged and degrade to empty pools or skipped
//! writes.

use std::path::Path;
use std::path::PathBuf;

use csv::ReaderBuilder;
use csv::Writer;

use crate::error::Fallible;
use crate::types::card::Card;
use crate::types::language::Language;
use crate::types::mode::PoolKind;
use crate::types::mode::PracticeMode;
use crate::types::pool::Pool;

/// A data row that could not be turned into a card.
#[derive(Debug, PartialEq)]
pub struct MalformedRow {
    /// One-based line number in the file.
    pub line: u64,
    pub reason: String,
}

/// The result of reading one data file.
#[derive(Debug)]
pub enum ReadOutcome {
    /// The file does not exist.
    Missing,
    Read {
        pool: Pool,
        malformed: Vec<MalformedRow>,
    },
}

#[derive(Debug, PartialEq)]
pub enum SaveOutcome {
    /// The pool was written with this many rows.
    Written(usize),
    /// The pool was empty, so the file was left alone.
    SkippedEmpty,
    /// Writing failed. The error has been logged.
    Failed,
}

#[derive(Clone, Debug)]
pub struct DataStore {
    directory: PathBuf,
}

impl DataStore {
    pub fn new(directory: PathBuf) -> Self {
        Self { directory }
    }

    /// Path to the file holding every word of the language.
    pub fn words_path(&self, language: &Language) -> PathBuf {
        self.directory
            .join(format!("{}_words.csv", language.file_stem()))
    }

    pub fn pool_path(&self, language: &Language, kind: PoolKind) -> PathBuf {
        self.directory.join(format!(
            "{}_{}.csv",
            language.file_stem(),
            kind.file_suffix()
        ))
    }

    /// Load the pool a practice session in `mode` draws from.
    pub fn load(&self, language: &Language, mode: PracticeMode) -> Pool {
        log::info!("Loading data for language: {language}, mode: {mode}");
        match mode {
            PracticeMode::AllWords => {
                let path = self.words_path(language);
                self.load_file(&path).unwrap_or_else(|| {
                    log::warn!("File not found: {}", path.display());
                    Pool::new()
                })
            }
            PracticeMode::WordsToLearn => {
                let learn_path = self.pool_path(language, PoolKind::ToLearn);
                if let Some(pool) = self.load_file(&learn_path) {
                    return pool;
                }
                let words_path = self.words_path(language);
                log::info!(
                    "File not found: {}. Trying fallback: {}",
                    learn_path.display(),
                    words_path.display()
                );
                self.load_file(&words_path).unwrap_or_else(|| {
                    log::warn!(
                        "Both files are missing: {} and {}",
                        learn_path.display(),
                        words_path.display()
                    );
                    Pool::new()
                })
            }
            PracticeMode::WordsKnown => {
                let path = self.pool_path(language, PoolKind::Known);
                self.load_file(&path).unwrap_or_default()
            }
        }
    }

    /// Write a pool to the file for `kind`. Empty pools are never written,
    /// so an earlier non-empty file survives.
    pub fn save(&self, language: &Language, pool: &Pool, kind: PoolKind) -> SaveOutcome {
        if pool.is_empty() {
            log::info!("No {kind} to save.");
            return SaveOutcome::SkippedEmpty;
        }
        let path = self.pool_path(language, kind);
        match write_pool(&path, pool) {
            Ok(()) => {
                log::info!("Saved {} {kind} to {}", pool.len(), path.display());
                SaveOutcome::Written(pool.len())
            }
            Err(e) => {
                log::error!("Error saving {kind} to {}: {e}", path.display());
                SaveOutcome::Failed
            }
        }
    }

    /// Read a data file, reporting the rows that had to be skipped.
    pub fn read(&self, path: &Path) -> Fallible<ReadOutcome> {
        if !path.exists() {
            return Ok(ReadOutcome::Missing);
        }
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;
        let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        let mut cards: Vec<Card> = Vec::new();
        let mut malformed: Vec<MalformedRow> = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            // Line of the header plus the records before this one.
            let fallback_line = idx as u64 + 2;
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    let line = e.position().map(|p| p.line()).unwrap_or(fallback_line);
                    malformed.push(MalformedRow {
                        line,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(fallback_line);
            // Short rows are kept: their missing trailing cells are absent
            // fields, like blank cells.
            if record.len() > headers.len() {
                malformed.push(MalformedRow {
                    line,
                    reason: format!(
                        "expected at most {} fields, found {}",
                        headers.len(),
                        record.len()
                    ),
                });
                continue;
            }
            // Blank cells are absent fields, so that writing a card and
            // reading it back gives an equal card.
            let fields: Vec<(String, String)> = headers
                .iter()
                .zip(record.iter())
                .filter(|(_, value)| !value.is_empty())
                .map(|(name, value)| (name.clone(), value.to_string()))
                .collect();
            if fields.is_empty() {
                malformed.push(MalformedRow {
                    line,
                    reason: "row has no values".to_string(),
                });
                continue;
            }
            cards.push(Card::new(fields));
        }
        let pool: Pool = cards.into_iter().collect();
        Ok(ReadOutcome::Read { pool, malformed })
    }

    /// Load a file into a pool. Returns `None` only when the file does not
    /// exist; a file that cannot be read yields an empty pool.
    fn load_file(&self, path: &Path) -> Option<Pool> {
        match self.read(path) {
            Ok(ReadOutcome::Missing) => None,
            Ok(ReadOutcome::Read { pool, malformed }) => {
                for row in malformed {
                    log::warn!(
                        "Skipping malformed row at {}:{}: {}",
                        path.display(),
                        row.line,
                        row.reason
                    );
                }
                log::info!("Loaded {} words from {}", pool.len(), path.display());
                Some(pool)
            }
            Err(e) => {
                log::error!("Error loading data from {}: {e}", path.display());
                Some(Pool::new())
            }
        }
    }
}

fn write_pool(path: &Path, pool: &Pool) -> Fallible<()> {
    let headers = pool.headers();
    let mut writer = Writer::from_path(path)?;
    writer.write_record(&headers)?;
    for card in pool.cards() {
        writer.write_record(headers.iter().map(|h| card.get(h).unwrap_or("")))?;
    }
    writer.flush()?;
    Ok(())
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
    use crate::types::pool::same_cards;

    fn spanish() -> Language {
        Language::try_from("Spanish").unwrap()
    }

    fn store() -> Fallible<(TempDir, DataStore)> {
        let dir = tempdir()?;
        let store = DataStore::new(dir.path().to_path_buf());
        Ok((dir, store))
    }

    const FIVE_WORDS: &str = "Spanish,English\n\
                              hola,hello\n\
                              gato,cat\n\
                              perro,dog\n\
                              casa,house\n\
                              agua,water\n";

    #[test]
    fn test_paths() -> Fallible<()> {
        let (dir, store) = store()?;
        let language = spanish();
        assert_eq!(store.words_path(&language), dir.path().join("spanish_words.csv"));
        assert_eq!(
            store.pool_path(&language, PoolKind::ToLearn),
            dir.path().join("spanish_words_to_learn.csv")
        );
        assert_eq!(
            store.pool_path(&language, PoolKind::Known),
            dir.path().join("spanish_words_known.csv")
        );
        Ok(())
    }

    #[test]
    fn test_load_never_fails_on_empty_directory() -> Fallible<()> {
        let (_dir, store) = store()?;
        for mode in PracticeMode::ALL {
            assert!(store.load(&spanish(), mode).is_empty());
        }
        Ok(())
    }

    #[test]
    fn test_load_all_words() -> Fallible<()> {
        let (dir, store) = store()?;
        write(dir.path().join("spanish_words.csv"), FIVE_WORDS)?;
        let pool = store.load(&spanish(), PracticeMode::AllWords);
        assert_eq!(pool.len(), 5);
        assert!(pool.contains(&card(&[("Spanish", "gato"), ("English", "cat")])));
        Ok(())
    }

    #[test]
    fn test_words_to_learn_falls_back_to_all_words() -> Fallible<()> {
        let (dir, store) = store()?;
        write(dir.path().join("spanish_words.csv"), FIVE_WORDS)?;
        let pool = store.load(&spanish(), PracticeMode::WordsToLearn);
        assert_eq!(pool.len(), 5);
        Ok(())
    }

    #[test]
    fn test_words_to_learn_prefers_its_own_file() -> Fallible<()> {
        let (dir, store) = store()?;
        write(dir.path().join("spanish_words.csv"), FIVE_WORDS)?;
        write(
            dir.path().join("spanish_words_to_learn.csv"),
            "Spanish,English\nperro,dog\n",
        )?;
        let pool = store.load(&spanish(), PracticeMode::WordsToLearn);
        assert_eq!(pool.len(), 1);
        Ok(())
    }

    #[test]
    fn test_malformed_rows_are_skipped() -> Fallible<()> {
        let (dir, store) = store()?;
        let path = dir.path().join("spanish_words.csv");
        write(
            &path,
            "Spanish,English\nhola,hello\ngato,cat,extra\nperro\ncasa,house\n",
        )?;
        let pool = store.load(&spanish(), PracticeMode::AllWords);
        assert_eq!(pool.len(), 3);
        assert!(pool.contains(&card(&[("Spanish", "perro")])));
        match store.read(&path)? {
            ReadOutcome::Read { malformed, .. } => {
                let lines: Vec<u64> = malformed.iter().map(|row| row.line).collect();
                assert_eq!(lines, vec![3]);
            }
            ReadOutcome::Missing => panic!("file should exist"),
        }
        Ok(())
    }

    #[test]
    fn test_short_rows_keep_their_cards() -> Fallible<()> {
        let (dir, store) = store()?;
        write(
            dir.path().join("spanish_words.csv"),
            "Spanish,English,Note
hola,hello
perro
gato,cat,animal
",
        )?;
        let pool = store.load(&spanish(), PracticeMode::AllWords);
        assert_eq!(pool.len(), 3);
        assert!(pool.contains(&card(&[("Spanish", "hola"), ("English", "hello")])));
        assert!(pool.contains(&card(&[("Spanish", "perro")])));
        assert!(pool.contains(&card(&[
            ("Spanish", "gato"),
            ("English", "cat"),
            ("Note", "animal")
        ])));
        Ok(())
    }

    #[test]
    fn test_headers_and_cells_are_not_trimmed() -> Fallible<()> {
        let (dir, store) = store()?;
        write(
            dir.path().join("spanish_words.csv"),
            "Spanish, English
hola, hello
",
        )?;
        let pool = store.load(&spanish(), PracticeMode::AllWords);
        assert!(pool.contains(&card(&[("Spanish", "hola"), (" English", " hello")])));
        Ok(())
    }

    #[test]
    fn test_unreadable_file_degrades_to_empty_pool() -> Fallible<()> {
        let (dir, store) = store()?;
        // A directory where the file should be cannot be read as CSV.
        std::fs::create_dir(dir.path().join("spanish_words_known.csv"))?;
        assert!(store.load(&spanish(), PracticeMode::WordsKnown).is_empty());
        Ok(())
    }

    #[test]
    fn test_known_round_trip() -> Fallible<()> {
        let (_dir, store) = store()?;
        let known: Pool = [
            card(&[("Spanish", "hola"), ("English", "hello")]),
            card(&[("Spanish", "uno, dos"), ("English", "one, two"), ("Note", "\"quoted\"")]),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            store.save(&spanish(), &known, PoolKind::Known),
            SaveOutcome::Written(2)
        );
        let loaded = store.load(&spanish(), PracticeMode::WordsKnown);
        assert!(same_cards(&loaded, &known));
        Ok(())
    }

    #[test]
    fn test_save_preserves_column_order() -> Fallible<()> {
        let (dir, store) = store()?;
        let pool: Pool = [card(&[("English", "cat"), ("Spanish", "gato"), ("Level", "A1")])]
            .into_iter()
            .collect();
        store.save(&spanish(), &pool, PoolKind::ToLearn);
        let text = read_to_string(dir.path().join("spanish_words_to_learn.csv"))?;
        assert_eq!(text, "English,Spanish,Level\ncat,gato,A1\n");
        Ok(())
    }

    #[test]
    fn test_empty_save_preserves_existing_file() -> Fallible<()> {
        let (dir, store) = store()?;
        let path = dir.path().join("spanish_words_known.csv");
        write(&path, "Spanish,English\nhola,hello\n")?;
        assert_eq!(
            store.save(&spanish(), &Pool::new(), PoolKind::Known),
            SaveOutcome::SkippedEmpty
        );
        assert_eq!(read_to_string(&path)?, "Spanish,English\nhola,hello\n");
        Ok(())
    }

    #[test]
    fn test_save_failure_is_swallowed() -> Fallible<()> {
        let dir = tempdir()?;
        let store = DataStore::new(dir.path().join("does-not-exist"));
        let pool: Pool = [card(&[("Spanish", "hola"), ("English", "hello")])]
            .into_iter()
            .collect();
        assert_eq!(
            store.save(&spanish(), &pool, PoolKind::Known),
            SaveOutcome::Failed
        );
        Ok(())
    }
}
