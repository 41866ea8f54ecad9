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

use flashy_core::error::Fallible;
use flashy_core::error::fail;
use flashy_core::store::MalformedRow;
use flashy_core::store::ReadOutcome;

use crate::collection::Collection;

/// A data file and the rows in it that could not be read.
pub struct FileReport {
    pub path: String,
    pub cards: usize,
    pub malformed: Vec<MalformedRow>,
}

pub fn check_collection(directory: Option<String>) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let reports = inspect(&collection)?;
    let mut problems = 0;
    for report in &reports {
        println!("{}: {} cards", report.path, report.cards);
        for row in &report.malformed {
            println!("  line {}: {}", row.line, row.reason);
        }
        problems += report.malformed.len();
    }
    if problems > 0 {
        return fail(format!("found {problems} malformed rows."));
    }
    println!("No problems found.");
    Ok(())
}

/// Read every existing data file of every configured language.
pub fn inspect(collection: &Collection) -> Fallible<Vec<FileReport>> {
    let mut reports = Vec::new();
    for language in &collection.config.languages {
        for path in collection.files(language) {
            match collection.store.read(&path)? {
                ReadOutcome::Missing => {}
                ReadOutcome::Read { pool, malformed } => reports.push(FileReport {
                    path: path.display().to_string(),
                    cards: pool.len(),
                    malformed,
                }),
            }
        }
    }
    Ok(reports)
}
