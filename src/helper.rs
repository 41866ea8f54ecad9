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

use std::fs::write;
use std::path::PathBuf;

use flashy_core::error::Fallible;
use tempfile::tempdir;

/// Create a temporary directory that outlives the test's `TempDir` handle.
pub fn create_tmp_directory() -> Fallible<PathBuf> {
    let dir = tempdir()?.keep();
    Ok(dir.canonicalize()?)
}

/// Create a temporary data directory containing the given files.
pub fn create_tmp_collection(files: &[(&str, &str)]) -> Fallible<PathBuf> {
    let dir = create_tmp_directory()?;
    for (name, content) in files {
        write(dir.join(name), content)?;
    }
    Ok(dir)
}
