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

use std::sync::Arc;
use std::sync::Mutex;

use flashy_core::session::SessionController;
use flashy_core::types::language::Language;
use tokio::sync::oneshot::Sender;

#[derive(Clone)]
pub struct ServerState {
    /// Languages offered on the language menu.
    pub languages: Vec<Language>,
    /// Every request and timer event goes through this lock, one at a time.
    pub controller: Arc<Mutex<SessionController>>,
    pub shutdown_tx: Arc<Mutex<Option<Sender<()>>>>,
}
