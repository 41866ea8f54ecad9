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

//! flashy-core: Core library for the flashy vocabulary trainer.
//!
//! This library provides:
//! - Loading and saving per-language word lists as CSV
//! - The to-learn and known card pools and random card selection
//! - The practice session state machine
//! - A cooperative countdown that reveals cards

pub mod config;
pub mod deck;
pub mod error;
pub mod rng;
pub mod scheduler;
pub mod session;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use deck::{DeckManager, EmptyPoolError};
pub use error::{ErrorReport, Fallible, fail};
pub use scheduler::{CountdownEvent, CountdownScheduler, CountdownState};
pub use session::{CardFace, Notification, Phase, SessionController, SessionState};
pub use store::{DataStore, ReadOutcome, SaveOutcome};
pub use types::card::Card;
pub use types::language::Language;
pub use types::mode::{Action, PoolKind, PracticeMode};
pub use types::pool::Pool;
