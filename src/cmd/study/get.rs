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

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum::response::Html;
use flashy_core::session::Notification;
use flashy_core::session::Phase;
use flashy_core::session::SessionController;
use flashy_core::types::language::Language;
use flashy_core::types::mode::PracticeMode;
use maud::Markup;
use maud::html;
use serde::Serialize;

use crate::cmd::study::state::ServerState;
use crate::cmd::study::template::action_button;
use crate::cmd::study::template::page_template;

pub async fn get_handler(State(state): State<ServerState>) -> Html<String> {
    let mut controller = state.controller.lock().unwrap();
    controller.poll(Instant::now());
    let notifications = controller.take_notifications();
    let body = render_body(&state.languages, &controller, &notifications);
    Html(page_template(body).into_string())
}

#[derive(Serialize)]
pub struct CountdownView {
    pub remaining_seconds: u32,
    pub active: bool,
    pub revealed: bool,
}

pub async fn countdown_handler(State(state): State<ServerState>) -> Json<CountdownView> {
    let mut controller = state.controller.lock().unwrap();
    controller.poll(Instant::now());
    let countdown = controller.countdown();
    Json(CountdownView {
        remaining_seconds: countdown.remaining_seconds,
        active: countdown.active,
        revealed: controller.state().revealed,
    })
}

fn render_body(
    languages: &[Language],
    controller: &SessionController,
    notifications: &[Notification],
) -> Markup {
    let content = match controller.phase() {
        Phase::LanguageSelect => render_language_menu(languages),
        Phase::ModeSelect => render_mode_menu(controller),
        Phase::Practicing => render_card(controller),
        Phase::Exit => render_goodbye(),
    };
    html! {
        @for notification in notifications {
            div.notification { (notification.message()) }
        }
        (content)
    }
}

fn render_language_menu(languages: &[Language]) -> Markup {
    html! {
        div.menu {
            h1 { "Select a language" }
            @for language in languages {
                @let name = language.to_string();
                (action_button("Language", &name, &[("language", name.as_str())]))
            }
            (action_button("Exit", "Exit", &[]))
        }
    }
}

fn render_mode_menu(controller: &SessionController) -> Markup {
    let language = controller
        .state()
        .language
        .as_ref()
        .map(|l| l.to_string())
        .unwrap_or_default();
    html! {
        div.menu {
            h1 { "Choose practice mode" }
            h2 { (language) }
            @for mode in PracticeMode::ALL {
                @let value = mode.to_string();
                (action_button("Mode", mode.label(), &[("mode", value.as_str())]))
            }
            div.controls {
                (action_button("Back", "Back", &[]))
                (action_button("Exit", "Exit", &[]))
            }
        }
    }
}

fn render_card(controller: &SessionController) -> Markup {
    let Some(face) = controller.face() else {
        return html! {
            div.card.empty {
                p.card-word { "No more cards." }
            }
            div.controls {
                (action_button("Back", "Back", &[]))
                (action_button("Exit", "Exit", &[]))
            }
        };
    };
    let countdown = controller.countdown();
    let side = if face.revealed { "back" } else { "front" };
    html! {
        div.card.(side) {
            p.card-title { (face.title) }
            p.card-word { (face.text) }
        }
        p #countdown data-revealed=(if face.revealed { "true" } else { "false" }) {
            @if countdown.active {
                "Answer in: " (countdown.remaining_seconds) " s"
            }
        }
        div.controls {
            @if !face.revealed {
                (action_button("Flip", "Flip", &[]))
            }
            @for action in controller.available_actions() {
                (action_button(action.label(), action.label(), &[]))
            }
        }
        div.controls {
            (action_button("Back", "Back", &[]))
            (action_button("Exit", "Exit", &[]))
        }
    }
}

pub fn render_goodbye() -> Markup {
    html! {
        div.menu {
            h1 { "Session ended" }
            p { "You can close this tab." }
        }
    }
}
