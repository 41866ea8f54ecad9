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

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use flashy_core::error::Fallible;
use flashy_core::error::fail;
use flashy_core::session::Phase;
use flashy_core::session::SessionController;
use flashy_core::types::language::Language;
use flashy_core::types::mode::Action;
use flashy_core::types::mode::PracticeMode;
use maud::html;
use serde::Deserialize;

use crate::cmd::study::get::render_goodbye;
use crate::cmd::study::state::ServerState;
use crate::cmd::study::template::page_template;

#[derive(Deserialize)]
pub struct FormData {
    action: FormAction,
    language: Option<String>,
    mode: Option<PracticeMode>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
enum FormAction {
    Language,
    Mode,
    Back,
    Flip,
    Known,
    Unknown,
    Keep,
    Remove,
    Exit,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Response {
    let result = {
        let mut controller = state.controller.lock().unwrap();
        apply(&state.languages, &mut controller, form)
    };
    match result {
        Ok(Phase::Exit) => {
            if let Some(tx) = state.shutdown_tx.lock().unwrap().take() {
                let _ = tx.send(());
            }
            Html(page_template(render_goodbye()).into_string()).into_response()
        }
        Ok(_) => Redirect::to("/").into_response(),
        Err(e) => {
            log::debug!("Rejected request: {e}");
            let body = html! {
                div.menu {
                    h1 { "Something went wrong" }
                    p { (e.to_string()) }
                    a href="/" { "Continue" }
                }
            };
            (
                StatusCode::BAD_REQUEST,
                Html(page_template(body).into_string()),
            )
                .into_response()
        }
    }
}

/// Feed one form submission to the session. Returns the phase afterwards.
fn apply(
    languages: &[Language],
    controller: &mut SessionController,
    form: FormData,
) -> Fallible<Phase> {
    let now = Instant::now();
    // Let timers that came due since the last event run first.
    controller.poll(now);
    match form.action {
        FormAction::Language => {
            let Some(name) = form.language else {
                return fail("no language given.");
            };
            let language = Language::try_from(name)?;
            if !languages.contains(&language) {
                return fail(format!("unknown language: {language}."));
            }
            controller.select_language(language)?;
        }
        FormAction::Mode => {
            let Some(mode) = form.mode else {
                return fail("no practice mode given.");
            };
            controller.select_mode(mode, now)?;
        }
        FormAction::Back => controller.back()?,
        FormAction::Flip => controller.flip()?,
        FormAction::Known => controller.perform(Action::MarkKnown, now)?,
        FormAction::Unknown => controller.perform(Action::MarkUnknown, now)?,
        FormAction::Keep => controller.perform(Action::Keep, now)?,
        FormAction::Remove => controller.perform(Action::Remove, now)?,
        FormAction::Exit => controller.exit(),
    }
    Ok(controller.phase())
}
