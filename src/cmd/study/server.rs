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
use std::time::Duration;
use std::time::Instant;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use flashy_core::error::Fallible;
use flashy_core::rng::TinyRng;
use flashy_core::scheduler::CountdownEvent;
use flashy_core::session::SessionController;
use tokio::net::TcpListener;
use tokio::select;
use tokio::signal;
use tokio::spawn;
use tokio::sync::oneshot::Receiver;
use tokio::sync::oneshot::channel;
use tokio::time::interval;

use crate::cmd::study::get::countdown_handler;
use crate::cmd::study::get::get_handler;
use crate::cmd::study::post::post_handler;
use crate::cmd::study::state::ServerState;
use crate::collection::Collection;
use crate::utils::CACHE_CONTROL_IMMUTABLE;

/// How often the timer task polls the session's countdown.
const TIMER_RESOLUTION: Duration = Duration::from_millis(250);

pub struct ServerConfig {
    pub directory: Option<String>,
    pub host: String,
    pub port: u16,
    /// Seed for card selection. By default the clock is used.
    pub seed: Option<u64>,
}

pub async fn start_server(config: ServerConfig) -> Fallible<()> {
    let Collection {
        directory,
        config: settings,
        store,
    } = Collection::new(config.directory)?;
    log::info!("Using data directory {}", directory.display());

    let rng = match config.seed {
        Some(seed) => TinyRng::from_seed(seed),
        None => TinyRng::from_clock(),
    };
    let controller = SessionController::new(store, settings.countdown_seconds, rng);

    // Create shutdown channel
    let (shutdown_tx, shutdown_rx) = channel();

    let state = ServerState {
        languages: settings.languages,
        controller: Arc::new(Mutex::new(controller)),
        shutdown_tx: Arc::new(Mutex::new(Some(shutdown_tx))),
    };
    let timers = spawn(run_timers(state.controller.clone()));

    let app = Router::new();
    let app = app.route("/", get(get_handler));
    let app = app.route("/", post(post_handler));
    let app = app.route("/countdown", get(countdown_handler));
    let app = app.route("/script.js", get(script_handler));
    let app = app.route("/style.css", get(style_handler));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state.clone());
    let bind = format!("{}:{}", config.host, config.port);

    // Start the server with graceful shutdown on Ctrl+C or the exit button.
    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(bind).await?;
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_rx))
        .await;
    timers.abort();
    served?;
    Ok(())
}

/// The event loop's timer source: fires the countdown's due ticks.
async fn run_timers(controller: Arc<Mutex<SessionController>>) {
    let mut ticker = interval(TIMER_RESOLUTION);
    loop {
        ticker.tick().await;
        let Ok(mut session) = controller.lock() else {
            break;
        };
        for event in session.poll(Instant::now()) {
            if event == CountdownEvent::Reveal {
                log::debug!("Countdown elapsed, revealing card");
            }
        }
    }
}

async fn script_handler() -> (StatusCode, [(HeaderName, &'static str); 1], &'static str) {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/javascript")],
        include_str!("script.js"),
    )
}

async fn style_handler() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, CACHE_CONTROL_IMMUTABLE),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}

async fn shutdown_signal(shutdown_rx: Receiver<()>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    let shutdown = async {
        shutdown_rx.await.ok();
    };

    select! {
        _ = ctrl_c => {
            log::debug!("Received Ctrl+C, shutting down gracefully");
        },
        _ = shutdown => {
            log::debug!("Session ended, shutting down gracefully");
        },
    }
}
