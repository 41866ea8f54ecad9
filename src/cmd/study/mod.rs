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

mod get;
mod post;
pub mod server;
mod state;
mod template;

#[cfg(test)]
mod tests {
    use std::fs::read_to_string;
    use std::path::PathBuf;

    use flashy_core::error::ErrorReport;
    use flashy_core::error::Fallible;
    use portpicker::pick_unused_port;
    use reqwest::StatusCode;
    use tokio::spawn;

    use crate::cmd::study::server::ServerConfig;
    use crate::cmd::study::server::start_server;
    use crate::helper::create_tmp_collection;
    use crate::utils::wait_for_server;

    const TEST_HOST: &str = "127.0.0.1";

    fn config(directory: &PathBuf, port: u16) -> ServerConfig {
        ServerConfig {
            directory: Some(directory.display().to_string()),
            host: TEST_HOST.to_string(),
            port,
            seed: Some(1),
        }
    }

    async fn post(port: u16, form: &[(&str, &str)]) -> Fallible<(StatusCode, String)> {
        let response = reqwest::Client::new()
            .post(format!("http://{TEST_HOST}:{port}/"))
            .form(form)
            .send()
            .await
            .map_err(|e| ErrorReport::new(e.to_string()))?;
        let status = response.status();
        let html = response
            .text()
            .await
            .map_err(|e| ErrorReport::new(e.to_string()))?;
        Ok((status, html))
    }

    async fn get(port: u16, path: &str) -> Fallible<reqwest::Response> {
        reqwest::get(format!("http://{TEST_HOST}:{port}{path}"))
            .await
            .map_err(|e| ErrorReport::new(e.to_string()))
    }

    #[tokio::test]
    async fn test_start_server_on_non_existent_directory() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let config = ServerConfig {
            directory: Some("./derpherp".to_string()),
            host: TEST_HOST.to_string(),
            port,
            seed: None,
        };
        let result = start_server(config).await;
        assert!(result.is_err());
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "error: directory does not exist.");
        Ok(())
    }

    #[tokio::test]
    async fn test_static_endpoints() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let directory = create_tmp_collection(&[])?;
        spawn(start_server(config(&directory, port)));
        wait_for_server(TEST_HOST, port).await?;

        let response = get(port, "/style.css").await?;
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        let response = get(port, "/script.js").await?;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/javascript"
        );

        let response = get(port, "/herp-derp").await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn test_e2e() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let directory = create_tmp_collection(&[(
            "spanish_words.csv",
            "Spanish,English\nhola,hello\n",
        )])?;
        let server = spawn(start_server(config(&directory, port)));
        wait_for_server(TEST_HOST, port).await?;

        // The language menu.
        let response = get(port, "/").await?;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
        let html = response.text().await.unwrap();
        assert!(html.contains("Select a language"));
        assert!(html.contains("Spanish"));
        assert!(html.contains("Japanese"));

        // Pick a language.
        let (status, html) = post(port, &[("action", "Language"), ("language", "Spanish")]).await?;
        assert!(status.is_success());
        assert!(html.contains("Choose practice mode"));

        // Nothing is known yet.
        let (status, html) = post(port, &[("action", "Mode"), ("mode", "words_known")]).await?;
        assert!(status.is_success());
        assert!(html.contains("No known words available."));
        assert!(html.contains("Choose practice mode"));

        // The notification is shown once.
        let html = get(port, "/").await?.text().await.unwrap();
        assert!(!html.contains("No known words available."));

        // Practice all words.
        let (status, html) = post(port, &[("action", "Mode"), ("mode", "all_words")]).await?;
        assert!(status.is_success());
        assert!(html.contains("hola"));
        assert!(html.contains("Answer in:"));
        assert!(html.contains("Known"));
        assert!(html.contains("Unknown"));

        let countdown: serde_json::Value =
            serde_json::from_str(&get(port, "/countdown").await?.text().await.unwrap())
                .unwrap();
        assert_eq!(countdown["active"], true);
        assert_eq!(countdown["revealed"], false);
        assert!(countdown["remaining_seconds"].as_u64().unwrap() <= 15);

        // Flip the card.
        let (status, html) = post(port, &[("action", "Flip")]).await?;
        assert!(status.is_success());
        assert!(html.contains("English"));
        assert!(html.contains("hello"));

        // Known/keep actions of the wrong mode are rejected.
        let (status, _) = post(port, &[("action", "Keep")]).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // Mark the only card known.
        let (status, html) = post(port, &[("action", "Known")]).await?;
        assert!(status.is_success());
        assert!(html.contains("No more cards."));
        let known = read_to_string(directory.join("spanish_words_known.csv"))?;
        assert_eq!(known, "Spanish,English\nhola,hello\n");

        // Back to the mode menu, and now the known words can be practiced.
        let (status, _) = post(port, &[("action", "Back")]).await?;
        assert!(status.is_success());
        let (status, html) = post(port, &[("action", "Mode"), ("mode", "words_known")]).await?;
        assert!(status.is_success());
        assert!(html.contains("hola"));
        assert!(html.contains("Keep"));
        assert!(html.contains("Remove"));

        // Exit ends the session and stops the server.
        let (status, html) = post(port, &[("action", "Exit")]).await?;
        assert!(status.is_success());
        assert!(html.contains("Session ended"));
        server.await.unwrap()?;
        Ok(())
    }

    #[tokio::test]
    async fn test_out_of_order_requests_are_rejected() -> Fallible<()> {
        let port = pick_unused_port().unwrap();
        let directory = create_tmp_collection(&[(
            "spanish_words.csv",
            "Spanish,English\nhola,hello\n",
        )])?;
        spawn(start_server(config(&directory, port)));
        wait_for_server(TEST_HOST, port).await?;

        let (status, html) = post(port, &[("action", "Mode"), ("mode", "all_words")]).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(html.contains("cannot select a practice mode"));

        let (status, _) = post(port, &[("action", "Language"), ("language", "Klingon")]).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post(port, &[("action", "Known")]).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // The session is still on the language menu.
        let html = get(port, "/").await?.text().await.unwrap();
        assert!(html.contains("Select a language"));
        Ok(())
    }
}
