use reqwest::{redirect, Client};

use crate::config::AnalyzerConfig;
use crate::error::{AppError, Result};

/// Build the client shared by the page fetch and the link checks of one
/// analysis: identifying user agent, per-request timeout, redirects followed.
pub fn create_client(config: &AnalyzerConfig) -> Result<Client> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.request_timeout())
        .redirect(redirect::Policy::limited(config.max_redirects))
        .build()
        .map_err(|e| AppError::Http(format!("failed to build HTTP client: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn client_sends_configured_user_agent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("user-agent", "UnitBot/0.1")
            .with_status(200)
            .create_async()
            .await;

        let config = AnalyzerConfig {
            user_agent: "UnitBot/0.1".to_string(),
            ..Default::default()
        };
        let client = create_client(&config).unwrap();
        let status = client.get(server.url()).send().await.unwrap().status();

        assert_eq!(status.as_u16(), 200);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn client_follows_redirects() {
        let mut server = mockito::Server::new_async().await;
        let _moved = server
            .mock("GET", "/old")
            .with_status(301)
            .with_header("location", "/new")
            .create_async()
            .await;
        let _target = server
            .mock("GET", "/new")
            .with_status(200)
            .with_body("landed")
            .create_async()
            .await;

        let client = create_client(&AnalyzerConfig::default()).unwrap();
        let response = client
            .get(format!("{}/old", server.url()))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 200);
        assert!(response.url().path().ends_with("/new"));
    }
}
