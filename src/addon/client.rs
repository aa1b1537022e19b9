use crate::addon::{AddonApp, AddonPush};
use crate::app_config::Addon;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;
use tracing::{debug, info, instrument};

/// Client for the add-on that renders apps for Tidbyt devices.
#[derive(Debug, Clone)]
pub struct AddonClient {
    client: Client,
    url: String,
    ready_timeout: Duration,
    retry_interval: Duration,
}

impl AddonClient {
    pub fn new(client: Client, config: &Addon) -> Self {
        AddonClient {
            client,
            url: config.url(),
            ready_timeout: config.ready_timeout(),
            retry_interval: config.retry_interval(),
        }
    }

    /// Polls the add-on until it answers, giving up after the ready timeout.
    #[instrument(skip(self))]
    pub async fn wait_until_ready(&self) -> Result<(), AddonError> {
        info!("Waiting for the add-on at {}...", self.url);

        let attempts = (self.ready_timeout.as_millis() / self.retry_interval.as_millis().max(1)) as usize;
        let strategy = FixedInterval::new(self.retry_interval).take(attempts);

        Retry::spawn(strategy, || async move {
            self.apps().await.map(|_| ()).inspect_err(|e| debug!("Add-on is not ready yet: {}", e))
        })
        .await
        .map_err(|_| AddonError::NotReady {
            url: self.url.clone(),
            timeout: self.ready_timeout,
        })?;

        info!("Waiting for the add-on at {}... OK", self.url);
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn apps(&self) -> Result<Vec<AddonApp>, AddonError> {
        let response = self.client.get(format!("{}/apps", self.url)).send().await?;
        let response = check_status(response).await?;
        Ok(response.json::<Vec<AddonApp>>().await?)
    }

    #[instrument(skip(self, push), fields(device_id = push.deviceid))]
    pub async fn push(&self, push: &AddonPush<'_>) -> Result<(), AddonError> {
        let response = self.client.post(format!("{}/push", self.url)).json(push).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AddonError> {
    let status = response.status();
    if status != StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        return Err(AddonError::Status { status, body });
    }
    Ok(response)
}

#[derive(Error, Debug)]
pub enum AddonError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("add-on responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("add-on at {url} did not become ready within {timeout:?}")]
    NotReady { url: String, timeout: Duration },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use crate::domain::commands::{ContentType, PublishType, TextType};
    use mockito::Matcher;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn addon_client(url: &str) -> AddonClient {
        let config = AppConfigBuilder::new().addon(url).build();
        AddonClient::new(Client::new(), config.addon().unwrap())
    }

    #[tokio::test]
    async fn apps_lists_the_builtin_apps() -> Result<(), AddonError> {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/apps")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("../../tests/resources/addon_apps_response.json"))
            .create_async()
            .await;

        let apps = addon_client(&server.url()).apps().await?;

        assert_eq!(
            apps,
            vec![
                AddonApp {
                    label: "Clock".to_string(),
                    value: "clock".to_string(),
                },
                AddonApp {
                    label: "Weather".to_string(),
                    value: "weather".to_string(),
                },
            ]
        );

        Ok(())
    }

    #[test_log::test(tokio::test)]
    async fn wait_until_ready_succeeds_once_the_addon_answers() -> Result<(), AddonError> {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/apps").with_status(200).with_body("[]").create_async().await;

        addon_client(&server.url()).wait_until_ready().await
    }

    #[test_log::test(tokio::test)]
    async fn wait_until_ready_gives_up_after_the_timeout() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/apps").with_status(503).expect_at_least(2).create_async().await;

        let result = addon_client(&server.url()).wait_until_ready().await;

        assert!(matches!(result, Err(AddonError::NotReady { .. })));
    }

    #[tokio::test]
    async fn push_posts_the_render_request() -> Result<(), AddonError> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/push")
            .with_status(200)
            .match_body(Matcher::Json(json!({
                "content": "text-title",
                "contentid": "note",
                "contenttype": "builtin",
                "publishtype": "foreground",
                "token": "tidbyt-token",
                "deviceid": "kitchen",
                "starargs": { "content": "Hi" },
                "texttype": "title"
            })))
            .create_async()
            .await;

        let starargs = BTreeMap::from([("content".to_string(), "Hi".to_string())]);
        let push = AddonPush {
            content: "text-title",
            contentid: "note",
            contenttype: ContentType::Builtin,
            publishtype: Some(PublishType::Foreground),
            token: "tidbyt-token",
            deviceid: "kitchen",
            starargs: &starargs,
            texttype: Some(TextType::Title),
            base_url: None,
        };
        addon_client(&server.url()).push(&push).await?;

        mock.assert_async().await;

        Ok(())
    }

    #[tokio::test]
    async fn push_failure_carries_the_response() {
        let mut server = mockito::Server::new_async().await;
        server.mock("POST", "/push").with_status(500).with_body("render failed").create_async().await;

        let starargs = BTreeMap::new();
        let push = AddonPush {
            content: "clock",
            contentid: "",
            contenttype: ContentType::Builtin,
            publishtype: None,
            token: "tidbyt-token",
            deviceid: "kitchen",
            starargs: &starargs,
            texttype: None,
            base_url: None,
        };
        let result = addon_client(&server.url()).push(&push).await;

        assert!(matches!(result, Err(AddonError::Status { body, .. }) if body == "render failed"));
    }
}
