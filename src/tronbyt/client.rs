use crate::api::DeviceApi;
use crate::app_config::Tronbyt;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use reqwest::{Client, header};
use thiserror::Error;

pub fn new_client(config: &Tronbyt) -> Result<Client, TronbytClientError> {
    let mut headers = header::HeaderMap::new();
    let mut authorization_value = HeaderValue::from_str(&format!("Bearer {}", config.token()))?;
    authorization_value.set_sensitive(true);
    headers.insert(AUTHORIZATION, authorization_value);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let client = Client::builder()
        .danger_accept_invalid_certs(!config.verify_ssl())
        .default_headers(headers)
        .build()?;
    Ok(client)
}

/// The device API of a Tronbyt server, authenticated through the client defaults.
pub fn new_api(config: &Tronbyt) -> Result<DeviceApi, TronbytClientError> {
    Ok(DeviceApi::new(new_client(config)?, config.url()))
}

#[derive(Error, Debug)]
pub enum TronbytClientError {
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Tronbyt client set an invalid header value: {0}")]
    InvalidHeaderValue(#[from] header::InvalidHeaderValue),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;

    #[tokio::test]
    async fn new_client_sets_the_bearer_token_header() -> Result<(), TronbytClientError> {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .match_header("authorization", "Bearer token")
            .match_header("accept", "application/json")
            .create_async()
            .await;

        let config = AppConfigBuilder::new().tronbyt_url(server.url()).build();
        let client = new_client(config.tronbyt().unwrap())?;

        client.get(format!("{}{}", server.url(), "/")).send().await?;

        // Verify that the call came in and that the headers are set
        mock.assert();

        Ok(())
    }

    #[test]
    fn new_client_rejects_a_token_that_is_not_a_header_value() {
        let config = AppConfigBuilder::new().tronbyt_token("line\nbreak").build();

        assert!(matches!(new_client(config.tronbyt().unwrap()), Err(TronbytClientError::InvalidHeaderValue(_))));
    }
}
