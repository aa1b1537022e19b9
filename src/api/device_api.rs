use crate::api::DeviceGet;
use crate::api::domain::{DevicesResponse, InstallationsResponse, PushAppRequest};
use crate::domain::Installation;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{error, instrument};

/// The `/v0/devices` API, shared by Tronbyt servers and the Tidbyt cloud.
#[derive(Debug, Clone)]
pub struct DeviceApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl DeviceApi {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        DeviceApi {
            client,
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Authenticates every request with its own bearer token instead of the client defaults.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[instrument(skip(self))]
    pub async fn devices(&self) -> Result<Vec<DeviceGet>, ApiError> {
        let response = send(self.request(Method::GET, "/v0/devices")).await?;
        Ok(response.json::<DevicesResponse>().await?.devices)
    }

    #[instrument(skip(self))]
    pub async fn device(&self, device_id: &str) -> Result<DeviceGet, ApiError> {
        let response = send(self.request(Method::GET, &format!("/v0/devices/{}", device_id))).await?;
        Ok(response.json::<DeviceGet>().await?)
    }

    #[instrument(skip(self))]
    pub async fn installations(&self, device_id: &str) -> Result<Vec<Installation>, ApiError> {
        let response = send(self.request(Method::GET, &format!("/v0/devices/{}/installations", device_id))).await?;
        Ok(response.json::<InstallationsResponse>().await?.installations)
    }

    /// Patches a device. Servers that answer without a body yield an empty device.
    #[instrument(skip(self))]
    pub async fn patch_device(&self, device_id: &str, patch: &Map<String, Value>) -> Result<DeviceGet, ApiError> {
        let request = self.request(Method::PATCH, &format!("/v0/devices/{}", device_id)).json(patch);
        let body = send(request).await?.text().await?;
        if body.trim().is_empty() {
            return Ok(DeviceGet::default());
        }

        Ok(serde_json::from_str::<DeviceGet>(&body)?)
    }

    /// Patches a device and only checks the status, whatever the body holds.
    #[instrument(skip(self))]
    pub async fn update_device(&self, device_id: &str, patch: &Map<String, Value>) -> Result<(), ApiError> {
        send(self.request(Method::PATCH, &format!("/v0/devices/{}", device_id)).json(patch)).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn patch_installation(&self, device_id: &str, installation_id: &str, patch: &Map<String, Value>) -> Result<Installation, ApiError> {
        let path = format!("/v0/devices/{}/installations/{}", device_id, installation_id);
        let response = send(self.request(Method::PATCH, &path).json(patch)).await?;
        Ok(response.json::<Installation>().await?)
    }

    #[instrument(skip(self, push))]
    pub async fn push_app(&self, device_id: &str, push: &PushAppRequest<'_>) -> Result<(), ApiError> {
        let request = self.request(Method::POST, &format!("/v0/devices/{}/push_app", device_id)).json(push);
        send(request).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_installation(&self, device_id: &str, installation_id: &str) -> Result<(), ApiError> {
        let path = format!("/v0/devices/{}/installations/{}", device_id, installation_id);
        send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.client.request(method, format!("{}{}", self.base_url, path)).header(ACCEPT, "application/json");
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
    let response = request.send().await?;
    let status = response.status();
    if status != StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        error!(status_code = %status, "❌ Request failed. Response: {}", body);
        return Err(ApiError::Status { status, body });
    }

    Ok(response)
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("could not decode the response: {0}")]
    Decode(#[from] serde_json::Error),
}
