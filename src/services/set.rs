use crate::domain::commands::Command;
use crate::properties::map_properties;
use crate::services::{ServiceError, Services, Targets};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

impl Services {
    /// Writes a single property on the target devices. The raw value is parsed per property kind.
    #[instrument(skip(self))]
    pub async fn set_property(&self, targets: &Targets, property_name: &str, raw_value: &str) -> Result<(), ServiceError> {
        for device in self.resolve(targets)? {
            let value = map_properties(&device)
                .iter()
                .find(|property| property.name() == property_name)
                .ok_or_else(|| ServiceError::UnknownProperty {
                    device: device.name.clone(),
                    property: property_name.to_string(),
                })?
                .parse_value(raw_value)?;

            let property = Arc::new(HashMap::from([(property_name.to_string(), value)]));
            self.execute(Command::ControlDevice { device, property }).await?;
        }

        self.coordinator.request_refresh().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::property::PropertyError;
    use crate::services::test_support::{mock_tronbyt_server, tronbyt_services};
    use mockito::Matcher;
    use serde_json::json;

    #[test_log::test(tokio::test)]
    async fn sets_the_night_mode_start() -> Result<(), ServiceError> {
        let mut server = mockito::Server::new_async().await;
        mock_tronbyt_server(&mut server).await;
        let services = tronbyt_services(server.url()).await;
        let patch_mock = server
            .mock("PATCH", "/v0/devices/dev1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "dev1", "displayName": "Living Room"}"#)
            .match_body(Matcher::Json(json!({ "nightModeStartTime": "22:30" })))
            .create_async()
            .await;

        services
            .set_property(&Targets::by_name(vec!["Living Room".to_string()]), "night_mode_start", "22:30:00")
            .await?;

        patch_mock.assert_async().await;

        Ok(())
    }

    #[tokio::test]
    async fn rejects_an_unparsable_value() {
        let mut server = mockito::Server::new_async().await;
        mock_tronbyt_server(&mut server).await;
        let services = tronbyt_services(server.url()).await;

        let result = services
            .set_property(&Targets::by_name(vec!["Living Room".to_string()]), "interval", "often")
            .await;

        assert!(matches!(result, Err(ServiceError::Property(PropertyError::InvalidValue { .. }))));
    }

    #[tokio::test]
    async fn rejects_an_unknown_property() {
        let mut server = mockito::Server::new_async().await;
        mock_tronbyt_server(&mut server).await;
        let services = tronbyt_services(server.url()).await;

        let result = services
            .set_property(&Targets::by_name(vec!["Living Room".to_string()]), "auto_dim", "on")
            .await;

        assert!(matches!(result, Err(ServiceError::UnknownProperty { property, .. }) if property == "auto_dim"));
    }
}
