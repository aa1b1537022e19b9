use crate::domain::commands::Command;
use crate::services::{ServiceError, Services, Targets, validate_content_id};
use serde_json::{Map, Value};
use tracing::instrument;

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum InstallationAction {
    Enable,
    Disable,
    Pin,
    Unpin,
}

impl InstallationAction {
    fn patch(&self) -> Map<String, Value> {
        let (key, value) = match self {
            InstallationAction::Enable => ("set_enabled", true),
            InstallationAction::Disable => ("set_enabled", false),
            InstallationAction::Pin => ("set_pinned", true),
            InstallationAction::Unpin => ("set_pinned", false),
        };

        let mut patch = Map::new();
        patch.insert(key.to_string(), Value::Bool(value));
        patch
    }
}

impl Services {
    /// Enables, disables, pins or unpins any installation on the target devices.
    #[instrument(skip(self))]
    pub async fn update_installation(&self, targets: &Targets, content_id: &str, action: InstallationAction) -> Result<(), ServiceError> {
        validate_content_id(content_id)?;

        for device in self.resolve(targets)? {
            self.ensure_installed(&device, content_id, false).await?;
            self.execute(Command::UpdateInstallation {
                device,
                installation_id: content_id.to_string(),
                patch: action.patch(),
            })
            .await?;
        }

        self.coordinator.request_refresh().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{mock_tronbyt_server, tronbyt_services};
    use mockito::Matcher;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(InstallationAction::Enable, json!({ "set_enabled": true }))]
    #[case(InstallationAction::Disable, json!({ "set_enabled": false }))]
    #[case(InstallationAction::Pin, json!({ "set_pinned": true }))]
    #[case(InstallationAction::Unpin, json!({ "set_pinned": false }))]
    fn builds_the_installation_patch(#[case] action: InstallationAction, #[case] expected: Value) {
        assert_eq!(Value::Object(action.patch()), expected);
    }

    #[test_log::test(tokio::test)]
    async fn pins_an_installed_app() -> Result<(), ServiceError> {
        let mut server = mockito::Server::new_async().await;
        mock_tronbyt_server(&mut server).await;
        let services = tronbyt_services(server.url()).await;
        let patch_mock = server
            .mock("PATCH", "/v0/devices/dev1/installations/477")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "477", "appID": "Custom Clock", "enabled": true, "pinned": true}"#)
            .match_body(Matcher::Json(json!({ "set_pinned": true })))
            .create_async()
            .await;

        let targets = Targets {
            device_ids: vec!["dev1".to_string()],
            device_names: vec!["Living Room".to_string()],
        };
        services.update_installation(&targets, "477", InstallationAction::Pin).await?;

        patch_mock.assert_async().await;

        Ok(())
    }

    #[tokio::test]
    async fn rejects_an_unknown_installation() {
        let mut server = mockito::Server::new_async().await;
        mock_tronbyt_server(&mut server).await;
        let services = tronbyt_services(server.url()).await;

        let result = services
            .update_installation(&Targets::by_name(vec!["dev2".to_string()]), "999", InstallationAction::Enable)
            .await;

        assert!(matches!(result, Err(ServiceError::NotInstalled { device, installed }) if device == "dev2" && installed == vec!["477", "217", "alert1"]));
    }
}
