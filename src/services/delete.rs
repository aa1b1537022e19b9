use crate::domain::commands::Command;
use crate::services::{ServiceError, Services, Targets};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{error, instrument};

static CONTENT_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());

pub fn validate_content_id(content_id: &str) -> Result<(), ServiceError> {
    if CONTENT_ID_REGEX.is_match(content_id) {
        return Ok(());
    }

    error!("❌ {}", ServiceError::InvalidContentId);
    Err(ServiceError::InvalidContentId)
}

impl Services {
    /// Removes a pushed app from the target devices.
    #[instrument(skip(self))]
    pub async fn delete(&self, targets: &Targets, content_id: &str) -> Result<(), ServiceError> {
        validate_content_id(content_id)?;

        for device in self.resolve(targets)? {
            self.ensure_installed(&device, content_id, true).await?;
            self.execute(Command::DeleteInstallation {
                device,
                installation_id: content_id.to_string(),
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
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("alert1")]
    #[case("ABC123")]
    fn accepts_alphanumeric_content_ids(#[case] content_id: &str) {
        assert!(validate_content_id(content_id).is_ok());
    }

    #[rstest]
    #[case::empty("")]
    #[case::dash("my-app")]
    #[case::space("my app")]
    #[case::underscore("my_app")]
    fn rejects_other_content_ids(#[case] content_id: &str) {
        assert_eq!(
            validate_content_id(content_id).unwrap_err().to_string(),
            "Content ID must contain characters A-Z, a-z or 0-9"
        );
    }

    #[test_log::test(tokio::test)]
    async fn deletes_a_pushed_installation() -> Result<(), ServiceError> {
        let mut server = mockito::Server::new_async().await;
        mock_tronbyt_server(&mut server).await;
        let services = tronbyt_services(server.url()).await;
        let delete_mock = server
            .mock("DELETE", "/v0/devices/dev1/installations/alert1")
            .with_status(200)
            .create_async()
            .await;

        services.delete(&Targets::by_name(vec!["Living Room".to_string()]), "alert1").await?;

        delete_mock.assert_async().await;

        Ok(())
    }

    #[tokio::test]
    async fn only_pushed_installations_can_be_deleted() {
        let mut server = mockito::Server::new_async().await;
        mock_tronbyt_server(&mut server).await;
        let services = tronbyt_services(server.url()).await;
        let delete_mock = server
            .mock("DELETE", "/v0/devices/dev1/installations/477")
            .expect(0)
            .create_async()
            .await;

        let result = services.delete(&Targets::by_name(vec!["Living Room".to_string()]), "477").await;

        delete_mock.assert_async().await;
        assert_eq!(
            result.unwrap_err().to_string(),
            r#"The Content ID you entered is not an installed app on Living Room. Currently installed apps are: ["alert1"]"#
        );
    }
}
