use crate::domain::commands::{Command, ContentType, PublishType, PushApp, TextType};
use crate::services::{ServiceError, Services, Targets, parse_arguments};
use std::collections::BTreeMap;
use tracing::instrument;

const DEFAULT_LANG: &str = "en";

/// Renders a built-in app or a custom .star file on the target devices.
#[derive(Debug, Clone)]
pub struct PushRequest {
    pub targets: Targets,
    pub content_type: ContentType,
    pub content: Option<String>,
    pub custom_content: Option<String>,
    pub content_id: Option<String>,
    pub publish_type: Option<PublishType>,
    pub arguments: Option<String>,
    pub lang: Option<String>,
}

/// Shows a scrolling or titled text on the target devices.
#[derive(Debug, Clone)]
pub struct TextRequest {
    pub targets: Targets,
    pub text_type: TextType,
    pub content: String,
    pub font: String,
    pub color: String,
    pub title: Option<String>,
    pub title_color: Option<String>,
    pub title_font: Option<String>,
    pub content_id: Option<String>,
    pub publish_type: Option<PublishType>,
}

impl PushRequest {
    fn into_push_app(self) -> Result<PushApp, ServiceError> {
        let mut config = parse_arguments(self.arguments.as_deref().unwrap_or_default())?;
        let app_id = match self.content_type {
            ContentType::Builtin => {
                config.insert("lang".to_string(), self.lang.unwrap_or_else(|| DEFAULT_LANG.to_string()));
                self.content.ok_or(ServiceError::MissingContent("content"))?
            }
            ContentType::Custom => self.custom_content.ok_or(ServiceError::MissingContent("custom_content"))?,
        };

        Ok(PushApp {
            app_id,
            installation_id: self.content_id.unwrap_or_default(),
            content_type: self.content_type,
            text_type: None,
            publish: self.publish_type,
            config,
        })
    }
}

impl TextRequest {
    fn into_push_app(self) -> PushApp {
        let config = BTreeMap::from([
            ("content".to_string(), self.content),
            ("font".to_string(), self.font),
            ("color".to_string(), self.color),
            ("title".to_string(), self.title.unwrap_or_default()),
            ("titlecolor".to_string(), self.title_color.unwrap_or_default()),
            ("titlefont".to_string(), self.title_font.unwrap_or_default()),
        ]);

        PushApp {
            app_id: format!("text-{}", self.text_type),
            installation_id: self.content_id.unwrap_or_default(),
            content_type: ContentType::Builtin,
            text_type: Some(self.text_type),
            publish: self.publish_type,
            config,
        }
    }
}

impl Services {
    #[instrument(skip(self))]
    pub async fn push(&self, request: PushRequest) -> Result<(), ServiceError> {
        let targets = request.targets.clone();
        let push = request.into_push_app()?;
        self.push_to_targets(&targets, push).await
    }

    #[instrument(skip(self))]
    pub async fn text(&self, request: TextRequest) -> Result<(), ServiceError> {
        let targets = request.targets.clone();
        self.push_to_targets(&targets, request.into_push_app()).await
    }

    async fn push_to_targets(&self, targets: &Targets, push: PushApp) -> Result<(), ServiceError> {
        for device in self.resolve(targets)? {
            self.execute(Command::PushApp { device, push: push.clone() }).await?;
        }

        self.coordinator.request_refresh().await;
        Ok(())
    }
}
