use crate::domain::commands::{ContentType, PublishType, TextType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A built-in app the add-on can render.
#[derive(PartialEq, Debug, Clone, Deserialize)]
pub struct AddonApp {
    pub label: String,
    pub value: String,
}

/// Render request forwarded by the add-on to a Tidbyt device.
#[derive(PartialEq, Debug, Serialize)]
pub struct AddonPush<'a> {
    pub content: &'a str,
    pub contentid: &'a str,
    pub contenttype: ContentType,
    pub publishtype: Option<PublishType>,
    pub token: &'a str,
    pub deviceid: &'a str,
    pub starargs: &'a BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texttype: Option<TextType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<&'a str>,
}
