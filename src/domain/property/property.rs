use crate::domain::property_value::PropertyValue;
use serde_json::Value;
use std::fmt::Debug;
use thiserror::Error;

pub trait Property: Debug + Send + Sync {
    fn name(&self) -> &str;
    fn property_type(&self) -> PropertyType;
    fn readonly(&self) -> bool;
    fn external_id(&self) -> Option<&str>;
    fn value_string(&self) -> String;

    /// Human readable name, defaults to the property name.
    fn label(&self) -> String {
        self.name().to_string()
    }

    /// The values a property can be set to, when limited to a fixed list.
    fn options(&self) -> Option<&[String]> {
        None
    }

    /// Parses user input, e.g. from the command line, into a value for this property.
    fn parse_value(&self, raw: &str) -> Result<PropertyValue, PropertyError>;

    /// Resolves a requested value into the JSON value sent to the device API.
    fn resolve(&self, value: &PropertyValue) -> Result<Value, PropertyError>;
}

// Semantic property type
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum PropertyType {
    Brightness,
    NightModeBrightness,
    Interval,
    NightMode,
    AutoDim,
    InstallationEnabled,
    NightModeStart,
    NightModeEnd,
    DimModeStart,
    NightModeApp,
    PinnedApp,
}

/// Where a property write ends up in the device API.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum PatchTarget {
    Device(&'static [&'static str]),
    Installation(&'static str),
}

impl PropertyType {
    pub fn patch_target(&self) -> PatchTarget {
        match self {
            PropertyType::Brightness => PatchTarget::Device(&["brightness"]),
            PropertyType::NightModeBrightness => PatchTarget::Device(&["nightModeBrightness"]),
            PropertyType::Interval => PatchTarget::Device(&["intervalSec"]),
            // Older servers only know the auto dim flag
            PropertyType::NightMode => PatchTarget::Device(&["nightModeEnabled", "autoDim"]),
            PropertyType::AutoDim => PatchTarget::Device(&["autoDim"]),
            PropertyType::InstallationEnabled => PatchTarget::Installation("set_enabled"),
            PropertyType::NightModeStart => PatchTarget::Device(&["nightModeStartTime"]),
            PropertyType::NightModeEnd => PatchTarget::Device(&["nightModeEndTime"]),
            PropertyType::DimModeStart => PatchTarget::Device(&["dimModeStartTime"]),
            PropertyType::NightModeApp => PatchTarget::Device(&["nightModeApp"]),
            PropertyType::PinnedApp => PatchTarget::Device(&["pinnedApp"]),
        }
    }
}

#[derive(Error, PartialEq, Debug)]
pub enum PropertyError {
    #[error("property is read only")]
    ReadOnly,
    #[error("'{property}' does not accept {value}")]
    UnsupportedValue { property: String, value: String },
    #[error("'{raw}' is not a valid value for '{property}': {reason}")]
    InvalidValue { property: String, raw: String, reason: String },
    #[error("'{option}' is not an option of '{property}', valid options are {options:?}")]
    UnknownOption {
        property: String,
        option: String,
        options: Vec<String>,
    },
    #[error("value is smaller than the minimum")]
    ValueTooSmall,
    #[error("value is larger than the maximum")]
    ValueTooLarge,
}

impl PropertyError {
    pub(super) fn unsupported(property: &dyn Property, value: &PropertyValue) -> Self {
        PropertyError::UnsupportedValue {
            property: property.name().to_string(),
            value: format!("{:?}", value),
        }
    }

    pub(super) fn invalid(property: &dyn Property, raw: &str, reason: impl Into<String>) -> Self {
        PropertyError::InvalidValue {
            property: property.name().to_string(),
            raw: raw.to_string(),
            reason: reason.into(),
        }
    }
}
