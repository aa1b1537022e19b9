use crate::domain::Installation;
use crate::domain::property::{Property, PropertyError, PropertyType};
use crate::domain::property_value::PropertyValue;
use serde_json::Value;
use std::collections::HashSet;

pub const NONE_OPTION: &str = "None";

/// Selects one of the installations of a device, or none.
#[derive(PartialEq, Debug)]
pub struct SelectProperty {
    name: String,
    property_type: PropertyType,
    readonly: bool,
    options: Vec<String>,
    current_option: String,
}

impl SelectProperty {
    pub fn from_installations(name: String, property_type: PropertyType, readonly: bool, installations: &[Installation], value: Option<&str>) -> Self {
        let mut seen = HashSet::new();
        let mut labels: Vec<String> = installations
            .iter()
            .filter(|installation| !installation.id.is_empty() && seen.insert(installation.id.as_str()))
            .map(Installation::label)
            .collect();
        labels.sort();

        let mut options = Vec::with_capacity(labels.len() + 1);
        options.push(NONE_OPTION.to_string());
        options.extend(labels);

        let current_option = match normalize_value(value) {
            None => NONE_OPTION.to_string(),
            Some(value) => installations
                .iter()
                .filter(|installation| !installation.id.is_empty())
                .find(|installation| installation.id == value || installation.app_id.as_deref() == Some(value))
                .map(Installation::label)
                .unwrap_or_else(|| value.to_string()),
        };

        SelectProperty {
            name,
            property_type,
            readonly,
            options,
            current_option,
        }
    }
}

/// Blank values and "none" in any case mean nothing is selected.
pub fn normalize_value(value: Option<&str>) -> Option<&str> {
    let trimmed = value?.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NONE_OPTION) {
        return None;
    }
    Some(trimmed)
}

impl Property for SelectProperty {
    fn name(&self) -> &str {
        &self.name
    }

    fn property_type(&self) -> PropertyType {
        self.property_type
    }

    fn readonly(&self) -> bool {
        self.readonly
    }

    fn external_id(&self) -> Option<&str> {
        None
    }

    fn value_string(&self) -> String {
        self.current_option.clone()
    }

    fn options(&self) -> Option<&[String]> {
        Some(&self.options)
    }

    fn parse_value(&self, raw: &str) -> Result<PropertyValue, PropertyError> {
        Ok(PropertyValue::SelectOption(raw.trim().to_string()))
    }

    fn resolve(&self, value: &PropertyValue) -> Result<Value, PropertyError> {
        if self.readonly {
            return Err(PropertyError::ReadOnly);
        }

        let PropertyValue::SelectOption(option) = value else {
            return Err(PropertyError::unsupported(self, value));
        };

        if !self.options.iter().any(|candidate| candidate == option) {
            return Err(PropertyError::UnknownOption {
                property: self.name.clone(),
                option: option.clone(),
                options: self.options.clone(),
            });
        }

        if option == NONE_OPTION {
            return Ok(Value::String(String::new()));
        }

        // Labels end with the installation id
        let installation_id = option.rsplit('-').next().unwrap_or(option).trim();
        Ok(Value::String(installation_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn installation(id: &str, app_id: Option<&str>) -> Installation {
        Installation {
            id: id.to_string(),
            app_id: app_id.map(str::to_string),
            enabled: Some(true),
            pinned: None,
        }
    }

    fn installations() -> Vec<Installation> {
        vec![
            installation("477", Some("Custom Clock")),
            installation("217", Some("Weather")),
            installation("999", None),
            installation("477", Some("Duplicate")),
            installation("", Some("Broken")),
        ]
    }

    fn property(value: Option<&str>) -> SelectProperty {
        SelectProperty::from_installations("pinned_app".to_string(), PropertyType::PinnedApp, false, &installations(), value)
    }

    #[test]
    fn options_start_with_none_followed_by_sorted_labels() {
        assert_eq!(property(None).options().unwrap(), ["None", "999", "Custom Clock-477", "Weather-217"]);
    }

    #[rstest]
    #[case(Some("477"), "Custom Clock-477")]
    #[case(Some("Weather"), "Weather-217")]
    #[case(Some(" none "), "None")]
    #[case(Some(""), "None")]
    #[case(None, "None")]
    #[case(Some("missing"), "missing")]
    fn current_option_matches_installation_id_or_app(#[case] value: Option<&str>, #[case] expected: &str) {
        assert_eq!(property(value).value_string(), expected);
    }

    #[test]
    fn selecting_an_option_sends_the_installation_id() {
        let result = property(None).resolve(&PropertyValue::SelectOption("Weather-217".to_string()));

        assert_eq!(result, Ok(Value::String("217".to_string())));
    }

    #[test]
    fn selecting_none_clears_the_value() {
        let result = property(Some("217")).resolve(&PropertyValue::SelectOption("None".to_string()));

        assert_eq!(result, Ok(Value::String(String::new())));
    }

    #[test]
    fn selecting_an_unknown_option_fails() {
        let result = property(None).resolve(&PropertyValue::SelectOption("Clock-1".to_string()));

        assert!(matches!(result, Err(PropertyError::UnknownOption { option, .. }) if option == "Clock-1"));
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some("  "), None)]
    #[case(Some("None"), None)]
    #[case(Some("Custom"), Some("Custom"))]
    fn normalizes_blank_values(#[case] value: Option<&str>, #[case] expected: Option<&str>) {
        assert_eq!(normalize_value(value), expected);
    }
}
