use crate::domain::property::{Property, PropertyError, PropertyType};
use crate::domain::property_value::PropertyValue;
use serde_json::Value;

#[derive(PartialEq, Debug)]
pub struct BooleanProperty {
    name: String,
    label: Option<String>,
    property_type: PropertyType,
    readonly: bool,
    external_id: Option<String>,
    value: Option<bool>,
}

impl BooleanProperty {
    pub fn new(name: String, property_type: PropertyType, readonly: bool, external_id: Option<String>, value: Option<bool>) -> Self {
        BooleanProperty {
            name,
            label: None,
            property_type,
            readonly,
            external_id,
            value,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Property for BooleanProperty {
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
        self.external_id.as_deref()
    }

    fn value_string(&self) -> String {
        match self.value {
            Some(true) => "on".to_string(),
            Some(false) => "off".to_string(),
            None => "unknown".to_string(),
        }
    }

    fn label(&self) -> String {
        self.label.clone().unwrap_or_else(|| self.name.clone())
    }

    fn parse_value(&self, raw: &str) -> Result<PropertyValue, PropertyError> {
        match raw.trim().to_lowercase().as_str() {
            "on" | "true" | "1" => Ok(PropertyValue::SetBooleanValue(true)),
            "off" | "false" | "0" => Ok(PropertyValue::SetBooleanValue(false)),
            "toggle" => Ok(PropertyValue::ToggleBooleanValue),
            _ => Err(PropertyError::invalid(self, raw, "expected on, off or toggle")),
        }
    }

    fn resolve(&self, value: &PropertyValue) -> Result<Value, PropertyError> {
        if self.readonly {
            return Err(PropertyError::ReadOnly);
        }

        match value {
            PropertyValue::SetBooleanValue(value) => Ok(Value::Bool(*value)),
            PropertyValue::TurnOn => Ok(Value::Bool(true)),
            PropertyValue::TurnOff => Ok(Value::Bool(false)),
            PropertyValue::ToggleBooleanValue => Ok(Value::Bool(!self.value.unwrap_or(false))),
            _ => Err(PropertyError::unsupported(self, value)),
        }
    }
}
