use crate::domain::Time;
use crate::domain::property::{Property, PropertyError, PropertyType};
use crate::domain::property_value::PropertyValue;
use serde_json::Value;

#[derive(PartialEq, Debug)]
pub struct TimeProperty {
    name: String,
    property_type: PropertyType,
    readonly: bool,
    value: Option<Time>,
}

impl TimeProperty {
    /// Unparsable raw values are treated as unset.
    pub fn new(name: String, property_type: PropertyType, readonly: bool, raw_value: Option<&str>) -> Self {
        TimeProperty {
            name,
            property_type,
            readonly,
            value: raw_value.and_then(|raw| raw.parse::<Time>().ok()),
        }
    }
}

impl Property for TimeProperty {
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
        self.value.map(|time| time.to_string()).unwrap_or_else(|| "unset".to_string())
    }

    fn parse_value(&self, raw: &str) -> Result<PropertyValue, PropertyError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            return Ok(PropertyValue::SetTimeValue(None));
        }

        trimmed
            .parse::<Time>()
            .map(|time| PropertyValue::SetTimeValue(Some(time)))
            .map_err(|e| PropertyError::invalid(self, raw, e.to_string()))
    }

    fn resolve(&self, value: &PropertyValue) -> Result<Value, PropertyError> {
        if self.readonly {
            return Err(PropertyError::ReadOnly);
        }

        match value {
            PropertyValue::SetTimeValue(Some(time)) => Ok(Value::String(time.to_string())),
            PropertyValue::SetTimeValue(None) => Ok(Value::String(String::new())),
            _ => Err(PropertyError::unsupported(self, value)),
        }
    }
}
