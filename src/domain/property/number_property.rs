use crate::domain::property::{Property, PropertyError, PropertyType};
use crate::domain::property_value::PropertyValue;
use serde_json::Value;

#[derive(PartialEq, Debug)]
pub struct NumberProperty {
    name: String,
    property_type: PropertyType,
    readonly: bool,
    unit: Unit,
    value: Option<i64>,
    minimum: i64,
    maximum: i64,
    // Value sent when a light is turned on without a known value
    turn_on_value: Option<i64>,
}

impl NumberProperty {
    pub fn builder(name: String, property_type: PropertyType, readonly: bool) -> NumberPropertyBuilder {
        NumberPropertyBuilder::new(name, property_type, readonly)
    }

    /// A number with a turn on value behaves like a dimmable light.
    pub fn is_light(&self) -> bool {
        self.turn_on_value.is_some()
    }

    pub fn validate_value(&self, value: i64) -> ValidatedValue {
        if self.readonly {
            return ValidatedValue::Invalid(PropertyError::ReadOnly);
        }

        if value < self.minimum {
            return ValidatedValue::Clamped(self.minimum, PropertyError::ValueTooSmall);
        }

        if value > self.maximum {
            return ValidatedValue::Clamped(self.maximum, PropertyError::ValueTooLarge);
        }

        ValidatedValue::Valid(value)
    }
}

#[derive(PartialEq, Debug)]
pub enum ValidatedValue {
    Valid(i64),
    Clamped(i64, PropertyError),
    Invalid(PropertyError),
}

impl Property for NumberProperty {
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
        match self.value {
            Some(value) => format!("{}{}", value, self.unit.symbol()),
            None => "unknown".to_string(),
        }
    }

    fn parse_value(&self, raw: &str) -> Result<PropertyValue, PropertyError> {
        let trimmed = raw.trim();
        if self.is_light() {
            match trimmed.to_lowercase().as_str() {
                "on" => return Ok(PropertyValue::TurnOn),
                "off" => return Ok(PropertyValue::TurnOff),
                _ => {}
            }
        }

        trimmed
            .parse::<i64>()
            .map(PropertyValue::SetNumberValue)
            .map_err(|e| PropertyError::invalid(self, raw, e.to_string()))
    }

    fn resolve(&self, value: &PropertyValue) -> Result<Value, PropertyError> {
        let requested = match (value, self.turn_on_value) {
            (PropertyValue::SetNumberValue(value), _) => *value,
            (PropertyValue::TurnOn, Some(turn_on_value)) => self.value.filter(|value| *value > 0).unwrap_or(turn_on_value),
            (PropertyValue::TurnOff, Some(_)) => self.minimum,
            _ => return Err(PropertyError::unsupported(self, value)),
        };

        match self.validate_value(requested) {
            ValidatedValue::Valid(value) | ValidatedValue::Clamped(value, _) => Ok(Value::from(value)),
            ValidatedValue::Invalid(err) => Err(err),
        }
    }
}

pub struct NumberPropertyBuilder {
    name: String,
    property_type: PropertyType,
    readonly: bool,
    unit: Unit,
    value: Option<i64>,
    minimum: i64,
    maximum: i64,
    turn_on_value: Option<i64>,
}

impl NumberPropertyBuilder {
    pub fn new(name: String, property_type: PropertyType, readonly: bool) -> Self {
        NumberPropertyBuilder {
            name,
            property_type,
            readonly,
            unit: Unit::Percentage,
            value: None,
            minimum: 0,
            maximum: 100,
            turn_on_value: None,
        }
    }

    pub fn unit(mut self, value: Unit) -> Self {
        self.unit = value;
        self
    }

    pub fn value(mut self, value: Option<u64>, minimum: i64, maximum: i64) -> Self {
        self.value = value.map(|v| v.min(i64::MAX as u64) as i64);
        self.minimum = minimum;
        self.maximum = maximum;
        self
    }

    pub fn turn_on_value(mut self, value: i64) -> Self {
        self.turn_on_value = Some(value);
        self
    }

    pub fn build(self) -> NumberProperty {
        NumberProperty {
            name: self.name,
            property_type: self.property_type,
            readonly: self.readonly,
            unit: self.unit,
            value: self.value,
            minimum: self.minimum,
            maximum: self.maximum,
            turn_on_value: self.turn_on_value,
        }
    }
}

#[derive(PartialEq, Debug)]
pub enum Unit {
    Percentage,
    Seconds,
}

impl Unit {
    pub fn symbol(&self) -> &str {
        match self {
            Unit::Percentage => "%",
            Unit::Seconds => "s",
        }
    }
}
