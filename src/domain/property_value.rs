use crate::domain::Time;

#[derive(Clone, PartialEq, Debug)]
pub enum PropertyValue {
    SetBooleanValue(bool),
    ToggleBooleanValue,
    SetNumberValue(i64),
    TurnOn,
    TurnOff,
    SetTimeValue(Option<Time>),
    SelectOption(String),
}
