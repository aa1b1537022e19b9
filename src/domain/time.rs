use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Wall clock time with minute precision, as used by the night and dim mode schedules.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
}

impl Time {
    pub fn new(hour: u8, minute: u8) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::InvalidHour(hour.to_string()));
        }
        if minute > 59 {
            return Err(TimeError::InvalidMinute(minute.to_string()));
        }
        Ok(Time { hour, minute })
    }
}

// Accepts HH:MM and HH:MM:SS, the seconds are dropped.
impl FromStr for Time {
    type Err = TimeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = value.trim().split(':').collect();
        if parts.len() != 2 && parts.len() != 3 {
            return Err(TimeError::InvalidFormat(value.to_string()));
        }

        let hour: u8 = parts[0].parse().map_err(|_| TimeError::InvalidHour(parts[0].to_string()))?;

        if parts[1].len() != 2 {
            return Err(TimeError::InvalidMinute(parts[1].to_string()));
        }
        let minute: u8 = parts[1].parse().map_err(|_| TimeError::InvalidMinute(parts[1].to_string()))?;

        if let Some(second) = parts.get(2) {
            let second: u8 = second.parse().map_err(|_| TimeError::InvalidFormat(value.to_string()))?;
            if second > 59 {
                return Err(TimeError::InvalidFormat(value.to_string()));
            }
        }

        Time::new(hour, minute)
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Error, PartialEq, Debug)]
pub enum TimeError {
    #[error("'{0}' is not a time in HH:MM format")]
    InvalidFormat(String),
    #[error("'{0}' is not a valid hour between 0 and 23")]
    InvalidHour(String),
    #[error("'{0}' is not a valid minute between 0 and 59")]
    InvalidMinute(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("0:00", Time { hour: 0, minute: 0 })]
    #[case("07:45", Time { hour: 7, minute: 45 })]
    #[case("21:00", Time { hour: 21, minute: 0 })]
    #[case("23:59:30", Time { hour: 23, minute: 59 })]
    fn parses_a_valid_time(#[case] time: &str, #[case] expected: Time) {
        assert_eq!(time.parse::<Time>(), Ok(expected));
    }

    #[rstest]
    #[case::missing_colon("2200")]
    #[case::missing_minutes("20:")]
    #[case::invalid_hour("a0:00")]
    #[case::hour_too_large("24:00")]
    #[case::minutes_too_large("0:60")]
    #[case::minutes_too_short("23:5")]
    #[case::seconds_too_large("23:59:60")]
    #[case::too_many_parts("23:59:00:00")]
    fn fails_for_an_invalid_time(#[case] time: &str) {
        assert!(time.parse::<Time>().is_err());
    }

    #[test]
    fn formats_as_hours_and_minutes() {
        assert_eq!(Time { hour: 7, minute: 5 }.to_string(), "07:05");
    }
}
