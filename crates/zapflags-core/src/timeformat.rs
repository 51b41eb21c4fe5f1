use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidValue;
use crate::value::{parse_fresh, OptionValue};

/// Timestamp rendering selected with `--zap-timeformat`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFormat {
    /// Floating-point seconds since the Unix epoch
    #[default]
    Unix,
    /// ISO-8601 with milliseconds and UTC offset
    Iso8601,
}

impl TimeFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFormat::Unix => "unix",
            TimeFormat::Iso8601 => "iso8601",
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cell behind `--zap-timeformat`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeFormatValue {
    format: Option<TimeFormat>,
}

impl TimeFormatValue {
    pub fn format(&self) -> Option<TimeFormat> {
        self.format
    }
}

impl OptionValue for TimeFormatValue {
    fn set(&mut self, text: &str) -> Result<(), InvalidValue> {
        // Zero or one byte means "flag given, no real value": use unix.
        let format = if text.len() > 1 {
            match text {
                "unix" => TimeFormat::Unix,
                "iso8601" => TimeFormat::Iso8601,
                _ => return Err(InvalidValue::TimeFormat(text.to_string())),
            }
        } else {
            TimeFormat::Unix
        };
        self.format = Some(format);
        Ok(())
    }

    fn type_tag(&self) -> &'static str {
        "string"
    }

    fn is_bool_flag(&self) -> bool {
        false
    }

    fn is_set(&self) -> bool {
        self.format.is_some()
    }
}

impl fmt::Display for TimeFormatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format {
            Some(format) => format.fmt(f),
            None => Ok(()),
        }
    }
}

impl FromStr for TimeFormatValue {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fresh(s)
    }
}
