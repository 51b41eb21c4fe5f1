use std::fmt;
use std::str::FromStr;

use crate::error::InvalidValue;
use crate::value::{parse_fresh, OptionValue};

/// Cell behind `--zap-sample`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleValue {
    sample: Option<bool>,
}

impl SampleValue {
    /// The value the user gave, if any.
    pub fn sample(&self) -> Option<bool> {
        self.sample
    }
}

/// Parse the usual command-line boolean spellings.
pub fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

impl OptionValue for SampleValue {
    fn set(&mut self, text: &str) -> Result<(), InvalidValue> {
        let sample = parse_bool(text).ok_or_else(|| InvalidValue::Bool(text.to_string()))?;
        self.sample = Some(sample);
        Ok(())
    }

    fn type_tag(&self) -> &'static str {
        "sample"
    }

    fn is_bool_flag(&self) -> bool {
        true
    }

    fn is_set(&self) -> bool {
        self.sample.is_some()
    }
}

impl fmt::Display for SampleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sample.unwrap_or(false))
    }
}

impl FromStr for SampleValue {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fresh(s)
    }
}
