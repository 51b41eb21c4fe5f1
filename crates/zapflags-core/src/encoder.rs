use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidValue;
use crate::value::{parse_fresh, OptionValue};

/// Output encoding selected with `--zap-encoder`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncoderChoice {
    /// One JSON object per record
    #[default]
    Json,
    /// Human-readable text
    Console,
}

impl EncoderChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            EncoderChoice::Json => "json",
            EncoderChoice::Console => "console",
        }
    }
}

impl fmt::Display for EncoderChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cell behind `--zap-encoder`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncoderValue {
    choice: Option<EncoderChoice>,
}

impl EncoderValue {
    /// The choice the user gave, if any.
    pub fn choice(&self) -> Option<EncoderChoice> {
        self.choice
    }
}

impl OptionValue for EncoderValue {
    fn set(&mut self, text: &str) -> Result<(), InvalidValue> {
        // Case-sensitive on purpose; "JSON" is rejected.
        let choice = match text {
            "json" => EncoderChoice::Json,
            "console" => EncoderChoice::Console,
            _ => return Err(InvalidValue::Encoder(text.to_string())),
        };
        self.choice = Some(choice);
        Ok(())
    }

    fn type_tag(&self) -> &'static str {
        "encoder"
    }

    fn is_set(&self) -> bool {
        self.choice.is_some()
    }
}

impl fmt::Display for EncoderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.choice {
            Some(choice) => choice.fmt(f),
            None => Ok(()),
        }
    }
}

impl FromStr for EncoderValue {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fresh(s)
    }
}
