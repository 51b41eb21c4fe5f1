use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

use crate::error::InvalidValue;
use crate::value::{parse_fresh, OptionValue};

/// Severities more verbose than this escalate the legacy verbosity facility.
const ESCALATION_THRESHOLD: i8 = -3;

/// Signed log severity. More negative is more verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Severity(i8);

impl Severity {
    pub const DEBUG: Severity = Severity(-1);
    pub const INFO: Severity = Severity(0);
    pub const WARN: Severity = Severity(1);
    pub const ERROR: Severity = Severity(2);

    pub fn new(raw: i8) -> Self {
        Self(raw)
    }

    pub fn get(self) -> i8 {
        self.0
    }

    /// Threshold filter for `tracing`, which only knows five levels.
    pub fn level_filter(self) -> LevelFilter {
        match self.0 {
            i8::MIN..=-2 => LevelFilter::TRACE,
            -1 => LevelFilter::DEBUG,
            0 => LevelFilter::INFO,
            1 => LevelFilter::WARN,
            _ => LevelFilter::ERROR,
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::INFO
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Severity::DEBUG => f.write_str("debug"),
            Severity::INFO => f.write_str("info"),
            Severity::WARN => f.write_str("warn"),
            Severity::ERROR => f.write_str("error"),
            Severity(raw) if raw < 0 => write!(f, "{}", raw.unsigned_abs()),
            Severity(raw) => write!(f, "Level({})", raw),
        }
    }
}

/// Cell behind `--zap-level`.
///
/// Custom integer levels keep their full magnitude next to the severity,
/// which saturates at `i8::MIN` for filtering.
#[derive(Debug, Clone, Default)]
pub struct LevelValue {
    severity: Option<Severity>,
    magnitude: Option<u64>,
    // Text the severity was parsed from, kept for error reporting.
    raw: String,
}

impl PartialEq for LevelValue {
    fn eq(&self, other: &Self) -> bool {
        self.severity == other.severity && self.magnitude == other.magnitude
    }
}

impl Eq for LevelValue {}

impl LevelValue {
    pub fn severity(&self) -> Option<Severity> {
        self.severity
    }

    /// Pending legacy verbosity escalation implied by the parsed level.
    ///
    /// Only custom integer levels above 3 qualify; the named levels never do.
    pub fn escalation(&self) -> Option<u64> {
        let severity = self.severity?;
        if severity.0 < ESCALATION_THRESHOLD {
            self.magnitude
        } else {
            None
        }
    }

    /// The text given on the command line.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// Resolve level text into a severity.
///
/// Named levels map to their fixed severities; a positive integer `n` maps to
/// `-n`, saturating at `i8::MIN`. Zero, negative numbers and non-integers are
/// rejected.
pub fn parse_severity(text: &str) -> Result<Severity, InvalidValue> {
    parse_level(text).map(|(severity, _)| severity)
}

/// Severity plus the magnitude of a custom integer level.
fn parse_level(text: &str) -> Result<(Severity, Option<u64>), InvalidValue> {
    let lower = text.to_lowercase();
    match lower.as_str() {
        "debug" => return Ok((Severity::DEBUG, None)),
        "info" => return Ok((Severity::INFO, None)),
        "error" => return Ok((Severity::ERROR, None)),
        _ => {}
    }

    let invalid = || InvalidValue::Level(text.to_string());
    let n: i64 = lower.parse().map_err(|_| invalid())?;
    if n <= 0 {
        return Err(invalid());
    }
    let raw = i8::try_from(-n).unwrap_or(i8::MIN);
    Ok((Severity(raw), Some(n.unsigned_abs())))
}

impl OptionValue for LevelValue {
    fn set(&mut self, text: &str) -> Result<(), InvalidValue> {
        let (severity, magnitude) = parse_level(text)?;
        self.severity = Some(severity);
        self.magnitude = magnitude;
        self.raw = text.to_string();
        Ok(())
    }

    fn type_tag(&self) -> &'static str {
        "level"
    }

    fn is_set(&self) -> bool {
        self.severity.is_some()
    }
}

impl fmt::Display for LevelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.magnitude {
            Some(n) => write!(f, "{}", n),
            None => self.severity.unwrap_or_default().fmt(f),
        }
    }
}

impl FromStr for LevelValue {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_fresh(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(text: &str) -> Result<LevelValue, InvalidValue> {
        text.parse()
    }

    #[test]
    fn test_named_levels() {
        assert_eq!(level("debug").unwrap().severity(), Some(Severity(-1)));
        assert_eq!(level("info").unwrap().severity(), Some(Severity(0)));
        assert_eq!(level("error").unwrap().severity(), Some(Severity(2)));
    }

    #[test]
    fn test_named_levels_are_case_insensitive() {
        assert_eq!(level("DEBUG").unwrap().severity(), Some(Severity::DEBUG));
        assert_eq!(level("Error").unwrap().severity(), Some(Severity::ERROR));
    }

    #[test]
    fn test_custom_integer_level() {
        let value = level("5").unwrap();
        assert_eq!(value.severity(), Some(Severity(-5)));
        assert_eq!(value.escalation(), Some(5));
    }

    #[test]
    fn test_rejects_bad_levels() {
        for text in ["0", "-3", "abc", "", "warn", "1.5", "99999999999999999999"] {
            let err = level(text).unwrap_err();
            assert_eq!(err, InvalidValue::Level(text.to_string()), "{text}");
        }
    }

    #[test]
    fn test_large_custom_levels_saturate_severity() {
        for (text, n) in [("128", 128), ("129", 129), ("1000", 1000)] {
            let value = level(text).unwrap();
            assert_eq!(value.severity(), Some(Severity(i8::MIN)), "{text}");
            assert_eq!(value.escalation(), Some(n), "{text}");
            assert_eq!(value.to_string(), text);
        }
    }

    #[test]
    fn test_custom_levels_beyond_saturation_stay_distinct() {
        assert_ne!(level("129").unwrap(), level("1000").unwrap());
        assert_eq!(level("3000000000").unwrap().escalation(), Some(3_000_000_000));
    }

    #[test]
    fn test_escalation_boundary() {
        for text in ["1", "2", "3"] {
            assert_eq!(level(text).unwrap().escalation(), None, "{text}");
        }
        assert_eq!(level("4").unwrap().escalation(), Some(4));
    }

    #[test]
    fn test_named_levels_never_escalate() {
        for text in ["debug", "info", "error"] {
            assert_eq!(level(text).unwrap().escalation(), None);
        }
    }

    #[test]
    fn test_canonical_round_trip() {
        let texts = [
            "debug", "info", "error", "1", "2", "3", "4", "42", "1000", "ERROR", "Debug",
        ];
        for text in texts {
            let first = level(text).unwrap();
            let second = level(&first.to_string()).unwrap();
            assert_eq!(first, second, "{text}");
        }
        assert_eq!(level("ERROR").unwrap().to_string(), "error");
    }

    #[test]
    fn test_failed_set_keeps_previous_level() {
        let mut value = LevelValue::default();
        value.set("7").unwrap();
        assert!(value.set("nope").is_err());
        assert_eq!(value.severity(), Some(Severity(-7)));
        assert_eq!(value.raw(), "7");
    }

    #[test]
    fn test_unset_level_displays_info() {
        let value = LevelValue::default();
        assert!(!value.is_set());
        assert_eq!(value.to_string(), "info");
    }

    #[test]
    fn test_level_filter_mapping() {
        assert_eq!(Severity(-9).level_filter(), LevelFilter::TRACE);
        assert_eq!(Severity(-2).level_filter(), LevelFilter::TRACE);
        assert_eq!(Severity::DEBUG.level_filter(), LevelFilter::DEBUG);
        assert_eq!(Severity::INFO.level_filter(), LevelFilter::INFO);
        assert_eq!(Severity::WARN.level_filter(), LevelFilter::WARN);
        assert_eq!(Severity::ERROR.level_filter(), LevelFilter::ERROR);
        assert_eq!(Severity(5).level_filter(), LevelFilter::ERROR);
    }
}
