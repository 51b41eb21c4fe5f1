use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local, TimeZone};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

use zapflags_core::TimeFormat;

const ISO8601_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Record timestamp encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// Floating seconds since the Unix epoch, e.g. `1571234567.123456`
    Epoch,
    /// Local ISO-8601 time, e.g. `2019-10-16T14:02:47.123+0200`
    Iso8601,
}

impl From<TimeFormat> for Timestamp {
    fn from(format: TimeFormat) -> Self {
        match format {
            TimeFormat::Unix => Timestamp::Epoch,
            TimeFormat::Iso8601 => Timestamp::Iso8601,
        }
    }
}

pub fn format_epoch(time: SystemTime) -> String {
    // Clocks set before 1970 render as 0 rather than failing the record.
    let secs = time
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default();
    secs.to_string()
}

pub fn format_iso8601<Tz>(time: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    time.format(ISO8601_LAYOUT).to_string()
}

impl FormatTime for Timestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        match self {
            Timestamp::Epoch => w.write_str(&format_epoch(SystemTime::now())),
            Timestamp::Iso8601 => w.write_str(&format_iso8601(&Local::now())),
        }
    }
}
