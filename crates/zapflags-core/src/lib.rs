//! # zapflags-core
//!
//! Command-line option cells for configuring a structured logger.
//!
//! Each flag is backed by a small cell that validates its own text and
//! remembers whether it was given. The cells are collected in
//! [`ZapOptions`], a clap flag group that applications flatten into their
//! own parser.
//!
//! ## Key Types
//!
//! - [`OptionValue`] - Shared `set`/display/type-tag capability
//! - [`EncoderValue`], [`LevelValue`], [`SampleValue`], [`TimeFormatValue`] - One cell per flag
//! - [`Severity`] - Signed log severity, mapped onto `tracing` levels
//! - [`ZapOptions`] - The `zap` flag group
//! - [`InvalidValue`] - The single parse error kind
//!
//! ## Flags
//!
//! - `--zap-devel` - Console encoder, debug level, no sampling
//! - `--zap-encoder` - `json` or `console`
//! - `--zap-level` - `debug`, `info`, `error` or an integer > 0
//! - `--zap-sample` - Enable sampling
//! - `--zap-timeformat` - `unix` or `iso8601`

mod encoder;
mod error;
mod level;
mod options;
mod sample;
mod timeformat;
mod value;
pub mod verbosity;

pub use encoder::{EncoderChoice, EncoderValue};
pub use error::{InvalidValue, VerbosityError};
pub use level::{parse_severity, LevelValue, Severity};
pub use options::{
    ZapOptions, DEVEL_FLAG, ENCODER_FLAG, FLAG_GROUP, LEVEL_FLAG, SAMPLE_FLAG, TIMEFORMAT_FLAG,
};
pub use sample::{parse_bool, SampleValue};
pub use timeformat::{TimeFormat, TimeFormatValue};
pub use value::OptionValue;
pub use verbosity::{LegacyVerbosity, VerbositySink};
