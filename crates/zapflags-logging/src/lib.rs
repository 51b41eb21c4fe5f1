//! # zapflags-logging
//!
//! Turns parsed `zap` flags into a `tracing` logger.
//!
//! ## Key Types
//!
//! - [`Logger`] - Built logger, installable as the global default
//! - [`ResolvedOptions`] - Effective settings after defaults and development mode
//! - [`Encoder`] - JSON or console record formatter
//! - [`Sampler`] - Layer that thins out repetitive records
//!
//! ## Usage
//!
//! ```rust,ignore
//! use zapflags_core::{LegacyVerbosity, ZapOptions};
//!
//! let options: ZapOptions = /* flattened into the app's clap parser */;
//! options.apply_verbosity(&LegacyVerbosity)?;
//! zapflags_logging::build_logger(&options).install()?;
//! ```

mod encoder;
mod error;
mod factory;
mod sampler;
mod time;

pub use encoder::{build_encoder, Encoder, FieldLayout};
pub use error::LoggerError;
pub use factory::{build_logger, build_logger_with_writer, Logger, ResolvedOptions};
pub use sampler::{Sampler, SamplingConfig};
pub use time::{format_epoch, format_iso8601, Timestamp};
