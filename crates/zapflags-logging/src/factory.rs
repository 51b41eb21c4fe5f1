use serde::Serialize;
use tracing::{debug, warn, Dispatch};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;

use zapflags_core::{EncoderChoice, LegacyVerbosity, Severity, TimeFormat, ZapOptions};

use crate::encoder::build_encoder;
use crate::error::LoggerError;
use crate::sampler::Sampler;

/// Effective logger settings after defaults and development mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedOptions {
    pub encoder: EncoderChoice,
    pub severity: Severity,
    pub sample: bool,
    pub time_format: TimeFormat,
}

impl ResolvedOptions {
    /// Apply defaults to unset flags, then development-mode overrides.
    ///
    /// Development mode wins over anything the user passed for encoder,
    /// level and sampling. Custom integer levels above 1 also turn sampling
    /// off so verbose output is never thinned out.
    pub fn resolve(options: &ZapOptions) -> Self {
        let mut encoder = options.encoder.choice().unwrap_or_default();
        let mut severity = options.level.severity().unwrap_or_default();
        let mut sample = options.sample.sample().unwrap_or(true);

        if options.is_devel() {
            encoder = EncoderChoice::Console;
            severity = Severity::DEBUG;
            sample = false;
        }
        if severity < Severity::DEBUG {
            sample = false;
        }

        Self {
            encoder,
            severity,
            sample,
            time_format: options.timeformat.format().unwrap_or_default(),
        }
    }
}

/// A ready-to-use structured logger.
#[derive(Debug, Clone)]
pub struct Logger {
    dispatch: Dispatch,
    options: ResolvedOptions,
}

impl Logger {
    pub fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Run `f` with this logger as the current thread's default.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// Make this the process-wide logger and route `log` records into it.
    ///
    /// `log` records pass at the legacy facility's current level, so a high
    /// `--zap-level` must be applied before this is called.
    pub fn install(self) -> Result<(), LoggerError> {
        tracing::dispatcher::set_global_default(self.dispatch)?;

        let bridge = tracing_log::LogTracer::builder()
            .with_max_level(LegacyVerbosity::max_level())
            .init();
        if let Err(err) = bridge {
            warn!(error = %err, "log records will not be forwarded");
        }
        Ok(())
    }
}

/// Build a logger writing to stderr.
pub fn build_logger(options: &ZapOptions) -> Logger {
    build_logger_with_writer(options, std::io::stderr)
}

/// Build a logger writing to `writer`.
pub fn build_logger_with_writer<W>(options: &ZapOptions, writer: W) -> Logger
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let resolved = ResolvedOptions::resolve(options);
    let encoder = build_encoder(resolved.encoder, resolved.time_format);
    let sampler = resolved.sample.then(Sampler::default);

    debug!(
        encoder = %resolved.encoder,
        level = %resolved.severity,
        sample = resolved.sample,
        time_format = %resolved.time_format,
        "Building logger"
    );

    let subscriber = tracing_subscriber::registry()
        .with(resolved.severity.level_filter())
        .with(sampler)
        .with(encoder.layer(writer));

    Logger {
        dispatch: Dispatch::new(subscriber),
        options: resolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zapflags_core::OptionValue;

    fn options(devel: bool, encoder: &str, level: &str, sample: &str, time: &str) -> ZapOptions {
        let mut options = ZapOptions::new();
        options.devel = Some(devel);
        options.encoder.set(encoder).unwrap();
        options.level.set(level).unwrap();
        options.sample.set(sample).unwrap();
        options.timeformat.set(time).unwrap();
        options
    }

    #[test]
    fn test_defaults() {
        let resolved = ResolvedOptions::resolve(&ZapOptions::new());
        assert_eq!(
            resolved,
            ResolvedOptions {
                encoder: EncoderChoice::Json,
                severity: Severity::INFO,
                sample: true,
                time_format: TimeFormat::Unix,
            }
        );
    }

    #[test]
    fn test_devel_overrides_flags() {
        let devel = ResolvedOptions::resolve(&options(true, "json", "error", "true", "unix"));
        let plain = ResolvedOptions::resolve(&options(false, "console", "debug", "false", "unix"));
        assert_eq!(devel, plain);
    }

    #[test]
    fn test_devel_keeps_time_format() {
        let resolved = ResolvedOptions::resolve(&options(true, "json", "info", "true", "iso8601"));
        assert_eq!(resolved.time_format, TimeFormat::Iso8601);
        assert_eq!(resolved.encoder, EncoderChoice::Console);
    }

    #[test]
    fn test_devel_alone_uses_development_defaults() {
        let mut zap = ZapOptions::new();
        zap.devel = Some(true);
        let resolved = ResolvedOptions::resolve(&zap);
        assert_eq!(resolved.encoder, EncoderChoice::Console);
        assert_eq!(resolved.severity, Severity::DEBUG);
        assert!(!resolved.sample);
    }

    #[test]
    fn test_custom_levels_disable_sampling() {
        let one = ResolvedOptions::resolve(&options(false, "json", "1", "true", "unix"));
        assert!(one.sample);
        let two = ResolvedOptions::resolve(&options(false, "json", "2", "true", "unix"));
        assert!(!two.sample);
        assert_eq!(two.severity, Severity::new(-2));
    }

    #[test]
    fn test_sample_flag_respected_without_devel() {
        let off = ResolvedOptions::resolve(&options(false, "json", "info", "false", "unix"));
        assert!(!off.sample);
    }

    #[test]
    fn test_logger_exposes_resolved_options() {
        let zap = options(true, "json", "error", "true", "unix");
        let logger = build_logger(&zap);
        assert_eq!(*logger.options(), ResolvedOptions::resolve(&zap));
    }
}
