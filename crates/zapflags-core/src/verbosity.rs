//! Legacy verbosity facility.
//!
//! Libraries that still log through the `log` crate are gated by its global
//! max level. High custom `--zap-level` values raise that level so those
//! records are not lost once they are bridged into the structured logger.

use std::sync::atomic::{AtomicU32, Ordering};

use log::LevelFilter;
use tracing::debug;

use crate::error::VerbosityError;

/// Largest verbosity the legacy facility accepts.
pub const MAX_VERBOSITY: u64 = i32::MAX as u64;

static VERBOSITY: AtomicU32 = AtomicU32::new(0);

/// A facility whose verbosity follows custom high log levels.
pub trait VerbositySink {
    fn set_verbosity(&self, verbosity: u64) -> Result<(), VerbosityError>;
}

/// The process-wide `log` crate facility.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyVerbosity;

impl LegacyVerbosity {
    /// Current verbosity.
    pub fn verbosity() -> u32 {
        VERBOSITY.load(Ordering::SeqCst)
    }

    /// `log` max level matching the current verbosity.
    pub fn max_level() -> LevelFilter {
        level_for(u64::from(Self::verbosity()))
    }
}

fn level_for(verbosity: u64) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Info,
        1..=3 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

impl VerbositySink for LegacyVerbosity {
    fn set_verbosity(&self, verbosity: u64) -> Result<(), VerbosityError> {
        if verbosity > MAX_VERBOSITY {
            return Err(VerbosityError::OutOfRange {
                requested: verbosity,
                max: MAX_VERBOSITY,
            });
        }
        VERBOSITY.store(verbosity as u32, Ordering::SeqCst);
        log::set_max_level(level_for(verbosity));
        debug!(verbosity, "Raised legacy log verbosity");
        Ok(())
    }
}
