//! The `zap` flag group.
//!
//! [`ZapOptions`] registers one flag per option cell on a clap [`Command`]
//! and collects what the user typed. It is built once during startup and
//! handed to the logger factory; nothing reads it through a global.

use std::str::FromStr;

use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Args, Command, FromArgMatches};
use tracing::debug;

use crate::encoder::EncoderValue;
use crate::error::InvalidValue;
use crate::level::LevelValue;
use crate::sample::{parse_bool, SampleValue};
use crate::timeformat::TimeFormatValue;
use crate::value::OptionValue;
use crate::verbosity::VerbositySink;

/// Name of the flag group in clap.
pub const FLAG_GROUP: &str = "zap";

pub const DEVEL_FLAG: &str = "zap-devel";
pub const ENCODER_FLAG: &str = "zap-encoder";
pub const LEVEL_FLAG: &str = "zap-level";
pub const SAMPLE_FLAG: &str = "zap-sample";
pub const TIMEFORMAT_FLAG: &str = "zap-timeformat";

const HELP_HEADING: &str = "Zap logging";

/// Everything the user asked for on the command line.
///
/// Cells keep the literal choices; development mode is applied later by the
/// logger factory, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZapOptions {
    pub devel: Option<bool>,
    pub encoder: EncoderValue,
    pub level: LevelValue,
    pub sample: SampleValue,
    pub timeformat: TimeFormatValue,
}

impl ZapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_devel(&self) -> bool {
        self.devel.unwrap_or(false)
    }

    /// Raise the legacy verbosity facility if the level asks for it.
    ///
    /// A facility failure is reported as a bad `--zap-level` value.
    pub fn apply_verbosity(&self, sink: &dyn VerbositySink) -> Result<(), InvalidValue> {
        let Some(verbosity) = self.level.escalation() else {
            return Ok(());
        };
        debug!(verbosity, level = %self.level, "Level escalates legacy verbosity");
        sink.set_verbosity(verbosity)
            .map_err(|source| InvalidValue::Verbosity {
                level: self.level.raw().to_string(),
                source,
            })
    }

    /// Fill every flag that was not given from `fallback`.
    ///
    /// Used to layer config-file values beneath the command line.
    pub fn fill_unset(&mut self, fallback: &ZapOptions) {
        if self.devel.is_none() {
            self.devel = fallback.devel;
        }
        if !self.encoder.is_set() {
            self.encoder = fallback.encoder.clone();
        }
        if !self.level.is_set() {
            self.level = fallback.level.clone();
        }
        if !self.sample.is_set() {
            self.sample = fallback.sample;
        }
        if !self.timeformat.is_set() {
            self.timeformat = fallback.timeformat;
        }
    }
}

fn parse_devel(text: &str) -> Result<bool, InvalidValue> {
    parse_bool(text).ok_or_else(|| InvalidValue::Bool(text.to_string()))
}

fn bool_arg(arg: Arg) -> Arg {
    arg.num_args(0..=1)
        .require_equals(true)
        .default_missing_value("true")
}

/// Register a cell as a long flag. Every occurrence is parsed; the last wins.
fn cell_arg<T>(name: &'static str, help: &'static str) -> Arg
where
    T: OptionValue + FromStr<Err = InvalidValue> + Default + Clone + Send + Sync + 'static,
{
    let blank = T::default();
    let arg = Arg::new(name)
        .long(name)
        .help(help)
        .value_name(blank.type_tag())
        .value_parser(T::from_str)
        .action(ArgAction::Append)
        .group(FLAG_GROUP);

    if blank.is_bool_flag() {
        bool_arg(arg)
    } else {
        arg.num_args(1).allow_hyphen_values(true)
    }
}

fn last_cell<T>(matches: &ArgMatches, name: &str) -> Option<T>
where
    T: Clone + Send + Sync + 'static,
{
    matches
        .get_many::<T>(name)
        .and_then(|values| values.last())
        .cloned()
}

impl Args for ZapOptions {
    fn augment_args(cmd: Command) -> Command {
        cmd.next_help_heading(HELP_HEADING)
            .group(ArgGroup::new(FLAG_GROUP).multiple(true))
            .arg(
                bool_arg(
                    Arg::new(DEVEL_FLAG)
                        .long(DEVEL_FLAG)
                        .value_name("bool")
                        .value_parser(parse_devel)
                        .action(ArgAction::Append)
                        .group(FLAG_GROUP),
                )
                .help(
                    "Enable zap development mode (changes defaults to console encoder, \
                     debug log level, and disables sampling)",
                ),
            )
            .arg(cell_arg::<EncoderValue>(
                ENCODER_FLAG,
                "Zap log encoding ('json' or 'console')",
            ))
            .arg(cell_arg::<LevelValue>(
                LEVEL_FLAG,
                "Zap log level (one of 'debug', 'info', 'error' or any integer value > 0)",
            ))
            .arg(cell_arg::<SampleValue>(
                SAMPLE_FLAG,
                "Enable zap log sampling. Sampling will be disabled for integer log levels > 1",
            ))
            .arg(cell_arg::<TimeFormatValue>(
                TIMEFORMAT_FLAG,
                "Use 'unix' or 'iso8601' time formatting. 'unix' is the default.",
            ))
    }

    fn augment_args_for_update(cmd: Command) -> Command {
        Self::augment_args(cmd)
    }
}

impl FromArgMatches for ZapOptions {
    fn from_arg_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let mut options = Self::default();
        options.update_from_arg_matches(matches)?;
        Ok(options)
    }

    fn update_from_arg_matches(&mut self, matches: &ArgMatches) -> Result<(), clap::Error> {
        if let Some(devel) = last_cell::<bool>(matches, DEVEL_FLAG) {
            self.devel = Some(devel);
        }
        if let Some(encoder) = last_cell::<EncoderValue>(matches, ENCODER_FLAG) {
            self.encoder = encoder;
        }
        if let Some(level) = last_cell::<LevelValue>(matches, LEVEL_FLAG) {
            self.level = level;
        }
        if let Some(sample) = last_cell::<SampleValue>(matches, SAMPLE_FLAG) {
            self.sample = sample;
        }
        if let Some(timeformat) = last_cell::<TimeFormatValue>(matches, TIMEFORMAT_FLAG) {
            self.timeformat = timeformat;
        }
        Ok(())
    }
}
