use thiserror::Error;

/// Rejected flag value.
///
/// Every option cell reports its parse failures through this type, so the
/// surrounding flag handling can abort startup the same way regardless of
/// which flag was malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidValue {
    #[error("unknown encoder \"{0}\"")]
    Encoder(String),

    #[error("invalid log level \"{0}\"")]
    Level(String),

    #[error("invalid boolean value \"{0}\"")]
    Bool(String),

    #[error("unknown timeformat \"{0}\"")]
    TimeFormat(String),

    #[error("log level \"{level}\" could not raise legacy verbosity: {source}")]
    Verbosity {
        level: String,
        #[source]
        source: VerbosityError,
    },
}

/// Failure reported by a secondary verbosity facility.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerbosityError {
    #[error("verbosity {requested} exceeds the maximum of {max}")]
    OutOfRange { requested: u64, max: u64 },

    #[error("verbosity facility rejected the change: {0}")]
    Rejected(String),
}
