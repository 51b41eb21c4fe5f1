use tracing::Subscriber;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use zapflags_core::{EncoderChoice, TimeFormat};

use crate::time::Timestamp;

/// Which fields a record carries and how they are decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub ansi: bool,
    pub target: bool,
    pub file: bool,
    pub line_number: bool,
    pub thread_ids: bool,
    pub current_span: bool,
    pub span_list: bool,
    /// Hoist event fields to the top level of JSON objects
    pub flatten_event: bool,
}

impl FieldLayout {
    /// Machine-oriented layout used with the JSON encoder
    pub fn production() -> Self {
        Self {
            ansi: false,
            target: true,
            file: true,
            line_number: true,
            thread_ids: false,
            current_span: false,
            span_list: false,
            flatten_event: true,
        }
    }

    /// Human-oriented layout used with the console encoder
    pub fn development() -> Self {
        Self {
            ansi: true,
            target: true,
            file: true,
            line_number: true,
            thread_ids: false,
            current_span: true,
            span_list: true,
            flatten_event: false,
        }
    }
}

/// Resolved record formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoder {
    pub kind: EncoderChoice,
    pub layout: FieldLayout,
    pub timestamp: Timestamp,
}

/// Combine the encoder and time-format choices into a formatter.
///
/// JSON starts from the production layout, console from the development
/// one. Both default to epoch timestamps; `iso8601` swaps the time encoder.
pub fn build_encoder(choice: EncoderChoice, time_format: TimeFormat) -> Encoder {
    let layout = match choice {
        EncoderChoice::Json => FieldLayout::production(),
        EncoderChoice::Console => FieldLayout::development(),
    };
    let timestamp = match time_format {
        TimeFormat::Iso8601 => Timestamp::Iso8601,
        TimeFormat::Unix => Timestamp::Epoch,
    };
    Encoder {
        kind: choice,
        layout,
        timestamp,
    }
}

impl Encoder {
    /// A `fmt` layer writing records in this encoding to `writer`.
    pub fn layer<S, W>(&self, writer: W) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let layout = self.layout;
        let base = fmt::layer()
            .with_writer(writer)
            .with_timer(self.timestamp)
            .with_ansi(layout.ansi)
            .with_target(layout.target)
            .with_file(layout.file)
            .with_line_number(layout.line_number)
            .with_thread_ids(layout.thread_ids);

        match self.kind {
            EncoderChoice::Json => base
                .json()
                .flatten_event(layout.flatten_event)
                .with_current_span(layout.current_span)
                .with_span_list(layout.span_list)
                .boxed(),
            EncoderChoice::Console => base.boxed(),
        }
    }
}
