use std::io;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoContext {
    pub byte_pos: u64,
    pub line_num: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("delimiter and quote must differ (both are {0:?})")]
    DelimiterEqualsQuote(char),
    #[error("{0:?} is a line terminator and cannot be a delimiter or quote")]
    LineTerminator(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("quoted field not closed before end of input")]
    UnterminatedQuotedField,
    #[error("malformed field at column {column}:\n{line}")]
    MalformedField { line: String, column: usize },
}

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("I/O error at {ctx:?}: {source}")]
    Io {
        #[source]
        source: io::Error,
        ctx: IoContext,
    },
    #[error("format error at line {}: {source}", .ctx.line_num)]
    Format {
        #[source]
        source: FormatError,
        ctx: IoContext,
    },
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl CsvError {
    pub(crate) fn io_err(source: io::Error, ctx: IoContext) -> Self {
        Self::Io { source, ctx }
    }
    pub(crate) fn fmt_err(source: FormatError, ctx: IoContext) -> Self {
        Self::Format { source, ctx }
    }

    /// The format error kind, if this is one.
    pub fn format_error(&self) -> Option<&FormatError> {
        match self {
            Self::Format { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Physical line the error was detected on (0 when not tied to input).
    pub fn line_num(&self) -> u64 {
        match self {
            Self::Io { ctx, .. } | Self::Format { ctx, .. } => ctx.line_num,
            Self::Config(_) => 0,
        }
    }
}
