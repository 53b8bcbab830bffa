use crate::error::ConfigError;

/// Delimiter and quote characters, fixed for the lifetime of a parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    delimiter: char,
    quote: char,
}

impl ParserConfig {
    /// Validate and build a config.
    ///
    /// Fails when `delimiter == quote`, or when either one is a line
    /// terminator (those never reach the parser).
    pub fn new(delimiter: char, quote: char) -> Result<Self, ConfigError> {
        for c in [delimiter, quote] {
            if c == '\n' || c == '\r' {
                return Err(ConfigError::LineTerminator(c));
            }
        }
        if delimiter == quote {
            return Err(ConfigError::DelimiterEqualsQuote(delimiter));
        }
        Ok(Self { delimiter, quote })
    }

    #[inline]
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    #[inline]
    pub fn quote(&self) -> char {
        self.quote
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
        }
    }
}
