//! Field tokenizer: splits one logical line into its fields.
//!
//! States:
//! - Init: start of a field
//! - NormalField: inside an unquoted field
//! - QuotedField: inside a quoted field (delimiters are literal)
//! - ClosingQuotedField: saw a quote inside a quoted field; either the
//!   field ends or the next quote is an escaped (doubled) quote

use crate::config::ParserConfig;
use crate::error::FormatError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Init,
    NormalField,
    QuotedField,
    ClosingQuotedField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Quote(char),
    Delimiter(char),
    Other(char),
}

/// What to do with the field buffer on a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    None,
    Push(char),
    Emit,
}

/// One row of the transition table. `None` means the input is malformed.
#[inline]
fn transition(state: State, class: Class) -> Option<(State, Action)> {
    use Class::*;
    use State::*;
    let next = match (state, class) {
        (Init, Quote(_)) => (QuotedField, Action::None),
        (Init, Delimiter(_)) => (Init, Action::Emit),
        (Init, Other(c)) => (NormalField, Action::Push(c)),

        (NormalField, Quote(_)) => return None,
        (NormalField, Delimiter(_)) => (Init, Action::Emit),
        (NormalField, Other(c)) => (NormalField, Action::Push(c)),

        (QuotedField, Quote(_)) => (ClosingQuotedField, Action::None),
        (QuotedField, Delimiter(c) | Other(c)) => (QuotedField, Action::Push(c)),

        (ClosingQuotedField, Quote(c)) => (QuotedField, Action::Push(c)),
        (ClosingQuotedField, Delimiter(_)) => (Init, Action::Emit),
        (ClosingQuotedField, Other(_)) => return None,
    };
    Some(next)
}

/// Reusable tokenizer; the field buffer is reset on every call.
#[derive(Debug, Clone)]
pub struct FieldTokenizer {
    delimiter: char,
    quote: char,
    field: String,
}

impl FieldTokenizer {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            delimiter: config.delimiter(),
            quote: config.quote(),
            field: String::new(),
        }
    }

    /// Split `line` into fields.
    ///
    /// A trailing delimiter yields a trailing empty field, so a line with
    /// `n` unquoted delimiters always gives `n + 1` fields.
    pub fn tokenize(&mut self, line: &str) -> Result<Vec<String>, FormatError> {
        let mut fields = Vec::new();
        let mut state = State::Init;
        self.field.clear();
        self.field.reserve(line.len());

        for (idx, c) in line.chars().enumerate() {
            let class = if c == self.quote {
                Class::Quote(c)
            } else if c == self.delimiter {
                Class::Delimiter(c)
            } else {
                Class::Other(c)
            };

            let Some((next, action)) = transition(state, class) else {
                return Err(FormatError::MalformedField {
                    line: line.to_owned(),
                    column: idx + 1,
                });
            };
            match action {
                Action::None => {}
                Action::Push(c) => self.field.push(c),
                Action::Emit => {
                    fields.push(self.field.clone());
                    self.field.clear();
                }
            }
            state = next;
        }

        // Assembly keeps quote parity even, so an open quoted field here
        // means the caller fed us an unbalanced line.
        if state == State::QuotedField {
            return Err(FormatError::UnterminatedQuotedField);
        }
        fields.push(std::mem::take(&mut self.field));
        Ok(fields)
    }
}

/// Tokenize a single logical line with a throwaway tokenizer.
pub fn tokenize(line: &str, config: &ParserConfig) -> Result<Vec<String>, FormatError> {
    FieldTokenizer::new(config).tokenize(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(line: &str) -> Vec<String> {
        tokenize(line, &ParserConfig::default()).unwrap()
    }

    #[test]
    fn test_simple() {
        assert_eq!(split("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_quoted_delimiter() {
        assert_eq!(split(r#""a,b",c"#), vec!["a,b", "c"]);
    }

    #[test]
    fn test_doubled_quote() {
        assert_eq!(split(r#""a""b""#), vec![r#"a"b"#]);
        assert_eq!(
            split(r#""Say ""Hello""",world"#),
            vec![r#"Say "Hello""#, "world"]
        );
    }

    #[test]
    fn test_all_empty() {
        assert_eq!(split(",,"), vec!["", "", ""]);
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(split(""), vec![""]);
    }

    #[test]
    fn test_quoted_empty() {
        assert_eq!(split(r#""","""#), vec!["", ""]);
    }

    #[test]
    fn test_embedded_newline() {
        assert_eq!(
            split("\"line1\nline2\",normal"),
            vec!["line1\nline2", "normal"]
        );
    }

    #[test]
    fn test_no_whitespace_trimming() {
        assert_eq!(split(" a , b "), vec![" a ", " b "]);
    }

    #[test]
    fn test_custom_delimiter_and_quote() {
        let cfg = ParserConfig::new(';', '\'').unwrap();
        assert_eq!(
            tokenize("a;'b;c';'it''s'", &cfg).unwrap(),
            vec!["a", "b;c", "it's"]
        );
        // the default quote is an ordinary character here
        assert_eq!(tokenize(r#"x"y;z"#, &cfg).unwrap(), vec![r#"x"y"#, "z"]);
    }

    #[test]
    fn quote_after_unquoted_text_is_malformed() {
        let err = tokenize(r#"ab"cd"#, &ParserConfig::default()).unwrap_err();
        assert_eq!(
            err,
            FormatError::MalformedField {
                line: r#"ab"cd"#.into(),
                column: 3,
            }
        );
    }

    #[test]
    fn text_after_closing_quote_is_malformed() {
        let err = tokenize(r#"x,"ab"c"#, &ParserConfig::default()).unwrap_err();
        assert!(matches!(err, FormatError::MalformedField { column: 7, .. }));
    }

    #[test]
    fn open_quote_is_unterminated() {
        assert_eq!(
            tokenize(r#""abc"#, &ParserConfig::default()),
            Err(FormatError::UnterminatedQuotedField)
        );
    }

    #[test]
    fn tokenizer_is_reusable_after_error() {
        let mut tok = FieldTokenizer::new(&ParserConfig::default());
        assert!(tok.tokenize(r#""ab"x"#).is_err());
        assert_eq!(tok.tokenize("c,d").unwrap(), vec!["c", "d"]);
    }
}
