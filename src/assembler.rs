//! Joins physical lines into logical lines, one per CSV record.
//!
//! Record boundaries are found by quote parity alone: while the running
//! count of quote characters since the last boundary is odd, a quoted field
//! is still open and the next physical line belongs to the same record.
//! Stray quotes inside unquoted fields can throw the parity off; the
//! tokenizer catches that only when it breaks a field's state machine.

use crate::config::ParserConfig;
use crate::error::FormatError;
use std::mem;

/// The raw text of one record, with embedded `\n` where a quoted field
/// spanned physical lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    pub text: String,
    /// First physical line (1-based).
    pub start_line: u64,
    /// Last physical line (1-based).
    pub end_line: u64,
}

/// Incremental line assembler; feed it physical lines with [`push`](Self::push).
#[derive(Debug, Clone)]
pub struct LineAssembler {
    quote: char,
    quote_count: usize,
    pending: String,
    start_line: u64,
}

impl LineAssembler {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            quote: config.quote(),
            quote_count: 0,
            pending: String::new(),
            start_line: 0,
        }
    }

    /// Consume one physical line. Returns the completed logical line once
    /// quote parity is even again.
    pub fn push(&mut self, line: &str, line_num: u64) -> Option<LogicalLine> {
        if line.is_empty() && self.pending.is_empty() {
            log::trace!("skipping blank line {line_num}");
            return None;
        }
        if self.pending.is_empty() {
            self.start_line = line_num;
        }

        let quote = self.quote;
        self.quote_count += line.chars().filter(|&c| c == quote).count();
        if self.quote_count % 2 != 0 {
            self.pending.push_str(line);
            self.pending.push('\n');
            return None;
        }

        let text = if self.pending.is_empty() {
            line.to_owned()
        } else {
            let mut text = mem::take(&mut self.pending);
            text.push_str(line);
            text
        };
        self.quote_count = 0;
        log::trace!("logical line {}..={line_num} assembled", self.start_line);

        Some(LogicalLine {
            text,
            start_line: self.start_line,
            end_line: line_num,
        })
    }

    /// Signal end of input. Fails if a quoted field is still open; the
    /// assembler is reset either way.
    pub fn finish(&mut self) -> Result<(), FormatError> {
        let open = self.is_pending();
        self.reset();
        if open {
            log::warn!("input ended inside a quoted field");
            return Err(FormatError::UnterminatedQuotedField);
        }
        Ok(())
    }

    /// True while a multi-line record is being accumulated.
    #[inline]
    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn reset(&mut self) {
        self.quote_count = 0;
        self.pending.clear();
        self.start_line = 0;
    }
}

/// Lazy logical-line sequence over physical lines.
pub struct Assemble<I> {
    lines: I,
    asm: LineAssembler,
    line_num: u64,
    done: bool,
}

/// Assemble `lines` into logical lines on demand.
///
/// The sequence ends after the first error.
pub fn assemble<I, S>(lines: I, config: &ParserConfig) -> Assemble<I::IntoIter>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Assemble {
        lines: lines.into_iter(),
        asm: LineAssembler::new(config),
        line_num: 0,
        done: false,
    }
}

impl<I, S> Iterator for Assemble<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Result<LogicalLine, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        for line in self.lines.by_ref() {
            self.line_num += 1;
            if let Some(logical) = self.asm.push(line.as_ref(), self.line_num) {
                return Some(Ok(logical));
            }
        }
        self.done = true;
        self.asm.finish().err().map(Err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[&str]) -> Vec<String> {
        assemble(lines, &ParserConfig::default())
            .map(|r| r.unwrap().text)
            .collect()
    }

    #[test]
    fn single_line_records_pass_through() {
        assert_eq!(texts(&["a,b", "c,d"]), vec!["a,b", "c,d"]);
    }

    #[test]
    fn joins_quoted_field_across_lines() {
        let got: Vec<_> = assemble(["\"line1", "line2\"", "x"], &ParserConfig::default())
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            got,
            vec![
                LogicalLine {
                    text: "\"line1\nline2\"".into(),
                    start_line: 1,
                    end_line: 2,
                },
                LogicalLine {
                    text: "x".into(),
                    start_line: 3,
                    end_line: 3,
                },
            ]
        );
    }

    #[test]
    fn blank_lines_skipped_only_between_records() {
        assert_eq!(
            texts(&["", "a", "", "\"b", "", "c\"", ""]),
            vec!["a", "\"b\n\nc\""]
        );
    }

    #[test]
    fn unterminated_quote_at_end_of_input() {
        let mut it = assemble(["ok", "\"abc", "def"], &ParserConfig::default());
        assert_eq!(it.next().unwrap().unwrap().text, "ok");
        assert_eq!(it.next(), Some(Err(FormatError::UnterminatedQuotedField)));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn counts_only_configured_quote() {
        let cfg = ParserConfig::new(',', '\'').unwrap();
        let got: Vec<_> = assemble(["'a", "\"b'"], &cfg)
            .map(|r| r.unwrap().text)
            .collect();
        assert_eq!(got, vec!["'a\n\"b'"]);
    }

    #[test]
    fn reset_discards_pending_record() {
        let mut asm = LineAssembler::new(&ParserConfig::default());
        assert!(asm.push("\"open", 1).is_none());
        assert!(asm.is_pending());
        asm.reset();
        assert!(!asm.is_pending());
        assert_eq!(asm.push("a", 1).unwrap().text, "a");
        assert!(asm.finish().is_ok());
    }
}
