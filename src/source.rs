use std::io::{self, BufRead};

/// Supplies physical lines to a reader.
pub trait LineSource {
    /// Clear `buf` and fill it with the next physical line, terminator
    /// (`\n` or `\r\n`) stripped. Returns the number of bytes consumed;
    /// `0` means the input is exhausted.
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

/// Line source over any `BufRead` (files, stdin, decompressors).
pub struct BufReadLines<R> {
    inner: R,
}

impl<R: BufRead> BufReadLines<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: BufRead> LineSource for BufReadLines<R> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        buf.clear();
        let n = self.inner.read_line(buf)?;
        if n > 0 {
            strip_terminator(buf);
        }
        Ok(n)
    }
}

/// Line source over in-memory lines that are already split.
///
/// Lines are taken verbatim: nothing is stripped, so a trailing `\r` stays
/// part of the last field. Each line is accounted as its byte length plus
/// one terminator byte.
pub struct IterLines<I> {
    inner: I,
}

impl<I> IterLines<I> {
    pub fn new(inner: I) -> Self {
        Self { inner }
    }
}

impl<I, S> LineSource for IterLines<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        buf.clear();
        match self.inner.next() {
            Some(line) => {
                let line = line.as_ref();
                buf.push_str(line);
                Ok(line.len() + 1)
            }
            None => Ok(0),
        }
    }
}

#[inline]
pub(crate) fn strip_terminator(buf: &mut String) {
    if buf.ends_with('\n') {
        buf.pop();
    }
    if buf.ends_with('\r') {
        buf.pop();
    }
}
