use crate::assembler::LineAssembler;
use crate::config::ParserConfig;
use crate::error::{CsvError, IoContext};
use crate::record::CsvRecord;
use crate::source::{BufReadLines, IterLines, LineSource};
use crate::tokenizer::FieldTokenizer;
use crate::util::{has_gz_extension, looks_like_gzip, open_input};

#[cfg(feature = "gzip")]
use flate2::read::MultiGzDecoder;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum Source {
    Path(PathBuf),
    Reader,
    Lines,
}

/// Sync CSV reader (plain/.gz), streaming.
///
/// Records are produced on demand; only the record currently being
/// assembled is buffered. The first error ends the sequence, records
/// already yielded stay valid.
pub struct CsvReader {
    src: Source,
    lines: Box<dyn LineSource + Send>,
    assembler: LineAssembler,
    tokenizer: FieldTokenizer,
    line: String,
    line_num: u64,
    byte_pos: u64,
    done: bool,
}

impl CsvReader {
    /// Open from a file path. Auto-detect `.gz` by extension or magic bytes.
    pub fn from_path<P: AsRef<Path>>(path: P, config: ParserConfig) -> Result<Self, CsvError> {
        let path = path.as_ref();
        let mut f = open_input(path)?;

        let is_gz = has_gz_extension(path) || looks_like_gzip(&mut f).unwrap_or(false);
        log::debug!("opening {} (gzip: {is_gz})", path.display());

        let rdr: Box<dyn BufRead + Send> = if is_gz {
            #[cfg(feature = "gzip")]
            {
                let dec = MultiGzDecoder::new(f);
                Box::new(BufReader::with_capacity(256 * 1024, dec))
            }
            #[cfg(not(feature = "gzip"))]
            {
                return Err(CsvError::io_err(
                    std::io::Error::new(
                        std::io::ErrorKind::Unsupported,
                        "gzip input requires the `gzip` feature",
                    ),
                    IoContext {
                        byte_pos: 0,
                        line_num: 0,
                    },
                ));
            }
        } else {
            #[cfg(feature = "mmap")]
            {
                use memmap2::Mmap;
                use std::io::Cursor;
                // SAFETY: the file is opened read-only and must not be truncated
                // by another process while the reader is alive.
                let mmap = unsafe { Mmap::map(&f) }.map_err(|e| {
                    CsvError::io_err(
                        e,
                        IoContext {
                            byte_pos: 0,
                            line_num: 0,
                        },
                    )
                })?;
                Box::new(BufReader::with_capacity(512 * 1024, Cursor::new(mmap)))
            }
            #[cfg(not(feature = "mmap"))]
            {
                Box::new(BufReader::with_capacity(256 * 1024, f))
            }
        };

        Ok(Self::with_source(
            Source::Path(path.to_path_buf()),
            Box::new(BufReadLines::new(rdr)),
            config,
        ))
    }

    /// Wrap an arbitrary `BufRead` (stdin, etc.).
    pub fn from_bufread<R: BufRead + Send + 'static>(reader: R, config: ParserConfig) -> Self {
        Self::with_source(Source::Reader, Box::new(BufReadLines::new(reader)), config)
    }

    /// Parse lines that are already split (terminators optional).
    pub fn from_lines<I>(lines: I, config: ParserConfig) -> Self
    where
        I: IntoIterator,
        I::IntoIter: Send + 'static,
        I::Item: AsRef<str>,
    {
        Self::with_source(
            Source::Lines,
            Box::new(IterLines::new(lines.into_iter())),
            config,
        )
    }

    /// Drive any custom [`LineSource`].
    pub fn from_source<S: LineSource + Send + 'static>(source: S, config: ParserConfig) -> Self {
        Self::with_source(Source::Reader, Box::new(source), config)
    }

    fn with_source(src: Source, lines: Box<dyn LineSource + Send>, config: ParserConfig) -> Self {
        Self {
            src,
            lines,
            assembler: LineAssembler::new(&config),
            tokenizer: FieldTokenizer::new(&config),
            line: String::with_capacity(256),
            line_num: 0,
            byte_pos: 0,
            done: false,
        }
    }

    /// Iterator-style `next` record.
    pub fn next(&mut self) -> Option<Result<CsvRecord, CsvError>> {
        if self.done {
            return None;
        }
        match self.read_one() {
            Ok(Some(rec)) => Some(Ok(rec)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }

    /// Number of physical lines consumed so far.
    #[inline]
    pub fn line_num(&self) -> u64 {
        self.line_num
    }

    #[inline]
    pub fn source(&self) -> &Source {
        &self.src
    }

    fn read_one(&mut self) -> Result<Option<CsvRecord>, CsvError> {
        loop {
            let n = self
                .lines
                .read_line(&mut self.line)
                .map_err(|e| CsvError::io_err(e, self.ctx()))?;
            if n == 0 {
                self.assembler
                    .finish()
                    .map_err(|e| CsvError::fmt_err(e, self.ctx()))?;
                return Ok(None);
            }
            self.line_num += 1;
            self.byte_pos += n as u64;

            if let Some(logical) = self.assembler.push(&self.line, self.line_num) {
                let fields = self
                    .tokenizer
                    .tokenize(&logical.text)
                    .map_err(|e| CsvError::fmt_err(e, self.ctx()))?;
                return Ok(Some(CsvRecord {
                    fields,
                    start_line: logical.start_line,
                    end_line: logical.end_line,
                }));
            }
        }
    }

    #[inline]
    fn ctx(&self) -> IoContext {
        IoContext {
            byte_pos: self.byte_pos,
            line_num: self.line_num,
        }
    }
}

impl Iterator for CsvReader {
    type Item = Result<CsvRecord, CsvError>;
    fn next(&mut self) -> Option<Self::Item> {
        CsvReader::next(self)
    }
}

/// Lazily parse already-split lines into records.
pub fn parse<I>(lines: I, config: ParserConfig) -> CsvReader
where
    I: IntoIterator,
    I::IntoIter: Send + 'static,
    I::Item: AsRef<str>,
{
    CsvReader::from_lines(lines, config)
}
