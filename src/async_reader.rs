#![cfg(feature = "async")]

use crate::assembler::LineAssembler;
use crate::config::ParserConfig;
use crate::error::{CsvError, IoContext};
use crate::record::CsvRecord;
use crate::source::strip_terminator;
use crate::tokenizer::FieldTokenizer;
use crate::util::has_gz_extension;

use async_compression::tokio::bufread::GzipDecoder;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::io::{AsyncReadExt, AsyncSeekExt, SeekFrom};

#[derive(Debug)]
pub enum AsyncSource {
    Path(PathBuf),
    Reader,
}

/// Async CSV reader (plain/.gz), streaming.
///
/// Same record semantics as [`CsvReader`](crate::CsvReader).
pub struct AsyncCsvReader {
    src: AsyncSource,
    rdr: Box<dyn AsyncBufRead + Unpin + Send>,
    assembler: LineAssembler,
    tokenizer: FieldTokenizer,
    line: String,
    line_num: u64,
    byte_pos: u64,
    done: bool,
}

impl AsyncCsvReader {
    /// Open async from path; `.gz` auto-detect by extension or magic bytes.
    pub async fn from_path<P: AsRef<Path>>(
        path: P,
        config: ParserConfig,
    ) -> Result<Self, CsvError> {
        let path = path.as_ref().to_path_buf();
        let mut f = File::open(&path).await.map_err(|e| {
            CsvError::io_err(
                e,
                IoContext {
                    byte_pos: 0,
                    line_num: 0,
                },
            )
        })?;

        let is_gz = has_gz_extension(&path)
            || looks_like_gzip_async(&mut f).await.unwrap_or(false);
        log::debug!("opening {} (gzip: {is_gz})", path.display());

        let rdr: Box<dyn AsyncBufRead + Unpin + Send> = if is_gz {
            let gz = GzipDecoder::new(BufReader::with_capacity(256 * 1024, f));
            gz_multi(gz)
        } else {
            Box::new(BufReader::with_capacity(256 * 1024, f))
        };

        Ok(Self::with_reader(AsyncSource::Path(path), rdr, config))
    }

    /// Wrap any async `AsyncBufRead`.
    pub fn from_async_bufread<R>(reader: R, config: ParserConfig) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        Self::with_reader(AsyncSource::Reader, Box::new(reader), config)
    }

    fn with_reader(
        src: AsyncSource,
        rdr: Box<dyn AsyncBufRead + Unpin + Send>,
        config: ParserConfig,
    ) -> Self {
        Self {
            src,
            rdr,
            assembler: LineAssembler::new(&config),
            tokenizer: FieldTokenizer::new(&config),
            line: String::with_capacity(256),
            line_num: 0,
            byte_pos: 0,
            done: false,
        }
    }

    /// Fetch next record (async). `None` after end of input or the first error.
    pub async fn next_record(&mut self) -> Option<Result<CsvRecord, CsvError>> {
        if self.done {
            return None;
        }
        let res = self.read_one().await;
        if !matches!(res, Ok(Some(_))) {
            self.done = true;
        }
        res.transpose()
    }

    #[inline]
    pub fn line_num(&self) -> u64 {
        self.line_num
    }

    #[inline]
    pub fn source(&self) -> &AsyncSource {
        &self.src
    }

    async fn read_one(&mut self) -> Result<Option<CsvRecord>, CsvError> {
        loop {
            let n = read_trimmed(&mut self.rdr, &mut self.line)
                .await
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

fn gz_multi<R>(mut gz: GzipDecoder<R>) -> Box<dyn AsyncBufRead + Unpin + Send>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    // concatenated members, like flate2's MultiGzDecoder
    gz.multiple_members(true);
    Box::new(BufReader::with_capacity(256 * 1024, gz))
}

async fn read_trimmed<R>(rdr: &mut R, buf: &mut String) -> io::Result<usize>
where
    R: AsyncBufRead + Unpin + ?Sized,
{
    buf.clear();
    let n = rdr.read_line(buf).await?;
    if n > 0 {
        strip_terminator(buf);
    }
    Ok(n)
}

async fn looks_like_gzip_async(f: &mut File) -> io::Result<bool> {
    let pos = f.stream_position().await?;
    let mut magic = [0u8; 2];
    let n = f.read(&mut magic).await?;
    f.seek(SeekFrom::Start(pos)).await?;
    Ok(n >= 2 && magic == [0x1F, 0x8B])
}
