//! Streaming RFC4180-style CSV reader.
//!
//! - Plain and `.gz` input (auto-detect), or any `BufRead` / line iterator.
//! - Streaming, record-by-record; only the record in progress is buffered.
//! - Configurable single-character delimiter and quote.
//! - Quoted fields may contain delimiters, doubled quotes and line breaks.
//! - Fail-fast: the first malformed record ends the stream with an error.
//! - Optional `mmap` for plain files; `zlib` feature for system zlib.
//! - Optional async API behind `async` feature.
//!
//! ```
//! use csv_stream_reader::{ParserConfig, parse};
//!
//! let lines = vec!["id,note", "1,\"multi", "line\"", "", "2,\"say \"\"hi\"\"\""];
//! let rows: Vec<Vec<String>> = parse(lines, ParserConfig::default())
//!     .map(|r| r.map(|rec| rec.into_fields()))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(rows[1], vec!["1", "multi\nline"]);
//! assert_eq!(rows[2], vec!["2", "say \"hi\""]);
//! ```

pub mod assembler;
pub mod config;
pub mod error;
pub mod reader;
pub mod record;
pub mod source;
pub mod tokenizer;
mod util;

#[cfg(feature = "async")]
pub mod async_reader;

pub use crate::assembler::{LineAssembler, LogicalLine, assemble};
pub use crate::config::ParserConfig;
pub use crate::error::{ConfigError, CsvError, FormatError, IoContext};
pub use crate::reader::{CsvReader, Source, parse};
pub use crate::record::CsvRecord;
pub use crate::source::{BufReadLines, IterLines, LineSource};
pub use crate::tokenizer::{FieldTokenizer, tokenize};

#[cfg(feature = "async")]
pub use crate::async_reader::AsyncCsvReader;
