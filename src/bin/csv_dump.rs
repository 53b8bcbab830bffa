//! Dump every field of a CSV file as `[Row,Col] = [r,c] = value`.
//!
//! The column counter runs across the whole file unless `--reset-columns`
//! is given; existing consumers of this output depend on that numbering.

use std::error::Error;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use csv_stream_reader::{CsvReader, ParserConfig};

#[derive(Parser, Debug)]
#[command(name = "csv_dump")]
#[command(version)]
#[command(about = "Print each field of a CSV file with its row and column", long_about = None)]
struct CliArgs {
    /// CSV file to read (UTF-8, optionally gzip-compressed)
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Field delimiter character
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    /// Quote character
    #[arg(short, long, default_value_t = '"')]
    quote: char,

    /// Restart column numbering at 1 on every row
    #[arg(long)]
    reset_columns: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = CliArgs::parse();
    let path = std::path::absolute(&args.path).unwrap_or_else(|_| args.path.clone());
    let config = match ParserConfig::new(args.delimiter, args.quote) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {e}", path.display());
            std::process::exit(1);
        }
    };

    let reader = match CsvReader::from_path(&path, config) {
        Ok(reader) => reader,
        Err(e) => {
            eprintln!("{}: {e}", path.display());
            std::process::exit(1);
        }
    };
    log::debug!("dumping {}", path.display());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let (mut row, mut col) = (0u64, 0u64);
    for rec in reader {
        let rec = match rec {
            Ok(rec) => rec,
            Err(e) => {
                out.flush()?;
                eprintln!("{}({}): {e}", path.display(), e.line_num());
                std::process::exit(1);
            }
        };
        row += 1;
        if args.reset_columns {
            col = 0;
        }
        for field in rec.iter() {
            col += 1;
            writeln!(out, "[Row,Col] = [{row},{col}] = {field}")?;
        }
    }
    out.flush()?;
    Ok(())
}
