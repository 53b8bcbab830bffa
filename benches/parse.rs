use criterion::{Criterion, criterion_group, criterion_main};
use csv_stream_reader::{CsvReader, ParserConfig};
use std::io::BufReader;

fn bench_parse(c: &mut Criterion) {
    let mut data = String::new();
    for i in 0..2000 {
        data.push_str(&format!("{i},plain text,\"quoted, with \"\"escape\"\"\",42\n"));
        if i % 10 == 0 {
            data.push_str(&format!("{i},\"spans\ntwo lines\",,0\n"));
        }
    }
    let data: &'static str = Box::leak(data.into_boxed_str());
    c.bench_function("parse_2000_rows", |b| {
        b.iter(|| {
            let rdr = BufReader::new(data.as_bytes());
            let csv = CsvReader::from_bufread(rdr, ParserConfig::default());
            let mut n = 0usize;
            for rec in csv {
                let r = rec.unwrap();
                n += r.len();
            }
            n
        })
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
