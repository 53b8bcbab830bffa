use csv_stream_reader::{ParserConfig, parse, tokenize};
use proptest::prelude::*;

fn quote_field(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

proptest! {
    #[test]
    fn field_count_is_delimiters_plus_one(fields in prop::collection::vec("[a-zA-Z0-9 ]{0,8}", 1..12)) {
        let line = fields.join(",");
        let got = tokenize(&line, &ParserConfig::default()).unwrap();
        prop_assert_eq!(got.len(), line.matches(',').count() + 1);
        prop_assert_eq!(got, fields);
    }

    #[test]
    fn quoted_fields_survive_quotes_delimiters_and_newlines(
        fields in prop::collection::vec("[a-z,\"\n]{0,8}", 1..6)
    ) {
        let record = fields.iter().map(|f| quote_field(f)).collect::<Vec<_>>().join(",");
        let lines: Vec<String> = record.split('\n').map(str::to_owned).collect();
        let rows: Vec<_> = parse(lines, ParserConfig::default())
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        prop_assert_eq!(rows.len(), 1);
        prop_assert_eq!(&rows[0].fields, &fields);
    }

    #[test]
    fn parsing_is_deterministic(lines in prop::collection::vec("[a-c,\"]{0,6}", 0..10)) {
        let run = || {
            parse(lines.clone(), ParserConfig::default())
                .map(|r| r.map(|rec| rec.into_fields()).map_err(|e| e.to_string()))
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(run(), run());
    }
}
