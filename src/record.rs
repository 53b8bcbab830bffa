use std::ops::Index;

/// One parsed record: fields in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRecord {
    pub fields: Vec<String>,
    /// First physical line of the record (1-based).
    pub start_line: u64,
    /// Last physical line; differs from `start_line` for multi-line quoted fields.
    pub end_line: u64,
}

impl CsvRecord {
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.fields.get(idx).map(String::as_str)
    }
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }
    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }
}

impl Index<usize> for CsvRecord {
    type Output = str;
    fn index(&self, idx: usize) -> &str {
        &self.fields[idx]
    }
}
