use std::io::Read;

use crate::errors::{FactoryError, Result};

/// Row-oriented table read from the input CSV: a header row plus string
/// cells. No typing or validation happens here; that is the parser's job.
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

pub fn load_path(path: &str) -> Result<Table> {
    let file = fs_err::File::open(path)
        .map_err(|e| FactoryError::DataLoad(format!("{path}: {e}")))?;
    load_reader(file)
}

pub fn load_reader<R: Read>(reader: R) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| FactoryError::DataLoad(format!("reading header row: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| FactoryError::DataLoad(format!("malformed record: {e}")))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_headers_and_rows() {
        let csv = "keyword,topic,s1\nrust,Systems,Write an intro\n";
        let table = load_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["keyword", "topic", "s1"]);
        assert_eq!(table.rows, vec![vec!["rust", "Systems", "Write an intro"]]);
        assert_eq!(table.column_index("topic"), Some(1));
    }

    #[test]
    fn malformed_csv_is_a_data_load_error() {
        // Record length disagrees with the header row.
        let csv = "keyword,topic\na,b,extra\n";
        let err = load_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, FactoryError::DataLoad(_)));
    }

    #[test]
    fn missing_file_is_a_data_load_error() {
        let err = load_path("/nonexistent/input.csv").unwrap_err();
        assert!(matches!(err, FactoryError::DataLoad(_)));
    }
}
