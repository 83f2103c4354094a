//! CSV-based life table loader
//!
//! Expects a header row `age,male,female` followed by one row per tabulated age.

use super::{LifeTable, LifeTableRow};
use crate::error::Result;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Load a life table from a CSV file
pub fn load_life_table<P: AsRef<Path>>(path: P) -> Result<LifeTable> {
    let path = path.as_ref();
    log::info!("loading life table from {}", path.display());
    load_life_table_from_reader(File::open(path)?)
}

/// Load a life table from any reader (e.g. an in-memory buffer)
pub fn load_life_table_from_reader<R: Read>(reader: R) -> Result<LifeTable> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: LifeTableRow = result?;
        rows.push(row);
    }

    log::debug!("read {} life table rows", rows.len());
    LifeTable::from_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::people::Sex;

    #[test]
    fn test_load_from_reader() {
        let data = "age,male,female\n60,21.0,25.0\n0,76.3,81.3\n30,47.7,52.6\n";
        let table = load_life_table_from_reader(data.as_bytes()).unwrap();

        assert_eq!(table.rows().len(), 3);
        assert_eq!(table.rows()[0].age, 0.0);
        assert_eq!(table.years_remaining(35.0, Sex::Female), 52.6);
        assert_eq!(table.years_remaining(80.0, Sex::Male), 21.0);
    }

    #[test]
    fn test_header_only_is_empty() {
        let result = load_life_table_from_reader("age,male,female\n".as_bytes());
        assert!(matches!(result, Err(Error::EmptyLifeTable)));
    }

    #[test]
    fn test_bad_number_is_csv_error() {
        let result = load_life_table_from_reader("age,male,female\n10,abc,72\n".as_bytes());
        assert!(matches!(result, Err(Error::Csv(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_life_table("does/not/exist.csv");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
