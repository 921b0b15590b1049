use std::io::Read;
use std::path::Path;

use datamask_core::{Cell, Table};

use crate::errors::MaskingError;

/// Read a CSV file with a header row into a [`Table`].
///
/// Header text is kept exactly as written; fields are typed with
/// [`Cell::from_raw`].
pub fn read_table_csv(path: &Path) -> Result<Table, MaskingError> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    read_records(reader)
}

/// Same as [`read_table_csv`] for an arbitrary reader.
pub fn read_table<R: Read>(input: R) -> Result<Table, MaskingError> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input);
    read_records(reader)
}

fn read_records<R: Read>(mut reader: csv::Reader<R>) -> Result<Table, MaskingError> {
    let headers = reader
        .headers()?
        .iter()
        .map(|header| header.to_string())
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(Cell::from_raw).collect::<Vec<_>>());
    }

    Ok(Table::from_rows(headers, rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_cells_and_keeps_headers() {
        let input = "IC Number,Salary,phone_no,Notes\n900101-14-5678,5000,0123456789,\n";
        let table = read_table(input.as_bytes()).expect("read csv");

        assert_eq!(
            table.column_names(),
            vec!["IC Number", "Salary", "phone_no", "Notes"]
        );
        assert_eq!(
            table.column("Salary").map(|column| column.values.clone()),
            Some(vec![Cell::from(5000_i64)])
        );
        assert_eq!(
            table.column("phone_no").map(|column| column.values.clone()),
            Some(vec![Cell::from("0123456789")])
        );
        assert_eq!(
            table.column("Notes").map(|column| column.values.clone()),
            Some(vec![Cell::Empty])
        );
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let input = "a,b\n1,2\n3\n";
        assert!(matches!(read_table(input.as_bytes()), Err(MaskingError::Csv(_))));
    }
}
