use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use datamask_core::Table;

use crate::errors::MaskingError;

/// Write a table as CSV, header row first, columns in table order.
pub fn write_table_csv(path: &Path, table: &Table) -> Result<u64, MaskingError> {
    let file = File::create(path).map_err(csv::Error::from)?;
    write_table(BufWriter::new(file), table)
}

/// Write a table as CSV to `output`; returns the number of data rows.
pub fn write_table<W: Write>(output: W, table: &Table) -> Result<u64, MaskingError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);

    writer.write_record(table.column_names())?;
    let mut rows = 0_u64;
    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| cell.to_field()))?;
        rows += 1;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use datamask_core::{Cell, Column};

    use super::*;

    #[test]
    fn writes_header_and_rows() {
        let table = Table {
            columns: vec![
                Column::new("name", vec![Cell::from("Ana, Maria"), Cell::Empty]),
                Column::new("age", vec![Cell::from(30_i64), Cell::from(41_i64)]),
            ],
        };

        let mut buffer = Vec::new();
        let rows = write_table(&mut buffer, &table).expect("write csv");
        let text = String::from_utf8(buffer).expect("utf8");

        assert_eq!(text, "name,age\n\"Ana, Maria\",30\n,41\n");
        assert_eq!(rows, 2);
    }

    #[test]
    fn header_only_table_writes_no_rows() {
        let table = Table {
            columns: vec![Column::new("email", Vec::new())],
        };

        let mut buffer = Vec::new();
        let rows = write_table(&mut buffer, &table).expect("write csv");

        assert_eq!(rows, 0);
        assert_eq!(String::from_utf8(buffer).expect("utf8"), "email\n");
    }
}
