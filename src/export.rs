//! CSV export of table rows.

use std::io;
use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use tracing::info;

use crate::model::Resource;

/// Write `headers` then every record as CSV.
pub fn write_records<W, I>(writer: W, headers: &[&str], records: I) -> color_eyre::Result<usize>
where
    W: io::Write,
    I: IntoIterator<Item = Vec<String>>,
{
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(headers)
        .wrap_err("Failed to write CSV header")?;
    let mut count = 0;
    for record in records {
        count += 1;
        wtr.write_record(&record)
            .wrap_err_with(|| format!("Failed to write CSV record {count}"))?;
    }
    wtr.flush().wrap_err("Failed to flush CSV writer")?;
    Ok(count)
}

pub fn records_to_string<I>(headers: &[&str], records: I) -> color_eyre::Result<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut buffer = Vec::new();
    write_records(&mut buffer, headers, records)?;
    String::from_utf8(buffer).wrap_err("CSV output is not valid UTF-8")
}

/// Write records to `path`, replacing any existing file.
pub fn export_records_to_file<I>(path: &Path, headers: &[&str], records: I) -> color_eyre::Result<()>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let file = std::fs::File::create(path)
        .wrap_err_with(|| format!("Failed to create {}", path.display()))?;
    let rows = write_records(file, headers, records)?;
    info!(path = %path.display(), rows, "Exported CSV");
    Ok(())
}

/// Write `rows` as CSV, header first.
pub fn write_csv<R: Resource, W: io::Write>(writer: W, rows: &[R]) -> color_eyre::Result<()> {
    write_records(writer, R::csv_headers(), rows.iter().map(Resource::csv_record))?;
    Ok(())
}

/// CSV text for `rows`, as copied to the clipboard.
pub fn to_csv_string<R: Resource>(rows: &[R]) -> color_eyre::Result<String> {
    records_to_string(R::csv_headers(), rows.iter().map(Resource::csv_record))
}

/// Default export file for `R` inside `dir`, e.g. `users.csv`.
pub fn export_path<R: Resource>(dir: &Path) -> PathBuf {
    dir.join(format!("{}.csv", R::NAME))
}

/// Export `rows` to `path`, replacing any existing file.
pub fn export_to_file<R: Resource>(path: &Path, rows: &[R]) -> color_eyre::Result<()> {
    export_records_to_file(path, R::csv_headers(), rows.iter().map(Resource::csv_record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn categories() -> Vec<Category> {
        vec![
            Category {
                id: 1,
                name: "Émetteurs FM/AM".to_string(),
            },
            Category {
                id: 2,
                name: "Micros, \"studio\"".to_string(),
            },
        ]
    }

    #[test]
    fn test_csv_string_quotes_fields() {
        let csv = to_csv_string(&categories()).unwrap();
        assert_eq!(
            csv,
            "ID,Name\n1,Émetteurs FM/AM\n2,\"Micros, \"\"studio\"\"\"\n"
        );
    }

    #[test]
    fn test_empty_rows_write_header_only() {
        let csv = to_csv_string::<Category>(&[]).unwrap();
        assert_eq!(csv, "ID,Name\n");
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_path::<Category>(dir.path());
        assert!(path.ends_with("categories.csv"));

        export_to_file(&path, &categories()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 3);
        assert!(written.starts_with("ID,Name\n"));
    }

    #[test]
    fn test_records_count_and_quote() {
        let mut buffer = Vec::new();
        let count = write_records(
            &mut buffer,
            &["Metric", "Value"],
            vec![
                vec!["Total Revenue".to_string(), "1,5 €".to_string()],
                vec!["Total Users".to_string(), "10".to_string()],
            ],
        )
        .unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Metric,Value\nTotal Revenue,\"1,5 €\"\nTotal Users,10\n"
        );
    }
}
