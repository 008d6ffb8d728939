//! CSV output.
//!
//! One row per record, columns fixed to [`CareResource::FIELD_NAMES`] in
//! declaration order. The header row is always written, so an empty run
//! still produces a valid header-only file.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::{HarvestError, Result};
use crate::types::resource::CareResource;

/// Write records as CSV to an arbitrary writer.
pub fn write_csv<W: Write>(writer: W, records: &[CareResource]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(CareResource::FIELD_NAMES)
        .map_err(into_output_error)?;

    for record in records {
        csv.write_record(record.to_row()).map_err(into_output_error)?;
    }

    csv.flush().map_err(HarvestError::Output)?;
    Ok(())
}

/// Write records as CSV to a file path.
pub fn write_csv_file(path: impl AsRef<Path>, records: &[CareResource]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(HarvestError::Output)?;
    write_csv(file, records)?;

    info!(path = %path.display(), records = records.len(), "wrote csv");
    Ok(())
}

fn into_output_error(err: csv::Error) -> HarvestError {
    match err.into_kind() {
        csv::ErrorKind::Io(io) => HarvestError::Output(io),
        other => HarvestError::Output(std::io::Error::other(format!("csv: {other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> CareResource {
        CareResource::named(name)
            .with_resource_type("Support Group")
            .with_description("Weekly peer support")
            .with_source_url("https://example.org")
    }

    #[test]
    fn test_header_matches_field_names() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[]).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header, CareResource::FIELD_NAMES.join(","));
    }

    #[test]
    fn test_empty_run_writes_header_only() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[]).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_rows_follow_crawl_order() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[record("Alpha"), record("Beta")]).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Alpha,"));
        assert!(lines[2].starts_with("Beta,"));
    }

    #[test]
    fn test_missing_fields_render_empty() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[record("Alpha")]).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let row = text.lines().nth(1).unwrap();
        // 18 columns, most of them empty for this sparse record
        assert_eq!(row.matches(',').count(), CareResource::FIELD_NAMES.len() - 1);
    }

    #[test]
    fn test_write_csv_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resources.csv");

        write_csv_file(&path, &[record("Alpha")]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Alpha"));
        assert!(text.starts_with("name,"));
    }
}
