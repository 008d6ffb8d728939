//! Result serialization: CSV for spreadsheets, gzipped JSON for pipelines.

pub mod archive;
pub mod csv;

pub use self::archive::{read_archive, read_archive_file, write_archive, write_archive_file};
pub use self::csv::{write_csv, write_csv_file};
