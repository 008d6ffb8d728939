//! Gzipped JSON archive output.
//!
//! The archive is the lossless alternative to CSV: the full record set
//! serialized as a JSON array and gzip-compressed. Suitable for feeding a
//! later pipeline stage without re-parsing CSV.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::info;

use crate::error::{HarvestError, Result};
use crate::types::resource::CareResource;

/// Serialize records as gzipped JSON to an arbitrary writer.
pub fn write_archive<W: Write>(writer: W, records: &[CareResource]) -> Result<()> {
    let mut encoder = GzEncoder::new(writer, Compression::default());
    let json = serde_json::to_vec(records)?;
    encoder.write_all(&json).map_err(HarvestError::Output)?;
    encoder.finish().map_err(HarvestError::Output)?;
    Ok(())
}

/// Serialize records as gzipped JSON to a file path.
pub fn write_archive_file(path: impl AsRef<Path>, records: &[CareResource]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(HarvestError::Output)?;
    write_archive(file, records)?;

    info!(path = %path.display(), records = records.len(), "wrote archive");
    Ok(())
}

/// Read records back from a gzipped JSON archive.
pub fn read_archive<R: Read>(reader: R) -> Result<Vec<CareResource>> {
    let mut decoder = GzDecoder::new(reader);
    let mut json = Vec::new();
    decoder.read_to_end(&mut json).map_err(HarvestError::Output)?;
    Ok(serde_json::from_slice(&json)?)
}

/// Read records back from an archive file.
pub fn read_archive_file(path: impl AsRef<Path>) -> Result<Vec<CareResource>> {
    let file = File::open(path.as_ref()).map_err(HarvestError::Output)?;
    read_archive(file)
}
