use crate::cell::DigipinCell;
use crate::error::DigipinError;
use crate::io::arrow::DigipinCellsToArrow;
use arrow_array::{Array, RecordBatch, StringArray};
use geoparquet::writer::{
    GeoParquetRecordBatchEncoder, GeoParquetWriterEncoding, GeoParquetWriterOptionsBuilder,
};
use log::debug;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::fs::File;
use std::path::Path;

/// Cells per record batch when writing a cell collection.
pub const CELLS_PER_BATCH: usize = 65_536;

/// Key of the GeoParquet file metadata entry.
const GEO_METADATA_KEY: &str = "geo";

fn io_error(e: impl std::fmt::Display) -> DigipinError {
    DigipinError::IoError(e.to_string())
}

/// Writes a RecordBatch holding a geoarrow geometry column as a WKB-encoded GeoParquet file.
pub fn write_geoparquet(batch: &RecordBatch, path: impl AsRef<Path>) -> Result<(), DigipinError> {
    write_geoparquet_batches(std::slice::from_ref(batch), path)
}

/// Writes batches sharing one schema to a single GeoParquet file.
///
/// The `geo` metadata (bounding box, geometry types, CRS) is accumulated over
/// every batch and written once the last batch is in.
///
/// # Errors
///
/// - [`DigipinError::IoError`] - No batches, mismatched schemas, or the file cannot be written
pub fn write_geoparquet_batches(
    batches: &[RecordBatch],
    path: impl AsRef<Path>,
) -> Result<(), DigipinError> {
    let first = batches
        .first()
        .ok_or_else(|| io_error("no record batches to write"))?;

    let options = GeoParquetWriterOptionsBuilder::default()
        .set_encoding(GeoParquetWriterEncoding::WKB)
        .build();
    let mut encoder =
        GeoParquetRecordBatchEncoder::try_new(&first.schema(), &options).map_err(io_error)?;

    let path = path.as_ref();
    let file = File::create(path).map_err(io_error)?;
    let mut writer =
        ArrowWriter::try_new(file, encoder.target_schema(), None).map_err(io_error)?;

    let mut rows = 0;
    for batch in batches {
        let encoded = encoder.encode_record_batch(batch).map_err(io_error)?;
        writer.write(&encoded).map_err(io_error)?;
        rows += batch.num_rows();
    }

    writer.append_key_value_metadata(encoder.into_keyvalue().map_err(io_error)?);
    writer.finish().map_err(io_error)?;

    debug!(
        "wrote {} rows in {} batches to {}",
        rows,
        batches.len(),
        path.display()
    );
    Ok(())
}

/// Reads the cells back from a GeoParquet file written by [`DigipinCellsToGeoParquet`].
///
/// Cells are rebuilt from the `code` column, so every stored code is decoded
/// and validated again; the stored geometry is not trusted.
///
/// # Errors
///
/// - [`DigipinError::IoError`] - Unreadable file, no `geo` metadata, or no `code` column
/// - [`DigipinError::InvalidCode`] - A stored code is null or does not decode
pub fn read_digipin_geoparquet(path: impl AsRef<Path>) -> Result<Vec<DigipinCell>, DigipinError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(io_error)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(io_error)?;

    let has_geo = builder
        .metadata()
        .file_metadata()
        .key_value_metadata()
        .is_some_and(|kv| kv.iter().any(|entry| entry.key == GEO_METADATA_KEY));
    if !has_geo {
        return Err(io_error(format!(
            "{} has no GeoParquet metadata",
            path.display()
        )));
    }

    let mut cells = Vec::new();
    for batch in builder.build().map_err(io_error)? {
        let batch = batch.map_err(io_error)?;
        let codes = batch
            .column_by_name("code")
            .and_then(|col| col.as_any().downcast_ref::<StringArray>())
            .ok_or_else(|| io_error("missing utf8 'code' column"))?;

        cells.reserve(codes.len());
        for i in 0..codes.len() {
            if codes.is_null(i) {
                return Err(DigipinError::InvalidCode);
            }
            cells.push(DigipinCell::from_code(codes.value(i))?);
        }
    }

    debug!("read {} cells from {}", cells.len(), path.display());
    Ok(cells)
}

pub trait DigipinCellsToGeoParquet: DigipinCellsToArrow {
    /// Writes the cells to a GeoParquet file, [`CELLS_PER_BATCH`] cells per batch.
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), DigipinError>;
}

impl DigipinCellsToGeoParquet for [DigipinCell] {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), DigipinError> {
        if self.is_empty() {
            return write_geoparquet(&self.to_record_batch()?, path);
        }
        let batches = self
            .chunks(CELLS_PER_BATCH)
            .map(|chunk| chunk.to_record_batch())
            .collect::<Result<Vec<_>, _>>()?;
        write_geoparquet_batches(&batches, path)
    }
}

impl DigipinCellsToGeoParquet for Vec<DigipinCell> {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), DigipinError> {
        self.as_slice().to_geoparquet(path)
    }
}
