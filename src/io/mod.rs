pub mod arrow;
pub mod csv;
pub mod parquet;

pub use arrow::DigipinCellsToArrow;
pub use csv::{
    CsvDigipinConfig, CsvSource, CsvSummary, CsvToDigipin, GeometryFormat, csv_to_digipin_csv,
};
pub use parquet::{
    DigipinCellsToGeoParquet, read_digipin_geoparquet, write_geoparquet, write_geoparquet_batches,
};
