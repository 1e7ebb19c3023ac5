use crate::cell::DigipinCell;
use crate::error::DigipinError;
use crate::geom::{parse_geometry, polygon_to_geojson, polygon_to_wkt};
use log::{debug, warn};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

/// Resolved header positions for the configured source.
enum SourceIndices {
    Coordinates { lat_idx: usize, lon_idx: usize },
    Geometry(usize),
    Code(usize),
}

/// Output format for cell polygon geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

/// Specifies where each CSV row gets its location from.
#[derive(Debug, Clone)]
pub enum CsvSource {
    /// Separate latitude and longitude columns, encoded to a `digipin` column
    CoordinateColumns {
        lat_column: String,
        lon_column: String,
    },
    /// A single WKT or GeoJSON geometry column (lon/lat), encoded to a `digipin` column
    GeometryColumn(String),
    /// A column of DIGIPIN codes, decoded to `latitude` and `longitude` columns
    CodeColumn(String),
}

/// Configuration for CSV conversion.
#[derive(Debug, Clone)]
pub struct CsvDigipinConfig {
    pub source: CsvSource,
    pub exclude_columns: Vec<String>,
    pub include_cell_geometry: Option<GeometryFormat>,
}

/// Counts reported by [`csv_to_digipin_csv`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CsvSummary {
    /// Data rows written to the output
    pub rows: usize,
    /// Rows whose `error` column is set
    pub failures: usize,
}

impl CsvDigipinConfig {
    /// Encode rows from separate latitude/longitude columns.
    ///
    /// # Example
    /// ```
    /// use digipin_rs::CsvDigipinConfig;
    ///
    /// let config = CsvDigipinConfig::from_coords("Latitude", "Longitude");
    /// ```
    pub fn from_coords(lat_column: impl Into<String>, lon_column: impl Into<String>) -> Self {
        Self::with_source(CsvSource::CoordinateColumns {
            lat_column: lat_column.into(),
            lon_column: lon_column.into(),
        })
    }

    /// Encode rows from a WKT or GeoJSON geometry column.
    ///
    /// Points map to their cell, polygons to the cell of their centroid.
    /// Multi-geometries write one output row per member.
    pub fn from_geometry(geometry_column: impl Into<String>) -> Self {
        Self::with_source(CsvSource::GeometryColumn(geometry_column.into()))
    }

    /// Decode rows from a column of DIGIPIN codes.
    pub fn from_code(code_column: impl Into<String>) -> Self {
        Self::with_source(CsvSource::CodeColumn(code_column.into()))
    }

    fn with_source(source: CsvSource) -> Self {
        Self {
            source,
            exclude_columns: Vec::new(),
            include_cell_geometry: None,
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    /// Include the cell polygon in a `cell_geometry` column.
    pub fn with_cell_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_cell_geometry = Some(format);
        self
    }
}

pub trait CsvToDigipin {
    fn to_digipin_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvDigipinConfig,
    ) -> Result<CsvSummary, DigipinError>;
}

impl<P: AsRef<Path>> CsvToDigipin for P {
    fn to_digipin_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvDigipinConfig,
    ) -> Result<CsvSummary, DigipinError> {
        csv_to_digipin_csv(self, output_path, config)
    }
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize, DigipinError> {
    if name.is_empty() {
        return Err(DigipinError::CsvError(
            "Column name cannot be empty".to_string(),
        ));
    }
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| DigipinError::CsvError(format!("Column '{}' not found", name)))
}

fn field<'r>(record: &'r csv::StringRecord, idx: usize) -> Result<&'r str, DigipinError> {
    record
        .get(idx)
        .map(str::trim)
        .ok_or_else(|| DigipinError::CsvError(format!("Missing column at index {}", idx)))
}

fn parse_number(s: &str, name: &str) -> Result<f64, DigipinError> {
    s.parse()
        .map_err(|_| DigipinError::CsvError(format!("Invalid {}: '{}'", name, s)))
}

/// Resolves the cells for one record. Errors here are reported per row.
fn record_cells(
    record: &csv::StringRecord,
    source: &SourceIndices,
) -> Result<Vec<DigipinCell>, DigipinError> {
    match source {
        SourceIndices::Coordinates { lat_idx, lon_idx } => {
            let lat = parse_number(field(record, *lat_idx)?, "latitude")?;
            let lon = parse_number(field(record, *lon_idx)?, "longitude")?;
            Ok(vec![DigipinCell::from_coordinate(&(lat, lon))?])
        }
        SourceIndices::Geometry(idx) => {
            let geom = parse_geometry(field(record, *idx)?)?;
            let cells = DigipinCell::from_geometry(geom)?;
            if cells.is_empty() {
                return Err(DigipinError::GeometryParseError(
                    "geometry has no location".to_string(),
                ));
            }
            Ok(cells)
        }
        SourceIndices::Code(idx) => Ok(vec![DigipinCell::from_code(field(record, *idx)?)?]),
    }
}

/// Converts a CSV file into a CSV file with DIGIPIN columns.
///
/// Streams output row by row. In encode mode a `digipin` column is prepended;
/// in decode mode `latitude` and `longitude` are. A trailing `error` column is
/// always written: rows whose location cannot be parsed, is out of bounds, or
/// holds an invalid code keep their other fields, leave the generated columns
/// empty, and carry the error message instead of aborting the conversion.
///
/// # Example with coordinate columns
///
/// ```no_run
/// use digipin_rs::{csv_to_digipin_csv, CsvDigipinConfig, GeometryFormat};
///
/// let config = CsvDigipinConfig::from_coords("Latitude", "Longitude")
///     .with_cell_geometry(GeometryFormat::Wkt);
///
/// csv_to_digipin_csv("post_offices.csv", "output.csv", &config).unwrap();
/// ```
///
/// # Example decoding codes
///
/// ```no_run
/// use digipin_rs::{CsvDigipinConfig, CsvToDigipin};
///
/// let config = CsvDigipinConfig::from_code("DIGIPIN");
/// "addresses.csv".to_digipin_csv("decoded.csv", &config).unwrap();
/// ```
///
/// # Errors
///
/// - [`DigipinError::CsvError`] - Unreadable input or a configured column is missing
/// - [`DigipinError::IoError`] - The output file cannot be created
pub fn csv_to_digipin_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvDigipinConfig,
) -> Result<CsvSummary, DigipinError> {
    let file = File::open(csv_path).map_err(|e| DigipinError::CsvError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| DigipinError::CsvError(e.to_string()))?
        .clone();

    // Source columns are always dropped from the output
    let (source_indices, mut exclude_indices) = match &config.source {
        CsvSource::CoordinateColumns {
            lat_column,
            lon_column,
        } => {
            let lat_idx = find_column(&headers, lat_column)?;
            let lon_idx = find_column(&headers, lon_column)?;
            (
                SourceIndices::Coordinates { lat_idx, lon_idx },
                HashSet::from([lat_idx, lon_idx]),
            )
        }
        CsvSource::GeometryColumn(col) => {
            let idx = find_column(&headers, col)?;
            (SourceIndices::Geometry(idx), HashSet::from([idx]))
        }
        CsvSource::CodeColumn(col) => {
            let idx = find_column(&headers, col)?;
            (SourceIndices::Code(idx), HashSet::from([idx]))
        }
    };

    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    let decoding = matches!(source_indices, SourceIndices::Code(_));
    let generated_width = if decoding { 2 } else { 1 };

    let out_file = File::create(output_path).map_err(|e| DigipinError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = if decoding {
        vec!["latitude", "longitude"]
    } else {
        vec!["digipin"]
    };
    if config.include_cell_geometry.is_some() {
        header_row.push("cell_geometry");
    }
    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    header_row.push("error");
    writer
        .write_record(&header_row)
        .map_err(|e| DigipinError::CsvError(e.to_string()))?;

    let mut summary = CsvSummary::default();
    let passthrough = |record: &csv::StringRecord| -> Vec<String> {
        record
            .iter()
            .enumerate()
            .filter(|(i, _)| !exclude_indices.contains(i))
            .map(|(_, f)| f.to_string())
            .collect()
    };

    for (line, result) in reader.records().enumerate() {
        let record = result.map_err(|e| DigipinError::CsvError(e.to_string()))?;

        let mut rows: Vec<Vec<String>> = Vec::new();
        match record_cells(&record, &source_indices) {
            Ok(cells) => {
                for cell in cells {
                    let mut row = if decoding {
                        vec![cell.latitude().to_string(), cell.longitude().to_string()]
                    } else {
                        vec![cell.code.clone()]
                    };
                    if let Some(format) = config.include_cell_geometry {
                        let polygon = cell.to_polygon();
                        row.push(match format {
                            GeometryFormat::Wkt => polygon_to_wkt(&polygon),
                            GeometryFormat::GeoJson => polygon_to_geojson(&polygon),
                        });
                    }
                    row.extend(passthrough(&record));
                    row.push(String::new());
                    rows.push(row);
                }
            }
            Err(e) => {
                warn!("row {}: {}", line + 1, e);
                let mut row = vec![String::new(); generated_width];
                if config.include_cell_geometry.is_some() {
                    row.push(String::new());
                }
                row.extend(passthrough(&record));
                row.push(e.to_string());
                rows.push(row);
                summary.failures += 1;
            }
        }

        for row in rows {
            writer
                .write_record(&row)
                .map_err(|e| DigipinError::CsvError(e.to_string()))?;
            summary.rows += 1;
        }
    }

    writer
        .flush()
        .map_err(|e| DigipinError::CsvError(e.to_string()))?;

    debug!(
        "csv conversion wrote {} rows, {} failed",
        summary.rows, summary.failures
    );
    Ok(summary)
}
