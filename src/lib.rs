//! # digipin-rs
//!
//! Encode and decode India Post DIGIPIN codes: 10-symbol grid locators
//! (`XXX-XXX-XXXX`) addressing roughly 3.8m x 3.8m cells over a fixed
//! rectangle covering India (latitude 2.5 to 38.5, longitude 63.5 to 99.5).
//!
//! ### 1. Codes and coordinates
//!
//! ```
//! use digipin_rs::{decode_digipin, generate_digipin};
//!
//! # fn main() -> Result<(), digipin_rs::DigipinError> {
//! let code = generate_digipin(28.622788, 77.213033)?;
//! assert_eq!(code, "39J-49L-L8T4");
//!
//! let center = decode_digipin(&code)?;
//! println!("{}", center);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `DigipinCell` - Single Cell Operations
//!
//! ```
//! use digipin_rs::DigipinCell;
//!
//! # fn main() -> Result<(), digipin_rs::DigipinError> {
//! let cell = DigipinCell::from_code("4P3JK852C9")?;
//! println!("{} at ({}, {})", cell.code, cell.latitude(), cell.longitude());
//! let polygon = cell.to_polygon();
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. Batches
//!
//! ```
//! use digipin_rs::bulk_decode;
//!
//! let results = bulk_decode(&["4P3-JK8-52C9", "not a code"]);
//! assert!(results[0].is_ok());
//! assert!(results[1].is_err());
//! ```
//!
//! ### 4. `CsvToDigipin` - CSV File Conversion
//!
//! ```no_run
//! use digipin_rs::{CsvDigipinConfig, CsvToDigipin, GeometryFormat};
//!
//! let config = CsvDigipinConfig::from_coords("Latitude", "Longitude")
//!     .exclude(vec!["Notes".into()])
//!     .with_cell_geometry(GeometryFormat::Wkt);
//!
//! "input.csv".to_digipin_csv("output.csv", &config).unwrap();
//! ```

pub mod bulk;
pub mod cell;
pub mod coord;
pub mod error;
pub mod geom;
pub mod index;
pub mod io;

pub use bulk::{bulk_decode, bulk_encode, par_bulk_decode, par_bulk_encode};
pub use cell::DigipinCell;
pub use coord::{Coordinate, LatLon, distance_between_digipins, haversine_distance};
pub use error::DigipinError;
pub use geom::{parse_geometry, polygon_to_geojson, polygon_to_wkt};
pub use index::{
    BOUNDS, BoundingBox, CODE_LENGTH, EARTH_RADIUS_KM, SEPARATOR, SYMBOL_GRID, decode_bounds,
    decode_digipin, format_digipin, generate_digipin, is_valid_digipin,
};
pub use io::{
    CsvDigipinConfig, CsvSource, CsvSummary, CsvToDigipin, DigipinCellsToArrow,
    DigipinCellsToGeoParquet, GeometryFormat, csv_to_digipin_csv, read_digipin_geoparquet,
    write_geoparquet, write_geoparquet_batches,
};

pub use geo_types;
