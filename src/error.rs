/// Error type for digipin-rs operations.
#[derive(Debug, Clone, PartialEq)]
pub enum DigipinError {
    /// The coordinate lies outside the DIGIPIN covering rectangle.
    OutOfBounds,
    /// The code has the wrong length or contains a symbol outside the grid.
    InvalidCode,
    /// The grid lookup reached a state a well-formed symbol grid rules out.
    GridCalculation,
    /// File I/O or serialization error.
    IoError(String),
    /// CSV parsing or reading error.
    CsvError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    GeometryParseError(String),
}

impl std::fmt::Display for DigipinError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DigipinError::OutOfBounds => write!(f, "Coordinates are out of bounds for DIGIPIN"),
            DigipinError::InvalidCode => write!(f, "Invalid DIGIPIN code"),
            DigipinError::GridCalculation => write!(f, "Internal grid calculation error"),
            DigipinError::IoError(msg) => write!(f, "IO error: {}", msg),
            DigipinError::CsvError(msg) => write!(f, "CSV error: {}", msg),
            DigipinError::GeometryParseError(msg) => write!(f, "Geometry parse error: {}", msg),
        }
    }
}

impl std::error::Error for DigipinError {}
