use crate::coord::Coordinate;
use crate::error::DigipinError;
use crate::index::constants::{
    CODE_LENGTH, FORMATTED_LENGTH, SEPARATOR, SEPARATOR_POSITIONS,
};
use crate::index::grid::{BoundingBox, point_to_row_col, symbol_at, symbol_position};

/// Generates the DIGIPIN code for a latitude/longitude pair.
///
/// The covering rectangle is narrowed [`CODE_LENGTH`] times. At every level the
/// box is split into a 4x4 grid, the symbol of the sub-cell holding the point is
/// written out and the box is replaced by that sub-cell. Separators follow the
/// 3rd and 6th symbol, giving codes of the form `XXX-XXX-XXXX`.
///
/// # Example
/// ```
/// use digipin_rs::generate_digipin;
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// // Dak Bhawan, New Delhi
/// let code = generate_digipin(28.622788, 77.213033)?;
/// assert_eq!(code, "39J-49L-L8T4");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// - [`DigipinError::OutOfBounds`] - The point lies outside the covering
///   rectangle (edges are inside), or either value is NaN
pub fn generate_digipin(latitude: f64, longitude: f64) -> Result<String, DigipinError> {
    let mut bbox = BoundingBox::covering();
    if !bbox.contains(latitude, longitude) {
        return Err(DigipinError::OutOfBounds);
    }

    let mut code = String::with_capacity(FORMATTED_LENGTH);
    for level in 1..=CODE_LENGTH {
        let (row, col) = point_to_row_col(&bbox, latitude, longitude);
        code.push(symbol_at(row, col)?);
        if SEPARATOR_POSITIONS.contains(&level) {
            code.push(SEPARATOR);
        }
        bbox = bbox.subdivide(row, col)?;
    }

    Ok(code)
}

/// Resolves a code to the bounding box of the cell it addresses.
///
/// Separators are stripped wherever they appear; only the number of remaining
/// symbols is checked.
///
/// # Errors
///
/// - [`DigipinError::InvalidCode`] - Wrong symbol count or a symbol outside the grid
pub fn decode_bounds(code: &str) -> Result<BoundingBox, DigipinError> {
    let symbols = strip_separators(code)?;

    let mut bbox = BoundingBox::covering();
    for symbol in symbols {
        let (row, col) = symbol_position(symbol).ok_or(DigipinError::InvalidCode)?;
        bbox = bbox.subdivide(row, col)?;
    }
    Ok(bbox)
}

/// Decodes a DIGIPIN code to the centre of its cell.
///
/// # Example
/// ```
/// use digipin_rs::decode_digipin;
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// let center = decode_digipin("39J-49L-L8T4")?;
/// assert!((center.latitude - 28.622788).abs() < 0.005);
/// assert!((center.longitude - 77.213033).abs() < 0.005);
///
/// // Separators are optional
/// assert_eq!(center, decode_digipin("39J49LL8T4")?);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// - [`DigipinError::InvalidCode`] - Wrong symbol count or a symbol outside the grid
pub fn decode_digipin(code: &str) -> Result<Coordinate, DigipinError> {
    let (latitude, longitude) = decode_bounds(code)?.center();
    Ok(Coordinate::new(latitude, longitude))
}

/// Returns `true` if `code` decodes.
pub fn is_valid_digipin(code: &str) -> bool {
    decode_bounds(code).is_ok()
}

/// Re-formats a code with separators in their canonical places.
///
/// ```
/// use digipin_rs::format_digipin;
///
/// assert_eq!(format_digipin("39J49LL8T4").unwrap(), "39J-49L-L8T4");
/// assert_eq!(format_digipin("39-J49L-L8T4").unwrap(), "39J-49L-L8T4");
/// ```
pub fn format_digipin(code: &str) -> Result<String, DigipinError> {
    let symbols = strip_separators(code)?;

    let mut formatted = String::with_capacity(FORMATTED_LENGTH);
    for (i, symbol) in symbols.into_iter().enumerate() {
        symbol_position(symbol).ok_or(DigipinError::InvalidCode)?;
        formatted.push(symbol);
        if SEPARATOR_POSITIONS.contains(&(i + 1)) {
            formatted.push(SEPARATOR);
        }
    }
    Ok(formatted)
}

fn strip_separators(code: &str) -> Result<Vec<char>, DigipinError> {
    let symbols: Vec<char> = code.chars().filter(|&c| c != SEPARATOR).collect();
    if symbols.len() != CODE_LENGTH {
        return Err(DigipinError::InvalidCode);
    }
    Ok(symbols)
}
