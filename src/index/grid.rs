use crate::error::DigipinError;
use crate::index::constants::{BOUNDS, DIVISIONS, SYMBOL_GRID};
use geo_types::{Rect, coord};

/// Symbol -> `(row, col)` lookup, indexed by ASCII code and built at compile time.
const SYMBOL_POSITIONS: [Option<(usize, usize)>; 128] = build_symbol_positions();

const fn build_symbol_positions() -> [Option<(usize, usize)>; 128] {
    let mut table = [None; 128];
    let mut row = 0;
    while row < DIVISIONS {
        let mut col = 0;
        while col < DIVISIONS {
            let symbol = SYMBOL_GRID[row][col] as usize;
            if table[symbol].is_some() {
                panic!("symbol grid contains a duplicate symbol");
            }
            table[symbol] = Some((row, col));
            col += 1;
        }
        row += 1;
    }
    table
}

/// A latitude/longitude box narrowed one level at a time during encode and decode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// The full DIGIPIN covering rectangle.
    pub const fn covering() -> Self {
        Self {
            min_lat: BOUNDS[0],
            max_lat: BOUNDS[1],
            min_lon: BOUNDS[2],
            max_lon: BOUNDS[3],
        }
    }

    /// Inclusive on all four edges. NaN never matches.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.min_lat
            && latitude <= self.max_lat
            && longitude >= self.min_lon
            && longitude <= self.max_lon
    }

    pub fn lat_step(&self) -> f64 {
        (self.max_lat - self.min_lat) / DIVISIONS as f64
    }

    pub fn lon_step(&self) -> f64 {
        (self.max_lon - self.min_lon) / DIVISIONS as f64
    }

    /// Returns `(latitude, longitude)` of the box centre.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// Narrows the box to the sub-cell at `(row, col)`.
    ///
    /// Row 0 is the northernmost slice, so the latitude band is counted down
    /// from `max_lat` while the longitude band is counted up from `min_lon`.
    ///
    /// # Errors
    ///
    /// - [`DigipinError::GridCalculation`] - `row` or `col` is outside the grid
    pub fn subdivide(&self, row: usize, col: usize) -> Result<Self, DigipinError> {
        if row >= DIVISIONS || col >= DIVISIONS {
            return Err(DigipinError::GridCalculation);
        }
        let band = (DIVISIONS - 1 - row) as f64;
        let lat_step = self.lat_step();
        let lon_step = self.lon_step();
        let min_lon = self.min_lon + lon_step * col as f64;

        Ok(Self {
            min_lat: self.min_lat + lat_step * band,
            max_lat: self.min_lat + lat_step * (band + 1.0),
            min_lon,
            max_lon: min_lon + lon_step,
        })
    }

    /// Converts to a `geo_types::Rect` with x = longitude and y = latitude.
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.min_lon, y: self.min_lat },
            coord! { x: self.max_lon, y: self.max_lat },
        )
    }
}

/// Finds the `(row, col)` sub-cell of `bbox` holding the point.
///
/// Bands are half-open with the lower edge inclusive. Indices are clamped
/// into the grid so a point on the box's own north or east edge resolves to
/// row 0 or the last column instead of overflowing.
pub fn point_to_row_col(bbox: &BoundingBox, latitude: f64, longitude: f64) -> (usize, usize) {
    let last = (DIVISIONS - 1) as i64;

    let lat_band = ((latitude - bbox.min_lat) / bbox.lat_step()).floor() as i64;
    let lon_band = ((longitude - bbox.min_lon) / bbox.lon_step()).floor() as i64;

    let row = (last - lat_band).clamp(0, last) as usize;
    let col = lon_band.clamp(0, last) as usize;
    (row, col)
}

/// Returns the symbol labelling `(row, col)`.
pub fn symbol_at(row: usize, col: usize) -> Result<char, DigipinError> {
    SYMBOL_GRID
        .get(row)
        .and_then(|r| r.get(col))
        .map(|&b| b as char)
        .ok_or(DigipinError::GridCalculation)
}

/// Returns the `(row, col)` of a symbol, or `None` if it is not in the grid.
pub fn symbol_position(symbol: char) -> Option<(usize, usize)> {
    if symbol.is_ascii() {
        SYMBOL_POSITIONS[symbol as usize]
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_grid_symbol_maps_back() -> Result<(), DigipinError> {
        for row in 0..DIVISIONS {
            for col in 0..DIVISIONS {
                let symbol = symbol_at(row, col)?;
                assert_eq!(symbol_position(symbol), Some((row, col)));
            }
        }
        Ok(())
    }

    #[test]
    fn test_unknown_symbols() {
        for symbol in ['0', '1', 'A', 'X', 'f', '-', 'é'] {
            assert_eq!(symbol_position(symbol), None);
        }
    }

    #[test]
    fn test_symbol_at_out_of_grid() {
        assert_eq!(symbol_at(4, 0), Err(DigipinError::GridCalculation));
        assert_eq!(symbol_at(0, 4), Err(DigipinError::GridCalculation));
    }

    #[test]
    fn test_row_zero_is_north() {
        let bbox = BoundingBox::covering();
        // Just below the north edge and just above the south edge
        assert_eq!(point_to_row_col(&bbox, 38.4, 63.6), (0, 0));
        assert_eq!(point_to_row_col(&bbox, 2.6, 99.4), (3, 3));
    }

    #[test]
    fn test_outer_edges_are_clamped() {
        let bbox = BoundingBox::covering();
        assert_eq!(point_to_row_col(&bbox, 38.5, 99.5), (0, 3));
        assert_eq!(point_to_row_col(&bbox, 2.5, 63.5), (3, 0));
    }

    #[test]
    fn test_band_edge_belongs_to_upper_band() {
        let bbox = BoundingBox::covering();
        // 20.5 is the boundary between rows 1 and 2, 81.5 between cols 1 and 2
        assert_eq!(point_to_row_col(&bbox, 20.5, 81.5), (1, 2));
    }

    #[test]
    fn test_subdivide_shrinks_by_four() -> Result<(), DigipinError> {
        let bbox = BoundingBox::covering();
        let sub = bbox.subdivide(0, 0)?;

        assert!((sub.max_lat - 38.5).abs() < 1e-12);
        assert!((sub.min_lat - 29.5).abs() < 1e-12);
        assert!((sub.min_lon - 63.5).abs() < 1e-12);
        assert!((sub.max_lon - 72.5).abs() < 1e-12);

        let corner = bbox.subdivide(3, 3)?;
        assert!((corner.min_lat - 2.5).abs() < 1e-12);
        assert!((corner.max_lon - 99.5).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_subdivide_rejects_index_outside_grid() {
        let bbox = BoundingBox::covering();
        assert_eq!(bbox.subdivide(4, 0), Err(DigipinError::GridCalculation));
        assert_eq!(bbox.subdivide(0, 4), Err(DigipinError::GridCalculation));
        assert_eq!(bbox.subdivide(usize::MAX, 0), Err(DigipinError::GridCalculation));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let bbox = BoundingBox::covering();
        assert!(bbox.contains(2.5, 63.5));
        assert!(bbox.contains(38.5, 99.5));
        assert!(!bbox.contains(38.500001, 80.0));
        assert!(!bbox.contains(f64::NAN, 80.0));
    }

    #[test]
    fn test_to_rect_orientation() {
        let rect = BoundingBox::covering().to_rect();
        assert_eq!(rect.min().x, 63.5);
        assert_eq!(rect.min().y, 2.5);
        assert_eq!(rect.max().x, 99.5);
        assert_eq!(rect.max().y, 38.5);
    }
}
