mod codec;
pub mod constants;
mod grid;

pub use codec::{decode_bounds, decode_digipin, format_digipin, generate_digipin, is_valid_digipin};
pub use constants::{
    BOUNDS, CODE_LENGTH, DIVISIONS, EARTH_RADIUS_KM, FORMATTED_LENGTH, SEPARATOR,
    SEPARATOR_POSITIONS, SYMBOL_GRID,
};
pub use grid::{BoundingBox, point_to_row_col, symbol_at, symbol_position};
