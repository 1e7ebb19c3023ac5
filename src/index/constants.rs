/// Covering rectangle `[min_lat, max_lat, min_lon, max_lon]` in decimal degrees.
pub const BOUNDS: [f64; 4] = [2.5, 38.5, 63.5, 99.5];

/// Number of rows and columns the current box is split into at every level.
pub const DIVISIONS: usize = 4;

/// Number of subdivision levels, and so of data symbols, in a code.
pub const CODE_LENGTH: usize = 10;

/// Character inserted between symbol groups.
pub const SEPARATOR: char = '-';

/// Levels (1-based) after which a separator is written: `XXX-XXX-XXXX`.
pub const SEPARATOR_POSITIONS: [usize; 2] = [3, 6];

/// Length of a formatted code including separators.
pub const FORMATTED_LENGTH: usize = CODE_LENGTH + SEPARATOR_POSITIONS.len();

/// The official DIGIPIN symbol grid, used at every level.
///
/// Row 0 is the northernmost band, column 0 the westernmost.
pub const SYMBOL_GRID: [[u8; DIVISIONS]; DIVISIONS] = [
    [b'F', b'C', b'9', b'8'],
    [b'J', b'3', b'2', b'7'],
    [b'K', b'4', b'5', b'6'],
    [b'L', b'M', b'P', b'T'],
];

/// Mean Earth radius in kilometres used for haversine distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;
