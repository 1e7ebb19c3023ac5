//! Batch encode/decode over ordered inputs.
//!
//! Every function returns one result per input, in input order. A failing item
//! is reported in its own slot and never stops the rest of the batch.

use crate::coord::{Coordinate, LatLon};
use crate::error::DigipinError;
use crate::index::{decode_digipin, generate_digipin};
use log::debug;
use rayon::prelude::*;

/// Encodes every coordinate.
///
/// ```
/// use digipin_rs::{DigipinError, bulk_encode};
///
/// let results = bulk_encode(&[(12.9716, 77.5946), (40.0, 78.0)]);
/// assert_eq!(results[0].as_deref(), Ok("4P3-JK8-52C9"));
/// assert_eq!(results[1], Err(DigipinError::OutOfBounds));
/// ```
pub fn bulk_encode<C: LatLon>(coords: &[C]) -> Vec<Result<String, DigipinError>> {
    let results: Vec<_> = coords
        .iter()
        .map(|c| generate_digipin(c.lat(), c.lon()))
        .collect();
    log_failures("encode", &results);
    results
}

/// Decodes every code.
pub fn bulk_decode<S: AsRef<str>>(codes: &[S]) -> Vec<Result<Coordinate, DigipinError>> {
    let results: Vec<_> = codes
        .iter()
        .map(|code| decode_digipin(code.as_ref()))
        .collect();
    log_failures("decode", &results);
    results
}

/// Same as [`bulk_encode`], spread over the rayon thread pool.
pub fn par_bulk_encode<C: LatLon + Sync>(coords: &[C]) -> Vec<Result<String, DigipinError>> {
    let results: Vec<_> = coords
        .par_iter()
        .map(|c| generate_digipin(c.lat(), c.lon()))
        .collect();
    log_failures("parallel encode", &results);
    results
}

/// Same as [`bulk_decode`], spread over the rayon thread pool.
pub fn par_bulk_decode<S: AsRef<str> + Sync>(
    codes: &[S],
) -> Vec<Result<Coordinate, DigipinError>> {
    let results: Vec<_> = codes
        .par_iter()
        .map(|code| decode_digipin(code.as_ref()))
        .collect();
    log_failures("parallel decode", &results);
    results
}

fn log_failures<T>(op: &str, results: &[Result<T, DigipinError>]) {
    let failed = results.iter().filter(|r| r.is_err()).count();
    debug!("bulk {}: {} items, {} failed", op, results.len(), failed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_encode_keeps_order_and_failures() {
        let coords = [
            Coordinate::new(12.9716, 77.5946),
            Coordinate::new(28.6139, 77.2090),
            Coordinate::new(40.0, 78.0),
        ];
        let results = bulk_encode(&coords);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_deref(), Ok("4P3-JK8-52C9"));
        assert_eq!(results[1].as_deref(), Ok("39J-438-TJC7"));
        assert_eq!(results[2], Err(DigipinError::OutOfBounds));
    }

    #[test]
    fn test_bulk_decode_keeps_order_and_failures() {
        let codes = ["4P3-JK8-52C9", "39J-49L-L8T4", "XXXX-XXXX-XX"];
        let results = bulk_decode(&codes);

        assert_eq!(results.len(), 3);
        match &results[0] {
            Ok(c) => assert!((c.latitude - 12.9716).abs() < 0.01),
            Err(e) => panic!("first code should decode: {}", e),
        }
        match &results[1] {
            Ok(c) => assert!((c.latitude - 28.6228).abs() < 0.01),
            Err(e) => panic!("second code should decode: {}", e),
        }
        assert_eq!(results[2], Err(DigipinError::InvalidCode));
    }

    #[test]
    fn test_single_failure_matches_individual_calls() {
        let codes: Vec<String> = vec![
            "4P3-JK8-52C9".into(),
            "2TF-J7F-86MM".into(),
            "39J-49L-L8T".into(),
            "M37-79K-6J2M".into(),
        ];
        let results = bulk_decode(&codes);

        for (i, (code, result)) in codes.iter().zip(&results).enumerate() {
            if i == 2 {
                assert!(result.is_err());
            } else {
                assert_eq!(result, &decode_digipin(code));
            }
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let coords: Vec<(f64, f64)> = (0..200)
            .map(|i| (2.0 + i as f64 * 0.19, 63.0 + i as f64 * 0.19))
            .collect();

        let sequential = bulk_encode(&coords);
        let parallel = par_bulk_encode(&coords);
        assert_eq!(sequential, parallel);
        assert!(sequential.iter().any(|r| r.is_err()));
        assert!(sequential.iter().any(|r| r.is_ok()));

        let codes: Vec<String> = sequential
            .iter()
            .map(|r| r.clone().unwrap_or_else(|_| "bad".to_string()))
            .collect();
        assert_eq!(bulk_decode(&codes), par_bulk_decode(&codes));
    }

    #[test]
    fn test_empty_input() {
        let empty: [(f64, f64); 0] = [];
        assert!(bulk_encode(&empty).is_empty());
        assert!(par_bulk_decode::<&str>(&[]).is_empty());
    }
}
