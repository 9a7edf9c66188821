//! Google encoded-polyline decoding
//!
//! Each coordinate is stored as the zig-zag encoded delta from the previous
//! one, in 5-bit chunks offset by 63, at a precision of 1e-5 degrees.

use thiserror::Error;

use crate::types::Coordinate;

/// Scale factor between encoded integers and degrees
pub const POLYLINE_PRECISION: f64 = 1e-5;

/// Errors raised while decoding an encoded polyline
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolylineError {
    #[error("invalid polyline character {character:?} at byte {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("polyline ends in the middle of a value")]
    Truncated,

    #[error("polyline value at byte {position} is too long")]
    Overflow { position: usize },
}

/// Decode an encoded polyline into coordinates
pub fn decode_polyline(encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while index < bytes.len() {
        lat += next_delta(bytes, &mut index)?;
        if index >= bytes.len() {
            return Err(PolylineError::Truncated);
        }
        lng += next_delta(bytes, &mut index)?;

        points.push(Coordinate::new(
            lat as f64 * POLYLINE_PRECISION,
            lng as f64 * POLYLINE_PRECISION,
        ));
    }

    Ok(points)
}

fn next_delta(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let start = *index;
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes.get(*index).ok_or(PolylineError::Truncated)?;
        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidCharacter {
                character: byte as char,
                position: *index,
            });
        }
        if shift > 30 {
            return Err(PolylineError::Overflow { position: start });
        }
        *index += 1;

        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &Coordinate, lat: f64, lng: f64) {
        assert!((actual.lat - lat).abs() < 1e-9, "lat {} != {}", actual.lat, lat);
        assert!((actual.lng - lng).abs() < 1e-9, "lng {} != {}", actual.lng, lng);
    }

    #[test]
    fn test_decode_reference_polyline() {
        let points = decode_polyline("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
        assert_eq!(points.len(), 3);
        assert_close(&points[0], 38.5, -120.2);
        assert_close(&points[1], 40.7, -120.95);
        assert_close(&points[2], 43.252, -126.453);
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode_polyline("").unwrap(), Vec::new());
    }

    #[test]
    fn test_decode_single_zero_point() {
        // "?" encodes a zero delta
        let points = decode_polyline("??").unwrap();
        assert_eq!(points, vec![Coordinate::new(0.0, 0.0)]);
    }

    #[test]
    fn test_decode_truncated_latitude_only() {
        assert_eq!(decode_polyline("_p~iF"), Err(PolylineError::Truncated));
    }

    #[test]
    fn test_decode_truncated_mid_value() {
        // '_' has the continuation bit set and nothing follows
        assert_eq!(decode_polyline("_p~iF~ps|"), Err(PolylineError::Truncated));
    }

    #[test]
    fn test_decode_invalid_character() {
        assert_eq!(
            decode_polyline("_p~iF ps|U"),
            Err(PolylineError::InvalidCharacter {
                character: ' ',
                position: 5
            })
        );
    }
}
