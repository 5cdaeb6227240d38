//! Number formatting for CSV output.

/// Render a value with the shortest representation that round-trips.
///
/// Integral values keep a trailing `.0`; NaN is written as `nan`.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{:?}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(f64::NAN), "nan");
        assert_eq!(format_value(0.25), "0.25");
        assert_eq!(format_value(1.0), "1.0");
        assert_eq!(format_value(-2.5), "-2.5");
        assert_eq!(format_value(0.1 + 0.2), "0.30000000000000004");
    }
}
