//! Scale conversion and clamping primitives.
//!
//! Every number that leaves the scoring core goes through this module, so the
//! canonical 0-10 bound holds no matter how malformed the oracle's numbers are.

use serde_json::Value;

/// Lower bound of the canonical scale
pub const SCALE_MIN: f64 = 0.0;
/// Upper bound of the canonical scale
pub const SCALE_MAX: f64 = 10.0;
/// The scale the oracle reports dimension scores on
pub const ORACLE_SCALE: f64 = 100.0;

/// Bound a value into `[lo, hi]`. NaN collapses to `lo`.
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        lo
    } else {
        value.max(lo).min(hi)
    }
}

/// Clamp an optional value onto the canonical scale; absent becomes 0.
pub fn clamp_score(value: Option<f64>) -> f64 {
    value.map_or(SCALE_MIN, |v| clamp(v, SCALE_MIN, SCALE_MAX))
}

/// Read a JSON value as a number.
///
/// Numbers and numeric strings qualify; booleans, null, arrays, objects and
/// free text do not.
pub fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Clamp an untyped JSON value; anything non-numeric becomes 0.
pub fn clamp_value(value: &Value) -> f64 {
    clamp_score(numeric(value))
}

/// Convert a value from `from_scale` to the canonical 0-10 scale, then clamp.
///
/// A non-positive or non-finite scale is treated as already canonical.
pub fn convert(value: Option<f64>, from_scale: f64) -> f64 {
    let value = match value {
        Some(v) => v,
        None => return SCALE_MIN,
    };
    if !from_scale.is_finite() || from_scale <= 0.0 {
        return clamp(value, SCALE_MIN, SCALE_MAX);
    }
    clamp(value * SCALE_MAX / from_scale, SCALE_MIN, SCALE_MAX)
}

/// Convert an untyped JSON value from `from_scale`; non-numeric becomes 0.
pub fn convert_value(value: &Value, from_scale: f64) -> f64 {
    convert(numeric(value), from_scale)
}

/// Round to a fixed number of decimal places for presentation.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clamp_bounds() {
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(7.5, 0.0, 10.0), 7.5);
        assert_eq!(clamp(f64::NAN, 0.0, 10.0), 0.0);
        assert_eq!(clamp(f64::INFINITY, 0.0, 10.0), 10.0);
        assert_eq!(clamp(f64::NEG_INFINITY, 0.0, 10.0), 0.0);
    }

    #[test]
    fn test_absent_and_non_numeric_become_zero() {
        assert_eq!(clamp_score(None), 0.0);
        assert_eq!(clamp_value(&Value::Null), 0.0);
        assert_eq!(clamp_value(&json!("excellent")), 0.0);
        assert_eq!(clamp_value(&json!(true)), 0.0);
        assert_eq!(clamp_value(&json!([1, 2])), 0.0);
        assert_eq!(clamp_value(&json!({"v": 3})), 0.0);
    }

    #[test]
    fn test_numeric_strings_are_read() {
        assert_eq!(numeric(&json!(" 85 ")), Some(85.0));
        assert_eq!(numeric(&json!(42)), Some(42.0));
        assert_eq!(numeric(&json!("eighty")), None);
    }

    #[test]
    fn test_convert_from_oracle_scale() {
        assert_eq!(convert(Some(50.0), ORACLE_SCALE), 5.0);
        assert_eq!(convert(Some(150.0), ORACLE_SCALE), 10.0);
        assert_eq!(convert(Some(-20.0), ORACLE_SCALE), 0.0);
        assert_eq!(convert(None, ORACLE_SCALE), 0.0);
    }

    #[test]
    fn test_convert_canonical_scale_is_idempotent() {
        let once = convert(Some(7.3), SCALE_MAX);
        assert_eq!(once, 7.3);
        assert_eq!(convert(Some(once), SCALE_MAX), once);
    }

    #[test]
    fn test_convert_invalid_scale_treated_as_canonical() {
        assert_eq!(convert(Some(6.0), 0.0), 6.0);
        assert_eq!(convert(Some(60.0), -5.0), 10.0);
        assert_eq!(convert(Some(6.0), f64::NAN), 6.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(round_to(0.0005, 3), 0.001);
    }
}
