//! Numeric conversions at the host boundary.
//!
//! The host expects Q31 fixed-point output: a signed 32-bit integer whose full
//! range spans `[-1.0, 1.0)`. Knob parameters arrive as 10-bit integers.

/// Scale of a Q31 value.
const Q31_SCALE: f64 = i32::MAX as f64;

/// Largest value a 10-bit knob parameter can take.
pub const PARAM_MAX: u16 = 1023;

/// Converts a normalized amplitude to Q31.
///
/// The input is clamped to `[-1.0, 1.0]`, scaled by `i32::MAX` and truncated
/// toward zero, so `-1.0` maps to `-i32::MAX` and `0.0` to `0`.
///
/// # Examples
///
/// ```
/// use pcmhit::format::to_q31;
///
/// assert_eq!(to_q31(0.0), 0);
/// assert_eq!(to_q31(-1.0), -i32::MAX);
/// assert_eq!(to_q31(0.5), i32::MAX / 2);
/// ```
pub fn to_q31(x: f64) -> i32 {
    if x.is_nan() {
        return 0;
    }
    (x.clamp(-1.0, 1.0) * Q31_SCALE) as i32
}

/// Converts a Q31 value back to a normalized amplitude.
pub fn q31_to_f64(q: i32) -> f64 {
    f64::from(q) / Q31_SCALE
}

/// Maps a 10-bit knob value (`0..=1023`) to `[0.0, 1.0]`.
pub fn param_to_unit(value: u16) -> f64 {
    f64::from(value.min(PARAM_MAX)) / f64::from(PARAM_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_q31_endpoints() {
        assert_eq!(to_q31(0.0), 0);
        assert_eq!(to_q31(1.0), i32::MAX);
        assert_eq!(to_q31(-1.0), -i32::MAX);
    }

    #[test]
    fn test_q31_clamps_out_of_range() {
        assert_eq!(to_q31(4.0), i32::MAX);
        assert_eq!(to_q31(-4.0), -i32::MAX);
        assert_eq!(to_q31(f64::INFINITY), i32::MAX);
        assert_eq!(to_q31(f64::NAN), 0);
    }

    #[test]
    fn test_q31_truncates_toward_zero() {
        // 0.25 * (2^31 - 1) = 536870911.75
        assert_eq!(to_q31(0.25), 536_870_911);
        assert_eq!(to_q31(-0.25), -536_870_911);
    }

    #[test]
    fn test_q31_largest_pcm_value() {
        let x = (255.0 - 128.0) / 128.0;
        let q = to_q31(x);
        assert!(q > 0 && q < i32::MAX);
        assert!((q31_to_f64(q) - x).abs() < 1e-9);
    }

    #[test]
    fn test_q31_to_f64() {
        assert_eq!(q31_to_f64(0), 0.0);
        assert_eq!(q31_to_f64(i32::MAX), 1.0);
        assert!(q31_to_f64(i32::MIN) < -1.0 + 1e-9);
    }

    #[test]
    fn test_param_to_unit() {
        assert_eq!(param_to_unit(0), 0.0);
        assert_eq!(param_to_unit(1023), 1.0);
        assert_eq!(param_to_unit(4000), 1.0);
        assert!((param_to_unit(512) - 512.0 / 1023.0).abs() < 1e-12);
    }
}
