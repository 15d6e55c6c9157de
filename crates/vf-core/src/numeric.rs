use crate::VfError;

/// Floating point type used throughout system
pub type Real = f64;

/// Below this magnitude numbers are printed in exponent form.
const EXP_LOWER: Real = 1e-6;
/// At or above this magnitude numbers are printed in exponent form.
const EXP_UPPER: Real = 1e21;

/// Format a number the way a JavaScript runtime prints it.
///
/// Netlists produced by the editor front end were always written through
/// `Number.prototype.toString`, and the solver (and any stored netlists)
/// expect the same spelling: integers without a trailing `.0`, shortest
/// round-trip digits, exponent form outside `[1e-6, 1e21)` with an explicit
/// sign on positive exponents.
pub fn format_real(v: Real) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if v == 0.0 {
        // covers -0.0 too
        return "0".to_string();
    }

    let magnitude = v.abs();
    if (EXP_LOWER..EXP_UPPER).contains(&magnitude) {
        return format!("{}", v);
    }

    let exp = format!("{:e}", v);
    match exp.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => exp,
    }
}

/// Format a number as plain base-10 text, never using exponent notation.
pub fn format_decimal(v: Real) -> String {
    format!("{}", v)
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, VfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(VfError::NonFinite { what, value: v })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn formatted_value_parses_back(v in prop::num::f64::NORMAL) {
            let text = format_real(v);
            let parsed: f64 = text.parse().unwrap();
            prop_assert_eq!(parsed, v);
        }
    }
}
