use crate::CoreError;

/// Relative slack allowed when a float ratio should land on a whole number.
pub const WHOLE_RATIO_REL_TOL: f64 = 1e-9;

/// `|a - b|` within `rel` of the larger magnitude (at least 1).
pub fn nearly_equal(a: f64, b: f64, rel: f64) -> bool {
    (a - b).abs() <= rel * a.abs().max(b.abs()).max(1.0)
}

/// How many whole `step`s fit into `span`.
///
/// A ratio sitting a rounding error below an integer counts as that integer,
/// so `0.3 / 0.1` gives 3. The result is not bounded; callers cap it.
pub fn whole_steps(span: f64, step: f64) -> f64 {
    let ratio = span / step;
    let nearest = ratio.round();
    if nearly_equal(ratio, nearest, WHOLE_RATIO_REL_TOL) {
        nearest
    } else {
        ratio.floor()
    }
}

pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Finite and `>= 0`.
pub fn ensure_non_negative(v: f64, what: &'static str) -> Result<f64, CoreError> {
    let v = ensure_finite(v, what)?;
    if v < 0.0 {
        return Err(CoreError::InvalidArg { what });
    }
    Ok(v)
}
