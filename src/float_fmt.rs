//! Float formatting without `format!` on floats.
//!
//! Float-to-decimal formatting has panicked under some wasm toolchain/browser
//! combinations, so dashboard numbers are scaled and rounded into a `u64`
//! and printed as integers.

/// Fixed number of decimals, rounded like JavaScript's `toFixed`: the decision
/// is made on the exact binary value, so `2.65` (stored as 2.6499...) gives
/// `"2.6"`, and exact halves round away from zero.
pub fn fmt_fixed(v: f64, decimals: usize) -> String {
    if let Some(s) = non_finite(v) {
        return s;
    }

    let decimals = decimals.min(9);
    let scale = 10_u64.pow(decimals as u32);
    let Some(abs) = scale_round(v.abs(), scale as f64) else {
        return if v < 0.0 { "-Inf" } else { "Inf" }.to_string();
    };

    let mut out = String::new();
    if v < 0.0 {
        out.push('-');
    }
    out.push_str(&(abs / scale).to_string());

    if decimals > 0 {
        let frac = (abs % scale).to_string();
        out.push('.');
        for _ in 0..decimals.saturating_sub(frac.len()) {
            out.push('0');
        }
        out.push_str(&frac);
    }
    out
}

/// `a * p` rounded to an integer. `a * p` itself may round up to a half; the
/// fused remainder tells which side of it the exact product lies on.
fn scale_round(a: f64, p: f64) -> Option<u64> {
    let t = a * p;
    // Past 2^53 there is no fraction left to round.
    if !(t < 9.0e15) {
        return None;
    }
    let err = a.mul_add(p, -t);
    let floor = t.floor();
    let frac = t - floor;
    let up = frac > 0.5 || (frac == 0.5 && err >= 0.0);
    Some(floor as u64 + u64::from(up))
}

/// Shortest form with at most `max_decimals`: `50.0` → `"50"`, `45.50` → `"45.5"`.
pub fn fmt_compact(v: f64, max_decimals: usize) -> String {
    let s = fmt_fixed(v, max_decimals);
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn non_finite(v: f64) -> Option<String> {
    if v.is_nan() {
        Some("NaN".to_string())
    } else if v.is_infinite() {
        Some(if v > 0.0 { "Inf" } else { "-Inf" }.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_pads_and_rounds() {
        assert_eq!(fmt_fixed(4.0, 1), "4.0");
        assert_eq!(fmt_fixed(2.67, 1), "2.7");
        assert_eq!(fmt_fixed(0.0, 1), "0.0");
        assert_eq!(fmt_fixed(-12.346, 2), "-12.35");
        assert_eq!(fmt_fixed(3.0, 0), "3");
        assert_eq!(fmt_fixed(f64::NAN, 1), "NaN");
    }

    #[test]
    fn fixed_rounds_the_stored_value_not_the_literal() {
        // Each of these sits just below the half in binary.
        assert_eq!(fmt_fixed(2.65, 1), "2.6");
        assert_eq!(fmt_fixed(1.15, 1), "1.1");
        assert_eq!(fmt_fixed(4.35, 1), "4.3");
        assert_eq!(fmt_fixed(1.005, 2), "1.00");
        assert_eq!(fmt_fixed(-2.65, 1), "-2.6");
    }

    #[test]
    fn fixed_rounds_exact_halves_up() {
        assert_eq!(fmt_fixed(0.125, 2), "0.13");
        assert_eq!(fmt_fixed(2.5, 0), "3");
        assert_eq!(fmt_fixed(0.5, 0), "1");
        assert_eq!(fmt_fixed(-0.04, 1), "-0.0");
    }

    #[test]
    fn compact_trims_trailing_zeros() {
        assert_eq!(fmt_compact(50.0, 1), "50");
        assert_eq!(fmt_compact(45.5, 1), "45.5");
        assert_eq!(fmt_compact(-33.3, 1), "-33.3");
        assert_eq!(fmt_compact(-0.01, 1), "0");
    }
}
