//! E-model conversions between MOS LQO, R-factor and delay impairment
//!
//! Formulas follow ITU-T G.107 (Annex B) and G.108. Every function is a
//! closed-form computation over `f64`; inputs outside the documented domain
//! give numerically defined but physically meaningless results.

use std::f64::consts::PI;

use super::types::{DELAY_THRESHOLD_MS, MOS_MAX, MOS_MIN};

/// MOS LQO to R-factor, valid for `1 < mos < 4.5`
///
/// Inverse of the G.107 cubic. A negative discriminant (mos outside the
/// domain) is clamped to zero, the result is not range-clamped.
pub fn moslqo_to_r(mos: f64) -> f64 {
    let mut d = -903522.0 + 1113960.0 * mos - 202500.0 * mos * mos;
    if d < 0.0 {
        tracing::trace!(mos, discriminant = d, "clamping negative discriminant");
        d = 0.0;
    }
    let h = (15.0 * d.sqrt()).atan2(18556.0 - 6750.0 * mos) / 3.0;
    20.0 / 3.0 * (8.0 - 226f64.sqrt() * (h + PI / 3.0).cos())
}

/// R-factor to MOS LQO
///
/// # Arguments
/// * `r` - transmission rating, nominally 0-100
///
/// # Returns
/// MOS, exactly 1.0 below R=0 and exactly 4.5 above R=100
pub fn r_to_moslqo(r: f64) -> f64 {
    if r < 0.0 {
        return MOS_MIN;
    }
    if r > 100.0 {
        return MOS_MAX;
    }
    1.0 + 0.035 * r + r * (r - 60.0) * (100.0 - r) * 7e-6
}

/// One-way delay `ta` (ms) to the delay impairment Id (G.107/G.108)
pub fn delay_to_id(ta: f64) -> f64 {
    if ta < DELAY_THRESHOLD_MS {
        return 0.0;
    }
    let x = (ta / DELAY_THRESHOLD_MS).log2();
    25.0 * ((1.0 + x.powi(6)).powf(1.0 / 6.0) - 3.0 * (1.0 + (x / 3.0).powi(6)).powf(1.0 / 6.0)
        + 2.0)
}
