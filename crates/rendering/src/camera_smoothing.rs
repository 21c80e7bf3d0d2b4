//! Camera smoothing via exponential interpolation (lerp).
//!
//! Input systems only move `CameraRig::target_zoom`. Each frame the projection
//! height is pulled toward it with frame-rate independent exponential
//! interpolation:
//!
//!   `value += (target - value) * (1 - exp(-speed * dt))`
//!
//! Wheel and pinch deltas therefore never make the view jump, and the result
//! is the same at 30 and 144 fps.

/// Fraction of the remaining distance covered in `dt` seconds.
///
/// Always in `[0, 1)` for finite, non-negative input, so the value never
/// overshoots its target.
pub(crate) fn exp_lerp_factor(speed: f32, dt: f32) -> f32 {
    if !(speed.is_finite() && dt.is_finite()) || speed <= 0.0 || dt <= 0.0 {
        return 0.0;
    }
    1.0 - (-speed * dt).exp()
}
