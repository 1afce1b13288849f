// ============================================================================
// EASING FUNCTIONS for label and button animations
// ============================================================================

/// Ease-in-out sine: slow at both ends, symmetric S-curve
pub fn ease_in_out_sine(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    0.5 - 0.5 * (std::f32::consts::PI * t).cos()
}

/// Linear interpolation between two scalars
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Progress of `elapsed` through a leg of `duration`, clamped to [0, 1].
/// Zero-length legs count as finished.
pub fn leg_progress(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        1.0
    } else {
        (elapsed / duration).clamp(0.0, 1.0)
    }
}
