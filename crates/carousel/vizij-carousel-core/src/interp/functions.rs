//! Scalar interpolation helpers:
//! - lerp_f32 (linear blend)
//! - smoothstep and power falloff (focus shaping)
//! - ease-out curves used by snapping (quad, cubic, expo)
//! - cubic-bezier timing via binary search on x

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite smoothstep on [0,1]: `t²(3 - 2t)`. Input is clamped.
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Smoothstep followed by a power curve. Exponents above 1 concentrate
/// emphasis near t = 0.
#[inline]
pub fn falloff(t: f32, exponent: f32) -> f32 {
    let s = smoothstep(t);
    if exponent == 1.0 {
        s
    } else {
        s.powf(exponent)
    }
}

#[inline]
pub fn quad_out(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv
}

#[inline]
pub fn cubic_out(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Exponential ease-out: `1 - 2^(-10t)`, pinned to 1 at the end.
#[inline]
pub fn expo_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f32.powf(-10.0 * t)
    }
}

/// Cubic Bezier basis function
#[inline]
fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Given control points (x1, y1, x2, y2) and an input t in [0,1],
/// compute the eased y by inverting the x bezier via binary search.
#[inline]
pub fn bezier_ease_t(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    // Bezier(0,0,1,1) is exactly linear
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return t;
    }
    // Monotonic X in [0,1] assumed for x1/x2 ∈ [0,1]
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut mid = t;
    for _ in 0..24 {
        let x = cubic_bezier(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(0.0, y1, y2, 1.0, mid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothstep_endpoints_and_midpoint() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert!((smoothstep(0.5) - 0.5).abs() < 1e-6);
        assert_eq!(smoothstep(-3.0), 0.0);
        assert_eq!(smoothstep(7.0), 1.0);
    }

    #[test]
    fn falloff_sharpens_with_exponent() {
        let soft = falloff(0.5, 1.0);
        let sharp = falloff(0.5, 2.0);
        assert!(sharp < soft);
        assert_eq!(falloff(1.0, 3.0), 1.0);
    }

    #[test]
    fn ease_outs_hit_bounds() {
        for f in [quad_out, cubic_out, expo_out] {
            assert!(f(0.0).abs() < 1e-3);
            assert!((f(1.0) - 1.0).abs() < 1e-6);
            assert!(f(0.5) > 0.5, "ease-out should lead linear at the midpoint");
        }
    }

    #[test]
    fn linear_bezier_is_identity() {
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((bezier_ease_t(t, 0.0, 0.0, 1.0, 1.0) - t).abs() < 1e-6);
        }
    }
}
