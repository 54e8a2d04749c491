//! Easing curves
//!
//! An easing curve maps an animation's linear progress in `[0, 1]` to the
//! fraction of the value change applied at that moment.

/// Easing function applied to animation progress
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    /// Constant speed
    #[default]
    Linear,
    /// Material "fast out, slow in": cubic-bezier(0.4, 0.0, 0.2, 1.0)
    EaseOutSlowIn,
    /// CSS-style cubic bezier curve (x1, y1, x2, y2)
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Declarative code for [`Easing::Linear`]
    pub const LINEAR_CODE: i64 = 0;
    /// Declarative code for [`Easing::EaseOutSlowIn`]
    pub const EASE_OUT_SLOW_IN_CODE: i64 = 1;

    /// Map a declarative interpolator code to an easing curve
    ///
    /// Returns `None` for codes that do not name a curve.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            Self::LINEAR_CODE => Some(Easing::Linear),
            Self::EASE_OUT_SLOW_IN_CODE => Some(Easing::EaseOutSlowIn),
            _ => None,
        }
    }

    /// Evaluate the curve at progress `t` (clamped to `[0, 1]`)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    fn sample_curve(a: f32, b: f32, c: f32, t: f32) -> f32 {
        ((a * t + b) * t + c) * t
    }

    fn sample_derivative(a: f32, b: f32, c: f32, t: f32) -> f32 {
        (3.0 * a * t + 2.0 * b) * t + c
    }

    // Newton-Raphson for the curve parameter whose x matches the fraction
    let mut t = fraction;
    let mut converged = false;
    for _ in 0..8 {
        let x = sample_curve(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            converged = true;
            break;
        }
        let dx = sample_derivative(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !converged {
        // Bisection fallback
        let mut lo = 0.0;
        let mut hi = 1.0;
        t = fraction;
        for _ in 0..24 {
            let delta = sample_curve(ax, bx, cx, t) - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = 0.5 * (lo + hi);
        }
    }

    sample_curve(ay, by, cy, t)
}
