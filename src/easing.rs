//! Easing curves for reveal transitions.
//!
//! Backed by cubic bezier easing, matching the curves the site's pages use:
//! quadratic ease-out for content blocks, cubic ease-out for titles, and an
//! overshooting "back" ease for staggered card grids.

use serde::{Deserialize, Serialize};

/// Easing curve applied to a reveal transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ease {
    /// No easing.
    Linear,
    /// Quadratic ease-out. Used by generic content blocks.
    QuadOut,
    /// Cubic ease-out. Used by page titles.
    CubicOut,
    /// Overshooting ease-out with a slight bounce. Used by card grids.
    BackOut,
}

impl Ease {
    /// Cubic bezier control points `(x1, y1, x2, y2)` for this curve.
    ///
    /// Standard bezier forms of the named curves. `BackOut` has y1 > 1 and
    /// overshoots before settling.
    pub fn control_points(self) -> (f32, f32, f32, f32) {
        match self {
            Ease::Linear => (0.0, 0.0, 1.0, 1.0),
            Ease::QuadOut => (0.25, 0.46, 0.45, 0.94),
            Ease::CubicOut => (0.215, 0.61, 0.355, 1.0),
            Ease::BackOut => (0.34, 1.56, 0.64, 1.0),
        }
    }

    /// Evaluate the curve at progress `t` in `[0, 1]`.
    pub fn eval(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if self == Ease::Linear {
            return t;
        }
        let (x1, y1, x2, y2) = self.control_points();
        bezier_easing::bezier_easing(x1, y1, x2, y2).unwrap()(t)
    }
}

impl Default for Ease {
    fn default() -> Self {
        Ease::QuadOut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for ease in [Ease::Linear, Ease::QuadOut, Ease::CubicOut, Ease::BackOut] {
            assert!((ease.eval(0.0)).abs() < 1e-4, "{:?} at 0", ease);
            assert!((ease.eval(1.0) - 1.0).abs() < 1e-4, "{:?} at 1", ease);
        }
    }

    #[test]
    fn test_ease_out_front_loads_progress() {
        // Ease-out curves are ahead of linear at the midpoint.
        assert!(Ease::QuadOut.eval(0.5) > 0.5);
        assert!(Ease::CubicOut.eval(0.5) > Ease::QuadOut.eval(0.5));
    }

    #[test]
    fn test_back_out_overshoots() {
        // The back curve exceeds 1.0 somewhere before settling.
        let overshoot = (1..100)
            .map(|i| Ease::BackOut.eval(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(overshoot > 1.0, "expected overshoot, max was {}", overshoot);
    }

    #[test]
    fn test_input_clamped() {
        assert_eq!(Ease::QuadOut.eval(-2.0), Ease::QuadOut.eval(0.0));
        assert_eq!(Ease::QuadOut.eval(5.0), Ease::QuadOut.eval(1.0));
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Ease::BackOut).unwrap(), "\"backOut\"");
        let ease: Ease = serde_json::from_str("\"cubicOut\"").unwrap();
        assert_eq!(ease, Ease::CubicOut);
    }
}
