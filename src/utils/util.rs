//! # Utility Module
//!
//! Small numeric helpers shared by the canvas and the shell.

/// Clamps a value between a minimum and maximum.
///
/// Unlike `f64::clamp` this never panics when `min > max`; the minimum wins,
/// which is what a scroll range collapsed to nothing needs.
///
/// # Examples
///
/// ```
/// use tilemap_creator::utils::util::clamp;
///
/// assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
/// assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
/// assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
/// ```
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value > max {
        if max < min {
            min
        } else {
            max
        }
    } else if value < min {
        min
    } else {
        value
    }
}

/// Keeps a scroll offset inside `[0, content - viewport]`.
pub fn clamp_scroll(offset: f64, content: f64, viewport: f64) -> f64 {
    clamp(offset, 0.0, content - viewport)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_within_bounds() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
    }

    #[test]
    fn test_clamp_below_bounds() {
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
    }

    #[test]
    fn test_clamp_above_bounds() {
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_clamp_scroll_when_content_fits() {
        // Content smaller than the viewport: no scrolling at all.
        assert_eq!(clamp_scroll(40.0, 100.0, 300.0), 0.0);
        assert_eq!(clamp_scroll(-3.0, 100.0, 300.0), 0.0);
    }

    #[test]
    fn test_clamp_scroll_range() {
        assert_eq!(clamp_scroll(250.0, 500.0, 300.0), 200.0);
        assert_eq!(clamp_scroll(120.0, 500.0, 300.0), 120.0);
    }
}
