//! Visible-area width providers and font metrics
//!
//! The width provider models an external, possibly-changing viewport. The
//! engine calls it synchronously on every recompute, so implementations must
//! return promptly (no blocking I/O). Providers are swappable at runtime via
//! [`crate::SoftWrapEngine::set_width_provider`].

/// Capability returning the current visible area width in pixels on demand.
///
/// A width of zero or less means the viewport is degenerate; the engine
/// treats that as a configuration error and leaves lines unwrapped.
pub trait WidthProvider {
    fn visible_width(&self) -> i32;
}

/// Provider backed by a closure, which keeps test fixtures short
pub struct ClosureWidthProvider<F: Fn() -> i32>(pub F);

impl<F: Fn() -> i32> WidthProvider for ClosureWidthProvider<F> {
    fn visible_width(&self) -> i32 {
        (self.0)()
    }
}

/// Provider reporting a constant width
#[derive(Debug, Clone, Copy)]
pub struct FixedWidthProvider(pub i32);

impl WidthProvider for FixedWidthProvider {
    fn visible_width(&self) -> i32 {
        self.0
    }
}

/// Monospace font metrics used to convert the pixel budget into columns
#[derive(Debug, Clone, Copy)]
pub struct FontMetrics {
    /// Advance width of one cell in pixels
    pub char_width: f32,
    /// Line height in pixels
    pub line_height: f32,
}

impl FontMetrics {
    pub fn new(char_width: f32, line_height: f32) -> Self {
        Self {
            char_width,
            line_height,
        }
    }

    /// Number of character columns that fit in `width_px`.
    ///
    /// Uses floor so a partially visible column never counts; always at
    /// least 1 so wrapping can make progress even in a sliver of a viewport.
    pub fn columns_for_width(&self, width_px: i32) -> usize {
        if self.char_width <= 0.0 {
            return 1;
        }
        let cols = (width_px.max(0) as f32 / self.char_width).floor() as usize;
        cols.max(1)
    }
}

impl Default for FontMetrics {
    fn default() -> Self {
        // 8x16 is the classic bitmap cell; a harmless default for tests
        Self::new(8.0, 16.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_provider() {
        let provider = FixedWidthProvider(600);
        assert_eq!(provider.visible_width(), 600);
    }

    #[test]
    fn test_closure_provider() {
        let width = 640;
        let provider = ClosureWidthProvider(move || width);
        assert_eq!(provider.visible_width(), 640);
    }

    #[test]
    fn test_columns_for_width_floor() {
        let metrics = FontMetrics::new(8.0, 16.0);
        assert_eq!(metrics.columns_for_width(800), 100);
        // 810 / 8 = 101.25, floor to 101
        assert_eq!(metrics.columns_for_width(810), 101);
    }

    #[test]
    fn test_columns_for_width_minimum() {
        let metrics = FontMetrics::new(8.0, 16.0);
        assert_eq!(metrics.columns_for_width(4), 1);
        assert_eq!(metrics.columns_for_width(0), 1);
    }

    #[test]
    fn test_columns_for_width_degenerate_metrics() {
        let metrics = FontMetrics::new(0.0, 16.0);
        assert_eq!(metrics.columns_for_width(800), 1);
    }
}
