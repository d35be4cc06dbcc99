/// A horizontal progress bar of fixed width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Meter {
    /// Fill level in percent; clamped to `[0, 100]`.
    pub percent: f64,
    /// Total number of cells.
    pub width: usize,
}

impl Meter {
    pub fn new(percent: f64, width: usize) -> Self {
        Self { percent, width }
    }

    /// Number of filled cells, rounded to the nearest cell.
    pub fn filled(&self) -> usize {
        let fraction = if self.percent.is_finite() {
            self.percent.clamp(0.0, 100.0) / 100.0
        } else {
            0.0
        };
        ((fraction * self.width as f64).round() as usize).min(self.width)
    }

    pub fn empty(&self) -> usize {
        self.width - self.filled()
    }
}
