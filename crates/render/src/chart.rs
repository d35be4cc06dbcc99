//! A character-cell line chart with a fixed 0–100 y-range.

/// What occupies one cell of the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    /// Dashed horizontal grid line.
    Grid,
    /// Vertical segment joining two consecutive samples.
    Line,
    /// A sample.
    Point,
}

impl Cell {
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Grid => '┄',
            Cell::Line => '│',
            Cell::Point => '●',
        }
    }
}

/// Plot geometry: one column per history slot, `height` rows for 0–100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chart {
    pub capacity: usize,
    pub height:   usize,
}

impl Chart {
    /// Grid lines are drawn every this many percent.
    const GRID_STEP: u32 = 25;

    pub fn new(capacity: usize, height: usize) -> Self {
        Self { capacity, height: height.max(2) }
    }

    /// Row (0 = top) that `value` percent lands on.
    pub fn row_of(&self, value: f64) -> usize {
        let value = if value.is_finite() { value.clamp(0.0, 100.0) } else { 0.0 };
        let top = (self.height - 1) as f64;
        (top - value / 100.0 * top).round() as usize
    }

    /// The percentage a row represents, rounded.
    pub fn value_of(&self, row: usize) -> u32 {
        let top = (self.height - 1) as f64;
        (100.0 * (top - row as f64) / top).round() as u32
    }

    /// Y-axis label for `row`, if it carries one.
    pub fn axis_label(&self, row: usize) -> Option<u32> {
        (row == 0 || row == self.height - 1 || self.is_grid_row(row)).then(|| self.value_of(row))
    }

    fn is_grid_row(&self, row: usize) -> bool {
        (Self::GRID_STEP..100)
            .step_by(Self::GRID_STEP as usize)
            .any(|pct| self.row_of(pct as f64) == row)
    }

    /// Lay out the newest `capacity` samples of `series`, oldest at column 0.
    pub fn plot(&self, series: &[f64]) -> Vec<Vec<Cell>> {
        let mut grid = vec![vec![Cell::Empty; self.capacity]; self.height];

        for (row, cells) in grid.iter_mut().enumerate() {
            if self.is_grid_row(row) {
                cells.fill(Cell::Grid);
            }
        }

        let skip = series.len().saturating_sub(self.capacity);
        let mut prev: Option<usize> = None;
        for (col, value) in series.iter().skip(skip).enumerate() {
            let row = self.row_of(*value);
            if let Some(prev) = prev {
                let (lo, hi) = (prev.min(row), prev.max(row));
                for cells in grid.iter_mut().take(hi).skip(lo + 1) {
                    cells[col] = Cell::Line;
                }
            }
            grid[row][col] = Cell::Point;
            prev = Some(row);
        }

        grid
    }
}
