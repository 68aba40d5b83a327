//! ═══════════════════════════════════════════════════════════════════════════════
//! PLOT — ASCII Scatter of Qualia Points
//! ═══════════════════════════════════════════════════════════════════════════════
//! Unit square, origin bottom-left. Points outside [0, 1] are pinned to the
//! border and flagged so the reader knows the normalization was exceeded.
//! ═══════════════════════════════════════════════════════════════════════════════

use qualia_space::{ComplexView, QualiaPoint};

const EMPTY: char = '·';
const OVERLAP: char = '*';

/// One plotted marker
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub symbol: char,
    pub label: String,
    pub point: QualiaPoint,
    pub col: usize,
    pub row: usize,
    pub clipped: bool,
}

/// Character grid; row 0 is the top line
#[derive(Debug, Clone)]
pub struct PlotGrid {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Vec<char>>,
    pub markers: Vec<Marker>,
}

impl PlotGrid {
    /// Grid of at least 2×2 cells
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(2);
        let height = height.max(2);
        Self {
            width,
            height,
            cells: vec![vec![EMPTY; width]; height],
            markers: Vec::new(),
        }
    }

    /// Grid cell for a point, and whether it had to be clipped
    pub fn cell_for(&self, point: &QualiaPoint) -> (usize, usize, bool) {
        let clipped = !point.is_within_unit_square() || point.x.is_nan() || point.y.is_nan();
        let x = if point.x.is_nan() { 0.0 } else { point.x.clamp(0.0, 1.0) };
        let y = if point.y.is_nan() { 0.0 } else { point.y.clamp(0.0, 1.0) };
        let col = (x * (self.width - 1) as f64).round() as usize;
        let row_from_bottom = (y * (self.height - 1) as f64).round() as usize;
        (col, self.height - 1 - row_from_bottom, clipped)
    }

    pub fn place(&mut self, symbol: char, label: &str, point: QualiaPoint) {
        let (col, row, clipped) = self.cell_for(&point);
        let cell = &mut self.cells[row][col];
        *cell = if *cell == EMPTY { symbol } else { OVERLAP };
        self.markers.push(Marker {
            symbol,
            label: label.to_string(),
            point,
            col,
            row,
            clipped,
        });
    }

    pub fn rows(&self) -> Vec<String> {
        self.cells.iter().map(|r| r.iter().collect()).collect()
    }
}

/// Marker symbol for the n-th complex: first letter of its name, or a digit
/// when that letter is already taken
pub fn symbol_for(name: &str, index: usize, taken: &[char]) -> char {
    let first = name
        .chars()
        .find(|c| c.is_alphanumeric())
        .map(|c| c.to_ascii_uppercase());
    match first {
        Some(c) if !taken.contains(&c) && c != OVERLAP => c,
        _ => std::char::from_digit((index % 10) as u32, 10).unwrap_or('#'),
    }
}

/// Lay every view onto a fresh grid
pub fn plot_views(views: &[ComplexView], width: usize, height: usize) -> PlotGrid {
    let mut grid = PlotGrid::new(width, height);
    let mut taken = Vec::with_capacity(views.len());
    for (i, view) in views.iter().enumerate() {
        let symbol = symbol_for(&view.name, i, &taken);
        taken.push(symbol);
        grid.place(symbol, &view.name, view.point);
    }
    grid
}
