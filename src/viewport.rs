//! Projection between field space and terminal cells.
//!
//! Screen layout (rows):
//!   0          HUD
//!   1          top border
//!   2 ..= h-3  play area
//!   h-2        bottom border
//!   h-1        controls hint
//! Columns 0 and w-1 hold the side walls.

use glam::Vec2;

use crate::error::{GameError, Result};

pub const MIN_COLS: u16 = 40;
pub const MIN_ROWS: u16 = 12;

const FIRST_COL: u16 = 1;
const FIRST_ROW: u16 = 2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    field: Vec2,
}

impl Viewport {
    /// `cols`/`rows` are the full terminal size.
    pub fn new(cols: u16, rows: u16, field: Vec2) -> Result<Self> {
        if cols < MIN_COLS || rows < MIN_ROWS {
            return Err(GameError::TerminalTooSmall {
                cols,
                rows,
                min_cols: MIN_COLS,
                min_rows: MIN_ROWS,
            });
        }
        Ok(Self { cols, rows, field })
    }

    pub fn field(&self) -> Vec2 {
        self.field
    }

    pub fn play_cols(&self) -> u16 {
        self.cols - 2
    }

    pub fn play_rows(&self) -> u16 {
        self.rows - 4
    }

    /// Field units covered by one cell, per axis.
    fn cell_size(&self) -> Vec2 {
        Vec2::new(
            self.field.x / self.play_cols() as f32,
            self.field.y / self.play_rows() as f32,
        )
    }

    /// Terminal cell holding `pos`, clamped to the play area.
    pub fn to_cell(&self, pos: Vec2) -> (u16, u16) {
        let cell = pos / self.cell_size();
        let col = (cell.x.floor().max(0.0) as u16).min(self.play_cols() - 1);
        let row = (cell.y.floor().max(0.0) as u16).min(self.play_rows() - 1);
        (FIRST_COL + col, FIRST_ROW + row)
    }

    /// Field point at the centre of a terminal cell. Cells outside the play
    /// area are clamped to its edge.
    pub fn to_field(&self, col: u16, row: u16) -> Vec2 {
        let c = col.saturating_sub(FIRST_COL).min(self.play_cols() - 1);
        let r = row.saturating_sub(FIRST_ROW).min(self.play_rows() - 1);
        (Vec2::new(c as f32, r as f32) + 0.5) * self.cell_size()
    }

    /// Footprint in cells (width, height) of an entity of `size`, at least 1x1.
    pub fn cell_span(&self, size: f32) -> (u16, u16) {
        let span = Vec2::splat(size) / self.cell_size();
        (
            (span.x.round() as u16).max(1),
            (span.y.round() as u16).max(1),
        )
    }
}
