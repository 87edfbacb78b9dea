//! Row construction and fitting.
//!
//! Rows start as runs of `cols` tiles at the optimizer's size. Fitting then
//! shrinks rows that overflow the width and lets short rows grow into the
//! unused height, one row at a time in row order.

use serde::Serialize;

use super::dimensions::Dimensions;
use crate::geometry::Size;
use crate::tile::Tile;

/// One tile's slot inside a row. `index` points into the partition's tiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cell {
    pub index: usize,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Row {
    pub cells: Vec<Cell>,
    pub width: f64,
    pub height: f64,
}

impl Row {
    /// Recompute the aggregates from the cells.
    pub fn refresh(&mut self) {
        self.width = self.cells.iter().map(|c| c.width).sum();
        self.height = self.cells.iter().map(|c| c.height).fold(0.0, f64::max);
    }

    fn scale(&mut self, factor: f64) {
        for cell in &mut self.cells {
            cell.width *= factor;
            cell.height *= factor;
        }
        self.width *= factor;
        self.height *= factor;
    }

    fn is_short(&self, container_width: f64) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width < container_width
    }
}

/// Slice `tiles` into rows of `dims.cols`, the last one possibly shorter.
pub fn build_rows<H>(tiles: &[&Tile<H>], dims: &Dimensions, fixed_ratio: bool) -> Vec<Row> {
    let cols = dims.cols.max(1);
    tiles
        .chunks(cols)
        .enumerate()
        .map(|(chunk_idx, chunk)| {
            let cells = chunk
                .iter()
                .enumerate()
                .map(|(offset, tile)| {
                    let width = if fixed_ratio {
                        dims.tile_height / tile.intrinsic_ratio
                    } else {
                        dims.tile_width
                    };
                    Cell {
                        index: chunk_idx * cols + offset,
                        width,
                        height: dims.tile_height,
                        weight: tile.weight,
                    }
                })
                .collect();
            let mut row = Row {
                cells,
                width: 0.0,
                height: 0.0,
            };
            row.refresh();
            row
        })
        .collect()
}

/// Squeeze overflowing rows to the container width, then grow short rows into
/// the leftover height. Cells scale with their row.
pub fn fit_rows(rows: &mut [Row], size: Size) {
    for row in rows.iter_mut() {
        if row.width > size.width && row.width > 0.0 {
            row.scale(size.width / row.width);
            row.width = size.width;
        }
    }

    let total_height: f64 = rows.iter().map(|r| r.height).sum();
    let mut remaining_height = size.height - total_height;
    let mut short_rows = rows.iter().filter(|r| r.is_short(size.width)).count();
    if remaining_height <= 0.0 || short_rows == 0 {
        return;
    }

    // Each short row takes an even share of what is left at its turn, so
    // earlier rows that hit the width cap leave more for later ones.
    for row in rows.iter_mut() {
        if !row.is_short(size.width) {
            continue;
        }
        let mut extra = remaining_height / short_rows as f64;
        let headroom = (size.width - row.width) / row.width;
        if extra / row.height > headroom {
            extra = headroom * row.height;
        }
        let factor = 1.0 + extra / row.height;
        let target_height = row.height + extra;
        row.scale(factor);
        row.height = target_height;
        remaining_height -= extra;
        short_rows -= 1;
    }
}
