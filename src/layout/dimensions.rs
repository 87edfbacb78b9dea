use serde::Serialize;

use crate::geometry::Size;

/// Height/width bounds a tile may take.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioBounds {
    pub min: f64,
    pub max: f64,
}

impl RatioBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Collapse both bounds onto a single ratio (fixed-ratio layouts).
    pub const fn fixed(ratio: f64) -> Self {
        Self::new(ratio, ratio)
    }
}

/// Grid split chosen for a partition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimensions {
    pub cols: usize,
    pub rows: usize,
    pub tile_width: f64,
    pub tile_height: f64,
    pub ratio: f64,
    pub area: f64,
}

/// Evaluate a single column count, clamping the tile ratio into `bounds`.
pub fn candidate(bounds: RatioBounds, count: usize, cols: usize, size: Size) -> Dimensions {
    let rows = count.div_ceil(cols);
    let mut height = size.height / rows as f64;
    let mut width = size.width / cols as f64;

    let mut ratio = if width > 0.0 {
        height / width
    } else {
        f64::INFINITY
    };
    if ratio > bounds.max {
        ratio = bounds.max;
        height = width * ratio;
    } else if ratio < bounds.min {
        ratio = bounds.min;
        width = height / ratio;
    }

    Dimensions {
        cols,
        rows,
        tile_width: width,
        tile_height: height,
        ratio,
        area: width * height * count as f64,
    }
}

/// Try every column count in `1..=count` and keep the one covering the most
/// area. Ties keep the smaller column count. Returns `None` for zero tiles.
pub fn best_dimensions(bounds: RatioBounds, count: usize, size: Size) -> Option<Dimensions> {
    let mut best: Option<Dimensions> = None;
    for cols in 1..=count {
        let next = candidate(bounds, count, cols, size);
        match best {
            Some(current) if next.area <= current.area => {}
            _ => best = Some(next),
        }
    }
    best
}
