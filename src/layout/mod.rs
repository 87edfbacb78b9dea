//! Tile layout engine.
//!
//! Leaf-first: `dimensions` picks the grid split, `rows` builds and fits
//! rows, `vroom` applies per-tile weights, `placer` centers and emits frames,
//! and `core` partitions tiles into big/small regions and drives the rest.
//! Everything here is pure apart from the style queries made while placing.

mod core;
pub mod dimensions;
pub mod placer;
pub mod rows;
pub mod vroom;

pub use self::core::{
    LayoutPass, PartitionKind, PartitionSummary, Placement, Split, compute_layout,
    layout_snapshot,
};
pub use dimensions::{Dimensions, RatioBounds, best_dimensions};
pub use rows::{Cell, Row};
