//! Tile layout engine for video-conference style grids.
//!
//! Given a container and a snapshot of tiles, the engine picks the grid split
//! that covers the most area within the configured aspect-ratio bounds, fits
//! rows to the container, optionally resizes tiles by a per-tile weight
//! ("vroom"), and emits one frame per tile. Tiles tagged with the big class get
//! their own region. [`LayoutRuntime`] debounces recomputation requests so a
//! burst of resize or join events costs a single pass.

pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod runtime;
pub mod tile;

pub use config::{Animation, LayoutConfig, LayoutOptions, RatioPolicy};
pub use error::{ConfigError, LayoutError, Result};
pub use geometry::{Edges, Frame, Point, Region, Size};
pub use layout::{
    Dimensions, LayoutPass, PartitionKind, PartitionSummary, Placement, RatioBounds, Split,
    best_dimensions, compute_layout, layout_snapshot,
};
pub use logging::{LogEvent, LogLevel, LogSink, Logger, LoggingError, LoggingResult};
pub use metrics::{LayoutMetrics, MetricSnapshot};
pub use runtime::{DEFAULT_DEBOUNCE, Debouncer, LayoutRuntime, RuntimeConfig};
pub use tile::{
    BoxInsets, ContainerBox, ElementProvider, LayoutSnapshot, NoInsets, Positioner,
    StyleInspector, Tile, TileSnapshot,
};
