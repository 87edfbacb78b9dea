//! Error types shared across the layout engine and its runtime.

mod types;

pub use types::{ConfigError, LayoutError, Result};
