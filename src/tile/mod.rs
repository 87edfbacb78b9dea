//! Tile snapshots and the host capabilities the engine talks to.
//!
//! The engine never touches real elements. A host implements
//! [`ElementProvider`], [`StyleInspector`] and [`Positioner`] over whatever
//! handle type it uses (`H`), and the engine only ever clones handles and hands
//! them back.

use serde::{Deserialize, Serialize};

use crate::config::{Animation, LayoutConfig};
use crate::error::Result;
use crate::geometry::{Edges, Frame, Size};

/// Height/width ratio assumed when the media size is unknown.
pub const FALLBACK_RATIO: f64 = 3.0 / 4.0;
/// Smallest weight a tile can carry once a volume attribute is present.
pub const MIN_WEIGHT: f64 = 0.1;

/// Raw per-element read taken at request time.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSnapshot<H> {
    pub handle: H,
    pub video_width: Option<f64>,
    pub video_height: Option<f64>,
    pub volume: Option<f64>,
    pub classes: Vec<String>,
    pub displayed: bool,
}

impl<H> TileSnapshot<H> {
    pub fn new(handle: H) -> Self {
        Self {
            handle,
            video_width: None,
            video_height: None,
            volume: None,
            classes: Vec::new(),
            displayed: true,
        }
    }

    pub fn with_video(mut self, width: f64, height: f64) -> Self {
        self.video_width = Some(width);
        self.video_height = Some(height);
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }
}

/// Derived tile metrics used by the layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile<H> {
    pub handle: H,
    pub intrinsic_ratio: f64,
    pub weight: f64,
    pub is_big: bool,
    pub visible: bool,
}

impl<H> Tile<H> {
    pub fn from_snapshot(snapshot: TileSnapshot<H>, config: &LayoutConfig) -> Self {
        let intrinsic_ratio = intrinsic_ratio(snapshot.video_width, snapshot.video_height);
        let weight = weight(snapshot.volume);
        let is_big = snapshot.classes.iter().any(|c| *c == config.big_class);
        Self {
            handle: snapshot.handle,
            intrinsic_ratio,
            weight,
            is_big,
            visible: snapshot.displayed,
        }
    }
}

/// Media height over width, or [`FALLBACK_RATIO`] when either side is unknown.
pub fn intrinsic_ratio(width: Option<f64>, height: Option<f64>) -> f64 {
    match (width, height) {
        (Some(w), Some(h)) if w > 0.0 && h > 0.0 && w.is_finite() && h.is_finite() => h / w,
        _ => FALLBACK_RATIO,
    }
}

/// Vroom weight from the volume attribute; absent means neutral.
pub fn weight(volume: Option<f64>) -> f64 {
    match volume {
        None => 1.0,
        Some(v) if v.is_finite() => v.max(MIN_WEIGHT),
        Some(_) => MIN_WEIGHT,
    }
}

/// Layout container as read from the host.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainerBox {
    pub width: f64,
    pub height: f64,
    pub border: Edges,
    pub displayed: bool,
}

impl ContainerBox {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            border: Edges::default(),
            displayed: true,
        }
    }

    pub fn with_border(mut self, border: Edges) -> Self {
        self.border = border;
        self
    }

    /// Size available to tiles: the box minus its own border.
    pub fn content_size(&self) -> Size {
        Size::new(
            (self.width - self.border.horizontal()).max(0.0),
            (self.height - self.border.vertical()).max(0.0),
        )
    }
}

/// Box-model insets subtracted from a tile's slot to get its content box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxInsets {
    pub border: Edges,
    pub padding: Edges,
    pub margin: Edges,
}

impl BoxInsets {
    pub fn horizontal(&self) -> f64 {
        self.border.horizontal() + self.padding.horizontal() + self.margin.horizontal()
    }

    pub fn vertical(&self) -> f64 {
        self.border.vertical() + self.padding.vertical() + self.margin.vertical()
    }
}

/// Everything a layout pass needs from the host, captured at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSnapshot<H> {
    pub container: ContainerBox,
    pub tiles: Vec<TileSnapshot<H>>,
}

impl<H> LayoutSnapshot<H> {
    pub fn new(container: ContainerBox, tiles: Vec<TileSnapshot<H>>) -> Self {
        Self { container, tiles }
    }
}

/// Source of container and tile snapshots.
pub trait ElementProvider {
    type Handle: Clone;

    fn snapshot(&self) -> Result<LayoutSnapshot<Self::Handle>>;
}

/// Per-element box-model queries.
pub trait StyleInspector<H> {
    fn insets(&self, handle: &H) -> Result<BoxInsets>;
}

/// Applies a computed frame to an element, optionally animated.
pub trait Positioner<H> {
    fn position(&mut self, handle: &H, frame: Frame, animation: Option<&Animation>) -> Result<()>;
}

/// Inspector for hosts whose tiles carry no border, padding or margin.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInsets;

impl<H> StyleInspector<H> for NoInsets {
    fn insets(&self, _handle: &H) -> Result<BoxInsets> {
        Ok(BoxInsets::default())
    }
}
