use serde::Serialize;

use super::dimensions::{Dimensions, RatioBounds, best_dimensions};
use super::placer::place_rows;
use super::rows::{build_rows, fit_rows};
use super::vroom::rescale_rows;
use crate::config::{LayoutConfig, RatioPolicy};
use crate::error::Result;
use crate::geometry::{Frame, Point, Region, Size};
use crate::tile::{LayoutSnapshot, StyleInspector, Tile};

/// Which tile set a placement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionKind {
    Big,
    Small,
}

/// How the container was divided between the big and small regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    /// One region fills the container.
    None,
    /// Big region spans the full width, stacked with the small region.
    Horizontal,
    /// Big region spans the full height, beside the small region.
    Vertical,
}

/// Final frame for one tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<H> {
    pub handle: H,
    pub frame: Frame,
    pub partition: PartitionKind,
}

/// What the optimizer chose for one partition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PartitionSummary {
    pub kind: PartitionKind,
    pub region: Region,
    pub tiles: usize,
    pub dimensions: Dimensions,
    pub rows: usize,
}

/// Result of one layout pass, placements in arrangement order.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPass<H> {
    pub container: Size,
    pub split: Split,
    pub placements: Vec<Placement<H>>,
    pub partitions: Vec<PartitionSummary>,
}

impl<H> LayoutPass<H> {
    pub fn frames(&self) -> Vec<Frame> {
        self.placements.iter().map(|p| p.frame).collect()
    }

    /// Stable digest of every emitted frame, in order.
    pub fn fingerprint(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        for placement in &self.placements {
            hasher.update(&[placement.partition as u8]);
            placement.frame.write_bits(&mut hasher);
        }
        hasher.finalize()
    }
}

/// Derive tiles from a snapshot and lay them out. Returns `None` when the
/// container itself is not displayed.
pub fn layout_snapshot<H, S>(
    config: &LayoutConfig,
    snapshot: LayoutSnapshot<H>,
    styles: &S,
) -> Result<Option<LayoutPass<H>>>
where
    H: Clone,
    S: StyleInspector<H> + ?Sized,
{
    if !snapshot.container.displayed {
        return Ok(None);
    }
    let container = snapshot.container.content_size();
    let tiles: Vec<Tile<H>> = snapshot
        .tiles
        .into_iter()
        .map(|t| Tile::from_snapshot(t, config))
        .collect();
    compute_layout(config, container, &tiles, styles).map(Some)
}

/// Partition the visible tiles, split the container and arrange each region.
pub fn compute_layout<H, S>(
    config: &LayoutConfig,
    container: Size,
    tiles: &[Tile<H>],
    styles: &S,
) -> Result<LayoutPass<H>>
where
    H: Clone,
    S: StyleInspector<H> + ?Sized,
{
    let (big, small): (Vec<&Tile<H>>, Vec<&Tile<H>>) =
        tiles.iter().filter(|t| t.visible).partition(|t| t.is_big);

    let (split, regions) = plan_regions(config, container, &big, !small.is_empty());

    let mut pass = LayoutPass {
        container,
        split,
        placements: Vec::with_capacity(big.len() + small.len()),
        partitions: Vec::with_capacity(2),
    };

    for (kind, region) in regions {
        let (members, policy) = match kind {
            PartitionKind::Big => (&big, config.big_policy()),
            PartitionKind::Small => (&small, config.small_policy()),
        };
        arrange(kind, members, region, policy, config.vroom, styles, &mut pass)?;
    }

    Ok(pass)
}

fn plan_regions<H>(
    config: &LayoutConfig,
    container: Size,
    big: &[&Tile<H>],
    has_small: bool,
) -> (Split, Vec<(PartitionKind, Region)>) {
    let whole = Region::at_origin(container);
    let Some(first_big) = big.first() else {
        return (Split::None, vec![(PartitionKind::Small, whole)]);
    };
    if !has_small {
        return (Split::None, vec![(PartitionKind::Big, whole)]);
    }

    let Size { width, height } = container;
    // A container taller than the big tile's media stacks the regions.
    let tall = container.ratio() > first_big.intrinsic_ratio;
    let (split, big_size, small_offset, trailing_big_offset) = if tall {
        let big_height = (height * config.big_percentage).floor();
        (
            Split::Horizontal,
            Size::new(width, big_height),
            Point::new(0.0, big_height),
            Point::new(0.0, height - big_height),
        )
    } else {
        let big_width = (width * config.big_percentage).floor();
        (
            Split::Vertical,
            Size::new(big_width, height),
            Point::new(big_width, 0.0),
            Point::new(width - big_width, 0.0),
        )
    };
    let small_size = Size::new(width - small_offset.x, height - small_offset.y);

    let regions = if config.big_first {
        vec![
            (PartitionKind::Big, Region::at_origin(big_size)),
            (PartitionKind::Small, Region::new(small_offset, small_size)),
        ]
    } else {
        vec![
            (PartitionKind::Small, Region::at_origin(small_size)),
            (PartitionKind::Big, Region::new(trailing_big_offset, big_size)),
        ]
    };
    (split, regions)
}

fn arrange<H, S>(
    kind: PartitionKind,
    tiles: &[&Tile<H>],
    region: Region,
    policy: RatioPolicy,
    vroom: bool,
    styles: &S,
    pass: &mut LayoutPass<H>,
) -> Result<()>
where
    H: Clone,
    S: StyleInspector<H> + ?Sized,
{
    let Some(first) = tiles.first() else {
        return Ok(());
    };
    let bounds = if policy.fixed_ratio {
        RatioBounds::fixed(first.intrinsic_ratio)
    } else {
        RatioBounds::new(policy.min_ratio, policy.max_ratio)
    };
    let Some(dimensions) = best_dimensions(bounds, tiles.len(), region.size) else {
        return Ok(());
    };

    let mut rows = build_rows(tiles, &dimensions, policy.fixed_ratio);
    fit_rows(&mut rows, region.size);
    if vroom {
        rescale_rows(&mut rows, region.size.height);
    }

    let placed = place_rows(&rows, tiles, region, policy.fixed_ratio, styles)?;
    pass.placements
        .extend(placed.into_iter().map(|cell| Placement {
            handle: tiles[cell.index].handle.clone(),
            frame: cell.frame,
            partition: kind,
        }));
    pass.partitions.push(PartitionSummary {
        kind,
        region,
        tiles: tiles.len(),
        dimensions,
        rows: rows.len(),
    });
    Ok(())
}
