use super::rows::Row;
use crate::error::Result;
use crate::geometry::{Frame, Region};
use crate::tile::{StyleInspector, Tile};

/// Frame for the tile at `index` within the partition's tile list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedCell {
    pub index: usize,
    pub frame: Frame,
}

/// Center the rows inside `region` and emit one content-box frame per cell.
pub fn place_rows<H, S>(
    rows: &[Row],
    tiles: &[&Tile<H>],
    region: Region,
    fixed_ratio: bool,
    styles: &S,
) -> Result<Vec<PlacedCell>>
where
    S: StyleInspector<H> + ?Sized,
{
    let total_height: f64 = rows.iter().map(|r| r.height).sum();
    let mut y = (region.size.height - total_height) / 2.0;
    let mut placed = Vec::with_capacity(tiles.len());

    for row in rows {
        let mut x = (region.size.width - row.width) / 2.0;
        for cell in &row.cells {
            let tile = tiles[cell.index];
            let height = cell.height;
            let width = if fixed_ratio {
                height / tile.intrinsic_ratio
            } else {
                cell.width
            };

            let insets = styles.insets(&tile.handle)?;
            let content_width = (width - insets.horizontal()).max(0.0);
            let content_height = (height - insets.vertical()).max(0.0);
            let offset_top = (row.height - height) / 2.0;

            placed.push(PlacedCell {
                index: cell.index,
                frame: Frame::new(
                    x + region.origin.x,
                    y + region.origin.y + offset_top,
                    content_width,
                    content_height,
                ),
            });
            x += width;
        }
        y += row.height;
    }

    Ok(placed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;
    use crate::geometry::{Edges, Point, Size};
    use crate::layout::rows::Cell;
    use crate::tile::{BoxInsets, NoInsets};

    const EPS: f64 = 1e-9;

    fn tile(handle: u32, ratio: f64) -> Tile<u32> {
        Tile {
            handle,
            intrinsic_ratio: ratio,
            weight: 1.0,
            is_big: false,
            visible: true,
        }
    }

    fn row(first: usize, sizes: &[(f64, f64)]) -> Row {
        let mut row = Row {
            cells: sizes
                .iter()
                .enumerate()
                .map(|(i, &(width, height))| Cell {
                    index: first + i,
                    width,
                    height,
                    weight: 1.0,
                })
                .collect(),
            width: 0.0,
            height: 0.0,
        };
        row.refresh();
        row
    }

    struct Bordered;

    impl StyleInspector<u32> for Bordered {
        fn insets(&self, _handle: &u32) -> Result<BoxInsets> {
            Ok(BoxInsets {
                border: Edges::uniform(1.0),
                padding: Edges::new(0.0, 2.0, 0.0, 2.0),
                margin: Edges::default(),
            })
        }
    }

    struct Broken;

    impl StyleInspector<u32> for Broken {
        fn insets(&self, handle: &u32) -> Result<BoxInsets> {
            Err(LayoutError::Style(format!("element {handle} detached")))
        }
    }

    #[test]
    fn rows_are_centered_both_ways() {
        let tiles = [tile(0, 0.75), tile(1, 0.75), tile(2, 0.75)];
        let refs: Vec<_> = tiles.iter().collect();
        let rows = vec![
            row(0, &[(200.0, 150.0), (200.0, 150.0)]),
            row(2, &[(200.0, 150.0)]),
        ];
        let region = Region::new(Point::new(10.0, 20.0), Size::new(600.0, 400.0));
        let placed = place_rows(&rows, &refs, region, false, &NoInsets).unwrap();

        assert_eq!(placed.len(), 3);
        // 300px of rows in 400px leaves 50px above.
        assert_eq!(placed[0].frame, Frame::new(110.0, 70.0, 200.0, 150.0));
        assert_eq!(placed[1].frame, Frame::new(310.0, 70.0, 200.0, 150.0));
        assert_eq!(placed[2].frame, Frame::new(210.0, 220.0, 200.0, 150.0));
    }

    #[test]
    fn shorter_cells_are_centered_within_their_row() {
        let tiles = [tile(0, 0.75), tile(1, 0.75)];
        let refs: Vec<_> = tiles.iter().collect();
        let rows = vec![row(0, &[(200.0, 200.0), (100.0, 100.0)])];
        let region = Region::at_origin(Size::new(300.0, 200.0));
        let placed = place_rows(&rows, &refs, region, false, &NoInsets).unwrap();
        assert_eq!(placed[1].frame.y, 50.0);
        assert_eq!(placed[1].frame.x, 200.0);
    }

    #[test]
    fn fixed_ratio_recomputes_width_from_height() {
        let tiles = [tile(0, 0.5)];
        let refs: Vec<_> = tiles.iter().collect();
        let rows = vec![row(0, &[(150.0, 100.0)])];
        let region = Region::at_origin(Size::new(400.0, 100.0));
        let placed = place_rows(&rows, &refs, region, true, &NoInsets).unwrap();
        assert!((placed[0].frame.width - 200.0).abs() < EPS);
    }

    #[test]
    fn insets_shrink_the_content_box_only() {
        let tiles = [tile(0, 0.75), tile(1, 0.75)];
        let refs: Vec<_> = tiles.iter().collect();
        let rows = vec![row(0, &[(100.0, 75.0), (100.0, 75.0)])];
        let region = Region::at_origin(Size::new(200.0, 75.0));
        let placed = place_rows(&rows, &refs, region, false, &Bordered).unwrap();
        assert_eq!(placed[0].frame, Frame::new(0.0, 0.0, 94.0, 73.0));
        // Advance uses the slot width, not the content width.
        assert_eq!(placed[1].frame.x, 100.0);
    }

    #[test]
    fn style_failures_propagate() {
        let tiles = [tile(7, 0.75)];
        let refs: Vec<_> = tiles.iter().collect();
        let rows = vec![row(0, &[(100.0, 75.0)])];
        let err = place_rows(&rows, &refs, Region::default(), false, &Broken).unwrap_err();
        assert!(matches!(err, LayoutError::Style(msg) if msg.contains('7')));
    }
}
