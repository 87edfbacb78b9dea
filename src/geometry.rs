use serde::{Deserialize, Serialize};

/// Width/height pair measured in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Height over width. Zero-width sizes report `f64::INFINITY`.
    pub fn ratio(&self) -> f64 {
        if self.width > 0.0 {
            self.height / self.width
        } else {
            f64::INFINITY
        }
    }
}

/// Offset of a region inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Final rectangle handed to the positioner, in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub(crate) fn write_bits(&self, hasher: &mut blake3::Hasher) {
        for value in [self.x, self.y, self.width, self.height] {
            hasher.update(&value.to_bits().to_le_bytes());
        }
    }
}

/// Sub-rectangle of the container assigned to one partition.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Region {
    pub origin: Point,
    pub size: Size,
}

impl Region {
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn at_origin(size: Size) -> Self {
        Self::new(Point::default(), size)
    }
}

/// Four-sided box metric (border, padding or margin widths).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_width_ratio_is_infinite() {
        assert_eq!(Size::new(0.0, 10.0).ratio(), f64::INFINITY);
        assert_eq!(Size::new(200.0, 100.0).ratio(), 0.5);
    }

    #[test]
    fn edges_sum_per_axis() {
        let edges = Edges::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(edges.horizontal(), 6.0);
        assert_eq!(edges.vertical(), 4.0);
    }

    #[test]
    fn frame_extents() {
        let frame = Frame::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(frame.right(), 40.0);
        assert_eq!(frame.bottom(), 60.0);
    }
}
