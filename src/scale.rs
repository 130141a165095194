//! Data-to-canvas coordinate mappings.
//!
//! Real data is confined to the middle half of the canvas on both axes; the
//! outer quarters are left for squiggle points. The y mapping is inverted so
//! larger data values end up nearer the top of the canvas.

use crate::bounds::DataBounds;
use crate::point::Point;

/// Linear map from `domain` onto `range`. A zero-width domain maps every
/// input onto the midpoint of the range instead of producing NaN.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    pub fn is_degenerate(&self) -> bool {
        self.domain[1] - self.domain[0] == 0.0
    }

    pub fn apply(&self, value: f64) -> f64 {
        let span = self.domain[1] - self.domain[0];
        if span == 0.0 {
            return (self.range[0] + self.range[1]) * 0.5;
        }
        let t = (value - self.domain[0]) / span;
        // exact at both ends of the domain
        if t == 1.0 {
            return self.range[1];
        }
        self.range[0] + t * (self.range[1] - self.range[0])
    }
}

/// Axis-aligned clip rectangle for cell computation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Extent {
    pub min: Point,
    pub max: Point,
}

impl Extent {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Points on the border have no cell of their own after clipping.
    pub fn contains_strictly(&self, p: &Point) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }

    /// Corners in counter-clockwise order (y pointing up).
    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,
            Point::new(self.max.x, self.min.y),
            self.max,
            Point::new(self.min.x, self.max.y),
        ]
    }
}

/// Both axis mappings together with the clip extent they were built for.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Scales {
    pub x: LinearScale,
    pub y: LinearScale,
    pub extent: Extent,
}

impl Scales {
    pub fn new(bounds: &DataBounds, width: f64, height: f64) -> Self {
        let x = LinearScale::new(
            [bounds.min_x, bounds.max_x],
            [width / 4.0, 3.0 * width / 4.0],
        );
        let y = LinearScale::new(
            [bounds.min_y, bounds.max_y],
            [3.0 * height / 4.0, height / 4.0],
        );
        let extent = Extent::new(Point::new(0.0, 0.0), Point::new(width, height));
        Self { x, y, extent }
    }

    pub fn project(&self, p: &Point) -> Point {
        Point::new(self.x.apply(p.x), self.y.apply(p.y))
    }

    pub fn project_all(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|p| self.project(p)).collect()
    }
}
