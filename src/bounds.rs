use crate::error::{Axis, DiagramError};
use crate::point::Point;

/// Componentwise extremes of the real point set.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DataBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl DataBounds {
    /// Fails with [`DiagramError::EmptyInput`] on an empty slice; min/max of
    /// nothing is not defined.
    pub fn from_points(points: &[Point]) -> Result<Self, DiagramError> {
        let first = points.first().ok_or(DiagramError::EmptyInput)?;
        let mut bounds = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in points.iter().skip(1) {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Ok(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// First axis (x before y) whose values are all identical.
    pub fn degenerate_axis(&self) -> Option<Axis> {
        if self.width() == 0.0 {
            Some(Axis::X)
        } else if self.height() == 0.0 {
            Some(Axis::Y)
        } else {
            None
        }
    }

    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}
