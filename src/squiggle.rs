//! Sparse halo of synthetic sites around the scaled data.
//!
//! Four bands sit between the data's bounding box (pushed outward by a fixed
//! share of the data range) and the canvas edges. Every integer grid cell in a
//! band independently receives a point with probability `p_value`. Bands
//! overlap at the corners, so a grid cell may be sampled twice.

use std::ops::Range;

use rand::Rng;
use serde::Deserialize;

use crate::bounds::DataBounds;
use crate::point::Point;
use crate::scale::Scales;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SquiggleParams {
    /// Inclusion probability per unit grid cell.
    #[serde(default = "SquiggleParams::default_p_value")]
    pub p_value: f64,
    /// Minimum offset of the bands from the low canvas edges.
    #[serde(default = "SquiggleParams::default_points_radius")]
    pub points_radius: f64,
    /// Data range divided by this gives the outward push of the band edges.
    #[serde(default = "SquiggleParams::default_distance_ratio")]
    pub distance_ratio: f64,
}

impl SquiggleParams {
    const fn default_p_value() -> f64 {
        0.01
    }
    const fn default_points_radius() -> f64 {
        2.0
    }
    fn default_distance_ratio() -> f64 {
        0.7 / 0.15
    }
}

impl Default for SquiggleParams {
    fn default() -> Self {
        Self {
            p_value: Self::default_p_value(),
            points_radius: Self::default_points_radius(),
            distance_ratio: Self::default_distance_ratio(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// Half-open rectangle of grid cells, in canvas coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Band {
    pub side: Side,
    pub x: Range<f64>,
    pub y: Range<f64>,
}

impl Band {
    pub fn contains(&self, p: &Point) -> bool {
        self.x.contains(&p.x) && self.y.contains(&p.y)
    }

    /// Number of grid cells the sampler visits.
    pub fn cell_count(&self) -> usize {
        grid_steps(&self.x) * grid_steps(&self.y)
    }

    /// Walks the grid starting at the band's low corner in unit steps.
    pub fn sample<R: Rng + ?Sized>(&self, p_value: f64, rng: &mut R) -> Vec<Point> {
        let mut points = Vec::new();
        let mut x = self.x.start;
        while x < self.x.end {
            let mut y = self.y.start;
            while y < self.y.end {
                if rng.random::<f64>() < p_value {
                    points.push(Point::new(x, y));
                }
                y += 1.0;
            }
            x += 1.0;
        }
        points
    }
}

fn grid_steps(range: &Range<f64>) -> usize {
    if range.end <= range.start {
        0
    } else {
        (range.end - range.start).ceil() as usize
    }
}

/// The four bands for a given data set. `Top` and `Bottom` refer to data
/// orientation: `Top` is the band beyond the largest data y, which the
/// inverted y scale places at small canvas y.
pub fn bands(
    width: f64,
    height: f64,
    scales: &Scales,
    bounds: &DataBounds,
    params: &SquiggleParams,
) -> [Band; 4] {
    let kw = bounds.width() / params.distance_ratio;
    let kh = bounds.height() / params.distance_ratio;
    let r = params.points_radius;
    [
        Band {
            side: Side::Left,
            x: r..scales.x.apply(bounds.min_x - kw),
            y: r..height,
        },
        Band {
            side: Side::Right,
            x: scales.x.apply(bounds.max_x + kw)..width,
            y: r..height,
        },
        Band {
            side: Side::Top,
            x: r..width,
            y: r..scales.y.apply(bounds.max_y + kh),
        },
        Band {
            side: Side::Bottom,
            x: r..width,
            y: scales.y.apply(bounds.min_y - kh)..height,
        },
    ]
}

/// Samples all four bands. An empty result is valid output.
pub fn squiggle_points<R: Rng + ?Sized>(
    width: f64,
    height: f64,
    scales: &Scales,
    bounds: &DataBounds,
    params: &SquiggleParams,
    rng: &mut R,
) -> Vec<Point> {
    let mut points = Vec::new();
    for band in bands(width, height, scales, bounds, params) {
        let sampled = band.sample(params.p_value, rng);
        tracing::trace!(side = ?band.side, count = sampled.len(), "sampled squiggle band");
        points.extend(sampled);
    }
    points
}
