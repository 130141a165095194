//! SVG surface for a built [`Diagram`].
//!
//! A session owns everything drawn so far and the squiggle visibility flag.
//! Rendering replaces all previous groups and makes squiggles visible again;
//! toggling only touches the current diagram.

use std::path::Path;

use anyhow::Context;

use crate::point::Point;
use crate::voronoi::Polygon;
use crate::Diagram;

const STROKE: &str = "black";
const POINT_FILL: &str = "black";
const SQUIGGLE_FILL: &str = "red";

#[derive(Clone, Debug, PartialEq)]
struct CellPath {
    d: String,
    fill: &'static str,
}

#[derive(Clone, Debug)]
pub struct RenderSession {
    width: f64,
    height: f64,
    point_radius: f64,
    cells: Vec<CellPath>,
    points: Vec<Point>,
    squiggles: Vec<Point>,
    squiggles_visible: bool,
}

impl Default for RenderSession {
    fn default() -> Self {
        Self::new(500.0, 500.0)
    }
}

impl RenderSession {
    /// Empty surface of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            point_radius: 2.0,
            cells: Vec::new(),
            points: Vec::new(),
            squiggles: Vec::new(),
            squiggles_visible: true,
        }
    }

    pub fn render(&mut self, diagram: &Diagram) {
        self.clear();
        self.width = diagram.width;
        self.height = diagram.height;
        self.point_radius = diagram.point_radius;
        self.cells = diagram
            .cells
            .iter()
            .map(|cell| CellPath {
                d: path_data(&cell.polygon),
                fill: cell.color,
            })
            .collect();
        self.points = diagram.points.clone();
        self.squiggles = diagram.squiggles.clone();
        tracing::debug!(
            cells = self.cells.len(),
            points = self.points.len(),
            squiggles = self.squiggles.len(),
            "rendered diagram"
        );
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.points.clear();
        self.squiggles.clear();
        self.squiggles_visible = true;
    }

    /// Flips squiggle visibility and returns the new state.
    pub fn toggle_squiggles(&mut self) -> bool {
        self.squiggles_visible = !self.squiggles_visible;
        self.squiggles_visible
    }

    pub fn squiggles_visible(&self) -> bool {
        self.squiggles_visible
    }

    pub fn squiggle_opacity(&self) -> f64 {
        if self.squiggles_visible {
            1.0
        } else {
            0.0
        }
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn squiggle_count(&self) -> usize {
        self.squiggles.len()
    }

    pub fn to_svg(&self) -> String {
        let mut out = self.header();
        for cell in &self.cells {
            out.push_str(&format!(
                "    <path d=\"{}\" fill=\"{}\" fill-opacity=\"1\" stroke=\"{STROKE}\" stroke-opacity=\"1\"/>\n",
                cell.d, cell.fill
            ));
        }
        out.push_str("  </g>\n");
        out.push_str(&points_group(
            "mainVoronoiPoints",
            &self.points,
            self.point_radius,
            POINT_FILL,
            1.0,
        ));
        out.push_str(&points_group(
            "squigglyPoints",
            &self.squiggles,
            self.point_radius,
            SQUIGGLE_FILL,
            self.squiggle_opacity(),
        ));
        out.push_str("</svg>\n");
        out
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        std::fs::write(path, self.to_svg())
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    fn header(&self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n  <g class=\"voronoiLines\">\n",
            w = self.width,
            h = self.height
        )
    }
}

fn points_group(class: &str, points: &[Point], radius: f64, fill: &str, opacity: f64) -> String {
    let mut group = format!("  <g class=\"{class}\">\n");
    for p in points {
        group.push_str(&format!(
            "    <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{radius}\" fill=\"{fill}\" fill-opacity=\"{opacity}\"/>\n",
            p.x, p.y
        ));
    }
    group.push_str("  </g>\n");
    group
}

/// `M x,y L x,y ... Z` for a closed ring.
pub fn path_data(polygon: &Polygon) -> String {
    let mut d = String::new();
    for (i, p) in polygon.vertices().iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        d.push_str(&format!("{cmd}{:.2},{:.2}", p.x, p.y));
    }
    if !d.is_empty() {
        d.push('Z');
    }
    d
}
