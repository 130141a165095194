//! Voronoi diagrams of a user supplied point table whose outer cells are
//! disguised by a sparse halo of synthetic "squiggle" sites.
//!
//! The pipeline runs bounds, scales, squiggle sampling, cell computation and
//! coloring from scratch on every call to [`build_diagram`]; [`RenderSession`]
//! turns the result into an SVG surface.

use std::path::Path;

use anyhow::{bail, Context};
use rand::Rng;
use serde::Deserialize;

pub mod bounds;
pub mod error;
pub mod input;
pub mod palette;
pub mod point;
pub mod presets;
pub mod render;
pub mod scale;
pub mod squiggle;
pub mod voronoi;

pub use bounds::DataBounds;
pub use error::{Axis, DiagramError};
pub use input::parse_points;
pub use palette::{ColorRule, PALETTE};
pub use point::Point;
pub use render::RenderSession;
pub use scale::{Extent, LinearScale, Scales};
pub use squiggle::SquiggleParams;
pub use voronoi::{CellOutcome, NoCellReason, Origin, Polygon};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CanvasParams {
    #[serde(default = "CanvasParams::default_width")]
    pub width: f64,
    #[serde(default = "CanvasParams::default_height")]
    pub height: f64,
}

impl CanvasParams {
    const fn default_width() -> f64 {
        500.0
    }
    const fn default_height() -> f64 {
        500.0
    }
}

impl Default for CanvasParams {
    fn default() -> Self {
        Self {
            width: Self::default_width(),
            height: Self::default_height(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StyleParams {
    #[serde(default)]
    pub color_rule: ColorRule,
    #[serde(default = "StyleParams::default_point_radius")]
    pub point_radius: f64,
}

impl StyleParams {
    const fn default_point_radius() -> f64 {
        2.0
    }
}

impl Default for StyleParams {
    fn default() -> Self {
        Self {
            color_rule: ColorRule::default(),
            point_radius: Self::default_point_radius(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Params {
    #[serde(default)]
    pub canvas: CanvasParams,
    #[serde(default)]
    pub squiggle: SquiggleParams,
    #[serde(default)]
    pub style: StyleParams,
}

impl Params {
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let params: Params = toml::from_str(raw).context("Failed to parse parameters")?;
        params.validate()?;
        Ok(params)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("Failed to load {}", path.display()))
    }

    /// Defaults when `path` does not exist; a file that exists but does not
    /// parse is still an error.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "parameter file not found; using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let canvas = &self.canvas;
        if !(positive_finite(canvas.width) && positive_finite(canvas.height)) {
            bail!(
                "canvas must have a finite positive size, got {}x{}",
                canvas.width,
                canvas.height
            );
        }
        let squiggle = &self.squiggle;
        if !(0.0..=1.0).contains(&squiggle.p_value) {
            bail!("squiggle.p_value must lie in [0, 1], got {}", squiggle.p_value);
        }
        if !(squiggle.points_radius.is_finite() && squiggle.points_radius >= 0.0) {
            bail!(
                "squiggle.points_radius must be finite and not negative, got {}",
                squiggle.points_radius
            );
        }
        if !positive_finite(squiggle.distance_ratio) {
            bail!(
                "squiggle.distance_ratio must be finite and positive, got {}",
                squiggle.distance_ratio
            );
        }
        if !(self.style.point_radius.is_finite() && self.style.point_radius >= 0.0) {
            bail!(
                "style.point_radius must be finite and not negative, got {}",
                self.style.point_radius
            );
        }
        Ok(())
    }
}

fn positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// A real site's cell with its assigned fill.
#[derive(Clone, Debug, PartialEq)]
pub struct ColoredCell {
    /// Row of the site in the input table.
    pub index: usize,
    /// Site in canvas coordinates.
    pub site: Point,
    pub polygon: Polygon,
    pub color: &'static str,
}

/// Everything a renderer needs for one diagram, in canvas coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagram {
    pub width: f64,
    pub height: f64,
    pub point_radius: f64,
    pub bounds: DataBounds,
    pub scales: Scales,
    pub points: Vec<Point>,
    pub squiggles: Vec<Point>,
    pub cells: Vec<ColoredCell>,
}

/// Runs the whole pipeline, drawing squiggle points from `rng`.
pub fn build_diagram<R: Rng + ?Sized>(
    points: &[Point],
    params: &Params,
    rng: &mut R,
) -> Result<Diagram, DiagramError> {
    let (bounds, scales) = bounds_and_scales(points, params)?;
    let squiggles = squiggle::squiggle_points(
        params.canvas.width,
        params.canvas.height,
        &scales,
        &bounds,
        &params.squiggle,
        rng,
    );
    assemble(points, squiggles, params, bounds, scales)
}

/// Same as [`build_diagram`] with a fixed set of synthetic sites.
pub fn build_diagram_with_squiggles(
    points: &[Point],
    squiggles: Vec<Point>,
    params: &Params,
) -> Result<Diagram, DiagramError> {
    let (bounds, scales) = bounds_and_scales(points, params)?;
    assemble(points, squiggles, params, bounds, scales)
}

fn assemble(
    points: &[Point],
    squiggles: Vec<Point>,
    params: &Params,
    bounds: DataBounds,
    scales: Scales,
) -> Result<Diagram, DiagramError> {
    let scaled = scales.project_all(points);
    tracing::debug!(
        real = scaled.len(),
        synthetic = squiggles.len(),
        "computing Voronoi cells"
    );

    let selection = voronoi::real_cells(&scaled, &squiggles, &scales.extent);
    if let Some(&(index, _)) = selection.unresolved.first() {
        let p = points[index];
        return Err(DiagramError::UnresolvedCell {
            index,
            x: p.x,
            y: p.y,
        });
    }

    let rule = params.style.color_rule;
    let cells = selection
        .cells
        .into_iter()
        .enumerate()
        .map(|(position, cell)| ColoredCell {
            index: cell.index,
            site: cell.site,
            polygon: cell.polygon,
            color: rule.color(position),
        })
        .collect::<Vec<_>>();
    tracing::info!(
        cells = cells.len(),
        squiggles = squiggles.len(),
        "diagram built"
    );

    Ok(Diagram {
        width: params.canvas.width,
        height: params.canvas.height,
        point_radius: params.style.point_radius,
        bounds,
        scales,
        points: scaled,
        squiggles,
        cells,
    })
}

fn bounds_and_scales(
    points: &[Point],
    params: &Params,
) -> Result<(DataBounds, Scales), DiagramError> {
    let bounds = DataBounds::from_points(points)?;
    if let Some(axis) = bounds.degenerate_axis() {
        return Err(DiagramError::DegenerateBounds { axis });
    }
    let scales = Scales::new(&bounds, params.canvas.width, params.canvas.height);
    Ok((bounds, scales))
}
