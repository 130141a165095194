use std::collections::{BTreeSet, HashMap};

use delaunator::{triangulate, Triangulation};

use crate::point::Point;
use crate::scale::Extent;

const EPS_POS: f64 = 1.0e-12;
const EDGE_TOLERANCE: f64 = 1.0e-9;
const VERTEX_MERGE: f64 = 1.0e-7;
const MIN_CELL_AREA: f64 = 1.0e-9;

/// Where a site came from. Real sites keep their position in the user's table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Origin {
    Real(usize),
    Synthetic,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Site {
    pub pos: Point,
    pub origin: Origin,
}

/// Real sites first, in order, then the synthetic ones.
pub fn tag_sites(real: &[Point], synthetic: &[Point]) -> Vec<Site> {
    real.iter()
        .enumerate()
        .map(|(i, p)| Site {
            pos: *p,
            origin: Origin::Real(i),
        })
        .chain(synthetic.iter().map(|p| Site {
            pos: *p,
            origin: Origin::Synthetic,
        }))
        .collect()
}

/// Closed cell boundary. The ring is stored without repeating its first
/// vertex and runs counter-clockwise in a y-up frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The ring traced back to its starting vertex.
    pub fn closed(&self) -> impl Iterator<Item = &Point> + '_ {
        self.vertices.iter().chain(self.vertices.first())
    }

    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let mut area = 0.0;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            area += a.x * b.y - b.x * a.y;
        }
        0.5 * area
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Ray casting; points on the boundary count as inside.
    pub fn contains(&self, p: &Point) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        for i in 0..n {
            if on_segment(self.vertices[i], self.vertices[(i + 1) % n], *p) {
                return true;
            }
        }
        let mut inside = false;
        let mut prev = self.vertices[n - 1];
        for &curr in &self.vertices {
            if (curr.y > p.y) != (prev.y > p.y) {
                let x_cross = (prev.x - curr.x) * (p.y - curr.y) / (prev.y - curr.y) + curr.x;
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            prev = curr;
        }
        inside
    }

    /// No two non-adjacent edges touch and no two adjacent edges fold back.
    pub fn is_simple(&self) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        for i in 0..n {
            let a0 = self.vertices[i];
            let a1 = self.vertices[(i + 1) % n];
            for j in (i + 1)..n {
                let adjacent = j == i + 1 || (i == 0 && j == n - 1);
                if adjacent {
                    continue;
                }
                let b0 = self.vertices[j];
                let b1 = self.vertices[(j + 1) % n];
                if segments_intersect(a0, a1, b0, b1) {
                    return false;
                }
            }
        }
        true
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoCellReason {
    /// Site on or beyond the clip extent.
    OutsideExtent,
    /// Same position as an earlier site, which owns the cell.
    Coincident { with: usize },
    /// Clipping left fewer than three vertices or no area.
    Collapsed,
}

/// Per-site result of the cell computation.
#[derive(Clone, Debug, PartialEq)]
pub enum CellOutcome {
    Cell(Polygon),
    NoCell(NoCellReason),
}

impl CellOutcome {
    pub fn polygon(&self) -> Option<&Polygon> {
        match self {
            CellOutcome::Cell(polygon) => Some(polygon),
            CellOutcome::NoCell(_) => None,
        }
    }
}

/// Computes one outcome per site, in site order.
///
/// Each cell starts as the extent rectangle and is cut by the perpendicular
/// bisector of every Delaunay neighbor. Sites the triangulation could not
/// place (all sites collinear, near-duplicates) are cut against every other
/// site instead.
pub fn compute_cells(sites: &[Site], extent: &Extent) -> Vec<CellOutcome> {
    let positions: Vec<Point> = sites.iter().map(|s| s.pos).collect();
    let owner = coincidence_owners(&positions);
    let unique: Vec<usize> = (0..sites.len()).filter(|&i| owner[i] == i).collect();

    let delaunay = triangulate(
        &unique
            .iter()
            .map(|&i| delaunator::Point {
                x: positions[i].x,
                y: positions[i].y,
            })
            .collect::<Vec<_>>(),
    );
    let neighbor_sets = build_neighbor_sets(&delaunay, &unique, sites.len());
    tracing::debug!(
        sites = sites.len(),
        unique = unique.len(),
        triangles = delaunay.triangles.len() / 3,
        "triangulated sites"
    );

    let rect = extent.corners().to_vec();
    let mut outcomes = Vec::with_capacity(sites.len());
    for site_idx in 0..sites.len() {
        if owner[site_idx] != site_idx {
            outcomes.push(CellOutcome::NoCell(NoCellReason::Coincident {
                with: owner[site_idx],
            }));
            continue;
        }
        let site_pos = positions[site_idx];
        if !extent.contains_strictly(&site_pos) {
            outcomes.push(CellOutcome::NoCell(NoCellReason::OutsideExtent));
            continue;
        }
        let fallback: Vec<usize>;
        let candidates: &[usize] = if neighbor_sets[site_idx].is_empty() {
            fallback = unique.iter().copied().filter(|&i| i != site_idx).collect();
            &fallback
        } else {
            &neighbor_sets[site_idx]
        };
        let mut polygon = rect.clone();
        for &neighbor in candidates {
            polygon = clip_polygon_by_neighbor(&polygon, site_pos, positions[neighbor]);
            if polygon.is_empty() {
                break;
            }
        }
        let polygon = Polygon::new(merge_close_vertices(polygon));
        if polygon.len() < 3 || polygon.area() < MIN_CELL_AREA {
            outcomes.push(CellOutcome::NoCell(NoCellReason::Collapsed));
        } else {
            outcomes.push(CellOutcome::Cell(polygon));
        }
    }
    outcomes
}

/// A surviving cell of a real site.
#[derive(Clone, Debug, PartialEq)]
pub struct RealCell {
    /// Position of the site in the user's table.
    pub index: usize,
    pub site: Point,
    pub polygon: Polygon,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellSelection {
    /// Surviving real cells, in input order.
    pub cells: Vec<RealCell>,
    /// Real indices whose site produced no cell.
    pub unresolved: Vec<(usize, NoCellReason)>,
}

/// Picks the real cells out of a full computation by origin tag, never by
/// position among the survivors.
pub fn select_real_cells(sites: &[Site], outcomes: Vec<CellOutcome>) -> CellSelection {
    let mut selection = CellSelection::default();
    for (site, outcome) in sites.iter().zip(outcomes) {
        let Origin::Real(index) = site.origin else {
            continue;
        };
        match outcome {
            CellOutcome::Cell(polygon) => selection.cells.push(RealCell {
                index,
                site: site.pos,
                polygon,
            }),
            CellOutcome::NoCell(reason) => {
                tracing::warn!(
                    index,
                    x = site.pos.x,
                    y = site.pos.y,
                    ?reason,
                    "real site produced no Voronoi cell"
                );
                selection.unresolved.push((index, reason));
            }
        }
    }
    selection
}

/// Tags, computes and selects in one go.
pub fn real_cells(real: &[Point], synthetic: &[Point], extent: &Extent) -> CellSelection {
    let sites = tag_sites(real, synthetic);
    let outcomes = compute_cells(&sites, extent);
    select_real_cells(&sites, outcomes)
}

fn coincidence_owners(positions: &[Point]) -> Vec<usize> {
    let mut first_seen = HashMap::<(u64, u64), usize>::with_capacity(positions.len());
    positions
        .iter()
        .enumerate()
        .map(|(i, p)| {
            // +0.0 folds -0.0 onto 0.0
            let key = ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits());
            *first_seen.entry(key).or_insert(i)
        })
        .collect()
}

fn signed_distance_to_bisector(p: Point, a: Point, b: Point) -> f64 {
    let mid = a.midpoint(&b);
    (p.x - mid.x) * (b.x - a.x) + (p.y - mid.y) * (b.y - a.y)
}

/// Keeps the part of `polygon` on `site_pos`'s side of the bisector.
fn clip_polygon_by_neighbor(polygon: &[Point], site_pos: Point, neighbor_pos: Point) -> Vec<Point> {
    let Some(&last) = polygon.last() else {
        return Vec::new();
    };
    let mut result = Vec::with_capacity(polygon.len() + 1);
    let mut prev = last;
    let mut prev_dist = signed_distance_to_bisector(prev, site_pos, neighbor_pos);
    let mut prev_inside = prev_dist <= EDGE_TOLERANCE;
    for &current in polygon {
        let curr_dist = signed_distance_to_bisector(current, site_pos, neighbor_pos);
        let curr_inside = curr_dist <= EDGE_TOLERANCE;
        if curr_inside {
            if !prev_inside {
                result.push(intersect_segment(prev, current, prev_dist, curr_dist));
            }
            result.push(current);
        } else if prev_inside {
            result.push(intersect_segment(prev, current, prev_dist, curr_dist));
        }
        prev = current;
        prev_dist = curr_dist;
        prev_inside = curr_inside;
    }
    result
}

fn intersect_segment(start: Point, end: Point, start_dist: f64, end_dist: f64) -> Point {
    let denom = start_dist - end_dist;
    let t = if denom.abs() < EPS_POS {
        0.5
    } else {
        start_dist / denom
    };
    let t = t.clamp(0.0, 1.0);
    Point::new(
        start.x + (end.x - start.x) * t,
        start.y + (end.y - start.y) * t,
    )
}

fn merge_close_vertices(mut ring: Vec<Point>) -> Vec<Point> {
    let limit = VERTEX_MERGE * VERTEX_MERGE;
    ring.dedup_by(|b, a| a.distance_squared(b) < limit);
    while ring.len() > 1 {
        let (first, last) = (ring[0], ring[ring.len() - 1]);
        if first.distance_squared(&last) < limit {
            ring.pop();
        } else {
            break;
        }
    }
    ring
}

/// Neighbor lists indexed by site id. `unique` maps triangulation ids back to
/// site ids.
fn build_neighbor_sets(tri: &Triangulation, unique: &[usize], num_sites: usize) -> Vec<Vec<usize>> {
    let mut sets = vec![BTreeSet::new(); num_sites];
    for tri_indices in tri.triangles.chunks(3) {
        if tri_indices.len() < 3 {
            continue;
        }
        let a = unique[tri_indices[0]];
        let b = unique[tri_indices[1]];
        let c = unique[tri_indices[2]];
        sets[a].insert(b);
        sets[b].insert(a);
        sets[b].insert(c);
        sets[c].insert(b);
        sets[c].insert(a);
        sets[a].insert(c);
    }
    sets.into_iter().map(|s| s.into_iter().collect()).collect()
}

fn orient2d(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn orient_sign(value: f64) -> i32 {
    if value > EDGE_TOLERANCE {
        1
    } else if value < -EDGE_TOLERANCE {
        -1
    } else {
        0
    }
}

fn on_segment(a: Point, b: Point, p: Point) -> bool {
    if orient2d(a, b, p).abs() > EDGE_TOLERANCE {
        return false;
    }
    p.x >= a.x.min(b.x) - EDGE_TOLERANCE
        && p.x <= a.x.max(b.x) + EDGE_TOLERANCE
        && p.y >= a.y.min(b.y) - EDGE_TOLERANCE
        && p.y <= a.y.max(b.y) + EDGE_TOLERANCE
}

fn segments_intersect(a0: Point, a1: Point, b0: Point, b1: Point) -> bool {
    let o1 = orient_sign(orient2d(a0, a1, b0));
    let o2 = orient_sign(orient2d(a0, a1, b1));
    let o3 = orient_sign(orient2d(b0, b1, a0));
    let o4 = orient_sign(orient2d(b0, b1, a1));
    if o1 * o2 < 0 && o3 * o4 < 0 {
        return true;
    }
    (o1 == 0 && on_segment(a0, a1, b0))
        || (o2 == 0 && on_segment(a0, a1, b1))
        || (o3 == 0 && on_segment(b0, b1, a0))
        || (o4 == 0 && on_segment(b0, b1, a1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    #[test]
    fn bisector_clip_halves_square() {
        let clipped =
            clip_polygon_by_neighbor(&square(), Point::new(2.0, 5.0), Point::new(8.0, 5.0));
        let polygon = Polygon::new(merge_close_vertices(clipped));
        assert_eq!(polygon.len(), 4);
        assert_relative_eq!(polygon.area(), 50.0, epsilon = 1e-9);
        assert!(polygon.vertices().iter().all(|p| p.x <= 5.0 + 1e-9));
    }

    #[test]
    fn clip_through_corner_keeps_triangle() {
        // bisector of these two passes through (0,10) and (10,0)
        let clipped =
            clip_polygon_by_neighbor(&square(), Point::new(2.0, 2.0), Point::new(8.0, 8.0));
        let polygon = Polygon::new(merge_close_vertices(clipped));
        assert_eq!(polygon.len(), 3);
        assert_relative_eq!(polygon.area(), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn merge_drops_repeated_and_wrapping_vertices() {
        let ring = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1e-9),
        ];
        assert_eq!(merge_close_vertices(ring).len(), 3);
    }

    #[test]
    fn coincident_sites_share_first_owner() {
        let owners = coincidence_owners(&[
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(1.0, 1.0),
            Point::new(-0.0, 0.0),
            Point::new(0.0, 0.0),
        ]);
        assert_eq!(owners, vec![0, 1, 0, 3, 3]);
    }

    #[test]
    fn bowtie_is_not_simple() {
        let bowtie = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        ]);
        assert!(!bowtie.is_simple());
        assert!(Polygon::new(square()).is_simple());
    }
}
