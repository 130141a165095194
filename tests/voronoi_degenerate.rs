use approx::assert_relative_eq;
use squiggle_voronoi::voronoi::{compute_cells, real_cells, tag_sites};
use squiggle_voronoi::{CellOutcome, Extent, NoCellReason, Point};

fn unit_square() -> Extent {
    Extent::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0))
}

fn pts(xy: &[(f64, f64)]) -> Vec<Point> {
    xy.iter().map(|&p| Point::from(p)).collect()
}

#[test]
fn collinear_sites_still_form_cells() {
    let sites = tag_sites(
        &pts(&[(0.2, 0.5), (0.5, 0.5), (0.8, 0.5), (0.5, 0.2)]),
        &[],
    );
    let cells = compute_cells(&sites, &unit_square());
    let mut non_empty = 0;
    for cell in &cells {
        let Some(polygon) = cell.polygon() else {
            continue;
        };
        non_empty += 1;
        assert!(polygon.area() > 1.0e-6);
    }
    assert_eq!(non_empty, 4, "expected 4 non-empty cells, got {non_empty}");
}

#[test]
fn fully_collinear_sites_split_the_extent() {
    let sites = tag_sites(&pts(&[(0.1, 0.5), (0.3, 0.5), (0.9, 0.5)]), &[]);
    let cells = compute_cells(&sites, &unit_square());
    let areas: Vec<f64> = cells
        .iter()
        .map(|c| c.polygon().map(|p| p.area()).unwrap_or(0.0))
        .collect();
    assert_relative_eq!(areas[0], 0.2, epsilon = 1e-9);
    assert_relative_eq!(areas[1], 0.4, epsilon = 1e-9);
    assert_relative_eq!(areas[2], 0.4, epsilon = 1e-9);
}

#[test]
fn lone_site_owns_the_whole_extent() {
    let cells = compute_cells(&tag_sites(&pts(&[(0.3, 0.6)]), &[]), &unit_square());
    let polygon = cells[0].polygon().unwrap();
    assert_eq!(polygon.len(), 4);
    assert_relative_eq!(polygon.area(), 1.0, epsilon = 1e-12);
}

#[test]
fn coincident_sites_defer_to_the_first() {
    let sites = tag_sites(&pts(&[(0.25, 0.25), (0.75, 0.75), (0.25, 0.25)]), &[]);
    let cells = compute_cells(&sites, &unit_square());
    assert!(cells[0].polygon().is_some());
    assert_eq!(
        cells[2],
        CellOutcome::NoCell(NoCellReason::Coincident { with: 0 })
    );
}

#[test]
fn sites_on_the_border_have_no_cell() {
    let sites = tag_sites(&pts(&[(0.5, 0.5), (1.0, 0.5), (0.5, 1.5)]), &[]);
    let cells = compute_cells(&sites, &unit_square());
    assert!(cells[0].polygon().is_some());
    assert_eq!(cells[1], CellOutcome::NoCell(NoCellReason::OutsideExtent));
    assert_eq!(cells[2], CellOutcome::NoCell(NoCellReason::OutsideExtent));
    // sites outside still cut their neighbors
    let polygon = cells[0].polygon().unwrap();
    assert!(polygon.vertices().iter().all(|p| p.x <= 0.75 + 1e-9));
}

#[test]
fn real_cells_are_selected_by_identity_not_position() {
    let extent = Extent::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
    let real = pts(&[(5.0, 5.0), (10.0, 5.0), (3.0, 3.0)]);
    let synthetic = pts(&[(8.0, 8.0), (1.0, 9.0)]);
    let selection = real_cells(&real, &synthetic, &extent);

    let indices: Vec<usize> = selection.cells.iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![0, 2]);
    assert_eq!(selection.unresolved, vec![(1, NoCellReason::OutsideExtent)]);
    for cell in &selection.cells {
        assert_eq!(cell.site, real[cell.index]);
        assert!(cell.polygon.contains(&cell.site));
    }
}

#[test]
fn polygons_trace_back_to_their_start() {
    let sites = tag_sites(&pts(&[(0.3, 0.3), (0.7, 0.6), (0.4, 0.8)]), &[]);
    for outcome in compute_cells(&sites, &unit_square()) {
        let polygon = outcome.polygon().unwrap();
        let ring: Vec<&Point> = polygon.closed().collect();
        assert_eq!(ring.len(), polygon.len() + 1);
        assert_eq!(ring.first(), ring.last());
        assert!(polygon.is_simple());
        assert!(polygon.signed_area() > 0.0);
    }
}
