//! Bounded Voronoi cells from a Delaunay triangulation.
//!
//! The Voronoi cell of a generator is the intersection of the half-planes "closer to this
//! generator than to that one" over all other generators, but only the Delaunay neighbors
//! contribute non-redundant half-planes. So each cell is computed by clipping the bounding
//! rectangle against the perpendicular bisector of every Delaunay edge leaving its generator,
//! which is linear in the total number of edges once the triangulation exists.

use spade::{DelaunayTriangulation, Point2, Triangulation};

use crate::error::{Error, Result};
use crate::math::{clip_to_nearer_half, rectangle, signed_area, Point};

/// Clipped cells with an area at or below this are reported as absent.
pub const MIN_CELL_AREA: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct Tessellation {
    cells: Vec<Option<Vec<Point>>>,
}

impl Tessellation {
    /// Computes the cell of every point in `points`, clipped to `[0, width] x [0, height]`.
    ///
    /// Points whose clipped cell is empty or degenerate get no cell. Of several coincident
    /// points only the first one owns the shared cell.
    pub fn new(points: &[Point], width: f64, height: f64) -> Result<Self> {
        let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
        let mut handles = Vec::with_capacity(points.len());
        for &(x, y) in points {
            let handle = triangulation
                .insert(Point2::new(x, y))
                .map_err(|e| Error::Triangulation {
                    x,
                    y,
                    reason: format!("{:?}", e),
                })?;
            handles.push(handle);
        }

        let mut owned = vec![false; triangulation.num_vertices()];
        let bounds = rectangle((0.0, 0.0), (width, height));
        let cells = handles
            .into_iter()
            .map(|handle| {
                if std::mem::replace(&mut owned[handle.index()], true) {
                    return None;
                }
                let vertex = triangulation.vertex(handle);
                let generator = vertex.position();
                let generator = (generator.x, generator.y);
                let mut polygon = bounds.clone();
                for edge in vertex.out_edges() {
                    let neighbor = edge.to().position();
                    polygon = clip_to_nearer_half(&polygon, generator, (neighbor.x, neighbor.y));
                    if polygon.is_empty() {
                        break;
                    }
                }
                if polygon.len() < 3 || signed_area(&polygon).abs() <= MIN_CELL_AREA {
                    None
                } else {
                    Some(polygon)
                }
            })
            .collect();

        Ok(Tessellation { cells })
    }

    /// Number of input points, whether or not they own a cell.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The clipped cell of the `i`th input point as an implicitly closed polygon, if it has one.
    pub fn cell_polygon(&self, i: usize) -> Option<&[Point]> {
        self.cells.get(i)?.as_deref()
    }

    /// Cells in input order.
    pub fn cells(&self) -> impl Iterator<Item = Option<&[Point]>> + '_ {
        self.cells.iter().map(|c| c.as_deref())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::rand::Rng;

    fn total_area(t: &Tessellation) -> f64 {
        t.cells().flatten().map(|c| signed_area(c).abs()).sum()
    }

    fn assert_inside(t: &Tessellation, (w, h): (f64, f64)) {
        const EPS: f64 = 1e-9;
        for cell in t.cells().flatten() {
            for &(x, y) in cell {
                assert!(x >= -EPS && x <= w + EPS, "x = {}", x);
                assert!(y >= -EPS && y <= h + EPS, "y = {}", y);
            }
        }
    }

    #[test]
    fn test_no_points() {
        let t = Tessellation::new(&[], 10.0, 10.0).unwrap();
        assert!(t.is_empty());
        assert_eq!(t.cell_polygon(0), None);
    }

    #[test]
    fn test_single_point_owns_everything() {
        let t = Tessellation::new(&[(3.0, 4.0)], 300.0, 100.0).unwrap();
        let cell = t.cell_polygon(0).unwrap();
        assert_eq!(cell, rectangle((0.0, 0.0), (300.0, 100.0)).as_slice());
    }

    #[test]
    fn test_two_points_split_at_bisector() {
        let t = Tessellation::new(&[(25.0, 50.0), (75.0, 50.0)], 100.0, 100.0).unwrap();
        let left = t.cell_polygon(0).unwrap();
        let right = t.cell_polygon(1).unwrap();
        assert_eq!(signed_area(left).abs(), 5000.0);
        assert_eq!(signed_area(right).abs(), 5000.0);
        assert!(left.iter().all(|&(x, _)| x <= 50.0));
        assert!(right.iter().all(|&(x, _)| x >= 50.0));
    }

    #[test]
    fn test_collinear_points_make_strips() {
        let points = [(10.0, 5.0), (30.0, 5.0), (50.0, 5.0), (70.0, 5.0), (90.0, 5.0)];
        let t = Tessellation::new(&points, 100.0, 10.0).unwrap();
        for i in 0..points.len() {
            let area = signed_area(t.cell_polygon(i).unwrap()).abs();
            assert!((area - 200.0).abs() < 1e-9, "cell {}: {}", i, area);
        }
    }

    #[test]
    fn test_duplicates_share_one_cell() {
        let points = [(20.0, 20.0), (80.0, 80.0), (20.0, 20.0)];
        let t = Tessellation::new(&points, 100.0, 100.0).unwrap();
        assert!(t.cell_polygon(0).is_some());
        assert!(t.cell_polygon(1).is_some());
        assert_eq!(t.cell_polygon(2), None);
        assert!((total_area(&t) - 10_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_points_outside_bounds() {
        // The right point's cell lies entirely beyond the rectangle.
        let points = [(5.0, 5.0), (50.0, 5.0)];
        let t = Tessellation::new(&points, 10.0, 10.0).unwrap();
        assert_eq!(signed_area(t.cell_polygon(0).unwrap()).abs(), 100.0);
        assert_eq!(t.cell_polygon(1), None);
    }

    #[test]
    fn test_rejects_non_finite() {
        let err = Tessellation::new(&[(1.0, 1.0), (f64::NAN, 2.0)], 10.0, 10.0).unwrap_err();
        assert!(matches!(err, Error::Triangulation { .. }));
    }

    #[test]
    fn test_random_cells_partition_rectangle() {
        let mut rng = Rng::from_seed(b"tessellate");
        let (w, h) = (300.0, 100.0);
        let points: Vec<Point> = (0..500)
            .map(|_| (rng.uniform(0.0, w), rng.uniform(0.0, h)))
            .collect();
        let t = Tessellation::new(&points, w, h).unwrap();
        assert_eq!(t.len(), points.len());
        assert_inside(&t, (w, h));
        assert!((total_area(&t) - w * h).abs() < 1e-6 * w * h);

        // Every cell contains its own generator.
        for (i, &(px, py)) in points.iter().enumerate() {
            let Some(cell) = t.cell_polygon(i) else {
                continue;
            };
            let (xs, ys): (Vec<f64>, Vec<f64>) = cell.iter().copied().unzip();
            let min_x = xs.iter().copied().fold(f64::INFINITY, f64::min);
            let max_x = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let min_y = ys.iter().copied().fold(f64::INFINITY, f64::min);
            let max_y = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            assert!(px >= min_x - 1e-9 && px <= max_x + 1e-9);
            assert!(py >= min_y - 1e-9 && py <= max_y + 1e-9);
        }
    }
}
