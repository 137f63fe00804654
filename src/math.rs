/// A point in either sampling space or output space. Which one is always clear from context;
/// the two are only ever joined by [`crate::scale::Scale`].
pub type Point = (f64, f64);

pub fn rescale(value: f64, (old_min, old_max): (f64, f64), (new_min, new_max): (f64, f64)) -> f64 {
    let clamped = value.clamp(old_min, old_max);
    let old_spread = old_max - old_min;
    let new_spread = new_max - new_min;
    new_min + (clamped - old_min) * (new_spread / old_spread)
}

/// Computes the Euclidean distance between two points.
pub fn dist((x1, y1): Point, (x2, y2): Point) -> f64 {
    f64::hypot(x2 - x1, y2 - y1)
}

/// Signed area of a simple polygon via the shoelace formula. Positive when the vertices wind
/// counterclockwise in a y-up frame (clockwise on screen).
pub fn signed_area(polygon: &[Point]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for i in 0..n {
        let (x1, y1) = polygon[i];
        let (x2, y2) = polygon[(i + 1) % n];
        twice_area += x1 * y2 - x2 * y1;
    }
    twice_area / 2.0
}

/// The closed rectangle `[x0, x1] x [y0, y1]` as a polygon.
pub fn rectangle((x0, y0): Point, (x1, y1): Point) -> Vec<Point> {
    vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1)]
}

/// Clips a convex polygon to the half-plane of points at least as close to `keep` as to
/// `other` (one Sutherland-Hodgman pass against their perpendicular bisector).
pub fn clip_to_nearer_half(polygon: &[Point], keep: Point, other: Point) -> Vec<Point> {
    let normal = (other.0 - keep.0, other.1 - keep.1);
    let mid = ((keep.0 + other.0) / 2.0, (keep.1 + other.1) / 2.0);
    // <= 0 means inside.
    let side = |(x, y): Point| (x - mid.0) * normal.0 + (y - mid.1) * normal.1;

    let mut clipped = Vec::with_capacity(polygon.len() + 1);
    let n = polygon.len();
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let (sa, sb) = (side(a), side(b));
        if sa <= 0.0 {
            clipped.push(a);
        }
        if (sa < 0.0 && sb > 0.0) || (sa > 0.0 && sb < 0.0) {
            let t = sa / (sa - sb);
            clipped.push((a.0 + t * (b.0 - a.0), a.1 + t * (b.1 - a.1)));
        }
    }
    clipped
}
