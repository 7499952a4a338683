//! Polygon triangulation for extrusion caps.

use scribble_math::Point2;

/// Twice the signed area of a polygon; positive when counter-clockwise.
pub fn signed_area2(points: &[Point2]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum()
}

/// Ear-clip a simple counter-clockwise polygon.
///
/// Returns triangles as index triples into `points`, each counter-clockwise.
/// If no ear can be found (self-intersecting input), the remainder is fanned
/// from its first vertex.
pub fn ear_clip(points: &[Point2]) -> Vec<[usize; 3]> {
    let mut triangles = Vec::new();
    if points.len() < 3 {
        return triangles;
    }

    let mut remaining: Vec<usize> = (0..points.len()).collect();

    while remaining.len() > 3 {
        let n = remaining.len();
        let mut found_ear = false;

        for i in 0..n {
            let prev = (i + n - 1) % n;
            let next = (i + 1) % n;

            let a = points[remaining[prev]];
            let b = points[remaining[i]];
            let c = points[remaining[next]];

            let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
            if cross <= 0.0 {
                continue;
            }

            let blocked = (0..n)
                .filter(|&j| j != prev && j != i && j != next)
                .map(|j| points[remaining[j]])
                .filter(|&p| p != a && p != b && p != c)
                .any(|p| point_in_triangle(p, a, b, c));
            if blocked {
                continue;
            }

            triangles.push([remaining[prev], remaining[i], remaining[next]]);
            remaining.remove(i);
            found_ear = true;
            break;
        }

        if !found_ear {
            tracing::debug!(left = remaining.len(), "no ear found; fanning remainder");
            for k in 1..remaining.len() - 1 {
                triangles.push([remaining[0], remaining[k], remaining[k + 1]]);
            }
            return triangles;
        }
    }

    triangles.push([remaining[0], remaining[1], remaining[2]]);
    triangles
}

/// Point-in-triangle test using barycentric coordinates.
///
/// Points on an edge count as inside, so a reflex vertex lying on the
/// candidate diagonal blocks the ear.
fn point_in_triangle(p: Point2, a: Point2, b: Point2, c: Point2) -> bool {
    let v0 = c - a;
    let v1 = b - a;
    let v2 = p - a;

    let dot00 = v0.dot(&v0);
    let dot01 = v0.dot(&v1);
    let dot02 = v0.dot(&v2);
    let dot11 = v1.dot(&v1);
    let dot12 = v1.dot(&v2);

    let denom = dot00 * dot11 - dot01 * dot01;
    if denom.abs() < 1e-300 {
        return false;
    }
    let inv_denom = 1.0 / denom;
    let u = (dot11 * dot02 - dot01 * dot12) * inv_denom;
    let v = (dot00 * dot12 - dot01 * dot02) * inv_denom;

    let eps = 1e-10;
    u >= -eps && v >= -eps && (u + v) <= 1.0 + eps
}
