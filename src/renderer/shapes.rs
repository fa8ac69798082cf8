//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::Vertex;

/// Single triangle
pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 3]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Quad from four corners in winding order, as triangles (a, b, c) and (c, d, a)
pub fn quad(corners: [Vec2; 4], color: [f32; 3]) -> Vec<Vertex> {
    let [a, b, c, d] = corners;

    let mut vertices = Vec::with_capacity(6);
    vertices.extend(triangle(a, b, c, color));
    vertices.extend(triangle(c, d, a, color));
    vertices
}

/// Axis-aligned rectangle centred on the origin
pub fn rect(half_width: f32, half_height: f32, color: [f32; 3]) -> Vec<Vertex> {
    quad(
        [
            Vec2::new(-half_width, -half_height),
            Vec2::new(half_width, -half_height),
            Vec2::new(half_width, half_height),
            Vec2::new(-half_width, half_height),
        ],
        color,
    )
}

/// Slanted strip centred on the origin
///
/// The bottom edge runs from `bottom.0` to `bottom.1` at `-half_height`, the
/// top edge from `top.0` to `top.1` at `+half_height`.
pub fn strip(half_height: f32, bottom: (f32, f32), top: (f32, f32), color: [f32; 3]) -> Vec<Vertex> {
    quad(
        [
            Vec2::new(bottom.1, -half_height),
            Vec2::new(top.1, half_height),
            Vec2::new(top.0, half_height),
            Vec2::new(bottom.0, -half_height),
        ],
        color,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_corners() {
        let v = rect(0.5, 0.6, [1.0, 0.0, 0.0]);
        assert_eq!(v.len(), 6);
        assert_eq!(v[0].position, [-0.5, -0.6, 0.0]);
        assert_eq!(v[2].position, [0.5, 0.6, 0.0]);
        assert_eq!(v[4].position, [-0.5, 0.6, 0.0]);
        assert_eq!(v[5], v[0]);
    }

    #[test]
    fn test_strip_shares_diagonal() {
        let v = strip(0.3, (-0.3, -0.24), (0.24, 0.3), [0.0; 3]);
        assert_eq!(v[2], v[3]);
        assert_eq!(v[0], v[5]);
        assert_eq!(v[1].position, [0.3, 0.3, 0.0]);
        assert_eq!(v[4].position, [-0.3, -0.3, 0.0]);
    }
}
