//! Static mirrors that turn projectiles by a fixed angle
//!
//! A mirror is a slanted strip. A point hits it when it lies inside the
//! mirror's coordinate bands and on the slanted line through the mirror's
//! anchor corner, within a slope tolerance. The bounce is a discrete turn,
//! not a specular reflection.

use glam::Vec2;

/// Allowed deviation from the mirror slope
pub const SLOPE_TOLERANCE: f32 = 0.5;

/// Which way the strip leans (selects the mesh)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lean {
    /// Lower-left to upper-right
    Rising,
    /// Upper-left to lower-right
    Falling,
}

/// A static mirror
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mirror {
    /// Draw position
    pub center: Vec2,
    /// Corner the slope is measured from
    pub anchor: Vec2,
    pub slope: f32,
    pub x_band: (f32, f32),
    pub y_band: (f32, f32),
    /// Angle added to a projectile's heading on a hit (degrees)
    pub turn_deg: f32,
    pub lean: Lean,
}

/// The four mirrors, in hit-test priority order
///
/// Mirrors are referred to by zero-based index into this table: 0 is the
/// lower right mirror, 1 the centre mirror at the origin.
pub const MIRRORS: [Mirror; 4] = [
    Mirror {
        center: Vec2::new(3.0, -2.0),
        anchor: Vec2::new(3.24, -1.7),
        slope: 1.11,
        x_band: (2.7, 3.24),
        y_band: (-2.3, -1.7),
        turn_deg: 96.0,
        lean: Lean::Rising,
    },
    Mirror {
        center: Vec2::new(0.0, 0.0),
        anchor: Vec2::new(0.24, 0.3),
        slope: 1.11,
        x_band: (-0.3, 0.24),
        y_band: (-0.3, 0.3),
        turn_deg: 96.0,
        lean: Lean::Rising,
    },
    Mirror {
        center: Vec2::new(3.0, 3.0),
        anchor: Vec2::new(2.7, 3.3),
        slope: -1.11,
        x_band: (2.7, 3.24),
        y_band: (2.7, 3.3),
        turn_deg: 144.0,
        lean: Lean::Falling,
    },
    Mirror {
        center: Vec2::new(0.0, 3.0),
        anchor: Vec2::new(-0.3, 3.3),
        slope: -1.11,
        x_band: (-0.3, 0.24),
        y_band: (2.7, 3.3),
        turn_deg: 144.0,
        lean: Lean::Falling,
    },
];

impl Mirror {
    /// Whether `point` lies inside both coordinate bands
    pub fn in_bands(&self, point: Vec2) -> bool {
        point.x >= self.x_band.0
            && point.x <= self.x_band.1
            && point.y >= self.y_band.0
            && point.y <= self.y_band.1
    }

    /// Whether a projectile at `point` is deflected by this mirror
    pub fn deflects(&self, point: Vec2) -> bool {
        if !self.in_bands(point) {
            return false;
        }
        let d = point - self.anchor;
        if d.x.abs() <= f32::EPSILON {
            return false;
        }
        let slope = d.y / d.x;
        (slope - self.slope).abs() <= SLOPE_TOLERANCE
    }
}

/// First mirror that deflects `point`, with its zero-based index in `MIRRORS`
pub fn find_deflecting(point: Vec2) -> Option<(usize, &'static Mirror)> {
    MIRRORS.iter().enumerate().find(|(_, m)| m.deflects(point))
}
