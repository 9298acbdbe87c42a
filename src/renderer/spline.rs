//! Catmull-Rom trail smoothing
//!
//! Converts the recorded path into a chain of cubic Bézier segments that the
//! canvas can stroke directly with `bezierCurveTo`.

use glam::Vec2;

/// One cubic segment; its start is the previous segment's end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierSegment {
    pub c1: Vec2,
    pub c2: Vec2,
    pub end: Vec2,
}

impl BezierSegment {
    /// Point at `t` in [0, 1], given the segment's start point
    pub fn point_at(&self, start: Vec2, t: f32) -> Vec2 {
        let u = 1.0 - t;
        start * (u * u * u)
            + self.c1 * (3.0 * u * u * t)
            + self.c2 * (3.0 * u * t * t)
            + self.end * (t * t * t)
    }
}

/// A continuous stroke through every input point
#[derive(Debug, Clone, PartialEq)]
pub struct TrailCurve {
    pub start: Vec2,
    pub segments: Vec<BezierSegment>,
}

/// Build the Bézier chain for `points`.
///
/// Endpoints reuse themselves as the missing neighbour. Returns `None` for
/// fewer than two points.
pub fn catmull_rom(points: &[Vec2], tension: f32) -> Option<TrailCurve> {
    if points.len() < 2 {
        return None;
    }

    let last = points.len() - 1;
    let segments = (0..last)
        .map(|i| {
            let p0 = points[i.saturating_sub(1)];
            let p1 = points[i];
            let p2 = points[i + 1];
            let p3 = points[(i + 2).min(last)];

            BezierSegment {
                c1: p1 + (p2 - p0) / 6.0 * tension,
                c2: p2 - (p3 - p1) / 6.0 * tension,
                end: p2,
            }
        })
        .collect();

    Some(TrailCurve {
        start: points[0],
        segments,
    })
}
