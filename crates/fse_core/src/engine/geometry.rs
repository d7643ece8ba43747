//! Geometry helpers shared by ball and player movement.
//!
//! Inputs are `(f32, f32)` pairs; anything that becomes a position goes back
//! through [`Coord::from_f32`] exactly once.

use crate::models::Coord;

#[inline]
pub fn normalize(v: (f32, f32)) -> (f32, f32) {
    let len = (v.0 * v.0 + v.1 * v.1).sqrt();
    if len < 1e-6 {
        (0.0, 0.0)
    } else {
        (v.0 / len, v.1 / len)
    }
}

#[inline]
pub fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    (dx * dx + dy * dy).sqrt()
}

pub fn lerp_position(from: (f32, f32), to: (f32, f32), t: f32) -> (f32, f32) {
    let t = t.clamp(0.0, 1.0);
    (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t)
}

/// Move at most `max_step` units from `from` toward `to`, unrounded.
///
/// Reaches `to` exactly when it is within range. A positive step is never
/// shorter than one unit, so a moving entity always leaves its grid cell.
pub fn seek(from: (f32, f32), to: (f32, f32), max_step: f32) -> (f32, f32) {
    debug_assert!(to.0.is_finite() && to.1.is_finite(), "non-finite target {to:?}");
    if max_step <= 0.0 {
        return from;
    }
    let step = max_step.max(1.0);
    let d = distance(from, to);
    if d <= step {
        return to;
    }
    let dir = normalize((to.0 - from.0, to.1 - from.1));
    (from.0 + dir.0 * step, from.1 + dir.1 * step)
}

/// [`seek`] on the grid.
pub fn step_toward(from: Coord, to: (f32, f32), max_step: f32) -> Coord {
    let (x, y) = seek(from.to_f32(), to, max_step);
    Coord::from_f32(x, y)
}

/// Where the segment `from -> to` meets the vertical line `x = line_x`, as a
/// y value. `None` when the segment does not reach the line.
pub fn crossing_y(from: (f32, f32), to: (f32, f32), line_x: f32) -> Option<f32> {
    let before = from.0 - line_x;
    let after = to.0 - line_x;
    if before * after > 0.0 || (to.0 - from.0).abs() < f32::EPSILON {
        return None;
    }
    let t = (line_x - from.0) / (to.0 - from.0);
    Some(lerp_position(from, to, t).1)
}

/// Shortest distance from `point` to the segment `a -> b`.
pub fn distance_to_segment(point: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let ab = (b.0 - a.0, b.1 - a.1);
    let len_sq = ab.0 * ab.0 + ab.1 * ab.1;
    if len_sq < 1e-6 {
        return distance(point, a);
    }
    let t = ((point.0 - a.0) * ab.0 + (point.1 - a.1) * ab.1) / len_sq;
    distance(point, lerp_position(a, b, t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seek_stops_on_target() {
        assert_eq!(seek((0.0, 0.0), (3.0, 4.0), 10.0), (3.0, 4.0));
        let (x, y) = seek((0.0, 0.0), (30.0, 40.0), 5.0);
        assert!((x - 3.0).abs() < 1e-5 && (y - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_small_step_still_moves() {
        let from = Coord::new(10, 10);
        let next = step_toward(from, (20.0, 10.0), 0.3);
        assert_eq!(next, Coord::new(11, 10));
        let diagonal = step_toward(from, (0.0, 0.0), 0.1);
        assert_ne!(diagonal, from);
    }

    #[test]
    fn test_zero_speed_stays() {
        let from = Coord::new(5, 5);
        assert_eq!(step_toward(from, (50.0, 50.0), 0.0), from);
    }

    #[test]
    fn test_crossing_y() {
        assert_eq!(crossing_y((2.0, 30.0), (-2.0, 34.0), 0.0), Some(32.0));
        assert_eq!(crossing_y((2.0, 30.0), (1.0, 34.0), 0.0), None);
        assert_eq!(crossing_y((98.0, 10.0), (102.0, 10.0), 100.0), Some(10.0));
    }

    #[test]
    fn test_segment_distance() {
        let d = distance_to_segment((5.0, 3.0), (0.0, 0.0), (10.0, 0.0));
        assert!((d - 3.0).abs() < 1e-5);
        let beyond = distance_to_segment((13.0, 4.0), (0.0, 0.0), (10.0, 0.0));
        assert!((beyond - 5.0).abs() < 1e-5);
        let point = distance_to_segment((3.0, 4.0), (0.0, 0.0), (0.0, 0.0));
        assert!((point - 5.0).abs() < 1e-5);
    }
}
