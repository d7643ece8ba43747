//! Pitch geometry and the integer coordinate type.
//!
//! Positions are whole pitch units. Movement is computed in `f32` and rounded
//! once per step, so mirroring across the halfway line (`x' = width - x`)
//! is exact and applying it twice is the identity.

use serde::{Deserialize, Serialize};

/// A point on the pitch in whole pitch units, serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Round a floating point position to the grid.
    #[inline]
    pub fn from_f32(x: f32, y: f32) -> Self {
        debug_assert!(x.is_finite() && y.is_finite(), "non-finite position ({x}, {y})");
        Self { x: x.round() as i32, y: y.round() as i32 }
    }

    #[inline]
    pub fn to_f32(self) -> (f32, f32) {
        (self.x as f32, self.y as f32)
    }

    /// Euclidean distance in pitch units.
    #[inline]
    pub fn distance(self, other: Coord) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// Mirror across the halfway line of a pitch `width` units long.
    #[inline]
    pub fn mirrored(self, width: i32) -> Self {
        Self { x: width - self.x, y: self.y }
    }
}

impl From<[i32; 2]> for Coord {
    fn from(value: [i32; 2]) -> Self {
        Self { x: value[0], y: value[1] }
    }
}

impl From<Coord> for [i32; 2] {
    fn from(value: Coord) -> Self {
        [value.x, value.y]
    }
}

/// Pitch as supplied by the caller's configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchDefinition {
    pub pitch_width: i32,
    pub pitch_height: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_width: Option<i32>,
}

impl PitchDefinition {
    pub fn new(pitch_width: i32, pitch_height: i32) -> Self {
        Self { pitch_width, pitch_height, goal_width: None }
    }

    /// Goal mouth width actually used: the configured one, or a fifth of the
    /// pitch height.
    pub fn effective_goal_width(&self) -> i32 {
        self.goal_width.unwrap_or((self.pitch_height / 5).max(1))
    }

    pub fn to_pitch(&self) -> Pitch {
        Pitch {
            width: self.pitch_width,
            height: self.pitch_height,
            goal_width: self.effective_goal_width(),
        }
    }
}

/// Validated pitch. Goal lines sit at `x = 0` and `x = width`, the goal
/// mouth is centred on `y = height / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pitch {
    pub width: i32,
    pub height: i32,
    pub goal_width: i32,
}

impl Pitch {
    /// Largest accepted width or height. Positions stay exact as `f32` and
    /// shot targets one unit past the goal line still fit in an `i32`.
    pub const MAX_SIDE: i32 = 1_000_000;

    pub fn centre(&self) -> Coord {
        Coord::new(self.width / 2, self.height / 2)
    }

    /// Inclusive y-range of the goal mouth.
    pub fn goal_mouth(&self) -> (f32, f32) {
        let centre_y = self.height as f32 / 2.0;
        let half = self.goal_width as f32 / 2.0;
        (centre_y - half, centre_y + half)
    }

    pub fn in_goal_mouth(&self, y: f32) -> bool {
        let (min, max) = self.goal_mouth();
        y >= min && y <= max
    }

    pub fn contains(&self, pos: Coord) -> bool {
        pos.x >= 0 && pos.x <= self.width && pos.y >= 0 && pos.y <= self.height
    }

    pub fn clamp(&self, pos: Coord) -> Coord {
        Coord::new(pos.x.clamp(0, self.width), pos.y.clamp(0, self.height))
    }

    /// Convert a fraction of the pitch length into pitch units, never less
    /// than one unit.
    pub fn units(&self, fraction: f32) -> f32 {
        (self.width as f32 * fraction).max(1.0)
    }
}
