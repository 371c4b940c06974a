//! Fundamental geometric and timing types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Milliseconds on the engine clock. Only differences are meaningful.
pub type Millis = u64;

/// Stable identifier of an entity in the world snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// 3D position in world space (blocks).
/// x = East, y = Up, z = South.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Orientation of an entity's view.
///
/// `yaw` is in radians with 0 looking toward -z (North) and positive yaw
/// turning toward -x (West), matching the game's view convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Facing {
    pub yaw: f64,
    pub pitch: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_vec(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    pub fn from_vec(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.to_vec().distance(other.to_vec())
    }

    /// Distance on the horizontal (x/z) plane.
    pub fn horizontal_distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }

    pub fn offset(&self, dx: f64, dy: f64, dz: f64) -> Position {
        Position::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Yaw that would make an observer at `self` look toward `other`.
    pub fn yaw_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (-dx).atan2(-dz)
    }

    /// Point `distance` blocks from `self`, directed away from `threat` on the
    /// horizontal plane. Coincident points flee toward +x.
    pub fn away_from(&self, threat: &Position, distance: f64) -> Position {
        let dir = glam::DVec2::new(self.x - threat.x, self.z - threat.z);
        let dir = dir.try_normalize().unwrap_or(glam::DVec2::X);
        self.offset(dir.x * distance, 0.0, dir.y * distance)
    }
}

impl Facing {
    pub fn new(yaw: f64, pitch: f64) -> Self {
        Self { yaw, pitch }
    }

    /// Unit vector on the horizontal plane the observer is looking along.
    pub fn forward(&self) -> DVec3 {
        DVec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Signed angle from this facing to a bearing yaw, wrapped to (-PI, PI].
    /// Positive values are to the observer's left.
    pub fn relative_angle(&self, bearing_yaw: f64) -> f64 {
        wrap_angle(bearing_yaw - self.yaw)
    }
}

/// Wrap an angle in radians into (-PI, PI].
pub fn wrap_angle(angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    let mut a = angle.rem_euclid(TAU);
    if a > PI {
        a -= TAU;
    }
    a
}
