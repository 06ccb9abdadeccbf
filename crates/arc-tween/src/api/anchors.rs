use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position and orientation read from a host transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformSnapshot {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for TransformSnapshot {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl TransformSnapshot {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn at(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }
}

/// Start and end transforms of one tween segment.
///
/// Captured once when the segment becomes active and left untouched until the
/// next segment replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnchorPair {
    pub start_position: Vec3,
    pub start_rotation: Quat,
    pub end_position: Vec3,
    pub end_rotation: Quat,
}

impl AnchorPair {
    pub fn new(start: TransformSnapshot, end: TransformSnapshot) -> Self {
        Self {
            start_position: start.position,
            start_rotation: start.rotation,
            end_position: end.position,
            end_rotation: end.rotation,
        }
    }

    /// Anchors for a segment whose start location may be unset.
    /// Without one, the moving object's `current` transform is the start.
    pub fn capture(
        start: Option<TransformSnapshot>,
        end: TransformSnapshot,
        current: TransformSnapshot,
    ) -> Self {
        Self::new(start.unwrap_or(current), end)
    }

    /// Vertical rise from start to end (negative when descending).
    #[inline]
    pub fn rise(&self) -> f32 {
        self.end_position.y - self.start_position.y
    }

    /// Distance between start and end in the horizontal (XZ) plane.
    #[inline]
    pub fn horizontal_distance(&self) -> f32 {
        let d = self.end_position - self.start_position;
        (d.x * d.x + d.z * d.z).sqrt()
    }
}

/// Values computed for one frame. `None` channels are left alone by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TweenSample {
    pub position: Option<Vec3>,
    pub rotation: Option<Quat>,
}

impl TweenSample {
    pub const EMPTY: Self = Self {
        position: None,
        rotation: None,
    };
}
