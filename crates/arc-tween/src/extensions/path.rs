// extensions/path.rs
//
// Spatial trajectories between two captured anchors.
// Every mode is a pure function of (anchors, t, duration), safe to re-evaluate
// for the same t any number of times.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::easing::lerp;
use crate::api::anchors::AnchorPair;
use crate::api::issue::{Sampled, TweenIssue};

/// Shape of the trajectory from start to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathMode {
    /// Straight line.
    #[default]
    Line,
    /// Vertical parabola whose peak sits `para_height` above the start.
    ParabolaByHeight,
    /// Ballistic arc under constant downward acceleration `para_gravity`.
    ParabolaByGravity,
}

/// Shape parameters for the parabolic modes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    /// Peak height above the start for `ParabolaByHeight`.
    pub height: f32,
    /// Downward acceleration for `ParabolaByGravity`.
    pub gravity: f32,
}

impl Default for ArcParams {
    fn default() -> Self {
        Self {
            height: 3.0,
            gravity: 10.0,
        }
    }
}

impl PathMode {
    /// Position at progress `t` of a segment lasting `duration` seconds.
    pub fn evaluate(
        self,
        anchors: &AnchorPair,
        t: f32,
        duration: f32,
        params: ArcParams,
    ) -> Sampled<Vec3> {
        match self {
            PathMode::Line => Sampled::ok(line_position(anchors, t)),
            PathMode::ParabolaByHeight => height_arc_position(anchors, t, params.height),
            PathMode::ParabolaByGravity => gravity_arc_position(anchors, t, duration, params.gravity),
        }
    }
}

/// `start + t * (end - start)`.
#[inline]
pub fn line_position(anchors: &AnchorPair, t: f32) -> Vec3 {
    anchors.start_position.lerp(anchors.end_position, t)
}

/// Parabola `y = A·x² + B·x` in the vertical plane through both anchors,
/// with `x` the horizontal distance travelled and its vertex `height` above
/// the start. A < 0, B > 0.
pub fn height_arc_position(anchors: &AnchorPair, t: f32, height: f32) -> Sampled<Vec3> {
    if !(height > 0.0 && height.is_finite()) {
        return Sampled::degraded(
            line_position(anchors, t),
            TweenIssue::InvalidPathParameter { name: "para_height", value: height },
        );
    }

    let rise = anchors.rise();
    if rise > height {
        return Sampled::degraded(
            line_position(anchors, t),
            TweenIssue::ParabolaTooLow { rise, height },
        );
    }

    let w = anchors.horizontal_distance();
    if w <= f32::EPSILON {
        // Purely vertical move: nothing to bend.
        return Sampled::ok(line_position(anchors, t));
    }

    let b = (1.0 + (1.0 - rise / height).sqrt()) / (w / (2.0 * height));
    let a = -b * b / (4.0 * height);

    let x = t * w;
    let y = a * x * x + b * x;

    let start = anchors.start_position;
    let end = anchors.end_position;
    Sampled::ok(Vec3::new(
        lerp(start.x, end.x, t),
        start.y + y,
        lerp(start.z, end.z, t),
    ))
}

/// Projectile launched so that it lands on the end anchor exactly at `t = 1`.
/// Horizontal motion follows `t` linearly; height follows `s = v·t - ½·g·t²`.
pub fn gravity_arc_position(
    anchors: &AnchorPair,
    t: f32,
    duration: f32,
    gravity: f32,
) -> Sampled<Vec3> {
    if !(duration > 0.0 && duration.is_finite()) {
        return Sampled::degraded(
            line_position(anchors, t),
            TweenIssue::InvalidPathParameter { name: "duration", value: duration },
        );
    }
    if !(gravity > 0.0 && gravity.is_finite()) {
        return Sampled::degraded(
            line_position(anchors, t),
            TweenIssue::InvalidPathParameter { name: "para_gravity", value: gravity },
        );
    }

    let start = anchors.start_position;
    let end = anchors.end_position;

    let vy = anchors.rise() / duration + 0.5 * gravity * duration;
    let elapsed = t * duration;
    let y = vy * elapsed - 0.5 * gravity * elapsed * elapsed + start.y;

    Sampled::ok(Vec3::new(
        lerp(start.x, end.x, t),
        y,
        lerp(start.z, end.z, t),
    ))
}
