// extensions/easing.rs
//
// Progress shaping. Maps raw progress t in [0, 1] to eased progress.
// No dependencies on anchors or paths, just curves.

use std::f32::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use super::curve::{evaluate_keys, KeyCurve, Keyframe};
use crate::api::issue::{Sampled, TweenIssue};

/// Leaves (0,0) with a right-angle tangent, lands flat on (1,1).
pub static DECELERATION_KEYS: [Keyframe; 2] = [
    Keyframe::new(0.0, 0.0, -FRAC_PI_2, FRAC_PI_2),
    Keyframe::flat(1.0, 1.0),
];

/// Flat at both ends.
pub static HARMONIC_KEYS: [Keyframe; 2] = [Keyframe::flat(0.0, 0.0), Keyframe::flat(1.0, 1.0)];

/// How progress is shaped before it reaches the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingMode {
    /// Constant velocity.
    #[default]
    Linear,
    /// Fast start, slow end.
    Deceleration,
    /// Slow start and end, fastest in the middle.
    Harmonic,
    /// User-supplied curve from (0,0) to (1,1).
    Custom,
}

impl EasingMode {
    /// Eased progress, or the reason the custom curve was refused.
    pub fn try_evaluate(self, custom: &KeyCurve, t: f32) -> Result<f32, TweenIssue> {
        match self {
            EasingMode::Linear => Ok(t.clamp(0.0, 1.0)),
            EasingMode::Deceleration => Ok(evaluate_keys(&DECELERATION_KEYS, t)),
            EasingMode::Harmonic => Ok(evaluate_keys(&HARMONIC_KEYS, t)),
            EasingMode::Custom => {
                if !custom.is_normalised() {
                    return Err(TweenIssue::CurveNotNormalised {
                        first: custom.first().map(|k| (k.time, k.value)),
                        last: custom.last().map(|k| (k.time, k.value)),
                    });
                }
                Ok(custom.evaluate(t))
            }
        }
    }

    /// Eased progress. A rejected custom curve yields 0 plus the issue.
    pub fn evaluate(self, custom: &KeyCurve, t: f32) -> Sampled<f32> {
        match self.try_evaluate(custom, t) {
            Ok(v) => Sampled::ok(v),
            Err(issue) => Sampled::degraded(0.0, issue),
        }
    }
}

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
