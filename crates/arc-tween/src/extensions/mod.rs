// extensions/mod.rs
//
// Evaluators for a single transform tween.
// Curves and paths are pure leaves; `tween` composes them per frame.

pub mod curve;
pub mod easing;
pub mod path;
pub mod tween;

pub use curve::{KeyCurve, Keyframe, CurveError, evaluate_keys};
pub use easing::{EasingMode, lerp, DECELERATION_KEYS, HARMONIC_KEYS};
pub use path::{PathMode, ArcParams, line_position, height_arc_position, gravity_arc_position};
pub use tween::{TransformTween, TweenSet, TweenId, PendingIssue, MAX_PENDING_ISSUES, rotation_at};
