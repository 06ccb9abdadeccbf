pub mod api;
pub mod core;
pub mod bridge;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::anchors::{AnchorPair, TransformSnapshot, TweenSample};
pub use api::config::{TweenConfig, ConfigError};
pub use api::issue::{TweenIssue, Severity, Sampled};
pub use core::time::SegmentTime;
pub use bridge::protocol::{SampleRecord, SampleBuffer, PROTOCOL_VERSION};

pub use extensions::{
    KeyCurve, Keyframe, CurveError,
    EasingMode, lerp,
    PathMode, ArcParams,
    TransformTween, TweenSet, TweenId, PendingIssue,
};
