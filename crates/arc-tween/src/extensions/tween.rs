// extensions/tween.rs
//
// Transform tween: one configured segment between two captured anchors.
// The host owns time and the transform; this only turns (t, duration) into values.
//
// Usage:
//   let mut tween = TransformTween::new(TweenConfig::default().with_height_arc(2.0));
//   tween.prepare_segment(AnchorPair::new(start, end));   // once per segment
//   let sample = tween.evaluate(t, duration);             // every frame
//   for pending in tween.drain_issues() { ... }

use std::collections::{HashMap, VecDeque};

use glam::{Quat, Vec3};

use crate::api::anchors::{AnchorPair, TweenSample};
use crate::api::config::TweenConfig;
use crate::api::issue::TweenIssue;

/// Distinct issues held between drains. The oldest is dropped to make room.
pub const MAX_PENDING_ISSUES: usize = 32;

/// An issue waiting to be drained, with how many evaluations raised it.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingIssue {
    pub issue: TweenIssue,
    pub repeats: u32,
}

/// A single transform tween.
#[derive(Debug, Clone, Default)]
pub struct TransformTween {
    config: TweenConfig,
    anchors: Option<AnchorPair>,
    /// Issues raised by `evaluate`, waiting to be drained by the host.
    /// Repeats of an issue already pending only bump its count.
    issues: VecDeque<PendingIssue>,
    /// Issues raised over the tween's lifetime, drained or not.
    raised: u64,
}

impl TransformTween {
    pub fn new(config: TweenConfig) -> Self {
        Self {
            config,
            anchors: None,
            issues: VecDeque::new(),
            raised: 0,
        }
    }

    pub fn config(&self) -> &TweenConfig {
        &self.config
    }

    /// Replace the configuration. Anchors of the current segment are kept.
    pub fn set_config(&mut self, config: TweenConfig) {
        self.config = config;
    }

    /// Anchors of the active segment, if one has been prepared.
    pub fn anchors(&self) -> Option<&AnchorPair> {
        self.anchors.as_ref()
    }

    /// Capture the anchors for a new segment. Must precede `evaluate`.
    pub fn prepare_segment(&mut self, anchors: AnchorPair) {
        self.anchors = Some(anchors);
    }

    /// Eased progress for raw progress `t`. Out-of-range `t` is clamped.
    pub fn eased(&mut self, t: f32) -> f32 {
        let sample = self
            .config
            .easing
            .evaluate(&self.config.custom_curve, t.clamp(0.0, 1.0));
        if let Some(issue) = sample.issue {
            self.report(issue);
        }
        sample.value
    }

    /// Values for progress `t` of a segment lasting `duration` seconds.
    ///
    /// Both channels use the eased progress. Gravity arcs therefore receive
    /// eased time too, which bends their ballistic timing under non-linear easing.
    pub fn evaluate(&mut self, t: f32, duration: f32) -> TweenSample {
        let Some(anchors) = self.anchors else {
            self.report(TweenIssue::NotPrepared);
            return TweenSample::EMPTY;
        };

        let eased = self.eased(t);

        let position = if self.config.tween_position {
            Some(self.position_at(&anchors, eased, duration))
        } else {
            None
        };

        let rotation = if self.config.tween_rotation {
            Some(rotation_at(&anchors, eased))
        } else {
            None
        };

        TweenSample { position, rotation }
    }

    fn position_at(&mut self, anchors: &AnchorPair, t: f32, duration: f32) -> Vec3 {
        let sample = self
            .config
            .path
            .evaluate(anchors, t, duration, self.config.arc_params());
        if let Some(issue) = sample.issue {
            self.report(issue);
        }
        sample.value
    }

    /// Log every occurrence; buffer each distinct issue once.
    fn report(&mut self, issue: TweenIssue) {
        issue.log();
        self.raised += 1;

        if let Some(pending) = self.issues.iter_mut().find(|p| p.issue == issue) {
            pending.repeats = pending.repeats.saturating_add(1);
            return;
        }
        if self.issues.len() == MAX_PENDING_ISSUES {
            self.issues.pop_front();
        }
        self.issues.push_back(PendingIssue { issue, repeats: 1 });
    }

    /// Drain issues raised since the last drain, oldest first.
    pub fn drain_issues(&mut self) -> impl Iterator<Item = PendingIssue> + '_ {
        self.issues.drain(..)
    }

    /// Number of distinct issues waiting to be drained.
    pub fn pending_issues(&self) -> usize {
        self.issues.len()
    }

    /// Total issues raised so far, counting repeats. Never reset by draining.
    pub fn issues_raised(&self) -> u64 {
        self.raised
    }
}

/// Spherical interpolation between the anchor rotations.
#[inline]
pub fn rotation_at(anchors: &AnchorPair, t: f32) -> Quat {
    anchors.start_rotation.slerp(anchors.end_rotation, t)
}

/// Handle to a tween for later reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(pub u32);

/// Owns every live tween of a host, keyed by handle.
#[derive(Debug, Default)]
pub struct TweenSet {
    tweens: HashMap<TweenId, TransformTween>,
    next_id: u32,
}

impl TweenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tween. Returns a handle for later control.
    pub fn add(&mut self, tween: TransformTween) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.insert(id, tween);
        id
    }

    /// Remove a tween by handle.
    pub fn remove(&mut self, id: TweenId) -> bool {
        self.tweens.remove(&id).is_some()
    }

    pub fn get(&self, id: TweenId) -> Option<&TransformTween> {
        self.tweens.get(&id)
    }

    pub fn get_mut(&mut self, id: TweenId) -> Option<&mut TransformTween> {
        self.tweens.get_mut(&id)
    }

    /// Number of live tweens.
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
    }
}
