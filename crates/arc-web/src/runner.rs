use arc_tween::{
    AnchorPair, ConfigError, PendingIssue, SampleBuffer, SampleRecord, SegmentTime,
    TransformSnapshot, TransformTween, TweenConfig, TweenId, TweenSet,
};

/// Host-side driver for every tween a JS timeline owns.
///
/// The JS side creates tweens from JSON configs, prepares a segment whenever
/// a clip becomes active, and evaluates each active clip once per frame.
/// Results land in a flat buffer read through a pointer, one record per
/// `evaluate` call since the last `begin_frame`.
pub struct TweenRunner {
    tweens: TweenSet,
    samples: SampleBuffer,
}

impl TweenRunner {
    pub fn new() -> Self {
        Self {
            tweens: TweenSet::new(),
            samples: SampleBuffer::with_capacity(16),
        }
    }

    /// Register a tween from its JSON config.
    ///
    /// Only JSON that does not parse is refused. A config that parses but
    /// fails validation is registered anyway and degrades at evaluation time,
    /// reporting through its issues like any other bad frame.
    pub fn create(&mut self, config_json: &str) -> Result<TweenId, ConfigError> {
        let config = TweenConfig::from_json(config_json)?;
        if let Err(err) = config.validate() {
            log::warn!("tween_create: {}", err);
        }
        Ok(self.tweens.add(TransformTween::new(config)))
    }

    pub fn destroy(&mut self, id: TweenId) -> bool {
        self.tweens.remove(id)
    }

    /// Capture anchors for the segment that just became active.
    /// Without an explicit `start`, the object's `current` transform is used.
    pub fn prepare(
        &mut self,
        id: TweenId,
        start: Option<TransformSnapshot>,
        end: TransformSnapshot,
        current: TransformSnapshot,
    ) -> bool {
        match self.tweens.get_mut(id) {
            Some(tween) => {
                tween.prepare_segment(AnchorPair::capture(start, end, current));
                true
            }
            None => {
                log::warn!("prepare: unknown tween {:?}", id);
                false
            }
        }
    }

    /// Start a new frame: drop last frame's records.
    pub fn begin_frame(&mut self) {
        self.samples.clear();
    }

    /// Evaluate one tween and append its record. Returns the record slot.
    pub fn evaluate(&mut self, id: TweenId, t: f32, duration: f32) -> Option<usize> {
        let Some(tween) = self.tweens.get_mut(id) else {
            log::warn!("evaluate: unknown tween {:?}", id);
            return None;
        };
        let before = tween.issues_raised();
        let sample = tween.evaluate(t, duration);
        let had_issue = tween.issues_raised() > before;

        self.samples.push(SampleRecord::pack(&sample, had_issue));
        Some(self.samples.len() - 1)
    }

    /// Evaluate at `local_time` seconds into a clip lasting `duration`.
    pub fn evaluate_at(&mut self, id: TweenId, local_time: f32, duration: f32) -> Option<usize> {
        let time = SegmentTime::new(local_time, duration);
        self.evaluate(id, time.progress(), time.duration)
    }

    /// Take the issues a tween has raised since the last call.
    pub fn drain_issues(&mut self, id: TweenId) -> Vec<PendingIssue> {
        self.tweens
            .get_mut(id)
            .map(|t| t.drain_issues().collect())
            .unwrap_or_default()
    }

    pub fn record(&self, slot: usize) -> Option<&SampleRecord> {
        self.samples.records().get(slot)
    }

    // ---- Pointer accessors for direct memory reads ----

    pub fn samples_ptr(&self) -> *const f32 {
        self.samples.ptr()
    }

    pub fn sample_count(&self) -> u32 {
        self.samples.len() as u32
    }

    pub fn tween_count(&self) -> u32 {
        self.tweens.len() as u32
    }
}

impl Default for TweenRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arc_tween::TweenIssue;
    use glam::{Quat, Vec3};

    fn prepare(runner: &mut TweenRunner, id: TweenId, start: Vec3, end: Vec3) -> bool {
        let start = TransformSnapshot::at(start);
        runner.prepare(id, Some(start), TransformSnapshot::at(end), start)
    }

    fn issues(runner: &mut TweenRunner, id: TweenId) -> Vec<TweenIssue> {
        runner.drain_issues(id).into_iter().map(|p| p.issue).collect()
    }

    #[test]
    fn create_prepare_evaluate() {
        let mut runner = TweenRunner::new();
        let id = runner.create(r#"{ "path": "parabola_by_height", "para_height": 2.0 }"#).unwrap();

        assert!(prepare(&mut runner, id, Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0)));

        runner.begin_frame();
        let slot = runner.evaluate(id, 0.5, 1.0).unwrap();
        let record = runner.record(slot).unwrap();
        let p = record.position().unwrap();
        assert!((p.x - 2.0).abs() < 1e-4);
        assert!((p.y - 2.0).abs() < 1e-4);
        assert!(!record.had_issue());
        assert_eq!(runner.sample_count(), 1);
    }

    #[test]
    fn begin_frame_resets_slots() {
        let mut runner = TweenRunner::new();
        let id = runner.create("{}").unwrap();
        prepare(&mut runner, id, Vec3::ZERO, Vec3::ZERO);

        runner.begin_frame();
        runner.evaluate(id, 0.1, 1.0);
        runner.evaluate(id, 0.2, 1.0);
        assert_eq!(runner.sample_count(), 2);

        runner.begin_frame();
        assert_eq!(runner.evaluate(id, 0.3, 1.0), Some(0));
    }

    #[test]
    fn issues_are_flagged_and_drained() {
        let mut runner = TweenRunner::new();
        let id = runner.create("{}").unwrap();

        runner.begin_frame();
        let slot = runner.evaluate(id, 0.5, 1.0).unwrap();
        assert!(runner.record(slot).unwrap().had_issue());
        assert_eq!(issues(&mut runner, id), vec![TweenIssue::NotPrepared]);
        assert!(runner.drain_issues(id).is_empty());
    }

    #[test]
    fn repeated_issue_flags_every_frame() {
        let mut runner = TweenRunner::new();
        let id = runner.create(r#"{ "path": "parabola_by_height", "para_height": 3.0 }"#).unwrap();
        prepare(&mut runner, id, Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0));

        for frame in 0..3 {
            runner.begin_frame();
            let slot = runner.evaluate(id, frame as f32 / 3.0, 1.0).unwrap();
            assert!(runner.record(slot).unwrap().had_issue(), "frame {frame}");
        }
        let drained = runner.drain_issues(id);
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].repeats, 3);
    }

    #[test]
    fn unnormalised_curve_still_plays() {
        let mut runner = TweenRunner::new();
        let id = runner
            .create(r#"{"easing":"custom","custom_curve":[{"time":0.0,"value":0.1},{"time":1.0,"value":1.0}]}"#)
            .unwrap();
        assert_eq!(runner.tween_count(), 1);
        prepare(&mut runner, id, Vec3::new(1.0, 2.0, 3.0), Vec3::new(9.0, 2.0, 3.0));

        runner.begin_frame();
        let slot = runner.evaluate(id, 0.6, 1.0).unwrap();
        let record = runner.record(slot).unwrap();
        assert_eq!(record.position(), Some(Vec3::new(1.0, 2.0, 3.0)));
        assert!(record.had_issue());

        let raised = issues(&mut runner, id);
        assert_eq!(raised.len(), 1);
        assert!(matches!(raised[0], TweenIssue::CurveNotNormalised { .. }));
    }

    #[test]
    fn non_positive_parameter_still_plays() {
        let mut runner = TweenRunner::new();
        let id = runner
            .create(r#"{ "path": "parabola_by_gravity", "para_gravity": -1 }"#)
            .unwrap();
        prepare(&mut runner, id, Vec3::ZERO, Vec3::new(8.0, 0.0, 0.0));

        runner.begin_frame();
        let slot = runner.evaluate(id, 0.5, 1.0).unwrap();
        let p = runner.record(slot).unwrap().position().unwrap();
        assert!((p - Vec3::new(4.0, 0.0, 0.0)).abs().max_element() < 1e-4);
        let raised = issues(&mut runner, id);
        assert!(matches!(
            raised.as_slice(),
            [TweenIssue::InvalidPathParameter { name: "para_gravity", .. }]
        ));
    }

    #[test]
    fn malformed_json_is_refused() {
        let mut runner = TweenRunner::new();
        assert!(matches!(runner.create("{ not json"), Err(ConfigError::Json(_))));
        assert!(matches!(
            runner.create(r#"{ "easing": "bouncy" }"#),
            Err(ConfigError::Json(_))
        ));
        assert_eq!(runner.tween_count(), 0);
    }

    #[test]
    fn missing_start_uses_current_transform() {
        let mut runner = TweenRunner::new();
        let id = runner.create("{}").unwrap();
        let current = TransformSnapshot::new(Vec3::new(-2.0, 1.0, 0.0), Quat::IDENTITY);
        let end = TransformSnapshot::new(
            Vec3::new(2.0, 1.0, 0.0),
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        );
        assert!(runner.prepare(id, None, end, current));

        runner.begin_frame();
        let slot = runner.evaluate(id, 0.0, 1.0).unwrap();
        assert_eq!(runner.record(slot).unwrap().position(), Some(current.position));

        let explicit = TransformSnapshot::at(Vec3::new(10.0, 0.0, 0.0));
        assert!(runner.prepare(id, Some(explicit), end, current));
        let slot = runner.evaluate(id, 0.0, 1.0).unwrap();
        assert_eq!(runner.record(slot).unwrap().position(), Some(explicit.position));
    }

    #[test]
    fn local_time_is_normalised_by_duration() {
        let mut runner = TweenRunner::new();
        let id = runner.create("{}").unwrap();
        prepare(&mut runner, id, Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0));

        runner.begin_frame();
        let slot = runner.evaluate_at(id, 0.5, 2.0).unwrap();
        let p = runner.record(slot).unwrap().position().unwrap();
        assert!((p.x - 2.5).abs() < 1e-4);

        let slot = runner.evaluate_at(id, 5.0, 2.0).unwrap();
        let p = runner.record(slot).unwrap().position().unwrap();
        assert!((p.x - 10.0).abs() < 1e-4);

        let slot = runner.evaluate_at(id, 0.0, 0.0).unwrap();
        let p = runner.record(slot).unwrap().position().unwrap();
        assert!((p.x - 10.0).abs() < 1e-4);

        assert_eq!(runner.evaluate_at(TweenId(99), 0.5, 1.0), None);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut runner = TweenRunner::new();
        assert_eq!(runner.evaluate(TweenId(99), 0.5, 1.0), None);
        assert!(!prepare(&mut runner, TweenId(99), Vec3::ZERO, Vec3::ONE));
        assert!(!runner.destroy(TweenId(99)));
    }
}
