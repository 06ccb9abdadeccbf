use thiserror::Error;

/// How loudly an issue should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Output degraded to a sensible fallback.
    Warning,
    /// Output is a placeholder and should not be trusted.
    Error,
}

/// A non-fatal problem found while evaluating a tween.
///
/// Evaluation never aborts: every issue comes paired with a fallback value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TweenIssue {
    /// Custom easing curve does not run from (0,0) to (1,1). Eased value is 0.
    #[error(
        "custom curve is not normalised: must start at 0,0 and end at 1,1 (first {first:?}, last {last:?})"
    )]
    CurveNotNormalised {
        first: Option<(f32, f32)>,
        last: Option<(f32, f32)>,
    },
    /// Target rises higher than the arc may reach. Position falls back to a line.
    #[error("parabola height {height} is below the rise to the target ({rise}), using a straight line")]
    ParabolaTooLow { rise: f32, height: f32 },
    /// A path parameter is out of range. Position falls back to a line.
    #[error("{name} must be positive and finite, got {value}; using a straight line")]
    InvalidPathParameter { name: &'static str, value: f32 },
    /// `evaluate` was called before any segment was prepared.
    #[error("tween evaluated before a segment was prepared")]
    NotPrepared,
}

impl TweenIssue {
    pub fn severity(&self) -> Severity {
        match self {
            TweenIssue::CurveNotNormalised { .. } => Severity::Error,
            TweenIssue::ParabolaTooLow { .. }
            | TweenIssue::InvalidPathParameter { .. }
            | TweenIssue::NotPrepared => Severity::Warning,
        }
    }

    /// Emit this issue through the `log` facade at its severity.
    pub fn log(&self) {
        match self.severity() {
            Severity::Warning => log::warn!("{}", self),
            Severity::Error => log::error!("{}", self),
        }
    }
}

/// A value paired with the issue (if any) that shaped it.
#[derive(Debug, Clone, PartialEq)]
pub struct Sampled<T> {
    pub value: T,
    pub issue: Option<TweenIssue>,
}

impl<T> Sampled<T> {
    pub fn ok(value: T) -> Self {
        Self { value, issue: None }
    }

    pub fn degraded(value: T, issue: TweenIssue) -> Self {
        Self { value, issue: Some(issue) }
    }

    pub fn is_degraded(&self) -> bool {
        self.issue.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities() {
        let curve = TweenIssue::CurveNotNormalised { first: Some((0.0, 0.1)), last: Some((1.0, 1.0)) };
        assert_eq!(curve.severity(), Severity::Error);
        assert_eq!(TweenIssue::ParabolaTooLow { rise: 5.0, height: 3.0 }.severity(), Severity::Warning);
        assert_eq!(TweenIssue::NotPrepared.severity(), Severity::Warning);
    }

    #[test]
    fn messages_name_the_numbers() {
        let msg = TweenIssue::ParabolaTooLow { rise: 5.0, height: 3.0 }.to_string();
        assert!(msg.contains('5') && msg.contains('3'), "{msg}");
    }
}
