// extensions/curve.rs
//
// Keyframed scalar curves: cubic Hermite segments between (time, value) keys,
// each key carrying an incoming and outgoing slope.
//
// Usage:
//   let curve = KeyCurve::ease_in_out(0.0, 0.0, 1.0, 1.0);
//   let v = curve.evaluate(0.25);

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single key on a curve.
///
/// Tangents are slopes (value units per time unit). An infinite tangent on
/// either side of a segment makes that segment stepped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
    #[serde(default)]
    pub in_tangent: f32,
    #[serde(default)]
    pub out_tangent: f32,
}

impl Keyframe {
    pub const fn new(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
        Self { time, value, in_tangent, out_tangent }
    }

    /// A key with flat tangents on both sides.
    pub const fn flat(time: f32, value: f32) -> Self {
        Self::new(time, value, 0.0, 0.0)
    }
}

/// Reasons a set of keys cannot form a curve.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    #[error("curve has no keys")]
    Empty,
    #[error("key {index} has a non-finite time or value ({time}, {value})")]
    NonFiniteKey { index: usize, time: f32, value: f32 },
}

/// Owned, time-sorted keyframe curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct KeyCurve {
    keys: Vec<Keyframe>,
}

impl KeyCurve {
    /// Build a curve from keys in any order. Keys are sorted by time.
    pub fn new(mut keys: Vec<Keyframe>) -> Result<Self, CurveError> {
        if keys.is_empty() {
            return Err(CurveError::Empty);
        }
        for (index, k) in keys.iter().enumerate() {
            if !k.time.is_finite() || !k.value.is_finite() {
                return Err(CurveError::NonFiniteKey { index, time: k.time, value: k.value });
            }
        }
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Ok(Self { keys })
    }

    /// Straight line from (t0, v0) to (t1, v1). Every tangent carries the slope.
    pub fn linear(t0: f32, v0: f32, t1: f32, v1: f32) -> Self {
        let slope = if t1 != t0 { (v1 - v0) / (t1 - t0) } else { 0.0 };
        Self {
            keys: vec![
                Keyframe::new(t0, v0, slope, slope),
                Keyframe::new(t1, v1, slope, slope),
            ],
        }
    }

    /// S-shaped curve from (t0, v0) to (t1, v1) with flat ends.
    pub fn ease_in_out(t0: f32, v0: f32, t1: f32, v1: f32) -> Self {
        Self {
            keys: vec![Keyframe::flat(t0, v0), Keyframe::flat(t1, v1)],
        }
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn first(&self) -> Option<&Keyframe> {
        self.keys.first()
    }

    pub fn last(&self) -> Option<&Keyframe> {
        self.keys.last()
    }

    /// Sample the curve at `time`.
    pub fn evaluate(&self, time: f32) -> f32 {
        evaluate_keys(&self.keys, time)
    }

    /// True when the curve starts at (0, 0) and ends at (1, 1).
    pub fn is_normalised(&self) -> bool {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => {
                approx_eq(first.time, 0.0)
                    && approx_eq(first.value, 0.0)
                    && approx_eq(last.time, 1.0)
                    && approx_eq(last.value, 1.0)
            }
            _ => false,
        }
    }
}

impl Default for KeyCurve {
    fn default() -> Self {
        Self::linear(0.0, 0.0, 1.0, 1.0)
    }
}

impl TryFrom<Vec<Keyframe>> for KeyCurve {
    type Error = CurveError;

    fn try_from(keys: Vec<Keyframe>) -> Result<Self, Self::Error> {
        Self::new(keys)
    }
}

impl From<KeyCurve> for Vec<Keyframe> {
    fn from(curve: KeyCurve) -> Self {
        curve.keys
    }
}

/// Sample a time-sorted key slice at `time`.
///
/// Outside the key range the nearest end value is held. An empty slice yields 0.
pub fn evaluate_keys(keys: &[Keyframe], time: f32) -> f32 {
    let (Some(first), Some(last)) = (keys.first(), keys.last()) else {
        return 0.0;
    };
    if time <= first.time {
        return first.value;
    }
    if time >= last.time {
        return last.value;
    }

    // first.time < time < last.time, so 1 <= idx < keys.len()
    let idx = keys.partition_point(|k| k.time <= time);
    hermite(&keys[idx - 1], &keys[idx], time)
}

#[inline]
fn hermite(k0: &Keyframe, k1: &Keyframe, time: f32) -> f32 {
    let span = k1.time - k0.time;
    if span <= 0.0 {
        return k1.value;
    }
    if !k0.out_tangent.is_finite() || !k1.in_tangent.is_finite() {
        return k0.value;
    }

    let u = (time - k0.time) / span;
    let u2 = u * u;
    let u3 = u2 * u;

    let m0 = k0.out_tangent * span;
    let m1 = k1.in_tangent * span;

    let h00 = 2.0 * u3 - 3.0 * u2 + 1.0;
    let h10 = u3 - 2.0 * u2 + u;
    let h01 = -2.0 * u3 + 3.0 * u2;
    let h11 = u3 - u2;

    h00 * k0.value + h10 * m0 + h01 * k1.value + h11 * m1
}

/// Loose float equality: relative tolerance of 1e-6 for large magnitudes,
/// absolute floor of `8 * f32::EPSILON` (about 9.5e-7) near zero.
///
/// The floor is looser than Unity's `Mathf.Approximately`, whose floor is the
/// smallest positive float, so keys authored as 0 that drift by a few 1e-7
/// through serialization still count as 0.
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (b - a).abs() < (1e-6 * a.abs().max(b.abs())).max(f32::EPSILON * 8.0)
}
