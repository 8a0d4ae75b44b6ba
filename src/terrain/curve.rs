//! Height response curves applied before meshing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    #[error("Curve key ({0}, {1}) is not finite")]
    NonFiniteKey(f32, f32),
}

/// A single curve key: output `value` at input `time`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
}

impl CurveKey {
    pub const fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// Piecewise-linear mapping from height to height.
///
/// Inputs outside the key range are clamped to the first/last key. An
/// empty curve is the identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CurveKey>", into = "Vec<CurveKey>")]
pub struct HeightCurve {
    keys: Vec<CurveKey>,
}

impl HeightCurve {
    /// Builds a curve from keys in any order.
    pub fn new(mut keys: Vec<CurveKey>) -> Result<Self, CurveError> {
        if let Some(bad) = keys.iter().find(|k| !k.time.is_finite() || !k.value.is_finite()) {
            return Err(CurveError::NonFiniteKey(bad.time, bad.value));
        }
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Ok(Self { keys })
    }

    /// The identity curve over [0, 1].
    pub fn linear() -> Self {
        Self {
            keys: vec![CurveKey::new(0.0, 0.0), CurveKey::new(1.0, 1.0)],
        }
    }

    /// Flattens low ground and steepens peaks.
    pub fn ease_in() -> Self {
        let keys = (0..=8)
            .map(|i| {
                let t = i as f32 / 8.0;
                CurveKey::new(t, t * t)
            })
            .collect();
        Self { keys }
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    pub fn is_identity(&self) -> bool {
        self.keys.is_empty()
    }

    /// Evaluates the curve at `t`.
    pub fn evaluate(&self, t: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return t,
        };
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // First key strictly after t; the clamps above guarantee 1..len.
        let upper = self.keys.partition_point(|k| k.time <= t);
        let a = self.keys[upper - 1];
        let b = self.keys[upper];
        let span = b.time - a.time;
        if span <= 0.0 {
            return b.value;
        }
        let s = (t - a.time) / span;
        a.value + (b.value - a.value) * s
    }
}

impl TryFrom<Vec<CurveKey>> for HeightCurve {
    type Error = CurveError;

    fn try_from(keys: Vec<CurveKey>) -> Result<Self, Self::Error> {
        Self::new(keys)
    }
}

impl From<HeightCurve> for Vec<CurveKey> {
    fn from(curve: HeightCurve) -> Self {
        curve.keys
    }
}
