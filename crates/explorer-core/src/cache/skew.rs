//! Clock-skew estimation between daemon block timestamps and the local wall clock.

use serde::Serialize;

/// Bound on the smoothed skew estimate, in milliseconds.
pub const MAX_SKEW_MS: f64 = 30_000.0;

/// Cap on the sample weight given to the running average.
pub const MAX_SKEW_SAMPLES: u32 = 100;

/// Running weighted average of observed skew samples.
///
/// While the estimate is zero a differing sample is taken as-is. Later samples that differ from
/// the current estimate are blended as `(avg * n + raw) / (n + 1)` with `n` capped at
/// [`MAX_SKEW_SAMPLES`], and the result is clamped to `±MAX_SKEW_MS`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TimestampAdjustment {
    value: f64,
    count: u32,
}

impl TimestampAdjustment {
    #[must_use]
    pub const fn new() -> Self {
        Self { value: 0.0, count: 0 }
    }

    /// Current smoothed estimate in milliseconds.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Folds one raw sample (`block_timestamp - now`, ms) into the estimate and returns it.
    ///
    /// A sample equal to the current estimate leaves both value and count unchanged.
    #[allow(clippy::float_cmp)]
    pub fn observe(&mut self, raw_ms: f64) -> f64 {
        if raw_ms == self.value {
            return self.value;
        }
        if self.value == 0.0 {
            self.value = raw_ms;
        } else {
            let n = f64::from(self.count.min(MAX_SKEW_SAMPLES));
            self.value = (self.value * n + raw_ms) / (n + 1.0);
        }
        self.count = (self.count + 1).min(MAX_SKEW_SAMPLES);
        self.value = self.value.clamp(-MAX_SKEW_MS, MAX_SKEW_MS);
        self.value
    }
}
