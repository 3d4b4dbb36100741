//! Linear value scale and "nice" tick generation.

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Linear map from the value domain `[min, max]` onto `[0, 1]`.
///
/// With `segments == 0` the scale is continuous; otherwise the domain is also
/// split into `segments` equal buckets addressable through [`Scale::segment_of`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    min: f64,
    max: f64,
    segments: usize,
}

impl Scale {
    pub fn linear(min: f64, max: f64, segments: usize) -> Self {
        Self { min, max, segments }
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn segments(&self) -> usize {
        self.segments
    }

    pub fn is_continuous(&self) -> bool {
        self.segments == 0
    }

    /// Normalized position of `value`; not clamped, so values outside the
    /// domain land outside `[0, 1]`.
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }

    /// Inverse of [`Scale::normalize`].
    pub fn invert(&self, position: f64) -> f64 {
        self.min + position * (self.max - self.min)
    }

    /// Index of the equal-width segment containing `value`, or `None` for a
    /// continuous scale or a NaN domain. Values are clamped to the domain first.
    pub fn segment_of(&self, value: f64) -> Option<usize> {
        if self.is_continuous() {
            return None;
        }
        let (lo, hi) = (self.min.min(self.max), self.min.max(self.max));
        if !(lo <= hi) {
            return None;
        }
        let position = self.normalize(value.clamp(lo, hi));
        let index = (position * self.segments as f64).floor() as usize;
        Some(index.min(self.segments - 1))
    }

    /// Roughly `count` evenly spaced round values inside the domain, stepping
    /// by 1, 2 or 5 times a power of ten.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.min, self.max, count as f64)
    }
}

/// Builds the scale for a gauge domain.
pub fn calculate_scale(min: f64, max: f64, segments: usize) -> Scale {
    Scale::linear(min, max, segments)
}

/// Label values along the scale: none without segments, just the endpoints
/// for a single segment, otherwise nice ticks.
pub fn calculate_ticks(scale: &Scale, segments: usize) -> Vec<f64> {
    match segments {
        0 => Vec::new(),
        1 => {
            let (min, max) = scale.domain();
            vec![min, max]
        }
        n => scale.ticks(n),
    }
}

fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        // Work with the reciprocal step to keep tick values exact.
        let reciprocal = 10f64.powf(-power) / factor;
        i1 = (start * reciprocal).round();
        i2 = (stop * reciprocal).round();
        if i1 / reciprocal < start {
            i1 += 1.0;
        }
        if i2 / reciprocal > stop {
            i2 -= 1.0;
        }
        inc = -reciprocal;
    } else {
        inc = 10f64.powf(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

fn nice_ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };
    if !(i2 >= i1) {
        return Vec::new();
    }

    let n = (i2 - i1) as usize + 1;
    let value = |k: usize| {
        let i = i1 + k as f64;
        if inc < 0.0 {
            i / -inc
        } else {
            i * inc
        }
    };

    if reverse {
        (0..n).rev().map(value).collect()
    } else {
        (0..n).map(value).collect()
    }
}
