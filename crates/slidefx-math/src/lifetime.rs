//! Lifespan-normalized particle time
//!
//! Every particle carries a `LifeSpan` attribute: the global `Percent`
//! at which it appears and how much of the global timeline it lives for.
//! Programs convert the global percent into the particle's own `[0, 1]`
//! progress before driving any envelope.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Durations smaller than this are treated as already finished
pub const MIN_DURATION: f32 = 1e-6;

/// `(start, duration)` window of a particle on the global timeline
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LifeSpan {
    /// Global percent at which the particle is born
    pub start: f32,
    /// Length of the particle's life in global percent units
    pub duration: f32,
}

impl LifeSpan {
    pub const fn new(start: f32, duration: f32) -> Self {
        Self { start, duration }
    }

    /// A lifespan covering the whole timeline
    pub const FULL: Self = Self::new(0.0, 1.0);

    /// Unclamped progress, `(percent - start) / duration`
    ///
    /// A zero, sub-epsilon or non-finite duration returns `1.0`, so a
    /// degenerate particle reads as fully elapsed instead of NaN.
    pub fn raw_percent(&self, percent: f32) -> f32 {
        if !self.duration.is_finite() || self.duration.abs() < MIN_DURATION {
            return 1.0;
        }
        (percent - self.start) / self.duration
    }

    /// Progress clamped to `[0, 1]`
    pub fn real_percent(&self, percent: f32) -> f32 {
        self.raw_percent(percent).clamp(0.0, 1.0)
    }

    /// Where `percent` falls relative to this lifespan
    pub fn classify(&self, percent: f32) -> Lifetime {
        Lifetime::of(self.raw_percent(percent))
    }

    /// Global percent at which the particle dies
    pub fn end(&self) -> f32 {
        self.start + self.duration
    }
}

impl From<Vec2> for LifeSpan {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<LifeSpan> for Vec2 {
    fn from(l: LifeSpan) -> Self {
        Vec2::new(l.start, l.duration)
    }
}

/// Phase of a particle given its unclamped progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// Not born yet (raw progress below 0)
    Before,
    /// Alive, bounds inclusive
    Active,
    /// Already dead (raw progress above 1)
    After,
}

impl Lifetime {
    pub fn of(raw_percent: f32) -> Self {
        if raw_percent < 0.0 {
            Self::Before
        } else if raw_percent > 1.0 {
            Self::After
        } else {
            Self::Active
        }
    }

    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_percent_inside_span() {
        let span = LifeSpan::new(0.2, 0.4);
        assert_eq!(span.real_percent(0.2), 0.0);
        assert!((span.real_percent(0.4) - 0.5).abs() < 1e-6);
        assert!((span.real_percent(0.6) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_real_percent_clamps_outside_span() {
        let span = LifeSpan::new(0.2, 0.4);
        assert_eq!(span.real_percent(0.0), 0.0);
        assert_eq!(span.real_percent(1.0), 1.0);
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let span = LifeSpan::new(0.1, 0.3);
        for i in -10..=20 {
            let p = i as f32 * 0.1;
            let once = span.real_percent(p);
            assert_eq!(once.clamp(0.0, 1.0), once);
            assert!((0.0..=1.0).contains(&once));
        }
    }

    #[test]
    fn test_zero_duration_is_fully_elapsed() {
        let span = LifeSpan::new(0.5, 0.0);
        assert_eq!(span.raw_percent(0.0), 1.0);
        assert_eq!(span.real_percent(0.9), 1.0);
        assert_eq!(LifeSpan::new(0.5, f32::NAN).real_percent(0.5), 1.0);
    }

    #[test]
    fn test_classify() {
        let span = LifeSpan::new(0.2, 0.3);
        assert_eq!(span.classify(0.1), Lifetime::Before);
        assert_eq!(span.classify(0.2), Lifetime::Active);
        assert_eq!(span.classify(0.4), Lifetime::Active);
        assert_eq!(span.classify(0.9), Lifetime::After);
    }

    #[test]
    fn test_vec2_conversion() {
        let span: LifeSpan = Vec2::new(0.25, 0.5).into();
        assert_eq!(span, LifeSpan::new(0.25, 0.5));
        assert_eq!(span.end(), 0.75);
    }
}
