//! Time-based interpolation used by the card's animations.
//!
//! Everything here is a pure function of elapsed time so frames can be
//! sampled at any instant without keeping per-frame state.

use crate::geometry::{Offset, Point};
use std::time::Duration;

/// Card entrance length for [`EntranceStyle::Rise`] and [`EntranceStyle::Pop`].
pub const ENTRANCE_DURATION: Duration = Duration::from_millis(500);
/// Card entrance length for [`EntranceStyle::Slide`].
pub const SLIDE_DURATION: Duration = Duration::from_millis(400);
/// Length of one staggered element reveal inside the card.
pub const REVEAL_DURATION: Duration = Duration::from_millis(300);
const REVEAL_RISE: f64 = 20.0;
// Overshoot of the bouncy ease used by the Pop entrance.
const BACK_OVERSHOOT: f64 = 1.70158;

/// Spring stiffness for the evasive button's motion.
pub const SPRING_STIFFNESS: f64 = 80.0;
/// Spring damping for the evasive button's motion.
pub const SPRING_DAMPING: f64 = 25.0;

// Integration sub-step; keeps the explicit integrator stable at large frame gaps.
const SPRING_SUBSTEP: f64 = 1.0 / 240.0;
const SPRING_REST_EPSILON: f64 = 0.01;

/// `elapsed / total`, clamped to `[0, 1]`.
pub fn progress(elapsed: Duration, total: Duration) -> f64 {
    if total.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
}

pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Ease-out that overshoots past 1 before settling, for a small bounce.
pub fn ease_out_back(t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let t = t - 1.0;
    1.0 + (BACK_OVERSHOOT + 1.0) * t * t * t + BACK_OVERSHOOT * t * t
}

pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Piecewise-linear interpolation over evenly spaced keyframes.
pub fn keyframes(values: &[f64], t: f64) -> f64 {
    match values {
        [] => 0.0,
        [only] => *only,
        _ => {
            let t = t.clamp(0.0, 1.0);
            let segments = (values.len() - 1) as f64;
            let scaled = t * segments;
            let idx = (scaled.floor() as usize).min(values.len() - 2);
            lerp(values[idx], values[idx + 1], scaled - idx as f64)
        }
    }
}

/// Position within a repeating cycle, `None` while still waiting on `delay`.
pub fn cycle_progress(now: Duration, delay: Duration, period: Duration) -> Option<f64> {
    let active = now.checked_sub(delay)?;
    if period.is_zero() {
        return Some(0.0);
    }
    let period = period.as_secs_f64();
    Some((active.as_secs_f64() % period) / period)
}

/// One-dimensional damped spring with unit mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    value: f64,
    velocity: f64,
    target: f64,
    stiffness: f64,
    damping: f64,
}

impl Spring {
    pub fn new(value: f64, stiffness: f64, damping: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            stiffness,
            damping,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Jump to `value` with no residual velocity.
    pub fn snap(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_at_rest(&self) -> bool {
        self.velocity == 0.0 && self.value == self.target
    }

    pub fn step(&mut self, dt: Duration) {
        if self.is_at_rest() {
            return;
        }

        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let h = remaining.min(SPRING_SUBSTEP);
            let accel =
                -self.stiffness * (self.value - self.target) - self.damping * self.velocity;
            self.velocity += accel * h;
            self.value += self.velocity * h;
            remaining -= h;
        }

        if (self.value - self.target).abs() < SPRING_REST_EPSILON
            && self.velocity.abs() < SPRING_REST_EPSILON
        {
            self.snap(self.target);
        }
    }
}

/// A pair of springs driving an [`Offset`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetSpring {
    x: Spring,
    y: Spring,
}

impl Default for OffsetSpring {
    fn default() -> Self {
        Self {
            x: Spring::new(0.0, SPRING_STIFFNESS, SPRING_DAMPING),
            y: Spring::new(0.0, SPRING_STIFFNESS, SPRING_DAMPING),
        }
    }
}

impl OffsetSpring {
    pub fn value(&self) -> Offset {
        Offset::new(self.x.value(), self.y.value())
    }

    pub fn set_target(&mut self, target: Offset) {
        self.x.set_target(target.x);
        self.y.set_target(target.y);
    }

    pub fn snap(&mut self, value: Offset) {
        self.x.snap(value.x);
        self.y.snap(value.y);
    }

    pub fn step(&mut self, dt: Duration) {
        self.x.step(dt);
        self.y.step(dt);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntranceStyle {
    /// Fade in, grow from 80% and rise 50px into place.
    Rise,
    /// Fade in, grow from 50% with a bounce and untilt from -10 degrees.
    Pop,
    /// Fade in and rise 50px, no scaling.
    Slide,
}

impl EntranceStyle {
    pub fn duration(&self) -> Duration {
        match self {
            Self::Rise | Self::Pop => ENTRANCE_DURATION,
            Self::Slide => SLIDE_DURATION,
        }
    }
}

/// Card entrance frame, applied around the card's center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entrance {
    pub opacity: f64,
    pub scale: f64,
    pub rise: f64,
    /// Radians.
    pub rotation: f64,
}

impl Entrance {
    pub fn at(style: EntranceStyle, elapsed: Duration) -> Self {
        let t = progress(elapsed, style.duration());
        let e = ease_out(t);
        match style {
            EntranceStyle::Rise => Self {
                opacity: e,
                scale: lerp(0.8, 1.0, e),
                rise: lerp(50.0, 0.0, e),
                rotation: 0.0,
            },
            EntranceStyle::Pop => {
                let b = ease_out_back(t);
                Self {
                    opacity: e,
                    scale: lerp(0.5, 1.0, b),
                    rise: 0.0,
                    rotation: lerp(-10.0, 0.0, b).to_radians(),
                }
            }
            EntranceStyle::Slide => Self {
                opacity: e,
                scale: 1.0,
                rise: lerp(50.0, 0.0, e),
                rotation: 0.0,
            },
        }
    }

    pub fn is_finished(&self) -> bool {
        self.opacity >= 1.0
    }

    /// Maps a point on screen back into the untransformed card around `pivot`.
    pub fn unproject(&self, point: Point, pivot: Point) -> Point {
        if self.scale <= f64::EPSILON {
            return point;
        }
        let (dx, dy) = (point.x - pivot.x, point.y - pivot.y - self.rise);
        let (sin, cos) = (-self.rotation).sin_cos();
        Point::new(
            pivot.x + (dx * cos - dy * sin) / self.scale,
            pivot.y + (dx * sin + dy * cos) / self.scale,
        )
    }
}

/// Staggered reveal of one element inside the card: fade in and rise 20px
/// once `delay` has passed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reveal {
    pub opacity: f64,
    pub rise: f64,
}

impl Reveal {
    pub fn at(elapsed: Duration, delay: Duration) -> Self {
        let t = ease_out(progress(elapsed.saturating_sub(delay), REVEAL_DURATION));
        Self {
            opacity: t,
            rise: lerp(REVEAL_RISE, 0.0, t),
        }
    }

    /// Maps a point on screen into the element's resting position.
    pub fn lower(&self, point: Point) -> Point {
        Point::new(point.x, point.y - self.rise)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyframes_interpolate_between_stops() {
        let stops = [0.0, 0.7, 0.7, 0.0];
        assert_eq!(keyframes(&stops, 0.0), 0.0);
        assert!((keyframes(&stops, 1.0 / 6.0) - 0.35).abs() < 1e-9);
        assert!((keyframes(&stops, 0.5) - 0.7).abs() < 1e-9);
        assert_eq!(keyframes(&stops, 1.0), 0.0);
    }

    #[test]
    fn test_cycle_progress_waits_for_delay() {
        let period = Duration::from_secs(4);
        assert_eq!(
            cycle_progress(Duration::from_secs(1), Duration::from_secs(2), period),
            None
        );
        let p = cycle_progress(Duration::from_secs(7), Duration::from_secs(2), period);
        assert!((p.unwrap_or_default() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_spring_settles_on_target() {
        let mut spring = OffsetSpring::default();
        spring.set_target(Offset::new(200.0, -150.0));
        for _ in 0..600 {
            spring.step(Duration::from_millis(16));
        }
        assert!(spring.x.is_at_rest() && spring.y.is_at_rest());
        assert_eq!(spring.value(), Offset::new(200.0, -150.0));
    }

    #[test]
    fn test_spring_moves_toward_target_without_overshoot() {
        let mut spring = Spring::new(0.0, SPRING_STIFFNESS, SPRING_DAMPING);
        spring.set_target(100.0);
        let mut last = 0.0;
        for _ in 0..120 {
            spring.step(Duration::from_millis(16));
            assert!(spring.value() >= last);
            assert!(spring.value() <= 100.0);
            last = spring.value();
        }
    }

    #[test]
    fn test_entrance_finishes_after_duration() {
        for style in [EntranceStyle::Rise, EntranceStyle::Pop, EntranceStyle::Slide] {
            let start = Entrance::at(style, Duration::ZERO);
            assert_eq!(start.opacity, 0.0);
            assert!(!start.is_finished());
            let end = Entrance::at(style, style.duration());
            assert!(end.is_finished(), "{style:?}");
            assert_eq!((end.scale, end.rise, end.rotation), (1.0, 0.0, 0.0));
        }
    }

    #[test]
    fn test_entrance_styles_differ() {
        let rise = Entrance::at(EntranceStyle::Rise, Duration::ZERO);
        assert_eq!((rise.scale, rise.rise), (0.8, 50.0));

        let pop = Entrance::at(EntranceStyle::Pop, Duration::ZERO);
        assert_eq!((pop.scale, pop.rise), (0.5, 0.0));
        assert!((pop.rotation - (-10.0f64).to_radians()).abs() < 1e-12);

        let slide = Entrance::at(EntranceStyle::Slide, Duration::ZERO);
        assert_eq!((slide.scale, slide.rise, slide.rotation), (1.0, 50.0, 0.0));
    }

    #[test]
    fn test_pop_overshoots_before_settling() {
        let peak = (1..50)
            .map(|i| Entrance::at(EntranceStyle::Pop, Duration::from_millis(i * 10)).scale)
            .fold(0.0, f64::max);
        assert!(peak > 1.0, "{peak}");
    }

    #[test]
    fn test_unproject_inverts_card_transform() {
        let pivot = Point::new(640.0, 400.0);
        let entrance = Entrance::at(EntranceStyle::Pop, Duration::from_millis(120));
        let local = Point::new(700.0, 520.0);

        // the renderer's transform: translate to pivot + rise, rotate, scale, translate back
        let (dx, dy) = (
            (local.x - pivot.x) * entrance.scale,
            (local.y - pivot.y) * entrance.scale,
        );
        let (sin, cos) = entrance.rotation.sin_cos();
        let screen = Point::new(
            pivot.x + dx * cos - dy * sin,
            pivot.y + entrance.rise + dx * sin + dy * cos,
        );

        let back = entrance.unproject(screen, pivot);
        assert!(back.distance_to(local) < 1e-9, "{back:?}");
    }

    #[test]
    fn test_reveal_waits_for_delay() {
        let delay = Duration::from_millis(600);
        let before = Reveal::at(Duration::from_millis(500), delay);
        assert_eq!((before.opacity, before.rise), (0.0, 20.0));
        assert_eq!(before.lower(Point::new(5.0, 30.0)), Point::new(5.0, 10.0));

        let done = Reveal::at(delay + REVEAL_DURATION, delay);
        assert_eq!((done.opacity, done.rise), (1.0, 0.0));
    }
}
