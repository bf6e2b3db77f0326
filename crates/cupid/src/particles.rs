use crate::geometry::Size;
use crate::motion::{cycle_progress, ease_out, keyframes, lerp, progress};
use derive_more::{AsRef, Deref, Display, From, Into};
use palette::Srgb;
use palette::rgb::FromHexError;
use rand::Rng;
use std::str::FromStr;
use std::time::Duration;

pub const AMBIENT_COUNT: usize = 25;
pub const BURST_SIZE: usize = 100;
pub const CONFETTI_CLEAR_DELAY: Duration = Duration::from_secs(4);
pub const CONFETTI_FALL: Duration = Duration::from_secs(3);
pub const CONFETTI_START_Y: f64 = -20.0;
pub const CONFETTI_BASE_SIZE: f64 = 15.0;

pub const SYMBOLS: &[&str] = &["🖤", "💙", "🩵", "✨", "⭐", "💎", "🌙", "🔷", "🫧"];
pub const CONFETTI_COLORS: &[&str] = &[
    "#2563eb", "#3b82f6", "#60a5fa", "#1e40af", "#1d4ed8", "#93c5fd", "#0a0a1a",
];

const AMBIENT_OPACITY: &[f64] = &[0.0, 0.7, 0.7, 0.0];
const AMBIENT_EXIT_Y: f64 = -100.0;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct HexColor(String);

crate::impl_string_newtype!(HexColor);

impl HexColor {
    pub fn to_srgb(&self) -> Result<Srgb<f64>, FromHexError> {
        Ok(Srgb::<u8>::from_str(&self.0)?.into_format())
    }
}

/// Draws a uniform value in `[min, min + span)`.
fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f64, span: f64) -> f64 {
    rng.random::<f64>() * span + min
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

/// A symbol looping up the screen behind the card.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingParticle {
    pub id: usize,
    pub symbol: &'static str,
    /// Horizontal position, percent of viewport width.
    pub left: f64,
    pub delay: Duration,
    /// Font size in pixels.
    pub size: f64,
    pub duration: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleFrame {
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
    /// Radians.
    pub rotation: f64,
}

impl FloatingParticle {
    pub fn random<R: Rng + ?Sized>(id: usize, rng: &mut R) -> Self {
        Self {
            id,
            symbol: pick(rng, SYMBOLS),
            left: uniform(rng, 0.0, 100.0),
            delay: Duration::from_secs_f64(uniform(rng, 0.0, 8.0)),
            size: uniform(rng, 16.0, 24.0),
            duration: Duration::from_secs_f64(uniform(rng, 6.0, 4.0)),
        }
    }

    /// Where the particle is at scene time `now`, or `None` before its first cycle.
    pub fn frame(&self, now: Duration, viewport: Size) -> Option<ParticleFrame> {
        let t = cycle_progress(now, self.delay, self.duration)?;
        Some(ParticleFrame {
            x: self.left / 100.0 * viewport.width,
            y: lerp(viewport.height, AMBIENT_EXIT_Y, t),
            opacity: keyframes(AMBIENT_OPACITY, t),
            rotation: t * std::f64::consts::TAU,
        })
    }
}

pub fn ambient<R: Rng + ?Sized>(rng: &mut R) -> Vec<FloatingParticle> {
    (0..AMBIENT_COUNT)
        .map(|id| FloatingParticle::random(id, rng))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiPiece {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub color: HexColor,
    /// Degrees.
    pub rotation: f64,
    pub scale: f64,
    /// Horizontal travel over the fall, in pixels.
    pub drift: f64,
}

impl ConfettiPiece {
    pub fn diameter(&self) -> f64 {
        self.scale * CONFETTI_BASE_SIZE
    }

    /// Where the piece is `age` after its burst started. Pieces rest at the
    /// bottom edge once the fall is over.
    pub fn frame(&self, age: Duration, viewport: Size) -> ParticleFrame {
        let t = ease_out(progress(age, CONFETTI_FALL));
        ParticleFrame {
            x: self.x + self.drift * t,
            y: lerp(self.y, viewport.height, t),
            opacity: 1.0,
            rotation: (self.rotation + 720.0 * t).to_radians(),
        }
    }
}

/// A fresh burst spread across `width`. Ids start at `first_id`.
pub fn burst<R: Rng + ?Sized>(rng: &mut R, width: f64, first_id: u64) -> Vec<ConfettiPiece> {
    (0..BURST_SIZE as u64)
        .map(|i| ConfettiPiece {
            id: first_id + i,
            x: uniform(rng, 0.0, width.max(0.0)),
            y: CONFETTI_START_Y,
            color: HexColor::from(pick(rng, CONFETTI_COLORS)),
            rotation: uniform(rng, 0.0, 360.0),
            scale: uniform(rng, 0.5, 0.5),
            drift: uniform(rng, -100.0, 200.0),
        })
        .collect()
}
