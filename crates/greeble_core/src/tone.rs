//! Grayscale tones
//!
//! The generator is monochrome on purpose: its output feeds a height/bump
//! channel, so every "color" is a single intensity in `[0.0, 1.0]`.

use serde::{Deserialize, Serialize};

/// Scalar grayscale intensity, always within `[0.0, 1.0]`
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Tone(f64);

impl Tone {
    pub const BLACK: Tone = Tone(0.0);
    pub const WHITE: Tone = Tone(1.0);

    /// Create a tone, clamping into range (NaN becomes black)
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self::BLACK
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// Tone from the 0..=255 scale used by parameter presets (`value / 256`)
    pub fn from_byte(value: u8) -> Self {
        Self::new(f64::from(value) / 256.0)
    }

    pub const fn value(self) -> f64 {
        self.0
    }

    /// Round to the nearest 8-bit level
    pub fn to_u8(self) -> u8 {
        (self.0 * 255.0).round() as u8
    }

    /// Light foregrounds get wider strokes in the line bundle pattern
    pub fn is_light(self) -> bool {
        self.0 >= 0.5
    }

    /// Shift by `delta`, clamping into range
    pub fn offset(self, delta: f64) -> Self {
        Self::new(self.0 + delta)
    }
}

impl From<f64> for Tone {
    fn from(value: f64) -> Self {
        Tone::new(value)
    }
}

impl From<Tone> for f64 {
    fn from(tone: Tone) -> Self {
        tone.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamping() {
        assert_eq!(Tone::new(1.7), Tone::WHITE);
        assert_eq!(Tone::new(-0.2), Tone::BLACK);
        assert_eq!(Tone::new(f64::NAN), Tone::BLACK);
        assert_eq!(Tone::new(0.4).value(), 0.4);
    }

    #[test]
    fn test_byte_scale() {
        assert_eq!(Tone::from_byte(64).value(), 0.25);
        assert_eq!(Tone::from_byte(128).value(), 0.5);
        assert_eq!(Tone::new(0.5).to_u8(), 128);
        assert_eq!(Tone::WHITE.to_u8(), 255);
    }

    #[test]
    fn test_light_threshold() {
        assert!(Tone::new(0.5).is_light());
        assert!(!Tone::new(0.49).is_light());
        assert_eq!(Tone::new(0.9).offset(0.3), Tone::WHITE);
    }
}
