//! RGB Colors

use crate::base::{clamp, Float};
use std::ops::{Add, AddAssign, Mul, Sub};

/// An RGB color with `Float` channels. Channel values are unbounded during
/// shading; clamping happens at well defined points in the light transport.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: Float,

    /// Green channel.
    pub g: Float,

    /// Blue channel.
    pub b: Float,
}

impl Color {
    /// Creates a new color.
    ///
    /// * `r` - Red channel.
    /// * `g` - Green channel.
    /// * `b` - Blue channel.
    pub fn new(r: Float, g: Float, b: Float) -> Self {
        Self { r, g, b }
    }

    /// Black (all channels zero).
    pub fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// White (all channels one).
    pub fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// Creates a color with the same value in every channel.
    ///
    /// * `v` - Channel value.
    pub fn splat(v: Float) -> Self {
        Self::new(v, v, v)
    }

    /// Returns true if all channels are exactly zero.
    pub fn is_black(&self) -> bool {
        self.r == 0.0 && self.g == 0.0 && self.b == 0.0
    }

    /// Returns the color clamped to `[0, 1]` per channel.
    pub fn clamp(&self) -> Self {
        Self::new(
            clamp(self.r, 0.0, 1.0),
            clamp(self.g, 0.0, 1.0),
            clamp(self.b, 0.0, 1.0),
        )
    }

    /// Returns the largest channel value.
    pub fn max_component(&self) -> Float {
        self.r.max(self.g).max(self.b)
    }

    /// Converts to 8-bit RGB, clamping each channel first.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let c = self.clamp();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
        ]
    }
}

impl Add for Color {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.r + other.r, self.g + other.g, self.b + other.b)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Color {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.r - other.r, self.g - other.g, self.b - other.b)
    }
}

impl Mul for Color {
    type Output = Self;

    /// Channel-wise (Hadamard) product.
    fn mul(self, other: Self) -> Self {
        Self::new(self.r * other.r, self.g * other.g, self.b * other.b)
    }
}

impl Mul<Float> for Color {
    type Output = Self;

    fn mul(self, s: Float) -> Self {
        Self::new(self.r * s, self.g * s, self.b * s)
    }
}

impl Mul<Color> for Float {
    type Output = Color;

    fn mul(self, c: Color) -> Color {
        c * self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_per_channel() {
        let c = Color::new(2.0, -0.5, 0.25).clamp();
        assert_eq!(c, Color::new(1.0, 0.0, 0.25));
    }

    #[test]
    fn hadamard_product() {
        let c = Color::new(0.5, 1.0, 0.0) * Color::new(0.5, 0.25, 1.0);
        assert_eq!(c, Color::new(0.25, 0.25, 0.0));
    }

    #[test]
    fn rgb8_rounding() {
        assert_eq!(Color::splat(0.5).to_rgb8(), [128, 128, 128]);
        assert_eq!(Color::new(1.5, -1.0, 1.0).to_rgb8(), [255, 0, 255]);
    }
}
