//! Fixed-length weight vectors and the arithmetic the map needs on them.

/// Number of components in a weight vector (red, green, blue).
pub const CHANNELS: usize = 3;

/// A weight vector: one normalized colour, each channel conventionally in [0, 1].
pub type WeightVector = [f64; CHANNELS];

/// The all-zero vector, rendered as black.
pub const BLACK: WeightVector = [0.0; CHANNELS];

/// Computes the Euclidean distance between two vectors.
#[inline]
pub fn distance(a: &WeightVector, b: &WeightVector) -> f64 {
    distance_squared(a, b).sqrt()
}

/// Computes the squared Euclidean distance (avoids the sqrt).
#[inline]
pub fn distance_squared(a: &WeightVector, b: &WeightVector) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum()
}

/// Moves `from` towards `to` by `t`.
///
/// Each component becomes `from + t * (to - from)`, which is a convex
/// combination of the two whenever `0 <= t <= 1`.
#[inline]
pub fn lerp(from: &WeightVector, to: &WeightVector, t: f64) -> WeightVector {
    let mut out = *from;
    for (w, target) in out.iter_mut().zip(to.iter()) {
        *w += t * (target - *w);
    }
    out
}

/// Converts 8-bit RGB channels to a weight vector in [0, 1].
#[inline]
pub fn from_rgb8(rgb: [u8; CHANNELS]) -> WeightVector {
    rgb.map(|c| f64::from(c) / 255.0)
}

/// Converts a weight vector to 8-bit RGB channels.
///
/// Components are clamped to [0, 1] first; the map does not guarantee the
/// bound when trained with a learning rate above 1.
#[inline]
pub fn to_rgb8(v: &WeightVector) -> [u8; CHANNELS] {
    v.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = [1.0, 0.0, 0.0];
        let b = [0.0, 1.0, 0.0];
        assert!((distance(&a, &b) - std::f64::consts::SQRT_2).abs() < 1e-10);
        assert!((distance_squared(&a, &b) - 2.0).abs() < 1e-10);
        assert_eq!(distance(&a, &a), 0.0);
    }

    #[test]
    fn test_lerp() {
        let from = [0.0, 0.5, 1.0];
        let to = [1.0, 1.0, 1.0];

        let half = lerp(&from, &to, 0.5);
        assert!((half[0] - 0.5).abs() < 1e-10);
        assert!((half[1] - 0.75).abs() < 1e-10);
        assert!((half[2] - 1.0).abs() < 1e-10);

        assert_eq!(lerp(&from, &to, 0.0), from);
    }

    #[test]
    fn test_rgb8_conversion() {
        assert_eq!(from_rgb8([255, 0, 0]), [1.0, 0.0, 0.0]);
        assert_eq!(to_rgb8(&[1.0, 0.0, 0.5]), [255, 0, 128]);
        // Out-of-range components are clamped
        assert_eq!(to_rgb8(&[1.5, -0.2, 0.0]), [255, 0, 0]);
        assert_eq!(to_rgb8(&from_rgb8([12, 200, 77])), [12, 200, 77]);
    }
}
