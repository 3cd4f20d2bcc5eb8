use aeon_core::Color;
use rand::Rng;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// A seeded point scattered over a rectangular patch of the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scattered {
    pub position: [f64; 2],
    pub color: Color,
}

/// Colours of the hot plasma particles right after the Big Bang
pub const PLASMA_COLORS: [Color; 4] = [Color::Red, Color::Orange, Color::Green, Color::Purple];

/// Scatter `count` points uniformly over `[-half_w, half_w] x [-half_h, half_h]`,
/// colouring each with a random pick from `palette`.
///
/// The same seed always yields the same scatter.
pub fn scatter(
    seed: u64,
    count: usize,
    half_w: f64,
    half_h: f64,
    palette: &[Color],
) -> Vec<Scattered> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let position = [
                rng.gen_range(-half_w..=half_w),
                rng.gen_range(-half_h..=half_h),
            ];
            let color = palette.choose(&mut rng).copied().unwrap_or(Color::White);
            Scattered { position, color }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scatter_deterministic() {
        let a = scatter(42, 40, 5.0, 3.0, &PLASMA_COLORS);
        let b = scatter(42, 40, 5.0, 3.0, &PLASMA_COLORS);
        assert_eq!(a, b);
        assert_ne!(a, scatter(43, 40, 5.0, 3.0, &PLASMA_COLORS));
    }

    #[test]
    fn test_scatter_stays_in_patch() {
        for p in scatter(7, 200, 6.0, 3.0, &[Color::White]) {
            assert!(p.position[0].abs() <= 6.0);
            assert!(p.position[1].abs() <= 3.0);
            assert_eq!(p.color, Color::White);
        }
    }

    #[test]
    fn test_empty_palette_falls_back_to_white() {
        let pts = scatter(1, 3, 1.0, 1.0, &[]);
        assert!(pts.iter().all(|p| p.color == Color::White));
    }
}
