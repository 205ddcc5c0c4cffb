use crate::math::{dot, normalize, scale, Vec3};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Inner radius of the star shell
pub const STAR_RADIUS: f64 = 300.0;
/// Thickness of the star shell
pub const STAR_DEPTH: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vec3,
    /// Relative brightness in `[0.3, 1]`
    pub brightness: f64,
}

/// Background star field, identical across runs for a given count
#[derive(Debug, Clone)]
pub struct StarField {
    pub stars: Vec<Star>,
}

impl StarField {
    pub fn generate(count: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(0x5741_5253);
        let stars = (0..count)
            .map(|_| {
                // Rejection sampling inside the unit ball gives a uniform direction
                let direction = loop {
                    let candidate: Vec3 = [
                        rng.gen_range(-1.0..1.0),
                        rng.gen_range(-1.0..1.0),
                        rng.gen_range(-1.0..1.0),
                    ];
                    let len_sq = dot(&candidate, &candidate);
                    if len_sq > 1e-6 && len_sq <= 1.0 {
                        break normalize(&candidate);
                    }
                };
                let radius = STAR_RADIUS + rng.gen_range(0.0..STAR_DEPTH);
                Star {
                    position: scale(&direction, radius),
                    brightness: rng.gen_range(0.3..=1.0),
                }
            })
            .collect();
        StarField { stars }
    }
}
