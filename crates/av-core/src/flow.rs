//! Particles flowing along connection curves

/// A particle travelling along a connection.
///
/// `progress` is the curve parameter in `[0, 1]`; it wraps back to the
/// start once it passes the end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowParticle {
    pub progress: f32,
    pub speed: f32,
}

impl FlowParticle {
    pub fn new(progress: f32, speed: f32) -> Self {
        Self { progress, speed }
    }

    /// Advance by one frame
    pub fn advance(&mut self) {
        self.progress += self.speed;
        if self.progress > 1.0 {
            self.progress = 0.0;
        }
    }

    /// `count` particles evenly spaced along the curve, each with its own
    /// speed in `[min_speed, max_speed)`.
    ///
    /// Speeds are derived from `seed` so the same connection always animates
    /// the same way.
    pub fn spread(count: usize, seed: usize, min_speed: f32, max_speed: f32) -> Vec<Self> {
        let range = (max_speed - min_speed).max(0.0);
        (0..count)
            .map(|i| {
                let progress = i as f32 / count as f32;
                let speed = min_speed + range * unit_hash(seed.wrapping_mul(31).wrapping_add(i));
                Self::new(progress, speed)
            })
            .collect()
    }
}

/// Deterministic hash into `[0, 1)`
fn unit_hash(seed: usize) -> f32 {
    let x = seed.wrapping_mul(2654435761) ^ seed.wrapping_mul(340573321);
    ((x & 0xFFFF) as f32) / 65536.0
}
