/// Deterministic xorshift64 generator. Same seed, same starfield.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform float in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits fill the f32 mantissa exactly.
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform float in [-half_extent, half_extent).
    pub fn spread(&mut self, half_extent: f32) -> f32 {
        (self.next_f32() * 2.0 - 1.0) * half_extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let (mut a, mut b) = (Rng::new(42), Rng::new(42));
        let first: Vec<f32> = (0..16).map(|_| a.next_f32()).collect();
        let second: Vec<f32> = (0..16).map(|_| b.next_f32()).collect();
        assert_eq!(first, second);
        let mut c = Rng::new(43);
        let other: Vec<f32> = (0..16).map(|_| c.next_f32()).collect();
        assert_ne!(first, other);
    }

    #[test]
    fn zero_seed_is_not_stuck() {
        let mut rng = Rng::new(0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn floats_stay_in_range() {
        let mut rng = Rng::new(7);
        for _ in 0..1000 {
            let f = rng.next_f32();
            assert!((0.0..1.0).contains(&f));
            let s = rng.spread(250.0);
            assert!((-250.0..250.0).contains(&s));
        }
    }
}
